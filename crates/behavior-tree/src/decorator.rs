//! Decorator behavior nodes.
//!
//! Decorators wrap a single child and gate or rewrite its result.

use crate::{Behavior, BoxedBehavior, Status};

/// Runs the child only when the condition succeeds.
///
/// Returns the child's status, or `Failure` without touching the child when
/// the condition fails. This is the "precondition then effect" unit of a
/// priority list.
pub struct Guard<'a, C> {
    condition: BoxedBehavior<'a, C>,
    child: BoxedBehavior<'a, C>,
}

impl<'a, C> Guard<'a, C> {
    pub fn new(condition: BoxedBehavior<'a, C>, child: BoxedBehavior<'a, C>) -> Self {
        Self { condition, child }
    }
}

impl<C> Behavior<C> for Guard<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        match self.condition.tick(ctx) {
            Status::Success => self.child.tick(ctx),
            Status::Failure => Status::Failure,
        }
    }
}

/// Logical NOT of the child.
pub struct Inverter<'a, C> {
    child: BoxedBehavior<'a, C>,
}

impl<'a, C> Inverter<'a, C> {
    pub fn new(child: BoxedBehavior<'a, C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

/// Runs the child and reports `Success` whatever it returned.
pub struct AlwaysSucceed<'a, C> {
    child: BoxedBehavior<'a, C>,
}

impl<'a, C> AlwaysSucceed<'a, C> {
    pub fn new(child: BoxedBehavior<'a, C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let _ = self.child.tick(ctx);
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Task};

    fn bump() -> BoxedBehavior<'static, i32> {
        Box::new(Task::new(|n: &mut i32| {
            *n += 1;
            Status::Failure
        }))
    }

    #[test]
    fn guard_skips_child_when_condition_fails() {
        let guard = Guard::new(Box::new(Condition::new(|n: &i32| *n >= 0)), bump());
        let mut value = -1;
        assert_eq!(guard.tick(&mut value), Status::Failure);
        assert_eq!(value, -1);

        let mut value = 0;
        assert_eq!(guard.tick(&mut value), Status::Failure);
        assert_eq!(value, 1, "child ran and its status was passed through");
    }

    #[test]
    fn inverter_flips() {
        let inverter = Inverter::new(Box::new(Condition::new(|n: &i32| *n > 0)));
        assert_eq!(inverter.tick(&mut 10), Status::Failure);
        assert_eq!(inverter.tick(&mut -10), Status::Success);
    }

    #[test]
    fn always_succeed_still_runs_child() {
        let always = AlwaysSucceed::new(bump());
        let mut value = 0;
        assert_eq!(always.tick(&mut value), Status::Success);
        assert_eq!(value, 1);
    }
}
