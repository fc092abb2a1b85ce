//! Closure-backed leaf nodes.

use crate::{Behavior, Status};

/// Succeeds when the predicate holds. Never mutates the context.
pub struct Condition<F> {
    predicate: F,
}

impl<F> Condition<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        if (self.predicate)(ctx) {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// Runs a closure against the context and reports its status.
pub struct Task<F> {
    run: F,
}

impl<F> Task<F> {
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<C, F> Behavior<C> for Task<F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.run)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_reads_context() {
        let positive = Condition::new(|n: &i32| *n > 0);
        assert_eq!(positive.tick(&mut 3), Status::Success);
        assert_eq!(positive.tick(&mut -1), Status::Failure);
    }

    #[test]
    fn task_can_write_context() {
        let bump = Task::new(|n: &mut i32| {
            *n += 1;
            Status::Success
        });
        let mut value = 0;
        bump.tick(&mut value);
        bump.tick(&mut value);
        assert_eq!(value, 2);
    }
}
