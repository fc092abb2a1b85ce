//! Shorthands for building trees without spelling out `Box::new`.

use crate::{
    AlwaysSucceed, Behavior, BoxedBehavior, Condition, Guard, Inverter, Selector, Sequence, Status,
    Task,
};

#[inline]
pub fn sequence<'a, C: 'a>(children: Vec<BoxedBehavior<'a, C>>) -> BoxedBehavior<'a, C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<'a, C: 'a>(children: Vec<BoxedBehavior<'a, C>>) -> BoxedBehavior<'a, C> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn guard<'a, C: 'a>(
    condition: BoxedBehavior<'a, C>,
    child: BoxedBehavior<'a, C>,
) -> BoxedBehavior<'a, C> {
    Box::new(Guard::new(condition, child))
}

#[inline]
pub fn inverter<'a, C: 'a>(child: BoxedBehavior<'a, C>) -> BoxedBehavior<'a, C> {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn always_succeed<'a, C: 'a>(child: BoxedBehavior<'a, C>) -> BoxedBehavior<'a, C> {
    Box::new(AlwaysSucceed::new(child))
}

#[inline]
pub fn condition<'a, C, F>(predicate: F) -> BoxedBehavior<'a, C>
where
    C: 'a,
    F: Fn(&C) -> bool + Send + Sync + 'a,
{
    Box::new(Condition::new(predicate))
}

#[inline]
pub fn task<'a, C, F>(run: F) -> BoxedBehavior<'a, C>
where
    C: 'a,
    F: Fn(&mut C) -> Status + Send + Sync + 'a,
{
    Box::new(Task::new(run))
}

/// Boxes any node.
#[inline]
pub fn node<'a, C, B>(behavior: B) -> BoxedBehavior<'a, C>
where
    B: Behavior<C> + 'a,
{
    Box::new(behavior)
}
