//! Core behavior trait.
//!
//! [`Behavior`] is generic over a context type `C`, the blackboard a node
//! reads from and writes its results into.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this node.
    ///
    /// Nodes may read the context and record intermediate results in it.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Owned, type-erased node that may borrow for `'a`.
pub type BoxedBehavior<'a, C> = Box<dyn Behavior<C> + 'a>;

impl<C, B> Behavior<C> for Box<B>
where
    B: Behavior<C> + ?Sized,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

impl<C, B> Behavior<C> for &B
where
    B: Behavior<C> + ?Sized,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
