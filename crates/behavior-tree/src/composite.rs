//! Composite behavior nodes.
//!
//! [`Sequence`] is a short-circuiting AND over its children and [`Selector`]
//! a short-circuiting OR. A selector over an ordered list of guarded
//! behaviors is a priority list: the first child that succeeds wins and the
//! rest are skipped.

use crate::{BoxedBehavior, Behavior, Status};

/// Runs children left to right until one fails.
///
/// An empty sequence succeeds.
pub struct Sequence<'a, C> {
    children: Vec<BoxedBehavior<'a, C>>,
}

impl<'a, C> Sequence<'a, C> {
    pub fn new(children: Vec<BoxedBehavior<'a, C>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Runs children left to right until one succeeds.
///
/// An empty selector fails.
pub struct Selector<'a, C> {
    children: Vec<BoxedBehavior<'a, C>>,
}

impl<'a, C> Selector<'a, C> {
    pub fn new(children: Vec<BoxedBehavior<'a, C>>) -> Self {
        Self { children }
    }

    /// Appends a lower-priority child.
    pub fn push(&mut self, child: BoxedBehavior<'a, C>) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}
