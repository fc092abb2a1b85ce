//! Lightweight behavior tree library for turn-based games.
//!
//! - **No delta time**: every tick completes immediately
//! - **No Running state**: nodes either succeed or fail on the spot
//! - **Zero dependencies**
//!
//! Trees are cheap to build, so callers may assemble one per decision from
//! static data and drop it afterwards. Containers carry a lifetime so nodes
//! can borrow from the surrounding scope.
//!
//! # Architecture
//!
//! - [`Behavior`]: core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Leaf nodes: [`Condition`], [`Task`]
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Guard`], [`Inverter`], [`AlwaysSucceed`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

pub use behavior::{Behavior, BoxedBehavior};
pub use builder::{
    always_succeed, condition, guard, inverter, node, selector, sequence, task,
};
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Guard, Inverter};
pub use leaf::{Condition, Task};
pub use status::Status;
