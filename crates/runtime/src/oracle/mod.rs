//! Reference oracle implementations backed by in-memory data.

mod map;

pub use map::GridMap;
