//! Repository layer for dynamic session data.
//!
//! Repositories persist what CHANGES during play: the game state, message
//! log, action records, and metrics, bundled as a [`SessionSnapshot`].
//! Static content (archetypes, maps) comes from oracles, not repositories.

mod file;
mod memory;
mod snapshot;
mod traits;

pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
pub use snapshot::SessionSnapshot;
pub use traits::SnapshotRepository;
