//! Persistence adapters for the player ledger.

pub mod memory;
pub mod player_repo;

pub use memory::MemoryPlayerRepo;
pub use player_repo::SqlitePlayerRepo;
