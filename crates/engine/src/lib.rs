//! Driftline Engine library.
//!
//! This crate contains all server-side code for the fishing game.
//!
//! ## Structure
//!
//! - `use_cases/` - Fishing, upgrading, and the leaderboard projection
//! - `infrastructure/` - Port traits and their adapters (SQLite, RNG)
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
