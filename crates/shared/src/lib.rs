//! Driftline shared library.
//!
//! Wire contracts used by both Engine (server) and Player (client): HTTP
//! request/response bodies and WebSocket message enums. Kept free of any
//! transport code so both sides depend on the same shapes.

pub mod messages;
pub mod requests;
pub mod responses;

pub use messages::{ClientMessage, LeaderboardEntry, ServerMessage};
pub use requests::FishRequest;
pub use responses::{ErrorBody, ErrorCode, FishResponse, PlayerView, UpgradeResponse};
