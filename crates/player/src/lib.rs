//! Driftline Player client core.
//!
//! Headless pieces of the client: the tension minigame state machine, the
//! tick-loop driver that owns a session, and the gateway that talks to
//! the engine's HTTP API. Rendering sits on top of these and is out of
//! scope here.

pub mod driver;
pub mod gateway;
pub mod minigame;

pub use driver::{run, AttemptResult};
pub use gateway::{ApiGateway, GameClient, GatewayError, ReqwestGateway};
pub use minigame::{Phase, TensionGame};
