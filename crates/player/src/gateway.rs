//! Engine API access.
//!
//! `ApiGateway` is the outbound port for the game's HTTP calls;
//! `ReqwestGateway` is the real adapter. `GameClient` sits on top and
//! enforces the one-submission-at-a-time rule: a cast triggered while a
//! request is still in flight is dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use driftline_domain::CastQuality;
use driftline_shared::{
    ErrorBody, ErrorCode, FishRequest, FishResponse, LeaderboardEntry, PlayerView, UpgradeResponse,
};

/// Header carrying the session's player id on game routes.
const PLAYER_ID_HEADER: &str = "x-player-id";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The engine rejected the request with a structured body.
    #[error("API error {code:?}: {message}")]
    Api { code: ErrorCode, message: String },

    /// A game route was called before a guest session was provisioned.
    #[error("No active session, call create_guest first")]
    NoSession,

    #[error("Transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound port for the engine's HTTP API.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Provision a guest account and remember its id for later calls.
    async fn create_guest(&self) -> Result<PlayerView, GatewayError>;

    async fn fetch_profile(&self) -> Result<PlayerView, GatewayError>;

    async fn cast(&self, quality: CastQuality) -> Result<FishResponse, GatewayError>;

    async fn upgrade(&self) -> Result<UpgradeResponse, GatewayError>;

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError>;
}

pub struct ReqwestGateway {
    client: reqwest::Client,
    base_url: String,
    player_id: RwLock<Option<Uuid>>,
}

impl ReqwestGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            player_id: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn session_id(&self) -> Result<Uuid, GatewayError> {
        self.player_id
            .read()
            .ok()
            .and_then(|guard| *guard)
            .ok_or(GatewayError::NoSession)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(GatewayError::Api {
                code: body.code,
                message: body.message,
            }),
            Err(_) => Err(GatewayError::Api {
                code: ErrorCode::Internal,
                message: format!("HTTP {status}"),
            }),
        }
    }
}

#[async_trait]
impl ApiGateway for ReqwestGateway {
    async fn create_guest(&self) -> Result<PlayerView, GatewayError> {
        let response = self.client.post(self.url("/api/auth/guest")).send().await?;
        let view: PlayerView = Self::parse(response).await?;
        if let Ok(mut guard) = self.player_id.write() {
            *guard = Some(view.id);
        }
        tracing::info!(player_id = %view.id, "Guest session provisioned");
        Ok(view)
    }

    async fn fetch_profile(&self) -> Result<PlayerView, GatewayError> {
        let id = self.session_id()?;
        let response = self
            .client
            .get(self.url("/api/players/me"))
            .header(PLAYER_ID_HEADER, id.to_string())
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn cast(&self, quality: CastQuality) -> Result<FishResponse, GatewayError> {
        let id = self.session_id()?;
        let response = self
            .client
            .post(self.url("/api/game/fish"))
            .header(PLAYER_ID_HEADER, id.to_string())
            .json(&FishRequest {
                quality: Some(quality),
            })
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn upgrade(&self) -> Result<UpgradeResponse, GatewayError> {
        let id = self.session_id()?;
        let response = self
            .client
            .post(self.url("/api/game/upgrade"))
            .header(PLAYER_ID_HEADER, id.to_string())
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        let response = self.client.get(self.url("/api/leaderboard")).send().await?;
        Self::parse(response).await
    }
}

/// Submission guard over the gateway.
///
/// The minigame fires requests without awaiting them from the tick loop's
/// point of view, so nothing upstream stops a second trigger while the
/// first is still out. This wrapper does: `None` means the call was
/// dropped because another submission holds the lane.
pub struct GameClient {
    gateway: Arc<dyn ApiGateway>,
    in_flight: AtomicBool,
}

impl GameClient {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn cast(&self, quality: CastQuality) -> Option<Result<FishResponse, GatewayError>> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Cast dropped, another submission is in flight");
            return None;
        }
        let result = self.gateway.cast(quality).await;
        self.in_flight.store(false, Ordering::Release);
        Some(result)
    }

    pub async fn upgrade(&self) -> Option<Result<UpgradeResponse, GatewayError>> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Upgrade dropped, another submission is in flight");
            return None;
        }
        let result = self.gateway.upgrade().await;
        self.in_flight.store(false, Ordering::Release);
        Some(result)
    }

    /// Reads are not submissions and bypass the lane.
    pub async fn profile(&self) -> Result<PlayerView, GatewayError> {
        self.gateway.fetch_profile().await
    }
}
