//! HTTP routes.

use axum::{
    extract::State,
    http::{request::Parts, StatusCode},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use chrono::Utc;
use driftline_domain::{Player, PlayerId};
use driftline_shared::{
    ErrorBody, ErrorCode, FishRequest, FishResponse, LeaderboardEntry, PlayerView, UpgradeResponse,
};

use crate::app::App;
use crate::use_cases::leaderboard::PAGE_SIZE;
use crate::use_cases::GameError;

/// Header carrying the caller's player id. Issued by `/api/auth/guest`
/// and trusted from then on.
pub const PLAYER_ID_HEADER: &str = "x-player-id";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/auth/guest", post(create_guest))
        .route("/api/players/me", get(get_me))
        .route("/api/game/fish", post(fish))
        .route("/api/game/upgrade", post(upgrade))
        .route("/api/leaderboard", get(leaderboard))
}

async fn health() -> &'static str {
    "OK"
}

/// Provision a fresh guest account. The returned id doubles as the
/// caller's credential for the game routes.
async fn create_guest(State(app): State<Arc<App>>) -> Result<Json<PlayerView>, ApiError> {
    let player = Player::new_guest(Utc::now());
    app.players
        .create(&player)
        .await
        .map_err(GameError::from)?;
    tracing::info!(player_id = %player.id, "Guest player created");
    Ok(Json(PlayerView::from(&player)))
}

async fn get_me(
    State(app): State<Arc<App>>,
    AuthenticatedPlayer(id): AuthenticatedPlayer,
) -> Result<Json<PlayerView>, ApiError> {
    let player = app
        .players
        .get(id)
        .await
        .map_err(GameError::from)?
        .ok_or(GameError::PlayerNotFound(id))?;
    Ok(Json(PlayerView::from(&player)))
}

async fn fish(
    State(app): State<Arc<App>>,
    AuthenticatedPlayer(id): AuthenticatedPlayer,
    body: Option<Json<FishRequest>>,
) -> Result<Json<FishResponse>, ApiError> {
    let quality = body.map(|Json(b)| b.quality_or_default()).unwrap_or_default();
    let report = app.use_cases.cast_line.execute(id, quality).await?;
    Ok(Json(FishResponse {
        caught: report.outcome.is_caught(),
        fish: report.outcome.tier(),
        reward: report.reward,
        player: PlayerView::from(&report.player),
    }))
}

async fn upgrade(
    State(app): State<Arc<App>>,
    AuthenticatedPlayer(id): AuthenticatedPlayer,
) -> Result<Json<UpgradeResponse>, ApiError> {
    let receipt = app.use_cases.upgrade_rod.execute(id).await?;
    Ok(Json(UpgradeResponse {
        player: PlayerView::from(&receipt.player),
        cost_paid: receipt.cost_paid,
    }))
}

async fn leaderboard(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let entries = app.use_cases.leaderboard.page(PAGE_SIZE).await?;
    Ok(Json(entries))
}

/// The caller's identity, read from the [`PLAYER_ID_HEADER`] header.
pub struct AuthenticatedPlayer(pub PlayerId);

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedPlayer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PLAYER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        let uuid = Uuid::parse_str(raw).map_err(|_| ApiError::Unauthorized)?;
        Ok(AuthenticatedPlayer(PlayerId::from_uuid(uuid)))
    }
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Game(GameError),
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        ApiError::Game(e)
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new(
                    ErrorCode::Unauthorized,
                    format!("Missing or invalid {PLAYER_ID_HEADER} header"),
                ),
            ),
            ApiError::Game(e) => game_error_response(e),
        };
        (status, Json(body)).into_response()
    }
}

fn game_error_response(e: GameError) -> (StatusCode, ErrorBody) {
    match e {
        GameError::PlayerNotFound(_) => (
            StatusCode::NOT_FOUND,
            ErrorBody::new(ErrorCode::PlayerNotFound, e.to_string()),
        ),
        GameError::InsufficientFunds { required, current } => (
            StatusCode::BAD_REQUEST,
            ErrorBody::insufficient_funds(required, current),
        ),
        GameError::MaxLevelReached { .. } => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new(ErrorCode::MaxLevel, e.to_string()),
        ),
        GameError::Conflict => (
            StatusCode::CONFLICT,
            ErrorBody::new(ErrorCode::UpgradeConflict, e.to_string()),
        ),
        GameError::Config(inner) => {
            tracing::error!(error = %inner, "Configuration error surfaced to API");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(ErrorCode::Internal, "Internal error"),
            )
        }
        GameError::Repo(inner) => {
            tracing::error!(error = %inner, "Storage error surfaced to API");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(ErrorCode::Internal, "Internal error"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftline_domain::{DomainError, RodLevel};

    #[test]
    fn test_insufficient_funds_maps_to_400_with_shortfall() {
        let (status, body) = game_error_response(GameError::InsufficientFunds {
            required: 25,
            current: 10,
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::InsufficientFunds);
        assert_eq!(body.details.expect("details")["shortfall"], 15);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let (status, body) = game_error_response(GameError::Conflict);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, ErrorCode::UpgradeConflict);
    }

    #[test]
    fn test_max_level_maps_to_400() {
        let (status, body) = game_error_response(GameError::MaxLevelReached {
            level: RodLevel::MAX,
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::MaxLevel);
    }

    #[test]
    fn test_config_error_hides_internals() {
        let (status, body) =
            game_error_response(GameError::Config(DomainError::configuration("bad table")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, ErrorCode::Internal);
        assert!(!body.message.contains("bad table"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, body) = game_error_response(GameError::PlayerNotFound(PlayerId::new()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, ErrorCode::PlayerNotFound);
    }
}
