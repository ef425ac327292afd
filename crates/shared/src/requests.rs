//! HTTP request bodies (Player → Engine).

use serde::{Deserialize, Serialize};

use driftline_domain::CastQuality;

/// Body of `POST /api/game/fish`.
///
/// The quality tier comes from the client timing minigame; a client without
/// the minigame may omit it and gets no odds bonus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishRequest {
    #[serde(default)]
    pub quality: Option<CastQuality>,
}

impl FishRequest {
    pub fn quality_or_default(&self) -> CastQuality {
        self.quality.unwrap_or_default()
    }
}
