//! HTTP API response DTOs

use serde::{Deserialize, Serialize};

use crate::usecase::HubStats;

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthDto {
    pub status: String,
    pub open_connections: usize,
    pub named_connections: usize,
}

impl From<HubStats> for HealthDto {
    fn from(stats: HubStats) -> Self {
        Self {
            status: "ok".to_string(),
            open_connections: stats.open_connections,
            named_connections: stats.named_connections,
        }
    }
}
