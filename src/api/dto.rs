//! REST API request/response data transfer objects

use serde::Serialize;

/// Service identity
#[derive(Debug, Serialize)]
pub struct NameResponse {
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IpResponse {
    pub ip: String,
}

/// Add / delete confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchDto {
    pub name: String,
    pub confidence: f64,
}

/// Recognize response
#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub best_match: MatchDto,
    pub all_matches: Vec<MatchDto>,
}

#[derive(Debug, Serialize)]
pub struct NameCountDto {
    pub name: String,
    pub count: usize,
}

/// List faces response
#[derive(Debug, Serialize)]
pub struct ListFacesResponse {
    pub faces: Vec<NameCountDto>,
    pub total: usize,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    pub total_faces: usize,
    pub uptime_seconds: u64,
}

/// Error response. Validation errors carry only the message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            code: Some(code.to_string()),
        }
    }

    pub fn message(error: &str) -> Self {
        Self {
            error: error.to_string(),
            code: None,
        }
    }
}

/// Not-found response
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}
