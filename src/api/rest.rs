//! Axum REST API handlers

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post, delete},
    extract::{Path, State, Multipart, DefaultBodyLimit},
    response::Json,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::engine::EmbeddingProvider;
use crate::service::{FaceService, Match};
use crate::storage::FaceStore;
use crate::utils::net::local_ip;

use super::dto::*;
use super::error::ApiError;

pub const SERVICE_NAME: &str = "MUF";

/// Application state shared across handlers
pub struct AppState<S: FaceStore, P: EmbeddingProvider> {
    pub service: Arc<FaceService<S, P>>,
    pub legacy_status_codes: bool,
    pub probe_addr: String,
    pub max_upload_bytes: usize,
    pub start_time: Instant,
}

impl<S: FaceStore, P: EmbeddingProvider> AppState<S, P> {
    pub fn new(service: Arc<FaceService<S, P>>, config: &Config) -> Arc<Self> {
        Arc::new(Self {
            service,
            legacy_status_codes: config.server.legacy_status_codes,
            probe_addr: config.network.probe_addr.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
            start_time: Instant::now(),
        })
    }
}

/// Create the REST API router
pub fn create_rest_router<S: FaceStore, P: EmbeddingProvider>(state: Arc<AppState<S, P>>) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(root_handler))
        .route("/ip", get(ip_handler::<S, P>))
        // Face operations
        .route("/add_face", post(add_face_handler::<S, P>))
        .route("/delete_face/:name", delete(delete_face_handler::<S, P>))
        .route("/recognize_face", post(recognize_face_handler::<S, P>))
        .route("/faces", get(list_faces_handler::<S, P>))
        // System endpoints
        .route("/health", get(health_handler::<S, P>))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Parts of an upload form
#[derive(Default)]
struct Upload {
    image: Option<Vec<u8>>,
    name: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut upload = Upload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(&e.to_string(), "MULTIPART_ERROR"))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" | "image" => {
                upload.image = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(&e.to_string(), "READ_ERROR"))?
                        .to_vec(),
                );
            }
            "name" => {
                upload.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(&e.to_string(), "READ_ERROR"))?,
                );
            }
            _ => {}
        }
    }

    Ok(upload)
}

fn match_dto(m: Match) -> MatchDto {
    MatchDto {
        name: m.name,
        confidence: m.confidence,
    }
}

/// Service identity
async fn root_handler() -> Json<NameResponse> {
    Json(NameResponse { name: SERVICE_NAME })
}

/// Outbound interface address of this host
async fn ip_handler<S: FaceStore, P: EmbeddingProvider>(
    State(state): State<Arc<AppState<S, P>>>,
) -> Json<IpResponse> {
    let ip = local_ip(&state.probe_addr).await;
    Json(IpResponse { ip: ip.to_string() })
}

/// Register a face
async fn add_face_handler<S: FaceStore, P: EmbeddingProvider>(
    State(state): State<Arc<AppState<S, P>>>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let upload = read_upload(multipart).await?;

    let image_data = upload
        .image
        .ok_or_else(|| ApiError::bad_request("Missing file field", "MISSING_IMAGE"))?;
    let name = upload
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing name field", "MISSING_NAME"))?;

    let result = state
        .service
        .add_face(&image_data, &name)
        .await
        .map_err(|e| ApiError::from_face_error(e, state.legacy_status_codes))?;

    Ok(Json(MessageResponse {
        message: format!("Successfully added face for {}", result.name),
    }))
}

/// Delete every face registered under a name
async fn delete_face_handler<S: FaceStore, P: EmbeddingProvider>(
    State(state): State<Arc<AppState<S, P>>>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = state
        .service
        .delete_face(&name)
        .await
        .map_err(|e| ApiError::from_face_error(e, state.legacy_status_codes))?;

    Ok(Json(MessageResponse {
        message: format!("Successfully deleted {} face(s) for {}", result.deleted, result.name),
    }))
}

/// Identify the first face in an image
async fn recognize_face_handler<S: FaceStore, P: EmbeddingProvider>(
    State(state): State<Arc<AppState<S, P>>>,
    multipart: Multipart,
) -> Result<Json<RecognizeResponse>, ApiError> {
    let upload = read_upload(multipart).await?;

    let image_data = upload
        .image
        .ok_or_else(|| ApiError::bad_request("Missing file field", "MISSING_IMAGE"))?;

    let result = state
        .service
        .recognize_face(&image_data)
        .await
        .map_err(|e| ApiError::from_face_error(e, state.legacy_status_codes))?;

    Ok(Json(RecognizeResponse {
        best_match: match_dto(result.best_match),
        all_matches: result.all_matches.into_iter().map(match_dto).collect(),
    }))
}

/// Registered names with record counts
async fn list_faces_handler<S: FaceStore, P: EmbeddingProvider>(
    State(state): State<Arc<AppState<S, P>>>,
) -> Result<Json<ListFacesResponse>, ApiError> {
    let names = state
        .service
        .list_names()
        .await
        .map_err(|e| ApiError::from_face_error(e, state.legacy_status_codes))?;

    let total = names.iter().map(|n| n.count).sum();
    let faces = names
        .into_iter()
        .map(|n| NameCountDto {
            name: n.name,
            count: n.count,
        })
        .collect();

    Ok(Json(ListFacesResponse { faces, total }))
}

/// Health check
async fn health_handler<S: FaceStore, P: EmbeddingProvider>(
    State(state): State<Arc<AppState<S, P>>>,
) -> Json<HealthResponse> {
    let health = state.service.health().await;

    Json(HealthResponse {
        healthy: health.healthy,
        version: health.version,
        total_faces: health.total_faces,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
