//! HTTP handlers for the `/bom` endpoint.
//!
//! Handlers stay thin: they validate the query, negotiate an encoding, and
//! delegate to the storage crate. Every fallible path goes through
//! [`ServerError`], which maps the storage and codec error taxonomy onto
//! HTTP status codes. Internal failures are logged with context and reach
//! the client as a generic 500 body.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use cyclonedx_bom_repo::errors::BomError;
use cyclonedx_bom_repo::models::bom::{Bom, UrnUuid};
use cyclonedx_bom_repo_storage::{MetadataService, Repository, RepositoryMetadata, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::AllowedMethods;
use crate::negotiation::{self, NegotiationError};

/// Shared state behind the router.
#[derive(Clone)]
pub struct AppState {
    /// The BOM store.
    pub repository: Repository,
    /// The long-lived metadata service owning retention GC.
    pub metadata: Arc<MetadataService>,
    /// Per-verb gating of /bom.
    pub allowed_methods: AllowedMethods,
}

/// Build the router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/bom", get(get_bom).post(post_bom).delete(delete_bom))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BomQuery {
    serial_number: Option<String>,
    version: Option<String>,
    original: Option<bool>,
}

async fn get_bom(
    State(state): State<AppState>,
    Query(query): Query<BomQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    if !state.allowed_methods.get {
        return Err(ServerError::MethodNotAllowed(state.allowed_methods));
    }

    let serial_number = required_serial_number(query.serial_number)?;
    let version = match parse_version(query.version)? {
        Some(version) => version,
        None => state
            .repository
            .latest_version(&serial_number)?
            .ok_or(ServerError::NotFound)?,
    };

    if query.original.unwrap_or(false) {
        let (original, format) = state.repository.retrieve_original(&serial_number, version)?;
        let document = Bom::parse_any(&original, format)
            .map_err(|error| ServerError::Internal(error.into()))?;
        let content_type = format!("{}; version={}", format.media_type(), document.spec_version);
        return Ok(([(header::CONTENT_TYPE, content_type)], original).into_response());
    }

    let encoding = negotiation::negotiate_accept(accept_header(&headers).as_deref())?;
    let mut bom = state.repository.retrieve(&serial_number, version)?;
    // The response document carries the version the entry is stored under,
    // which the original submission may have left absent.
    bom.version = Some(version);

    let mut body = Vec::new();
    bom.output(&mut body, encoding.format, encoding.version)
        .map_err(|error| ServerError::Internal(error.into()))?;

    debug!(
        serial_number = %serial_number,
        version,
        format = %encoding.format,
        spec_version = %encoding.version,
        "Serving a BOM."
    );
    Ok((
        [(
            header::CONTENT_TYPE,
            negotiation::response_content_type(&encoding),
        )],
        body,
    )
        .into_response())
}

async fn post_bom(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServerError> {
    if !state.allowed_methods.post {
        return Err(ServerError::MethodNotAllowed(state.allowed_methods));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ServerError::UnsupportedMediaType("the Content-Type header is required".to_string())
        })?;
    let encoding = negotiation::negotiate_content_type(content_type)?;

    let bom =
        Bom::parse(&body, encoding.format, encoding.version).map_err(ServerError::DecodeFailure)?;

    // Serial numbers inside documents are carried as-is by the codec, so
    // they are validated here; a submission without one gets a fresh urn.
    let serial_number = match &bom.serial_number {
        Some(serial_number) => UrnUuid::new(serial_number.to_string())
            .map_err(StorageError::InvalidSerialNumber)?,
        None => UrnUuid::generate(),
    };

    let entry = state
        .repository
        .store(&serial_number, bom.version, encoding.format, &body)?;
    state.metadata.observe_stored(&entry, encoding.version);

    let location = format!(
        "/bom?serialNumber={}&version={}",
        serial_number, entry.version
    );
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
    )
        .into_response())
}

async fn delete_bom(
    State(state): State<AppState>,
    Query(query): Query<BomQuery>,
) -> Result<Response, ServerError> {
    if !state.allowed_methods.delete {
        return Err(ServerError::MethodNotAllowed(state.allowed_methods));
    }

    let serial_number = required_serial_number(query.serial_number)?;
    match parse_version(query.version)? {
        Some(version) => state.repository.delete(&serial_number, version)?,
        // Deleting every version of an unknown serial stays a 204: the
        // operation is idempotent.
        None => state.repository.delete_all(&serial_number)?,
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn health(State(state): State<AppState>) -> Result<Json<RepositoryMetadata>, ServerError> {
    Ok(Json(state.metadata.snapshot()?))
}

fn required_serial_number(serial_number: Option<String>) -> Result<UrnUuid, ServerError> {
    let serial_number = serial_number.ok_or_else(|| {
        ServerError::InvalidSerialNumber("the serialNumber query parameter is required".to_string())
    })?;
    Ok(UrnUuid::new(serial_number).map_err(StorageError::InvalidSerialNumber)?)
}

fn parse_version(version: Option<String>) -> Result<Option<u32>, ServerError> {
    let Some(version) = version else {
        return Ok(None);
    };
    match version.parse::<u32>() {
        Ok(version) if version >= 1 => Ok(Some(version)),
        _ => Err(ServerError::InvalidVersion(version)),
    }
}

fn accept_header(headers: &HeaderMap) -> Option<String> {
    let entries: Vec<&str> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(entries.join(", "))
    }
}

/// Everything a handler can fail with, mapped onto HTTP statuses.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid serial number: {0}")]
    InvalidSerialNumber(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Failed to decode the document: {0}")]
    DecodeFailure(#[source] BomError),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("None of the accepted media types are supported")]
    NotAcceptable,

    #[error("The requested BOM was not found")]
    NotFound,

    #[error("BOM {serial_number} version {version} already exists")]
    AlreadyExists { serial_number: String, version: u32 },

    #[error("Method not allowed")]
    MethodNotAllowed(AllowedMethods),

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<StorageError> for ServerError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { .. } => Self::NotFound,
            StorageError::AlreadyExists {
                serial_number,
                version,
            } => Self::AlreadyExists {
                serial_number,
                version,
            },
            StorageError::InvalidSerialNumber(error) => Self::InvalidSerialNumber(error.to_string()),
            StorageError::InvalidVersion(message) => Self::InvalidVersion(message),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<NegotiationError> for ServerError {
    fn from(error: NegotiationError) -> Self {
        match error {
            NegotiationError::UnsupportedMediaType(media_type) => {
                Self::UnsupportedMediaType(media_type)
            }
            NegotiationError::NotAcceptable => Self::NotAcceptable,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::MethodNotAllowed(allowed_methods) => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, allowed_methods.allow_header())],
                Json(ErrorBody {
                    error: "Method not allowed".to_string(),
                }),
            )
                .into_response(),
            ServerError::Internal(error) => {
                error!(error = ?error, "Request failed with an internal error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            other => {
                let status = match &other {
                    ServerError::InvalidSerialNumber(_)
                    | ServerError::InvalidVersion(_)
                    | ServerError::DecodeFailure(_) => StatusCode::BAD_REQUEST,
                    ServerError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    ServerError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
                    ServerError::NotFound => StatusCode::NOT_FOUND,
                    ServerError::AlreadyExists { .. } => StatusCode::CONFLICT,
                    ServerError::MethodNotAllowed(_) | ServerError::Internal(_) => {
                        unreachable!("handled above")
                    }
                };
                (
                    status,
                    Json(ErrorBody {
                        error: other.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
