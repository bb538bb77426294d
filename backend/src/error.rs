//! Error types for the ingestion pipeline.
//!
//! Nothing in here retries: configuration problems and upstream
//! failures are surfaced to the caller as-is, persistence failures
//! abort only the document being written.

/// Failure talking to the remote match API.
#[derive(Debug)]
pub enum ApiError {
    /// No credential was supplied for a call that needs one.
    MissingCredential,
    NotFound { path: String, body: String },
    Status { status: u16, body: String },
    Transport(reqwest::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingCredential => write!(f, "PUBG API key not configured"),
            ApiError::NotFound { path, .. } => write!(f, "PUBG API 404: {}", path),
            ApiError::Status { status, body } => write!(f, "PUBG API {}: {}", status, body),
            ApiError::Transport(e) => write!(f, "PUBG API transport: {}", e),
        }
    }
}

/// Failure writing to or reading from the match store.
#[derive(Debug)]
pub enum StorageError {
    Connection(diesel::ConnectionError),
    Query(diesel::result::Error),
    Payload(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Connection(e) => write!(f, "Connecting to database: {}", e),
            StorageError::Query(e) => write!(f, "Running query: {}", e),
            StorageError::Payload(e) => write!(f, "Encoding payload: {}", e),
        }
    }
}

impl From<diesel::ConnectionError> for StorageError {
    fn from(value: diesel::ConnectionError) -> Self {
        Self::Connection(value)
    }
}

impl From<diesel::result::Error> for StorageError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Query(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

/// Top-level failure of a live-data request.
#[derive(Debug)]
pub enum PipelineError {
    Configuration(String),
    Api(ApiError),
    Storage(StorageError),
}

impl PipelineError {
    pub fn configuration<IS>(message: IS) -> Self
    where
        IS: Into<String>,
    {
        Self::Configuration(message.into())
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Configuration(msg) => write!(f, "{}", msg),
            PipelineError::Api(e) => write!(f, "{}", e),
            PipelineError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl From<ApiError> for PipelineError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<StorageError> for PipelineError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl axum::response::IntoResponse for PipelineError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            PipelineError::Configuration(msg) => (
                axum::http::StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            PipelineError::Api(ApiError::MissingCredential) => (
                axum::http::StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": "PUBG API key not configured" }),
            ),
            PipelineError::Api(ApiError::NotFound { path, .. }) => (
                axum::http::StatusCode::NOT_FOUND,
                serde_json::json!({ "error": "Not found upstream", "details": path }),
            ),
            PipelineError::Api(e) => (
                axum::http::StatusCode::BAD_GATEWAY,
                serde_json::json!({ "error": "PUBG API error", "details": e.to_string() }),
            ),
            PipelineError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Storage failure" }),
                )
            }
        };
        (status, axum::Json(body)).into_response()
    }
}
