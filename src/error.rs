use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Collection '{0}' not found")]
    CollectionNotFound(String),

    #[error("Document at '{0}' not found")]
    DocumentNotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl serde::Serialize for DbError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<toml::de::Error> for DbError {
    fn from(err: toml::de::Error) -> Self {
        DbError::ConfigError(err.to_string())
    }
}

impl DbError {
    /// Variant name, used as the `type` field of error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            DbError::CollectionNotFound(_) => "CollectionNotFound",
            DbError::DocumentNotFound(_) => "DocumentNotFound",
            DbError::BadRequest(_) => "BadRequest",
            DbError::InvalidData(_) => "InvalidData",
            DbError::ConfigError(_) => "ConfigError",
            DbError::IoError(_) => "IoError",
            DbError::JsonError(_) => "JsonError",
        }
    }
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        let status = match &self {
            DbError::CollectionNotFound(_) | DbError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            DbError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16(),
            "type": self.kind(),
        });

        (status, Json(body)).into_response()
    }
}
