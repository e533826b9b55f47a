use lambda_http::http::StatusCode;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Every failure the handler can surface. The display text of the
/// downstream variants is passed through to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{}", common::METHOD_NOT_ALLOWED)]
    MethodNotAllowed,

    #[error("{}", common::GAME_ID_REQUIRED)]
    MissingId,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    ObjectStore(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            CatalogError::MissingId | CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::MalformedBody(_)
            | CatalogError::Database(_)
            | CatalogError::ObjectStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
