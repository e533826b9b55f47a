use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD};
use lambda_http::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Inbound request in the gateway's proxy-event shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

impl CatalogEvent {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Request body as text; an absent body reads as an empty JSON object.
    pub fn body_text(&self) -> Result<String, CatalogError> {
        let Some(body) = self.body.as_deref() else {
            return Ok("{}".to_string());
        };
        if !self.is_base64_encoded {
            return Ok(body.to_string());
        }
        let bytes = STANDARD
            .decode(body)
            .map_err(|e| CatalogError::Validation(format!("Invalid base64 body: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| CatalogError::Validation(format!("Body is not UTF-8: {}", e)))
    }

    /// Query parameter by name. An empty value counts as absent.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Outbound response in the gateway's proxy-result shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl CatalogResponse {
    pub fn preflight() -> Self {
        let mut headers = cors_headers();
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            ALLOWED_METHODS.to_string(),
        );
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            ALLOWED_HEADERS.to_string(),
        );
        Self {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body: String::new(),
        }
    }

    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        let mut headers = cors_headers();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let body = match serde_json::to_string(value) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to encode response body: {}", e);
                return Self::error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
            }
        };
        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        let mut headers = cors_headers();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        // ErrorBody holds a single string, so encoding cannot fail
        let body = serde_json::to_string(&common::ErrorBody::new(message)).unwrap_or_default();
        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl From<CatalogError> for CatalogResponse {
    fn from(err: CatalogError) -> Self {
        CatalogResponse::error(err.status_code(), &err.to_string())
    }
}

fn cors_headers() -> HashMap<String, String> {
    HashMap::from([("Access-Control-Allow-Origin".to_string(), "*".to_string())])
}
