use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use base64::{Engine, engine::general_purpose::STANDARD};
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

#[cfg(test)]
use mockall::automock;

const KEY_PREFIX: &str = "games";

/// Binary storage for uploaded cover images.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageStore: Debug + Send + Sync {
    /// Stores `body` under `key` and returns the object's public URL.
    async fn put_image(&self, key: &str, body: Vec<u8>, content_type: &str)
    -> CatalogResult<String>;
}

#[derive(Debug)]
pub struct S3ImageStore {
    client: Client,
    bucket: String,
    access_key_id: String,
    url_template: String,
}

impl S3ImageStore {
    pub fn new(client: Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            bucket: config.bucket_name.clone(),
            access_key_id: config.access_key_id.clone(),
            url_template: config.cdn_url_template.clone(),
        }
    }

    /// Builds a client for the configured S3-compatible endpoint using the
    /// static credentials from the configuration.
    pub async fn from_config(config: &CatalogConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "catalog-config",
        );
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(&config.object_store_endpoint)
            .region(Region::new(config.object_store_region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();
        Self::new(Client::from_conf(s3_config), config)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_image(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> CatalogResult<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| CatalogError::ObjectStore(DisplayErrorContext(e).to_string()))?;

        tracing::info!(bucket = %self.bucket, key, "Uploaded image");
        Ok(public_url(&self.url_template, &self.access_key_id, &self.bucket, key))
    }
}

/// Decodes the base64 payload that follows the comma of a data URL
/// such as `data:image/png;base64,iVBOR...`.
pub fn decode_data_url(data_url: &str) -> CatalogResult<Vec<u8>> {
    let (_, payload) = data_url
        .split_once(',')
        .ok_or_else(|| CatalogError::Validation("imageFile must be a data URL".to_string()))?;
    STANDARD
        .decode(payload.trim())
        .map_err(|e| CatalogError::Validation(format!("Invalid imageFile payload: {}", e)))
}

/// A fresh key under `games/`, unique per upload.
pub fn object_key(extension: &str) -> String {
    format!("{}/{}.{}", KEY_PREFIX, Uuid::new_v4(), extension)
}

pub fn public_url(template: &str, access_key_id: &str, bucket: &str, key: &str) -> String {
    template
        .replace("{access_key_id}", access_key_id)
        .replace("{bucket}", bucket)
        .replace("{key}", key)
}
