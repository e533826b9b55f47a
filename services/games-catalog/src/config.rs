use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;

const ENV_KEYS: [&str; 8] = [
    "DATABASE_URL",
    "OBJECT_STORE_ENDPOINT",
    "OBJECT_STORE_REGION",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "BUCKET_NAME",
    "CDN_URL_TEMPLATE",
    "LISTEN_ADDR",
];

/// Handler configuration, read once at start-up and passed in explicitly.
#[derive(Clone, Deserialize)]
pub struct CatalogConfig {
    pub database_url: String,
    #[serde(default = "default_endpoint")]
    pub object_store_endpoint: String,
    #[serde(default = "default_region")]
    pub object_store_region: String,
    #[serde(rename = "aws_access_key_id")]
    pub access_key_id: String,
    #[serde(rename = "aws_secret_access_key")]
    pub secret_access_key: String,
    #[serde(default = "default_bucket")]
    pub bucket_name: String,
    /// Public URL of an uploaded object. Supports `{access_key_id}`,
    /// `{bucket}` and `{key}` placeholders.
    #[serde(default = "default_cdn_template")]
    pub cdn_url_template: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_endpoint() -> String {
    "https://bucket.poehali.dev".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "files".to_string()
}

fn default_cdn_template() -> String {
    "https://cdn.poehali.dev/projects/{access_key_id}/bucket/{key}".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl CatalogConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, figment::Error> {
        dotenv::dotenv().ok();
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new().merge(Env::raw().only(&ENV_KEYS))
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("object_store_endpoint", &self.object_store_endpoint)
            .field("object_store_region", &self.object_store_region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("bucket_name", &self.bucket_name)
            .field("cdn_url_template", &self.cdn_url_template)
            .field("listen_addr", &self.listen_addr)
            .finish_non_exhaustive()
    }
}
