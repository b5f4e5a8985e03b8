use serde::Deserialize;

use larder_auth_types::token::DEFAULT_ACCESS_TOKEN_TTL;
use larder_core::config::Config;

/// Recipes service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000). Env var: `RECIPES_PORT`.
    #[serde(default = "default_port")]
    pub recipes_port: u16,
    /// Directory holding uploaded media (default `media`).
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// URL prefix media is served under (default `/media/`).
    #[serde(default = "default_media_url")]
    pub media_url: String,
    /// Access token lifetime in seconds (default 7 days).
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_secs: u64,
}

impl Config for RecipesConfig {}

fn default_port() -> u16 {
    8000
}

fn default_media_root() -> String {
    "media".to_owned()
}

fn default_media_url() -> String {
    "/media/".to_owned()
}

fn default_access_token_ttl() -> u64 {
    DEFAULT_ACCESS_TOKEN_TTL
}

impl RecipesConfig {
    /// `media_url` with exactly one trailing slash.
    pub fn media_url_prefix(&self) -> String {
        format!("{}/", self.media_url.trim_end_matches('/'))
    }
}
