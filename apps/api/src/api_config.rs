//! Environment-backed configuration for the API process.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use unlockery_core::AppError;
use unlockery_infrastructure::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, GeminiConfig};
use url::Url;

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface the listener binds to.
    pub api_host: String,
    /// Port the listener binds to.
    pub api_port: u16,
    /// Origin allowed by the CORS layer.
    pub frontend_url: String,
    /// Directory the browser UI is served from.
    pub static_assets_dir: PathBuf,
    /// Upstream generation endpoint settings.
    pub gemini: GeminiConfig,
}

impl ApiConfig {
    /// Loads configuration from the process environment.
    ///
    /// A missing `GEMINI_API_KEY` is not a startup error; the generator
    /// surfaces it per request so the process still boots and serves the UI.
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| format!("http://localhost:{api_port}"));
        let static_assets_dir = env::var("STATIC_ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("apps/api/static"));

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let endpoint_raw = env::var("GEMINI_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_GEMINI_ENDPOINT.to_owned());
        let endpoint = Url::parse(&endpoint_raw).map_err(|error| {
            AppError::Validation(format!(
                "invalid GEMINI_API_ENDPOINT '{endpoint_raw}': {error}"
            ))
        })?;
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_owned());

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            static_assets_dir,
            gemini: GeminiConfig {
                api_key,
                endpoint,
                model,
            },
        })
    }

    /// Resolves the configured bind address.
    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

/// Initializes the global tracing subscriber.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
