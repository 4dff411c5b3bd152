use tracing::warn;

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";
pub const DEFAULT_CLOUD_ENVIRONMENT: &str = "AzureUSGovernment";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Runtime settings, resolved from the environment once at startup.
///
/// The upstream endpoint and API key are optional: without both, the service
/// still starts and serves every route except `/api/chat`, which reports the
/// missing configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub deployment: String,
    pub cloud_environment: String,
    pub port: u16,
    pub upstream_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Self {
        let endpoint = read_env("AZURE_OPENAI_ENDPOINT");
        let api_key = read_env("AZURE_OPENAI_API_KEY");

        if endpoint.is_some() && api_key.is_none() {
            warn!("AZURE_OPENAI_ENDPOINT is set but AZURE_OPENAI_API_KEY is not; chat stays disabled");
        }

        Self {
            endpoint,
            api_key,
            deployment: read_env("AZURE_OPENAI_DEPLOYMENT_NAME")
                .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
            cloud_environment: read_env("AZURE_CLOUD_ENVIRONMENT")
                .unwrap_or_else(|| DEFAULT_CLOUD_ENVIRONMENT.to_string()),
            port: read_env("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }

    /// True when both the endpoint and the credential are present.
    pub fn upstream_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            cloud_environment: DEFAULT_CLOUD_ENVIRONMENT.to_string(),
            port: DEFAULT_PORT,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
