/// Default per-request timeout for upstream calls.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Location and credentials of the upstream data service.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL without a trailing slash, e.g. `http://data.internal:8080/v1`.
    pub base_url: String,
    /// Value sent in the `x-api-key` header. May be empty in development.
    pub api_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Load upstream configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `UPSTREAM_BASE_URL`     | **yes**  | --      |
    /// | `UPSTREAM_API_KEY`      | no       | empty   |
    /// | `UPSTREAM_TIMEOUT_SECS` | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `UPSTREAM_BASE_URL` is missing or not an absolute URL.
    pub fn from_env() -> Self {
        let base_url = std::env::var("UPSTREAM_BASE_URL")
            .expect("UPSTREAM_BASE_URL must be set in the environment");
        if let Err(e) = reqwest::Url::parse(&base_url) {
            panic!("UPSTREAM_BASE_URL '{base_url}' is not a valid URL: {e}");
        }

        let api_key = std::env::var("UPSTREAM_API_KEY").unwrap_or_default();

        let timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
        }
    }
}
