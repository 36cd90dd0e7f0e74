/// Runtime knobs for the scrape pipeline, loaded from the environment.
///
/// Every field has a default; no env var is required to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Per-request timeout applied to every upstream call.
    pub request_timeout_secs: u64,
    /// `User-Agent` sent to storefronts.
    pub user_agent: String,
    /// Polite delay between consecutive requests within one method.
    pub inter_request_delay_ms: u64,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    /// Base delay for exponential retry backoff.
    pub retry_backoff_base_secs: u64,
    /// Products requested per page from paginated endpoints.
    pub page_size: u32,
    /// Hard cap on pages fetched per method.
    pub max_pages: u32,
    /// Default tracing filter, e.g. `"info"` or `"scex_scraper=debug"`.
    pub log_level: String,
}
