use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// API key used for the geocoding, place search/detail, photo, and
    /// image-label services.
    pub google_api_key: String,
    pub log_level: String,
    /// Known-accounts roster CSV. A missing file is not an error.
    pub accounts_path: PathBuf,
    /// Postal-code universe CSV. A missing file disables all-areas search.
    pub zips_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure for transient errors.
    /// 0 means every failure is a one-shot skip.
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub photo_max_width: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_api_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("accounts_path", &self.accounts_path)
            .field("zips_path", &self.zips_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("photo_max_width", &self.photo_max_width)
            .finish()
    }
}
