//! Client configuration.
//!
//! Defaults target a local GufoRAG server; everything can be overridden
//! with builder-style setters, environment variables, or CLI flags.

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default server-side pipeline configuration name.
pub const DEFAULT_CONFIG_NAME: &str = "default";

/// Default demo question.
pub const DEFAULT_QUESTION: &str = "What is artificial intelligence?";

/// Configuration for one demo run.
///
/// # Example
///
/// ```
/// use gufo::config::GufoConfig;
///
/// let config = GufoConfig::default()
///     .with_base_url("https://rag.example.test")
///     .with_accept_invalid_certs(true);
/// assert_eq!(config.base_url, "https://rag.example.test");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GufoConfig {
    /// API base URL.
    pub base_url: String,
    /// Pipeline configuration name sent with every chat request.
    pub config_name: String,
    /// Optional user id attached to chat requests.
    pub user_id: Option<String>,
    /// The question the demo asks.
    pub question: String,
    /// Skip TLS certificate validation (self-signed test servers).
    pub accept_invalid_certs: bool,
}

impl Default for GufoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            user_id: None,
            question: DEFAULT_QUESTION.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl GufoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_config_name(mut self, config_name: impl Into<String>) -> Self {
        self.config_name = config_name.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Read overrides from the environment.
    ///
    /// `GUFORAG_URL`, `GUFORAG_CONFIG`, `GUFORAG_USER`; `GUFORAG_INSECURE=1`
    /// disables certificate validation.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("GUFORAG_URL") {
            config.base_url = url;
        }
        if let Ok(name) = std::env::var("GUFORAG_CONFIG") {
            config.config_name = name;
        }
        if let Ok(user) = std::env::var("GUFORAG_USER") {
            config.user_id = Some(user);
        }
        if std::env::var("GUFORAG_INSECURE").map(|v| v == "1").unwrap_or(false) {
            config.accept_invalid_certs = true;
        }
        config
    }
}
