use std::fmt;

/// Address of the production key service, used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://keys.sylabs.io";

/// Client configuration. `Config::default()` targets the production key
/// service with no authentication and no user agent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the service; `http`, `https`, `hkp` and `hkps` are accepted.
    pub base_url: Option<String>,
    /// Sent as `Authorization: BEARER <token>` on every request.
    pub auth_token: Option<String>,
    /// Sent as `User-Agent` on every request.
    pub user_agent: Option<String>,
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub(super) fn base_url_or_default(&self) -> &str {
        non_empty(&self.base_url).unwrap_or(DEFAULT_BASE_URL)
    }

    pub(super) fn auth_token(&self) -> Option<&str> {
        non_empty(&self.auth_token)
    }

    pub(super) fn user_agent(&self) -> Option<&str> {
        non_empty(&self.user_agent)
    }
}

// Empty strings count as unset.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
