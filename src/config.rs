//! Endpoint and credential configuration.
//!
//! The environment is captured once into an [`EnvConfig`] by the CLI layer;
//! library code only ever sees the resulting [`Config`].

use std::collections::HashMap;

/// Default GitLab web endpoint
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Path of the REST API below the web endpoint
pub const API_SUFFIX: &str = "/api/v4";

/// Environment variable overriding the API endpoint
pub const ENV_GITLAB_API: &str = "GITLAB_API";

/// Environment variable holding the private token
pub const ENV_GITLAB_TOKEN: &str = "GITLAB_TOKEN";

/// Snapshot of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Capture the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable, treating empty values as unset
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Resolved GitLab endpoints and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Web endpoint used to build asset URLs
    pub web_url: String,
    /// REST API endpoint
    pub api_url: String,
    /// Private token, if any
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_url: DEFAULT_GITLAB_URL.to_string(),
            api_url: format!("{DEFAULT_GITLAB_URL}{API_SUFFIX}"),
            token: None,
        }
    }
}

impl Config {
    /// Build configuration from an environment snapshot
    ///
    /// `GITLAB_API` replaces the API endpoint. When it ends in `/api/v4`
    /// the web endpoint follows it, otherwise gitlab.com is assumed.
    pub fn from_env(env: &EnvConfig) -> Self {
        let mut config = Self {
            token: env.get(ENV_GITLAB_TOKEN),
            ..Self::default()
        };

        if let Some(api) = env.get(ENV_GITLAB_API) {
            let api = api.trim_end_matches('/').to_string();
            if let Some(web) = api.strip_suffix(API_SUFFIX)
                && !web.is_empty()
            {
                config.web_url = web.to_string();
            }
            config.api_url = api;
        }

        config
    }

    /// Web endpoint without a trailing slash
    pub fn web_base(&self) -> &str {
        self.web_url.trim_end_matches('/')
    }
}
