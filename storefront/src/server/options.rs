//! Server options.

use std::path::PathBuf;

/// The options for the server.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// The address to listen on.
    ///
    /// Read from `STOREFRONT_LISTEN_ADDR` when calling `ServerOptions::from_env`.
    pub listen_addr: String,

    /// The base HTTP URL of the server.
    ///
    /// Informational only: it is logged at startup so operators know where the storefront is
    /// reachable, and no response embeds it. If the server is running behind a reverse proxy, this
    /// should be set to the base URL of the proxy.
    ///
    /// If no base URL is set, the server will attempt to determine the base URL from its own TCP
    /// listener address.
    ///
    /// If `STOREFRONT_BASE_URL` is set in the environment, it will be read and used as the base URL
    /// when calling `ServerOptions::from_env`.
    pub base_url: Option<http::Uri>,

    /// The directory served under `/static`, if any.
    pub static_dir: Option<PathBuf>,

    /// How long clients may reuse a rendered page before revalidating it.
    pub cache_duration: std::time::Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            listen_addr: Self::DEFAULT_LISTEN_ADDR.to_string(),
            base_url: None,
            static_dir: None,
            cache_duration: crate::caching::DEFAULT_CACHE_DURATION,
        }
    }
}

/// An error that can occur when trying to get the server options from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ServerOptionsFromEnvError {
    /// An environment variable was not unicode.
    #[error("environment variable {name} was not unicode")]
    NotUnicode {
        /// The name of the environment variable.
        name: &'static str,
    },

    /// An error occurred while trying to get the base URL from the environment.
    #[error("failed to parse the base URL from environment variable {name} (was `{url}`): {err}")]
    BaseUrl {
        /// The name of the environment variable.
        name: &'static str,

        /// The URL that was attempted to be parsed.
        url: String,

        /// The error that occurred.
        #[source]
        err: http::uri::InvalidUri,
    },

    /// The cache duration is not a number of seconds.
    #[error(
        "failed to parse the cache duration from environment variable {name} (was `{value}`): {err}"
    )]
    CacheDuration {
        /// The name of the environment variable.
        name: &'static str,

        /// The value that was attempted to be parsed.
        value: String,

        /// The error that occurred.
        #[source]
        err: std::num::ParseIntError,
    },
}

impl ServerOptions {
    /// The default listen address.
    pub const DEFAULT_LISTEN_ADDR: &'static str = "127.0.0.1:5000";

    /// The environment variable name for the listen address.
    pub const STOREFRONT_LISTEN_ADDR: &'static str = "STOREFRONT_LISTEN_ADDR";

    /// The environment variable name for the base URL.
    pub const STOREFRONT_BASE_URL: &'static str = "STOREFRONT_BASE_URL";

    /// The environment variable name for the static assets directory.
    pub const STOREFRONT_STATIC_DIR: &'static str = "STOREFRONT_STATIC_DIR";

    /// The environment variable name for the cache duration, in seconds.
    pub const STOREFRONT_CACHE_MAX_AGE: &'static str = "STOREFRONT_CACHE_MAX_AGE";

    fn env_var(name: &'static str) -> Result<Option<String>, ServerOptionsFromEnvError> {
        match std::env::var(name) {
            Ok(value) => Ok(if value.is_empty() { None } else { Some(value) }),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => {
                Err(ServerOptionsFromEnvError::NotUnicode { name })
            }
        }
    }

    /// Get the server options from the environment.
    pub fn from_env() -> Result<Self, ServerOptionsFromEnvError> {
        tracing::info!("Reading storefront server options from the environment...");

        Self::from_lookup(Self::env_var)
    }

    /// Get the server options from an arbitrary variable lookup.
    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<Option<String>, ServerOptionsFromEnvError>,
    ) -> Result<Self, ServerOptionsFromEnvError> {
        let defaults = Self::default();

        let listen_addr = lookup(Self::STOREFRONT_LISTEN_ADDR)?.unwrap_or(defaults.listen_addr);

        let base_url = lookup(Self::STOREFRONT_BASE_URL)?
            .map(|url| {
                url.parse()
                    .map_err(|err| ServerOptionsFromEnvError::BaseUrl {
                        name: Self::STOREFRONT_BASE_URL,
                        url: url.clone(),
                        err,
                    })
            })
            .transpose()?;

        match &base_url {
            Some(base_url) => {
                tracing::info!(
                    "{} was set: using `{base_url}` as the base URL.",
                    Self::STOREFRONT_BASE_URL
                );
            }
            None => {
                tracing::warn!(
                    "{} was not set: base URL will be determined from the TCP listener address. This may not be what you want.",
                    Self::STOREFRONT_BASE_URL
                );
            }
        };

        let static_dir = lookup(Self::STOREFRONT_STATIC_DIR)?.map(PathBuf::from);

        let cache_duration = lookup(Self::STOREFRONT_CACHE_MAX_AGE)?
            .map(|value| {
                value
                    .parse()
                    .map(std::time::Duration::from_secs)
                    .map_err(|err| ServerOptionsFromEnvError::CacheDuration {
                        name: Self::STOREFRONT_CACHE_MAX_AGE,
                        value: value.clone(),
                        err,
                    })
            })
            .transpose()?
            .unwrap_or(defaults.cache_duration);

        Ok(Self {
            listen_addr,
            base_url,
            static_dir,
            cache_duration,
        })
    }
}
