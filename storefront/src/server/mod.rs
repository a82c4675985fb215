use std::{future::Future, net::SocketAddr, pin::Pin};

mod options;
mod router;

use axum::Router;
pub use options::{ServerOptions, ServerOptionsFromEnvError};
pub use router::StorefrontRouter;

use crate::{Clock, Dispatcher, Renderer};

/// A server builder.
pub struct ServerBuilder {
    /// The TCP listener that the server is using.
    listener: tokio::net::TcpListener,

    /// The graceful shutdown signal.
    graceful_shutdown: Option<Pin<Box<dyn Future<Output = ()> + Send>>>,

    /// The options for the server.
    options: ServerOptions,
}

/// A storefront server, ready to serve a dispatcher.
pub struct Server {
    /// The TCP listener that the server is using.
    listener: tokio::net::TcpListener,

    /// The graceful shutdown signal.
    graceful_shutdown: Option<Pin<Box<dyn Future<Output = ()> + Send>>>,

    /// The options for the server.
    options: ServerOptions,
}

/// An error that can occur when acquiring the TCP listener of the server.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// An error occurred while trying to get a listener from `listenfd`.
    #[cfg(feature = "auto-reload")]
    #[error("failed to get a listener from `listenfd`: {0}")]
    ListenFd(std::io::Error),

    /// An error occurred while trying to bind to the listen address.
    #[error("failed to bind to `{addr}`: {err}")]
    Bind {
        /// The listen address.
        addr: String,

        /// The error that occurred.
        #[source]
        err: std::io::Error,
    },
}

/// An error that can occur when trying to serve the application.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// An error occurred while trying to serve the application.
    #[error("failed to serve the application: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred while trying to get the local address of the listener.
    #[error("failed to get the local address of the listener: {0}")]
    LocalAddr(std::io::Error),
}

impl ServerBuilder {
    /// Set the options on the server.
    pub fn with_options(mut self, options: ServerOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the graceful shutdown signal.
    pub fn with_graceful_shutdown(
        mut self,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Self {
        self.graceful_shutdown = Some(Box::pin(signal));
        self
    }

    /// Set the graceful shutdown signal to `ctrl-c`.
    pub fn with_ctrl_c_graceful_shutdown(self) -> Self {
        self.with_graceful_shutdown(async move {
            tracing::info!("Listening for `ctrl-c` signal for graceful shutdown...");

            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to register for `ctrl-c` signal: {err}");
            }

            tracing::info!("Received `ctrl-c` signal, shutting down gracefully.");
        })
    }

    /// Build the server.
    pub fn build(self) -> Server {
        Server {
            listener: self.listener,
            graceful_shutdown: self.graceful_shutdown,
            options: self.options,
        }
    }
}

impl Server {
    /// Get a builder for the server.
    pub fn builder(listener: tokio::net::TcpListener) -> ServerBuilder {
        ServerBuilder {
            listener,
            graceful_shutdown: None,
            options: Default::default(),
        }
    }

    /// Get a builder for a server listening on the address set in the options.
    ///
    /// With the `auto-reload` feature, a listener handed over by `listenfd` (as `systemfd` does)
    /// is used instead, so connections survive a rebuild.
    pub async fn bind(options: ServerOptions) -> Result<ServerBuilder, BindError> {
        #[cfg(feature = "auto-reload")]
        let listener = Self::take_listenfd_listener()?;

        #[cfg(not(feature = "auto-reload"))]
        let listener = None;

        let listener = match listener {
            Some(listener) => listener,
            None => tokio::net::TcpListener::bind(&options.listen_addr)
                .await
                .map_err(|err| BindError::Bind {
                    addr: options.listen_addr.clone(),
                    err,
                })?,
        };

        Ok(Self::builder(listener).with_options(options))
    }

    #[cfg(feature = "auto-reload")]
    fn take_listenfd_listener() -> Result<Option<tokio::net::TcpListener>, BindError> {
        tracing::debug!("Attempting to get listener from `listenfd`...");

        let Some(listener) = listenfd::ListenFd::from_env()
            .take_tcp_listener(0)
            .map_err(BindError::ListenFd)?
        else {
            tracing::debug!("Got no listener from `listenfd`, falling back to binding.");

            return Ok(None);
        };

        listener.set_nonblocking(true).map_err(BindError::ListenFd)?;

        tokio::net::TcpListener::from_std(listener)
            .map(Some)
            .map_err(BindError::ListenFd)
    }

    /// Serve the specified dispatcher.
    pub async fn serve<R, C>(self, dispatcher: Dispatcher<R, C>) -> Result<(), ServeError>
    where
        R: Renderer + 'static,
        C: Clock + 'static,
    {
        tracing::info!(
            "Dispatching {} routes over {} views.",
            dispatcher.routes().len(),
            crate::View::ALL.len()
        );

        for binding in dispatcher.routes().iter() {
            tracing::debug!("`{}` => `{}`", binding.pattern(), binding.view());
        }

        let router = StorefrontRouter::new(dispatcher, &self.options);

        self.serve_with_router(router).await
    }

    /// Serve the specified router.
    pub async fn serve_with_router(self, router: StorefrontRouter) -> Result<(), ServeError> {
        let local_addr = self.listener.local_addr().map_err(ServeError::LocalAddr)?;

        tracing::info!("Storefront server listening on TCP/{local_addr}.");

        let base_url = match self.options.base_url {
            Some(base_url) => base_url,
            None => Self::guess_base_url(local_addr),
        };

        tracing::info!("Now serving storefront at `{base_url}`...");

        let router: Router = router.into();
        let serve = axum::serve(self.listener, router);

        match self.graceful_shutdown {
            Some(signal) => serve.with_graceful_shutdown(signal).await,
            None => serve.await,
        }
        .map_err(Into::into)
    }

    /// Guess the base URL from the local address.
    fn guess_base_url(local_addr: SocketAddr) -> http::Uri {
        tracing::info!("No base URL set, guessing from local address `{local_addr}`...");

        let base_url = if local_addr.ip().is_unspecified() {
            tracing::warn!(
                "Local address is unspecified, using `localhost`... This is likely not what you want."
            );

            format!("http://localhost:{}", local_addr.port())
        } else {
            format!("http://{local_addr}")
        };

        base_url.parse().expect("hardcoded URL is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_base_url() {
        assert_eq!(
            Server::guess_base_url("127.0.0.1:5000".parse().unwrap()).to_string(),
            "http://127.0.0.1:5000/"
        );
        assert_eq!(
            Server::guess_base_url("0.0.0.0:8080".parse().unwrap()).to_string(),
            "http://localhost:8080/"
        );
        assert_eq!(
            Server::guess_base_url("[::1]:5000".parse().unwrap()).to_string(),
            "http://[::1]:5000/"
        );
    }
}
