//! Request dispatching.
//!
//! The [`Dispatcher`] resolves a request path against the route table, builds the render context
//! and hands both to the renderer. Failures are reported as [`DispatchError`]s, which
//! [`Dispatcher::recover`] turns into the matching error view.

use http::StatusCode;
use tracing::{debug, error};

use crate::{Clock, Context, ContextInjector, Renderer, RouteTable, SystemClock, View};

/// A rendered view, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    /// The response status.
    pub status: StatusCode,

    /// The view that was rendered.
    pub view: View,

    /// The rendered body.
    pub body: String,
}

/// An error that can occur while dispatching a request.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No route matches the request path.
    #[error("no route matches `{path}`")]
    RouteNotFound {
        /// The request path.
        path: String,
    },

    /// The renderer failed to render the matched view.
    #[error("failed to render view `{view}`: {source}")]
    RenderFailure {
        /// The matched view.
        view: View,

        /// The renderer error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DispatchError {
    /// The status code of the response this error translates to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::RenderFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Dispatches request paths to views.
///
/// The dispatcher holds no mutable state: dispatching the same path twice, within the same year,
/// yields the same response.
#[derive(Debug)]
pub struct Dispatcher<R, C = SystemClock> {
    routes: RouteTable,
    renderer: R,
    injector: ContextInjector<C>,
}

impl<R: Renderer> Dispatcher<R> {
    /// Create a new dispatcher using the system clock.
    pub fn new(routes: RouteTable, renderer: R) -> Self {
        Self::with_clock(routes, renderer, SystemClock)
    }
}

impl<R: Renderer, C: Clock> Dispatcher<R, C> {
    /// Create a new dispatcher reading the time from the specified clock.
    pub fn with_clock(routes: RouteTable, renderer: R, clock: C) -> Self {
        Self {
            routes,
            renderer,
            injector: ContextInjector::new(clock),
        }
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Dispatch a request path.
    ///
    /// The render context holds the global context, overridden by the static context of the
    /// matched route, overridden by the extracted path parameters.
    pub fn dispatch(&self, path: &str) -> Result<RenderedResponse, DispatchError> {
        let route = self
            .routes
            .match_path(path)
            .ok_or_else(|| DispatchError::RouteNotFound {
                path: path.to_string(),
            })?;

        let view = route.binding.view();
        let context = self.injector.global_context().merge(&route.context());

        let body = self
            .renderer
            .render(view, &context)
            .map_err(|err| DispatchError::RenderFailure {
                view,
                source: Box::new(err),
            })?;

        Ok(RenderedResponse {
            status: StatusCode::OK,
            view,
            body,
        })
    }

    /// Dispatch a request path, translating errors into their error views.
    pub fn handle(&self, path: &str) -> RenderedResponse {
        self.dispatch(path).unwrap_or_else(|err| self.recover(&err))
    }

    /// Render the error view matching a dispatch error.
    pub fn recover(&self, err: &DispatchError) -> RenderedResponse {
        match err {
            DispatchError::RouteNotFound { .. } => {
                debug!("{err}.");

                self.not_found()
            }
            DispatchError::RenderFailure { .. } => {
                error!("{err}");

                self.internal_error()
            }
        }
    }

    /// Render the not-found view.
    pub fn not_found(&self) -> RenderedResponse {
        self.render_error_view(View::NotFound, StatusCode::NOT_FOUND)
    }

    /// Render the internal-error view.
    pub fn internal_error(&self) -> RenderedResponse {
        self.render_error_view(View::InternalError, StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn render_error_view(&self, view: View, status: StatusCode) -> RenderedResponse {
        let context = self
            .injector
            .global_context()
            .merge(&Context::titled(view.title()));

        // Error views are terminal: if they fail too, fall back to plain text.
        let body = self.renderer.render(view, &context).unwrap_or_else(|err| {
            error!("Failed to render error view `{view}`: {err}");

            status.to_string()
        });

        RenderedResponse { status, view, body }
    }
}
