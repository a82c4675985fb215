use std::{any::Any, sync::Arc};

use axum::{Router, extract::State, response::IntoResponse};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tracing::{debug, error};

use crate::{
    Clock, Dispatcher, RenderedResponse, Renderer,
    caching::{Cache, CachingResponseExt, html_response},
};

use super::ServerOptions;

/// The methods a routed path answers to.
const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// A router that sends every request to a dispatcher.
#[derive(Debug, Clone, Default)]
pub struct StorefrontRouter(Router);

struct RouterState<R, C> {
    dispatcher: Dispatcher<R, C>,
    cache: Cache,
}

impl StorefrontRouter {
    /// Create a new router from a dispatcher.
    ///
    /// Every request path is resolved by the dispatcher, except for `/static` when a static
    /// directory is configured. A panic while handling a request renders the internal-error view.
    pub fn new<R, C>(dispatcher: Dispatcher<R, C>, options: &ServerOptions) -> Self
    where
        R: Renderer + 'static,
        C: Clock + 'static,
    {
        let state = Arc::new(RouterState {
            dispatcher,
            cache: Cache::default().with_cache_duration(options.cache_duration),
        });

        let mut router = Router::new();

        if let Some(static_dir) = &options.static_dir {
            debug!("Serving static assets from `{}`.", static_dir.display());

            router = router.nest_service("/static", ServeDir::new(static_dir));
        }

        let panic_state = state.clone();

        let router = router
            .fallback(dispatch_request::<R, C>)
            .with_state(state)
            .layer(CatchPanicLayer::custom(
                move |panic: Box<dyn Any + Send + 'static>| {
                    error!("Request handler panicked: {}", panic_message(&*panic));

                    error_response(panic_state.dispatcher.internal_error())
                },
            ))
            .layer(TraceLayer::new_for_http());

        Self(router)
    }
}

impl From<StorefrontRouter> for Router {
    fn from(router: StorefrontRouter) -> Self {
        router.0
    }
}

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> axum::response::Response {
        html_response(self.status, self.body)
    }
}

async fn dispatch_request<R, C>(
    State(state): State<Arc<RouterState<R, C>>>,
    method: http::Method,
    uri: http::Uri,
    headers: http::HeaderMap,
) -> axum::response::Response
where
    R: Renderer + 'static,
    C: Clock + 'static,
{
    let path = uri.path();

    if method != http::Method::GET && method != http::Method::HEAD {
        if state.dispatcher.routes().match_path(path).is_none() {
            return error_response(state.dispatcher.not_found());
        }

        let status = if method == http::Method::OPTIONS {
            http::StatusCode::OK
        } else {
            debug!("Method `{method}` is not allowed on `{path}`.");

            http::StatusCode::METHOD_NOT_ALLOWED
        };

        let mut response = status.into_response();
        response.headers_mut().insert(
            http::header::ALLOW,
            http::HeaderValue::from_static(ALLOWED_METHODS),
        );

        return response;
    }

    match state.dispatcher.dispatch(path) {
        Ok(rendered) => {
            let cache_control = state.cache.get_cache_control(&headers);

            state
                .cache
                .check_cache_control(cache_control, rendered.body)
                .unwrap_or_else(|response| response)
        }
        Err(err) => error_response(state.dispatcher.recover(&err)),
    }
}

/// Error views are never cached.
fn error_response(rendered: RenderedResponse) -> axum::response::Response {
    rendered.into_response().with_caching_disabled()
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload")
}
