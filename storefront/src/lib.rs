//! Storefront
//!
//! Route table and view dispatch for the marketplace website: the public storefront, the
//! PROFITFLUENCE influencer marketplace, the affiliate program and the administration panel.
//!
//! A request path is matched against an immutable [`RouteTable`], the matched view is rendered by
//! a [`Renderer`] with a [`Context`] holding the global values (the current year), the route's
//! static values and the extracted path parameters. Unmatched paths render the not-found view and
//! render failures the internal-error view.
//!
//! # Features
//!
//! - `templating`: Render views with the askama templates compiled into the crate. **Enabled by
//!   default.**
//! - `auto-reload`: Take the TCP listener from `listenfd` when available, so the server can be
//!   restarted without dropping connections. Useful for development. **Not enabled by default.**

pub mod caching;
pub mod context;
pub mod route;
pub mod routes;

mod dispatch;
mod server;
mod templating;
mod view;

pub use context::{Clock, Context, ContextInjector, SystemClock};
pub use dispatch::{DispatchError, Dispatcher, RenderedResponse};
pub use route::{RouteBinding, RouteMatch, RoutePattern, RouteTable, RouteTableError};
pub use server::{
    BindError, ServeError, Server, ServerBuilder, ServerOptions, ServerOptionsFromEnvError,
    StorefrontRouter,
};
pub use templating::Renderer;
#[cfg(feature = "templating")]
pub use templating::{AskamaRenderer, RenderError};
pub use view::{UnknownViewError, View};
