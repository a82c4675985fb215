//! Templating facilities.
//!
//! Rendering is delegated to a [`Renderer`], which turns a view and its context into HTML.

use crate::{Context, View};

#[cfg(feature = "templating")]
mod pages;

#[cfg(feature = "templating")]
pub use pages::{AskamaRenderer, RenderError};

/// Render views into HTML.
pub trait Renderer: Send + Sync {
    /// The error returned when rendering fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render a view with the specified context.
    fn render(&self, view: View, context: &Context) -> Result<String, Self::Error>;
}
