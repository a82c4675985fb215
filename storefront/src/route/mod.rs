//! The route table.
//!
//! A [`RouteTable`] binds route patterns to views. It is built once, at startup, through a
//! [`RouteTableBuilder`] and is read-only afterwards, so it can be shared freely between
//! concurrent requests.

use tracing::debug;

use crate::{Context, View};

mod error;
mod pattern;

pub use error::{ParseError, RouteTableError};
pub use pattern::{RoutePattern, Segment};

/// A route pattern bound to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBinding {
    pattern: RoutePattern,
    view: View,
    static_context: Context,
}

impl RouteBinding {
    /// The pattern of the route.
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// The view the route renders.
    pub fn view(&self) -> View {
        self.view
    }

    /// The context values the route always passes to its view.
    pub fn static_context(&self) -> &Context {
        &self.static_context
    }
}

/// A successful route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'t> {
    /// The matching binding.
    pub binding: &'t RouteBinding,

    /// The path parameters extracted from the request path, in order.
    pub params: Vec<(String, String)>,
}

impl RouteMatch<'_> {
    /// Get the route context: the static context of the binding, overridden by the extracted
    /// parameters.
    pub fn context(&self) -> Context {
        self.binding
            .static_context
            .clone()
            .merge(
                &self
                    .params
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect::<Context>(),
            )
    }
}

/// An immutable, ordered set of route bindings.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
}

/// A route table builder.
///
/// Registering a pattern with the same shape as an already registered one is an error: a route
/// can never silently shadow another.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    bindings: Vec<RouteBinding>,
}

impl RouteTableBuilder {
    /// Register a route whose static context holds the title of its view.
    pub fn route(self, pattern: &str, view: View) -> Result<Self, RouteTableError> {
        self.register(pattern, view, Context::titled(view.title()))
    }

    /// Register a route with an explicit static context.
    pub fn register(
        mut self,
        pattern: &str,
        view: View,
        static_context: Context,
    ) -> Result<Self, RouteTableError> {
        let pattern: RoutePattern =
            pattern
                .parse()
                .map_err(|err: ParseError| RouteTableError::InvalidPattern {
                    detail: err.detail(pattern),
                    err,
                })?;

        if let Some(existing) = self
            .bindings
            .iter()
            .find(|binding| binding.pattern.is_structurally_identical(&pattern))
        {
            return Err(RouteTableError::DuplicatePattern {
                pattern: pattern.to_string(),
                view,
                existing: existing.pattern.to_string(),
                existing_view: existing.view,
            });
        }

        debug!("Registering route `{pattern}` for view `{view}`.");

        self.bindings.push(RouteBinding {
            pattern,
            view,
            static_context,
        });

        Ok(self)
    }

    /// Build the route table.
    pub fn build(self) -> RouteTable {
        RouteTable {
            bindings: self.bindings,
        }
    }
}

impl RouteTable {
    /// Get a builder for a route table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Find the route matching a request path.
    ///
    /// The path is split on `/` and every segment is percent-decoded before being compared. The
    /// first registered binding that matches every segment wins. The query string, if any, must
    /// have been stripped by the caller.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let segments = split_path(path)?;

        self.bindings.iter().find_map(|binding| {
            binding
                .pattern
                .captures(&segments)
                .map(|params| RouteMatch { binding, params })
        })
    }

    /// Iterate over the bindings, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteBinding> {
        self.bindings.iter()
    }

    /// The number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Split a request path into its percent-decoded segments.
///
/// Returns `None` if the path is not absolute. The root path has no segments.
fn split_path(path: &str) -> Option<Vec<String>> {
    let path = path.strip_prefix('/')?;

    if path.is_empty() {
        return Some(Vec::new());
    }

    Some(
        path.split('/')
            .map(|segment| {
                percent_encoding::percent_decode_str(segment)
                    .decode_utf8_lossy()
                    .into_owned()
            })
            .collect(),
    )
}
