//! Render contexts.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// The context key holding the current UTC year.
pub const CURRENT_YEAR: &str = "current_year";

/// The context key holding the page title.
pub const TITLE: &str = "title";

/// The values passed to a renderer for one request.
///
/// A context is created for a single request and discarded once the view is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, String>);

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context holding only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        let mut context = Self::new();
        context.insert(TITLE, title);
        context
    }

    /// Get a value from the context.
    ///
    /// Missing keys yield an empty string, so templates can reference optional values freely.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Whether the context contains the specified key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, replacing any previous value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge another context into this one.
    ///
    /// Values from `other` take precedence.
    pub fn merge(mut self, other: &Context) -> Self {
        self.0
            .extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Iterate over the values of the context, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of values in the context.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the context is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Produces the values that every view receives.
#[derive(Debug, Clone, Default)]
pub struct ContextInjector<C = SystemClock> {
    clock: C,
}

impl<C: Clock> ContextInjector<C> {
    /// Create a new injector reading the time from the specified clock.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Compute the global context.
    ///
    /// The clock is read on every call: a long-running process must notice a year rollover.
    pub fn global_context(&self) -> Context {
        let mut context = Context::new();
        context.insert(CURRENT_YEAR, self.clock.now().year().to_string());
        context
    }
}
