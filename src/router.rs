//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Each route carries its
//! own stage list (auth, validation) in front of the handler; global stages
//! registered with [`Router::layer`] run before any lookup.
//!
//! Static segments win over parameters at the same position, so
//! `/products/search` is never captured by `/products/{id}`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{BoxedStage, Stage};

/// Default bound on a single request's trip through the pipeline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

struct Route<S> {
    handler: BoxedHandler<S>,
    stages: Arc<[BoxedStage]>,
}

/// A successful lookup.
pub(crate) struct Matched<S> {
    pub(crate) handler: BoxedHandler<S>,
    pub(crate) stages: Arc<[BoxedStage]>,
    pub(crate) params: HashMap<String, String>,
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve),
/// or drive it directly with [`Router::handle`]. Every builder method returns
/// `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<Route<S>>>,
    pub(crate) layers: Vec<BoxedStage>,
    pub(crate) state: S,
    pub(crate) timeout: Duration,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router whose handlers each receive a clone of `state`.
    pub fn with_state(state: S) -> Self {
        Self {
            routes: HashMap::new(),
            layers: Vec::new(),
            state,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Appends a global stage. Global stages run in registration order.
    pub fn layer(mut self, stage: impl Stage) -> Self {
        self.layers.push(stage.boxed());
        self
    }

    /// Bounds the whole pipeline for one request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Registers a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.on_with(method, path, Vec::new(), handler)
    }

    /// Like [`Router::on`], with stages that run after the route matches
    /// and before the handler, in the order given.
    pub fn on_with(
        mut self,
        method: Method,
        path: &str,
        stages: Vec<BoxedStage>,
        handler: impl Handler<S>,
    ) -> Self {
        let route = Route { handler: handler.into_boxed_handler(), stages: stages.into() };
        self.routes
            .entry(method)
            .or_default()
            .insert(path, route)
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub(crate) fn lookup(&self, method: &http::Method, path: &str) -> Option<Matched<S>> {
        let method = Method::try_from(method).ok()?;
        let matched = self.routes.get(&method)?.at(path).ok()?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), decode_segment(v)))
            .collect();
        Some(Matched {
            handler: Arc::clone(&matched.value.handler),
            stages: Arc::clone(&matched.value.stages),
            params,
        })
    }
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |s| s.into_owned())
}
