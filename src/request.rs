//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Extensions;
use serde_json::Value;

use crate::method::Method;

/// An incoming HTTP request as seen by stages and handlers.
///
/// Stages enrich it as it travels down the pipeline: the body stage fills
/// [`Request::json`], the router fills path parameters, and guards may
/// attach typed values through the extension map.
#[derive(Debug)]
pub struct Request {
    method: http::Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    json: Option<Value>,
    extensions: Extensions,
}

impl Request {
    /// Builds a request for `target` (a path with an optional `?query`).
    ///
    /// ```rust
    /// use catalog::{Method, Request};
    ///
    /// let req = Request::new(Method::Get, "/products?page=2&category=Home%20Office")
    ///     .header("x-api-key", "secret");
    /// assert_eq!(req.path(), "/products");
    /// assert_eq!(req.query("category"), Some("Home Office"));
    /// ```
    pub fn new(method: Method, target: &str) -> Self {
        Self::from_target(method.into(), target, HeaderMap::new(), Bytes::new())
    }

    pub(crate) fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        let target = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
        Self::from_target(parts.method, target, parts.headers, body)
    }

    fn from_target(method: http::Method, target: &str, headers: HeaderMap, body: Bytes) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, Vec::new()),
        };
        Self {
            method,
            path: path.to_owned(),
            query,
            headers,
            body,
            params: HashMap::new(),
            json: None,
            extensions: Extensions::new(),
        }
    }

    /// Appends a header. Pairs that are not valid HTTP are ignored.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(n), Ok(v)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.append(n, v);
        }
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &http::Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn raw_body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// read as absent.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// First value of a decoded query-string parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/products/{id}`, `req.param("id")` on `/products/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The decoded JSON body, if the request carried one.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    pub(crate) fn set_json(&mut self, value: Value) {
        self.json = Some(value);
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// Removes and returns a typed value a stage attached earlier.
    pub fn take<T: Clone + Send + Sync + 'static>(&mut self) -> Option<T> {
        self.extensions.remove::<T>()
    }
}

/// `application/x-www-form-urlencoded` pairs in order. A query that does not
/// decode reads as empty.
fn parse_query(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(query).unwrap_or_default()
}
