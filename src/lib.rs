//! # catalog
//!
//! A small HTTP service over an in-memory product catalogue: CRUD, search,
//! filtering, pagination and aggregate statistics.
//!
//! ## The pipeline
//!
//! Every request travels the same ordered path:
//!
//! 1. **request log** – timestamp, method, path. Never fails.
//! 2. **JSON body** – decodes a non-blank `application/json` body; malformed
//!    JSON stops here.
//! 3. **route lookup** – radix tree per method; a miss is `404`.
//! 4. **route stages** – API-key check, then field validation, on writes only.
//! 5. **handler** – reads or mutates the [`Store`].
//!
//! Any step may fail with an [`ApiError`]. A panic or an expired timeout
//! becomes one too. The error is logged and rendered once, at the end.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use catalog::{Config, Server, Store, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), catalog::Error> {
//!     let config = Config::load()?;
//!     let router = app(Store::seeded(), &config.api_key).timeout(config.request_timeout());
//!     Server::bind(config.socket_addr()?).serve(router).await
//! }
//! ```
//!
//! ## Driving the pipeline without a socket
//!
//! ```rust
//! use catalog::{Method, Request, Store, app};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let router = app(Store::seeded(), "key");
//! let res = router.handle(Request::new(Method::Get, "/products/search?q=laptop")).await;
//! assert_eq!(res.status_code(), 200);
//! # }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod pipeline;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod middleware;
pub mod product;
pub mod query;
pub mod routes;
pub mod stats;
pub mod store;

pub use self::config::Config;
pub use error::{ApiError, Error};
pub use handler::Handler;
pub use method::Method;
pub use product::Product;
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use routes::app;
pub use server::Server;
pub use status::Status;
pub use store::Store;
