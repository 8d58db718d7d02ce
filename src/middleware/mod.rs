//! Middleware stages.
//!
//! A [`Stage`] inspects (and may enrich) a request before the handler runs.
//! Returning `Ok(())` passes the request on; returning an [`ApiError`]
//! short-circuits the pipeline straight to the error translator.
//!
//! Stages are attached at two levels:
//!
//! - **global**, via [`Router::layer`](crate::Router::layer), run for every
//!   request in registration order before route lookup;
//! - **route-scoped**, via [`Router::on_with`](crate::Router::on_with), run
//!   after a route matches and before its handler.
//!
//! | Stage | Scope | Failure |
//! |---|---|---|
//! | [`RequestLog`] | global | never |
//! | [`JsonBody`] | global | `MalformedPayload` |
//! | [`ApiKey`] | create / update / delete | `Unauthorized` |
//! | [`Validate`] | create / update | `InvalidInput` |

use std::sync::Arc;

use crate::error::ApiError;
use crate::request::Request;

mod auth;
mod body;
mod log;
mod validate;

pub use auth::{API_KEY_HEADER, ApiKey};
pub use body::JsonBody;
pub use log::RequestLog;
pub use validate::Validate;

/// One link in the request pipeline.
pub trait Stage: Send + Sync + 'static {
    /// Short name used in pipeline logs.
    fn name(&self) -> &'static str;

    fn process(&self, req: &mut Request) -> Result<(), ApiError>;

    fn boxed(self) -> BoxedStage
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

/// A shared, type-erased stage.
pub type BoxedStage = Arc<dyn Stage>;
