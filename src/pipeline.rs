//! One request, start to finish.
//!
//! ```text
//! global stages ─► route lookup ─► route stages ─► handler
//!       │               │               │             │
//!       └───────────────┴──── Err(ApiError) / panic / timeout
//!                                       │
//!                                       ▼
//!                               error translator ─► Response
//! ```
//!
//! Every failure surfaces as an [`ApiError`] and is translated exactly once,
//! in [`Router::handle`]. Nothing below it renders an error response itself.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures_util::FutureExt;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::middleware::BoxedStage;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Runs `req` through the full pipeline and always produces a response.
    pub async fn handle(&self, req: Request) -> Response {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_owned();

        let run = AssertUnwindSafe(self.run(req)).catch_unwind();
        let outcome = match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(ApiError::internal(format!(
                "panic while handling request: {}",
                panic_message(&*panic)
            ))),
            Err(_) => Err(ApiError::Timeout),
        };

        let response = outcome.unwrap_or_else(IntoResponse::into_response);
        info!(
            %method,
            %path,
            status = response.status_code(),
            elapsed = ?started.elapsed(),
            "request completed"
        );
        response
    }

    async fn run(&self, mut req: Request) -> Result<Response, ApiError> {
        for stage in &self.layers {
            run_stage(stage, &mut req)?;
        }

        let Some(matched) = self.lookup(req.method(), req.path()) else {
            return Err(ApiError::RouteNotFound {
                method: req.method().to_string(),
                path: req.path().to_owned(),
            });
        };
        req.set_params(matched.params);

        for stage in matched.stages.iter() {
            run_stage(stage, &mut req)?;
        }

        matched.handler.call(req, self.state.clone()).await
    }
}

fn run_stage(stage: &BoxedStage, req: &mut Request) -> Result<(), ApiError> {
    stage.process(req).inspect_err(|e| {
        debug!(stage = stage.name(), error = %e, "stage short-circuited");
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
