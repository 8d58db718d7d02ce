use chrono::{SecondsFormat, Utc};
use tracing::info;

use super::Stage;
use crate::error::ApiError;
use crate::request::Request;

/// Logs every inbound request. Always passes through.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLog;

impl Stage for RequestLog {
    fn name(&self) -> &'static str {
        "request-log"
    }

    fn process(&self, req: &mut Request) -> Result<(), ApiError> {
        info!(
            timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            method = %req.method(),
            path = req.path(),
            "request received"
        );
        Ok(())
    }
}
