use tracing::debug;

use super::Stage;
use crate::error::ApiError;
use crate::request::Request;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Admits a request only when [`API_KEY_HEADER`] equals the configured
/// secret exactly. Never touches the store.
#[derive(Clone, Debug)]
pub struct ApiKey {
    secret: String,
}

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl Stage for ApiKey {
    fn name(&self) -> &'static str {
        "api-key"
    }

    fn process(&self, req: &mut Request) -> Result<(), ApiError> {
        match req.header_value(API_KEY_HEADER) {
            Some(key) if key == self.secret => Ok(()),
            presented => {
                debug!(present = presented.is_some(), path = req.path(), "api key rejected");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
