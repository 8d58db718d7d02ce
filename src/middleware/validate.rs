use super::Stage;
use crate::error::ApiError;
use crate::product::{InputMode, ProductInput, validate};
use crate::request::Request;

/// Runs the product predicate on the decoded body.
///
/// On success the typed [`ProductInput`] is attached to the request's
/// extensions for the handler to [`take`](Request::take).
#[derive(Clone, Copy, Debug)]
pub struct Validate {
    mode: InputMode,
}

impl Validate {
    pub fn create() -> Self {
        Self { mode: InputMode::Create }
    }

    pub fn replace() -> Self {
        Self { mode: InputMode::Replace }
    }
}

impl Stage for Validate {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn process(&self, req: &mut Request) -> Result<(), ApiError> {
        let input: ProductInput = validate(req.json(), self.mode).map_err(ApiError::InvalidInput)?;
        req.extensions_mut().insert(input);
        Ok(())
    }
}
