use http::header::CONTENT_TYPE;
use tracing::debug;

use super::Stage;
use crate::error::ApiError;
use crate::request::Request;

/// Decodes a JSON body into [`Request::json`].
///
/// Only bodies declared as `application/json` (or an `application/*+json`
/// type) are decoded. Other bodies, and blank ones, leave `json()` as `None`.
/// A declared JSON body that fails to parse stops the pipeline with
/// `MalformedPayload` before routing.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonBody;

impl Stage for JsonBody {
    fn name(&self) -> &'static str {
        "json-body"
    }

    fn process(&self, req: &mut Request) -> Result<(), ApiError> {
        let raw = req.raw_body();
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        let content_type = req.header_value(CONTENT_TYPE.as_str());
        if !content_type.is_some_and(is_json) {
            debug!(content_type, bytes = raw.len(), "body left undecoded");
            return Ok(());
        }
        let value = serde_json::from_slice(raw).map_err(|e| {
            debug!(error = %e, bytes = raw.len(), "body is not valid JSON");
            ApiError::MalformedPayload(e.to_string())
        })?;
        req.set_json(value);
        Ok(())
    }
}

fn is_json(content_type: &str) -> bool {
    let Ok(media) = content_type.parse::<mime::Mime>() else {
        return false;
    };
    media.type_() == mime::APPLICATION
        && (media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON))
}
