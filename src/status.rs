//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or paired with a body as `(Status, body)`.
//!
//! ```rust
//! use catalog::{Json, Response, Status};
//!
//! Response::status(Status::NotFound);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/products/42")
//!     .json(br#"{"id":"42"}"#.to_vec());
//!
//! let _ = (Status::Created, Json(serde_json::json!({ "id": "42" })));
//! ```

/// The status codes the catalogue answers with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    Created,             // 201

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    Unauthorized,        // 401
    NotFound,            // 404

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl Status {
    pub fn is_server_error(self) -> bool {
        u16::from(self) >= 500
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::BadRequest          => 400,
            Status::Unauthorized        => 401,
            Status::NotFound            => 404,
            Status::InternalServerError => 500,
            Status::ServiceUnavailable  => 503,
        }
    }
}
