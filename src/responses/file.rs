// responses/file.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use mime::Mime;

/// Raw bytes with their content type, cacheable since stored names never repeat.
pub fn file_response(bytes: Vec<u8>, content_type: &Mime) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type.as_ref())
        .header("Cache-Control", "public, max-age=31536000, immutable")
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}
