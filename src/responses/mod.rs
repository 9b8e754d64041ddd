pub mod cors;
pub mod errors;
pub mod file;
pub mod json;

pub use crate::errors::ResultResp;
pub use cors::{apply_cors, preflight_response};
pub use errors::error_to_response;
pub use file::file_response;
pub use json::json_response;
