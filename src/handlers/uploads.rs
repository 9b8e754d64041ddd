// src/handlers/uploads.rs
use crate::responses::{file_response, ResultResp};
use crate::state::AppState;

pub fn serve(name: &str, state: &AppState) -> ResultResp {
    let (bytes, content_type) = state.images.read(name)?;
    file_response(bytes, &content_type)
}
