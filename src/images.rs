// src/images.rs
use base64::Engine;
use mime::Mime;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;
use tracing::info;

use crate::errors::ServerError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Public URL prefix stored on reports.
pub const UPLOADS_PREFIX: &str = "/uploads";

const NAME_BYTES: usize = 16;

/// Decoded, type-checked image ready to be stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Accepts `image/jpeg`, `image/png` and `image/webp` up to 5 MiB.
    pub fn new(content_type: &str, bytes: Vec<u8>) -> Result<Self, ServerError> {
        let content_type: Mime = content_type
            .trim()
            .parse()
            .map_err(|_| ServerError::BadRequest("only images are allowed".into()))?;
        if extension_for(&content_type).is_none() {
            return Err(ServerError::BadRequest("only images are allowed".into()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ServerError::BadRequest("file too large (max 5MB)".into()));
        }
        Ok(Self { content_type, bytes })
    }

    /// Same as `new`, from standard base64 as sent in JSON bodies.
    pub fn from_base64(content_type: &str, data: &str) -> Result<Self, ServerError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .map_err(|_| ServerError::BadRequest("image data is not valid base64".into()))?;
        Self::new(content_type, bytes)
    }

    pub fn extension(&self) -> &'static str {
        extension_for(&self.content_type).unwrap_or("bin")
    }
}

/// Image as it arrives in a JSON body, not yet checked.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    pub content_type: String,
    /// Standard base64.
    pub data: String,
}

impl ImagePayload {
    pub fn decode(&self) -> Result<ImageUpload, ServerError> {
        ImageUpload::from_base64(&self.content_type, &self.data)
    }
}

fn extension_for(content_type: &Mime) -> Option<&'static str> {
    if content_type.type_() != mime::IMAGE {
        return None;
    }
    match content_type.subtype().as_str() {
        "jpeg" => Some("jpg"),
        "png" => Some("png"),
        "webp" => Some("webp"),
        _ => None,
    }
}

/// Content type to serve a stored file with, from its extension.
pub fn content_type_for(name: &str) -> Option<Mime> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(mime::IMAGE_JPEG),
        "png" => Some(mime::IMAGE_PNG),
        "webp" => "image/webp".parse().ok(),
        _ => None,
    }
}

/// URL-safe random file stem.
pub fn unique_stem<R: RngCore>(rng: &mut R) -> String {
    let mut buf = [0u8; NAME_BYTES];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Opaque storage for report images. `put` returns the public path.
pub trait ImageStore: Send + Sync {
    fn put(&self, upload: &ImageUpload) -> Result<String, ServerError>;
}

/// Writes each image once under a fresh random name. Never overwrites.
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ServerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| ServerError::Io(format!("create uploads dir failed: {e}")))?;
        Ok(Self { dir })
    }

    /// Read a stored file by bare name. Anything path-like is rejected.
    pub fn read(&self, name: &str) -> Result<(Vec<u8>, Mime), ServerError> {
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(ServerError::NotFound("upload"));
        }
        let content_type = content_type_for(name).ok_or(ServerError::NotFound("upload"))?;
        let bytes = fs::read(self.dir.join(name)).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ServerError::NotFound("upload"),
            _ => ServerError::Io(format!("read upload failed: {e}")),
        })?;
        Ok((bytes, content_type))
    }
}

impl ImageStore for DiskImageStore {
    fn put(&self, upload: &ImageUpload) -> Result<String, ServerError> {
        let name = format!("{}.{}", unique_stem(&mut OsRng), upload.extension());
        let path = self.dir.join(&name);

        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut f| std::io::Write::write_all(&mut f, &upload.bytes))
            .map_err(|e| ServerError::Io(format!("write upload failed: {e}")))?;

        info!(name = %name, bytes = upload.bytes.len(), "stored report image");
        Ok(format!("{UPLOADS_PREFIX}/{name}"))
    }
}

/// Keeps images in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryImageStore {
    stored: Mutex<Vec<ImageUpload>>,
}

#[cfg(test)]
impl MemoryImageStore {
    pub fn len(&self) -> usize {
        self.stored.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl ImageStore for MemoryImageStore {
    fn put(&self, upload: &ImageUpload) -> Result<String, ServerError> {
        let mut stored = self.stored.lock().map_err(|_| ServerError::InternalError)?;
        stored.push(upload.clone());
        Ok(format!("{UPLOADS_PREFIX}/mem-{}.{}", stored.len(), upload.extension()))
    }
}
