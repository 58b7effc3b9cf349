//! Source file management: listing, uploads and deletion.

mod store;
mod upload;

#[cfg(test)]
mod tests;

pub use store::{ALLOWED_EXTENSIONS, FileStore, SourceFile, base_name, has_allowed_extension};
pub use upload::{UploadError, UploadItem, items_from_json, items_from_multipart};
