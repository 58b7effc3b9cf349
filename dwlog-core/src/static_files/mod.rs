//! Dashboard pages and their assets, served from the web root.

mod asset;
mod pages;
mod resolve;

#[cfg(test)]
mod tests;

pub use asset::{StaticAsset, content_type_for, open_asset};
pub use pages::page_file;
pub use resolve::{ResolveError, resolve_page, resolve_static_path};
