use std::path::Path;
use tokio::fs;

/// An opened file plus what the response headers need.
#[derive(Debug)]
pub struct StaticAsset {
    pub file: fs::File,
    pub len: u64,
    pub content_type: String,
}

/// MIME type from the extension; text types carry a UTF-8 charset.
pub fn content_type_for(path: &Path) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() == mime_guess::mime::TEXT || mime.subtype() == mime_guess::mime::JAVASCRIPT {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}

pub async fn open_asset(path: &Path) -> std::io::Result<StaticAsset> {
    let file = fs::File::open(path).await?;
    let len = file.metadata().await?.len();

    Ok(StaticAsset {
        file,
        len,
        content_type: content_type_for(path),
    })
}
