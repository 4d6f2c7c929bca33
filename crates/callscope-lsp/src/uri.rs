//! Conversions between file paths and `file://` URIs.

use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::Uri;
use url::Url;

use crate::error::LspAdapterError;

/// Converts a `file://` URI to a path, percent-decoding as needed.
///
/// URIs the `url` crate cannot map to a file path fall back to stripping the
/// scheme prefix.
pub(crate) fn uri_to_path(uri: &Uri) -> Utf8PathBuf {
    let uri_str = uri.as_str();
    if let Some(path) = Url::parse(uri_str)
        .ok()
        .and_then(|url| url.to_file_path().ok())
        .and_then(|path| Utf8PathBuf::try_from(path).ok())
    {
        return path;
    }
    uri_str
        .strip_prefix("file://")
        .map_or_else(|| Utf8PathBuf::from(uri_str), Utf8PathBuf::from)
}

/// Converts a path to a `file://` URI.
pub(crate) fn path_to_uri(path: &Utf8Path) -> Result<Uri, LspAdapterError> {
    let url = Url::from_file_path(path.as_std_path())
        .map_err(|()| LspAdapterError::InvalidPath(path.to_string()))?;
    url.as_str()
        .parse()
        .map_err(|_| LspAdapterError::InvalidUri(url.to_string()))
}
