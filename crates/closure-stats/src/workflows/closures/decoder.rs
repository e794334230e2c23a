use super::ClosureImportError;
use encoding_rs::Encoding;
use tracing::{debug, warn};

/// Decodes an export into text.
///
/// `label` is a WHATWG encoding label such as `euc-kr` (which also covers
/// CP949). A byte-order mark takes precedence over the label. Undecodable
/// sequences become U+FFFD instead of failing the import.
pub(crate) fn decode(bytes: &[u8], label: &str) -> Result<String, ClosureImportError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ClosureImportError::UnknownEncoding(label.to_string()))?;

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            encoding = used.name(),
            "closure export contained undecodable bytes; replaced with U+FFFD"
        );
    }
    debug!(encoding = used.name(), bytes = bytes.len(), "decoded closure export");

    Ok(text.into_owned())
}
