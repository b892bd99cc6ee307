//! Base64 `data:` URI encoding.

use base64::{Engine, engine::general_purpose::STANDARD};
use mediastash_error::{MediaError, MediaErrorKind, MediaStashResult};

/// Encode content as `data:<mimetype>;base64,<payload>`.
///
/// The MIME type is lowercased; the payload uses the standard padded alphabet.
///
/// # Examples
///
/// ```
/// use mediastash_storage::encode_data_uri;
///
/// assert_eq!(encode_data_uri("text/plain", b"test"), "data:text/plain;base64,dGVzdA==");
/// ```
pub fn encode_data_uri(mimetype: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mimetype.to_ascii_lowercase(),
        STANDARD.encode(data)
    )
}

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Declared MIME type
    pub mimetype: String,
    /// Decoded content
    pub data: Vec<u8>,
}

/// Decode a base64 `data:` URI produced by [`encode_data_uri`].
///
/// # Errors
///
/// Fails if the text is not of the form `data:<mimetype>;base64,<payload>` or the
/// payload is not valid base64.
pub fn decode_data_uri(uri: &str) -> MediaStashResult<DataUri> {
    let invalid = |reason: &str| MediaError::new(MediaErrorKind::InvalidDataUri(reason.to_string()));

    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| invalid("missing 'data:' scheme"))?;
    let (mimetype, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| invalid("missing ';base64,' marker"))?;
    let data = STANDARD
        .decode(payload)
        .map_err(|e| invalid(&e.to_string()))?;

    Ok(DataUri {
        mimetype: mimetype.to_string(),
        data,
    })
}
