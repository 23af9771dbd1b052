use serde::de::DeserializeOwned;

const NO_CONTENT: u16 = 204;
const RESET_CONTENT: u16 = 205;

/// A response carries no document when the status says so or the body is blank.
pub fn is_empty(status: u16, bytes: &[u8]) -> bool {
    status == NO_CONTENT
        || status == RESET_CONTENT
        || bytes.iter().all(|b| b.is_ascii_whitespace())
}

/// Decodes a success body, mapping empty bodies to `None`.
pub fn parse_json<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<Option<T>, serde_json::Error> {
    if is_empty(status, bytes) {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some)
}

/// Extracts the file name from a `Content-Disposition` header.
///
/// Prefers the RFC 5987 `filename*=UTF-8''...` form over plain `filename=`.
/// Names that reduce to nothing usable (`""`, `.`, `..`) are dropped.
pub fn disposition_filename(header: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.trim().trim_matches('"');
                let raw = encoded
                    .split_once("''")
                    .map(|(_, rest)| rest)
                    .unwrap_or(encoded);
                let decoded = urlencoding::decode(raw).ok().and_then(|name| sanitize(&name));
                if decoded.is_some() {
                    return decoded;
                }
            }
            "filename" => plain = sanitize(value.trim().trim_matches('"')),
            _ => {}
        }
    }

    plain
}

/// Keeps only the last path component so a server cannot pick the directory.
fn sanitize(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    match last {
        "" | "." | ".." => None,
        _ => Some(last.to_string()),
    }
}
