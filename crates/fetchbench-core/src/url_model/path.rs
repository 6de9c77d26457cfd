//! Final path segment extraction.

/// Returns the percent-decoded final segment of the URL path.
///
/// Returns `None` when the path is empty, is the root, or ends in `/`: the
/// final segment is then empty and cannot name a file. Query and fragment
/// are never part of the result.
pub fn final_path_segment(url: &url::Url) -> Option<String> {
    let last = url.path_segments()?.last()?;
    if last.is_empty() {
        return None;
    }
    let decoded = percent_decode(last);
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Lossy percent-decode; malformed escapes are kept verbatim.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
