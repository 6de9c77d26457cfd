//! Linux-safe filename cleanup for decoded path segments.

const NAME_MAX: usize = 255;

/// Makes a decoded path segment safe to use as a file name in one directory.
///
/// - `/`, `\`, NUL and control characters become `_`
/// - length is capped at 255 bytes on a char boundary
///
/// Everything else, including leading dots and underscores, is kept as is.
/// `.` and `..` pass through unchanged; the caller rejects them.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if replaced.len() <= NAME_MAX {
        return replaced;
    }
    let mut take = NAME_MAX;
    while !replaced.is_char_boundary(take) {
        take -= 1;
    }
    replaced[..take].to_string()
}
