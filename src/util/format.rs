//! Display formatting helpers
//!
//! Human-readable sizes and poster descriptions for the terminal, where
//! the poster image itself cannot be drawn.

/// Format bytes into human-readable size with appropriate units
///
/// # Examples
/// ```
/// use moviequiz::util::format::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(1048576), "1.0 MiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Guess the image format from its magic bytes
pub fn image_kind(image: &[u8]) -> &'static str {
    match image {
        [0xFF, 0xD8, 0xFF, ..] => "JPEG",
        [0x89, b'P', b'N', b'G', ..] => "PNG",
        [b'G', b'I', b'F', b'8', ..] => "GIF",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "WebP",
        [] => "empty",
        _ => "image",
    }
}

/// One-line description of a poster, e.g. "JPEG poster, 12.3 KiB"
pub fn describe_poster(image: &[u8]) -> String {
    format!("{} poster, {}", image_kind(image), format_bytes(image.len() as u64))
}
