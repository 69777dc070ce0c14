//! Utility functions and constants
//!
//! **Why**: Centralized helpers used across multiple modules
//!
//! **Used by**: ui, player, cli modules

/// Media file type detection
pub mod media {
    use std::path::Path;

    /// Supported video file extensions
    pub const VIDEO_EXTS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

    /// Supported audio file extensions
    pub const AUDIO_EXTS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a", "aac"];

    /// All supported file extensions (video + audio)
    pub const ALL_EXTS: &[&str] = &[
        "mp4", "mov", "avi", "mkv", "webm", "m4v",
        "mp3", "wav", "flac", "ogg", "m4a", "aac",
    ];

    /// Check if file is a video format
    pub fn is_video(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|s| VIDEO_EXTS.contains(&s.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Check if file is any supported media format
    pub fn is_media(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|s| ALL_EXTS.contains(&s.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Format milliseconds as `M:SS` or `H:MM:SS`
pub fn format_time(ms: i64) -> String {
    let total_secs = (ms.max(0)) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format a byte count as a human-readable size
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_time_short() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(1_000), "00:01");
        assert_eq!(format_time(65_000), "01:05");
        assert_eq!(format_time(-500), "00:00");
    }

    #[test]
    fn test_format_time_hours() {
        assert_eq!(format_time(3_600_000), "1:00:00");
        assert_eq!(format_time(3_661_000), "1:01:01");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_media_detection() {
        assert!(media::is_video(Path::new("movie.MP4")));
        assert!(media::is_media(Path::new("song.flac")));
        assert!(!media::is_media(Path::new("notes.txt")));
        assert!(!media::is_media(Path::new("noext")));
    }
}
