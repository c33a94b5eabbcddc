//! Path utilities: video detection and content-type lookup by extension.

use std::path::Path;

/// Extensions listed as playable videos.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "ogv", "avi", "mov", "mkv", "m4v"];

/// Fallback content type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Check if a path has a video file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use surgistream_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("Compressed_monitor.MP4")));
/// assert!(!is_video_file(Path::new("notes.txt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    extension_lowercase(path)
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Guess the MIME type of a file from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = extension_lowercase(path) else {
        return OCTET_STREAM;
    };

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "ts" => "video/mp2t",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "vtt" => "text/vtt",
        "srt" => "application/x-subrip",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("Compressed_cam1.mp4")));
        assert!(is_video_file(Path::new("lap.webm")));
        assert!(is_video_file(Path::new("lap.ogg")));
        assert!(is_video_file(Path::new("lap.mkv")));
        assert!(is_video_file(Path::new("lap.MOV")));
        assert!(is_video_file(Path::new("/site/public/files/lap.avi")));

        assert!(!is_video_file(Path::new("lap.srt")));
        assert!(!is_video_file(Path::new("thumbnail.jpg")));
        assert!(!is_video_file(Path::new("no_extension")));
        assert!(!is_video_file(Path::new("")));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("demo.mp4")), "video/mp4");
        assert_eq!(content_type_for(Path::new("demo.M4V")), "video/mp4");
        assert_eq!(content_type_for(Path::new("demo.webm")), "video/webm");
        assert_eq!(content_type_for(Path::new("demo.mkv")), "video/x-matroska");
        assert_eq!(content_type_for(Path::new("demo.mov")), "video/quicktime");
        assert_eq!(content_type_for(Path::new("captions.vtt")), "text/vtt");
        assert_eq!(content_type_for(Path::new("demo.xyz")), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("README")), OCTET_STREAM);
    }
}
