//! Preconditions on uploaded audio, checked before any network call.

use std::path::Path;

/// Largest accepted audio payload: 25 MiB.
pub const AUDIO_MAX_BYTES: usize = 25 * 1024 * 1024;

/// Accepted audio mime types.
pub const ALLOWED_AUDIO_TYPES: &[&str] = &[
    "audio/webm",
    "audio/mp3",
    "audio/mpeg",
    "audio/wav",
    "audio/wave",
    "audio/x-wav",
    "audio/m4a",
    "audio/mp4",
];

const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("audio/webm", "webm"),
    ("audio/mp3", "mp3"),
    ("audio/mpeg", "mp3"),
    ("audio/wav", "wav"),
    ("audio/wave", "wav"),
    ("audio/x-wav", "wav"),
    ("audio/m4a", "m4a"),
    ("audio/mp4", "m4a"),
];

/// Checks size and mime type, returning a human-readable reason on failure.
pub fn validate_audio(audio: &[u8], mime_type: &str) -> Result<(), String> {
    if audio.len() > AUDIO_MAX_BYTES {
        return Err("Audio file too large. Maximum size is 25MB".to_string());
    }

    if !ALLOWED_AUDIO_TYPES.contains(&mime_type) {
        return Err(format!(
            "Unsupported audio format. Allowed formats: {}",
            ALLOWED_AUDIO_TYPES.join(", ")
        ));
    }

    Ok(())
}

/// File extension used when uploading audio of a given mime type. Unknown types upload as webm.
pub fn file_extension(mime_type: &str) -> &'static str {
    MIME_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, ext)| *ext)
        .unwrap_or("webm")
}

/// Guesses an audio mime type from a file path's extension.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "webm" => Some("audio/webm"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "m4a" | "mp4" => Some("audio/mp4"),
        _ => None,
    }
}
