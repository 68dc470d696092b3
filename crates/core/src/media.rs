//! Media type gating and playback duration rules.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How long a photo stays on screen when neither the item nor the display
/// overrides it.
pub const DEFAULT_PHOTO_DURATION_SECS: i32 = 15;

// ---------------------------------------------------------------------------
// Media kind
// ---------------------------------------------------------------------------

/// Coarse media class derived from the MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type. Only `image/*` and `video/*` are billboard
    /// content; everything else is refused at upload registration.
    pub fn from_content_type(content_type: &str) -> Result<Self, CoreError> {
        if let Some(rest) = content_type.strip_prefix("image/") {
            if !rest.is_empty() {
                return Ok(Self::Image);
            }
        }
        if let Some(rest) = content_type.strip_prefix("video/") {
            if !rest.is_empty() {
                return Ok(Self::Video);
            }
        }
        Err(CoreError::Validation(format!(
            "Unsupported content type '{content_type}'. Expected image/* or video/*"
        )))
    }
}

/// Validate a MIME type without caring about the kind.
pub fn validate_content_type(content_type: &str) -> Result<(), CoreError> {
    MediaKind::from_content_type(content_type).map(|_| ())
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// On-screen duration for one item, in seconds.
///
/// Photos use their custom duration, falling back to the display default.
/// Videos play their natural length; a missing probe falls back the same
/// way photos do.
pub fn effective_duration_secs(
    kind: MediaKind,
    custom_duration_secs: Option<i32>,
    media_duration_secs: Option<i32>,
    display_default_secs: i32,
) -> i32 {
    match kind {
        MediaKind::Image => custom_duration_secs.unwrap_or(display_default_secs),
        MediaKind::Video => media_duration_secs
            .or(custom_duration_secs)
            .unwrap_or(display_default_secs),
    }
}

// ---------------------------------------------------------------------------
// Storage paths
// ---------------------------------------------------------------------------

/// Validate a storage key before handing it to the media store.
///
/// Keys are relative, slash-separated, and must not climb out of the media
/// root.
pub fn validate_storage_path(path: &str) -> Result<(), CoreError> {
    if path.is_empty() {
        return Err(CoreError::Validation(
            "Storage path must not be empty".to_string(),
        ));
    }
    if path.starts_with('/') {
        return Err(CoreError::Validation(
            "Storage path must be relative".to_string(),
        ));
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err(CoreError::Validation(
            "Storage path must not contain '..'".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- MediaKind ------------------------------------------------------------

    #[test]
    fn image_types_accepted() {
        assert_eq!(
            MediaKind::from_content_type("image/jpeg").unwrap(),
            MediaKind::Image
        );
        assert_eq!(
            MediaKind::from_content_type("image/png").unwrap(),
            MediaKind::Image
        );
    }

    #[test]
    fn video_types_accepted() {
        assert_eq!(
            MediaKind::from_content_type("video/mp4").unwrap(),
            MediaKind::Video
        );
    }

    #[test]
    fn other_types_rejected() {
        assert!(MediaKind::from_content_type("application/pdf").is_err());
        assert!(MediaKind::from_content_type("text/html").is_err());
        assert!(MediaKind::from_content_type("").is_err());
    }

    #[test]
    fn bare_prefixes_rejected() {
        assert!(MediaKind::from_content_type("image/").is_err());
        assert!(MediaKind::from_content_type("video/").is_err());
    }

    // -- effective_duration_secs ----------------------------------------------

    #[test]
    fn photo_uses_custom_duration() {
        assert_eq!(
            effective_duration_secs(MediaKind::Image, Some(30), None, 15),
            30
        );
    }

    #[test]
    fn photo_falls_back_to_display_default() {
        assert_eq!(effective_duration_secs(MediaKind::Image, None, None, 15), 15);
    }

    #[test]
    fn video_uses_natural_duration() {
        assert_eq!(
            effective_duration_secs(MediaKind::Video, Some(30), Some(92), 15),
            92
        );
    }

    #[test]
    fn unprobed_video_falls_back_to_custom_then_default() {
        assert_eq!(
            effective_duration_secs(MediaKind::Video, Some(30), None, 15),
            30
        );
        assert_eq!(effective_duration_secs(MediaKind::Video, None, None, 15), 15);
    }

    // -- validate_storage_path ------------------------------------------------

    #[test]
    fn relative_path_accepted() {
        assert!(validate_storage_path("uploads/42/photo.jpg").is_ok());
    }

    #[test]
    fn empty_path_rejected() {
        assert!(validate_storage_path("").is_err());
    }

    #[test]
    fn absolute_path_rejected() {
        assert!(validate_storage_path("/etc/passwd").is_err());
    }

    #[test]
    fn traversal_rejected() {
        assert!(validate_storage_path("uploads/../../secrets").is_err());
        assert!(validate_storage_path("..").is_err());
    }
}
