// Typed errors with thiserror. Surface meaningful messages to JS.
// Runtime navigation never errors; only construction and parsing do.

use thiserror::Error;

/// Slider engine error types.
#[derive(Error, Debug)]
pub enum SliderError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Embed list has {found} entries but the slider has {expected} slides")]
    EmbedMismatch { expected: usize, found: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SliderError {
    fn from(err: serde_json::Error) -> Self {
        SliderError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SliderError::InvalidConfig("unknown preset".to_string());
        assert!(err.to_string().contains("unknown preset"));
    }

    #[test]
    fn embed_mismatch_names_both_counts() {
        let err = SliderError::EmbedMismatch {
            expected: 4,
            found: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains('4') && msg.contains('2'));
    }

    #[test]
    fn json_errors_convert() {
        let err: SliderError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SliderError::Serialization(_)));
    }
}
