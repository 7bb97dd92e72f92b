// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for scale, chord and melody operations.

use thiserror::Error;

/// Result type alias for theory operations
pub type Result<T> = std::result::Result<T, TheoryError>;

/// Errors that can occur while deriving keys, chords and melodies
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TheoryError {
    /// Degree 0 does not exist in signed, 1-based scale degree space
    #[error("Scale degrees must be negative or positive, but not 0")]
    InvalidDegree,

    /// Self-similarity needs an orbit that covers every position
    #[error(
        "A self-similar melody can only be produced for a length ({length}) \
         that is coprime with the replication ratio ({ratio})"
    )]
    NotCoprime { length: u64, ratio: u64 },

    /// Coprimality is only defined for integers
    #[error("Numbers must be integers, got {0}")]
    NonIntegerInput(f64),

    /// Melodies combined into one must agree on their key
    #[error("A melody can only be made new from melodies that share the same rest symbol and key")]
    IncompatibleSequences,

    /// Range mapping needs min < max
    #[error("Invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: i64, max: i64 },

    /// A series window must end within the index space
    #[error("Series window of {size} terms starting at {start} runs past the last index")]
    WindowOverflow { start: u64, size: u64 },

    /// Scale-relative transformations need a key to resolve degrees
    #[error("Scale degree transformations require a melody with a key")]
    MissingKey,

    /// Tonic name could not be resolved to a pitch class
    #[error("Unknown tonic: {0}")]
    UnknownTonic(String),

    /// Scale name could not be parsed
    #[error("Unknown scale: {0}")]
    UnknownScale(String),

    /// Chord token is not part of the chord vocabulary
    #[error("Unknown chord type: {0}")]
    UnknownChordType(String),

    /// A computed or supplied pitch fell outside 0-127
    #[error("MIDI note {0} is outside the range 0-127")]
    MidiOutOfRange(i32),

    /// Generation needs at least one source note
    #[error("Cannot generate from an empty melody")]
    EmptyMelody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TheoryError::InvalidDegree.to_string(),
            "Scale degrees must be negative or positive, but not 0"
        );

        let err = TheoryError::NotCoprime { length: 16, ratio: 2 };
        assert!(err.to_string().starts_with("A self-similar melody"));

        let err = TheoryError::InvalidRange { min: 5, max: 5 };
        assert_eq!(err.to_string(), "Invalid range: min (5) must be less than max (5)");

        let err = TheoryError::WindowOverflow { start: u64::MAX, size: 2 };
        assert!(err.to_string().contains("runs past the last index"));
    }
}
