// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note values shared by keys and melodies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::note_table;
use crate::error::{Result, TheoryError};

/// MIDI note number type. Signed so the rest sentinel (-1) fits.
pub type MidiNote = i32;

/// Name carried by the rest sentinel
pub const REST_NAME: &str = "rest";

/// A pitched note or a rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// General-MIDI octave (-2 at MIDI 0)
    pub octave: i32,
    /// Letter plus 0-2 accidentals, or "rest"
    pub name: String,
    /// MIDI number 0-127, or -1 for a rest
    pub midi: MidiNote,
    /// Signed, non-zero scale degree when known relative to a key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_degree: Option<i32>,
}

impl Note {
    /// Create a note from the generic note table entry
    pub fn from_midi(midi: MidiNote) -> Result<Self> {
        let entry = note_table::lookup(midi).ok_or(TheoryError::MidiOutOfRange(midi))?;
        Ok(Self {
            octave: entry.octave,
            name: entry.name.to_string(),
            midi,
            scale_degree: None,
        })
    }

    /// Create a note with an explicit spelling
    pub fn spelled(midi: MidiNote, name: impl Into<String>) -> Result<Self> {
        let mut note = Self::from_midi(midi)?;
        note.name = name.into();
        Ok(note)
    }

    /// The rest sentinel
    pub fn rest() -> Self {
        Self {
            octave: 0,
            name: REST_NAME.to_string(),
            midi: -1,
            scale_degree: None,
        }
    }

    /// Check whether this is the rest sentinel
    pub fn is_rest(&self) -> bool {
        self.midi < 0 || self.name == REST_NAME
    }

    /// Attach a scale degree
    pub fn with_degree(mut self, degree: i32) -> Self {
        self.scale_degree = Some(degree);
        self
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rest() {
            write!(f, "{}", REST_NAME)
        } else {
            write!(f, "{}{}", self.name, self.octave)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_from_midi() {
        let note = Note::from_midi(60).unwrap();
        assert_eq!(note.octave, 3);
        assert_eq!(note.name, "C");
        assert_eq!(note.scale_degree, None);
        assert_eq!(note.to_string(), "C3");

        assert_eq!(Note::from_midi(128), Err(TheoryError::MidiOutOfRange(128)));
    }

    #[test]
    fn test_rest_is_distinct_from_missing_degree() {
        let rest = Note::rest();
        let note = Note::from_midi(61).unwrap();

        assert!(rest.is_rest());
        assert!(!note.is_rest());
        assert_eq!(rest.scale_degree, note.scale_degree);
        assert_eq!(rest.to_string(), "rest");
    }

    #[test]
    fn test_spelled_note() {
        let note = Note::spelled(39, "Eb").unwrap().with_degree(3);
        assert_eq!(note.name, "Eb");
        assert_eq!(note.octave, 1);
        assert_eq!(note.scale_degree, Some(3));
    }
}
