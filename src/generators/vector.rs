// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melodic vectors: add a repeating list of offsets to a melody.

use serde::{Deserialize, Serialize};

use super::melody::Melody;
use super::Transform;
use crate::error::{Result, TheoryError};
use crate::music::{Key, Note};

/// Unit of a vector step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMode {
    /// Semitones
    #[default]
    Midi,
    /// Scale degrees of the melody's key
    Scale,
}

/// Offsets applied note by note, repeating over the melody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MelodicVector {
    steps: Vec<i32>,
    #[serde(default)]
    shift_mode: ShiftMode,
}

impl MelodicVector {
    pub fn new(steps: Vec<i32>, shift_mode: ShiftMode) -> Self {
        Self { steps, shift_mode }
    }

    pub fn steps(&self) -> &[i32] {
        &self.steps
    }

    pub fn shift_mode(&self) -> ShiftMode {
        self.shift_mode
    }

    /// Shift every pitched note by its step; rests pass through
    pub fn apply_to(&self, melody: &Melody) -> Result<Melody> {
        if self.steps.is_empty() {
            return Ok(melody.clone());
        }
        let key = melody.key();
        if self.shift_mode == ShiftMode::Scale && key.is_none() {
            return Err(TheoryError::MissingKey);
        }

        let notes = melody
            .notes()
            .iter()
            .zip(self.steps.iter().cycle())
            .map(|(note, &step)| {
                if note.is_rest() {
                    return Ok(note.clone());
                }
                match (self.shift_mode, key) {
                    (ShiftMode::Scale, Some(key)) => shift_by_degrees(key, note, step),
                    (_, Some(key)) => key.note_for_midi(note.midi + step),
                    (_, None) => Note::from_midi(note.midi + step),
                }
            })
            .collect::<Result<Vec<Note>>>()?;
        Ok(melody.with_notes(notes))
    }
}

impl Transform for MelodicVector {
    fn apply(&self, melody: &Melody) -> Result<Melody> {
        self.apply_to(melody)
    }

    fn name(&self) -> &'static str {
        "vector"
    }
}

/// Move a note `step` scale degrees, keeping its octave relative to the key.
/// Notes outside the scale are left alone.
pub(crate) fn shift_by_degrees(key: &Key, note: &Note, step: i32) -> Result<Note> {
    let Some(degree) = note.scale_degree else {
        return Ok(note.clone());
    };
    let reference = key.degree(degree)?.midi;
    let octaves = (note.midi - reference).div_euclid(12);
    key.degree_with_octave(Key::shift_degree(degree, step), octaves)
}
