// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! A mode bound to a tonic and reference octave.
//!
//! The key owns the spelled scale notes and the degree inversion map, and
//! answers every degree, chord and note-name query made by the generators.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::chord::{Chord, ChordQuality, ChordType};
use super::mode::{rotated, Mode, Scale};
use super::note::{MidiNote, Note};
use super::note_table::{
    self, CHROMATIC_SCALE, LETTERS, MIDI_MAX, MIDI_MIN, SCALE_NOTE_CANDIDATES,
};
use crate::error::{Result, TheoryError};

/// Natural sign appended to generic names that contradict the key
pub const NATURAL_SIGN: &str = "♮";

/// Octave used when the tonic is given by name
pub const DEFAULT_OCTAVE: i32 = 1;

/// How a tonic is supplied: by name ("D", "Eb", "B#") or by MIDI number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tonic {
    Name(String),
    Midi(i32),
}

impl Default for Tonic {
    fn default() -> Self {
        Tonic::Name("C".to_string())
    }
}

impl From<&str> for Tonic {
    fn from(name: &str) -> Self {
        Tonic::Name(name.to_string())
    }
}

impl From<String> for Tonic {
    fn from(name: String) -> Self {
        Tonic::Name(name)
    }
}

impl From<i32> for Tonic {
    fn from(midi: i32) -> Self {
        Tonic::Midi(midi)
    }
}

impl fmt::Display for Tonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tonic::Name(name) => write!(f, "{}", name),
            Tonic::Midi(midi) => write!(f, "{}", midi),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    mode: Mode,
    tonic: String,
    midi_tonic: i32,
    octave: i32,
    scale_notes: Vec<String>,
    name: String,
    inversion_map: BTreeMap<i32, i32>,
    inversion_min: i32,
    inversion_max: i32,
}

impl Key {
    /// Build a key from a tonic and scale
    pub fn new(tonic: impl Into<Tonic>, scale: Scale) -> Result<Self> {
        let (tonic, midi_tonic, octave) = match tonic.into() {
            Tonic::Name(name) => {
                let name = name.trim().to_string();
                let pitch_class = note_table::pitch_class_of(&name)
                    .ok_or_else(|| TheoryError::UnknownTonic(name.clone()))?;
                (name, pitch_class as i32, DEFAULT_OCTAVE)
            }
            Tonic::Midi(midi) => {
                let entry = note_table::lookup(midi).ok_or(TheoryError::MidiOutOfRange(midi))?;
                (entry.name.to_string(), midi % 12, entry.octave)
            }
        };

        let mode = Mode::new(scale);
        let scale_notes = spell_scale(&tonic, midi_tonic, &mode);
        let (inversion_map, inversion_min, inversion_max) = build_inversion_map(mode.len());
        let name = format!("{} {}", tonic, scale.name());

        debug!(
            "Built key {} (octave {}): {}",
            name,
            octave,
            scale_notes.join(" ")
        );

        Ok(Self {
            mode,
            tonic,
            midi_tonic,
            octave,
            scale_notes,
            name,
            inversion_map,
            inversion_min,
            inversion_max,
        })
    }

    /// Build a key from a tonic and a scale name
    pub fn parse(tonic: impl Into<Tonic>, scale: &str) -> Result<Self> {
        let scale = Scale::from_str(scale).ok_or_else(|| TheoryError::UnknownScale(scale.to_string()))?;
        Self::new(tonic, scale)
    }

    pub fn scale(&self) -> Scale {
        self.mode.scale()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Tonic spelling, e.g. "G#"
    pub fn tonic(&self) -> &str {
        &self.tonic
    }

    /// Tonic pitch class 0-11
    pub fn midi_tonic(&self) -> i32 {
        self.midi_tonic
    }

    /// Reference octave of degree 1
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Spelled scale notes, one per degree
    pub fn scale_notes(&self) -> &[String] {
        &self.scale_notes
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of degrees per octave
    pub fn len(&self) -> usize {
        self.scale_notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scale_notes.is_empty()
    }

    /// MIDI number of degree 1 at the reference octave
    fn tonic_midi(&self) -> i32 {
        self.midi_tonic + self.octave * 12 + 24
    }

    /// Note at a signed scale degree in the reference octave
    pub fn degree(&self, degree: i32) -> Result<Note> {
        self.degree_with_octave(degree, 0)
    }

    /// Note at a signed scale degree, transposed by whole octaves
    pub fn degree_with_octave(&self, degree: i32, octave_transpose: i32) -> Result<Note> {
        if degree == 0 {
            return Err(TheoryError::InvalidDegree);
        }
        let len = self.len() as i64;
        let steps = i64::from(degree.unsigned_abs());

        // Whole octaves plus the remaining steps within one
        let midi = if degree > 0 {
            let index = ((steps - 1) % len) as usize;
            let octaves = (steps - 1) / len;
            i64::from(self.tonic_midi()) + i64::from(self.mode.scale_offsets()[index]) + octaves * 12
        } else {
            let below: i32 = self
                .mode
                .step_offsets()
                .iter()
                .rev()
                .take((steps % len) as usize)
                .sum();
            i64::from(self.tonic_midi()) - (steps / len) * 12 - i64::from(below)
        };
        let midi = midi + i64::from(octave_transpose) * 12;

        let midi = i32::try_from(midi)
            .ok()
            .filter(|m| (MIDI_MIN..=MIDI_MAX).contains(m))
            .ok_or(TheoryError::MidiOutOfRange(
                midi.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            ))?;
        let index = self.mode.degree_index(degree);
        Ok(Note::spelled(midi, self.scale_notes[index].clone())?.with_degree(degree))
    }

    /// Degree reached by moving `step` scale steps from `degree`, skipping 0
    pub fn shift_degree(degree: i32, step: i32) -> i32 {
        let raw = degree.saturating_add(step);
        if degree > 0 && raw <= 0 {
            raw.saturating_sub(1)
        } else if degree < 0 && raw >= 0 {
            raw.saturating_add(1)
        } else {
            raw
        }
    }

    /// Mirror image of a degree around the reference octave
    pub fn inverted_degree(&self, degree: i32) -> Result<i32> {
        if degree == 0 {
            return Err(TheoryError::InvalidDegree);
        }
        let clamped = degree.clamp(self.inversion_min, self.inversion_max);
        self.inversion_map
            .get(&clamped)
            .copied()
            .ok_or(TheoryError::InvalidDegree)
    }

    /// Note at the mirrored degree
    pub fn degree_inversion(&self, degree: i32) -> Result<Note> {
        let inverted = self.inverted_degree(degree)?;
        self.degree(inverted)
    }

    /// Lowest and highest degree covered by the inversion map
    pub fn inversion_range(&self) -> (i32, i32) {
        (self.inversion_min, self.inversion_max)
    }

    /// Build a chord on a degree in the reference octave
    pub fn chord(&self, degree: i32, chord_type: &ChordType) -> Result<Chord> {
        self.chord_with_octave(degree, chord_type, 0)
    }

    /// Build a chord on a degree, transposed by whole octaves
    pub fn chord_with_octave(
        &self,
        degree: i32,
        chord_type: &ChordType,
        octave_transpose: i32,
    ) -> Result<Chord> {
        if degree == 0 {
            return Err(TheoryError::InvalidDegree);
        }

        let (mut midi, quality) = match chord_type.fixed_intervals() {
            None => {
                let midi = [0, 2, 4]
                    .iter()
                    .map(|&step| {
                        self.degree_with_octave(Self::shift_degree(degree, step), octave_transpose)
                            .map(|note| note.midi)
                    })
                    .collect::<Result<Vec<MidiNote>>>()?;
                let quality = self
                    .mode
                    .quality_at(degree)
                    .cloned()
                    .unwrap_or_else(|| ChordQuality::of_midi(&midi));
                (midi, quality)
            }
            Some(intervals) => {
                let root = self.degree_with_octave(degree, octave_transpose)?.midi;
                let midi = intervals
                    .iter()
                    .map(|&interval| {
                        let tone = root + interval as i32;
                        note_table::lookup(tone)
                            .map(|entry| entry.midi)
                            .ok_or(TheoryError::MidiOutOfRange(tone))
                    })
                    .collect::<Result<Vec<MidiNote>>>()?;
                let quality = ChordQuality::of_midi(&midi);
                (midi, quality)
            }
        };
        midi.sort_unstable();

        let root_midi = midi
            .get(quality.root_index())
            .or_else(|| midi.first())
            .copied()
            .ok_or(TheoryError::InvalidDegree)?;
        let root = self.spell(root_midi)?;
        let degree_label = quality.degree_label(self.mode.degree_index(degree) + 1);

        Ok(Chord {
            midi,
            quality,
            root,
            degree: degree_label,
            transposition: octave_transpose,
        })
    }

    /// Pitch class of `midi` relative to the tonic
    fn relative_pitch_class(&self, midi: MidiNote) -> i32 {
        (midi - self.midi_tonic).rem_euclid(12)
    }

    /// Spell a MIDI note in this key, without octave
    pub fn spell(&self, midi: MidiNote) -> Result<String> {
        let entry = note_table::lookup(midi).ok_or(TheoryError::MidiOutOfRange(midi))?;
        let relative = self.relative_pitch_class(midi);

        if let Some(index) = self.mode.scale_offsets().iter().position(|&o| o == relative) {
            return Ok(self.scale_notes[index].clone());
        }

        let generic = entry.name;
        let contradicts_key = generic.len() == 1
            && self
                .scale_notes
                .iter()
                .any(|note| note.len() > 1 && note.starts_with(generic));
        if contradicts_key {
            Ok(format!("{}{}", generic, NATURAL_SIGN))
        } else {
            Ok(generic.to_string())
        }
    }

    /// Spell a MIDI note in this key with its octave, e.g. "Eb1"
    pub fn midi2note(&self, midi: MidiNote) -> Result<String> {
        let name = self.spell(midi)?;
        let octave = note_table::lookup(midi)
            .map(|entry| entry.octave)
            .ok_or(TheoryError::MidiOutOfRange(midi))?;
        Ok(format!("{}{}", name, octave))
    }

    /// Positive scale degree (1-based, within one octave) of a MIDI note
    pub fn scale_degree_of(&self, midi: MidiNote) -> Option<i32> {
        let relative = self.relative_pitch_class(midi);
        self.mode
            .scale_offsets()
            .iter()
            .position(|&o| o == relative)
            .map(|index| index as i32 + 1)
    }

    /// Note for a MIDI number, spelled in this key with its degree
    pub fn note_for_midi(&self, midi: MidiNote) -> Result<Note> {
        let mut note = Note::spelled(midi, self.spell(midi)?)?;
        note.scale_degree = self.scale_degree_of(midi);
        Ok(note)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Spell every degree so that letters follow the scale's letter sequence
fn spell_scale(tonic: &str, midi_tonic: i32, mode: &Mode) -> Vec<String> {
    let tonic_letter = tonic.chars().next().unwrap_or('C');
    let letter_start = LETTERS.iter().position(|&l| l == tonic_letter).unwrap_or(0);
    let letters = rotated(&LETTERS, letter_start);

    mode.scale_offsets()
        .iter()
        .enumerate()
        .map(|(i, &offset)| {
            let letter_index = match mode.scale_degree_mapping() {
                Some(mapping) => (mapping[i].floor() as usize).saturating_sub(1),
                None => i,
            };
            let letter = letters[letter_index % letters.len()];
            let pitch_class = (midi_tonic + offset).rem_euclid(12) as usize;

            match SCALE_NOTE_CANDIDATES[pitch_class]
                .iter()
                .find(|candidate| candidate.starts_with(letter))
            {
                Some(candidate) => candidate.to_string(),
                None => {
                    let fallback = CHROMATIC_SCALE[pitch_class];
                    warn!(
                        "No spelling of pitch class {} uses letter {} in {} {}, using {}",
                        pitch_class,
                        letter,
                        tonic,
                        mode.name(),
                        fallback
                    );
                    fallback.to_string()
                }
            }
        })
        .collect()
}

/// Pair each degree with its mirror: `-N..=-1` then `1..=2N+1`, the i-th
/// entry with the (len-1-i)-th.
fn build_inversion_map(steps: usize) -> (BTreeMap<i32, i32>, i32, i32) {
    let n = steps as i32;
    let degrees: Vec<i32> = (-n..=-1).chain(1..=2 * n + 1).collect();
    let last = degrees.len().saturating_sub(1);

    let map = degrees
        .iter()
        .enumerate()
        .map(|(i, &degree)| (degree, degrees[last - i]))
        .collect();
    (map, -n, 2 * n + 1)
}
