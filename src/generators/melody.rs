// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melody sequences and the self-similar patterns generated from them.
//!
//! A melody is an ordered run of notes and rests with an optional key.
//! Every operation returns a new melody; the source is never modified.

use std::fmt;

use tracing::trace;

use super::gcd;
use super::rhythm::{FillMode, Rhythm};
use crate::error::{Result, TheoryError};
use crate::music::{Key, MidiNote, Note};

/// Default ratio for self-replication
pub const DEFAULT_REPLICATION_RATIO: usize = 2;

/// An ordered sequence of notes, optionally bound to a key
#[derive(Debug, Clone, PartialEq)]
pub struct Melody {
    notes: Vec<Note>,
    key: Option<Key>,
}

impl Melody {
    /// Create a melody. With a key, pitched notes that lack a scale degree
    /// get one derived from their pitch class; existing degrees are kept.
    pub fn new(notes: Vec<Note>, key: Option<Key>) -> Self {
        let notes = match &key {
            Some(key) => notes
                .into_iter()
                .map(|mut note| {
                    if !note.is_rest() && note.scale_degree.is_none() {
                        note.scale_degree = key.scale_degree_of(note.midi);
                    }
                    note
                })
                .collect(),
            None => notes,
        };
        Self { notes, key }
    }

    /// Create a melody from MIDI numbers; negative values are rests
    pub fn from_midi(midi: &[MidiNote], key: Option<&Key>) -> Result<Self> {
        let notes = midi
            .iter()
            .map(|&m| {
                if m < 0 {
                    Ok(Note::rest())
                } else if let Some(key) = key {
                    key.note_for_midi(m)
                } else {
                    Note::from_midi(m)
                }
            })
            .collect::<Result<Vec<Note>>>()?;
        Ok(Self::new(notes, key.cloned()))
    }

    /// Create a melody from signed scale degrees of a key
    pub fn from_degrees(degrees: &[i32], key: &Key) -> Result<Self> {
        let notes = degrees
            .iter()
            .map(|&d| key.degree(d))
            .collect::<Result<Vec<Note>>>()?;
        Ok(Self::new(notes, Some(key.clone())))
    }

    /// Concatenate melodies that share a key
    pub fn new_from(melodies: &[Melody]) -> Result<Self> {
        let key = melodies.first().and_then(|m| m.key.clone());
        if melodies.iter().any(|m| m.key != key) {
            return Err(TheoryError::IncompatibleSequences);
        }
        let notes = melodies.iter().flat_map(|m| m.notes.iter().cloned()).collect();
        Ok(Self::new(notes, key))
    }

    /// New melody with the same key
    pub(crate) fn with_notes(&self, notes: Vec<Note>) -> Self {
        Self::new(notes, self.key.clone())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// MIDI numbers, with -1 for rests
    pub fn midi_values(&self) -> Vec<MidiNote> {
        self.notes.iter().map(|n| n.midi).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.notes.iter().map(|n| n.name.as_str()).collect()
    }

    pub fn scale_degrees(&self) -> Vec<Option<i32>> {
        self.notes.iter().map(|n| n.scale_degree).collect()
    }

    /// Build a self-similar melody of `length` notes: for every index `i`,
    /// the note at `i * ratio mod length` equals the note at `i`.
    ///
    /// The first two slots take the first two source notes. Each pass then
    /// copies every note of the filled prefix (as it stood before the last
    /// seed) around its whole orbit, overwriting what is there, and seeds
    /// the next source note into the first empty slot.
    pub fn self_replicate(&self, length: usize, ratio: usize) -> Result<Melody> {
        if gcd(length as u64, ratio as u64) != 1 {
            return Err(TheoryError::NotCoprime {
                length: length as u64,
                ratio: ratio as u64,
            });
        }
        if self.notes.is_empty() {
            return Err(TheoryError::EmptyMelody);
        }
        if length == 0 {
            return Ok(self.with_notes(Vec::new()));
        }

        let ratio = ratio % length;
        let source = &self.notes;
        let mut slots: Vec<Option<Note>> = vec![None; length];
        let mut consumed = 0;

        for slot in slots.iter_mut().take(2) {
            *slot = Some(source[consumed % source.len()].clone());
            consumed += 1;
        }

        let mut first_empty = slots.iter().position(Option::is_none);
        while let Some(filled) = first_empty {
            let prefix: Vec<Note> = slots[..filled].iter().flatten().cloned().collect();
            for (position, note) in prefix.iter().enumerate() {
                let mut target = mul_mod(position, ratio, length);
                while target != position {
                    slots[target] = Some(note.clone());
                    target = mul_mod(target, ratio, length);
                }
            }

            let next = source[consumed % source.len()].clone();
            consumed += 1;
            first_empty = slots.iter().position(Option::is_none);
            if let Some(empty) = first_empty {
                trace!(
                    "Self-replication stalled at {}, seeding source note {}",
                    empty,
                    (consumed - 1) % source.len()
                );
                slots[empty] = Some(next);
            }
        }

        Ok(self.with_notes(slots.into_iter().flatten().collect()))
    }

    /// Counting pattern: block `i` (1..=N) gates the melody through `i`
    /// hits and one rest, over `N * (i + 1)` steps.
    pub fn counted(&self) -> Melody {
        let count = self.notes.len();
        let notes = (1..=count)
            .flat_map(|hits| {
                let mut steps = vec![1u8; hits];
                steps.push(0);
                Rhythm::new(steps)
                    .with_fill_mode(FillMode::Wrap)
                    .with_length(count * (hits + 1))
                    .apply_to(self)
                    .notes
            })
            .collect();
        self.with_notes(notes)
    }

    /// Zig-zag pattern: from each start, walk forward through a window of
    /// notes and back through its interior.
    pub fn zig_zag(&self) -> Melody {
        let count = self.notes.len();
        if count == 0 {
            return self.with_notes(Vec::new());
        }
        let turn = if count % 2 == 0 {
            count / 2 + 1
        } else {
            count.div_ceil(2)
        };

        let mut notes = Vec::with_capacity(count * turn * 2);
        for start in 0..count {
            let window: Vec<&Note> = (0..turn)
                .map(|offset| &self.notes[(start + offset) % count])
                .collect();
            notes.extend(window.iter().map(|&n| n.clone()));
            if window.len() > 2 {
                notes.extend(window[1..window.len() - 1].iter().rev().map(|&n| n.clone()));
            }
        }
        self.with_notes(notes)
    }

    /// Mirror every note with a scale degree through the key's inversion map
    pub fn invert(&self) -> Result<Melody> {
        let key = self.key.as_ref().ok_or(TheoryError::MissingKey)?;
        let notes = self
            .notes
            .iter()
            .map(|note| match note.scale_degree {
                Some(degree) if !note.is_rest() => key.degree_inversion(degree),
                _ => Ok(note.clone()),
            })
            .collect::<Result<Vec<Note>>>()?;
        Ok(self.with_notes(notes))
    }
}

/// `a * b mod m` without overflowing
fn mul_mod(a: usize, b: usize, m: usize) -> usize {
    ((a as u128 * b as u128) % m as u128) as usize
}

impl fmt::Display for Melody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self.notes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", notes.join(" "))
    }
}
