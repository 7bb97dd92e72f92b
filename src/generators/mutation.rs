// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Mutation catalogue: small reorderings and re-pitchings of a melody.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::melody::Melody;
use super::vector::{MelodicVector, ShiftMode};
use super::Transform;
use crate::error::{Result, TheoryError};
use crate::music::{Key, Note};

/// Share of notes re-pitched by a bit flip
pub const BIT_FLIP_RATIO: f64 = 0.3;

/// Built-in melody mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// Move every note two scale degrees down
    TransposeDown2,
    Reverse,
    RotateLeftThree,
    /// Ascending by pitch
    Sort,
    /// Descending by pitch
    ReverseSort,
    /// Mirror degrees through the key's inversion map
    Invert,
    InvertReverse,
    /// Re-pitch a random 30% of the notes to their inverted degree
    BitFlip,
}

impl Mutation {
    pub const ALL: [Mutation; 8] = [
        Mutation::TransposeDown2,
        Mutation::Reverse,
        Mutation::RotateLeftThree,
        Mutation::Sort,
        Mutation::ReverseSort,
        Mutation::Invert,
        Mutation::InvertReverse,
        Mutation::BitFlip,
    ];

    /// Parse mutation from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "transpose_down_2" | "transpose_down2" => Some(Mutation::TransposeDown2),
            "reverse" => Some(Mutation::Reverse),
            "rotate_left_three" | "rotate_left_3" => Some(Mutation::RotateLeftThree),
            "sort" => Some(Mutation::Sort),
            "reverse_sort" => Some(Mutation::ReverseSort),
            "invert" => Some(Mutation::Invert),
            "invert_reverse" => Some(Mutation::InvertReverse),
            "bit_flip" | "bitflip" => Some(Mutation::BitFlip),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::TransposeDown2 => "transpose_down_2",
            Mutation::Reverse => "reverse",
            Mutation::RotateLeftThree => "rotate_left_three",
            Mutation::Sort => "sort",
            Mutation::ReverseSort => "reverse_sort",
            Mutation::Invert => "invert",
            Mutation::InvertReverse => "invert_reverse",
            Mutation::BitFlip => "bit_flip",
        }
    }

    /// Whether this mutation needs the melody's key
    pub fn needs_key(&self) -> bool {
        matches!(
            self,
            Mutation::TransposeDown2 | Mutation::Invert | Mutation::InvertReverse | Mutation::BitFlip
        )
    }

    /// Apply the mutation, drawing any randomness from `rng`
    pub fn apply_with(&self, melody: &Melody, rng: &mut StdRng) -> Result<Melody> {
        if self.needs_key() && melody.key().is_none() {
            return Err(TheoryError::MissingKey);
        }

        match self {
            Mutation::TransposeDown2 => {
                MelodicVector::new(vec![-2], ShiftMode::Scale).apply_to(melody)
            }
            Mutation::Reverse => Ok(reordered(melody, |notes| notes.reverse())),
            Mutation::RotateLeftThree => Ok(reordered(melody, |notes| {
                if !notes.is_empty() {
                    let by = 3 % notes.len();
                    notes.rotate_left(by);
                }
            })),
            Mutation::Sort => Ok(reordered(melody, |notes| notes.sort_by_key(|n| n.midi))),
            Mutation::ReverseSort => Ok(reordered(melody, |notes| {
                notes.sort_by_key(|n| std::cmp::Reverse(n.midi))
            })),
            Mutation::Invert => melody.invert(),
            Mutation::InvertReverse => {
                let inverted = melody.invert()?;
                Ok(reordered(&inverted, |notes| notes.reverse()))
            }
            Mutation::BitFlip => bit_flip(melody, rng),
        }
    }

    /// Apply one mutation picked at random from `candidates`
    pub fn random(melody: &Melody, candidates: &[Mutation], rng: &mut StdRng) -> Result<Melody> {
        match candidates.choose(rng) {
            Some(mutation) => mutation.apply_with(melody, rng),
            None => Ok(melody.clone()),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Mutation::name(self))
    }
}

impl Transform for Mutation {
    fn apply(&self, melody: &Melody) -> Result<Melody> {
        let mut rng = StdRng::from_entropy();
        self.apply_with(melody, &mut rng)
    }

    fn name(&self) -> &'static str {
        Mutation::name(self)
    }
}

fn reordered(melody: &Melody, reorder: impl FnOnce(&mut Vec<Note>)) -> Melody {
    let mut notes = melody.notes().to_vec();
    reorder(&mut notes);
    melody.with_notes(notes)
}

fn bit_flip(melody: &Melody, rng: &mut StdRng) -> Result<Melody> {
    let key = melody.key().ok_or(TheoryError::MissingKey)?;
    let mut notes = melody.notes().to_vec();
    let amount = ((notes.len() as f64) * BIT_FLIP_RATIO).round() as usize;

    for i in index::sample(rng, notes.len(), amount.min(notes.len())) {
        if notes[i].is_rest() {
            continue;
        }
        notes[i] = flipped(key, &notes[i])?;
    }
    Ok(melody.with_notes(notes))
}

/// The note at the inverted degree, or one step up when the degree is its
/// own inversion
fn flipped(key: &Key, note: &Note) -> Result<Note> {
    let Some(degree) = note.scale_degree else {
        return Ok(note.clone());
    };
    let inverted = key.inverted_degree(degree)?;
    let target = if inverted == degree {
        Key::shift_degree(degree, 1)
    } else {
        inverted
    };
    let octaves = (note.midi - key.degree(degree)?.midi).div_euclid(12);
    key.degree_with_octave(target, octaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::Scale;

    fn c_minor() -> Key {
        Key::new(60, Scale::Minor).unwrap()
    }

    fn motif() -> Melody {
        Melody::from_degrees(&[1, 5, 6, 4], &c_minor()).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn degrees(melody: &Melody) -> Vec<i32> {
        melody.scale_degrees().into_iter().flatten().collect()
    }

    #[test]
    fn test_transpose_down_2() {
        let result = Mutation::TransposeDown2.apply_with(&motif(), &mut rng()).unwrap();
        assert_eq!(degrees(&result), vec![-2, 3, 4, 2]);
        assert_eq!(result.midi_values(), vec![56, 63, 65, 62]);
    }

    #[test]
    fn test_reorderings() {
        let melody = motif();
        let mut rng = rng();

        let reversed = Mutation::Reverse.apply_with(&melody, &mut rng).unwrap();
        assert_eq!(degrees(&reversed), vec![4, 6, 5, 1]);

        let rotated = Mutation::RotateLeftThree.apply_with(&melody, &mut rng).unwrap();
        assert_eq!(degrees(&rotated), vec![4, 1, 5, 6]);

        let sorted = Mutation::Sort.apply_with(&melody, &mut rng).unwrap();
        assert_eq!(degrees(&sorted), vec![1, 4, 5, 6]);
        assert_eq!(sorted.midi_values(), vec![60, 65, 67, 68]);

        let reverse_sorted = Mutation::ReverseSort.apply_with(&melody, &mut rng).unwrap();
        assert_eq!(reverse_sorted.midi_values(), vec![68, 67, 65, 60]);

        assert_eq!(degrees(&melody), vec![1, 5, 6, 4]);
    }

    #[test]
    fn test_inversions() {
        let inverted = Mutation::Invert.apply_with(&motif(), &mut rng()).unwrap();
        assert_eq!(degrees(&inverted), vec![8, 4, 3, 5]);

        let inverted = Mutation::InvertReverse.apply_with(&motif(), &mut rng()).unwrap();
        assert_eq!(degrees(&inverted), vec![5, 3, 4, 8]);
    }

    #[test]
    fn test_bit_flip() {
        let key = c_minor();
        let melody = Melody::from_degrees(&(1..=10).collect::<Vec<_>>(), &key).unwrap();
        let flipped = Mutation::BitFlip.apply_with(&melody, &mut rng()).unwrap();

        let unchanged = melody
            .notes()
            .iter()
            .zip(flipped.notes())
            .filter(|(a, b)| a == b)
            .count();
        assert_eq!(unchanged, 7);
        assert_eq!(flipped.len(), 10);
    }

    #[test]
    fn test_bit_flip_fixed_point_moves_up() {
        // Six-step scale: degree 4 mirrors onto itself
        let key = Key::new("C", Scale::WholeTone).unwrap();
        assert_eq!(key.inverted_degree(4), Ok(4));
        let note = key.degree(4).unwrap();
        assert_eq!(flipped(&key, &note).unwrap().scale_degree, Some(5));
    }

    #[test]
    fn test_key_required() {
        let melody = Melody::from_midi(&[60, 62], None).unwrap();
        for mutation in Mutation::ALL {
            let result = mutation.apply_with(&melody, &mut rng());
            if mutation.needs_key() {
                assert_eq!(result, Err(TheoryError::MissingKey), "{}", mutation);
            } else {
                assert!(result.is_ok(), "{}", mutation);
            }
        }
    }

    #[test]
    fn test_random_mutation() {
        let melody = motif();
        let result = Mutation::random(&melody, &[Mutation::Reverse], &mut rng()).unwrap();
        assert_eq!(degrees(&result), vec![4, 6, 5, 1]);

        let unchanged = Mutation::random(&melody, &[], &mut rng()).unwrap();
        assert_eq!(unchanged, melody);

        let any = Mutation::random(&melody, &Mutation::ALL, &mut rng()).unwrap();
        assert!(any.len() == melody.len());
    }

    #[test]
    fn test_mutation_names() {
        for mutation in Mutation::ALL {
            assert_eq!(Mutation::from_str(mutation.name()), Some(mutation));
        }
        assert_eq!(Mutation::from_str("Bit Flip"), Some(Mutation::BitFlip));
        assert_eq!(Mutation::from_str("shuffle"), None);
    }
}
