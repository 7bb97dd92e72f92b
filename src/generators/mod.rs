// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative melody algorithms.
//!
//! This module provides the melody type, the self-similar generators built
//! on it (self-replication, infinity series, counting, zig-zag), and the
//! transforms that reshape a melody (rhythm gate, melodic vector, mutations).

pub mod infinity;
pub mod melody;
pub mod mutation;
pub mod rhythm;
pub mod vector;

use crate::error::{Result, TheoryError};

pub use infinity::{infinity_series, norgard_integer, BoundaryMode, InfinitySeries, SeriesOffset};
pub use melody::Melody;
pub use mutation::Mutation;
pub use rhythm::{FillMode, Rhythm};
pub use vector::{MelodicVector, ShiftMode};

/// Trait for anything that turns one melody into another
///
/// Implementations never modify their input; the result is always a new
/// melody.
pub trait Transform {
    /// Apply the transform to a melody
    fn apply(&self, melody: &Melody) -> Result<Melody>;

    /// Get the transform type name
    fn name(&self) -> &'static str;
}

/// Run a melody through a chain of transforms, in order
pub fn apply_all(melody: &Melody, transforms: &[&dyn Transform]) -> Result<Melody> {
    transforms
        .iter()
        .try_fold(melody.clone(), |current, transform| transform.apply(&current))
}

/// Greatest common divisor
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Check whether two integers share no factor other than 1
pub fn are_coprime(a: u64, b: u64) -> bool {
    gcd(a, b) == 1
}

/// Coprimality for values that arrive as floats (e.g. from config files)
pub fn are_coprime_f64(a: f64, b: f64) -> Result<bool> {
    for value in [a, b] {
        if value.fract() != 0.0 || !value.is_finite() || value < 0.0 {
            return Err(TheoryError::NonIntegerInput(value));
        }
    }
    Ok(are_coprime(a as u64, b as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{Key, Scale};

    struct Reverse;

    impl Transform for Reverse {
        fn apply(&self, melody: &Melody) -> Result<Melody> {
            let mut notes = melody.notes().to_vec();
            notes.reverse();
            Ok(Melody::new(notes, melody.key().cloned()))
        }

        fn name(&self) -> &'static str {
            "reverse"
        }
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(7, 2), 1);
        assert_eq!(gcd(0, 5), 5);
    }

    #[test]
    fn test_are_coprime() {
        assert!(are_coprime(7, 2));
        assert!(are_coprime(9, 4));
        assert!(!are_coprime(16, 2));
        assert!(!are_coprime(15, 3));
    }

    #[test]
    fn test_are_coprime_f64() {
        assert_eq!(are_coprime_f64(7.0, 3.0), Ok(true));
        assert_eq!(are_coprime_f64(8.0, 4.0), Ok(false));
        assert_eq!(are_coprime_f64(7.5, 3.0), Err(TheoryError::NonIntegerInput(7.5)));
    }

    #[test]
    fn test_apply_all_leaves_input_unchanged() {
        let key = Key::new("C", Scale::Major).unwrap();
        let melody = Melody::from_degrees(&[1, 2, 3], &key).unwrap();

        let twice = apply_all(&melody, &[&Reverse, &Reverse]).unwrap();
        assert_eq!(twice, melody);

        let once = apply_all(&melody, &[&Reverse]).unwrap();
        assert_eq!(once.scale_degrees(), vec![Some(3), Some(2), Some(1)]);
        assert_eq!(melody.scale_degrees(), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(Reverse.name(), "reverse");
    }
}
