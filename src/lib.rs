// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scalewise - scale and chord theory with self-similar melody generation.
//!
//! The harmonic engine (`music`) derives modes, spells keys and builds
//! chords; `generators` produces melodies from it with coprime
//! self-replication, the infinity series, counting and zig-zag patterns.
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod error;
pub mod generators;
pub mod music;

pub use config::GenerationConfig;
pub use error::{Result, TheoryError};
pub use generators::{
    infinity_series, norgard_integer, BoundaryMode, InfinitySeries, MelodicVector, Melody,
    Mutation, Rhythm, SeriesOffset, ShiftMode, Transform,
};
pub use music::{Chord, ChordQuality, ChordType, Key, MidiNote, Mode, Note, Scale, Tonic};
