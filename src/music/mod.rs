// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic engine.
//!
//! This module provides the note table, scale modes, keys with correct
//! enharmonic spelling, and chord construction and labelling.

pub mod chord;
pub mod key;
pub mod mode;
pub mod note;
pub mod note_table;

pub use chord::{Chord, ChordQuality, ChordType};
pub use key::{Key, Tonic};
pub use mode::{Mode, Scale};
pub use note::{MidiNote, Note};
