// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Rhythm gate: pass a melody through a pattern of hits and rests.

use serde::{Deserialize, Serialize};

use super::melody::Melody;
use super::Transform;
use crate::error::Result;
use crate::music::Note;

/// How a pattern is extended when a fixed length exceeds it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Keep repeating the pattern
    #[default]
    Wrap,
    /// Pad with rests
    Silence,
}

/// A hit/rest step pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rhythm {
    steps: Vec<u8>,
    #[serde(default)]
    fill_mode: FillMode,
    #[serde(default)]
    length: Option<usize>,
}

impl Rhythm {
    /// Create a rhythm; any non-zero step is a hit
    pub fn new(steps: Vec<u8>) -> Self {
        Self {
            steps,
            fill_mode: FillMode::default(),
            length: None,
        }
    }

    /// Set the fill mode used when extending to a fixed length
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Force the output to a fixed number of steps
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn steps(&self) -> &[u8] {
        &self.steps
    }

    /// Number of hit steps in one pass of the pattern
    pub fn hits(&self) -> usize {
        self.steps.iter().filter(|&&s| s != 0).count()
    }

    /// Step sequence long enough to carry every note of a melody once
    fn expanded_steps(&self, note_count: usize) -> Vec<u8> {
        let hits = self.hits();
        let repeats = if hits == 0 { 1 } else { note_count.div_ceil(hits) };
        let mut steps = self.steps.repeat(repeats);

        if let Some(length) = self.length {
            if steps.len() < length {
                match self.fill_mode {
                    FillMode::Wrap => {
                        let missing = length - steps.len();
                        steps.extend(self.steps.iter().cycle().take(missing));
                    }
                    FillMode::Silence => steps.resize(length, 0),
                }
            }
            steps.truncate(length);
        }
        steps
    }

    /// Gate a melody: hit steps take the next note (cycling), other steps
    /// become rests.
    pub fn apply_to(&self, melody: &Melody) -> Melody {
        let notes = melody.notes();
        if notes.is_empty() || self.steps.is_empty() {
            return melody.with_notes(Vec::new());
        }

        let mut next = 0;
        let gated = self
            .expanded_steps(notes.len())
            .into_iter()
            .map(|step| {
                if step == 0 {
                    Note::rest()
                } else {
                    let note = notes[next % notes.len()].clone();
                    next += 1;
                    note
                }
            })
            .collect();
        melody.with_notes(gated)
    }
}

impl Transform for Rhythm {
    fn apply(&self, melody: &Melody) -> Result<Melody> {
        Ok(self.apply_to(melody))
    }

    fn name(&self) -> &'static str {
        "rhythm"
    }
}
