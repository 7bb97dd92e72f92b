// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale identifiers and the interval structure derived from them.
//!
//! Diatonic modes are rotations of the major step pattern. Pentatonics
//! merge adjacent steps of their parent mode, and the remaining
//! symmetric/custom scales supply a fixed pattern. Scales that do not
//! have seven notes also carry a letter mapping used when spelling keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chord::ChordQuality;

/// Semitone steps of the major scale
pub const MAJOR_STEP_OFFSETS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

const WHOLE_TONE_OFFSETS: [i32; 6] = [2, 2, 2, 2, 2, 2];
const CHROMATIC_OFFSETS: [i32; 12] = [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
const GS_OFFSETS: [i32; 7] = [1, 2, 1, 1, 3, 1, 3];
const DIMINISHED_OFFSETS: [i32; 8] = [2, 1, 2, 1, 2, 1, 2, 1];

/// Scales supported by the harmonic engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    Major, // Ionian
    Minor, // Aeolian
    MajPentatonic,
    MinPentatonic,
    WholeTone,
    Chromatic,
    #[serde(rename = "gs")]
    GS,
    Diminished, // Whole-half
}

impl Scale {
    /// All scales in declaration order
    pub const ALL: [Scale; 15] = [
        Scale::Ionian,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
        Scale::Aeolian,
        Scale::Locrian,
        Scale::Major,
        Scale::Minor,
        Scale::MajPentatonic,
        Scale::MinPentatonic,
        Scale::WholeTone,
        Scale::Chromatic,
        Scale::GS,
        Scale::Diminished,
    ];

    /// Rotation of the major step pattern for diatonic modes
    fn diatonic_position(self) -> Option<usize> {
        match self {
            Scale::Ionian | Scale::Major => Some(0),
            Scale::Dorian => Some(1),
            Scale::Phrygian => Some(2),
            Scale::Lydian => Some(3),
            Scale::Mixolydian => Some(4),
            Scale::Aeolian | Scale::Minor => Some(5),
            Scale::Locrian => Some(6),
            _ => None,
        }
    }

    /// Parse scale from string
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "ionian" => Some(Scale::Ionian),
            "dorian" => Some(Scale::Dorian),
            "phrygian" => Some(Scale::Phrygian),
            "lydian" => Some(Scale::Lydian),
            "mixolydian" => Some(Scale::Mixolydian),
            "aeolian" => Some(Scale::Aeolian),
            "locrian" => Some(Scale::Locrian),
            "major" => Some(Scale::Major),
            "minor" | "naturalminor" => Some(Scale::Minor),
            "majpentatonic" | "majorpentatonic" | "pentatonicmajor" => Some(Scale::MajPentatonic),
            "minpentatonic" | "minorpentatonic" | "pentatonicminor" => Some(Scale::MinPentatonic),
            "wholetone" => Some(Scale::WholeTone),
            "chromatic" => Some(Scale::Chromatic),
            "gs" => Some(Scale::GS),
            "diminished" | "octatonic" | "wholehalf" => Some(Scale::Diminished),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale
    pub fn name(self) -> &'static str {
        match self {
            Scale::Ionian => "Ionian",
            Scale::Dorian => "Dorian",
            Scale::Phrygian => "Phrygian",
            Scale::Lydian => "Lydian",
            Scale::Mixolydian => "Mixolydian",
            Scale::Aeolian => "Aeolian",
            Scale::Locrian => "Locrian",
            Scale::Major => "Major",
            Scale::Minor => "Minor",
            Scale::MajPentatonic => "Major Pentatonic",
            Scale::MinPentatonic => "Minor Pentatonic",
            Scale::WholeTone => "Whole Tone",
            Scale::Chromatic => "Chromatic",
            Scale::GS => "GS",
            Scale::Diminished => "Diminished",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Interval and chord structure of a scale, independent of tonic
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    scale: Scale,
    step_offsets: Vec<i32>,
    scale_offsets: Vec<i32>,
    chord_qualities: Vec<ChordQuality>,
    scale_degree_mapping: Option<Vec<f32>>,
}

impl Mode {
    /// Derive the mode for a scale
    pub fn new(scale: Scale) -> Self {
        let (step_offsets, scale_degree_mapping) = Self::offsets_and_mapping(scale);
        let scale_offsets = Self::cumulative_offsets(&step_offsets);
        let chord_qualities = Self::chord_qualities_for(&step_offsets);

        Self {
            scale,
            step_offsets,
            scale_offsets,
            chord_qualities,
            scale_degree_mapping,
        }
    }

    fn offsets_and_mapping(scale: Scale) -> (Vec<i32>, Option<Vec<f32>>) {
        if let Some(position) = scale.diatonic_position() {
            return (rotated(&MAJOR_STEP_OFFSETS, position), None);
        }

        match scale {
            Scale::MajPentatonic => (
                merge_steps(&rotated(&MAJOR_STEP_OFFSETS, 0), &[2, 5]),
                Some(vec![1.0, 2.0, 3.0, 5.0, 6.0]),
            ),
            Scale::MinPentatonic => (
                merge_steps(&rotated(&MAJOR_STEP_OFFSETS, 5), &[0, 4]),
                Some(vec![1.0, 3.0, 4.0, 5.0, 7.0]),
            ),
            Scale::WholeTone => (
                WHOLE_TONE_OFFSETS.to_vec(),
                Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            ),
            Scale::Chromatic => (
                CHROMATIC_OFFSETS.to_vec(),
                Some(vec![1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0]),
            ),
            Scale::Diminished => (
                DIMINISHED_OFFSETS.to_vec(),
                Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 6.5, 7.0]),
            ),
            _ => (GS_OFFSETS.to_vec(), None),
        }
    }

    fn cumulative_offsets(step_offsets: &[i32]) -> Vec<i32> {
        step_offsets
            .iter()
            .scan(0, |sum, step| {
                let offset = *sum;
                *sum += step;
                Some(offset)
            })
            .collect()
    }

    /// Triad quality on each degree: stack two steps for the third, the
    /// next two for the fifth.
    fn chord_qualities_for(step_offsets: &[i32]) -> Vec<ChordQuality> {
        (0..step_offsets.len())
            .map(|i| {
                let current = rotated(step_offsets, i);
                let third: i32 = current.iter().take(2).sum();
                let fifth: i32 = current.iter().skip(2).take(2).sum();
                ChordQuality::from_stacked_steps(third as u8, fifth as u8)
            })
            .collect()
    }

    /// Get the scale this mode was derived from
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Get the scale name
    pub fn name(&self) -> &'static str {
        self.scale.name()
    }

    /// Semitone steps between consecutive degrees
    pub fn step_offsets(&self) -> &[i32] {
        &self.step_offsets
    }

    /// Semitones of each degree above the tonic
    pub fn scale_offsets(&self) -> &[i32] {
        &self.scale_offsets
    }

    /// Triad quality per degree
    pub fn chord_qualities(&self) -> &[ChordQuality] {
        &self.chord_qualities
    }

    /// Letter mapping for scales that are not heptatonic
    pub fn scale_degree_mapping(&self) -> Option<&[f32]> {
        self.scale_degree_mapping.as_deref()
    }

    /// Number of degrees per octave
    pub fn len(&self) -> usize {
        self.scale_offsets.len()
    }

    /// Check if this mode has no degrees (never true for a built-in scale)
    pub fn is_empty(&self) -> bool {
        self.scale_offsets.is_empty()
    }

    /// Index into per-degree tables for a signed degree. Positive degrees
    /// count up from the tonic, negative ones count back from the top.
    pub fn degree_index(&self, degree: i32) -> usize {
        let len = self.len().max(1) as i32;
        if degree > 0 {
            ((degree - 1) % len) as usize
        } else {
            degree.rem_euclid(len) as usize
        }
    }

    /// Triad quality for a signed degree
    pub fn quality_at(&self, degree: i32) -> Option<&ChordQuality> {
        self.chord_qualities.get(self.degree_index(degree))
    }
}

impl From<Scale> for Mode {
    fn from(scale: Scale) -> Self {
        Mode::new(scale)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scale)
    }
}

/// Copy of `values` rotated left by `by` places
pub fn rotated<T: Clone>(values: &[T], by: usize) -> Vec<T> {
    let mut copy = values.to_vec();
    if !copy.is_empty() {
        let by = by % copy.len();
        copy.rotate_left(by);
    }
    copy
}

/// Merge each listed step with the one following it
fn merge_steps(steps: &[i32], starts: &[usize]) -> Vec<i32> {
    let mut merged = Vec::with_capacity(steps.len());
    let mut i = 0;
    while i < steps.len() {
        if starts.contains(&i) && i + 1 < steps.len() {
            merged.push(steps[i] + steps[i + 1]);
            i += 2;
        } else {
            merged.push(steps[i]);
            i += 1;
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(mode: &Mode) -> Vec<String> {
        mode.chord_qualities().iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_mode_properties() {
        let aeolian = Mode::new(Scale::Aeolian);
        assert_eq!(aeolian.scale(), Scale::Aeolian);
        assert_eq!(aeolian.name(), "Aeolian");
        assert_eq!(aeolian.len(), 7);
    }

    #[test]
    fn test_major_and_ionian() {
        for scale in [Scale::Major, Scale::Ionian] {
            let mode = Mode::new(scale);
            assert_eq!(mode.step_offsets(), &[2, 2, 1, 2, 2, 2, 1]);
            assert_eq!(mode.scale_offsets(), &[0, 2, 4, 5, 7, 9, 11]);
            assert_eq!(labels(&mode), vec!["M", "m", "m", "M", "M", "m", "dim"]);
            assert!(mode.scale_degree_mapping().is_none());
        }
    }

    #[test]
    fn test_minor_and_aeolian() {
        for scale in [Scale::Minor, Scale::Aeolian] {
            let mode = Mode::new(scale);
            assert_eq!(mode.step_offsets(), &[2, 1, 2, 2, 1, 2, 2]);
            assert_eq!(mode.scale_offsets(), &[0, 2, 3, 5, 7, 8, 10]);
            assert_eq!(labels(&mode), vec!["m", "dim", "M", "m", "m", "M", "M"]);
        }
    }

    #[test]
    fn test_church_modes() {
        let dorian = Mode::new(Scale::Dorian);
        assert_eq!(dorian.scale_offsets(), &[0, 2, 3, 5, 7, 9, 10]);
        assert_eq!(labels(&dorian), vec!["m", "m", "M", "M", "m", "dim", "M"]);

        let phrygian = Mode::new(Scale::Phrygian);
        assert_eq!(phrygian.scale_offsets(), &[0, 1, 3, 5, 7, 8, 10]);
        assert_eq!(labels(&phrygian), vec!["m", "M", "M", "m", "dim", "M", "m"]);

        let lydian = Mode::new(Scale::Lydian);
        assert_eq!(lydian.scale_offsets(), &[0, 2, 4, 6, 7, 9, 11]);
        assert_eq!(labels(&lydian), vec!["M", "M", "m", "dim", "M", "m", "m"]);

        let mixolydian = Mode::new(Scale::Mixolydian);
        assert_eq!(mixolydian.scale_offsets(), &[0, 2, 4, 5, 7, 9, 10]);
        assert_eq!(labels(&mixolydian), vec!["M", "m", "dim", "M", "m", "m", "M"]);

        let locrian = Mode::new(Scale::Locrian);
        assert_eq!(locrian.scale_offsets(), &[0, 1, 3, 5, 6, 8, 10]);
        assert_eq!(labels(&locrian), vec!["dim", "M", "m", "m", "M", "M", "m"]);
    }

    #[test]
    fn test_pentatonics() {
        let major = Mode::new(Scale::MajPentatonic);
        assert_eq!(major.step_offsets(), &[2, 2, 3, 2, 3]);
        assert_eq!(major.scale_offsets(), &[0, 2, 4, 7, 9]);
        assert_eq!(labels(&major), vec!["m/3", "sus2/2", "sus2/2", "M/5", "sus2/2"]);

        let minor = Mode::new(Scale::MinPentatonic);
        assert_eq!(minor.scale_offsets(), &[0, 3, 5, 7, 10]);
        assert_eq!(labels(&minor), vec!["sus2/2", "m/3", "sus2/2", "sus2/2", "M/5"]);
        assert_eq!(minor.scale_degree_mapping(), Some(&[1.0, 3.0, 4.0, 5.0, 7.0][..]));
    }

    #[test]
    fn test_symmetric_scales() {
        let whole_tone = Mode::new(Scale::WholeTone);
        assert_eq!(whole_tone.scale_offsets(), &[0, 2, 4, 6, 8, 10]);
        assert!(labels(&whole_tone).iter().all(|q| q == "aug"));

        let diminished = Mode::new(Scale::Diminished);
        assert_eq!(diminished.scale_offsets(), &[0, 2, 3, 5, 6, 8, 9, 11]);
        assert_eq!(labels(&diminished), vec!["dim"; 8]);

        let chromatic = Mode::new(Scale::Chromatic);
        assert_eq!(chromatic.scale_offsets(), &(0..12).collect::<Vec<_>>()[..]);
        assert_eq!(labels(&chromatic), vec!["WT"; 12]);
    }

    #[test]
    fn test_gs() {
        let gs = Mode::new(Scale::GS);
        assert_eq!(gs.scale_offsets(), &[0, 1, 3, 4, 5, 8, 9]);
        assert_eq!(labels(&gs), vec!["m5bb", "m", "sus25b", "aug", "aug", "M", "M"]);
    }

    #[test]
    fn test_offsets_invariants() {
        for scale in Scale::ALL {
            let mode = Mode::new(scale);
            assert_eq!(mode.scale_offsets().len(), mode.step_offsets().len());
            assert_eq!(mode.chord_qualities().len(), mode.len());
            assert_eq!(mode.scale_offsets()[0], 0);
            assert!(mode.scale_offsets().windows(2).all(|w| w[0] < w[1]));
            assert!(mode.scale_offsets().iter().all(|&o| (0..12).contains(&o)));
            assert_eq!(mode.step_offsets().iter().sum::<i32>(), 12);
            if let Some(mapping) = mode.scale_degree_mapping() {
                assert_eq!(mapping.len(), mode.len());
            }
        }
    }

    #[test]
    fn test_quality_at_negative_degrees() {
        let major = Mode::new(Scale::Major);
        assert_eq!(major.quality_at(1), Some(&ChordQuality::Major));
        assert_eq!(major.quality_at(9), Some(&ChordQuality::Minor));
        assert_eq!(major.quality_at(-1), Some(&ChordQuality::Diminished));
        assert_eq!(major.quality_at(-7), Some(&ChordQuality::Major));
    }

    #[test]
    fn test_scale_from_str() {
        assert_eq!(Scale::from_str("major"), Some(Scale::Major));
        assert_eq!(Scale::from_str("Minor"), Some(Scale::Minor));
        assert_eq!(Scale::from_str("whole-tone"), Some(Scale::WholeTone));
        assert_eq!(Scale::from_str("Pentatonic Minor"), Some(Scale::MinPentatonic));
        assert_eq!(Scale::from_str("GS"), Some(Scale::GS));
        assert_eq!(Scale::from_str("unknown"), None);
    }

    #[test]
    fn test_rotated() {
        assert_eq!(rotated(&[1, 2, 3, 4, 5], 2), vec![3, 4, 5, 1, 2]);
        assert_eq!(rotated(&[1, 2, 3], 4), vec![2, 3, 1]);
        assert!(rotated::<i32>(&[], 3).is_empty());
    }
}
