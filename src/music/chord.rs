// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord qualities, chord request tokens and built chords.
//!
//! Qualities form a closed vocabulary keyed by interval signature (the
//! semitone distance of every chord tone from the lowest one). The same
//! labels are used by `Mode` for its per-degree triads and by `Key` when
//! it labels a chord it has built.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::note::MidiNote;
use super::note_table;
use crate::error::{Result, TheoryError};

/// Interval names for 1-20 semitones
const INTERVAL_NAMES: [&str; 20] = [
    "m2", "M2", "m3", "M3", "P4", "dim5", "P5", "m6", "M6", "m7", "M7", "oct", "m9", "M9", "m10",
    "M10", "m11", "M11", "m12", "M12",
];

/// Widest interval with a name
pub const MAX_INTERVAL: u8 = 20;

/// Chord quality vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ChordQuality {
    /// "M" 0:4:7
    Major,
    /// "m" 0:3:7
    Minor,
    /// "dim" 0:3:6
    Diminished,
    /// "aug" 0:4:8
    Augmented,
    /// "sus2" 0:2:7
    Sus2,
    /// "sus4" 0:5:7
    Sus4,
    /// "m/3" 0:4:9, minor triad over its third
    MinorOverThird,
    /// "M/5" 0:5:9, major triad over its fifth
    MajorOverFifth,
    /// "sus2/2" 0:5:10, sus2 over its second
    Sus2OverSecond,
    /// "WT" 0:2:4
    WholeTone,
    /// "m5bb" 0:3:5
    MinorDoubleFlatFive,
    /// "sus25b" 0:2:6
    Sus2FlatFive,
    /// "pow" 0:7:12
    Power,
    /// Two-note interval of 1-20 semitones ("m2" .. "M12", "oct" at 12)
    Interval(u8),
    /// Any shape outside the vocabulary, labelled by its signature
    Unnamed(Vec<u8>),
}

impl ChordQuality {
    /// Named three-note qualities, in lookup order
    const TRIADS: [ChordQuality; 13] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::MinorOverThird,
        ChordQuality::MajorOverFifth,
        ChordQuality::Sus2OverSecond,
        ChordQuality::WholeTone,
        ChordQuality::MinorDoubleFlatFive,
        ChordQuality::Sus2FlatFive,
        ChordQuality::Power,
    ];

    /// Semitone offsets of each chord tone from the lowest
    pub fn intervals(&self) -> Vec<u8> {
        match self {
            ChordQuality::Major => vec![0, 4, 7],
            ChordQuality::Minor => vec![0, 3, 7],
            ChordQuality::Diminished => vec![0, 3, 6],
            ChordQuality::Augmented => vec![0, 4, 8],
            ChordQuality::Sus2 => vec![0, 2, 7],
            ChordQuality::Sus4 => vec![0, 5, 7],
            ChordQuality::MinorOverThird => vec![0, 4, 9],
            ChordQuality::MajorOverFifth => vec![0, 5, 9],
            ChordQuality::Sus2OverSecond => vec![0, 5, 10],
            ChordQuality::WholeTone => vec![0, 2, 4],
            ChordQuality::MinorDoubleFlatFive => vec![0, 3, 5],
            ChordQuality::Sus2FlatFive => vec![0, 2, 6],
            ChordQuality::Power => vec![0, 7, 12],
            ChordQuality::Interval(n) => vec![0, *n],
            ChordQuality::Unnamed(signature) => signature.clone(),
        }
    }

    /// Look up a quality from an interval signature
    pub fn from_intervals(signature: &[u8]) -> Self {
        if let [0, n] = signature {
            if (1..=MAX_INTERVAL).contains(n) {
                return ChordQuality::Interval(*n);
            }
        }

        Self::TRIADS
            .iter()
            .find(|quality| quality.intervals() == signature)
            .cloned()
            .unwrap_or_else(|| ChordQuality::Unnamed(signature.to_vec()))
    }

    /// Look up a quality from the semitones root->third and third->fifth
    pub fn from_stacked_steps(third: u8, fifth: u8) -> Self {
        Self::from_intervals(&[0, third, third + fifth])
    }

    /// Derive the quality of a set of MIDI notes
    pub fn of_midi(midi: &[MidiNote]) -> Self {
        let mut sorted = midi.to_vec();
        sorted.sort_unstable();
        let lowest = sorted.first().copied().unwrap_or(0);
        let signature: Vec<u8> = sorted
            .iter()
            .map(|&m| (m - lowest).clamp(0, u8::MAX as i32) as u8)
            .collect();
        Self::from_intervals(&signature)
    }

    /// Parse a quality label ("M", "m/3", "P5", "oct", "0:1:5", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        let quality = match s {
            "M" => ChordQuality::Major,
            "m" => ChordQuality::Minor,
            "dim" => ChordQuality::Diminished,
            "aug" => ChordQuality::Augmented,
            "sus2" => ChordQuality::Sus2,
            "sus4" => ChordQuality::Sus4,
            "m/3" => ChordQuality::MinorOverThird,
            "M/5" => ChordQuality::MajorOverFifth,
            "sus2/2" => ChordQuality::Sus2OverSecond,
            "WT" => ChordQuality::WholeTone,
            "m5bb" => ChordQuality::MinorDoubleFlatFive,
            "sus25b" => ChordQuality::Sus2FlatFive,
            "pow" => ChordQuality::Power,
            _ => {
                if let Some(i) = INTERVAL_NAMES.iter().position(|&name| name == s) {
                    ChordQuality::Interval(i as u8 + 1)
                } else if s.contains(':') {
                    let signature = s
                        .split(':')
                        .map(|part| part.parse::<u8>().ok())
                        .collect::<Option<Vec<u8>>>()?;
                    Self::from_intervals(&signature)
                } else {
                    return None;
                }
            }
        };
        Some(quality)
    }

    /// The label used in the external vocabulary
    pub fn label(&self) -> String {
        match self {
            ChordQuality::Major => "M".to_string(),
            ChordQuality::Minor => "m".to_string(),
            ChordQuality::Diminished => "dim".to_string(),
            ChordQuality::Augmented => "aug".to_string(),
            ChordQuality::Sus2 => "sus2".to_string(),
            ChordQuality::Sus4 => "sus4".to_string(),
            ChordQuality::MinorOverThird => "m/3".to_string(),
            ChordQuality::MajorOverFifth => "M/5".to_string(),
            ChordQuality::Sus2OverSecond => "sus2/2".to_string(),
            ChordQuality::WholeTone => "WT".to_string(),
            ChordQuality::MinorDoubleFlatFive => "m5bb".to_string(),
            ChordQuality::Sus2FlatFive => "sus25b".to_string(),
            ChordQuality::Power => "pow".to_string(),
            ChordQuality::Interval(n) => INTERVAL_NAMES
                .get((*n as usize).wrapping_sub(1))
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("0:{}", n)),
            ChordQuality::Unnamed(signature) => signature
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(":"),
        }
    }

    /// Index (into the sorted chord tones) of the acoustic root
    pub fn root_index(&self) -> usize {
        match self {
            ChordQuality::MinorOverThird | ChordQuality::Sus2OverSecond => 2,
            ChordQuality::MajorOverFifth => 1,
            _ => 0,
        }
    }

    /// Roman numeral label for a chord built on a 1-based scale position
    pub fn degree_label(&self, position: usize) -> String {
        let numeral = match note_table::numeral(position) {
            Some(numeral) => numeral.to_string(),
            None => return format!("{}{}", position, self),
        };
        let lower = numeral.to_lowercase();

        match self {
            ChordQuality::Major => numeral,
            ChordQuality::MajorOverFifth => format!("{}/5", numeral),
            ChordQuality::Minor => lower,
            ChordQuality::MinorOverThird => format!("{}/3", lower),
            ChordQuality::MinorDoubleFlatFive => format!("{}5bb", lower),
            ChordQuality::Augmented => format!("{}+", numeral),
            ChordQuality::Diminished => format!("{}o", lower),
            ChordQuality::Sus2 | ChordQuality::Sus2OverSecond | ChordQuality::Sus2FlatFive => {
                format!("{}{}", numeral, self)
            }
            ChordQuality::Sus4 => format!("{}sus4", numeral),
            ChordQuality::WholeTone => format!("{}WT", lower),
            ChordQuality::Power | ChordQuality::Interval(_) | ChordQuality::Unnamed(_) => {
                format!("{}{}", position, self)
            }
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<ChordQuality> for String {
    fn from(quality: ChordQuality) -> Self {
        quality.label()
    }
}

impl TryFrom<String> for ChordQuality {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self> {
        ChordQuality::from_str(&value).ok_or(TheoryError::UnknownChordType(value))
    }
}

/// What kind of chord to build on a scale degree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordType {
    /// "T": stack scale degrees d, d+2, d+4
    Triad,
    /// "dyadN": root plus N semitones
    Dyad(u8),
    /// "oct": root plus its octave
    Octave,
    /// "pow": root, fifth and octave
    Power,
    /// Any quality label: stack that quality's semitones on the degree
    Quality(ChordQuality),
}

impl ChordType {
    /// Parse a chord token from the external string vocabulary
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        let chord_type = match token {
            "T" => ChordType::Triad,
            "oct" => ChordType::Octave,
            "pow" => ChordType::Power,
            _ => {
                if let Some(size) = token.strip_prefix("dyad") {
                    match size.parse::<u8>() {
                        Ok(n) if (1..=MAX_INTERVAL).contains(&n) => ChordType::Dyad(n),
                        _ => return Err(TheoryError::UnknownChordType(token.to_string())),
                    }
                } else {
                    match ChordQuality::from_str(token) {
                        Some(ChordQuality::Unnamed(_)) | None => {
                            return Err(TheoryError::UnknownChordType(token.to_string()))
                        }
                        Some(quality) => ChordType::Quality(quality),
                    }
                }
            }
        };
        Ok(chord_type)
    }

    /// Fixed semitone offsets, or `None` when tones come from the scale
    pub fn fixed_intervals(&self) -> Option<Vec<u8>> {
        match self {
            ChordType::Triad => None,
            ChordType::Dyad(n) => Some(vec![0, *n]),
            ChordType::Octave => Some(vec![0, 12]),
            ChordType::Power => Some(ChordQuality::Power.intervals()),
            ChordType::Quality(quality) => Some(quality.intervals()),
        }
    }
}

/// A chord built within a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    /// Chord tones, ascending
    pub midi: Vec<MidiNote>,
    /// Quality label
    pub quality: ChordQuality,
    /// Spelled name of the acoustic root
    pub root: String,
    /// Roman numeral label
    pub degree: String,
    /// Octaves the chord was transposed by
    #[serde(default)]
    pub transposition: i32,
}
