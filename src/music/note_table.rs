// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Static note lookup data.
//!
//! Every MIDI number maps to a General-MIDI octave (octave -2 at MIDI 0)
//! and a default sharp-biased name. The enharmonic candidate groups and
//! letter order drive key spelling; the numerals label chord degrees.

/// Lowest valid MIDI note number
pub const MIDI_MIN: i32 = 0;

/// Highest valid MIDI note number
pub const MIDI_MAX: i32 = 127;

/// Default (sharp) name for each pitch class
pub const CHROMATIC_SCALE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Natural letters in MIDI order
pub const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Acceptable spellings for each pitch class, one per neighbouring letter
pub const SCALE_NOTE_CANDIDATES: [&[&str]; 12] = [
    &["B#", "C", "Dbb"],
    &["C#", "Db"],
    &["Cx", "D", "Ebb"],
    &["D#", "Eb"],
    &["Dx", "E", "Fb"],
    &["E#", "F", "Gbb"],
    &["F#", "Gb"],
    &["Fx", "G", "Abb"],
    &["G#", "Ab"],
    &["Gx", "A", "Bbb"],
    &["A#", "Bb", "Cbb"],
    &["Ax", "B", "Cb"],
];

/// Roman numerals for scale positions 1-12
pub const CHORD_NUMERALS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// One row of the note table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEntry {
    pub octave: i32,
    pub name: &'static str,
    pub midi: i32,
}

/// Every MIDI note 0-127 in index order
pub static NOTE_TABLE: [NoteEntry; 128] = build_table();

const fn build_table() -> [NoteEntry; 128] {
    let mut table = [NoteEntry { octave: -2, name: "C", midi: 0 }; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = NoteEntry {
            octave: (i / 12) as i32 - 2,
            name: CHROMATIC_SCALE[i % 12],
            midi: i as i32,
        };
        i += 1;
    }
    table
}

/// Look up a MIDI note, if it is in range
pub fn lookup(midi: i32) -> Option<&'static NoteEntry> {
    if !(MIDI_MIN..=MIDI_MAX).contains(&midi) {
        return None;
    }
    NOTE_TABLE.get(midi as usize)
}

/// Pitch class (0-11) of a spelled note name, e.g. "Eb" -> 3, "B#" -> 0
pub fn pitch_class_of(name: &str) -> Option<usize> {
    SCALE_NOTE_CANDIDATES
        .iter()
        .position(|group| group.contains(&name))
}

/// Roman numeral for a 1-based scale position
pub fn numeral(position: usize) -> Option<&'static str> {
    position.checked_sub(1).and_then(|i| CHORD_NUMERALS.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_in_midi_order() {
        for (i, entry) in NOTE_TABLE.iter().enumerate() {
            assert_eq!(entry.midi, i as i32);
        }
    }

    #[test]
    fn test_table_octaves() {
        assert_eq!(NOTE_TABLE[0].octave, -2);
        assert_eq!(NOTE_TABLE[0].name, "C");
        assert_eq!(NOTE_TABLE[60].octave, 3);
        assert_eq!(NOTE_TABLE[69].name, "A");
        assert_eq!(NOTE_TABLE[127].octave, 8);
        assert_eq!(NOTE_TABLE[127].name, "G");
    }

    #[test]
    fn test_lookup_bounds() {
        assert!(lookup(-1).is_none());
        assert!(lookup(128).is_none());
        assert_eq!(lookup(61).map(|e| e.name), Some("C#"));
    }

    #[test]
    fn test_pitch_class_of() {
        assert_eq!(pitch_class_of("C"), Some(0));
        assert_eq!(pitch_class_of("B#"), Some(0));
        assert_eq!(pitch_class_of("Eb"), Some(3));
        assert_eq!(pitch_class_of("Fx"), Some(7));
        assert_eq!(pitch_class_of("H"), None);
    }

    #[test]
    fn test_numerals() {
        assert_eq!(numeral(1), Some("I"));
        assert_eq!(numeral(7), Some("VII"));
        assert_eq!(numeral(12), Some("XII"));
        assert_eq!(numeral(0), None);
        assert_eq!(numeral(13), None);
    }
}
