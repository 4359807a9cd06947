use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration class of a note or silence
///
/// The firmware indexes its duration table by this ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NoteLength {
    Whole = 0,
    HalfDot = 1,
    Half = 2,
    QuarterDot = 3,
    Quarter = 4,
    EighthDot = 5,
    Eighth = 6,
    Sixteenth = 7,
}

/// Duration markers, dotted forms listed ahead of their plain prefix
const MARKERS: [(&str, NoteLength); 8] = [
    ("1", NoteLength::Whole),
    ("2.", NoteLength::HalfDot),
    ("2", NoteLength::Half),
    ("4.", NoteLength::QuarterDot),
    ("4", NoteLength::Quarter),
    ("8.", NoteLength::EighthDot),
    ("8", NoteLength::Eighth),
    ("16", NoteLength::Sixteenth),
];

impl NoteLength {
    pub const ALL: [NoteLength; 8] = [
        NoteLength::Whole,
        NoteLength::HalfDot,
        NoteLength::Half,
        NoteLength::QuarterDot,
        NoteLength::Quarter,
        NoteLength::EighthDot,
        NoteLength::Eighth,
        NoteLength::Sixteenth,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<NoteLength> {
        NoteLength::ALL.get(ordinal as usize).copied()
    }

    pub fn from_marker(marker: &str) -> Option<NoteLength> {
        MARKERS
            .iter()
            .find(|(m, _)| *m == marker)
            .map(|(_, length)| *length)
    }

    /// Symbolic name of the `NoteLength` enumerator in the firmware headers
    pub fn name(self) -> &'static str {
        match self {
            NoteLength::Whole => "WHOLE",
            NoteLength::HalfDot => "HALF_DOT",
            NoteLength::Half => "HALF",
            NoteLength::QuarterDot => "QUARTER_DOT",
            NoteLength::Quarter => "QUARTER",
            NoteLength::EighthDot => "EIGHTH_DOT",
            NoteLength::Eighth => "EIGHTH",
            NoteLength::Sixteenth => "SIXTEENTH",
        }
    }

    /// Playback duration in player ticks (a sixteenth is two ticks)
    pub fn ticks(self) -> u8 {
        match self {
            NoteLength::Whole => 32,
            NoteLength::HalfDot => 16 + 8,
            NoteLength::Half => 16,
            NoteLength::QuarterDot => 8 + 4,
            NoteLength::Quarter => 8,
            NoteLength::EighthDot => 4 + 2,
            NoteLength::Eighth => 4,
            NoteLength::Sixteenth => 2,
        }
    }
}

impl fmt::Display for NoteLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
