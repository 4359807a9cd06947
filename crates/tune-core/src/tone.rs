use serde::{Deserialize, Serialize};
use std::fmt;

/// Semitone within an octave
///
/// Discriminants are shared with the playback firmware's tone table and must
/// never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tone {
    C = 0,
    CSharp = 1,
    D = 2,
    DSharp = 3,
    E = 4,
    F = 5,
    FSharp = 6,
    G = 7,
    GSharp = 8,
    A = 9,
    ASharp = 10,
    B = 11,
}

/// Notation markers accepted by the parser (sharps only where the scale has one)
const MARKERS: [(&str, Tone); 12] = [
    ("c", Tone::C),
    ("#c", Tone::CSharp),
    ("d", Tone::D),
    ("#d", Tone::DSharp),
    ("e", Tone::E),
    ("f", Tone::F),
    ("#f", Tone::FSharp),
    ("g", Tone::G),
    ("#g", Tone::GSharp),
    ("a", Tone::A),
    ("#a", Tone::ASharp),
    ("b", Tone::B),
];

impl Tone {
    pub const COUNT: u8 = 12;

    pub const ALL: [Tone; 12] = [
        Tone::C,
        Tone::CSharp,
        Tone::D,
        Tone::DSharp,
        Tone::E,
        Tone::F,
        Tone::FSharp,
        Tone::G,
        Tone::GSharp,
        Tone::A,
        Tone::ASharp,
        Tone::B,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Tone> {
        Tone::ALL.get(ordinal as usize).copied()
    }

    /// Look up a pitch marker without its octave digit, e.g. `"#f"`
    pub fn from_marker(marker: &str) -> Option<Tone> {
        MARKERS
            .iter()
            .find(|(m, _)| *m == marker)
            .map(|(_, tone)| *tone)
    }

    /// Name used in generated comments (`Cs` rather than `C#`)
    pub fn short_name(self) -> &'static str {
        match self {
            Tone::C => "C",
            Tone::CSharp => "Cs",
            Tone::D => "D",
            Tone::DSharp => "Ds",
            Tone::E => "E",
            Tone::F => "F",
            Tone::FSharp => "Fs",
            Tone::G => "G",
            Tone::GSharp => "Gs",
            Tone::A => "A",
            Tone::ASharp => "As",
            Tone::B => "B",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_firmware_table() {
        for (i, tone) in Tone::ALL.iter().enumerate() {
            assert_eq!(tone.ordinal() as usize, i);
            assert_eq!(Tone::from_ordinal(i as u8), Some(*tone));
        }
        assert_eq!(Tone::GSharp.ordinal(), 8);
        assert_eq!(Tone::from_ordinal(Tone::COUNT), None);
    }

    #[test]
    fn test_markers() {
        assert_eq!(Tone::from_marker("c"), Some(Tone::C));
        assert_eq!(Tone::from_marker("#a"), Some(Tone::ASharp));
        assert_eq!(Tone::from_marker("#e"), None);
        assert_eq!(Tone::from_marker("#b"), None);
        assert_eq!(Tone::from_marker("C"), None);
        assert_eq!(Tone::from_marker("h"), None);
    }
}
