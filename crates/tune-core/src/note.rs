use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An absolute pitch: octave plus tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub octave: u8,
    pub tone: Tone,
}

impl Note {
    pub fn new(octave: u8, tone: Tone) -> Self {
        Note { octave, tone }
    }

    /// Absolute semitone index, `octave * 12 + tone`
    pub fn note_id(&self) -> i32 {
        self.octave as i32 * Tone::COUNT as i32 + self.tone.ordinal() as i32
    }

    /// Inverse of [`Note::note_id`]
    pub fn from_note_id(id: i32) -> Option<Note> {
        let octave = u8::try_from(id.div_euclid(Tone::COUNT as i32)).ok()?;
        let tone = Tone::from_ordinal(id.rem_euclid(Tone::COUNT as i32) as u8)?;
        Some(Note::new(octave, tone))
    }

    /// Move by `diff` semitones, carrying into the octave
    pub fn offset(&self, diff: i8) -> Option<Note> {
        Note::from_note_id(self.note_id() + diff as i32)
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.note_id().cmp(&other.note_id())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tone.short_name(), self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_id() {
        assert_eq!(Note::new(0, Tone::C).note_id(), 0);
        assert_eq!(Note::new(4, Tone::D).note_id(), 50);
    }

    #[test]
    fn test_ordering_follows_pitch() {
        assert!(Note::new(3, Tone::B) < Note::new(4, Tone::C));
        assert!(Note::new(4, Tone::CSharp) > Note::new(4, Tone::C));
    }

    #[test]
    fn test_offset_carries_octave() {
        let b3 = Note::new(3, Tone::B);
        assert_eq!(b3.offset(1), Some(Note::new(4, Tone::C)));
        assert_eq!(b3.offset(-8), Some(Note::new(3, Tone::DSharp)));
        assert_eq!(Note::new(4, Tone::C).offset(-1), Some(Note::new(3, Tone::B)));
        assert_eq!(Note::new(0, Tone::D).offset(-3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Note::new(4, Tone::CSharp).to_string(), "Cs4");
        assert_eq!(Note::new(0, Tone::A).to_string(), "A0");
    }
}
