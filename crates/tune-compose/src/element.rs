use serde::Serialize;
use tune_core::{Note, NoteLength, Opcode};

/// One record of a parsed tune
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SongElement {
    NoteWithLength { length: NoteLength, note: Note },
    Silence(NoteLength),
    /// Full comment text including the leading `//`
    Comment(String),
}

/// Tune element after octave-delta conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NativeElement {
    /// Note played `delta` semitones from the previous note; `original` is kept
    /// for diagnostics and generated comments
    NativeNote {
        length: NoteLength,
        delta: i8,
        original: Note,
    },
    NativeSetOctave(u8),
    Silence(NoteLength),
    Comment(String),
}

impl NativeElement {
    /// Firmware opcode for this element, `None` for comments
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            NativeElement::NativeNote { length, delta, .. } => Some(Opcode::Note {
                length: *length,
                diff: *delta,
            }),
            NativeElement::NativeSetOctave(octave) => Some(Opcode::SetOctave(*octave)),
            NativeElement::Silence(length) => Some(Opcode::Silence(*length)),
            NativeElement::Comment(_) => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, NativeElement::Comment(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tune_core::Tone;

    #[test]
    fn test_opcode_mapping() {
        let note = NativeElement::NativeNote {
            length: NoteLength::Quarter,
            delta: -2,
            original: Note::new(3, Tone::ASharp),
        };
        assert_eq!(
            note.opcode(),
            Some(Opcode::Note {
                length: NoteLength::Quarter,
                diff: -2
            })
        );
        assert_eq!(NativeElement::NativeSetOctave(5).opcode(), Some(Opcode::SetOctave(5)));
        assert_eq!(
            NativeElement::Silence(NoteLength::Whole).opcode(),
            Some(Opcode::Silence(NoteLength::Whole))
        );
        assert_eq!(NativeElement::Comment("// x".into()).opcode(), None);
    }
}
