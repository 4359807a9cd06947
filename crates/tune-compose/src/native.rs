//! Octave-delta conversion
//!
//! The firmware stores each note as a 4-bit signed step from the previous
//! note. When a step does not fit, an explicit octave opcode moves the
//! player's current note to C of a nearby octave and the step is taken from
//! there instead.

use crate::element::{NativeElement, SongElement};
use crate::error::Result;
use tune_core::{EncodeError, MusicElement, Note, NoteLength, Tone, DELTA_RANGE};

/// The converter's notion of the note the player is currently on
///
/// Starts one octave below the lowest playable note so the first real note is
/// always out of delta range and gets an explicit octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualCursor {
    note_id: i32,
}

impl VirtualCursor {
    /// Virtual note C in octave -1
    pub const SENTINEL: VirtualCursor = VirtualCursor {
        note_id: -(Tone::COUNT as i32),
    };

    pub fn at(note: Note) -> Self {
        VirtualCursor {
            note_id: note.note_id(),
        }
    }

    pub fn note_id(&self) -> i32 {
        self.note_id
    }

    pub fn diff_to(&self, note: Note) -> i32 {
        note.note_id() - self.note_id
    }
}

impl Default for VirtualCursor {
    fn default() -> Self {
        VirtualCursor::SENTINEL
    }
}

/// Octave to reset to before playing `note`
///
/// Tones above G are reached downwards from C of the next octave.
pub fn reset_octave(note: Note) -> u8 {
    if note.tone.ordinal() > Tone::G.ordinal() {
        note.octave + 1
    } else {
        note.octave
    }
}

/// Streaming converter from song elements to native elements
#[derive(Debug, Default)]
pub struct NativeConverter {
    cursor: VirtualCursor,
    elements: Vec<NativeElement>,
    octave_resets: usize,
}

impl NativeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: SongElement) {
        match element {
            SongElement::NoteWithLength { length, note } => self.push_note(length, note),
            SongElement::Silence(length) => self.elements.push(NativeElement::Silence(length)),
            SongElement::Comment(text) => self.elements.push(NativeElement::Comment(text)),
        }
    }

    fn push_note(&mut self, length: NoteLength, note: Note) {
        let mut diff = self.cursor.diff_to(note);

        if !DELTA_RANGE.contains(&diff) {
            let octave = reset_octave(note);
            self.elements.push(NativeElement::NativeSetOctave(octave));
            self.octave_resets += 1;
            diff = VirtualCursor::at(Note::new(octave, Tone::C)).diff_to(note);
        }
        debug_assert!(DELTA_RANGE.contains(&diff), "delta {} after reset", diff);

        self.elements.push(NativeElement::NativeNote {
            length,
            delta: diff as i8,
            original: note,
        });
        // Later deltas are measured from the note played, not the reset point
        self.cursor = VirtualCursor::at(note);
    }

    pub fn octave_resets(&self) -> usize {
        self.octave_resets
    }

    pub fn finish(self) -> Vec<NativeElement> {
        self.elements
    }
}

/// Convert a (possibly lazy) element stream, stopping at the first parse error
pub fn convert_to_native<I>(elements: I) -> Result<Vec<NativeElement>>
where
    I: IntoIterator<Item = Result<SongElement>>,
{
    let mut converter = NativeConverter::new();
    for element in elements {
        converter.push(element?);
    }
    log::debug!(
        "converted tune with {} octave reset(s)",
        converter.octave_resets()
    );
    Ok(converter.finish())
}

/// Lower native elements to the firmware opcode table, terminator included
pub fn encode(elements: &[NativeElement]) -> std::result::Result<Vec<MusicElement>, EncodeError> {
    let mut table = elements
        .iter()
        .filter_map(NativeElement::opcode)
        .map(MusicElement::encode)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    table.push(MusicElement::terminate());
    Ok(table)
}
