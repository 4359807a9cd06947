//! One-byte opcodes consumed by the playback firmware
//!
//! Every opcode is a single byte. The high nibble selects the control type,
//! the low nibble is its parameter:
//!
//! ```text
//! | 7 | 6 | 5 | 4 | 3 | 2 | 1 | 0 |
//! | T | T | T | T | P | P | P | P |
//! ```
//!
//! | T | meaning | P |
//! |---|---------|---|
//! | 0 | flow | `0` terminate, `1..=14` begin loop (repeat count), `15` end loop |
//! | 1 | set octave | octave, current note becomes C of that octave |
//! | 2 | silence | [`NoteLength`] ordinal |
//! | 3..=10 | note of length `T - 3` | delta from the previous note plus 8 |
//!
//! The decoder has no other metadata, so these values are frozen.

use crate::length::NoteLength;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Semitone deltas that fit the 4-bit note parameter
pub const DELTA_RANGE: RangeInclusive<i32> = -8..=7;

/// Bias added to a delta before it is stored in the parameter nibble
const DELTA_BIAS: i32 = 8;

const PARAM_MASK: u8 = 0x0F;

/// Highest value a parameter nibble can hold
pub const PARAM_MAX: u8 = PARAM_MASK;

pub const CONTROL_FLOW_TERMINATE: u8 = 0x00;
pub const CONTROL_FLOW_LOOP_END: u8 = 0x0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ControlType {
    Flow = 0,
    SetOctave = 1,
    Silence = 2,
}

/// First control value used for notes; note length ordinals are added to it
pub const NOTE_START: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("note delta {0} does not fit in {min}..={max}", min = DELTA_RANGE.start(), max = DELTA_RANGE.end())]
    DeltaOutOfRange(i32),

    #[error("octave {0} does not fit in a 4-bit parameter")]
    OctaveOutOfRange(i32),

    #[error("loop count {0} must be between 1 and 14")]
    LoopCountOutOfRange(u8),
}

/// Decoded form of a [`MusicElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    Terminate,
    BeginLoop(u8),
    EndLoop,
    SetOctave(u8),
    Silence(NoteLength),
    Note { length: NoteLength, diff: i8 },
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Terminate => write!(f, "Terminate"),
            Opcode::BeginLoop(count) => write!(f, "BeginLoop({})", count),
            Opcode::EndLoop => write!(f, "EndLoop"),
            Opcode::SetOctave(octave) => write!(f, "SetOctave({})", octave),
            Opcode::Silence(length) => write!(f, "Silence({})", length),
            Opcode::Note { length, diff } => write!(f, "Note({}, {:+})", length, diff),
        }
    }
}

/// A single encoded opcode byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MusicElement(u8);

impl MusicElement {
    pub fn from_code(code: u8) -> Self {
        MusicElement(code)
    }

    pub fn code(self) -> u8 {
        self.0
    }

    fn control(control: ControlType, param: u8) -> Self {
        MusicElement(((control as u8) << 4) | (param & PARAM_MASK))
    }

    pub fn terminate() -> Self {
        MusicElement::control(ControlType::Flow, CONTROL_FLOW_TERMINATE)
    }

    pub fn end_loop() -> Self {
        MusicElement::control(ControlType::Flow, CONTROL_FLOW_LOOP_END)
    }

    /// Start a loop whose body is played `count` more times
    pub fn begin_loop(count: u8) -> Result<Self, EncodeError> {
        if count == CONTROL_FLOW_TERMINATE || count >= CONTROL_FLOW_LOOP_END {
            return Err(EncodeError::LoopCountOutOfRange(count));
        }
        Ok(MusicElement::control(ControlType::Flow, count))
    }

    pub fn set_octave(octave: i32) -> Result<Self, EncodeError> {
        let param = u8::try_from(octave)
            .ok()
            .filter(|o| *o <= PARAM_MAX)
            .ok_or(EncodeError::OctaveOutOfRange(octave))?;
        Ok(MusicElement::control(ControlType::SetOctave, param))
    }

    pub fn silence(length: NoteLength) -> Self {
        MusicElement::control(ControlType::Silence, length.ordinal())
    }

    pub fn note(length: NoteLength, diff: i32) -> Result<Self, EncodeError> {
        if !DELTA_RANGE.contains(&diff) {
            return Err(EncodeError::DeltaOutOfRange(diff));
        }
        let param = (diff + DELTA_BIAS) as u8;
        Ok(MusicElement(((NOTE_START + length.ordinal()) << 4) | param))
    }

    pub fn encode(opcode: Opcode) -> Result<Self, EncodeError> {
        match opcode {
            Opcode::Terminate => Ok(MusicElement::terminate()),
            Opcode::BeginLoop(count) => MusicElement::begin_loop(count),
            Opcode::EndLoop => Ok(MusicElement::end_loop()),
            Opcode::SetOctave(octave) => MusicElement::set_octave(octave as i32),
            Opcode::Silence(length) => Ok(MusicElement::silence(length)),
            Opcode::Note { length, diff } => MusicElement::note(length, diff as i32),
        }
    }

    pub fn control_code(self) -> u8 {
        self.0 >> 4
    }

    pub fn param(self) -> u8 {
        self.0 & PARAM_MASK
    }

    pub fn note_diff(self) -> i8 {
        self.param() as i8 - DELTA_BIAS as i8
    }

    /// `None` for control codes above the last note length
    pub fn decode(self) -> Option<Opcode> {
        let param = self.param();
        match self.control_code() {
            c if c == ControlType::Flow as u8 => Some(match param {
                CONTROL_FLOW_TERMINATE => Opcode::Terminate,
                CONTROL_FLOW_LOOP_END => Opcode::EndLoop,
                count => Opcode::BeginLoop(count),
            }),
            c if c == ControlType::SetOctave as u8 => Some(Opcode::SetOctave(param)),
            c if c == ControlType::Silence as u8 => {
                NoteLength::from_ordinal(param).map(Opcode::Silence)
            }
            c => NoteLength::from_ordinal(c - NOTE_START).map(|length| Opcode::Note {
                length,
                diff: self.note_diff(),
            }),
        }
    }
}

impl From<MusicElement> for u8 {
    fn from(element: MusicElement) -> Self {
        element.0
    }
}
