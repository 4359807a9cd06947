//! Reference decoder for opcode tables
//!
//! Walks a table the same way the firmware's music routine does and yields
//! the notes and rests it would sound. Playback stops at the terminator
//! instead of restarting the song.

use crate::note::Note;
use crate::opcode::{MusicElement, Opcode};
use crate::tone::Tone;
use serde::Serialize;
use thiserror::Error;

/// Loop nesting supported by the firmware; deeper loop starts are ignored
pub const MAX_NESTED_LOOPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayedEvent {
    Note { note: Note, ticks: u8 },
    Rest { ticks: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid opcode 0x{code:02X} at offset {offset}")]
    InvalidOpcode { code: u8, offset: usize },

    #[error("table ends at offset {0} without a terminator")]
    MissingTerminator(usize),

    #[error("note at offset {0} leaves the playable range")]
    NoteOutOfRange(usize),
}

#[derive(Debug, Clone, Copy)]
struct LoopState {
    start: usize,
    remaining: u8,
}

/// Iterator over the events of an opcode table
pub struct Player<'a> {
    table: &'a [MusicElement],
    position: usize,
    current: Note,
    loops: Vec<LoopState>,
    finished: bool,
}

impl<'a> Player<'a> {
    pub fn new(table: &'a [MusicElement]) -> Self {
        Player {
            table,
            position: 0,
            current: Note::new(0, Tone::C),
            loops: Vec::with_capacity(MAX_NESTED_LOOPS),
            finished: false,
        }
    }

    /// Decode the whole table up to its terminator
    pub fn play(table: &'a [MusicElement]) -> Result<Vec<PlayedEvent>, DecodeError> {
        Player::new(table).collect()
    }

    fn step(&mut self) -> Result<Option<PlayedEvent>, DecodeError> {
        loop {
            let offset = self.position;
            let element = *self
                .table
                .get(offset)
                .ok_or(DecodeError::MissingTerminator(offset))?;
            let opcode = element.decode().ok_or(DecodeError::InvalidOpcode {
                code: element.code(),
                offset,
            })?;
            self.position += 1;

            match opcode {
                Opcode::Terminate => return Ok(None),
                Opcode::BeginLoop(count) => {
                    if self.loops.len() < MAX_NESTED_LOOPS {
                        self.loops.push(LoopState {
                            start: self.position,
                            remaining: count,
                        });
                    }
                }
                Opcode::EndLoop => {
                    if let Some(current) = self.loops.last_mut() {
                        if current.remaining == 0 {
                            self.loops.pop();
                        } else {
                            current.remaining -= 1;
                            self.position = current.start;
                        }
                    }
                }
                Opcode::SetOctave(octave) => {
                    self.current = Note::new(octave, Tone::C);
                }
                Opcode::Silence(length) => {
                    return Ok(Some(PlayedEvent::Rest {
                        ticks: length.ticks(),
                    }));
                }
                Opcode::Note { length, diff } => {
                    self.current = self
                        .current
                        .offset(diff)
                        .ok_or(DecodeError::NoteOutOfRange(offset))?;
                    return Ok(Some(PlayedEvent::Note {
                        note: self.current,
                        ticks: length.ticks(),
                    }));
                }
            }
        }
    }
}

impl Iterator for Player<'_> {
    type Item = Result<PlayedEvent, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
