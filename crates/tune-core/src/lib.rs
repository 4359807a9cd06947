//! Core types shared between the tune compiler and the playback firmware
//!
//! The firmware stores songs as tables of one-byte opcodes and decodes them
//! purely by position, so the ordinals defined here are part of a binary
//! contract.
//!
//! # Examples
//!
//! ```
//! use tune_core::{MusicElement, NoteLength, Player, PlayedEvent, Note, Tone};
//!
//! let table = [
//!     MusicElement::set_octave(4).unwrap(),
//!     MusicElement::note(NoteLength::Quarter, 2).unwrap(),
//!     MusicElement::terminate(),
//! ];
//!
//! let events = Player::play(&table).unwrap();
//! assert_eq!(events, vec![PlayedEvent::Note { note: Note::new(4, Tone::D), ticks: 8 }]);
//! ```
//!
//! # Main Components
//!
//! - **Tone** / **NoteLength**: the firmware's enumerations with pinned ordinals
//! - **Note**: absolute pitch with a total order by semitone
//! - **MusicElement**: one encoded opcode byte, see [`opcode`] for the layout
//! - **Player**: reference decoder that replays an opcode table

pub mod length;
pub mod note;
pub mod opcode;
pub mod player;
pub mod tone;

pub use length::NoteLength;
pub use note::Note;
pub use opcode::{EncodeError, MusicElement, Opcode, DELTA_RANGE};
pub use player::{DecodeError, PlayedEvent, Player};
pub use tone::Tone;
