//! Tune notation compiler
//!
//! Turns tune notation into the delta-coded opcode tables played by the
//! buzzer firmware.
//!
//! # Examples
//!
//! ```
//! use tune_compose::{compile, CompileOptions};
//!
//! let compiled = compile("4c4 8d4 2-", &CompileOptions::default()).unwrap();
//! assert_eq!(compiled.table.len(), 5);
//! assert!(compiled.output.contains("MusicElement::SetOctave(4),"));
//! ```
//!
//! # Notation
//!
//! - Records are a duration followed by a pitch: `4c4`, `8.#f5`, `2-`
//! - Durations: `1`, `2.`, `2`, `4.`, `4`, `8.`, `8`, `16`
//! - Pitches: `c d e f g a b` with an optional `#` prefix and an octave digit,
//!   or `-` for silence
//! - `//` starts a comment that is copied into the generated table
//!
//! # Pipeline
//!
//! - [`SongParser`]: lazy parser producing [`SongElement`]s
//! - [`convert_to_native`]: octave-delta conversion into [`NativeElement`]s
//! - [`encode`]: lowering to firmware opcode bytes
//! - [`OutputFormatter`]: rendering of the table declaration

pub mod element;
pub mod error;
pub mod lexer;
pub mod native;
pub mod output;
pub mod parser;
pub mod span;

#[cfg(test)]
mod parser_tests;

pub use element::{NativeElement, SongElement};
pub use error::{CompileError, ParseError, Result};
pub use lexer::{Lexer, Token};
pub use native::{convert_to_native, encode, NativeConverter, VirtualCursor};
pub use output::{array_name, OutputFormat, OutputFormatter, DEFAULT_ARRAY_NAME};
pub use parser::{parse, Elements, SongParser};
pub use span::Span;

use tune_core::{MusicElement, PlayedEvent, Player};

/// Settings for one compilation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub format: OutputFormat,
    /// Name of the generated array
    pub name: String,
    /// Play the encoded table back and check it against the source
    pub verify: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            format: OutputFormat::default(),
            name: DEFAULT_ARRAY_NAME.to_string(),
            verify: false,
        }
    }
}

/// Everything produced by a successful run
#[derive(Debug, Clone)]
pub struct Compiled {
    pub native: Vec<NativeElement>,
    /// Encoded opcodes, terminator included
    pub table: Vec<MusicElement>,
    pub output: String,
}

/// Run the whole pipeline over `source`
///
/// Nothing is produced unless every stage succeeds.
pub fn compile(source: &str, options: &CompileOptions) -> std::result::Result<Compiled, CompileError> {
    let parser = SongParser::new(source);
    let native = convert_to_native(&parser)?;
    let table = encode(&native)?;
    log::debug!(
        "encoded {} element(s) into {} opcode(s)",
        native.len(),
        table.len()
    );

    if options.verify {
        verify(&native, &table)?;
        log::info!("playback of {} verified", options.name);
    }

    let output = OutputFormatter::new(options.format).build_output(&native, &table, &options.name)?;

    Ok(Compiled {
        native,
        table,
        output,
    })
}

/// Events the player should produce for `native`
pub fn expected_events(native: &[NativeElement]) -> Vec<PlayedEvent> {
    native
        .iter()
        .filter_map(|element| match element {
            NativeElement::NativeNote {
                length, original, ..
            } => Some(PlayedEvent::Note {
                note: *original,
                ticks: length.ticks(),
            }),
            NativeElement::Silence(length) => Some(PlayedEvent::Rest {
                ticks: length.ticks(),
            }),
            _ => None,
        })
        .collect()
}

/// Decode `table` with the reference player and compare it with `native`
pub fn verify(native: &[NativeElement], table: &[MusicElement]) -> std::result::Result<(), CompileError> {
    let expected = expected_events(native);
    let played = Player::play(table)?;

    let len = expected.len().max(played.len());
    if let Some(index) = (0..len).find(|&i| expected.get(i) != played.get(i)) {
        return Err(CompileError::Mismatch {
            index,
            expected: describe(expected.get(index)),
            found: describe(played.get(index)),
        });
    }
    Ok(())
}

fn describe(event: Option<&PlayedEvent>) -> String {
    match event {
        Some(PlayedEvent::Note { note, ticks }) => format!("{} for {} ticks", note, ticks),
        Some(PlayedEvent::Rest { ticks }) => format!("rest for {} ticks", ticks),
        None => "end of tune".to_string(),
    }
}
