use crate::element::NativeElement;
use crate::error::CompileError;
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;
use tune_core::{MusicElement, Opcode};

/// Array name used when the output has no file name to derive one from
pub const DEFAULT_ARRAY_NAME: &str = "SONG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `MusicElement` constructor calls, for firmware that includes song.hpp
    #[default]
    Cpp,
    /// Raw opcode bytes in hex
    Bytes,
    /// Native elements and encoded bytes as JSON
    Json,
}

/// Derive the table name from the output path: `songs/jingle_bells.inc` → `JINGLE_BELLS`
pub fn array_name(output: &str) -> String {
    if output == "-" {
        return DEFAULT_ARRAY_NAME.to_string();
    }

    let stem = Path::new(output)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let mut name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() {
        return DEFAULT_ARRAY_NAME.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Number of opcodes a table occupies: everything but comments, plus the terminator
pub fn opcode_count(elements: &[NativeElement]) -> usize {
    elements.iter().filter(|e| !e.is_comment()).count() + 1
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn build_output(
        &self,
        elements: &[NativeElement],
        table: &[MusicElement],
        name: &str,
    ) -> Result<String, CompileError> {
        match self.format {
            OutputFormat::Cpp => Ok(build_table(
                elements,
                table,
                name,
                format_cpp_line,
                "MusicElement::Terminate()",
            )),
            OutputFormat::Bytes => {
                let terminator = format!(
                    "0x{:02X}   // {}",
                    MusicElement::terminate().code(),
                    Opcode::Terminate
                );
                Ok(build_table(elements, table, name, format_byte_line, &terminator))
            }
            OutputFormat::Json => self.build_output_json(elements, table, name),
        }
    }

    fn build_output_json(
        &self,
        elements: &[NativeElement],
        table: &[MusicElement],
        name: &str,
    ) -> Result<String, CompileError> {
        #[derive(Serialize)]
        struct JsonOutput<'a> {
            name: &'a str,
            elements: &'a [NativeElement],
            bytes: &'a [MusicElement],
        }

        let output = JsonOutput {
            name,
            elements,
            bytes: table,
        };
        let mut json = serde_json::to_string_pretty(&output)?;
        json.push('\n');
        Ok(json)
    }
}

/// Render the declaration with one line per element
///
/// `table` holds the encoded opcodes in element order (comments have none).
fn build_table(
    elements: &[NativeElement],
    table: &[MusicElement],
    name: &str,
    line: fn(&NativeElement, Option<MusicElement>) -> String,
    terminator: &str,
) -> String {
    let mut output = format!(
        "\n\nconst uint8_t {}[{}] PROGMEM = {{\n",
        name,
        opcode_count(elements)
    );

    let mut codes = table.iter().copied();
    for element in elements {
        let code = if element.is_comment() { None } else { codes.next() };
        output.push_str("    ");
        output.push_str(&line(element, code));
        output.push('\n');
    }

    output.push_str(&format!("\n    {}\n}};\n", terminator));
    output
}

fn format_cpp_line(element: &NativeElement, _code: Option<MusicElement>) -> String {
    match element {
        NativeElement::NativeNote {
            length,
            delta,
            original,
        } => format!(
            "MusicElement{{NoteLength::{}, {}}},  // {}",
            length.name(),
            delta,
            original
        ),
        NativeElement::NativeSetOctave(octave) => format!("MusicElement::SetOctave({}),", octave),
        NativeElement::Silence(length) => {
            format!("MusicElement::Silence(NoteLength::{}),", length.name())
        }
        NativeElement::Comment(text) => text.clone(),
    }
}

fn format_byte_line(element: &NativeElement, code: Option<MusicElement>) -> String {
    match (element, element.opcode(), code) {
        (NativeElement::NativeNote { original, .. }, Some(opcode), Some(code)) => {
            format!("0x{:02X},  // {} {}", code.code(), opcode, original)
        }
        (_, Some(opcode), Some(code)) => format!("0x{:02X},  // {}", code.code(), opcode),
        (NativeElement::Comment(text), _, _) => text.clone(),
        _ => String::new(),
    }
}
