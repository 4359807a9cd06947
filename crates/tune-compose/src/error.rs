use crate::span::Span;
use thiserror::Error;
use tune_core::{DecodeError, EncodeError};

pub type Result<T> = std::result::Result<T, ParseError>;

/// Positioned failure while reading tune notation
///
/// Every variant points at the start of the record (or stray token) that could
/// not be read, never at the character inside it that broke the match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown note length in '{found}' at {span}")]
    UnknownLength { found: String, span: Span },

    #[error("Unknown tone in '{found}' at {span}")]
    UnknownTone { found: String, span: Span },

    #[error("Invalid octave in '{found}' at {span}")]
    InvalidOctave { found: String, span: Span },

    #[error("Unexpected '{found}' at {span}")]
    UnexpectedInput { found: String, span: Span },
}

impl ParseError {
    pub fn unknown_length(found: impl Into<String>, span: Span) -> Self {
        ParseError::UnknownLength {
            found: found.into(),
            span,
        }
    }

    pub fn unknown_tone(found: impl Into<String>, span: Span) -> Self {
        ParseError::UnknownTone {
            found: found.into(),
            span,
        }
    }

    pub fn invalid_octave(found: impl Into<String>, span: Span) -> Self {
        ParseError::InvalidOctave {
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_input(found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedInput {
            found: found.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::UnknownLength { span, .. }
            | ParseError::UnknownTone { span, .. }
            | ParseError::InvalidOctave { span, .. }
            | ParseError::UnexpectedInput { span, .. } => *span,
        }
    }

    /// Byte offset of the offending token
    pub fn position(&self) -> usize {
        self.span().start
    }

    /// 0-based line of the offending token within `source`
    pub fn line(&self, source: &str) -> usize {
        self.span().line(source)
    }
}

/// Failure of a whole compilation run
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to encode opcode table: {0}")]
    Encode(#[from] EncodeError),

    #[error("Encoded table cannot be played back: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encoded table diverges at event {index}: expected {expected}, played {found}")]
    Mismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
