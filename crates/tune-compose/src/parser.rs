use crate::element::SongElement;
use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token};
use crate::span::Span;
use tune_core::{Note, NoteLength, Tone};

/// Parser for tune notation
///
/// Parsing is lazy: iterating over `&SongParser` reads one element at a time.
/// Each new iteration starts over from the beginning of the source.
pub struct SongParser<'source> {
    source: &'source str,
}

impl<'source> SongParser<'source> {
    pub fn new(source: &'source str) -> Self {
        SongParser { source }
    }

    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Start a fresh pass over the source
    pub fn elements(&self) -> Elements<'source> {
        Elements {
            lexer: Lexer::new(self.source),
            offset: 0,
            failed: false,
        }
    }
}

impl<'source> IntoIterator for &SongParser<'source> {
    type Item = Result<SongElement>;
    type IntoIter = Elements<'source>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}

/// Parse a whole tune into its elements
pub fn parse(source: &str) -> Result<Vec<SongElement>> {
    SongParser::new(source).elements().collect()
}

/// One pass over a tune source
///
/// Yields elements until the end of input. After the first error the pass is
/// over and `next` keeps returning `None`.
pub struct Elements<'source> {
    lexer: Lexer<'source>,
    offset: usize,
    failed: bool,
}

impl<'source> Elements<'source> {
    /// Byte offset just past the last element read
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn parse_element(&mut self) -> Result<Option<SongElement>> {
        let Some((token, span)) = self.lexer.next_token() else {
            return Ok(None);
        };

        let element = match token {
            Token::Comment => {
                let text = self.lexer.slice(span).trim_end_matches('\r');
                self.offset = span.end;
                SongElement::Comment(text.to_string())
            }
            Token::Length(length) => self.parse_record(length, span)?,
            // A pitch without a duration in front of it
            Token::Pitch | Token::Rest => {
                let (found, group) = self.group(span.start);
                return Err(ParseError::unknown_length(found, group));
            }
            Token::Error => return Err(self.unrecognized_record(span.start)),
        };

        Ok(Some(element))
    }

    fn parse_record(&mut self, length: NoteLength, length_span: Span) -> Result<SongElement> {
        match self.lexer.peek_token() {
            Some((Token::Rest, span)) if length_span.touches(span) => {
                self.lexer.next_token();
                self.offset = span.end;
                Ok(SongElement::Silence(length))
            }
            Some((Token::Pitch, span)) if length_span.touches(span) => {
                self.lexer.next_token();
                let note = self.parse_pitch(length_span.start, span)?;
                self.offset = span.end;
                Ok(SongElement::NoteWithLength { length, note })
            }
            _ => Err(self.unrecognized_pitch(length_span.start, length_span.end)),
        }
    }

    fn parse_pitch(&self, record_start: usize, span: Span) -> Result<Note> {
        let marker = self.lexer.slice(span);
        let (tone_marker, octave_digit) = marker.split_at(marker.len() - 1);

        let tone = Tone::from_marker(tone_marker).ok_or_else(|| {
            let (found, group) = self.group(record_start);
            ParseError::unknown_tone(found, group)
        })?;
        let octave = octave_digit.parse::<u8>().map_err(|_| {
            let (found, group) = self.group(record_start);
            ParseError::invalid_octave(found, group)
        })?;

        Ok(Note::new(octave, tone))
    }

    /// Error for input that is not a record, positioned at `start`
    fn unrecognized_record(&self, start: usize) -> ParseError {
        let (found, group) = self.group(start);
        match found.chars().next() {
            Some(c) if c.is_ascii_digit() || c == '.' => ParseError::unknown_length(found, group),
            _ => ParseError::unexpected_input(found, group),
        }
    }

    /// Error for a duration marker not followed by a valid pitch marker
    fn unrecognized_pitch(&self, record_start: usize, pitch_start: usize) -> ParseError {
        let (found, group) = self.group(record_start);
        let pitch = &self.lexer.source()[pitch_start..];
        let letter = pitch.strip_prefix('#').unwrap_or(pitch).chars().next();

        match letter {
            Some('a'..='g') => ParseError::invalid_octave(found, group),
            Some(c) if c.is_ascii_digit() || c == '.' => ParseError::unknown_length(found, group),
            _ => ParseError::unknown_tone(found, group),
        }
    }

    /// The whitespace-delimited group of characters starting at `start`
    fn group(&self, start: usize) -> (&'source str, Span) {
        let rest = &self.lexer.source()[start..];
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        (&rest[..len], Span::new(start, start + len))
    }
}

impl Iterator for Elements<'_> {
    type Item = Result<SongElement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.parse_element() {
            Ok(element) => element.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
