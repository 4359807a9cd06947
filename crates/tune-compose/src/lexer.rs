use crate::span::Span;
use logos::Logos;
use tune_core::NoteLength;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum Token {
    // Duration marker; the longest match keeps `2.` from lexing as `2` + `.`
    #[regex(r"1|2\.?|4\.?|8\.?|16", |lex| NoteLength::from_marker(lex.slice()))]
    Length(NoteLength),

    // Tone plus octave digit, the tone itself is checked by the parser
    #[regex(r"#?[a-g][0-9]")]
    Pitch,

    #[token("-")]
    Rest,

    #[regex(r"//[^\n]*")]
    Comment,

    Error,
}

/// Lexer wrapper with position tracking
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
    peeked: Option<Option<(Token, Span)>>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            inner: Token::lexer(source),
            peeked: None,
        }
    }

    pub fn next_token(&mut self) -> Option<(Token, Span)> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }

        let token = self.inner.next()?;
        let span = Span::from(self.inner.span());
        Some((token.unwrap_or(Token::Error), span))
    }

    pub fn peek_token(&mut self) -> Option<(Token, Span)> {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_token());
        }
        self.peeked.as_ref().and_then(|x| *x)
    }

    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    pub fn slice(&self, span: Span) -> &'source str {
        &self.source()[span.to_range()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some((token, _)) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_lex_records() {
        assert_eq!(
            lex("4c4 8d4 2-"),
            vec![
                Token::Length(NoteLength::Quarter),
                Token::Pitch,
                Token::Length(NoteLength::Eighth),
                Token::Pitch,
                Token::Length(NoteLength::Half),
                Token::Rest,
            ]
        );
    }

    #[test]
    fn test_lex_dotted_before_plain() {
        assert_eq!(
            lex("2.#f5 16a3"),
            vec![
                Token::Length(NoteLength::HalfDot),
                Token::Pitch,
                Token::Length(NoteLength::Sixteenth),
                Token::Pitch,
            ]
        );
    }

    #[test]
    fn test_lex_comment_keeps_line() {
        let mut lexer = Lexer::new("// intro\n4c4");
        let (token, span) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Comment);
        assert_eq!(lexer.slice(span), "// intro");
        assert_eq!(lexer.next_token().unwrap().0, Token::Length(NoteLength::Quarter));
    }

    #[test]
    fn test_lex_unknown_input() {
        let tokens = lex("4x5");
        assert_eq!(tokens[0], Token::Length(NoteLength::Quarter));
        assert_eq!(tokens[1], Token::Error);
    }

    #[test]
    fn test_lex_uppercase_is_error() {
        assert_eq!(lex("C4")[0], Token::Error);
    }

    #[test]
    fn test_lexer_spans_are_adjacent() {
        let mut lexer = Lexer::new("8.g2");
        let (_, length) = lexer.next_token().unwrap();
        let (_, pitch) = lexer.next_token().unwrap();
        assert_eq!(length, Span::new(0, 2));
        assert!(length.touches(pitch));
        assert_eq!(lexer.slice(pitch), "g2");
    }

    #[test]
    fn test_lexer_peek() {
        let mut lexer = Lexer::new("4c4");
        let (token, _) = lexer.peek_token().unwrap();
        assert_eq!(token, Token::Length(NoteLength::Quarter));
        let (token, _) = lexer.peek_token().unwrap();
        assert_eq!(token, Token::Length(NoteLength::Quarter));
        let (token, _) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Length(NoteLength::Quarter));
        let (token, _) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Pitch);
        assert!(lexer.next_token().is_none());
    }
}
