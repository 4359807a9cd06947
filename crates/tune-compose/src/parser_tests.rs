// Parser cases taken from the tunes shipped with the firmware

#[cfg(test)]
mod tests {
    use crate::element::SongElement;
    use crate::error::ParseError;
    use crate::parser::{parse, SongParser};
    use crate::span::Span;
    use tune_core::{Note, NoteLength, Tone};

    fn note(length: NoteLength, octave: u8, tone: Tone) -> SongElement {
        SongElement::NoteWithLength {
            length,
            note: Note::new(octave, tone),
        }
    }

    fn assert_parses(input: &str) {
        if let Err(e) = parse(input) {
            panic!("Failed to parse '{}': {}", input, e)
        }
    }

    fn error_of(input: &str) -> ParseError {
        match parse(input) {
            Ok(elements) => panic!("Expected parse to fail for '{}', got {:?}", input, elements),
            Err(e) => e,
        }
    }

    #[test]
    fn test_basic_sequence() {
        assert_eq!(
            parse("4c4 8d4 2-").unwrap(),
            vec![
                note(NoteLength::Quarter, 4, Tone::C),
                note(NoteLength::Eighth, 4, Tone::D),
                SongElement::Silence(NoteLength::Half),
            ]
        );
    }

    #[test]
    fn test_all_lengths() {
        let lengths: Vec<NoteLength> = parse("1- 2.- 2- 4.- 4- 8.- 8- 16-")
            .unwrap()
            .into_iter()
            .map(|e| match e {
                SongElement::Silence(length) => length,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(lengths, NoteLength::ALL.to_vec());
    }

    #[test]
    fn test_sharps() {
        assert_eq!(
            parse("4#c5 8.#g3 16#a0").unwrap(),
            vec![
                note(NoteLength::Quarter, 5, Tone::CSharp),
                note(NoteLength::EighthDot, 3, Tone::GSharp),
                note(NoteLength::Sixteenth, 0, Tone::ASharp),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_optional_between_records() {
        assert_eq!(parse("4c48d4").unwrap(), parse("4c4 8d4").unwrap());
        assert_parses("  \t4c4\r\n\n   8e4\t");
        assert_parses("");
        assert_parses("   \n ");
    }

    #[test]
    fn test_any_unicode_whitespace_separates_records() {
        let expected = vec![
            note(NoteLength::Quarter, 4, Tone::C),
            note(NoteLength::Quarter, 4, Tone::D),
        ];
        assert_eq!(parse("4c4\u{b}4d4").unwrap(), expected);
        assert_eq!(parse("4c4\u{a0}4d4").unwrap(), expected);
        assert_eq!(parse("\u{2003}4c4\u{3000}\u{85}4d4\u{a0}").unwrap(), expected);
    }

    #[test]
    fn test_comments_are_kept() {
        let elements = parse("// Silent night\n2.g4 // bar 1\r\n4a4").unwrap();
        assert_eq!(
            elements,
            vec![
                SongElement::Comment("// Silent night".into()),
                note(NoteLength::HalfDot, 4, Tone::G),
                SongElement::Comment("// bar 1".into()),
                note(NoteLength::Quarter, 4, Tone::A),
            ]
        );
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(
            parse("4c4 // end").unwrap().last(),
            Some(&SongElement::Comment("// end".into()))
        );
    }

    #[test]
    fn test_invalid_tone_letter() {
        let err = error_of("4x5");
        assert!(matches!(err, ParseError::UnknownTone { .. }));
        assert_eq!(err.position(), 0);
        assert_eq!(err.span(), Span::new(0, 3));
        assert_eq!(err.line("4x5"), 0);
    }

    #[test]
    fn test_error_line_counts_newlines() {
        let source = "4c4\n8d4\n// comment\n  4x5 4c4";
        let err = error_of(source);
        assert_eq!(err.position(), 21);
        assert_eq!(err.line(source), 3);
    }

    #[test]
    fn test_uppercase_and_missing_sharps_rejected() {
        assert!(matches!(error_of("4C4"), ParseError::UnknownTone { .. }));
        assert!(matches!(error_of("4#e4"), ParseError::UnknownTone { .. }));
        assert!(matches!(error_of("4#b4"), ParseError::UnknownTone { .. }));
        assert!(matches!(error_of("4 c4"), ParseError::UnknownTone { .. }));
    }

    #[test]
    fn test_unknown_lengths() {
        for input in ["3c4", "32c4", "1.c4", "16.c4", "12c4", "c4", "-"] {
            let err = error_of(input);
            assert!(
                matches!(err, ParseError::UnknownLength { .. }),
                "'{}' gave {:?}",
                input,
                err
            );
            assert_eq!(err.position(), 0);
        }
    }

    #[test]
    fn test_invalid_octave() {
        for input in ["4c", "4cx", "4#f", "4c 8d4"] {
            let err = error_of(input);
            assert!(
                matches!(err, ParseError::InvalidOctave { .. }),
                "'{}' gave {:?}",
                input,
                err
            );
            assert_eq!(err.position(), 0);
        }
    }

    #[test]
    fn test_error_points_at_offending_record() {
        let err = error_of("4c4 8d4 4q4 2-");
        assert_eq!(err.position(), 8);

        // The extra digit starts a new record that has no valid duration
        let err = error_of("4c45");
        assert!(matches!(err, ParseError::UnknownLength { .. }));
        assert_eq!(err.position(), 3);

        let err = error_of("4c4 x");
        assert!(matches!(err, ParseError::UnexpectedInput { .. }));
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn test_lazy_elements_before_error() {
        let parser = SongParser::new("4c4 2- 4x5 8d4");
        let mut elements = parser.elements();
        assert_eq!(elements.next(), Some(Ok(note(NoteLength::Quarter, 4, Tone::C))));
        assert_eq!(elements.next(), Some(Ok(SongElement::Silence(NoteLength::Half))));
        assert_eq!(elements.offset(), 6);
        assert!(matches!(elements.next(), Some(Err(ParseError::UnknownTone { .. }))));
        assert_eq!(elements.next(), None);
    }

    #[test]
    fn test_parser_restarts_from_beginning() {
        let parser = SongParser::new("4c4 8d4");
        let first: Vec<_> = (&parser).into_iter().collect();
        let second: Vec<_> = (&parser).into_iter().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }
}
