/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::borrow::Cow;
use std::io::{self, Read};

use serde_json::{json, Value};

use super::{CssInput, Token, TokenExtra, Tokenizer, TokenizerOptions, TokenType};


const STYLESHEET: &str = r#"@charset "utf-8";
<!-- @import url("theme.css") screen; -->
@media (min-width: 40em) and (max-width: 1.5E3px) {
    #main > .card:not(.hidden)::after,
    a[href^='https://'], a[data-x|="en"] {
        content: "\201C quoted \
continued";
        background: url( img/bg\).png ) no-repeat, url(data:bad"url) 0 0;
        margin: -.5em +2px 0 calc(100% - 3rem);
        unicode-range: U+0025-00FF, u+4??, U+26-25;
        color: #ff0 !important; /* comment */ /*/ unterminated
"#;


/// Tokenizes a whole input, checking that every call consumes input
/// until the end is reached within `chars + 2` calls, and that the end is sticky.
struct ExhaustionCheck {
    verbose: bool,
}

impl ExhaustionCheck {
    fn new(verbose: bool) -> ExhaustionCheck {
        ExhaustionCheck { verbose }
    }

    fn run<'i>(&self, input: &'i CssInput<'_>) -> Vec<Token<'i>> {
        self.run_with_options(input, TokenizerOptions::default())
    }

    fn run_with_options<'i>(&self, input: &'i CssInput<'_>, options: TokenizerOptions) -> Vec<Token<'i>> {
        let mut tokenizer = Tokenizer::with_options(input, options);
        let limit = input.as_str().chars().count() + 2;
        let mut tokens = Vec::new();
        let mut consumed = String::new();
        for _ in 0..limit {
            let start = tokenizer.position();
            let token = tokenizer.next_token();
            let span = tokenizer.slice_from(start);
            if self.verbose {
                println!("{:?} {:?} {:?}", tokenizer.current_source_location(), span, token);
            }
            match token {
                Token::EndOfInput => {
                    assert_eq!(consumed, input.as_str());
                    assert_eq!(tokenizer.next_token(), Token::EndOfInput);
                    assert_eq!(tokenizer.next_token(), Token::EndOfInput);
                    return tokens
                }
                Token::Error(_) => assert!(span.is_empty() && tokenizer.is_eof()),
                _ => assert!(!span.is_empty(), "{:?} consumed nothing", token),
            }
            consumed.push_str(span);
            tokens.push(token);
        }
        panic!("no end of input after {} calls for {:?}", limit, input.as_str())
    }
}


fn token_to_json(token: &Token) -> Value {
    let mut json = vec![json!(token.token_type().name()), json!(token.value())];
    if let Some(extra) = token.extra() {
        json.push(match extra {
            TokenExtra::Numeric { non_integer, dimension: None } => json!({"non_integer": non_integer}),
            TokenExtra::Numeric { non_integer, dimension: Some(unit) } => {
                json!({"non_integer": non_integer, "dimension": unit})
            }
            TokenExtra::Hash { is_identifier } => json!({"is_identifier": is_identifier}),
            TokenExtra::UnicodeRange { start, end } => json!({"start": start, "end": end}),
            TokenExtra::Error => json!({}),
        })
    }
    Value::Array(json)
}


fn assert_json_eq(results: Value, expected: Value, message: &str) {
    if results != expected {
        println!("{}", difference::Changeset::new(
            &serde_json::to_string_pretty(&results).unwrap(),
            &serde_json::to_string_pretty(&expected).unwrap(),
            "\n",
        ));
        panic!("{:?}", message)
    }
}


fn run_raw_json_tests<F: Fn(Value, Value) -> ()>(json_data: &str, run: F) {
    let items = match serde_json::from_str(json_data) {
        Ok(Value::Array(items)) => items,
        other => panic!("Invalid JSON: {:?}", other),
    };
    assert!(items.len() % 2 == 0);
    let mut input = None;
    for item in items.into_iter() {
        match (&input, item) {
            (&None, json_obj) => input = Some(json_obj),
            (&Some(_), expected) => {
                let input = input.take().unwrap();
                run(input, expected)
            }
        };
    }
}


#[test]
fn tokens() {
    let check = ExhaustionCheck::new(false);
    run_raw_json_tests(include_str!("css-parsing-tests/tokens.json"), |input, expected| {
        let source = match input {
            Value::String(source) => source,
            _ => panic!("Unexpected JSON"),
        };
        let input = CssInput::new(&source);
        let results = Value::Array(check.run(&input).iter().map(token_to_json).collect());
        assert_json_eq(results, expected, &source);
    });
}


#[test]
fn stylesheet_is_exhausted() {
    let input = CssInput::new(STYLESHEET);
    let tokens = ExhaustionCheck::new(false).run(&input);
    let count = |token_type: TokenType| tokens.iter().filter(|token| token.token_type() == token_type).count();
    assert_eq!(count(TokenType::AtKeyword), 3);
    assert_eq!(count(TokenType::UnicodeRange), 3);
    assert_eq!(count(TokenType::BadUrl), 1);
    assert_eq!(count(TokenType::CDO), 1);
    assert_eq!(count(TokenType::CDC), 1);
    assert_eq!(count(TokenType::Comment), 2);
    assert!(tokens.contains(&Token::UnquotedUrl("img/bg).png".into())));
    assert!(tokens.contains(&Token::UnicodeRange(0x400, 0x4FF)));
    assert!(tokens.contains(&Token::UnicodeRange(0x26, 0x26)));
    assert!(tokens.contains(&Token::QuotedString("\u{201C}quoted continued".into())));
    assert!(tokens.contains(&Token::PrefixMatch));
    assert!(tokens.contains(&Token::DashMatch));
    assert!(!tokens.iter().any(|token| token.token_type() == TokenType::BadString));
    assert_eq!(tokens.last(), Some(&Token::Comment("/ unterminated\n")));
}


#[test]
fn stylesheet_locations() {
    let input = CssInput::new(STYLESHEET);
    let mut tokenizer = Tokenizer::with_options(&input, TokenizerOptions::new().first_line_number(0));
    loop {
        let start = tokenizer.position();
        match tokenizer.next_token() {
            Token::AtKeyword(ref name) if name == "media" => {
                let location = tokenizer.source_location(start);
                assert_eq!((location.line, location.column), (2, 1));
            }
            Token::Hash(ref value) | Token::IDHash(ref value) if value == "ff0" => {
                let location = tokenizer.source_location(start);
                assert_eq!((location.line, location.column), (10, 16));
                break
            }
            Token::EndOfInput => panic!("#ff0 not found"),
            _ => {}
        }
    }
}


#[test]
fn numeric_values() {
    let input = CssInput::new("+42 1e3 .5 99999999999 -7.0%");
    let numbers: Vec<_> = Tokenizer::new(&input).filter_map(|token| match token {
        Token::Number(value) | Token::Percentage(value) => Some(value),
        _ => None,
    }).collect();
    assert_eq!(numbers.len(), 5);
    assert_eq!((numbers[0].value, numbers[0].int_value, numbers[0].has_sign), (42., Some(42), true));
    assert_eq!((numbers[1].value, numbers[1].int_value), (1000., None));
    assert_eq!((numbers[2].value, numbers[2].representation), (0.5, ".5"));
    assert_eq!(numbers[3].int_value, Some(i32::MAX));
    assert_eq!((numbers[4].value, numbers[4].int_value, numbers[4].has_sign), (-7., None, true));
}


#[test]
fn borrows_unless_escaped() {
    let input = CssInput::new("plain esc\\61 ped");
    let mut tokenizer = Tokenizer::new(&input);
    assert!(matches!(tokenizer.next_token(), Token::Ident(Cow::Borrowed("plain"))));
    tokenizer.next_token();
    match tokenizer.next_token() {
        Token::Ident(Cow::Owned(value)) => assert_eq!(value, "escaped"),
        token => panic!("unexpected {:?}", token),
    }
}


#[test]
fn quoted_url_is_a_function() {
    let input = CssInput::new("url(  'x')");
    let mut tokenizer = Tokenizer::new(&input);
    let start = tokenizer.position();
    assert_eq!(tokenizer.next_token(), Token::Function("url".into()));
    assert_eq!(tokenizer.slice_from(start), "url(");
    assert_eq!(tokenizer.next_token(), Token::WhiteSpace(" "));
    assert_eq!(tokenizer.next_token(), Token::QuotedString("x".into()));
    assert_eq!(tokenizer.next_token(), Token::CloseParenthesis);
    assert_eq!(tokenizer.next_token(), Token::EndOfInput);
}


#[test]
fn preserved_whitespace() {
    let input = CssInput::new("a \t\r\n b\x0C");
    let options = TokenizerOptions::new().preserve_whitespace(true);
    let tokens = ExhaustionCheck::new(false).run_with_options(&input, options);
    assert_eq!(tokens, [
        Token::Ident("a".into()),
        Token::WhiteSpace(" \t\n "),
        Token::Ident("b".into()),
        Token::WhiteSpace("\n"),
    ]);
    let tokens = ExhaustionCheck::new(false).run(&input);
    assert_eq!(tokens[1], Token::WhiteSpace("\n"));
}


#[test]
fn invalid_bytes() {
    let input = CssInput::from_bytes(b"5e-\xF1");
    let tokens = ExhaustionCheck::new(false).run(&input);
    assert_eq!(tokens.len(), 1);
    match tokens[0] {
        Token::Dimension(value, ref unit) => {
            assert_eq!(value.representation, "5");
            assert_eq!(unit, "e-\u{FFFD}");
        }
        ref token => panic!("unexpected {:?}", token),
    }

    let input = CssInput::from_utf16(&[0x22, 0xDC00, 0x22]);
    assert_eq!(ExhaustionCheck::new(false).run(&input), [Token::QuotedString("\u{FFFD}".into())]);
}


#[test]
fn read_error_is_reported_once() {
    struct FailsAfter(&'static [u8]);

    impl Read for FailsAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
            let n = self.0.len().min(buf.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    let input = CssInput::from_reader_lossy(FailsAfter(b"a {"));
    let tokens = ExhaustionCheck::new(false).run(&input);
    assert_eq!(tokens, [
        Token::Ident("a".into()),
        Token::WhiteSpace(" "),
        Token::CurlyBracketBlock,
        Token::Error("disk on fire"),
    ]);
    assert!(tokens[3].is_parse_error());
    assert_eq!(tokens[3].token_type(), TokenType::Error);
    assert_eq!(tokens[3].extra(), None);

    // Nothing was read: the error is the only token.
    let input = CssInput::from_reader_lossy(FailsAfter(b""));
    let mut tokenizer = Tokenizer::new(&input);
    assert_eq!(tokenizer.next_token(), Token::Error("disk on fire"));
    assert_eq!(tokenizer.next_token(), Token::EndOfInput);
}


#[test]
fn iterator_stops_before_end() {
    let input = CssInput::new("a b");
    assert_eq!(Tokenizer::new(&input).count(), 3);
    assert_eq!(Tokenizer::new(&CssInput::new("")).next(), None);
}


#[cfg(not(feature = "skip_long_tests"))]
mod properties {
    use proptest::prelude::*;

    use super::ExhaustionCheck;
    use crate::{CssInput, Token, Tokenizer};

    proptest! {
        #[test]
        fn arbitrary_bytes_are_exhausted(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let input = CssInput::from_bytes(&bytes);
            ExhaustionCheck::new(false).run(&input);
        }

        #[test]
        fn css_like_text_is_exhausted(source in "[a-zU0-9 \t\n\r\"'()\\\\#@.+%/*<>!{}:;,?|~^$=-]{0,80}") {
            let input = CssInput::new(&source);
            ExhaustionCheck::new(false).run(&input);
        }

        #[test]
        fn escaped_ident_round_trips(name in "[a-z][a-z0-9]{0,8}", c in any::<char>()) {
            let source = format!("{}\\{:x} ", name, c as u32);
            let input = CssInput::new(&source);
            let mut tokenizer = Tokenizer::new(&input);
            let decoded = if c == '\0' { '\u{FFFD}' } else { c };
            prop_assert_eq!(tokenizer.next_token(), Token::Ident(format!("{}{}", name, decoded).into()));
            prop_assert_eq!(tokenizer.next_token(), Token::EndOfInput);
        }

        #[test]
        fn escaped_string_round_trips(c in any::<char>(), single_quote in any::<bool>()) {
            let quote = if single_quote { '\'' } else { '"' };
            // Hex digits and line breaks can only be written as hex escapes.
            let source = if c.is_ascii_hexdigit() || matches!(c, '\n' | '\r' | '\x0C' | '\0') {
                format!("{}\\{:x} {}", quote, c as u32, quote)
            } else {
                format!("{}\\{}{}", quote, c, quote)
            };
            let input = CssInput::new(&source);
            let mut tokenizer = Tokenizer::new(&input);
            let decoded = if c == '\0' { '\u{FFFD}' } else { c };
            prop_assert_eq!(tokenizer.next_token(), Token::QuotedString(decoded.to_string().into()));
            prop_assert_eq!(tokenizer.next_token(), Token::EndOfInput);
        }
    }
}
