/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// https://drafts.csswg.org/css-syntax/#tokenization

use std::borrow::Cow;
use std::cell::Cell;
use std::ops::Range;

use phf::phf_map;
use smallvec::SmallVec;

use crate::input::{CssInput, InputStream, REPLACEMENT_CHAR};
use crate::token::{NumericValue, Token};
use crate::token::Token::*;


/// Configuration of a `Tokenizer`.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerOptions {
    /// Return the whitespace text as written (after preprocessing)
    /// instead of a single `"\n"` or `" "`.
    pub preserve_whitespace: bool,

    /// The line number of the first line, for `SourceLocation`.
    pub first_line_number: u32,
}

impl Default for TokenizerOptions {
    fn default() -> TokenizerOptions {
        TokenizerOptions {
            preserve_whitespace: false,
            first_line_number: 1,
        }
    }
}

impl TokenizerOptions {
    /// The default options.
    pub fn new() -> TokenizerOptions {
        TokenizerOptions::default()
    }

    /// Set `preserve_whitespace`.
    pub fn preserve_whitespace(mut self, preserve: bool) -> TokenizerOptions {
        self.preserve_whitespace = preserve;
        self
    }

    /// Set `first_line_number`.
    pub fn first_line_number(mut self, line: u32) -> TokenizerOptions {
        self.first_line_number = line;
        self
    }
}


/// Breaks a `CssInput` into tokens, one `next_token` call at a time.
///
/// Tokenization never fails: malformed input becomes `BadString` or `BadUrl` tokens
/// and scanning resumes right after them.
/// Every call before the end consumes at least one code point,
/// so a full run takes at most one call per code point, plus the final `EndOfInput`.
///
/// ```
/// use csstokenizer::{CssInput, Token, Tokenizer};
///
/// let input = CssInput::new("a{}");
/// let mut tokenizer = Tokenizer::new(&input);
/// assert_eq!(tokenizer.next_token(), Token::Ident("a".into()));
/// assert_eq!(tokenizer.next_token(), Token::CurlyBracketBlock);
/// assert_eq!(tokenizer.next_token(), Token::CloseCurlyBracket);
/// assert_eq!(tokenizer.next_token(), Token::EndOfInput);
/// assert_eq!(tokenizer.next_token(), Token::EndOfInput);
/// ```
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    stream: InputStream<'a>,
    options: TokenizerOptions,
    /// Reported once, when the rest of the input is exhausted.
    pending_error: Option<&'a str>,
    /// Cache for `source_location()`
    last_known_line_break: Cell<(u32, usize)>,
}


impl<'a> Tokenizer<'a> {
    /// A tokenizer with the default options.
    #[inline]
    pub fn new(input: &'a CssInput<'_>) -> Tokenizer<'a> {
        Tokenizer::with_options(input, TokenizerOptions::default())
    }

    /// A tokenizer with the given options.
    pub fn with_options(input: &'a CssInput<'_>, options: TokenizerOptions) -> Tokenizer<'a> {
        Tokenizer {
            stream: InputStream::new(input.as_str()),
            options,
            pending_error: input.read_error(),
            last_known_line_break: Cell::new((options.first_line_number, 0)),
        }
    }

    /// The options this tokenizer was created with.
    #[inline]
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Consume and return the next token.
    ///
    /// At the end of the input this returns `EndOfInput`, on this call and every later one.
    pub fn next_token(&mut self) -> Token<'a> {
        if self.stream.is_eof() {
            return match self.pending_error.take() {
                Some(message) => Error(message),
                None => EndOfInput,
            }
        }
        next_token(&mut self.stream, &self.options)
    }

    /// Whether the whole input has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.stream.is_eof()
    }

    #[inline]
    /// The current position in the preprocessed input.
    pub fn position(&self) -> SourcePosition {
        SourcePosition(self.stream.position())
    }

    /// The preprocessed text between `start_pos` and the current position.
    #[inline]
    pub fn slice_from(&self, start_pos: SourcePosition) -> &'a str {
        self.slice(start_pos..self.position())
    }

    /// The preprocessed text in `range`.
    ///
    /// Returns an empty string if `range` does not come from this tokenizer's input.
    #[inline]
    pub fn slice(&self, range: Range<SourcePosition>) -> &'a str {
        self.stream.input().get(range.start.0..range.end.0).unwrap_or("")
    }

    /// The line and column of the current position.
    #[inline]
    pub fn current_source_location(&self) -> SourceLocation {
        self.source_location(self.position())
    }

    /// The line and column of `position`.
    pub fn source_location(&self, position: SourcePosition) -> SourceLocation {
        let input = self.stream.input();
        let target = position.0.min(input.len());
        let (mut line_number, mut line_start) = self.last_known_line_break.get();
        if target < line_start {
            line_number = self.options.first_line_number;
            line_start = 0;
        }
        let mut source = input.get(line_start..target).unwrap_or("");
        while let Some(newline_position) = source.find('\n') {
            source = &source[newline_position + 1..];
            line_start += newline_position + 1;
            line_number += 1;
        }
        self.last_known_line_break.set((line_number, line_start));
        SourceLocation {
            line: line_number,
            // `target == line_start` at the beginning of a line,
            // so add 1 so that the column numbers start at 1.
            column: source.chars().count() as u32 + 1,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    /// Yields tokens up to, but not including, `EndOfInput`.
    fn next(&mut self) -> Option<Token<'a>> {
        match self.next_token() {
            EndOfInput => None,
            token => Some(token),
        }
    }
}


/// A position from the start of the preprocessed input, counted in UTF-8 bytes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourcePosition(pub(crate) usize);

impl SourcePosition {
    /// The byte offset in the preprocessed input.
    #[inline]
    pub fn byte_index(self) -> usize {
        self.0
    }
}


/// The line and column number for a given position within the input.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceLocation {
    /// The line number, starting at `TokenizerOptions::first_line_number` (1 by default).
    pub line: u32,

    /// The column number within a line, starting at 1 for the first character of the line.
    /// Column numbers are counted in code points.
    pub column: u32,
}


static MATCH_OPERATORS: phf::Map<&'static str, Token<'static>> = phf_map! {
    "~=" => IncludeMatch,
    "|=" => DashMatch,
    "^=" => PrefixMatch,
    "$=" => SuffixMatch,
    "*=" => SubstringMatch,
    "||" => Column,
};


fn next_token<'a>(stream: &mut InputStream<'a>, options: &TokenizerOptions) -> Token<'a> {
    let c = match stream.next_char() {
        Some(c) => c,
        None => return EndOfInput,
    };
    match c {
        ' ' | '\t' | '\n' => consume_whitespace(stream, options.preserve_whitespace),
        '"' => consume_string(stream, false),
        '#' => {
            stream.advance();
            if is_ident_start(stream) { IDHash(consume_name(stream)) }
            else if stream.next_char().map_or(false, is_name_code_point)
                    || starts_valid_escape(stream) { Hash(consume_name(stream)) }
            else { Delim(c) }
        },
        '$' | '*' | '^' | '|' | '~' => consume_match_operator(stream, c),
        '\'' => consume_string(stream, true),
        '(' => { stream.advance(); ParenthesisBlock },
        ')' => { stream.advance(); CloseParenthesis },
        '+' | '.' => {
            if starts_number(stream) {
                consume_numeric(stream)
            } else {
                stream.advance();
                Delim(c)
            }
        },
        ',' => { stream.advance(); Comma },
        '-' => {
            if starts_number(stream) {
                consume_numeric(stream)
            } else if stream.starts_with("-->") {
                stream.skip(3);
                CDC
            } else if is_ident_start(stream) {
                consume_ident_like(stream)
            } else {
                stream.advance();
                Delim(c)
            }
        },
        '/' => {
            if stream.starts_with("/*") {
                Comment(consume_comment(stream))
            } else {
                stream.advance();
                Delim(c)
            }
        }
        '0'..='9' => consume_numeric(stream),
        ':' => { stream.advance(); Colon },
        ';' => { stream.advance(); Semicolon },
        '<' => {
            if stream.starts_with("<!--") {
                stream.skip(4);
                CDO
            } else {
                stream.advance();
                Delim(c)
            }
        },
        '@' => {
            stream.advance();
            if is_ident_start(stream) { AtKeyword(consume_name(stream)) }
            else { Delim(c) }
        },
        'u' | 'U' => {
            if stream.peek(1) == Some('+')
               && stream.peek(2).map_or(false, |c| c.is_ascii_hexdigit() || c == '?')
            { consume_unicode_range(stream) }
            else { consume_ident_like(stream) }
        },
        'a'..='z' | 'A'..='Z' | '_' => consume_ident_like(stream),
        '[' => { stream.advance(); SquareBracketBlock },
        '\\' => {
            if starts_valid_escape(stream) { consume_ident_like(stream) }
            else { stream.advance(); Delim(c) }
        },
        ']' => { stream.advance(); CloseSquareBracket },
        '{' => { stream.advance(); CurlyBracketBlock },
        '}' => { stream.advance(); CloseCurlyBracket },
        _ => {
            if !c.is_ascii() {
                consume_ident_like(stream)
            } else {
                stream.advance();
                Delim(c)
            }
        },
    }
}


fn consume_whitespace<'a>(stream: &mut InputStream<'a>, preserve: bool) -> Token<'a> {
    let start_position = stream.position();
    let mut has_newline = false;
    while let Some(c) = stream.next_char() {
        match c {
            ' ' | '\t' => {},
            '\n' => has_newline = true,
            _ => break,
        }
        stream.advance();
    }
    if preserve {
        WhiteSpace(stream.slice_from(start_position))
    } else if has_newline {
        WhiteSpace("\n")
    } else {
        WhiteSpace(" ")
    }
}


fn consume_match_operator<'a>(stream: &mut InputStream<'a>, c: char) -> Token<'a> {
    let operator = stream.remaining().get(..2).and_then(|pair| MATCH_OPERATORS.get(pair));
    match operator {
        Some(token) => {
            stream.skip(2);
            token.clone()
        }
        None => {
            stream.advance();
            Delim(c)
        }
    }
}


fn consume_comment<'a>(stream: &mut InputStream<'a>) -> &'a str {
    stream.skip(2);  // consume "/*"
    let start_position = stream.position();
    match stream.remaining().find("*/") {
        Some(offset) => {
            stream.reset(start_position + offset);
            let content = stream.slice_from(start_position);
            stream.skip(2);
            content
        }
        None => {
            stream.reset(stream.input().len());
            stream.slice_from(start_position)
        }
    }
}


fn consume_string<'a>(stream: &mut InputStream<'a>, single_quote: bool) -> Token<'a> {
    match consume_quoted_string(stream, single_quote) {
        Ok(value) => QuotedString(value),
        Err(value) => {
            tracing::debug!(position = stream.position(), value = %value, "unescaped newline in string");
            BadString(value)
        }
    }
}


/// Return `Err(_)` with the text so far on syntax error (ie. unescaped newline).
/// The newline itself is left in the input.
fn consume_quoted_string<'a>(stream: &mut InputStream<'a>, single_quote: bool)
                             -> Result<Cow<'a, str>, Cow<'a, str>> {
    stream.advance();  // Skip the initial quote
    let start_pos = stream.position();
    let mut string;
    loop {
        match stream.next_char() {
            None => return Ok(stream.slice_from(start_pos).into()),
            Some('"') if !single_quote => {
                let value = stream.slice_from(start_pos);
                stream.advance();
                return Ok(value.into())
            }
            Some('\'') if single_quote => {
                let value = stream.slice_from(start_pos);
                stream.advance();
                return Ok(value.into())
            }
            Some('\\') => {
                string = stream.slice_from(start_pos).to_owned();
                break
            }
            Some('\n') => return Err(stream.slice_from(start_pos).into()),
            Some(_) => {
                stream.advance();
            }
        }
    }

    while let Some(c) = stream.next_char() {
        match c {
            '\n' => return Err(string.into()),
            '"' if !single_quote => {
                stream.advance();
                break
            }
            '\'' if single_quote => {
                stream.advance();
                break
            }
            '\\' => {
                stream.advance();
                if stream.next_char() == Some('\n') {
                    // Escaped newline
                    stream.advance();
                } else {
                    string.push(consume_escape(stream))
                }
            }
            c => {
                stream.advance();
                string.push(c)
            }
        }
    }
    Ok(string.into())
}


#[inline]
fn is_name_start(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_') || !c.is_ascii()
}

#[inline]
fn is_name_code_point(c: char) -> bool {
    is_name_start(c) || matches!(c, '0'..='9' | '-')
}

#[inline]
fn starts_valid_escape(stream: &InputStream) -> bool {
    stream.next_char() == Some('\\') && stream.peek(1) != Some('\n')
}

#[inline]
fn is_ident_start(stream: &InputStream) -> bool {
    match stream.next_char() {
        Some('-') => match stream.peek(1) {
            Some('-') => true,
            Some('\\') => stream.peek(2) != Some('\n'),
            Some(c) => is_name_start(c),
            None => false,
        },
        Some('\\') => stream.peek(1) != Some('\n'),
        Some(c) => is_name_start(c),
        None => false,
    }
}

#[inline]
fn starts_number(stream: &InputStream) -> bool {
    match stream.next_char() {
        Some('+') | Some('-') => match stream.peek(1) {
            Some('0'..='9') => true,
            Some('.') => matches!(stream.peek(2), Some('0'..='9')),
            _ => false,
        },
        Some('.') => matches!(stream.peek(1), Some('0'..='9')),
        Some('0'..='9') => true,
        _ => false,
    }
}


fn consume_ident_like<'a>(stream: &mut InputStream<'a>) -> Token<'a> {
    let value = consume_name(stream);
    if stream.next_char() == Some('(') {
        stream.advance();
        if value.eq_ignore_ascii_case("url") {
            consume_unquoted_url(stream).unwrap_or(Function(value))
        } else {
            Function(value)
        }
    } else {
        Ident(value)
    }
}


fn consume_name<'a>(stream: &mut InputStream<'a>) -> Cow<'a, str> {
    let start_pos = stream.position();
    let mut value;
    loop {
        match stream.next_char() {
            Some(c) if is_name_code_point(c) => {
                stream.advance();
            }
            Some('\\') if stream.peek(1) != Some('\n') => {
                value = stream.slice_from(start_pos).to_owned();
                break
            }
            _ => return stream.slice_from(start_pos).into(),
        }
    }

    loop {
        match stream.next_char() {
            Some(c) if is_name_code_point(c) => {
                stream.advance();
                value.push(c)
            }
            Some('\\') if stream.peek(1) != Some('\n') => {
                stream.advance();
                value.push(consume_escape(stream))
            }
            _ => break,
        }
    }
    value.into()
}


fn consume_digits(stream: &mut InputStream) {
    while matches!(stream.next_char(), Some('0'..='9')) {
        stream.advance();
    }
}


fn consume_numeric<'a>(stream: &mut InputStream<'a>) -> Token<'a> {
    // Parse [+-]?\d*(\.\d+)?([eE][+-]?\d+)?
    // But this is always called so that there is at least one digit in \d*(\.\d+)?
    let start_pos = stream.position();
    let has_sign = matches!(stream.next_char(), Some('+') | Some('-'));
    if has_sign {
        stream.advance();
    }
    consume_digits(stream);
    let mut is_integer = true;
    if stream.next_char() == Some('.') && matches!(stream.peek(1), Some('0'..='9')) {
        is_integer = false;
        stream.skip(2);  // '.' and first digit
        consume_digits(stream);
    }
    if matches!(stream.next_char(), Some('e') | Some('E')) {
        // An `e` without digits after it is left for the unit.
        let first_digit = match stream.peek(1) {
            Some('+') | Some('-') => 2,
            _ => 1,
        };
        if matches!(stream.peek(first_digit), Some('0'..='9')) {
            is_integer = false;
            stream.skip(first_digit + 1);
            consume_digits(stream);
        }
    }
    let representation = stream.slice_from(start_pos);
    // f64 parsing accepts everything matched above, including a `+` sign.
    let value = representation.parse::<f64>().unwrap_or(0.);
    let numeric = NumericValue {
        representation,
        value,
        // `as` saturates at i32::MIN and i32::MAX.
        int_value: if is_integer { Some(value as i32) } else { None },
        has_sign,
    };
    if stream.next_char() == Some('%') {
        stream.advance();
        return Percentage(numeric)
    }
    if is_ident_start(stream) {
        Dimension(numeric, consume_name(stream))
    } else {
        Number(numeric)
    }
}


/// Returns `Err(())` with the input rewound to just after `url(`
/// if the URL is quoted, in which case this is a regular function.
fn consume_unquoted_url<'a>(stream: &mut InputStream<'a>) -> Result<Token<'a>, ()> {
    let after_parenthesis = stream.position();
    while matches!(stream.next_char(), Some(' ') | Some('\t') | Some('\n')) {
        stream.advance();
    }
    match stream.next_char() {
        Some('"') | Some('\'') => {
            stream.reset(after_parenthesis);
            return Err(())
        }
        Some(')') => {
            stream.advance();
            return Ok(UnquotedUrl("".into()))
        }
        None => return Ok(UnquotedUrl("".into())),
        Some(_) => {}
    }
    return Ok(consume_unquoted_url_internal(stream));

    fn consume_unquoted_url_internal<'a>(stream: &mut InputStream<'a>) -> Token<'a> {
        let start_pos = stream.position();
        let mut string;
        loop {
            match stream.next_char() {
                None => return UnquotedUrl(stream.slice_from(start_pos).into()),
                Some(' ') | Some('\t') | Some('\n') => {
                    let value = stream.slice_from(start_pos);
                    return consume_url_end(stream, value.into())
                }
                Some(')') => {
                    let value = stream.slice_from(start_pos);
                    stream.advance();
                    return UnquotedUrl(value.into())
                }
                Some(c) if is_forbidden_in_url(c) => {
                    let value = stream.slice_from(start_pos);
                    stream.advance();
                    return consume_bad_url(stream, value.into())
                }
                Some('\\') => {
                    if stream.peek(1) == Some('\n') {
                        let value = stream.slice_from(start_pos);
                        return consume_bad_url(stream, value.into())
                    }
                    string = stream.slice_from(start_pos).to_owned();
                    break
                }
                Some(_) => {
                    stream.advance();
                }
            }
        }
        while let Some(c) = stream.next_char() {
            match c {
                ' ' | '\t' | '\n' => return consume_url_end(stream, string.into()),
                ')' => {
                    stream.advance();
                    break
                }
                c if is_forbidden_in_url(c) => {
                    stream.advance();
                    return consume_bad_url(stream, string.into())
                }
                '\\' => {
                    if stream.peek(1) == Some('\n') {
                        return consume_bad_url(stream, string.into())
                    }
                    stream.advance();
                    string.push(consume_escape(stream))
                }
                c => {
                    stream.advance();
                    string.push(c)
                }
            }
        }
        UnquotedUrl(string.into())
    }

    fn is_forbidden_in_url(c: char) -> bool {
        matches!(c, '\x01'..='\x08' | '\x0B' | '\x0E'..='\x1F' | '\x7F'  // non-printable
                    | '"' | '\'' | '(')
    }

    fn consume_url_end<'a>(stream: &mut InputStream<'a>, string: Cow<'a, str>) -> Token<'a> {
        while let Some(c) = stream.next_char() {
            match c {
                ' ' | '\t' | '\n' => {
                    stream.advance();
                }
                ')' => {
                    stream.advance();
                    break
                }
                _ => return consume_bad_url(stream, string),
            }
        }
        UnquotedUrl(string)
    }

    fn consume_bad_url<'a>(stream: &mut InputStream<'a>, string: Cow<'a, str>) -> Token<'a> {
        tracing::debug!(position = stream.position(), value = %string, "bad url, skipping to the closing parenthesis");
        // Consume up to the closing )
        while let Some(c) = stream.advance() {
            match c {
                ')' => break,
                '\\' => {
                    // Skip an escaped ')' or '\'
                    if stream.next_char() != Some('\n') {
                        consume_escape(stream);
                    }
                }
                _ => {}
            }
        }
        BadUrl(string)
    }
}


fn consume_unicode_range<'a>(stream: &mut InputStream<'a>) -> Token<'a> {
    stream.skip(2);  // Skip U+
    // `None` stands for a `?` wildcard.
    let mut digits: SmallVec<[Option<u32>; 6]> = SmallVec::new();
    while digits.len() < 6 {
        match stream.next_char().and_then(|c| c.to_digit(16)) {
            Some(digit) => {
                stream.advance();
                digits.push(Some(digit))
            }
            None => break,
        }
    }
    while digits.len() < 6 && stream.next_char() == Some('?') {
        stream.advance();
        digits.push(None)
    }
    let fill = |wildcard: u32| digits.iter().fold(0, |value, digit| value * 16 + digit.unwrap_or(wildcard));
    let start = fill(0);
    if digits.contains(&None) {
        return UnicodeRange(start, fill(0xF))
    }

    let mut end = start;
    if stream.next_char() == Some('-') && stream.peek(1).map_or(false, |c| c.is_ascii_hexdigit()) {
        stream.advance();
        end = consume_hex_digits(stream);
    }
    if end < start {
        tracing::debug!(start, end, "unicode-range ends before it starts, clamping to its start");
        end = start;
    }
    UnicodeRange(start, end)
}


// Up to 6 digits
fn consume_hex_digits(stream: &mut InputStream) -> u32 {
    let mut value = 0;
    let mut digits = 0;
    while digits < 6 {
        match stream.next_char().and_then(|c| c.to_digit(16)) {
            Some(digit) => {
                value = value * 16 + digit;
                digits += 1;
                stream.advance();
            }
            None => break,
        }
    }
    value
}


/// Decode one escape.
///
/// Assumes that the U+005C REVERSE SOLIDUS (\) has already been consumed
/// and that the next code point has already been verified to not be a newline.
/// Only moves `stream` past the escape.
pub(crate) fn consume_escape(stream: &mut InputStream) -> char {
    match stream.next_char() {
        None => REPLACEMENT_CHAR,  // Escaped EOF
        Some(c) if c.is_ascii_hexdigit() => {
            let value = consume_hex_digits(stream);
            if matches!(stream.next_char(), Some(' ') | Some('\t') | Some('\n')) {
                stream.advance();
            }
            if value != 0 {
                // None for surrogates and values above U+10FFFF.
                char::from_u32(value).unwrap_or(REPLACEMENT_CHAR)
            } else {
                REPLACEMENT_CHAR
            }
        }
        Some(_) => stream.advance().unwrap_or(REPLACEMENT_CHAR),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn escape(source: &str) -> (char, &str) {
        let mut stream = InputStream::new(source);
        let c = consume_escape(&mut stream);
        (c, stream.remaining())
    }

    #[test]
    fn escapes() {
        assert_eq!(escape("41 b"), ('A', "b"));
        assert_eq!(escape("41\n b"), ('A', " b"));
        assert_eq!(escape("0000041b"), ('\u{4}', "1b"));
        assert_eq!(escape("0"), (REPLACEMENT_CHAR, ""));
        assert_eq!(escape("D800"), (REPLACEMENT_CHAR, ""));
        assert_eq!(escape("110000"), (REPLACEMENT_CHAR, ""));
        assert_eq!(escape("10FFFF"), ('\u{10FFFF}', ""));
        assert_eq!(escape("g"), ('g', ""));
        assert_eq!(escape("\u{1}x"), ('\u{1}', "x"));
        assert_eq!(escape(""), (REPLACEMENT_CHAR, ""));
    }

    #[test]
    fn hex_digits_stop_at_six() {
        let mut stream = InputStream::new("1234567");
        assert_eq!(consume_hex_digits(&mut stream), 0x123456);
        assert_eq!(stream.remaining(), "7");
    }

    #[test]
    fn source_locations() {
        let input = CssInput::new("a\r\n  b\nc");
        let mut tokenizer = Tokenizer::new(&input);
        assert_eq!(tokenizer.current_source_location(), SourceLocation { line: 1, column: 1 });
        tokenizer.next_token();
        tokenizer.next_token();
        assert_eq!(tokenizer.current_source_location(), SourceLocation { line: 2, column: 3 });
        tokenizer.next_token();
        tokenizer.next_token();
        assert_eq!(tokenizer.current_source_location(), SourceLocation { line: 3, column: 1 });
        // Going backwards is not cached.
        assert_eq!(tokenizer.source_location(SourcePosition(1)), SourceLocation { line: 1, column: 2 });

        let tokenizer = Tokenizer::with_options(&input, TokenizerOptions::new().first_line_number(0));
        assert_eq!(*tokenizer.options(), TokenizerOptions { preserve_whitespace: false, first_line_number: 0 });
        assert_eq!(tokenizer.source_location(SourcePosition(6)), SourceLocation { line: 2, column: 1 });
        assert_eq!(tokenizer.source_location(SourcePosition(7)), SourceLocation { line: 2, column: 2 });
    }

    #[test]
    fn slices() {
        let input = CssInput::new("foo bar");
        let mut tokenizer = Tokenizer::new(&input);
        let start = tokenizer.position();
        tokenizer.next_token();
        assert_eq!(tokenizer.slice_from(start), "foo");
        assert_eq!(tokenizer.position().byte_index(), 3);
        assert_eq!(tokenizer.slice(SourcePosition(4)..SourcePosition(7)), "bar");
        assert_eq!(tokenizer.slice(SourcePosition(4)..SourcePosition(70)), "");
    }
}
