/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// https://drafts.csswg.org/css-syntax/#input-preprocessing

use std::borrow::Cow;
use std::io::Read;

use encoding_rs::Encoding;

use crate::from_bytes::decode_stylesheet_bytes;

pub(crate) const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Preprocessed CSS source text, borrowed by a `Tokenizer`.
///
/// Every CR, FF, and CR LF pair is replaced by a single LF,
/// and every NUL by U+FFFD REPLACEMENT CHARACTER.
/// Bytes and UTF-16 sources are decoded first; malformed sequences and
/// unpaired surrogates also become U+FFFD.
///
/// When the source needs no replacement, the text is borrowed rather than copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssInput<'a> {
    text: Cow<'a, str>,
    read_error: Option<String>,
}

/// Failure to acquire the source text of a `CssInput`.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The reader failed before the end of the stylesheet.
    #[error("failed to read stylesheet: {0}")]
    Io(#[from] std::io::Error),

    /// The explicitly requested encoding label is not a known WHATWG label.
    #[error("unknown encoding label {0:?}")]
    UnknownEncoding(String),
}

impl<'a> CssInput<'a> {
    /// Preprocess `source`, borrowing it if it contains no CR, FF, or NUL.
    pub fn new(source: &'a str) -> CssInput<'a> {
        CssInput {
            text: preprocess(source),
            read_error: None,
        }
    }

    /// Decode a stylesheet from bytes.
    ///
    /// The encoding is determined by `decode_stylesheet_bytes`,
    /// without protocol or environment encoding information.
    pub fn from_bytes(css: &'a [u8]) -> CssInput<'a> {
        let (decoded, _) = decode_stylesheet_bytes(css, None, None);
        CssInput::from_cow(decoded)
    }

    /// Decode a stylesheet from bytes in the encoding named by `label`.
    ///
    /// A byte order mark still takes precedence, as it does for protocol encodings.
    pub fn from_bytes_in_encoding(css: &'a [u8], label: &str) -> Result<CssInput<'a>, InputError> {
        if Encoding::for_label(label.as_bytes()).is_none() {
            return Err(InputError::UnknownEncoding(label.to_owned()))
        }
        let (decoded, _) = decode_stylesheet_bytes(css, Some(label), None);
        Ok(CssInput::from_cow(decoded))
    }

    fn from_cow(decoded: Cow<'a, str>) -> CssInput<'a> {
        match decoded {
            Cow::Borrowed(source) => CssInput::new(source),
            Cow::Owned(source) => CssInput::from_string(source),
        }
    }

    /// The preprocessed text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The message of the read error that truncated this input, if any.
    ///
    /// See `CssInput::from_reader_lossy`.
    #[inline]
    pub fn read_error(&self) -> Option<&str> {
        self.read_error.as_deref()
    }
}

impl CssInput<'static> {
    /// Preprocess an owned `String`, reusing its buffer when nothing needs replacing.
    pub fn from_string(source: String) -> CssInput<'static> {
        let text = if needs_preprocessing(&source) {
            preprocess(&source).into_owned()
        } else {
            source
        };
        CssInput {
            text: Cow::Owned(text),
            read_error: None,
        }
    }

    /// Decode UTF-16 code units. Unpaired surrogates become U+FFFD.
    pub fn from_utf16(units: &[u16]) -> CssInput<'static> {
        let decoded = char::decode_utf16(units.iter().cloned())
            .map(|unit| unit.unwrap_or(REPLACEMENT_CHAR))
            .collect();
        CssInput::from_string(decoded)
    }

    /// Read a whole stylesheet, then decode it as `from_bytes` does.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<CssInput<'static>, InputError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(CssInput::from_cow(decode_owned(&bytes)))
    }

    /// Like `from_reader`, but a read error does not discard the bytes read before it.
    ///
    /// The error is recorded, and a `Tokenizer` over this input returns it as a
    /// `Token::Error` once the partial text has been tokenized.
    pub fn from_reader_lossy<R: Read>(mut reader: R) -> CssInput<'static> {
        let mut bytes = Vec::new();
        let result = reader.read_to_end(&mut bytes);
        let mut input = CssInput::from_cow(decode_owned(&bytes));
        if let Err(error) = result {
            tracing::debug!(bytes_read = bytes.len(), %error, "stylesheet read failed, keeping partial input");
            input.read_error = Some(error.to_string());
        }
        input
    }
}

fn decode_owned(bytes: &[u8]) -> Cow<'static, str> {
    let (decoded, _) = decode_stylesheet_bytes(bytes, None, None);
    Cow::Owned(decoded.into_owned())
}

#[inline]
fn needs_preprocessing(source: &str) -> bool {
    source.bytes().any(|b| matches!(b, b'\r' | b'\x0C' | b'\0'))
}

pub(crate) fn preprocess(source: &str) -> Cow<'_, str> {
    if !needs_preprocessing(source) {
        return Cow::Borrowed(source)
    }
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                output.push('\n')
            }
            '\x0C' => output.push('\n'),
            '\0' => output.push(REPLACEMENT_CHAR),
            c => output.push(c),
        }
    }
    Cow::Owned(output)
}


/// A cursor over preprocessed text.
///
/// Counted in bytes, but only ever moved over whole code points.
#[derive(Clone, Debug)]
pub(crate) struct InputStream<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> InputStream<'a> {
    #[inline]
    pub fn new(input: &'a str) -> InputStream<'a> {
        InputStream { input, position: 0 }
    }

    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    // Only called with positions previously returned by `position()`.
    #[inline]
    pub fn reset(&mut self, position: usize) {
        debug_assert!(self.input.is_char_boundary(position));
        self.position = position
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    #[inline]
    pub fn next_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The code point `k` positions ahead, without consuming anything.
    #[inline]
    pub fn peek(&self, k: usize) -> Option<char> {
        self.remaining().chars().nth(k)
    }

    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let c = self.next_char()?;
        self.position += c.len_utf8();
        Some(c)
    }

    #[inline]
    pub fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    #[inline]
    pub fn starts_with(&self, needle: &str) -> bool {
        self.remaining().starts_with(needle)
    }

    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.position]
    }
}
