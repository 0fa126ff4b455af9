/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// https://drafts.csswg.org/css-syntax/#tokenization

use std::borrow::Cow;
use std::fmt;

use self::Token::*;


/// One of the pieces the CSS input is broken into.
///
/// Some components use `Cow` in order to borrow from the input
/// and avoid allocating/copying when possible.
/// Only the variants that need a payload carry one.
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Token<'a> {

    /// A [`<ident-token>`](https://drafts.csswg.org/css-syntax/#ident-token-diagram)
    Ident(Cow<'a, str>),

    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(Cow<'a, str>),

    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "unrestricted"
    ///
    /// The value does not include the `#` marker.
    Hash(Cow<'a, str>),

    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "id"
    ///
    /// The value does not include the `#` marker.
    IDHash(Cow<'a, str>),  // Hash that is a valid ID selector.

    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(Cow<'a, str>),

    /// A [`<url-token>`](https://drafts.csswg.org/css-syntax/#url-token-diagram)
    ///
    /// The value does not include the `url(` `)` markers.  Note that `url( <string-token> )` is represented by a
    /// `Function` token.
    UnquotedUrl(Cow<'a, str>),

    /// A `<delim-token>`
    Delim(char),

    /// A [`<number-token>`](https://drafts.csswg.org/css-syntax/#number-token-diagram)
    Number(NumericValue<'a>),

    /// A [`<percentage-token>`](https://drafts.csswg.org/css-syntax/#percentage-token-diagram)
    ///
    /// The numeric value does not include the `%` sign and is **not** divided by 100.
    Percentage(NumericValue<'a>),

    /// A [`<dimension-token>`](https://drafts.csswg.org/css-syntax/#dimension-token-diagram)
    ///
    /// The second component is the unit, e.g. "px" in `12px`.
    Dimension(NumericValue<'a>, Cow<'a, str>),

    /// A `U+` unicode-range token.
    ///
    /// Components are the inclusive start and end code points, respectively.
    ///
    /// The tokenizer only reads up to 6 hex digit (up to 0xFF_FFFF),
    /// but does not check that code points are within the range of Unicode (up to U+10_FFFF).
    UnicodeRange(u32, u32),

    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram)
    ///
    /// Unless `TokenizerOptions::preserve_whitespace` is set,
    /// the value is `"\n"` for a run containing a line break and `" "` otherwise.
    WhiteSpace(&'a str),

    /// A comment.
    ///
    /// CSS Syntax Level 3 does not generate tokens for comments, but this tokenizer does.
    ///
    /// The value does not include the `/*` `*/` markers.
    Comment(&'a str),

    /// A `:` `<colon-token>`
    Colon,  // :

    /// A `;` `<semicolon-token>`
    Semicolon,  // ;

    /// A `,` `<comma-token>`
    Comma,  // ,

    /// A `~=` [`<include-match-token>`](https://drafts.csswg.org/css-syntax/#include-match-token-diagram)
    IncludeMatch,

    /// A `|=` [`<dash-match-token>`](https://drafts.csswg.org/css-syntax/#dash-match-token-diagram)
    DashMatch,

    /// A `^=` [`<prefix-match-token>`](https://drafts.csswg.org/css-syntax/#prefix-match-token-diagram)
    PrefixMatch,

    /// A `$=` [`<suffix-match-token>`](https://drafts.csswg.org/css-syntax/#suffix-match-token-diagram)
    SuffixMatch,

    /// A `*=` [`<substring-match-token>`](https://drafts.csswg.org/css-syntax/#substring-match-token-diagram)
    SubstringMatch,

    /// A `||` [`<column-token>`](https://drafts.csswg.org/css-syntax/#column-token-diagram)
    Column,

    /// A `<!--` [`<CDO-token>`](https://drafts.csswg.org/css-syntax/#CDO-token-diagram)
    CDO,

    /// A `-->` [`<CDC-token>`](https://drafts.csswg.org/css-syntax/#CDC-token-diagram)
    CDC,

    /// A [`<function-token>`](https://drafts.csswg.org/css-syntax/#function-token-diagram)
    ///
    /// The value (name) does not include the `(` marker.
    Function(Cow<'a, str>),

    /// A `<(-token>`
    ParenthesisBlock,

    /// A `<[-token>`
    SquareBracketBlock,

    /// A `<{-token>`
    CurlyBracketBlock,

    /// A `<bad-url-token>`
    ///
    /// This token always indicates a parse error.
    /// The value is the URL text decoded before the offending code point.
    BadUrl(Cow<'a, str>),

    /// A `<bad-string-token>`
    ///
    /// This token always indicates a parse error.
    /// The value is the string text decoded before the line break.
    BadString(Cow<'a, str>),

    /// A `<)-token>`
    CloseParenthesis,

    /// A `<]-token>`
    CloseSquareBracket,

    /// A `<}-token>`
    CloseCurlyBracket,

    /// The input could not be fully acquired, e.g. its reader failed part way.
    ///
    /// This token always indicates an error. Tokenization goes on afterwards.
    Error(&'a str),

    /// The end of the input.
    ///
    /// Once returned, it is returned again by every later call.
    EndOfInput,
}


/// The numeric part of `Number`, `Percentage`, and `Dimension` tokens.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NumericValue<'a> {
    /// The source text of the number, including any sign, excluding any unit or `%`.
    pub representation: &'a str,

    /// The value as a float
    pub value: f64,

    /// If the origin source did not include a fractional part or an exponent,
    /// the value as an integer, saturated to the `i32` range.
    pub int_value: Option<i32>,

    /// Whether the number had a `+` or `-` sign.
    pub has_sign: bool,
}

impl<'a> NumericValue<'a> {
    /// Whether a fractional part or an exponent was present.
    #[inline]
    pub fn is_non_integer(&self) -> bool {
        self.int_value.is_none()
    }
}


/// The kind of a token, without its payload.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum TokenType {
    Ident,
    Function,
    AtKeyword,
    Hash,
    String,
    BadString,
    Url,
    BadUrl,
    Delim,
    Number,
    Percentage,
    Dimension,
    UnicodeRange,
    IncludeMatch,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    Column,
    WhiteSpace,
    Comment,
    CDO,
    CDC,
    Colon,
    Semicolon,
    Comma,
    ParenthesisBlock,
    CloseParenthesis,
    SquareBracketBlock,
    CloseSquareBracket,
    CurlyBracketBlock,
    CloseCurlyBracket,
    Error,
    EndOfInput,
}

impl TokenType {
    /// A short lower-case name, as used in test fixtures and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Ident => "ident",
            TokenType::Function => "function",
            TokenType::AtKeyword => "at-keyword",
            TokenType::Hash => "hash",
            TokenType::String => "string",
            TokenType::BadString => "bad-string",
            TokenType::Url => "url",
            TokenType::BadUrl => "bad-url",
            TokenType::Delim => "delim",
            TokenType::Number => "number",
            TokenType::Percentage => "percentage",
            TokenType::Dimension => "dimension",
            TokenType::UnicodeRange => "unicode-range",
            TokenType::IncludeMatch => "include-match",
            TokenType::DashMatch => "dash-match",
            TokenType::PrefixMatch => "prefix-match",
            TokenType::SuffixMatch => "suffix-match",
            TokenType::SubstringMatch => "substring-match",
            TokenType::Column => "column",
            TokenType::WhiteSpace => "whitespace",
            TokenType::Comment => "comment",
            TokenType::CDO => "cdo",
            TokenType::CDC => "cdc",
            TokenType::Colon => "colon",
            TokenType::Semicolon => "semicolon",
            TokenType::Comma => "comma",
            TokenType::ParenthesisBlock => "open-paren",
            TokenType::CloseParenthesis => "close-paren",
            TokenType::SquareBracketBlock => "open-bracket",
            TokenType::CloseSquareBracket => "close-bracket",
            TokenType::CurlyBracketBlock => "open-brace",
            TokenType::CloseCurlyBracket => "close-brace",
            TokenType::Error => "error",
            TokenType::EndOfInput => "eof",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// Structured data carried by some token types, in addition to their value.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenExtra<'t> {
    /// For `Number`, `Percentage`, and `Dimension` tokens.
    Numeric {
        /// Whether a fractional part or an exponent was present.
        non_integer: bool,
        /// The unit, for `Dimension` tokens only.
        dimension: Option<&'t str>,
    },

    /// For `Hash` tokens.
    Hash {
        /// Whether the text after `#` would be an identifier on its own.
        is_identifier: bool,
    },

    /// For `UnicodeRange` tokens. Bounds are inclusive.
    UnicodeRange {
        /// The first code point of the range.
        start: u32,
        /// The last code point of the range, never less than `start`.
        end: u32,
    },

    /// For `BadString` and `BadUrl` tokens: marks a recovered parse error.
    Error,
}


impl<'a> Token<'a> {
    /// The kind of this token.
    pub fn token_type(&self) -> TokenType {
        match *self {
            Ident(_) => TokenType::Ident,
            AtKeyword(_) => TokenType::AtKeyword,
            Hash(_) | IDHash(_) => TokenType::Hash,
            QuotedString(_) => TokenType::String,
            UnquotedUrl(_) => TokenType::Url,
            Delim(_) => TokenType::Delim,
            Number(_) => TokenType::Number,
            Percentage(_) => TokenType::Percentage,
            Dimension(..) => TokenType::Dimension,
            UnicodeRange(..) => TokenType::UnicodeRange,
            WhiteSpace(_) => TokenType::WhiteSpace,
            Comment(_) => TokenType::Comment,
            Colon => TokenType::Colon,
            Semicolon => TokenType::Semicolon,
            Comma => TokenType::Comma,
            IncludeMatch => TokenType::IncludeMatch,
            DashMatch => TokenType::DashMatch,
            PrefixMatch => TokenType::PrefixMatch,
            SuffixMatch => TokenType::SuffixMatch,
            SubstringMatch => TokenType::SubstringMatch,
            Column => TokenType::Column,
            CDO => TokenType::CDO,
            CDC => TokenType::CDC,
            Function(_) => TokenType::Function,
            ParenthesisBlock => TokenType::ParenthesisBlock,
            SquareBracketBlock => TokenType::SquareBracketBlock,
            CurlyBracketBlock => TokenType::CurlyBracketBlock,
            BadUrl(_) => TokenType::BadUrl,
            BadString(_) => TokenType::BadString,
            CloseParenthesis => TokenType::CloseParenthesis,
            CloseSquareBracket => TokenType::CloseSquareBracket,
            CloseCurlyBracket => TokenType::CloseCurlyBracket,
            Error(_) => TokenType::Error,
            EndOfInput => TokenType::EndOfInput,
        }
    }

    /// The text of this token.
    ///
    /// Decoded text (quotes and markers stripped, escapes resolved) for tokens with content,
    /// the source text of the number for numeric tokens,
    /// and the literal text for punctuation and delimiters.
    /// Unicode ranges are rendered as `U+XXXX` or `U+XXXX-YYYY`.
    pub fn value(&self) -> Cow<'_, str> {
        let literal = match *self {
            Ident(ref value) | AtKeyword(ref value) | Hash(ref value) | IDHash(ref value) |
            QuotedString(ref value) | UnquotedUrl(ref value) | Function(ref value) |
            BadUrl(ref value) | BadString(ref value) => return Cow::Borrowed(&**value),
            Number(ref value) | Percentage(ref value) | Dimension(ref value, _) => value.representation,
            Delim(c) => return Cow::Owned(c.to_string()),
            UnicodeRange(start, end) => {
                return Cow::Owned(if start == end {
                    format!("U+{:04X}", start)
                } else {
                    format!("U+{:04X}-{:04X}", start, end)
                })
            }
            WhiteSpace(value) | Comment(value) | Error(value) => value,
            Colon => ":",
            Semicolon => ";",
            Comma => ",",
            IncludeMatch => "~=",
            DashMatch => "|=",
            PrefixMatch => "^=",
            SuffixMatch => "$=",
            SubstringMatch => "*=",
            Column => "||",
            CDO => "<!--",
            CDC => "-->",
            ParenthesisBlock => "(",
            SquareBracketBlock => "[",
            CurlyBracketBlock => "{",
            CloseParenthesis => ")",
            CloseSquareBracket => "]",
            CloseCurlyBracket => "}",
            EndOfInput => "",
        };
        Cow::Borrowed(literal)
    }

    /// The structured payload of this token, if its type carries one.
    pub fn extra(&self) -> Option<TokenExtra<'_>> {
        Some(match *self {
            Number(ref value) | Percentage(ref value) => TokenExtra::Numeric {
                non_integer: value.is_non_integer(),
                dimension: None,
            },
            Dimension(ref value, ref unit) => TokenExtra::Numeric {
                non_integer: value.is_non_integer(),
                dimension: Some(&**unit),
            },
            Hash(_) => TokenExtra::Hash { is_identifier: false },
            IDHash(_) => TokenExtra::Hash { is_identifier: true },
            UnicodeRange(start, end) => TokenExtra::UnicodeRange { start, end },
            BadUrl(_) | BadString(_) => TokenExtra::Error,
            _ => return None,
        })
    }

    /// Return whether this token represents an error.
    ///
    /// `BadUrl` and `BadString` are tokenizer-level parse errors,
    /// `Error` reports a failure to acquire the input.
    pub fn is_parse_error(&self) -> bool {
        matches!(*self, BadUrl(_) | BadString(_) | Error(_))
    }
}
