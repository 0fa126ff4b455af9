/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#![crate_name = "csstokenizer"]
#![crate_type = "rlib"]

#![deny(missing_docs)]

/*!

Implementation of the tokenizer of [CSS Syntax Module Level 3](https://drafts.csswg.org/css-syntax/) for Rust.

# Input

A `Tokenizer` borrows a `CssInput`, which holds the preprocessed source text:
line breaks are normalized to `\n` and NUL characters replaced by U+FFFD.
If you have bytes (from a file, the network, or something),
see `CssInput::from_bytes` and the `decode_stylesheet_bytes` function.

# Tokens

Every `Token` is one of the CSS token kinds, with its payload.
Payloads borrow from the input whenever they contain no escape sequences.
`Token::token_type`, `Token::value` and `Token::extra` give a uniform view of any token.

Tokenization never fails. Malformed strings and URLs become `BadString` and `BadUrl` tokens,
and the tokenizer resumes right after them. Once the input is exhausted,
`Tokenizer::next_token` returns `EndOfInput` on every call.

```
use csstokenizer::{CssInput, Tokenizer, TokenType};

let input = CssInput::new("a { width: 42px }");
let types: Vec<TokenType> = Tokenizer::new(&input).map(|token| token.token_type()).collect();
assert_eq!(types, [
    TokenType::Ident, TokenType::WhiteSpace, TokenType::CurlyBracketBlock, TokenType::WhiteSpace,
    TokenType::Ident, TokenType::Colon, TokenType::WhiteSpace, TokenType::Dimension,
    TokenType::WhiteSpace, TokenType::CloseCurlyBracket,
]);
```

*/

pub use crate::input::{CssInput, InputError};
pub use crate::token::{Token, TokenType, TokenExtra, NumericValue};
pub use crate::tokenizer::{Tokenizer, TokenizerOptions, SourcePosition, SourceLocation};
pub use crate::from_bytes::decode_stylesheet_bytes;


mod input;
mod token;
mod tokenizer;
mod from_bytes;

#[cfg(test)]
mod tests;
