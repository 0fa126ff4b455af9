/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};


/// Determine the character encoding of a CSS stylesheet and decode it.
///
/// This is based on the presence of a BOM (Byte Order Mark), an `@charset` rule, and
/// encoding meta-information.
///
/// * `css`: A byte string.
/// * `protocol_encoding_label`: The encoding label, if any, defined by HTTP or equivalent protocol.
///     (e.g. via the `charset` parameter of the `Content-Type` header.)
/// * `environment_encoding`: An optional `Encoding` for the [environment encoding]
///     (https://drafts.csswg.org/css-syntax/#environment-encoding), if any.
///
/// Returns a 2-tuple of the decoded text and the `Encoding` that was used.
/// Malformed byte sequences are decoded as U+FFFD REPLACEMENT CHARACTER.
/// The text is borrowed from `css` when it was valid UTF-8 without a BOM.
pub fn decode_stylesheet_bytes<'a>(css: &'a [u8], protocol_encoding_label: Option<&str>,
                                   environment_encoding: Option<&'static Encoding>)
                                   -> (Cow<'a, str>, &'static Encoding) {
    // https://drafts.csswg.org/css-syntax/#input-byte-stream
    if let Some((encoding, bom_length)) = Encoding::for_bom(css) {
        tracing::trace!(encoding = encoding.name(), "stylesheet encoding from byte order mark");
        return decode_replace(&css[bom_length..], encoding)
    }
    if let Some(encoding) = protocol_encoding_label.and_then(|label| Encoding::for_label(label.as_bytes())) {
        tracing::trace!(encoding = encoding.name(), "stylesheet encoding from protocol label");
        return decode_replace(css, encoding)
    }
    if let Some(encoding) = charset_rule_label(css).and_then(Encoding::for_label) {
        tracing::trace!(encoding = encoding.name(), "stylesheet encoding from @charset rule");
        // The rule was readable as ASCII, so the stylesheet cannot really be UTF-16.
        if encoding == UTF_16BE || encoding == UTF_16LE {
            return decode_replace(css, UTF_8)
        }
        return decode_replace(css, encoding)
    }
    decode_replace(css, environment_encoding.unwrap_or(UTF_8))
}


/// The label of a leading `@charset "…";` rule, matched byte for byte.
fn charset_rule_label(css: &[u8]) -> Option<&[u8]> {
    let rest = css.strip_prefix(b"@charset \"")?;
    // 100 is arbitrary so that no encoding label is more than 100-10 bytes.
    let window = &rest[..rest.len().min(90)];
    let label_length = window.iter().position(|&b| b == b'"')?;
    if rest[label_length..].starts_with(b"\";") {
        Some(&rest[..label_length])
    } else {
        None
    }
}


#[inline]
fn decode_replace<'a>(input: &'a [u8], encoding: &'static Encoding) -> (Cow<'a, str>, &'static Encoding) {
    let (result, _had_errors) = encoding.decode_without_bom_handling(input);
    (result, encoding)
}
