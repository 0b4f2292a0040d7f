//! `Accept-Encoding` negotiation.
//!
//! refer: <https://www.rfc-editor.org/rfc/rfc7231#section-5.3.4> and
//! <https://www.rfc-editor.org/rfc/rfc7231#section-5.3.1> for quality values.
//!
//! Only one question is answered here: may the server gzip the response? An
//! absent or empty header answers no.

use http::HeaderMap;
use http::header::ACCEPT_ENCODING;

const GZIP: &str = "gzip";
const ANY: &str = "*";

/// Decides from an `Accept-Encoding` value whether gzip is acceptable.
///
/// `gzip` is checked first and then the `*` wildcard. For each name only the
/// first token starting with it is consulted: that token decides, even when its
/// quality value is unparsable.
pub fn accepts_gzip(codings: &str) -> bool {
    let stripped: String = codings.chars().filter(|c| !matches!(c, ' ' | '\t')).collect();
    let tokens: Vec<&str> = stripped.split(',').filter(|token| !token.is_empty()).collect();
    if tokens.is_empty() {
        return false;
    }

    is_coding_available(&tokens, GZIP) || is_coding_available(&tokens, ANY)
}

/// Same as [`accepts_gzip`], reading every `Accept-Encoding` field of `headers`.
pub fn headers_accept_gzip(headers: &HeaderMap) -> bool {
    let mut codings = String::new();
    for value in headers.get_all(ACCEPT_ENCODING) {
        // a value with opaque bytes can't name a coding we know
        let Ok(value) = value.to_str() else { continue };
        if !codings.is_empty() {
            codings.push(',');
        }
        codings.push_str(value);
    }

    accepts_gzip(&codings)
}

fn is_coding_available(tokens: &[&str], coding: &str) -> bool {
    let Some(rest) = tokens.iter().find_map(|token| token.strip_prefix(coding)) else {
        return false;
    };

    // without quality value
    if rest.is_empty() {
        return true;
    }

    let qvalue = rest.get(..3).filter(|param| param.eq_ignore_ascii_case(";q=")).map(|_| rest[3..].parse::<f64>());
    match qvalue {
        // NaN compares false as well
        Some(Ok(qvalue)) => qvalue > 0.0,
        _ => false,
    }
}
