use crate::protocol::{ParseError, Request};

/// Result of trying to decode one request frame from the front of a buffer.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The buffered bytes are a valid prefix of a request; more are needed.
    Incomplete,
    /// The buffered bytes can never form a valid request.
    BadRequest(ParseError),
    /// A complete request occupying exactly `frame_len` leading bytes.
    Ok { request: Request, frame_len: usize },
}

impl ParseOutcome {
    /// Returns true if more bytes are needed
    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseOutcome::Incomplete)
    }

    /// Returns true if the buffered bytes were rejected
    #[inline]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ParseOutcome::BadRequest(_))
    }

    /// Returns the frame length if a request was decoded
    pub fn frame_len(&self) -> Option<usize> {
        match self {
            ParseOutcome::Ok { frame_len, .. } => Some(*frame_len),
            _ => None,
        }
    }
}

impl From<ParseError> for ParseOutcome {
    fn from(e: ParseError) -> Self {
        ParseOutcome::BadRequest(e)
    }
}
