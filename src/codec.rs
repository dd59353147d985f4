use std::fmt;

/// The error a codec reports when a piece of text is not a valid term
/// in its context. The string is a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl ParseError {
    pub fn new<T: Into<String>>(message: T) -> ParseError {
        ParseError(message.into())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for String {
    fn from(error: ParseError) -> Self {
        error.0
    }
}

/// The host's term language, seen from the abbreviation store.
///
/// A codec value embodies one context: the symbol environment under which terms
/// are printed and parsed. Terms are not portable across contexts. The same text
/// may parse to different terms under two codecs, or parse under one and fail
/// under the other. The only safe bridge between contexts is print-then-reparse.
pub trait TermCodec {
    type Term;

    /// Renders a term as text. Printing never fails; every term the host hands
    /// us has a printed form in its own context.
    fn print(&self, term: &Self::Term) -> String;

    /// Reads a term back from text, under this codec's context.
    fn parse(&self, text: &str) -> Result<Self::Term, ParseError>;
}
