use std::collections::HashSet;

use crate::codec::{ParseError, TermCodec};

/// A stand-in for the host's term language. The "term" is just its own text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MockTerm(pub String);

impl MockTerm {
    pub fn new(text: &str) -> MockTerm {
        MockTerm(text.to_string())
    }
}

/// A mock codec standing in for one proof context.
///
/// Parsing trims the text, optionally checks it against the context's known
/// symbols, and stamps the context's prefix onto the result. Two codecs with
/// different prefixes model two namespaces: the same text parses to different
/// terms under each, which is what makes transfer tests meaningful.
pub struct MockCodec {
    prefix: String,
    known: Option<HashSet<String>>,
}

impl MockCodec {
    /// A context where any nonempty text is a valid term.
    pub fn permissive() -> MockCodec {
        MockCodec {
            prefix: String::new(),
            known: None,
        }
    }

    /// A context where only the given printed forms are valid terms.
    pub fn with_symbols(symbols: &[&str]) -> MockCodec {
        MockCodec {
            prefix: String::new(),
            known: Some(symbols.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// A permissive context whose parsed terms carry a namespace prefix.
    pub fn with_prefix(prefix: &str) -> MockCodec {
        MockCodec {
            prefix: prefix.to_string(),
            known: None,
        }
    }
}

impl TermCodec for MockCodec {
    type Term = MockTerm;

    fn print(&self, term: &MockTerm) -> String {
        term.0.clone()
    }

    fn parse(&self, text: &str) -> Result<MockTerm, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::new("empty term"));
        }
        if let Some(known) = &self.known {
            if !known.contains(trimmed) {
                return Err(ParseError::new(format!("unknown symbol '{}'", trimmed)));
            }
        }
        Ok(MockTerm(format!("{}{}", self.prefix, trimmed)))
    }
}
