use std::fmt;

/// One problem found while loading or transferring abbreviations.
///
/// Loading and transfer never abort on a bad entry; they report an event to
/// the caller's sink and keep going. The sink is passed in by the caller, so
/// there is no global logger: a batch loader can collect events, an
/// interactive host can surface them for correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// 1-based line number in the source text, when the problem came from a file.
    pub line: Option<u32>,

    /// The label involved, when it could be determined.
    pub label: Option<String>,

    pub message: String,
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        if let Some(label) = &self.label {
            write!(f, "'{}': ", label)?;
        }
        write!(f, "{}", self.message)
    }
}
