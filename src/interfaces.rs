// Interfaces between the abbreviation store and its host UI.
// The rows are what a graphical list widget displays; the host re-fetches
// them whenever a change listener fires.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::abbrev_map::AbbrevMap;
use crate::codec::TermCodec;

/// One row of the abbreviation list, with the term already printed.
#[derive(Debug, Eq, PartialEq, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbbrevRow {
    pub label: String,
    pub term_text: String,
    pub enabled: bool,
}

/// Renders the whole map for display, sorted by label.
pub fn rows<C>(map: &AbbrevMap<C::Term>, codec: &C) -> Vec<AbbrevRow>
where
    C: TermCodec,
    C::Term: Clone + Eq + Hash,
{
    map.list()
        .into_iter()
        .map(|abbrev| AbbrevRow {
            label: abbrev.label,
            term_text: codec.print(&abbrev.term),
            enabled: abbrev.enabled,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::{MockCodec, MockTerm};

    #[test]
    fn test_rows() {
        let codec = MockCodec::permissive();
        let mut map = AbbrevMap::new();
        map.put(MockTerm::new("succ(zero)"), "one".to_string(), true)
            .unwrap();
        map.put(MockTerm::new("zero"), "z".to_string(), false)
            .unwrap();

        assert_eq!(
            rows(&map, &codec),
            vec![
                AbbrevRow {
                    label: "one".to_string(),
                    term_text: "succ(zero)".to_string(),
                    enabled: true,
                },
                AbbrevRow {
                    label: "z".to_string(),
                    term_text: "zero".to_string(),
                    enabled: false,
                },
            ]
        );
    }
}
