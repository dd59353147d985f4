use std::hash::Hash;

use serde::Serialize;

use crate::abbrev_map::AbbrevMap;
use crate::codec::TermCodec;
use crate::diagnostics::DiagnosticEvent;

/// What happened during one transfer call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSummary {
    /// Entries in the source map.
    pub entries: u32,

    /// Entries that landed in the destination.
    pub transferred: u32,

    /// Entries skipped because they could not be reparsed.
    pub errors: u32,
}

/// Copies every abbreviation from one proof's map into another's.
///
/// Terms from two proofs live in different contexts and are not directly
/// interchangeable, so each term is printed under the source codec and
/// reparsed under the destination codec. This bridge is lossy: when the
/// destination context lacks an equivalent symbol, the reparse fails, that
/// entry is reported to the sink and skipped, and the transfer continues.
///
/// Entries go in with `force_put`, so collisions with existing destination
/// bindings are overwritten rather than rejected. There is no rollback: a
/// partial failure leaves the destination with whatever entries succeeded.
pub fn transfer<S, D>(
    source: &AbbrevMap<S::Term>,
    source_codec: &S,
    destination: &mut AbbrevMap<D::Term>,
    destination_codec: &D,
    mut sink: impl FnMut(DiagnosticEvent),
) -> TransferSummary
where
    S: TermCodec,
    S::Term: Clone + Eq + Hash,
    D: TermCodec,
    D::Term: Clone + Eq + Hash,
{
    let mut summary = TransferSummary::default();
    for (term, label) in source.export() {
        summary.entries += 1;
        let printed = source_codec.print(&term);
        match destination_codec.parse(&printed) {
            Ok(reparsed) => {
                destination.force_put(label, reparsed);
                summary.transferred += 1;
            }
            Err(error) => {
                summary.errors += 1;
                sink(DiagnosticEvent {
                    line: None,
                    label: Some(label),
                    message: format!("cannot transfer '{}': {}", printed, error),
                });
            }
        }
    }
    summary
}
