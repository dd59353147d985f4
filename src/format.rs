use std::fs::File;
use std::hash::Hash;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::abbrev_map::AbbrevMap;
use crate::codec::TermCodec;
use crate::diagnostics::DiagnosticEvent;

/// Separates the label from the printed term on each line of an abbreviation
/// file. Lines are split on the first occurrence, so the token may still
/// appear inside a printed term.
pub const SEPARATOR: &str = "::==";

/// What happened during one deserialize or load call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    /// Every line of the input, including comments and blanks.
    pub lines: u32,

    /// Entries actually added to the map.
    pub added: u32,

    /// Lines that produced a diagnostic event.
    pub errors: u32,
}

// Blank lines and lines whose first non-space characters are '#' or "//" are
// directives or comments. The loader skips them; it never tries to parse them.
fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//")
}

/// Renders every binding in the map as one `label::==printed-term` line,
/// in label order, with a trailing newline.
pub fn serialize<C>(map: &AbbrevMap<C::Term>, codec: &C) -> String
where
    C: TermCodec,
    C::Term: Clone + Eq + Hash,
{
    let mut text = String::new();
    for (term, label) in map.export() {
        text.push_str(&label);
        text.push_str(SEPARATOR);
        text.push_str(&codec.print(&term));
        text.push('\n');
    }
    text
}

/// Reads abbreviations out of text and appends them to the map.
///
/// One bad line never aborts the load. A line that fails to parse, or whose
/// label or term is already bound, is reported to the sink with its 1-based
/// line number and skipped. A line without the separator is skipped silently;
/// it is not abbreviation data.
pub fn deserialize<C>(
    text: &str,
    codec: &C,
    map: &mut AbbrevMap<C::Term>,
    mut sink: impl FnMut(DiagnosticEvent),
) -> LoadSummary
where
    C: TermCodec,
    C::Term: Clone + Eq + Hash,
{
    let mut summary = LoadSummary::default();
    for (index, line) in text.lines().enumerate() {
        summary.lines += 1;
        if is_comment_line(line) {
            continue;
        }
        let (label, printed) = match line.split_once(SEPARATOR) {
            Some(parts) => parts,
            None => continue,
        };
        let label = label.trim();
        let term = match codec.parse(printed) {
            Ok(term) => term,
            Err(error) => {
                summary.errors += 1;
                sink(DiagnosticEvent {
                    line: Some(index as u32 + 1),
                    label: Some(label.to_string()),
                    message: format!("cannot parse term: {}", error),
                });
                continue;
            }
        };
        match map.put(term, label.to_string(), true) {
            Ok(()) => summary.added += 1,
            Err(error) => {
                summary.errors += 1;
                sink(DiagnosticEvent {
                    line: Some(index as u32 + 1),
                    label: Some(label.to_string()),
                    message: error.to_string(),
                });
            }
        }
    }
    summary
}

/// Saves the map to a file atomically: the text is written to a temporary
/// file next to the target, synced, then renamed over it. A failed save never
/// leaves a truncated abbreviation file behind.
pub fn save<C>(map: &AbbrevMap<C::Term>, codec: &C, path: &Path) -> io::Result<()>
where
    C: TermCodec,
    C::Term: Clone + Eq + Hash,
{
    let text = serialize(map, codec);
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let mut file = File::create(&temp_path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;

    std::fs::rename(&temp_path, path)?;
    Ok(())
}

/// Loads an abbreviation file into the map. The whole file is read before any
/// entry is added, so an I/O failure leaves the map unchanged.
pub fn load<C>(
    path: &Path,
    codec: &C,
    map: &mut AbbrevMap<C::Term>,
    sink: impl FnMut(DiagnosticEvent),
) -> io::Result<LoadSummary>
where
    C: TermCodec,
    C::Term: Clone + Eq + Hash,
{
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    Ok(deserialize(&contents, codec, map, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::{MockCodec, MockTerm};
    use tempfile::tempdir;

    #[test]
    fn test_file_save_load() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("abbrevs.txt");
        let codec = MockCodec::permissive();

        let mut map = AbbrevMap::new();
        map.put(MockTerm::new("succ(zero)"), "one".to_string(), true)
            .unwrap();
        map.put(MockTerm::new("succ(one)"), "two".to_string(), true)
            .unwrap();

        save(&map, &codec, &path).expect("Failed to save");

        let mut loaded = AbbrevMap::new();
        let summary = load(&path, &codec, &mut loaded, |event| {
            panic!("unexpected event: {}", event)
        })
        .expect("Failed to load");

        assert_eq!(summary.added, 2);
        assert_eq!(summary.errors, 0);
        assert_eq!(loaded.list(), map.list());

        // The temp file should be gone after a successful save.
        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("abbrevs.txt")]);
    }

    #[test]
    fn test_load_missing_file_leaves_map_unchanged() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nonexistent.txt");
        let codec = MockCodec::permissive();

        let mut map = AbbrevMap::new();
        map.put(MockTerm::new("zero"), "z".to_string(), true).unwrap();
        let revision = map.revision();

        assert!(load(&path, &codec, &mut map, |_| {}).is_err());
        assert_eq!(map.len(), 1);
        assert_eq!(map.revision(), revision);
    }

    #[test]
    fn test_save_overwrites_previous_file() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("abbrevs.txt");
        let codec = MockCodec::permissive();

        let mut map = AbbrevMap::new();
        map.put(MockTerm::new("zero"), "z".to_string(), true).unwrap();
        save(&map, &codec, &path).expect("Failed to save");

        map.remove(&MockTerm::new("zero"));
        map.put(MockTerm::new("one"), "o".to_string(), true).unwrap();
        save(&map, &codec, &path).expect("Failed to save");

        let mut loaded = AbbrevMap::new();
        load(&path, &codec, &mut loaded, |_| {}).expect("Failed to load");
        assert_eq!(loaded.export(), vec![(MockTerm::new("one"), "o".to_string())]);
    }
}
