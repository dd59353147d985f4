use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::listener::{ListenerId, ListenerSet};

/// One label bound to one term, with an enabled flag.
/// The enabled flag controls whether the host applies the abbreviation when
/// printing; the store itself only records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviation<T> {
    pub term: T,
    pub label: String,
    pub enabled: bool,
}

/// Errors for the local, recoverable failure modes of the map.
/// A failed call never leaves the map in a half-changed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbbrevError {
    // The label is already bound to a different term.
    DuplicateLabel(String),

    // The term is already abbreviated; the payload is the label it carries.
    DuplicateTerm(String),

    // The term has no binding in this map.
    UnknownTerm,

    // No entry carries this label.
    UnknownLabel(String),
}

impl fmt::Display for AbbrevError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AbbrevError::DuplicateLabel(label) => {
                write!(f, "the label '{}' is already in use", label)
            }
            AbbrevError::DuplicateTerm(label) => {
                write!(f, "the term is already abbreviated as '{}'", label)
            }
            AbbrevError::UnknownTerm => write!(f, "the term has no abbreviation"),
            AbbrevError::UnknownLabel(label) => {
                write!(f, "no abbreviation is named '{}'", label)
            }
        }
    }
}

impl From<AbbrevError> for String {
    fn from(error: AbbrevError) -> Self {
        error.to_string()
    }
}

struct Entry<T> {
    term: T,
    enabled: bool,
}

/// The abbreviation store for a single proof.
///
/// The map is bidirectional: every label names exactly one term and every term
/// carries exactly one label, and both directions are indexed. There are no
/// tombstones; a term with no binding is simply absent.
///
/// A proof owns its AbbrevMap for its whole lifetime. Nothing else mutates the
/// map directly; UI actions go through the operations here, and every
/// successful mutation bumps the revision counter and then notifies listeners,
/// after the change is fully applied. Listeners never see half-applied state.
pub struct AbbrevMap<T> {
    /// The label -> entry direction. Holds the term and the enabled flag.
    by_label: HashMap<String, Entry<T>>,

    /// The term -> label direction. Kept consistent with by_label at all times.
    by_term: HashMap<T, String>,

    /// Bumped on every mutation. Lets a consumer detect staleness cheaply.
    revision: u64,

    listeners: ListenerSet,
}

impl<T: Clone + Eq + Hash> AbbrevMap<T> {
    pub fn new() -> AbbrevMap<T> {
        AbbrevMap {
            by_label: HashMap::new(),
            by_term: HashMap::new(),
            revision: 0,
            listeners: ListenerSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The label carried by this term, if it has one.
    pub fn label_for(&self, term: &T) -> Option<&str> {
        self.by_term.get(term).map(|label| label.as_str())
    }

    /// The term named by this label, if any.
    pub fn term_for(&self, label: &str) -> Option<&T> {
        self.by_label.get(label).map(|entry| &entry.term)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Inserts a new binding, only if both the term and the label are unbound.
    /// On failure nothing changes and no notification fires.
    pub fn put(&mut self, term: T, label: String, enabled: bool) -> Result<(), AbbrevError> {
        if let Some(existing) = self.by_term.get(&term) {
            return Err(AbbrevError::DuplicateTerm(existing.clone()));
        }
        if self.by_label.contains_key(&label) {
            return Err(AbbrevError::DuplicateLabel(label));
        }
        self.by_term.insert(term.clone(), label.clone());
        self.by_label.insert(label, Entry { term, enabled });
        self.touch();
        Ok(())
    }

    /// Deletes the binding for a term. Returns false, without notifying,
    /// if the term was not bound.
    pub fn remove(&mut self, term: &T) -> bool {
        let label = match self.by_term.remove(term) {
            Some(label) => label,
            None => return false,
        };
        self.by_label.remove(&label);
        self.touch();
        true
    }

    /// Changes the label bound to a term, leaving the enabled flag alone.
    /// Renaming an entry to the label it already has is a successful no-op.
    pub fn rename(&mut self, term: &T, new_label: String) -> Result<(), AbbrevError> {
        let old_label = match self.by_term.get(term) {
            Some(label) => label.clone(),
            None => return Err(AbbrevError::UnknownTerm),
        };
        if old_label == new_label {
            return Ok(());
        }
        if self.by_label.contains_key(&new_label) {
            return Err(AbbrevError::DuplicateLabel(new_label));
        }
        let entry = self.by_label.remove(&old_label).unwrap();
        self.by_label.insert(new_label.clone(), entry);
        self.by_term.insert(term.clone(), new_label);
        self.touch();
        Ok(())
    }

    /// Re-points the entry named by a label at a new term, setting the enabled
    /// flag as given. This is the in-place edit of an abbreviation's target
    /// expression; the label survives.
    pub fn rebind(&mut self, label: &str, new_term: T, enabled: bool) -> Result<(), AbbrevError> {
        if !self.by_label.contains_key(label) {
            return Err(AbbrevError::UnknownLabel(label.to_string()));
        }
        if let Some(other) = self.by_term.get(&new_term) {
            if other != label {
                return Err(AbbrevError::DuplicateTerm(other.clone()));
            }
        }
        let entry = self.by_label.get_mut(label).unwrap();
        let old_term = std::mem::replace(&mut entry.term, new_term.clone());
        entry.enabled = enabled;
        self.by_term.remove(&old_term);
        self.by_term.insert(new_term, label.to_string());
        self.touch();
        Ok(())
    }

    /// Whether this term's abbreviation is enabled. False if the term is unbound.
    pub fn is_enabled(&self, term: &T) -> bool {
        match self.by_term.get(term) {
            Some(label) => self.by_label[label].enabled,
            None => false,
        }
    }

    /// Flips the enabled flag. A no-op, with no notification, if the term is
    /// unbound or already carries this flag.
    pub fn set_enabled(&mut self, term: &T, enabled: bool) {
        let label = match self.by_term.get(term) {
            Some(label) => label.clone(),
            None => return,
        };
        let entry = self.by_label.get_mut(&label).unwrap();
        if entry.enabled == enabled {
            return;
        }
        entry.enabled = enabled;
        self.touch();
    }

    /// Inserts unconditionally: any existing binding for this term, and any
    /// existing entry carrying this label, are removed first. The new entry is
    /// enabled. Best effort, no correctness guarantee; only cross-context
    /// transfer uses this, where duplicate rejection would block legitimate
    /// imports. One notification fires for the whole operation.
    pub fn force_put(&mut self, label: String, term: T) {
        if let Some(old_label) = self.by_term.remove(&term) {
            self.by_label.remove(&old_label);
        }
        if let Some(old_entry) = self.by_label.remove(&label) {
            self.by_term.remove(&old_entry.term);
        }
        self.by_term.insert(term.clone(), label.clone());
        self.by_label.insert(
            label,
            Entry {
                term,
                enabled: true,
            },
        );
        self.touch();
    }

    /// A snapshot of all bindings, ordered by label. The snapshot does not
    /// alias live state; mutating the map afterwards does not affect it.
    pub fn export(&self) -> Vec<(T, String)> {
        let mut pairs: Vec<_> = self
            .by_label
            .iter()
            .map(|(label, entry)| (entry.term.clone(), label.clone()))
            .collect();
        pairs.sort_by(|a, b| a.1.cmp(&b.1));
        pairs
    }

    /// A full snapshot including enabled flags, sorted by label for display.
    pub fn list(&self) -> Vec<Abbreviation<T>> {
        let mut entries: Vec<_> = self
            .by_label
            .iter()
            .map(|(label, entry)| Abbreviation {
                term: entry.term.clone(),
                label: label.clone(),
                enabled: entry.enabled,
            })
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        entries
    }

    /// Registers a change listener. The map calls it synchronously after each
    /// mutation. The caller must unsubscribe with the returned handle before
    /// it stops caring about this map.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Called after every mutation has been fully applied.
    fn touch(&mut self) {
        self.revision += 1;
        self.listeners.notify_all();
    }
}

impl<T: Clone + Eq + Hash> Default for AbbrevMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
