//! The word dictionary: an ordered, append-only table of named entries.
//!
//! Lookup is a linear scan (first match wins) exactly as the original source
//! does it; the dictionary stays small enough in practice that this is the
//! right trade against the bookkeeping of a hash map with stable insertion
//! order and case-sensitive Forth-style names.

use crate::interp::{ControlFn, PrimitiveFn};

pub const MAX_DICT: usize = 4096;
pub const MAX_VARS: usize = 4096;
pub const MAX_WORD: usize = 64;
pub const MAX_BODY: usize = 1024;

#[derive(Clone)]
pub enum DictEntry {
    Primitive(PrimitiveFn),
    Control(ControlFn),
    UserDefined(String),
    IntVariable(usize),
    FloatVariable(usize),
    Module,
}

impl DictEntry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DictEntry::Primitive(_) => "primitive",
            DictEntry::Control(_) => "control",
            DictEntry::UserDefined(_) => "definition",
            DictEntry::IntVariable(_) => "variable",
            DictEntry::FloatVariable(_) => "float-variable",
            DictEntry::Module => "module",
        }
    }
}

struct Word {
    name: String,
    entry: DictEntry,
}

/// Owns the ordered word table. Does not own the variable value arrays
/// themselves (those live in `Kernel`) - only the index each variable name
/// was assigned.
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary { words: Vec::new() }
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.words.iter().position(|w| w.name == name)
    }

    pub fn entry(&self, index: usize) -> &DictEntry {
        &self.words[index].entry
    }

    pub fn name(&self, index: usize) -> &str {
        &self.words[index].name
    }

    pub fn add_primitive(&mut self, name: &str, f: PrimitiveFn) {
        self.words.push(Word {
            name: name.to_owned(),
            entry: DictEntry::Primitive(f),
        });
    }

    pub fn add_control(&mut self, name: &str, f: ControlFn) {
        self.words.push(Word {
            name: name.to_owned(),
            entry: DictEntry::Control(f),
        });
    }

    /// add_or_update_definition installs a user-defined word, or overwrites
    /// the body of an existing one in place. Returns true when this was a
    /// redefinition (so the caller can report it in interactive mode).
    pub fn add_or_update_definition(&mut self, name: &str, body: String) -> bool {
        if let Some(idx) = self.find(name) {
            if matches!(self.words[idx].entry, DictEntry::UserDefined(_)) {
                self.words[idx].entry = DictEntry::UserDefined(body);
                return true;
            }
        }
        self.words.push(Word {
            name: name.to_owned(),
            entry: DictEntry::UserDefined(body),
        });
        false
    }

    /// add_module registers a module marker; used only so later `# name`
    /// imports of the same name can be deduplicated.
    pub fn add_module(&mut self, dotted_name: &str) {
        self.words.push(Word {
            name: dotted_name.to_owned(),
            entry: DictEntry::Module,
        });
    }

    pub fn is_primitive_or_control(&self, name: &str) -> bool {
        match self.find(name).map(|i| &self.words[i].entry) {
            Some(DictEntry::Primitive(_)) | Some(DictEntry::Control(_)) => true,
            _ => false,
        }
    }

    /// install_int_var reuses the slot of an existing `IntVariable` named
    /// `name`, or converts/creates a fresh entry with a newly allocated slot.
    /// Returns the slot index to initialize.
    pub fn install_int_var(&mut self, name: &str, new_index: usize) -> usize {
        if let Some(idx) = self.find(name) {
            if let DictEntry::IntVariable(existing) = self.words[idx].entry {
                return existing;
            }
            self.words[idx].entry = DictEntry::IntVariable(new_index);
            return new_index;
        }
        self.words.push(Word {
            name: name.to_owned(),
            entry: DictEntry::IntVariable(new_index),
        });
        new_index
    }

    pub fn install_float_var(&mut self, name: &str, new_index: usize) -> usize {
        if let Some(idx) = self.find(name) {
            if let DictEntry::FloatVariable(existing) = self.words[idx].entry {
                return existing;
            }
            self.words[idx].entry = DictEntry::FloatVariable(new_index);
            return new_index;
        }
        self.words.push(Word {
            name: name.to_owned(),
            entry: DictEntry::FloatVariable(new_index),
        });
        new_index
    }

    /// Returns whether the existing entry at `name`, if any, is an
    /// `IntVariable` already - used to decide if `install_int_var` will reuse
    /// a slot rather than allocate a new one.
    pub fn has_matching_int_var(&self, name: &str) -> bool {
        matches!(
            self.find(name).map(|i| &self.words[i].entry),
            Some(DictEntry::IntVariable(_))
        )
    }

    pub fn has_matching_float_var(&self, name: &str) -> bool {
        matches!(
            self.find(name).map(|i| &self.words[i].entry),
            Some(DictEntry::FloatVariable(_))
        )
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictEntry)> {
        self.words.iter().map(|w| (w.name.as_str(), &w.entry))
    }
}

impl Default for Dictionary {
    fn default() -> Dictionary {
        Dictionary::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_primitive(_: &mut crate::interp::Interp) -> Result<(), crate::messages::ForthError> {
        Ok(())
    }

    #[test]
    fn lookup_is_first_match_in_insertion_order() {
        let mut dict = Dictionary::new();
        dict.add_primitive("dup", noop_primitive);
        dict.add_or_update_definition("sq", "dup *".to_owned());
        assert_eq!(dict.find("dup"), Some(0));
        assert_eq!(dict.find("sq"), Some(1));
        assert_eq!(dict.find("missing"), None);
    }

    #[test]
    fn redefining_a_user_word_updates_in_place() {
        let mut dict = Dictionary::new();
        let first = dict.add_or_update_definition("sq", "dup *".to_owned());
        assert!(!first);
        let second = dict.add_or_update_definition("sq", "dup * 2 +".to_owned());
        assert!(second);
        assert_eq!(dict.len(), 1);
        match dict.entry(0) {
            DictEntry::UserDefined(body) => assert_eq!(body, "dup * 2 +"),
            _ => panic!("expected UserDefined"),
        }
    }

    #[test]
    fn int_var_slot_is_reused_on_redeclaration() {
        let mut dict = Dictionary::new();
        let slot = dict.install_int_var("n", 0);
        assert_eq!(slot, 0);
        // "redeclare" with a candidate index that should be ignored, since the
        // existing slot is reused.
        let reused = dict.install_int_var("n", 7);
        assert_eq!(reused, 0);
    }

    #[test]
    fn converting_other_kind_to_variable_takes_new_slot() {
        let mut dict = Dictionary::new();
        dict.add_or_update_definition("n", "1 2 +".to_owned());
        let slot = dict.install_int_var("n", 3);
        assert_eq!(slot, 3);
        assert!(matches!(dict.entry(dict.find("n").unwrap()), DictEntry::IntVariable(3)));
    }
}
