//! The dispatch loop: walks a source string from left to right, classifies
//! each token, and acts on it per the entry kind found in the dictionary.
//!
//! Lookups are resolved to an owned `DictEntry` clone before `interp` is
//! borrowed mutably again, so a `Primitive`/`Control` call never overlaps
//! with the immutable borrow that found it in the dictionary.

use crate::dictionary::DictEntry;
use crate::interp::Interp;
use crate::messages::ForthError;

use super::tokenizer::{is_number_start, parse_char, parse_number, parse_string, scan_word, skip_spaces};

/// eval walks `src` from its start, dispatching every token it finds.
/// Used both for top-level lines and recursively for a user-defined body.
pub fn eval(interp: &mut Interp, src: &str) -> Result<(), ForthError> {
    let mut pos = 0;
    let len = src.len();
    loop {
        skip_spaces(src, &mut pos);
        if pos >= len {
            return Ok(());
        }
        let bytes = src.as_bytes();
        let byte = bytes[pos];
        if is_number_start(bytes, pos) {
            parse_number(interp, bytes, &mut pos)?;
            continue;
        }
        if byte == b'\'' {
            parse_char(interp, bytes, &mut pos)?;
            continue;
        }
        if byte == b'"' {
            parse_string(interp, bytes, &mut pos)?;
            continue;
        }
        let word = scan_word(src, &mut pos).to_owned();
        dispatch_word(interp, src, &mut pos, &word)?;
    }
}

fn dispatch_word(interp: &mut Interp, src: &str, pos: &mut usize, word: &str) -> Result<(), ForthError> {
    let line = interp.line_count;
    let idx = interp
        .dict
        .find(word)
        .ok_or_else(|| ForthError::UndefinedWord { word: word.to_owned(), line })?;
    let entry = interp.dict.entry(idx).clone();
    match entry {
        DictEntry::Primitive(f) => f(interp),
        DictEntry::Control(f) => f(interp, src, pos),
        DictEntry::UserDefined(body) => eval(interp, &body),
        DictEntry::IntVariable(slot) => interp.kernel.int_stack.push(slot as i64, line),
        // Float-variable addresses are pushed negative-encoded (-(slot + 1))
        // so `@`/`f@` and their families can tell, from the address alone,
        // which variable kind it was minted for and reject the other one.
        DictEntry::FloatVariable(slot) => interp.kernel.int_stack.push(-(slot as i64) - 1, line),
        DictEntry::Module => interp.kernel.int_stack.push(idx as i64, line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_two_numbers_and_prints() {
        let mut interp = Interp::new();
        eval(&mut interp, "1 2 +").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 3);
    }

    #[test]
    fn undefined_word_is_reported() {
        let mut interp = Interp::new();
        let err = eval(&mut interp, "frobnicate").unwrap_err();
        assert!(matches!(err, ForthError::UndefinedWord { .. }));
    }

    #[test]
    fn user_defined_word_recurses_into_its_body() {
        let mut interp = Interp::new();
        interp.dict.add_or_update_definition("sq", "dup *".to_owned());
        eval(&mut interp, "5 sq").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 25);
    }

    #[test]
    fn int_variable_pushes_its_slot_index() {
        let mut interp = Interp::new();
        let slot = interp.kernel.new_int_var(0, 0).unwrap();
        interp.dict.install_int_var("n", slot);
        eval(&mut interp, "n").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), slot as i64);
    }

    #[test]
    fn string_literal_then_arithmetic_share_the_same_stack() {
        let mut interp = Interp::new();
        eval(&mut interp, "\"a\" 1 +").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), b'a' as i64 + 1);
    }
}
