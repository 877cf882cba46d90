//! Control words: the only dictionary entries that see the enclosing source
//! string and cursor directly, so they can implement branching and looping
//! by scanning forward/rewinding instead of compiling a separate bytecode.

use crate::dictionary::{Dictionary, DictEntry};
use crate::interp::Interp;
use crate::messages::ForthError;

use super::tokenizer::{scan_word, skip_spaces};

pub fn install(dict: &mut Dictionary) {
    dict.add_control("if", c_if);
    dict.add_control("else", c_else);
    dict.add_control("then", c_then);
    dict.add_control("begin", c_begin);
    dict.add_control("until", c_until);
    dict.add_control("var", c_var);
    dict.add_control("fvar", c_fvar);
    dict.add_control("show", c_show);
}

/// Scans forward from `*pos`, tracking `if`/`then` nesting starting at depth
/// 1 (the `if` that is skipping). Stops right after a `then` at depth 0, or
/// right after an `else` encountered at depth 1, whichever comes first. Runs
/// off the end of `src` quietly if neither appears, per the invariant that
/// the cursor never advances past the terminator.
fn skip_to_else_or_then(src: &str, pos: &mut usize) {
    let mut depth = 1;
    loop {
        skip_spaces(src, pos);
        if *pos >= src.len() {
            return;
        }
        let word = scan_word(src, pos);
        match word {
            "if" => depth += 1,
            "then" => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            "else" if depth == 1 => return,
            _ => {}
        }
    }
}

/// Scans forward from `*pos` to the `then` matching the `if` this `else`
/// belongs to, tracking nested `if`/`then` pairs opened inside the
/// else-branch itself.
fn skip_to_then(src: &str, pos: &mut usize) {
    let mut depth = 0;
    loop {
        skip_spaces(src, pos);
        if *pos >= src.len() {
            return;
        }
        let word = scan_word(src, pos);
        match word {
            "if" => depth += 1,
            "then" => {
                if depth == 0 {
                    return;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
}

fn c_if(interp: &mut Interp, src: &str, pos: &mut usize) -> Result<(), ForthError> {
    let line = interp.line_count;
    let cond = interp.kernel.int_stack.pop(line)?;
    if cond == 0 {
        skip_to_else_or_then(src, pos);
    }
    Ok(())
}

/// Reached only by falling through the truthy branch of an `if`; skips the
/// else-branch body.
fn c_else(_interp: &mut Interp, src: &str, pos: &mut usize) -> Result<(), ForthError> {
    skip_to_then(src, pos);
    Ok(())
}

fn c_then(_interp: &mut Interp, _src: &str, _pos: &mut usize) -> Result<(), ForthError> {
    Ok(())
}

fn c_begin(interp: &mut Interp, _src: &str, pos: &mut usize) -> Result<(), ForthError> {
    let line = interp.line_count;
    if interp.kernel.loop_stack.len() >= crate::kernel::LOOP_STACK_SIZE {
        return Err(ForthError::LoopStackOverflow { line });
    }
    interp.kernel.loop_stack.push(*pos as i64, line)
}

fn c_until(interp: &mut Interp, _src: &str, pos: &mut usize) -> Result<(), ForthError> {
    let line = interp.line_count;
    if interp.kernel.loop_stack.is_empty() {
        return Err(ForthError::LoopStackUnderflow { line });
    }
    let cond = interp.kernel.int_stack.pop(line)?;
    if cond == 0 {
        let back_to = interp.kernel.loop_stack.top(line)?;
        *pos = back_to as usize;
    } else {
        interp.kernel.loop_stack.pop(line)?;
    }
    Ok(())
}

fn c_var(interp: &mut Interp, src: &str, pos: &mut usize) -> Result<(), ForthError> {
    skip_spaces(src, pos);
    let name = scan_word(src, pos).to_owned();
    let line = interp.line_count;
    let value = interp.kernel.int_stack.pop(line).unwrap_or(0);
    if interp.dict.has_matching_int_var(&name) {
        let idx = interp.dict.find(&name).expect("has_matching_int_var implies find succeeds");
        if let DictEntry::IntVariable(slot) = *interp.dict.entry(idx) {
            interp.kernel.set_int_var(slot, value);
        }
    } else {
        let slot = interp.kernel.new_int_var(value, line)?;
        interp.dict.install_int_var(&name, slot);
    }
    Ok(())
}

fn c_fvar(interp: &mut Interp, src: &str, pos: &mut usize) -> Result<(), ForthError> {
    skip_spaces(src, pos);
    let name = scan_word(src, pos).to_owned();
    let line = interp.line_count;
    let value = interp.kernel.float_stack.pop(line).unwrap_or(0.0);
    if interp.dict.has_matching_float_var(&name) {
        let idx = interp.dict.find(&name).expect("has_matching_float_var implies find succeeds");
        if let DictEntry::FloatVariable(slot) = *interp.dict.entry(idx) {
            interp.kernel.set_float_var(slot, value);
        }
    } else {
        let slot = interp.kernel.new_float_var(value, line)?;
        interp.dict.install_float_var(&name, slot);
    }
    Ok(())
}

fn c_show(interp: &mut Interp, src: &str, pos: &mut usize) -> Result<(), ForthError> {
    skip_spaces(src, pos);
    let token = scan_word(src, pos).to_owned();
    match token.as_str() {
        "*" => {
            for (name, entry) in interp.dict.iter() {
                println!("{name}\t{}", entry.kind_name());
            }
        }
        "*p" => {
            for (name, entry) in interp.dict.iter() {
                if matches!(entry, DictEntry::Primitive(_) | DictEntry::Control(_)) {
                    println!("{name}");
                }
            }
        }
        "*f" => {
            for (name, entry) in interp.dict.iter() {
                if let DictEntry::UserDefined(body) = entry {
                    println!(": {name} {body} ;");
                }
            }
        }
        "*m" => {
            for (name, entry) in interp.dict.iter() {
                if matches!(entry, DictEntry::Module) {
                    println!("{name}");
                }
            }
        }
        "*v" => {
            for (name, entry) in interp.dict.iter() {
                match entry {
                    DictEntry::IntVariable(slot) => println!("{name}\t{}", interp.kernel.int_var(*slot)),
                    DictEntry::FloatVariable(slot) => println!("{name}\t{}", interp.kernel.float_var(*slot)),
                    _ => {}
                }
            }
        }
        name => {
            if let Some(idx) = interp.dict.find(name) {
                if let DictEntry::UserDefined(body) = interp.dict.entry(idx) {
                    println!(": {name} {body} ;");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internals::evaluator::eval;

    #[test]
    fn if_truthy_falls_through() {
        let mut interp = Interp::new();
        eval(&mut interp, "1 if 10 else 20 then").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 10);
    }

    #[test]
    fn if_falsy_skips_to_else() {
        let mut interp = Interp::new();
        eval(&mut interp, "0 if 10 else 20 then").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 20);
    }

    #[test]
    fn nested_if_is_skipped_as_a_unit() {
        let mut interp = Interp::new();
        eval(&mut interp, "0 if 1 if 10 then 11 else 20 then").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 20);
    }

    #[test]
    fn begin_until_loops_until_truthy() {
        let mut interp = Interp::new();
        eval(&mut interp, "var n 0 n ! begin n ++ n @ 5 >= until n @").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 5);
    }

    #[test]
    fn var_reuses_its_slot_on_redeclaration() {
        let mut interp = Interp::new();
        eval(&mut interp, "3 var n").unwrap();
        eval(&mut interp, "9 var n").unwrap();
        let idx = interp.dict.find("n").unwrap();
        match interp.dict.entry(idx) {
            DictEntry::IntVariable(slot) => assert_eq!(interp.kernel.int_var(*slot), 9),
            _ => panic!("expected IntVariable"),
        }
    }
}
