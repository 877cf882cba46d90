//! Primitive words: arithmetic, comparisons, stack shuffling, variable
//! access, conversions, character I/O and math, all registered into a
//! `Dictionary` by name. None of these see the cursor - only control words do.

use std::io::{self, Write};

use crate::dictionary::Dictionary;
use crate::interp::Interp;
use crate::messages::ForthError;

pub fn install(dict: &mut Dictionary) {
    dict.add_primitive("+", f_add);
    dict.add_primitive("-", f_sub);
    dict.add_primitive("*", f_mul);
    dict.add_primitive("/", f_div);
    dict.add_primitive("%", f_mod);

    dict.add_primitive("f+", f_fadd);
    dict.add_primitive("f-", f_fsub);
    dict.add_primitive("f*", f_fmul);
    dict.add_primitive("f/", f_fdiv);
    dict.add_primitive("f%", f_fmod);

    dict.add_primitive(">", f_gt);
    dict.add_primitive("<", f_lt);
    dict.add_primitive(">=", f_ge);
    dict.add_primitive("<=", f_le);
    dict.add_primitive("==", f_eq);
    dict.add_primitive("~=", f_ne);

    dict.add_primitive("f>", f_fgt);
    dict.add_primitive("f<", f_flt);
    dict.add_primitive("f>=", f_fge);
    dict.add_primitive("f<=", f_fle);
    dict.add_primitive("f==", f_feq);
    dict.add_primitive("f~=", f_fne);

    dict.add_primitive(".", f_dot);
    dict.add_primitive(".x", f_dot_x);
    dict.add_primitive(".s", f_dot_s);
    dict.add_primitive("dup", f_dup);
    dict.add_primitive("swp", f_swp);
    dict.add_primitive("pick", f_pick);
    dict.add_primitive("!pick", f_pick_bang);
    dict.add_primitive("depth", f_depth);

    dict.add_primitive("f.", f_fdot);
    dict.add_primitive("f.x", f_fdot_x);
    dict.add_primitive("f.s", f_fdot_s);
    dict.add_primitive("fdup", f_fdup);
    dict.add_primitive("fswp", f_fswp);
    dict.add_primitive("fpick", f_fpick);
    dict.add_primitive("f!pick", f_fpick_bang);
    dict.add_primitive("fdepth", f_fdepth);

    dict.add_primitive("@", f_fetch);
    dict.add_primitive("!", f_store);
    dict.add_primitive("?", f_query);
    dict.add_primitive("++", f_incr);
    dict.add_primitive("--", f_decr);
    dict.add_primitive("+!", f_add_store);
    dict.add_primitive("-!", f_sub_store);
    dict.add_primitive("*!", f_mul_store);
    dict.add_primitive("/!", f_div_store);

    dict.add_primitive("f@", f_ffetch);
    dict.add_primitive("f!", f_fstore);
    dict.add_primitive("f?", f_fquery);
    dict.add_primitive("f+!", f_fadd_store);
    dict.add_primitive("f-!", f_fsub_store);
    dict.add_primitive("f*!", f_fmul_store);
    dict.add_primitive("f/!", f_fdiv_store);

    dict.add_primitive("f2i", f_f2i);
    dict.add_primitive("i2f", f_i2f);

    dict.add_primitive("emit", f_emit);
    dict.add_primitive("<cr>", f_cr);
    dict.add_primitive("<space>", f_space);
    dict.add_primitive("<tab>", f_tab);
    dict.add_primitive("geti", f_geti);
    dict.add_primitive("getf", f_getf);
    dict.add_primitive("getc", f_getc);

    dict.add_primitive("sqrt", f_sqrt);
    dict.add_primitive("sin", f_sin);
    dict.add_primitive("cos", f_cos);
    dict.add_primitive("tan", f_tan);
    dict.add_primitive("ceil", f_ceil);
    dict.add_primitive("floor", f_floor);
    dict.add_primitive("fabs", f_fabs);
    dict.add_primitive("log", f_log);
    dict.add_primitive("log10", f_log10);
    dict.add_primitive("pow", f_pow);

    dict.add_primitive("bye", f_bye);
}

/// A variable address is the slot index a `var`/`fvar` name pushed onto the
/// data stack: nonnegative for `IntVariable` slots, negative-encoded
/// (`-(slot + 1)`) for `FloatVariable` slots. These two convert an address
/// back into a slot, rejecting the other kind as a kind mismatch.
fn int_addr(addr: i64, word: &'static str, line: usize) -> Result<usize, ForthError> {
    if addr < 0 {
        return Err(ForthError::VariableKindMismatch { word: word.to_owned(), line });
    }
    Ok(addr as usize)
}

fn float_addr(addr: i64, word: &'static str, line: usize) -> Result<usize, ForthError> {
    if addr >= 0 {
        return Err(ForthError::VariableKindMismatch { word: word.to_owned(), line });
    }
    Ok((-(addr + 1)) as usize)
}

fn f_add(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.int_stack.pop(line)?;
    let a = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.push(a + b, line)
}

fn f_sub(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.int_stack.pop(line)?;
    let a = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.push(a - b, line)
}

fn f_mul(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.int_stack.pop(line)?;
    let a = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.push(a * b, line)
}

/// On a zero divisor the divisor is pushed back (the interactive driver
/// resumes with the stack exactly as the user left it) before the error
/// propagates.
fn f_div(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.int_stack.pop(line)?;
    if b == 0 {
        interp.kernel.int_stack.push(b, line)?;
        return Err(ForthError::DivisionByZero { line });
    }
    let a = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.push(a / b, line)
}

fn f_mod(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.int_stack.pop(line)?;
    if b == 0 {
        interp.kernel.int_stack.push(b, line)?;
        return Err(ForthError::DivisionByZero { line });
    }
    let a = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.push(a % b, line)
}

fn f_fadd(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.float_stack.pop(line)?;
    let a = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(a + b, line)
}

fn f_fsub(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.float_stack.pop(line)?;
    let a = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(a - b, line)
}

fn f_fmul(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.float_stack.pop(line)?;
    let a = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(a * b, line)
}

fn f_fdiv(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.float_stack.pop(line)?;
    if b == 0.0 {
        interp.kernel.float_stack.push(b, line)?;
        return Err(ForthError::DivisionByZero { line });
    }
    let a = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(a / b, line)
}

fn f_fmod(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.float_stack.pop(line)?;
    if b == 0.0 {
        interp.kernel.float_stack.push(b, line)?;
        return Err(ForthError::DivisionByZero { line });
    }
    let a = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(a % b, line)
}

fn f_gt(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_int(interp, |a, b| a > b)
}
fn f_lt(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_int(interp, |a, b| a < b)
}
fn f_ge(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_int(interp, |a, b| a >= b)
}
fn f_le(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_int(interp, |a, b| a <= b)
}
fn f_eq(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_int(interp, |a, b| a == b)
}
fn f_ne(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_int(interp, |a, b| a != b)
}

fn cmp_int(interp: &mut Interp, op: fn(i64, i64) -> bool) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.int_stack.pop(line)?;
    let a = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.push(op(a, b) as i64, line)
}

fn f_fgt(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_float(interp, |a, b| a > b)
}
fn f_flt(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_float(interp, |a, b| a < b)
}
fn f_fge(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_float(interp, |a, b| a >= b)
}
fn f_fle(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_float(interp, |a, b| a <= b)
}
fn f_feq(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_float(interp, |a, b| a == b)
}
fn f_fne(interp: &mut Interp) -> Result<(), ForthError> {
    cmp_float(interp, |a, b| a != b)
}

/// Float comparisons push their 0/1 result onto the integer stack.
fn cmp_float(interp: &mut Interp, op: fn(f64, f64) -> bool) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.float_stack.pop(line)?;
    let a = interp.kernel.float_stack.pop(line)?;
    interp.kernel.int_stack.push(op(a, b) as i64, line)
}

fn f_dot(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let val = interp.kernel.int_stack.pop(line)?;
    println!("{val}");
    Ok(())
}

fn f_dot_x(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    interp.kernel.int_stack.pop(line)?;
    Ok(())
}

fn f_dot_s(interp: &mut Interp) -> Result<(), ForthError> {
    print!("<{}> ", interp.kernel.int_stack.len());
    for v in interp.kernel.int_stack.iter() {
        print!("{v} ");
    }
    println!();
    Ok(())
}

fn f_dup(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let top = interp.kernel.int_stack.top(line)?;
    interp.kernel.int_stack.push(top, line)
}

fn f_swp(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.int_stack.pop(line)?;
    let a = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.push(b, line)?;
    interp.kernel.int_stack.push(a, line)
}

fn f_pick(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let n = interp.kernel.int_stack.pop(line)?;
    let val = interp.kernel.int_stack.peek(n as usize, line)?;
    interp.kernel.int_stack.push(val, line)
}

fn f_pick_bang(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let n = interp.kernel.int_stack.pop(line)?;
    interp.kernel.int_stack.roll(n as usize, line)
}

fn f_depth(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let depth = interp.kernel.int_stack.len() as i64;
    interp.kernel.int_stack.push(depth, line)
}

fn f_fdot(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let val = interp.kernel.float_stack.pop(line)?;
    println!("{val:.6}");
    Ok(())
}

fn f_fdot_x(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    interp.kernel.float_stack.pop(line)?;
    Ok(())
}

fn f_fdot_s(interp: &mut Interp) -> Result<(), ForthError> {
    print!("<{}> ", interp.kernel.float_stack.len());
    for v in interp.kernel.float_stack.iter() {
        print!("{v:.6} ");
    }
    println!();
    Ok(())
}

fn f_fdup(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let top = interp.kernel.float_stack.top(line)?;
    interp.kernel.float_stack.push(top, line)
}

fn f_fswp(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let b = interp.kernel.float_stack.pop(line)?;
    let a = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(b, line)?;
    interp.kernel.float_stack.push(a, line)
}

fn f_fpick(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let n = interp.kernel.int_stack.pop(line)?;
    let val = interp.kernel.float_stack.peek(n as usize, line)?;
    interp.kernel.float_stack.push(val, line)
}

fn f_fpick_bang(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let n = interp.kernel.int_stack.pop(line)?;
    interp.kernel.float_stack.roll(n as usize, line)
}

fn f_fdepth(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let depth = interp.kernel.float_stack.len() as i64;
    interp.kernel.int_stack.push(depth, line)
}

fn f_fetch(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "@", line)?;
    interp.kernel.int_stack.push(interp.kernel.int_var(idx), line)
}

fn f_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "!", line)?;
    let val = interp.kernel.int_stack.pop(line)?;
    interp.kernel.set_int_var(idx, val);
    Ok(())
}

fn f_query(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "?", line)?;
    println!("{}", interp.kernel.int_var(idx));
    Ok(())
}

fn f_incr(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "++", line)?;
    interp.kernel.set_int_var(idx, interp.kernel.int_var(idx) + 1);
    Ok(())
}

fn f_decr(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "--", line)?;
    interp.kernel.set_int_var(idx, interp.kernel.int_var(idx) - 1);
    Ok(())
}

fn f_add_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "+!", line)?;
    let x = interp.kernel.int_stack.pop(line)?;
    interp.kernel.set_int_var(idx, interp.kernel.int_var(idx) + x);
    Ok(())
}

fn f_sub_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "-!", line)?;
    let x = interp.kernel.int_stack.pop(line)?;
    interp.kernel.set_int_var(idx, interp.kernel.int_var(idx) - x);
    Ok(())
}

fn f_mul_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "*!", line)?;
    let x = interp.kernel.int_stack.pop(line)?;
    interp.kernel.set_int_var(idx, interp.kernel.int_var(idx) * x);
    Ok(())
}

fn f_div_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = int_addr(addr, "/!", line)?;
    let x = interp.kernel.int_stack.pop(line)?;
    if x == 0 {
        interp.kernel.int_stack.push(x, line)?;
        return Err(ForthError::DivisionByZero { line });
    }
    interp.kernel.set_int_var(idx, interp.kernel.int_var(idx) / x);
    Ok(())
}

fn f_ffetch(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = float_addr(addr, "f@", line)?;
    interp.kernel.float_stack.push(interp.kernel.float_var(idx), line)
}

fn f_fstore(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = float_addr(addr, "f!", line)?;
    let val = interp.kernel.float_stack.pop(line)?;
    interp.kernel.set_float_var(idx, val);
    Ok(())
}

fn f_fquery(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = float_addr(addr, "f?", line)?;
    println!("{:.6}", interp.kernel.float_var(idx));
    Ok(())
}

fn f_fadd_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = float_addr(addr, "f+!", line)?;
    let x = interp.kernel.float_stack.pop(line)?;
    interp.kernel.set_float_var(idx, interp.kernel.float_var(idx) + x);
    Ok(())
}

fn f_fsub_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = float_addr(addr, "f-!", line)?;
    let x = interp.kernel.float_stack.pop(line)?;
    interp.kernel.set_float_var(idx, interp.kernel.float_var(idx) - x);
    Ok(())
}

fn f_fmul_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = float_addr(addr, "f*!", line)?;
    let x = interp.kernel.float_stack.pop(line)?;
    interp.kernel.set_float_var(idx, interp.kernel.float_var(idx) * x);
    Ok(())
}

fn f_fdiv_store(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let addr = interp.kernel.int_stack.pop(line)?;
    let idx = float_addr(addr, "f/!", line)?;
    let x = interp.kernel.float_stack.pop(line)?;
    if x == 0.0 {
        interp.kernel.float_stack.push(x, line)?;
        return Err(ForthError::DivisionByZero { line });
    }
    interp.kernel.set_float_var(idx, interp.kernel.float_var(idx) / x);
    Ok(())
}

fn f_f2i(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let val = interp.kernel.float_stack.pop(line)?;
    interp.kernel.int_stack.push(val as i64, line)
}

fn f_i2f(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let val = interp.kernel.int_stack.pop(line)?;
    interp.kernel.float_stack.push(val as f64, line)
}

fn f_emit(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let val = interp.kernel.int_stack.pop(line)?;
    print!("{}", (val as u8) as char);
    io::stdout().flush().ok();
    Ok(())
}

fn f_cr(_interp: &mut Interp) -> Result<(), ForthError> {
    println!();
    Ok(())
}

fn f_space(_interp: &mut Interp) -> Result<(), ForthError> {
    print!(" ");
    Ok(())
}

fn f_tab(_interp: &mut Interp) -> Result<(), ForthError> {
    print!("\t");
    Ok(())
}

fn f_geti(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let mut raw = String::new();
    io::stdin().read_line(&mut raw).map_err(|source| ForthError::Io { line, source })?;
    let val: i64 = raw.trim().parse().unwrap_or(0);
    interp.kernel.int_stack.push(val, line)
}

fn f_getf(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let mut raw = String::new();
    io::stdin().read_line(&mut raw).map_err(|source| ForthError::Io { line, source })?;
    let val: f64 = raw.trim().parse().unwrap_or(0.0);
    interp.kernel.float_stack.push(val, line)
}

fn f_getc(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let mut raw = String::new();
    io::stdin().read_line(&mut raw).map_err(|source| ForthError::Io { line, source })?;
    let val = raw.bytes().next().unwrap_or(0);
    interp.kernel.int_stack.push(val as i64, line)
}

fn f_sqrt(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::sqrt)
}
fn f_sin(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::sin)
}
fn f_cos(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::cos)
}
fn f_tan(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::tan)
}
fn f_ceil(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::ceil)
}
fn f_floor(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::floor)
}
fn f_fabs(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::abs)
}
fn f_log(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::ln)
}
fn f_log10(interp: &mut Interp) -> Result<(), ForthError> {
    unary_float(interp, f64::log10)
}

fn unary_float(interp: &mut Interp, op: fn(f64) -> f64) -> Result<(), ForthError> {
    let line = interp.line_count;
    let val = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(op(val), line)
}

fn f_pow(interp: &mut Interp) -> Result<(), ForthError> {
    let line = interp.line_count;
    let exp = interp.kernel.float_stack.pop(line)?;
    let base = interp.kernel.float_stack.pop(line)?;
    interp.kernel.float_stack.push(base.powf(exp), line)
}

fn f_bye(interp: &mut Interp) -> Result<(), ForthError> {
    interp.running = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internals::evaluator::eval;

    #[test]
    fn addition_round_trips_through_the_stack() {
        let mut interp = Interp::new();
        eval(&mut interp, "3 4 +").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 7);
    }

    #[test]
    fn division_by_zero_restores_the_divisor() {
        let mut interp = Interp::new();
        eval(&mut interp, "10 0").unwrap();
        let err = eval(&mut interp, "/").unwrap_err();
        assert!(matches!(err, ForthError::DivisionByZero { .. }));
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 0);
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 10);
    }

    #[test]
    fn variable_round_trip_via_addresses() {
        let mut interp = Interp::new();
        eval(&mut interp, "3 var n").unwrap();
        eval(&mut interp, "9 n !").unwrap();
        eval(&mut interp, "n @").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 9);
    }

    #[test]
    fn float_accessor_on_int_variable_is_a_kind_mismatch() {
        let mut interp = Interp::new();
        eval(&mut interp, "3 var n").unwrap();
        let err = eval(&mut interp, "n f@").unwrap_err();
        assert!(matches!(err, ForthError::VariableKindMismatch { .. }));
    }

    #[test]
    fn int_accessor_on_float_variable_is_a_kind_mismatch() {
        let mut interp = Interp::new();
        eval(&mut interp, "3.0 fvar x").unwrap();
        let err = eval(&mut interp, "x @").unwrap_err();
        assert!(matches!(err, ForthError::VariableKindMismatch { .. }));
    }

    #[test]
    fn f2i_and_i2f_round_trip() {
        let mut interp = Interp::new();
        eval(&mut interp, "7 i2f f2i").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 7);
    }

    #[test]
    fn pick_copies_without_removing() {
        let mut interp = Interp::new();
        eval(&mut interp, "1 2 3 2 pick").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 1);
        assert_eq!(interp.kernel.int_stack.len(), 3);
    }

    #[test]
    fn bang_pick_moves_the_item_to_the_top() {
        let mut interp = Interp::new();
        eval(&mut interp, "1 2 3 2 !pick").unwrap();
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 1);
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 3);
        assert_eq!(interp.kernel.int_stack.pop(0).unwrap(), 2);
    }
}
