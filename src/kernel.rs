//////////////////////////////////////////////////////////////
/// Forth Interpreter Kernel
///
/// This module owns the two value stacks (integer and float), the small
/// loop stack used by `begin ... until`, and the flat variable arrays.
/// It manages the low-level data structures directly; the dictionary and
/// dispatch live one layer up.
use crate::messages::ForthError;

pub const STACK_SIZE: usize = 65536;
pub const LOOP_STACK_SIZE: usize = 64;

/// A fixed-capacity LIFO stack of `i64`. Used for both the data stack and,
/// with a smaller capacity, the loop stack.
pub struct IntStack {
    data: Vec<i64>,
    capacity: usize,
    name: &'static str,
}

impl IntStack {
    pub fn new(capacity: usize, name: &'static str) -> IntStack {
        IntStack {
            data: Vec::with_capacity(capacity),
            capacity,
            name,
        }
    }

    pub fn push(&mut self, val: i64, line: usize) -> Result<(), ForthError> {
        if self.data.len() >= self.capacity {
            return Err(ForthError::StackOverflow {
                stack: self.name,
                line,
            });
        }
        self.data.push(val);
        Ok(())
    }

    pub fn pop(&mut self, line: usize) -> Result<i64, ForthError> {
        self.data.pop().ok_or(ForthError::StackUnderflow {
            stack: self.name,
            line,
        })
    }

    pub fn top(&self, line: usize) -> Result<i64, ForthError> {
        self.data.last().copied().ok_or(ForthError::StackUnderflow {
            stack: self.name,
            line,
        })
    }

    /// peek(n, line) returns the nth item from the top (0 is the top itself).
    pub fn peek(&self, n: usize, line: usize) -> Result<i64, ForthError> {
        if n >= self.data.len() {
            return Err(ForthError::StackUnderflow {
                stack: self.name,
                line,
            });
        }
        Ok(self.data[self.data.len() - 1 - n])
    }

    /// roll(n, line) removes the nth item from the top and pushes it back on top.
    pub fn roll(&mut self, n: usize, line: usize) -> Result<(), ForthError> {
        if n >= self.data.len() {
            return Err(ForthError::StackUnderflow {
                stack: self.name,
                line,
            });
        }
        let idx = self.data.len() - 1 - n;
        let val = self.data.remove(idx);
        self.data.push(val);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &i64> {
        self.data.iter()
    }
}

/// A fixed-capacity LIFO stack of `f64`, used for the float stack.
pub struct FloatStack {
    data: Vec<f64>,
    capacity: usize,
    name: &'static str,
}

impl FloatStack {
    pub fn new(capacity: usize, name: &'static str) -> FloatStack {
        FloatStack {
            data: Vec::with_capacity(capacity),
            capacity,
            name,
        }
    }

    pub fn push(&mut self, val: f64, line: usize) -> Result<(), ForthError> {
        if self.data.len() >= self.capacity {
            return Err(ForthError::StackOverflow {
                stack: self.name,
                line,
            });
        }
        self.data.push(val);
        Ok(())
    }

    pub fn pop(&mut self, line: usize) -> Result<f64, ForthError> {
        self.data.pop().ok_or(ForthError::StackUnderflow {
            stack: self.name,
            line,
        })
    }

    pub fn top(&self, line: usize) -> Result<f64, ForthError> {
        self.data.last().copied().ok_or(ForthError::StackUnderflow {
            stack: self.name,
            line,
        })
    }

    pub fn peek(&self, n: usize, line: usize) -> Result<f64, ForthError> {
        if n >= self.data.len() {
            return Err(ForthError::StackUnderflow {
                stack: self.name,
                line,
            });
        }
        Ok(self.data[self.data.len() - 1 - n])
    }

    /// roll(n, line) removes the nth item from the top and pushes it back on top.
    pub fn roll(&mut self, n: usize, line: usize) -> Result<(), ForthError> {
        if n >= self.data.len() {
            return Err(ForthError::StackUnderflow {
                stack: self.name,
                line,
            });
        }
        let idx = self.data.len() - 1 - n;
        let val = self.data.remove(idx);
        self.data.push(val);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }
}

/// Kernel bundles the two value stacks, the loop stack, and the flat
/// variable arrays that back `IntVariable`/`FloatVariable` dictionary entries.
pub struct Kernel {
    pub int_stack: IntStack,
    pub float_stack: FloatStack,
    pub loop_stack: IntStack,
    int_vars: Vec<i64>,
    float_vars: Vec<f64>,
}

impl Kernel {
    pub fn new() -> Kernel {
        Kernel {
            int_stack: IntStack::new(STACK_SIZE, "data"),
            float_stack: FloatStack::new(STACK_SIZE, "float"),
            loop_stack: IntStack::new(LOOP_STACK_SIZE, "loop"),
            int_vars: Vec::new(),
            float_vars: Vec::new(),
        }
    }

    /// new_int_var allocates a fresh integer variable slot, returning its index.
    pub fn new_int_var(&mut self, initial: i64, line: usize) -> Result<usize, ForthError> {
        if self.int_vars.len() >= crate::dictionary::MAX_VARS {
            return Err(ForthError::VariableLimit { line });
        }
        self.int_vars.push(initial);
        Ok(self.int_vars.len() - 1)
    }

    /// new_float_var allocates a fresh float variable slot, returning its index.
    pub fn new_float_var(&mut self, initial: f64, line: usize) -> Result<usize, ForthError> {
        if self.float_vars.len() >= crate::dictionary::MAX_VARS {
            return Err(ForthError::VariableLimit { line });
        }
        self.float_vars.push(initial);
        Ok(self.float_vars.len() - 1)
    }

    pub fn int_var(&self, index: usize) -> i64 {
        self.int_vars[index]
    }

    pub fn set_int_var(&mut self, index: usize, value: i64) {
        self.int_vars[index] = value;
    }

    pub fn float_var(&self, index: usize) -> f64 {
        self.float_vars[index]
    }

    pub fn set_float_var(&mut self, index: usize, value: f64) {
        self.float_vars[index] = value;
    }

    pub fn int_vars(&self) -> &[i64] {
        &self.int_vars
    }

    pub fn float_vars(&self) -> &[f64] {
        &self.float_vars
    }
}

impl Default for Kernel {
    fn default() -> Kernel {
        Kernel::new()
    }
}

//////////////////////////////////////////////
/// TESTS
///
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_round_trips() {
        let mut s = IntStack::new(4, "data");
        s.push(1, 0).unwrap();
        s.push(2, 0).unwrap();
        assert_eq!(s.pop(0).unwrap(), 2);
        assert_eq!(s.pop(0).unwrap(), 1);
    }

    #[test]
    fn overflow_is_reported() {
        let mut s = IntStack::new(2, "data");
        s.push(1, 1).unwrap();
        s.push(2, 1).unwrap();
        let err = s.push(3, 1).unwrap_err();
        assert!(matches!(err, ForthError::StackOverflow { stack: "data", line: 1 }));
    }

    #[test]
    fn underflow_is_reported() {
        let mut s = IntStack::new(2, "data");
        let err = s.pop(5).unwrap_err();
        assert!(matches!(err, ForthError::StackUnderflow { stack: "data", line: 5 }));
    }

    #[test]
    fn peek_reads_without_removing() {
        let mut s = IntStack::new(4, "data");
        s.push(10, 0).unwrap();
        s.push(20, 0).unwrap();
        assert_eq!(s.peek(0, 0).unwrap(), 20);
        assert_eq!(s.peek(1, 0).unwrap(), 10);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn roll_moves_nth_item_to_top() {
        let mut s = IntStack::new(4, "data");
        s.push(1, 0).unwrap();
        s.push(2, 0).unwrap();
        s.push(3, 0).unwrap();
        s.roll(2, 0).unwrap(); // move the 1 to the top
        assert_eq!(s.pop(0).unwrap(), 1);
        assert_eq!(s.pop(0).unwrap(), 3);
        assert_eq!(s.pop(0).unwrap(), 2);
    }

    #[test]
    fn int_var_allocation_and_access() {
        let mut k = Kernel::new();
        let idx = k.new_int_var(0, 0).unwrap();
        k.set_int_var(idx, 42);
        assert_eq!(k.int_var(idx), 42);
    }

    #[test]
    fn float_stack_push_pop() {
        let mut s = FloatStack::new(4, "float");
        s.push(1.5, 0).unwrap();
        s.push(2.5, 0).unwrap();
        assert_eq!(s.pop(0).unwrap(), 2.5);
        assert_eq!(s.pop(0).unwrap(), 1.5);
    }
}
