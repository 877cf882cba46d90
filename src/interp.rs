//////////////////////////////////////////////////////////////////
/// interp.rs
///
/// Top-level interpreter state: the kernel, the dictionary, the active
/// readers, and the bits of bookkeeping (line count, interactive flag,
/// running flag) the driver and control words need.
///
use std::path::{Path, PathBuf};

use crate::dictionary::Dictionary;
use crate::files::FileHandle;
use crate::kernel::Kernel;
use crate::messages::{ForthError, Msg};

pub type PrimitiveFn = fn(&mut Interp) -> Result<(), ForthError>;
pub type ControlFn = fn(&mut Interp, &str, &mut usize) -> Result<(), ForthError>;

pub struct Interp {
    pub kernel: Kernel,
    pub dict: Dictionary,
    pub msg: Msg,
    pub reader: Vec<FileHandle>,
    pub library: Vec<PathBuf>,
    pub line_count: usize,
    pub interactive: bool,
    pub running: bool,
    pub show_stack: bool,
}

impl Interp {
    pub fn new() -> Interp {
        let mut interp = Interp {
            kernel: Kernel::new(),
            dict: Dictionary::new(),
            msg: Msg::new(),
            reader: vec![FileHandle::stdin()],
            library: Vec::new(),
            line_count: 0,
            interactive: true,
            running: true,
            show_stack: false,
        };
        crate::internals::builtin::install(&mut interp.dict);
        crate::internals::control::install(&mut interp.dict);
        interp
    }

    /// eval dispatches the compile/import/evaluate choice for one logical
    /// line, matching the top-level driver loop in the spec.
    pub fn dispatch_line(&mut self, line: &str) -> Result<(), ForthError> {
        let trimmed = line.trim_start_matches(' ');
        if trimmed.starts_with(':') {
            crate::internals::compiler::compile(self, trimmed)
        } else if trimmed.starts_with('#') {
            crate::internals::compiler::import(self, trimmed)
        } else {
            crate::internals::evaluator::eval(self, trimmed)
        }
    }

    /// run is the top-level driver: read a line, dispatch it, repeat until
    /// EOF or `running` is cleared. Errors are fatal outside interactive mode.
    pub fn run(&mut self) -> Result<(), ForthError> {
        loop {
            if !self.running {
                return Ok(());
            }
            let line = {
                let reader = self.reader.last_mut().expect("at least one reader");
                reader.next_logical_line(self.line_count)?
            };
            let Some(line) = line else {
                if self.reader.len() > 1 {
                    self.reader.pop();
                    continue;
                }
                return Ok(());
            };
            self.line_count += 1;
            if let Err(e) = self.dispatch_line(&line) {
                self.msg.report(&e);
                if !self.interactive || always_halts(&e) {
                    self.running = false;
                    return Err(e);
                }
            }
        }
    }

    /// Resolves `name.foo` against the current directory first, then each
    /// configured library directory in order.
    pub fn resolve_module_path(&self, dotted_name: &str) -> Option<PathBuf> {
        let here = PathBuf::from(dotted_name);
        if here.is_file() {
            return Some(here);
        }
        for dir in &self.library {
            let candidate: PathBuf = Path::new(dir).join(dotted_name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

impl Default for Interp {
    fn default() -> Interp {
        Interp::new()
    }
}

/// Loop-stack overflow/underflow and hitting the variable limit corrupt the
/// cursor/dictionary bookkeeping enough that continuing in interactive mode
/// isn't safe - these halt unconditionally, unlike the rest of `ForthError`.
fn always_halts(e: &ForthError) -> bool {
    matches!(
        e,
        ForthError::LoopStackOverflow { .. } | ForthError::LoopStackUnderflow { .. } | ForthError::VariableLimit { .. }
    )
}
