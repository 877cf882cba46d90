//! Error types and the console reporter.
//!
//! `ForthError` covers every row of the error table; `Msg` is the reporter that
//! prints them (and ad-hoc warnings/info) to stderr, gated by a `DebugLevel`.
//! This mirrors the teacher's own hand-rolled `Msg`/`DebugLevel` pair rather than
//! reaching for `log`/`tracing` - the interpreter has always built this itself.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DebugLevel::Error => "ERROR",
            DebugLevel::Warning => "WARNING",
            DebugLevel::Info => "INFO",
            DebugLevel::Debug => "DEBUG",
        };
        write!(f, "{s}")
    }
}

/// Every fallible condition the interpreter can hit, with the source line it happened on.
#[derive(Debug, Error)]
pub enum ForthError {
    #[error("stack overflow on {stack} stack at line {line}")]
    StackOverflow { stack: &'static str, line: usize },

    #[error("stack underflow on {stack} stack at line {line}")]
    StackUnderflow { stack: &'static str, line: usize },

    #[error("division by zero at line {line}")]
    DivisionByZero { line: usize },

    #[error("undefined word `{word}` at line {line}")]
    UndefinedWord { word: String, line: usize },

    #[error("unterminated character literal at line {line}")]
    UnterminatedChar { line: usize },

    #[error("unterminated string literal at line {line}")]
    UnterminatedString { line: usize },

    #[error("missing `;` terminating definition at line {line}")]
    UnterminatedDefinition { line: usize },

    #[error("loop stack overflow at line {line}")]
    LoopStackOverflow { line: usize },

    #[error("unmatched `until` at line {line}")]
    LoopStackUnderflow { line: usize },

    #[error("variable limit reached at line {line}")]
    VariableLimit { line: usize },

    #[error("`{word}` used on a variable of the wrong kind at line {line}")]
    VariableKindMismatch { word: String, line: usize },

    #[error("unable to open module `{name}` at line {line}")]
    ModuleOpenFailure { name: String, line: usize },

    #[error("I/O error at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ForthError {
    pub fn line(&self) -> usize {
        match self {
            ForthError::StackOverflow { line, .. }
            | ForthError::StackUnderflow { line, .. }
            | ForthError::DivisionByZero { line }
            | ForthError::UndefinedWord { line, .. }
            | ForthError::UnterminatedChar { line }
            | ForthError::UnterminatedString { line }
            | ForthError::UnterminatedDefinition { line }
            | ForthError::LoopStackOverflow { line }
            | ForthError::LoopStackUnderflow { line }
            | ForthError::VariableLimit { line }
            | ForthError::VariableKindMismatch { line, .. }
            | ForthError::ModuleOpenFailure { line, .. }
            | ForthError::Io { line, .. } => *line,
        }
    }
}

/// Console reporter. Holds the active threshold; messages below it are dropped.
pub struct Msg {
    level: DebugLevel,
}

impl Msg {
    pub fn new() -> Msg {
        Msg {
            level: DebugLevel::Error,
        }
    }

    pub fn set_level(&mut self, level: DebugLevel) {
        self.level = level;
    }

    pub fn get_level(&self) -> DebugLevel {
        self.level
    }

    /// report prints a ForthError at Error level, always (errors are never filtered).
    pub fn report(&self, err: &ForthError) {
        eprintln!("[ERROR] {err}");
    }

    pub fn error<T: fmt::Display>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Error, caller, text, context);
    }

    pub fn warning<T: fmt::Display>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Warning, caller, text, context);
    }

    pub fn info<T: fmt::Display>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Info, caller, text, context);
    }

    pub fn debug<T: fmt::Display>(&self, caller: &str, text: &str, context: Option<T>) {
        self.emit(DebugLevel::Debug, caller, text, context);
    }

    fn emit<T: fmt::Display>(&self, level: DebugLevel, caller: &str, text: &str, context: Option<T>) {
        if level > self.level {
            return;
        }
        match context {
            Some(c) => eprintln!("[{level}] {caller}: {text} ({c})"),
            None => eprintln!("[{level}] {caller}: {text}"),
        }
    }
}

impl Default for Msg {
    fn default() -> Msg {
        Msg::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering_filters_messages() {
        let msg = Msg::new();
        assert_eq!(msg.get_level(), DebugLevel::Error);
        assert!(DebugLevel::Warning > DebugLevel::Error);
        assert!(DebugLevel::Debug > DebugLevel::Info);
    }

    #[test]
    fn error_carries_its_line_number() {
        let err = ForthError::UndefinedWord {
            word: "frobnicate".to_owned(),
            line: 42,
        };
        assert_eq!(err.line(), 42);
    }
}
