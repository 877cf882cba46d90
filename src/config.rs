// system configuration and command line processing

use std::path::PathBuf;

use clap::Parser;

use crate::messages::DebugLevel;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BANNER: &str = "Foo, a small stack-oriented language.\nType `bye` to exit.";
pub const CORE_MODULE: &str = "core";

/// A simple stack-oriented Forth-like interpreter.
#[derive(Parser, Debug)]
#[command(name = "foo", version = VERSION, about = "A simple Forth-like interpreter")]
struct Args {
    /// Script to run non-interactively. Omit to start an interactive session.
    script: Option<PathBuf>,

    /// Initial reporting threshold.
    #[arg(long = "debug-level", value_enum, default_value = "error")]
    debug_level: DebugLevelArg,

    /// Extra module search directory; may be given more than once.
    #[arg(short = 'l', long = "library")]
    library: Vec<PathBuf>,

    /// Skip loading the bundled core module set at startup.
    #[arg(short = 'n', long = "no-core")]
    no_core: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum DebugLevelArg {
    Error,
    Warning,
    Info,
    Debug,
}

impl From<DebugLevelArg> for DebugLevel {
    fn from(arg: DebugLevelArg) -> DebugLevel {
        match arg {
            DebugLevelArg::Error => DebugLevel::Error,
            DebugLevelArg::Warning => DebugLevel::Warning,
            DebugLevelArg::Info => DebugLevel::Info,
            DebugLevelArg::Debug => DebugLevel::Debug,
        }
    }
}

pub struct Config {
    pub debug_level: DebugLevel,
    pub script: Option<PathBuf>,
    pub library: Vec<PathBuf>,
    pub no_core: bool,
}

impl Config {
    pub fn from_args() -> Config {
        let args = Args::parse();
        Config {
            debug_level: args.debug_level.into(),
            script: args.script,
            library: args.library,
            no_core: args.no_core,
        }
    }

    pub fn interactive(&self) -> bool {
        self.script.is_none()
    }
}
