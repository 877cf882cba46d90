// foo, a small stack-oriented language
// Version 0.1

mod config;
mod dictionary;
mod files;
mod internals;
mod interp;
mod kernel;
mod messages;

use std::process::ExitCode;

use config::Config;
use interp::Interp;

fn main() -> ExitCode {
    let config = Config::from_args();
    let interactive = config.interactive();
    let mut interp = Interp::new();
    interp.msg.set_level(config.debug_level);
    interp.interactive = interactive;
    interp.library = config.library;

    if !config.no_core {
        let dotted = format!("{}.foo", config::CORE_MODULE);
        if interp.resolve_module_path(&dotted).is_some() {
            let import_line = format!("# {}", config::CORE_MODULE);
            if let Err(e) = internals::compiler::import(&mut interp, &import_line) {
                interp.msg.report(&e);
            }
        } else {
            interp
                .msg
                .info("main", "no bundled core module found, continuing without it", None::<&str>);
        }
    }

    if let Some(script) = &config.script {
        match files::FileHandle::open(script) {
            Ok(handle) => interp.reader = vec![handle],
            Err(source) => {
                interp.msg.report(&messages::ForthError::Io { line: 0, source });
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", config::BANNER);
    }

    match interp.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
