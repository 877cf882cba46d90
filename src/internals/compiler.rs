//! Colon-definitions and module imports: the two "line starts with a
//! sigil" dispatch paths the driver takes instead of evaluating outright.

use crate::files::FileHandle;
use crate::interp::Interp;
use crate::messages::ForthError;

use super::tokenizer::{scan_word, skip_spaces};

/// compile handles a line whose first non-whitespace byte is `:`. The name
/// is the first token after the `:`; the body is everything up to the next
/// `;`, stored verbatim and re-parsed on every invocation.
pub fn compile(interp: &mut Interp, line: &str) -> Result<(), ForthError> {
    let line_no = interp.line_count;
    let mut pos = 1; // skip ':'
    skip_spaces(line, &mut pos);
    let name = scan_word(line, &mut pos).to_owned();
    skip_spaces(line, &mut pos);

    if interp.dict.is_primitive_or_control(&name) {
        interp
            .msg
            .warning("compile", &format!("`{name}` is built in and cannot be redefined"), None::<&str>);
        return Ok(());
    }

    let rest = &line[pos..];
    let semi = rest
        .find(';')
        .ok_or(ForthError::UnterminatedDefinition { line: line_no })?;
    let body = rest[..semi].trim().to_owned();

    let redefined = interp.dict.add_or_update_definition(&name, body);
    if redefined && interp.interactive {
        interp.msg.info("compile", &format!("redefined `{name}`"), None::<&str>);
    }
    Ok(())
}

/// import handles a line whose first byte is `#`: the following token names
/// a module, resolved as `<name>.foo` against the search path. Already-loaded
/// modules short-circuit via their marker entry. The load always runs in
/// non-interactive mode; `interactive` and `line_count` are saved and
/// restored around it so a nested import cannot leak its counters outward.
pub fn import(interp: &mut Interp, line: &str) -> Result<(), ForthError> {
    let line_no = interp.line_count;
    let mut pos = 1; // skip '#'
    skip_spaces(line, &mut pos);
    let name = scan_word(line, &mut pos).to_owned();
    let dotted_name = format!("{name}.foo");

    if interp.dict.find(&dotted_name).is_some() {
        if interp.interactive {
            interp
                .msg
                .info("import", &format!("`{dotted_name}` already loaded"), None::<&str>);
        }
        return Ok(());
    }
    interp.dict.add_module(&dotted_name);

    let path = match interp.resolve_module_path(&dotted_name) {
        Some(path) => path,
        None => {
            let err = ForthError::ModuleOpenFailure {
                name: dotted_name,
                line: line_no,
            };
            interp.msg.report(&err);
            if !interp.interactive {
                interp.running = false;
            }
            return Err(err);
        }
    };

    let handle = FileHandle::open(&path).map_err(|source| ForthError::Io { line: line_no, source })?;

    let saved_interactive = interp.interactive;
    let saved_line_count = interp.line_count;
    interp.interactive = false;
    interp.reader.push(handle);

    let result = load_module_body(interp);

    interp.reader.pop();
    interp.interactive = saved_interactive;
    interp.line_count = saved_line_count;
    result
}

/// load_module_body drains the reader just pushed by `import`, compiling
/// `:`-lines, recursing into `#`-lines (a module may itself import a
/// module), and ignoring everything else per the module file format.
fn load_module_body(interp: &mut Interp) -> Result<(), ForthError> {
    loop {
        let line = {
            let reader = interp.reader.last_mut().expect("module reader just pushed");
            reader.next_logical_line(interp.line_count)?
        };
        let Some(line) = line else {
            return Ok(());
        };
        interp.line_count += 1;
        let trimmed = line.trim_start_matches(' ');
        if trimmed.starts_with(':') {
            compile(interp, trimmed)?;
        } else if trimmed.starts_with('#') {
            import(interp, trimmed)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_simple_definition() {
        let mut interp = Interp::new();
        compile(&mut interp, ": sq dup * ;").unwrap();
        assert!(interp.dict.find("sq").is_some());
    }

    #[test]
    fn missing_semicolon_is_unterminated() {
        let mut interp = Interp::new();
        let err = compile(&mut interp, ": sq dup *").unwrap_err();
        assert!(matches!(err, ForthError::UnterminatedDefinition { .. }));
    }

    #[test]
    fn redefining_a_user_word_is_reported_in_interactive_mode() {
        let mut interp = Interp::new();
        interp.interactive = true;
        compile(&mut interp, ": sq dup * ;").unwrap();
        compile(&mut interp, ": sq dup * 2 + ;").unwrap();
        let idx = interp.dict.find("sq").unwrap();
        match interp.dict.entry(idx) {
            crate::dictionary::DictEntry::UserDefined(body) => assert_eq!(body, "dup * 2 +"),
            _ => panic!("expected UserDefined"),
        }
    }

    #[test]
    fn redefining_a_primitive_is_a_warning_not_an_overwrite() {
        let mut interp = Interp::new();
        compile(&mut interp, ": + dup ;").unwrap();
        let idx = interp.dict.find("+").unwrap();
        assert!(matches!(interp.dict.entry(idx), crate::dictionary::DictEntry::Primitive(_)));
    }

    #[test]
    fn missing_module_file_is_a_module_open_failure() {
        let mut interp = Interp::new();
        let err = import(&mut interp, "# does-not-exist-anywhere").unwrap_err();
        assert!(matches!(err, ForthError::ModuleOpenFailure { .. }));
    }
}
