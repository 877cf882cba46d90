// Read logical lines from a file or stdin, stripping `\` comments and
// counting source lines as they go.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::messages::ForthError;

#[derive(Debug)]
pub enum FType {
    Stdin,
    BReader(BufReader<File>),
}

/// A single input source. Interactive sessions have exactly one (stdin);
/// module and `include-file`-style imports push an additional reader that is
/// popped again on EOF, which is what makes nested imports "just work".
#[derive(Debug)]
pub struct FileHandle {
    source: FType,
    path: Option<PathBuf>,
}

impl FileHandle {
    pub fn stdin() -> FileHandle {
        FileHandle {
            source: FType::Stdin,
            path: None,
        }
    }

    pub fn open(path: &Path) -> io::Result<FileHandle> {
        let file = File::open(path)?;
        Ok(FileHandle {
            source: FType::BReader(BufReader::new(file)),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// next_logical_line reads bytes up to (and discarding) the next bare
    /// newline/CR, stripping a `\`-introduced trailing comment. Returns
    /// `Ok(None)` on a clean EOF with nothing left to read.
    pub fn next_logical_line(&mut self, line: usize) -> Result<Option<String>, ForthError> {
        let mut raw = String::new();
        let read = match &mut self.source {
            FType::Stdin => {
                io::stdout().flush().ok();
                io::stdin().read_line(&mut raw)
            }
            FType::BReader(reader) => reader.read_line(&mut raw),
        }
        .map_err(|source| ForthError::Io { line, source })?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(strip_comment(&raw)))
    }
}

/// strip_comment removes everything from the first unescaped `\` onward, and
/// trims the trailing newline/CR the line reader leaves behind.
fn strip_comment(raw: &str) -> String {
    let without_comment = match raw.find('\\') {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    without_comment.trim_end_matches(['\n', '\r']).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(strip_comment("1 2 + .\\ adds and prints\n"), "1 2 + .");
    }

    #[test]
    fn leaves_comment_free_lines_untouched() {
        assert_eq!(strip_comment("dup *\n"), "dup *");
    }

    #[test]
    fn trims_carriage_return() {
        assert_eq!(strip_comment("bye\r\n"), "bye");
    }
}
