//! Settings errors: an unreadable file, malformed RON, or values that parse
//! but do not describe a valid binding table.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors produced while loading, parsing, or validating settings.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// The settings file could not be read.
    #[error("can't read {}: {message}", path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },
    /// RON syntax or shape error at a known position.
    #[error("{message} (line {line}, column {col})")]
    Parse {
        /// Source file, when parsing from disk.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Parser message.
        message: String,
        /// Offending line with a caret under `col`.
        excerpt: String,
    },
    /// Unknown binding name, malformed accelerator.
    #[error("{message}")]
    Validation {
        /// Source file, when known.
        path: Option<PathBuf>,
        /// What was wrong.
        message: String,
    },
}

impl Error {
    /// A validation error not yet tied to a file.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            path: None,
            message: message.into(),
        }
    }

    /// Attach `p` as the source file unless one is already set.
    pub fn with_path(mut self, p: &Path) -> Self {
        if let Self::Parse { path, .. } | Self::Validation { path, .. } = &mut self {
            path.get_or_insert_with(|| p.to_path_buf());
        }
        self
    }

    /// Source file the error refers to.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } => Some(path),
            Self::Parse { path, .. } | Self::Validation { path, .. } => path.as_deref(),
        }
    }

    /// Multi-line rendering for terminals, with the excerpt for parse errors.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => format!("Read error at {}: {message}", path.display()),
            Self::Parse {
                line,
                col,
                message,
                excerpt,
                ..
            } => {
                let at = match self.path() {
                    Some(p) => format!("{}:{line}:{col}", p.display()),
                    None => format!("line {line}, column {col}"),
                };
                format!("Settings parse error at {at}\n{message}\n{excerpt}")
            }
            Self::Validation { message, .. } => match self.path() {
                Some(p) => format!("Settings validation error in {}\n{message}", p.display()),
                None => format!("Settings validation error\n{message}"),
            },
        }
    }
}

/// Render `line_no` of `source` (plus the line before it) with a caret under
/// `col_no`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let first = line_no.saturating_sub(1).max(1);
    let mut out = String::new();
    let numbered = source.lines().zip(1..).skip(first - 1);
    for (text, n) in numbered.take_while(|(_, n)| *n <= line_no) {
        let _ignored = writeln!(out, "{n:>4} | {text}");
        if n == line_no {
            let _ignored = writeln!(out, "{:>4} | {:>col$}", "", "^", col = col_no.max(1));
        }
    }
    out
}
