use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated string starting at {0}")]
    UnterminatedString(Span),

    #[error("unterminated comment starting at {0}")]
    UnterminatedComment(Span),

    #[error("unclosed '{open}' opened at {span}")]
    Unclosed { open: &'static str, span: Span },

    #[error("unexpected '{found}' at {span}")]
    Unexpected { found: char, span: Span },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("import '{source_path}' has no module name after '{namespace}'")]
    MalformedImport {
        source_path: String,
        namespace: String,
    },

    #[error("rewrite context path must be absolute: {}", .0.display())]
    RelativeContext(PathBuf),
}

/// Failure to transform a single stylesheet's text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid rewrite context: {0}")]
    Context(RewriteError),

    #[error("import at {span}: {error}")]
    Rewrite { span: Span, error: RewriteError },
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to enumerate stylesheets under {}", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to transform {}", path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformError,
    },
}

impl DriverError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            DriverError::Discover { path, .. }
            | DriverError::Read { path, .. }
            | DriverError::Write { path, .. }
            | DriverError::Transform { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
