use crate::config::{Config, FailurePolicy};
use crate::emitter::emit_scss;
use crate::error::{DriverError, TransformError};
use crate::parser::parse;
use crate::rewriter::RewriteContext;
use crate::walker::rewrite_imports;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const STYLESHEET_EXTENSION: &str = "scss";

/// Where stylesheets come from and go back to.
pub trait SourceTree {
    /// Every stylesheet under `root`, in a stable order.
    fn discover(&self, root: &Path) -> io::Result<Vec<PathBuf>>;
    fn read(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem. Hidden files and directories are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceTree;

impl SourceTree for FsSourceTree {
    fn discover(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && is_stylesheet(entry.path()) {
                files.push(entry.into_path());
            }
        }
        // Whole-path order, so `a.scss` comes before `a/b.scss`.
        files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
        Ok(files)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

pub fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == STYLESHEET_EXTENSION)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub output: String,
    /// Number of import strings that changed.
    pub rewritten: usize,
}

/// Parse, rewrite and re-emit one stylesheet's text. No I/O.
pub fn transform_source(src: &str, ctx: &RewriteContext<'_>) -> Result<Transformed, TransformError> {
    let mut stylesheet = parse(src)?;
    let rewritten = rewrite_imports(&mut stylesheet, ctx)?;
    Ok(Transformed {
        output: emit_scss(&stylesheet),
        rewritten,
    })
}

/// Rewrite a single file in place. The file is only written once its whole
/// content has been transformed.
pub fn transform_file<T: SourceTree + ?Sized>(
    path: &Path,
    root: &Path,
    config: &Config,
    tree: &T,
) -> Result<usize, DriverError> {
    let transform_err = |source: TransformError| DriverError::Transform {
        path: path.to_path_buf(),
        source,
    };

    let src = tree.read(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let ctx = RewriteContext::new(path, root, &config.namespace)
        .map_err(|err| transform_err(TransformError::Context(err)))?;
    let transformed = transform_source(&src, &ctx).map_err(transform_err)?;

    tree.write(path, &transformed.output)
        .map_err(|source| DriverError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(transformed.rewritten)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub imports: usize,
}

#[derive(Debug, Default)]
pub struct Report {
    pub rewritten: Vec<FileReport>,
    /// Only filled under [`FailurePolicy::KeepGoing`].
    pub failed: Vec<DriverError>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rewrite the imports of every stylesheet under `root`, one file at a time.
///
/// With [`FailurePolicy::FailFast`] the first failure is returned and the
/// files before it stay rewritten on disk; nothing is rolled back.
pub fn run<T: SourceTree + ?Sized>(
    root: &Path,
    config: &Config,
    tree: &T,
) -> Result<Report, DriverError> {
    let discover_err = |source: io::Error| DriverError::Discover {
        path: root.to_path_buf(),
        source,
    };
    let root = std::path::absolute(root).map_err(discover_err)?;
    let files = tree.discover(&root).map_err(discover_err)?;
    log::debug!(
        "found {} stylesheet(s) under {}",
        files.len(),
        root.display()
    );

    let mut report = Report::default();
    for file in files {
        match transform_file(&file, &root, config, tree) {
            Ok(imports) => {
                log::info!("[rewrite] {}", file.display());
                report.rewritten.push(FileReport {
                    path: file,
                    imports,
                });
            }
            Err(err) => match config.policy {
                FailurePolicy::FailFast => return Err(err),
                FailurePolicy::KeepGoing => {
                    match err.source() {
                        Some(cause) => log::warn!("{err}: {cause}"),
                        None => log::warn!("{err}"),
                    }
                    report.failed.push(err);
                }
            },
        }
    }
    Ok(report)
}
