pub mod ast;
pub mod config;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod parser;
pub mod rewriter;
pub mod walker;

pub use config::{Config, FailurePolicy};
pub use driver::{run, transform_file, transform_source, FsSourceTree, Report, SourceTree};
pub use rewriter::{rewrite, RewriteContext, DEFAULT_NAMESPACE};
