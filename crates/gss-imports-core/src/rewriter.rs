use crate::error::RewriteError;
use std::borrow::Cow;
use std::path::{Component, Path};

pub const DEFAULT_NAMESPACE: &str = "@material";

/// Everything needed to rewrite the imports of one stylesheet.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    source_file: &'a Path,
    root_dir: &'a Path,
    namespace: &'a str,
}

impl<'a> RewriteContext<'a> {
    /// Both paths must be absolute; relative output paths are computed
    /// lexically from them.
    pub fn new(
        source_file: &'a Path,
        root_dir: &'a Path,
        namespace: &'a str,
    ) -> Result<Self, RewriteError> {
        for path in [source_file, root_dir] {
            if !path.is_absolute() {
                return Err(RewriteError::RelativeContext(path.to_path_buf()));
            }
        }
        Ok(Self {
            source_file,
            root_dir,
            namespace,
        })
    }

    /// Rewrite one import source.
    ///
    /// `<namespace>/<module-name>/rest` becomes `<root>/<moduleName>/rest`;
    /// any absolute result is then made relative to the importing file's
    /// directory. Everything else is returned unchanged.
    pub fn rewrite(&self, import_source: &str) -> Result<String, RewriteError> {
        let expanded = self.expand_namespace(import_source)?;
        if !Path::new(&*expanded).is_absolute() {
            return Ok(expanded.into_owned());
        }

        let root = self.root_dir.to_string_lossy();
        let target = expanded.replacen(self.namespace, &root, 1);
        let source_dir = self.source_file.parent().unwrap_or(self.source_file);
        Ok(relative_path(source_dir, Path::new(&target)))
    }

    /// Replace the `<namespace>/<module-name>` prefix with the module's
    /// directory under the root. Non-namespaced sources are borrowed back.
    pub fn expand_namespace<'s>(&self, import_source: &'s str) -> Result<Cow<'s, str>, RewriteError> {
        let mut segments = import_source.split('/');
        if segments.next() != Some(self.namespace) {
            return Ok(Cow::Borrowed(import_source));
        }

        let module = match segments.next() {
            Some(name) if !name.is_empty() => camel_case(name),
            _ => {
                return Err(RewriteError::MalformedImport {
                    source_path: import_source.to_string(),
                    namespace: self.namespace.to_string(),
                })
            }
        };

        let root = self.root_dir.to_string_lossy();
        let mut parts = vec![format!("{}/{}", root.trim_end_matches('/'), module)];
        parts.extend(segments.map(str::to_string));
        Ok(Cow::Owned(parts.join("/")))
    }
}

/// Rewrite with the default `@material` namespace.
pub fn rewrite(
    import_source: &str,
    source_file: &Path,
    root_dir: &Path,
) -> Result<String, RewriteError> {
    RewriteContext::new(source_file, root_dir, DEFAULT_NAMESPACE)?.rewrite(import_source)
}

/// `-x` becomes `X` for every lowercase ASCII letter `x`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        match chars.peek() {
            Some(&next) if ch == '-' && next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Path from `from` to `to`, both normalised first. Segments are joined
/// with `/`, there is no leading `./`, and equal paths give `""`.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from = normalize(from);
    let to = normalize(to);

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat("..").take(from.len() - common));
    parts.extend(to[common..].iter().map(String::as_str));
    parts.join("/")
}

fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                parts.push(prefix.as_os_str().to_string_lossy().into_owned())
            }
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    const ROOT: &str = "/root";

    #[rstest]
    #[case("foo", "foo")]
    #[case("foo-bar", "fooBar")]
    #[case("line-ripple-x", "lineRippleX")]
    #[case("foo--bar", "foo-Bar")]
    #[case("top-app-bar-2", "topAppBar-2")]
    #[case("already-Upper", "already-Upper")]
    fn camel_cases_kebab_segments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(camel_case(input), expected);
    }

    #[rstest]
    #[case("@material/foo-bar/baz", "/root/pkg/a.scss", "../fooBar/baz")]
    #[case("@material/theme/mixins", "/root/theme/mdc-theme.scss", "mixins")]
    #[case("@material/animation/functions", "/root/button/mdc-button.scss", "../animation/functions")]
    #[case("@material/line-ripple/mdc-line-ripple", "/root/a/b/c.scss", "../../lineRipple/mdc-line-ripple")]
    #[case("@material/foo-bar", "/root/pkg/a.scss", "../fooBar")]
    #[case("@material/foo/bar", "/root/a.scss", "foo/bar")]
    #[case("/@material/foo/bar", "/root/pkg/a.scss", "../foo/bar")]
    #[case("/abs/path/x", "/root/pkg/a.scss", "../../abs/path/x")]
    fn rewrites_to_file_relative_paths(
        #[case] import_source: &str,
        #[case] source_file: &str,
        #[case] expected: &str,
    ) {
        let rewritten = rewrite(import_source, Path::new(source_file), Path::new(ROOT)).unwrap();
        assert_eq!(rewritten, expected);
    }

    #[rstest]
    #[case("./foo")]
    #[case("../x/y")]
    #[case("variables")]
    #[case("third-party/lib")]
    #[case("@materialize/css")]
    #[case("material/foo")]
    fn leaves_relative_and_third_party_imports_alone(#[case] import_source: &str) {
        let rewritten =
            rewrite(import_source, Path::new("/root/pkg/a.scss"), Path::new(ROOT)).unwrap();
        assert_eq!(rewritten, import_source);
    }

    #[test]
    fn expands_namespace_before_relativizing() {
        let ctx =
            RewriteContext::new(Path::new("/root/pkg/a.scss"), Path::new(ROOT), DEFAULT_NAMESPACE)
                .unwrap();
        assert_eq!(ctx.expand_namespace("@material/foo-bar/baz").unwrap(), "/root/fooBar/baz");
        assert!(matches!(ctx.expand_namespace("./x").unwrap(), Cow::Borrowed("./x")));
    }

    #[test]
    fn trailing_slash_on_root_is_ignored() {
        let rewritten = rewrite(
            "@material/foo-bar/baz",
            Path::new("/root/pkg/a.scss"),
            Path::new("/root/"),
        )
        .unwrap();
        assert_eq!(rewritten, "../fooBar/baz");
    }

    #[test]
    fn honours_custom_namespace() {
        let ctx = RewriteContext::new(Path::new("/proj/x/y.scss"), Path::new("/proj"), "@acme")
            .unwrap();
        assert_eq!(ctx.rewrite("@acme/data-table/mixins").unwrap(), "../dataTable/mixins");
        assert_eq!(ctx.rewrite("@material/button").unwrap(), "@material/button");
    }

    #[rstest]
    #[case("@material/foo-bar/baz", "/root/pkg/a.scss")]
    #[case("@material/ripple/common", "/root/deep/er/file.scss")]
    #[case("@material/top-app-bar", "/root/top-app-bar/mdc-top-app-bar.scss")]
    fn relative_output_resolves_back_to_the_candidate(
        #[case] import_source: &str,
        #[case] source_file: &str,
    ) {
        let source_file = Path::new(source_file);
        let ctx = RewriteContext::new(source_file, Path::new(ROOT), DEFAULT_NAMESPACE).unwrap();
        let candidate = ctx.expand_namespace(import_source).unwrap().into_owned();
        let rewritten = ctx.rewrite(import_source).unwrap();

        let resolved: PathBuf = source_file.parent().unwrap().join(&rewritten);
        assert_eq!(normalize(&resolved), normalize(Path::new(&candidate)));
    }

    #[test]
    fn rewriting_twice_is_a_no_op() {
        let file = Path::new("/root/pkg/a.scss");
        let once = rewrite("@material/foo-bar/file", file, Path::new(ROOT)).unwrap();
        let twice = rewrite(&once, file, Path::new(ROOT)).unwrap();
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case("@material")]
    #[case("@material/")]
    #[case("@material//x")]
    fn rejects_imports_without_a_module_name(#[case] import_source: &str) {
        let err = rewrite(import_source, Path::new("/root/pkg/a.scss"), Path::new(ROOT))
            .unwrap_err();
        assert_eq!(
            err,
            RewriteError::MalformedImport {
                source_path: import_source.to_string(),
                namespace: DEFAULT_NAMESPACE.to_string(),
            }
        );
    }

    #[test]
    fn rejects_relative_context_paths() {
        let err = rewrite("@material/x", Path::new("pkg/a.scss"), Path::new(ROOT)).unwrap_err();
        assert_eq!(err, RewriteError::RelativeContext(PathBuf::from("pkg/a.scss")));

        let err = rewrite("@material/x", Path::new("/root/a.scss"), Path::new("root")).unwrap_err();
        assert_eq!(err, RewriteError::RelativeContext(PathBuf::from("root")));
    }

    #[rstest]
    #[case("/a/b", "/a/b", "")]
    #[case("/a/b", "/a/b/c", "c")]
    #[case("/a/b/c", "/a/d", "../../d")]
    #[case("/a/./b/../b", "/a//b/c/", "c")]
    #[case("/", "/x/y", "x/y")]
    fn relative_path_matches_lexical_resolution(
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(relative_path(Path::new(from), Path::new(to)), expected);
    }
}
