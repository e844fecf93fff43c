use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn gss_imports(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gss-imports"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("run gss-imports")
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dir");
    }
    fs::write(path, contents).expect("write stylesheet");
}

#[test]
fn missing_root_exits_with_one() {
    let output = gss_imports(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing root directory path"), "stderr: {stderr}");
}

#[test]
fn broken_stylesheet_fails_the_run() {
    let temp = TempDir::new().expect("temp dir");
    write(temp.path(), "z.scss", "@import 'x\n");

    let output = gss_imports(&[temp.path()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unterminated string starting at 1:9"), "stderr: {stderr}");
}

#[test]
fn rewrites_the_tree_and_exits_cleanly() {
    let temp = TempDir::new().expect("temp dir");
    write(temp.path(), "a/b.scss", "@import '@material/x/y';\n");

    let output = gss_imports(&[temp.path()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[rewrite]"), "stderr: {stderr}");
    assert_eq!(
        fs::read_to_string(temp.path().join("a/b.scss")).expect("read stylesheet"),
        "@import '../x/y';\n"
    );
}
