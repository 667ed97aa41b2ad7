// tests/esbuild_tests.rs
//
// End-to-end builds through the real esbuild binary. Each test returns early
// when esbuild is not on PATH.
mod common;

use std::path::PathBuf;
use std::time::Duration;

use codepad::bundler::SHIM_FILE_NAME;
use codepad::config::BundlerConfig;
use codepad::models::BuildResult;
use codepad::transpiler::Transpiler;

fn esbuild_available() -> bool {
    let found = std::process::Command::new("esbuild")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !found {
        eprintln!("esbuild not found on PATH; skipping");
    }
    found
}

async fn transpiler(work_dir: PathBuf) -> Transpiler {
    Transpiler::from_config(&BundlerConfig {
        binary: "esbuild".to_string(),
        work_dir,
        node_modules: PathBuf::from("node_modules"),
        shim: None,
        timeout: Duration::from_secs(30),
    })
    .await
    .unwrap()
}

fn only_shim_left(dir: &std::path::Path) -> bool {
    let files = common::files_in(dir);
    files.len() == 1 && files[0].file_name().unwrap() == SHIM_FILE_NAME
}

#[tokio::test]
async fn test_jsx_component_bundles() {
    if !esbuild_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let transpiler = transpiler(dir.path().to_path_buf()).await;

    let result = transpiler
        .transpile("export default function App(){ return <div>Hi</div>; }")
        .await;

    match result {
        BuildResult::Success { code } => {
            assert!(code.contains("AppBundle"));
            assert!(code.contains("window.React"));
            assert!(code.contains("Hi"));
        }
        BuildResult::Failure { error } => panic!("build failed: {error}"),
    }
    assert!(only_shim_left(dir.path()));
}

#[tokio::test]
async fn test_syntax_error_fails_cleanly() {
    if !esbuild_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let transpiler = transpiler(dir.path().to_path_buf()).await;

    match transpiler.transpile("function(").await {
        BuildResult::Failure { error } => assert!(error.contains("ERROR"), "{error}"),
        BuildResult::Success { code } => panic!("unexpected bundle: {code}"),
    }
    assert!(only_shim_left(dir.path()));
}

#[tokio::test]
async fn test_empty_source_does_not_crash() {
    if !esbuild_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let transpiler = transpiler(dir.path().to_path_buf()).await;

    let first = transpiler.transpile("").await;
    let second = transpiler.transpile("").await;

    assert_eq!(first, second);
    assert!(only_shim_left(dir.path()));
}

#[tokio::test]
async fn test_builds_are_deterministic() {
    if !esbuild_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let transpiler = transpiler(dir.path().to_path_buf()).await;
    let code = "const greet = (n) => <h1>Hello {n}</h1>;\nexport default greet;";

    let (a, b) = futures::join!(transpiler.transpile(code), transpiler.transpile(code));

    assert!(a.is_success());
    assert_eq!(a, b);
    assert!(only_shim_left(dir.path()));
}
