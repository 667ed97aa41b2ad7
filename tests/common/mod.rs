// tests/common/mod.rs
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use codepad::bundler::{BuildOptions, BundleJob, Bundler};
use codepad::errors::{CodepadError, Result};
use codepad::transpiler::Transpiler;

/// Wraps the entry in an IIFE, rejecting sources with unbalanced brackets
/// the way a parser would.
pub struct WrappingBundler;

#[async_trait]
impl Bundler for WrappingBundler {
    async fn bundle(&self, job: BundleJob<'_>) -> Result<()> {
        let source = tokio::fs::read_to_string(job.entry).await?;
        if !balanced(&source) {
            return Err(CodepadError::BuildFailure(format!(
                "{}:1:0: ERROR: Unexpected end of file",
                job.entry.display()
            )));
        }
        let bundled = format!(
            "var {} = (() => {{\n{}\n}})();\n",
            job.options.global_name, source
        );
        tokio::fs::write(job.outfile, bundled).await?;
        Ok(())
    }
}

fn balanced(source: &str) -> bool {
    let mut stack = Vec::new();
    for c in source.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' => {
                if stack.pop() != Some('(') {
                    return false;
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return false;
                }
            }
            '}' => {
                if stack.pop() != Some('{') {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

pub fn fake_transpiler(work_dir: &Path) -> Transpiler {
    let options = BuildOptions::react_iife(
        work_dir.join("react-shim.js"),
        PathBuf::from("node_modules"),
    );
    Transpiler::new(Arc::new(WrappingBundler), options, work_dir.to_path_buf())
}

pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}
