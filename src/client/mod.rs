// src/client/mod.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CodepadError, Result};

pub mod editor;
pub mod remote;

pub use editor::{Editor, EditorSnapshot, RunOutcome, RunPhase};
pub use remote::RemoteRunner;

/// Shown when the service answers successfully without any output.
pub const NO_OUTPUT: &str = "No output returned.";

/// Shown when a failed run carries nothing more specific.
pub const FALLBACK_ERROR: &str = "An error occurred while running the code.";

/// Languages the remote execution service has an endpoint for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    C,
    Cpp,
    Java,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Python, Language::C, Language::Cpp, Language::Java];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// Name shown in the language picker.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Java => "Java",
        }
    }

    /// Ace editor mode; C and C++ share one.
    pub fn ace_mode(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::C | Language::Cpp => "c_cpp",
            Language::Java => "java",
        }
    }

    /// Path of this language's endpoint on the execution service.
    pub fn endpoint_path(&self) -> String {
        format!("/run-{}", self.as_str())
    }

    /// Starter program loaded into the editor when the language is picked.
    pub fn sample(&self) -> &'static str {
        match self {
            Language::Python => "\nprint(\"Hello Friends!\")",
            Language::C => {
                r#"#include <stdio.h>

int main() {
    // Output "Hello, Friends!" to the console
    printf("Hello, Friends!");
    return 0;
}
"#
            }
            Language::Cpp => {
                r#"#include <iostream>

int main() {
    // Output "Hello, Friends!" to the console
    std::cout << "Hello, Friends!" << std::endl;
    return 0;
}
"#
            }
            Language::Java => {
                r#"public class HelloWorld {
    public static void main(String[] args) {
        // Output "Hello, Friends!" to the console
        System.out.println("Hello, Friends!");
    }
}
"#
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CodepadError;

    fn from_str(s: &str) -> Result<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CodepadError::UnsupportedLanguage(s.to_string()))
    }
}

/// Body posted to `/run-<language>`.
#[derive(Serialize, Debug)]
pub struct RunRequest<'a> {
    pub code: &'a str,
}

/// What the execution service returned for a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResponse {
    pub output: Option<String>,
}

impl RunResponse {
    /// Pick the `output` field out of a response body. Bodies that are not
    /// JSON objects carry no output.
    pub fn from_body(body: &str) -> Self {
        let output = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => match map.get("output") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => Some(other.to_string()),
            },
            _ => None,
        };
        Self { output }
    }

    /// Text to display, falling back to [`NO_OUTPUT`] when nothing came back.
    pub fn display_output(&self) -> String {
        match self.output.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_OUTPUT.to_string(),
        }
    }
}

/// Anything able to execute a program in a given language.
pub trait CodeRunner: Send + Sync {
    fn run(
        &self,
        language: Language,
        code: &str,
    ) -> impl std::future::Future<Output = Result<RunResponse>> + Send;
}

/// Message to display for a failed run: the body's `error` field, else the
/// raw body, else [`FALLBACK_ERROR`].
pub fn failure_message(err: &CodepadError) -> String {
    match err {
        CodepadError::ApiError { body, .. } => {
            message_from_body(body).unwrap_or_else(|| FALLBACK_ERROR.to_string())
        }
        _ => FALLBACK_ERROR.to_string(),
    }
}

fn message_from_body(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) => return Some(body.to_string()),
    };
    if let Some(error) = value.get("error").filter(|e| is_truthy(e)) {
        return Some(match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    }
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        other if is_truthy(&other) => Some(body.to_string()),
        _ => None,
    }
}

/// Falsy values (`null`, `false`, `0`, `""`) count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
