// src/client/editor.rs

use std::sync::{Mutex, MutexGuard};

use crate::client::{failure_message, CodeRunner, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// What a call to [`Editor::run`] ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded(String),
    Failed(String),
    /// The response arrived after the run was superseded and was dropped.
    Stale,
    /// A run was already in flight; nothing was sent.
    Busy,
}

/// Point-in-time copy of the editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub code: String,
    pub language: Language,
    pub output: String,
    pub error: String,
    pub in_flight: bool,
    pub phase: RunPhase,
}

struct EditorState {
    snapshot: EditorSnapshot,
    /// Bumped whenever a run starts or the language changes; responses
    /// tagged with an older value are discarded.
    generation: u64,
}

/// Editor session: source text, selected language and the state of the last run.
///
/// The state lives behind a mutex that is never held across an await, so
/// the language can change while a run is in flight.
pub struct Editor<R> {
    runner: R,
    state: Mutex<EditorState>,
}

/// Clears the in-flight flag if the run it belongs to ends without settling,
/// e.g. when the `run` future is dropped.
struct InFlightGuard<'a> {
    state: &'a Mutex<EditorState>,
    generation: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.generation == self.generation && state.snapshot.in_flight {
            state.snapshot.in_flight = false;
            state.snapshot.phase = RunPhase::Idle;
        }
    }
}

impl<R: CodeRunner> Editor<R> {
    /// New session on Python with its sample program loaded.
    pub fn new(runner: R) -> Self {
        let language = Language::Python;
        Self {
            runner,
            state: Mutex::new(EditorState {
                snapshot: EditorSnapshot {
                    code: language.sample().to_string(),
                    language,
                    output: String::new(),
                    error: String::new(),
                    in_flight: false,
                    phase: RunPhase::Idle,
                },
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.lock().snapshot.clone()
    }

    pub fn set_code(&self, code: impl Into<String>) {
        self.lock().snapshot.code = code.into();
    }

    /// Switch language and load its sample. A run still in flight is
    /// superseded: its response will be discarded.
    pub fn select_language(&self, language: Language) {
        let mut state = self.lock();
        state.generation += 1;
        state.snapshot.language = language;
        state.snapshot.code = language.sample().to_string();
        if state.snapshot.in_flight {
            log::debug!("Language switched to {} during a run; dropping its result", language);
            state.snapshot.in_flight = false;
            state.snapshot.phase = RunPhase::Idle;
        }
    }

    /// Run `code` as `language` without loading the language sample.
    pub async fn run_code(&self, code: &str, language: Language) -> RunOutcome {
        {
            let mut state = self.lock();
            if state.snapshot.in_flight {
                return RunOutcome::Busy;
            }
            if state.snapshot.language != language {
                state.generation += 1;
                state.snapshot.language = language;
            }
            state.snapshot.code = code.to_string();
        }
        self.run().await
    }

    /// Send the current code to the runner and record the result.
    pub async fn run(&self) -> RunOutcome {
        let (generation, language, code) = {
            let mut state = self.lock();
            if state.snapshot.in_flight {
                return RunOutcome::Busy;
            }
            state.generation += 1;
            state.snapshot.in_flight = true;
            state.snapshot.phase = RunPhase::Running;
            state.snapshot.output.clear();
            state.snapshot.error.clear();
            (state.generation, state.snapshot.language, state.snapshot.code.clone())
        };
        let _guard = InFlightGuard {
            state: &self.state,
            generation,
        };

        let result = self.runner.run(language, &code).await;

        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("Discarding stale {} result", language);
            return RunOutcome::Stale;
        }

        state.snapshot.in_flight = false;
        match result {
            Ok(response) => {
                let output = response.display_output();
                state.snapshot.output = output.clone();
                state.snapshot.phase = RunPhase::Succeeded;
                RunOutcome::Succeeded(output)
            }
            Err(e) => {
                log::warn!("Run failed: {}", e);
                let message = failure_message(&e);
                state.snapshot.error = message.clone();
                state.snapshot.phase = RunPhase::Failed;
                RunOutcome::Failed(message)
            }
        }
    }
}
