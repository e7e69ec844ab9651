//! Cycle controller: one prompt per iteration, gated by operator confirmation.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::core::types::CyclePhase;
use crate::error::Result;
use crate::io::clock::Clock;
use crate::io::completion::Completion;
use crate::io::config::BotConfig;
use crate::io::confirm::ConfirmationGate;
use crate::io::journal::Journal;
use crate::io::paths::BotPaths;
use crate::io::prompts::read_prompts;
use crate::io::state::{BotState, load_state, save_state};
use crate::io::writer::ResponseWriter;

/// Collaborators shared by every iteration.
pub struct CycleEnv<'a, C, K> {
    pub paths: &'a BotPaths,
    pub config: &'a BotConfig,
    pub completion: &'a C,
    pub clock: &'a K,
}

impl<C, K> CycleEnv<'_, C, K> {
    fn journal(&self) -> Journal {
        Journal::new(&self.paths.log_dir)
    }
}

/// Result of a single successful iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Index of the prompt that was run.
    pub index: usize,
    /// Artifact written for the prompt.
    pub path: PathBuf,
}

/// Progress notifications for the operator console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleEvent {
    Running { index: usize, prompt: String },
    Saved { index: usize, path: PathBuf },
    AwaitingConfirmation,
}

/// Summary of a cycle that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub steps_executed: usize,
    pub total_prompts: usize,
    pub state: BotState,
}

/// Run the prompt at `state.next_prompt_index`.
///
/// On success the artifact is written, the state is advanced and persisted,
/// and the in-memory `state` is updated. On any failure both the persisted
/// and in-memory state are left exactly as they were. Returns `None` when no
/// prompts are left.
pub fn run_step<C: Completion, K: Clock>(
    env: &CycleEnv<'_, C, K>,
    state: &mut BotState,
    prompts: &[String],
) -> Result<Option<StepOutcome>> {
    let index = state.next_prompt_index;
    let Some(prompt) = prompts.get(index) else {
        return Ok(None);
    };
    let now = env.clock.now();
    let journal = env.journal();

    match attempt_step(env, state, prompt, &journal, now) {
        Ok((path, next)) => {
            *state = next;
            debug!(index, next_prompt_index = state.next_prompt_index, "step complete");
            Ok(Some(StepOutcome { index, path }))
        }
        Err(err) => {
            warn!(index, err = %err, "step failed, state not advanced");
            if let Err(log_err) = journal.append(now, &format!("Prompt {} failed: {err}", index + 1)) {
                warn!(err = %log_err, "failed to record step failure in journal");
            }
            Err(err)
        }
    }
}

fn attempt_step<C: Completion, K: Clock>(
    env: &CycleEnv<'_, C, K>,
    state: &BotState,
    prompt: &str,
    journal: &Journal,
    now: NaiveDateTime,
) -> Result<(PathBuf, BotState)> {
    let text = env.completion.complete(prompt)?;
    let writer = ResponseWriter::new(env.config.project_dir(&env.paths.root), journal);
    let path = writer.write(&text, prompt, now)?;

    let mut next = state.clone();
    next.advance(display_path(&env.paths.root, &path));
    save_state(&env.paths.state_path, &next)?;
    Ok((path, next))
}

/// Run every unfinished prompt, waiting on `gate` after each one.
///
/// State and prompts are loaded once up front. Stops at the first error; the
/// next invocation resumes at the prompt that failed.
pub fn run_cycle<C, K, G, F>(
    env: &CycleEnv<'_, C, K>,
    gate: &mut G,
    mut on_event: F,
) -> Result<CycleOutcome>
where
    C: Completion,
    K: Clock,
    G: ConfirmationGate,
    F: FnMut(&CycleEvent),
{
    let mut state = load_state(&env.paths.state_path)?;
    let prompts = read_prompts(&env.paths.prompts_path)?;
    if state.next_prompt_index > prompts.len() {
        warn!(
            next_prompt_index = state.next_prompt_index,
            prompts = prompts.len(),
            "state points past the end of the prompt list"
        );
    }

    let mut steps_executed = 0usize;
    let mut phase = CyclePhase::Idle;
    loop {
        debug!(?phase, next_prompt_index = state.next_prompt_index, "cycle phase");
        phase = match phase {
            CyclePhase::Idle if state.next_prompt_index < prompts.len() => CyclePhase::Running,
            CyclePhase::Idle => CyclePhase::Done,
            CyclePhase::Running => {
                let index = state.next_prompt_index;
                on_event(&CycleEvent::Running {
                    index,
                    prompt: prompts[index].clone(),
                });
                match run_step(env, &mut state, &prompts)? {
                    Some(outcome) => {
                        steps_executed += 1;
                        on_event(&CycleEvent::Saved {
                            index: outcome.index,
                            path: outcome.path,
                        });
                        CyclePhase::AwaitingConfirmation
                    }
                    None => CyclePhase::Done,
                }
            }
            CyclePhase::AwaitingConfirmation => {
                on_event(&CycleEvent::AwaitingConfirmation);
                gate.wait()?;
                if state.next_prompt_index < prompts.len() {
                    CyclePhase::Running
                } else {
                    CyclePhase::Done
                }
            }
            CyclePhase::Done => {
                info!(steps_executed, total = prompts.len(), "cycle complete");
                let summary = format!(
                    "Cycle complete: {steps_executed} prompt(s) run, {} of {} done",
                    state.next_prompt_index.min(prompts.len()),
                    prompts.len()
                );
                if let Err(err) = env.journal().append(env.clock.now(), &summary) {
                    warn!(err = %err, "failed to record cycle completion in journal");
                }
                return Ok(CycleOutcome {
                    steps_executed,
                    total_prompts: prompts.len(),
                    state,
                });
            }
        };
    }
}

/// Path as recorded in state: relative to the working directory when possible.
fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
