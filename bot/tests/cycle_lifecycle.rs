//! Loop-level harness tests for full cycle scenarios.
//!
//! These tests drive `run_cycle` through whole prompt lists to verify
//! artifact layout, state persistence, resume after failure, and the
//! operator gate.

use std::fs;

use agent_bot::cycle::{CycleEnv, run_cycle};
use agent_bot::error::BotError;
use agent_bot::io::state::BotState;
use agent_bot::test_support::{
    FixedClock, ScriptedCompletion, ScriptedGate, ScriptedReply, TestWorkspace,
};

/// Full lifecycle: three prompts, each classified differently, all confirmed.
///
/// Checks artifact names and contents, the persisted state, and the journal.
#[test]
fn full_cycle_writes_every_artifact() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.write_prompts("Write a Fibonacci function\n\nBuild a landing page\nExplain closures\n")
        .expect("prompts");
    let config = ws.config();
    let clock = FixedClock::default();
    let completion = ScriptedCompletion::texts([
        "```python\ndef fib(n):\n    return n if n < 2 else fib(n - 1) + fib(n - 2)\n```",
        "```html\n<h1>Hi</h1>\n```",
        "# Closures\n\nA closure captures its environment.",
    ]);
    let env = CycleEnv {
        paths: ws.paths(),
        config: &config,
        completion: &completion,
        clock: &clock,
    };
    let mut gate = ScriptedGate::unlimited();

    let outcome = run_cycle(&env, &mut gate, |_| {}).expect("cycle");

    assert_eq!(outcome.steps_executed, 3);
    assert_eq!(outcome.total_prompts, 3);
    assert_eq!(gate.confirmations(), 3);

    let dir = ws.artifact_dir(&clock);
    let fib = fs::read_to_string(dir.join("write_a_fibonacci_function.py")).expect("fib");
    assert_eq!(
        fib,
        "def fib(n):\n    return n if n < 2 else fib(n - 1) + fib(n - 2)"
    );
    let page = fs::read_to_string(dir.join("build_a_landing_page.html")).expect("page");
    assert_eq!(page, "<h1>Hi</h1>");
    let doc = fs::read_to_string(dir.join("explain_closures.md")).expect("doc");
    assert_eq!(doc, "# Closures\n\nA closure captures its environment.");

    let state = ws.read_state().expect("state");
    assert_eq!(
        state,
        BotState {
            next_prompt_index: 3,
            produced_file_paths: vec![
                "out/demo/2026-10-19/write_a_fibonacci_function.py".to_string(),
                "out/demo/2026-10-19/build_a_landing_page.html".to_string(),
                "out/demo/2026-10-19/explain_closures.md".to_string(),
            ],
        }
    );
    assert_eq!(outcome.state, state);

    let journal = ws.read_journal(&clock).expect("journal");
    assert_eq!(journal.matches("Artifact saved: ").count(), 3);
    assert!(journal.contains("Cycle complete"));
}

/// A failure at prompt index 2 leaves state at 2; the next run resumes there.
#[test]
fn failed_prompt_is_retried_on_next_run() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.write_prompts("zero\none\ntwo\nthree\n").expect("prompts");
    let config = ws.config();
    let clock = FixedClock::default();

    let first = ScriptedCompletion::new(vec![
        ScriptedReply::Text("a".to_string()),
        ScriptedReply::Text("b".to_string()),
        ScriptedReply::Fail("connection reset".to_string()),
    ]);
    let env = CycleEnv {
        paths: ws.paths(),
        config: &config,
        completion: &first,
        clock: &clock,
    };
    let err = run_cycle(&env, &mut ScriptedGate::unlimited(), |_| {}).expect_err("api failure");
    assert!(matches!(err, BotError::Api(_)));

    let state = ws.read_state().expect("state");
    assert_eq!(state.next_prompt_index, 2);
    assert_eq!(state.produced_file_paths.len(), 2);
    assert!(!ws.artifact_dir(&clock).join("two.txt").exists());

    let second = ScriptedCompletion::texts(["c", "d"]);
    let env = CycleEnv {
        paths: ws.paths(),
        config: &config,
        completion: &second,
        clock: &clock,
    };
    let outcome = run_cycle(&env, &mut ScriptedGate::unlimited(), |_| {}).expect("resume");

    assert_eq!(second.calls(), vec!["two".to_string(), "three".to_string()]);
    assert_eq!(outcome.steps_executed, 2);
    assert_eq!(outcome.state.next_prompt_index, 4);
    assert_eq!(
        outcome.state.produced_file_paths,
        vec![
            "out/demo/2026-10-19/zero.txt",
            "out/demo/2026-10-19/one.txt",
            "out/demo/2026-10-19/two.txt",
            "out/demo/2026-10-19/three.txt",
        ]
    );
    let journal = ws.read_journal(&clock).expect("journal");
    assert!(journal.contains("Prompt 3 failed"));
}

/// Stopping at the gate keeps completed work; restarting continues after it.
#[test]
fn restart_after_operator_stops_resumes_at_next_prompt() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.write_prompts("first\nsecond\n").expect("prompts");
    let config = ws.config();
    let clock = FixedClock::default();

    let completion = ScriptedCompletion::texts(["one"]);
    let env = CycleEnv {
        paths: ws.paths(),
        config: &config,
        completion: &completion,
        clock: &clock,
    };
    let err = run_cycle(&env, &mut ScriptedGate::limited(0), |_| {}).expect_err("stopped");
    assert!(matches!(err, BotError::InputClosed));
    assert_eq!(ws.read_state().expect("state").next_prompt_index, 1);

    let completion = ScriptedCompletion::texts(["two"]);
    let env = CycleEnv {
        paths: ws.paths(),
        config: &config,
        completion: &completion,
        clock: &clock,
    };
    let outcome = run_cycle(&env, &mut ScriptedGate::unlimited(), |_| {}).expect("resume");

    assert_eq!(completion.calls(), vec!["second".to_string()]);
    assert_eq!(outcome.state.next_prompt_index, 2);
}

/// A missing prompt file stops the run before any completion call.
#[test]
fn missing_prompt_file_is_fatal() {
    let ws = TestWorkspace::new().expect("workspace");
    let config = ws.config();
    let clock = FixedClock::default();
    let completion = ScriptedCompletion::texts(["unused"]);
    let env = CycleEnv {
        paths: ws.paths(),
        config: &config,
        completion: &completion,
        clock: &clock,
    };

    let err = run_cycle(&env, &mut ScriptedGate::unlimited(), |_| {}).expect_err("missing");

    assert!(matches!(err, BotError::SourceMissing { .. }));
    assert!(completion.calls().is_empty());
    assert!(!ws.paths().state_path.exists());
}

/// The same prompt run twice on one day overwrites its artifact and records
/// the path twice.
#[test]
fn duplicate_prompts_overwrite_same_artifact() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.write_prompts("Same\nsame\n").expect("prompts");
    let config = ws.config();
    let clock = FixedClock::default();
    let completion = ScriptedCompletion::texts(["old", "new"]);
    let env = CycleEnv {
        paths: ws.paths(),
        config: &config,
        completion: &completion,
        clock: &clock,
    };

    let outcome = run_cycle(&env, &mut ScriptedGate::unlimited(), |_| {}).expect("cycle");

    let path = ws.artifact_dir(&clock).join("same.txt");
    assert_eq!(fs::read_to_string(path).expect("read"), "new");
    assert_eq!(
        outcome.state.produced_file_paths,
        vec!["out/demo/2026-10-19/same.txt"; 2]
    );
}
