use std::path::PathBuf;

use chrono::Utc;
use darkroom_core::{
    update, AppState, CompletedJob, Effect, Mode, Msg, PROGRESS_CAP, PROGRESS_DONE,
};

fn submit_edit(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::ModeSelected(Mode::Edit));
    let (state, _) = update(state, Msg::PromptChanged("prompt".to_string()));
    let (state, _) = update(state, Msg::FilesSelected(vec![PathBuf::from("a.png")]));
    let (state, _) = update(state, Msg::SubmitClicked);
    state
}

fn settle_ok(state: AppState, generation: u64) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::JobSettled {
            generation,
            outcome: Ok(CompletedJob {
                image_ref: "https://img.example/out.png".to_string(),
                completed_at: Utc::now(),
            }),
        },
    )
}

#[test]
fn ticks_increase_by_ten_and_hold_at_ninety() {
    let mut state = submit_edit(AppState::new());
    assert_eq!(state.view().progress, 0);

    for _ in 0..12 {
        let (next, _) = update(state, Msg::ProgressTick { generation: 1 });
        state = next;
        assert!(state.view().progress <= PROGRESS_CAP);
    }
    assert_eq!(state.view().progress, PROGRESS_CAP);
}

#[test]
fn stale_generation_ticks_are_ignored() {
    let state = submit_edit(AppState::new());
    let (state, _) = update(state, Msg::ProgressTick { generation: 1 });
    assert_eq!(state.view().progress, 10);

    let (state, _) = update(state, Msg::ProgressTick { generation: 7 });
    assert_eq!(state.view().progress, 10);
}

#[test]
fn success_sets_one_hundred_then_delayed_reset_zeroes() {
    let state = submit_edit(AppState::new());
    let (state, _) = update(state, Msg::ProgressTick { generation: 1 });

    let (state, effects) = settle_ok(state, 1);
    assert_eq!(state.view().progress, PROGRESS_DONE);
    assert_eq!(effects, vec![Effect::ScheduleProgressReset { generation: 1 }]);

    let (state, _) = update(state, Msg::ProgressResetDue { generation: 1 });
    assert_eq!(state.view().progress, 0);
}

#[test]
fn failure_resets_without_passing_through_one_hundred() {
    let state = submit_edit(AppState::new());
    let (state, _) = update(state, Msg::ProgressTick { generation: 1 });
    let (state, _) = update(state, Msg::ProgressTick { generation: 1 });

    let (state, effects) = update(
        state,
        Msg::JobSettled {
            generation: 1,
            outcome: Err("service returned status 500: boom".to_string()),
        },
    );
    assert!(!state.is_submitting());
    assert_eq!(state.view().progress, 20);
    assert_eq!(effects, vec![Effect::ScheduleProgressReset { generation: 1 }]);

    let (state, _) = update(state, Msg::ProgressResetDue { generation: 1 });
    assert_eq!(state.view().progress, 0);
}

#[test]
fn stale_reset_cannot_touch_a_newer_submission() {
    let state = submit_edit(AppState::new());
    let (state, _) = settle_ok(state, 1);

    // A new job starts before the old reset fires.
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(state, Msg::ProgressTick { generation: 2 });
    assert_eq!(state.view().progress, 10);

    let (state, _) = update(state, Msg::ProgressResetDue { generation: 1 });
    assert_eq!(state.view().progress, 10);
}

#[test]
fn ticks_after_settlement_are_ignored() {
    let state = submit_edit(AppState::new());
    let (state, _) = settle_ok(state, 1);

    // A late tick from a timer that lost the cancellation race.
    let (state, _) = update(state, Msg::ProgressTick { generation: 1 });
    assert_eq!(state.view().progress, PROGRESS_DONE);
}

#[test]
fn stale_settlement_is_ignored() {
    let state = submit_edit(AppState::new());
    let (state, _) = settle_ok(state, 1);
    assert_eq!(state.history().len(), 1);

    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, effects) = settle_ok(state, 1);

    assert!(state.is_submitting());
    assert_eq!(state.history().len(), 1);
    assert!(effects.is_empty());
}
