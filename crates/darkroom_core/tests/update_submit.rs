use std::path::PathBuf;
use std::sync::Once;

use darkroom_core::{
    update, validate_submission, AppState, Effect, Mode, Msg, Severity, ValidationError,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(darkroom_logging::initialize_for_tests);
}

fn submit(state: AppState, mode: Mode, prompt: &str, files: &[&str]) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ModeSelected(mode));
    let (state, _) = update(state, Msg::PromptChanged(prompt.to_string()));
    let (state, _) = update(
        state,
        Msg::FilesSelected(files.iter().map(PathBuf::from).collect()),
    );
    update(state, Msg::SubmitClicked)
}

#[test]
fn edit_submit_emits_start_job_with_files_in_order() {
    init_logging();
    let (state, effects) = submit(
        AppState::new(),
        Mode::Edit,
        "  make it black and white  ",
        &["a.png", "b.jpg", "c.webp"],
    );

    assert!(state.is_submitting());
    assert_eq!(
        effects,
        vec![Effect::StartJob {
            generation: 1,
            mode: Mode::Edit,
            prompt: "make it black and white".to_string(),
            files: vec![
                PathBuf::from("a.png"),
                PathBuf::from("b.jpg"),
                PathBuf::from("c.webp"),
            ],
        }]
    );
}

#[test]
fn generate_submit_carries_no_files() {
    init_logging();
    let (state, effects) = submit(
        AppState::new(),
        Mode::Generate,
        "a tiger fighting a lion in a city, realistic photo 8k",
        &["leftover-selection.png"],
    );

    assert!(state.is_submitting());
    assert_eq!(
        effects,
        vec![Effect::StartJob {
            generation: 1,
            mode: Mode::Generate,
            prompt: "a tiger fighting a lion in a city, realistic photo 8k".to_string(),
            files: Vec::new(),
        }]
    );
}

#[test]
fn whitespace_prompt_is_rejected_in_both_modes() {
    init_logging();
    for mode in [Mode::Edit, Mode::Generate] {
        let (state, effects) = submit(AppState::new(), mode, "   ", &["a.png"]);
        assert!(effects.is_empty());
        assert!(!state.is_submitting());
        let view = state.view();
        let notice = view.notice.expect("validation notice");
        assert_eq!(notice.severity, Severity::Error);
    }
}

#[test]
fn edit_without_images_is_rejected() {
    init_logging();
    let (state, effects) = submit(AppState::new(), Mode::Edit, "anything", &[]);

    assert!(effects.is_empty());
    assert!(!state.is_submitting());
    assert!(state.history().is_empty());
}

#[test]
fn validation_checks_prompt_before_images() {
    assert_eq!(
        validate_submission(Mode::Edit, "   ", 0),
        Err(ValidationError::EmptyPrompt)
    );
    assert_eq!(
        validate_submission(Mode::Edit, "prompt", 0),
        Err(ValidationError::NoImage)
    );
    assert_eq!(validate_submission(Mode::Edit, "prompt", 2), Ok(()));
    assert_eq!(validate_submission(Mode::Generate, "prompt", 0), Ok(()));
}

#[test]
fn second_submit_while_in_flight_is_a_noop() {
    init_logging();
    let (state, first) = submit(AppState::new(), Mode::Edit, "prompt", &["a.png"]);
    assert_eq!(first.len(), 1);

    let (state, second) = update(state, Msg::SubmitClicked);
    assert!(second.is_empty());
    assert!(state.is_submitting());
    let notice = state.view().notice.expect("rejection notice");
    assert_eq!(notice.severity, Severity::Error);
}

#[test]
fn each_submission_gets_a_fresh_generation() {
    init_logging();
    let (state, effects) = submit(AppState::new(), Mode::Generate, "one", &[]);
    let Effect::StartJob { generation, .. } = &effects[0] else {
        panic!("expected StartJob");
    };
    assert_eq!(*generation, 1);

    // Settle and resubmit; the generation must advance.
    let (state, _) = update(
        state,
        Msg::JobSettled {
            generation: 1,
            outcome: Err("boom".to_string()),
        },
    );
    let (_state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::StartJob {
            generation: 2,
            mode: Mode::Generate,
            prompt: "one".to_string(),
            files: Vec::new(),
        }]
    );
}
