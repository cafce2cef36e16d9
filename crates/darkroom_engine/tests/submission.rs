use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use darkroom_engine::{
    run_submission, Collaborator, CollaboratorError, JobRequest, Mode, SubmitError,
    ValidationError,
};

/// Counts invocations so tests can assert the collaborator was never called.
#[derive(Default)]
struct StubCollaborator {
    calls: AtomicUsize,
    response: Option<String>,
}

impl StubCollaborator {
    fn returning(output: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: Some(output.to_string()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Collaborator for StubCollaborator {
    async fn run(&self, _request: &JobRequest) -> Result<String, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(output) => Ok(output.clone()),
            None => Err(CollaboratorError::MissingOutput),
        }
    }
}

#[tokio::test]
async fn unreadable_file_settles_without_calling_the_collaborator() {
    let stub = StubCollaborator::returning("https://img.example/out.png");
    let files = vec![PathBuf::from("/definitely/not/here.png")];

    let err = run_submission(&stub, Mode::Edit, "prompt", &files)
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Encode(_)));
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn empty_prompt_settles_without_calling_the_collaborator() {
    let stub = StubCollaborator::returning("https://img.example/out.png");

    let err = run_submission(&stub, Mode::Generate, "   ", &[])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SubmitError::Validation(ValidationError::EmptyPrompt)
    );
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn edit_without_files_settles_without_calling_the_collaborator() {
    let stub = StubCollaborator::returning("https://img.example/out.png");

    let err = run_submission(&stub, Mode::Edit, "prompt", &[])
        .await
        .unwrap_err();

    assert_eq!(err, SubmitError::Validation(ValidationError::NoImage));
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn successful_submission_returns_the_locator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.png");
    std::fs::write(&path, b"pixels").unwrap();

    let stub = StubCollaborator::returning("https://img.example/out.png");
    let outcome = run_submission(&stub, Mode::Edit, "prompt", &[path])
        .await
        .unwrap();

    assert_eq!(outcome.image_ref, "https://img.example/out.png");
    assert_eq!(stub.call_count(), 1);
}
