//! Instructions that fail validation.

use std::fs;
use std::sync::Arc;

use yardstick::interpreter::{Backend, Interpreter};
use yardstick::model::{Error, Instruction, RawInstruction};
use yardstick::storage::MemoryBackend;
use yardstick::wire::InstructionStore;

fn write(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("w.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_missing_field_names_field() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write(
        &tmp,
        r#"[
            { "type": "ViewUser", "parameters": { "user_id": "u1" } },
            { "type": "ViewBusiness", "parameters": {} }
        ]"#,
    );
    let err = InstructionStore::load(&path).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.malformed_field(), Some("business_id"));
    assert!(err.to_string().contains("#1"));

    // Structural load still works.
    let raw = InstructionStore::load_raw(&path).unwrap();
    assert_eq!(raw.len(), 2);
}

#[test]
fn test_ill_typed_fields() {
    let cases = [
        RawInstruction::new("PostReview")
            .with("user_id", "u")
            .with("business_id", "b")
            .with("stars", "nine")
            .with("text", "t"),
        RawInstruction::new("PostReview")
            .with("user_id", "u")
            .with("business_id", "b")
            .with("stars", "9")
            .with("text", "t"),
        RawInstruction::new("Checkin")
            .with("business_id", "b")
            .with("timestamp", "yesterday"),
        RawInstruction::new("SearchByNamePrefix")
            .with("prefix", "An")
            .with("limit", "-1"),
    ];
    for raw in cases {
        let err = Instruction::try_from(raw.clone()).unwrap_err();
        assert!(err.is_malformed(), "{:?} gave {}", raw, err);
    }
}

#[test]
fn test_unknown_kind_is_unsupported() {
    let err = Instruction::try_from(RawInstruction::new("DeleteEverything")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedInstructionKind { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_extra_parameters_are_ignored() {
    let raw = RawInstruction::new("ViewUser")
        .with("user_id", "u1")
        .with("trace", "abc");
    assert_eq!(
        Instruction::try_from(raw).unwrap(),
        Instruction::ViewUser {
            user_id: "u1".into()
        }
    );
}

#[tokio::test]
async fn test_interpreter_rejects_without_calling_backend() {
    let memory = Arc::new(MemoryBackend::new());
    let backend: Arc<dyn Backend> = memory.clone();
    let raw = RawInstruction::new("PostTip").with("user_id", "u1").with("text", "hi");

    let err = Interpreter::new().bind_raw(&raw, backend).err().unwrap();
    assert_eq!(err.malformed_field(), Some("business_id"));
    assert!(memory.is_empty());
}
