//! Saving and loading workload files.

use std::fs;

use yardstick::generator::generate;
use yardstick::model::{Error, Instruction, ReferenceCorpus};
use yardstick::wire::InstructionStore;

use crate::common::sample_corpus;

#[test]
fn test_generated_sequence_survives_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("dir").join("instruction-set.json");
    for corpus in [sample_corpus(), ReferenceCorpus::empty()] {
        let seq = generate(123, 1000, &corpus);
        InstructionStore::save(&seq, &path).unwrap();
        assert_eq!(InstructionStore::load(&path).unwrap(), seq);
    }
}

#[test]
fn test_empty_sequence_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("empty.json");
    InstructionStore::save(&[], &path).unwrap();
    assert!(InstructionStore::load(&path).unwrap().is_empty());
}

#[test]
fn test_file_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("one.json");
    InstructionStore::save(
        &[Instruction::ViewBusiness {
            business_id: "b-1".into(),
        }],
        &path,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "type": "ViewBusiness", "parameters": { "business_id": "b-1" } }])
    );
}

#[test]
fn test_missing_file_is_unavailable() {
    let tmp = tempfile::tempdir().unwrap();
    let err = InstructionStore::load(tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_corrupt_file_is_unavailable() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bad.json");
    fs::write(&path, "[{\"type\": \"ViewUser\", ").unwrap();
    assert!(matches!(
        InstructionStore::load(&path),
        Err(Error::StoreUnavailable { .. })
    ));
    fs::write(&path, "").unwrap();
    assert!(matches!(
        InstructionStore::load(&path),
        Err(Error::StoreUnavailable { .. })
    ));
}

#[test]
fn test_save_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("w.json");
    let corpus = sample_corpus();
    InstructionStore::save(&generate(1, 100, &corpus), &path).unwrap();
    let second = generate(2, 10, &corpus);
    InstructionStore::save(&second, &path).unwrap();
    assert_eq!(InstructionStore::load(&path).unwrap(), second);
}
