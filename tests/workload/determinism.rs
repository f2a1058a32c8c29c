//! Same seed and corpus, same sequence.

use std::fs;

use proptest::prelude::*;
use yardstick::generator::{generate, Generator};
use yardstick::model::{InstructionKind, ReferenceCorpus};
use yardstick::wire::InstructionStore;

use crate::common::sample_corpus;

#[test]
fn test_repeat_calls_are_identical() {
    let corpus = sample_corpus();
    for count in [0, 1, 2, 500] {
        for seed in [0, 1, 123, u64::MAX] {
            assert_eq!(
                generate(seed, count, &corpus),
                generate(seed, count, &corpus),
                "seed {} count {}",
                seed,
                count
            );
        }
    }
}

#[test]
fn test_empty_corpus_is_deterministic() {
    let empty = ReferenceCorpus::empty();
    let a = generate(42, 300, &empty);
    assert_eq!(a.len(), 300);
    assert_eq!(a, generate(42, 300, &empty));
}

#[test]
fn test_shorter_run_is_prefix() {
    let corpus = sample_corpus();
    let long = generate(7, 200, &corpus);
    let short = generate(7, 50, &corpus);
    assert_eq!(&long[..50], &short[..]);
}

#[test]
fn test_generator_continues_one_stream() {
    let corpus = sample_corpus();
    let mut generator = Generator::new(9, &corpus);
    let mut chunked = generator.generate(30);
    chunked.extend(generator.generate(70));
    assert_eq!(chunked, generate(9, 100, &corpus));
}

#[test]
fn test_seeds_differ() {
    let corpus = sample_corpus();
    assert_ne!(generate(1, 50, &corpus), generate(2, 50, &corpus));
}

#[test]
fn test_every_kind_appears() {
    let seq = generate(123, 2000, &sample_corpus());
    for kind in InstructionKind::ALL {
        assert!(seq.iter().any(|i| i.kind() == kind), "{} never drawn", kind);
    }
}

#[test]
fn test_saved_bytes_are_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let corpus = sample_corpus();
    let a = tmp.path().join("a.json");
    let b = tmp.path().join("b.json");
    InstructionStore::save(&generate(5, 400, &corpus), &a).unwrap();
    InstructionStore::save(&generate(5, 400, &corpus), &b).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_generation_is_pure(seed in any::<u64>(), count in 0usize..64) {
        let corpus = sample_corpus();
        prop_assert_eq!(generate(seed, count, &corpus), generate(seed, count, &corpus));
    }
}
