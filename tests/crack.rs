//! Tests for the wordlist cracking driver.
mod common;
use common::*;
use oddhash::crack::{read_wordlist, CrackEvent, CrackOptions, CrackReport, Cracker, Match, Targets};
use oddhash::error::{CrackError, EvaluationError, PrimitiveError};
use oddhash::prelude::{Compiler, HashFunction};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

const MD5_PASSWORD: &str = "5f4dcc3b5aa765d61d8327deb882cf99";
const MD5_LETMEIN: &str = "0d107d09f5bbe40cade3de5c71e9e9b7";
const MD5_DRAGON: &str = "8621ffdbc5698829397d97767ac13db3";

fn words(list: &[&str]) -> Vec<Vec<u8>> {
    list.iter().map(|w| w.as_bytes().to_vec()).collect()
}

fn md5_cracker(targets: &[&str], options: CrackOptions) -> Cracker<oddhash::evaluator::Evaluator> {
    Cracker::new(
        evaluator(&Compiler::new(), "md5($p)"),
        Targets::new(targets.iter().map(|t| unhex(t))),
        options,
    )
}

#[test]
fn test_finds_targets_in_candidate_order() {
    let cracker = md5_cracker(&[MD5_DRAGON, MD5_PASSWORD], CrackOptions::default());
    let mut found = Vec::new();
    let report = cracker
        .run(
            words(&["123456", "password", "qwerty", "dragon", "letmein"]),
            |event| {
                if let CrackEvent::Found(m) = event {
                    found.push(String::from_utf8_lossy(&m.candidate).into_owned());
                }
            },
        )
        .expect("run should succeed");

    assert_eq!(found, vec!["password".to_string(), "dragon".to_string()]);
    assert_eq!(
        report.matches[0],
        Match {
            index: 1,
            candidate: b"password".to_vec(),
            digest: MD5_PASSWORD.as_bytes().to_vec(),
            duplicate: false,
        }
    );
    assert_eq!(report.matches[1].index, 3);
    assert_eq!(report.remaining, 0);
    assert!(report.all_found());
    // Stops right after the last target is found.
    assert_eq!(report.tried, 4);
}

#[test]
fn test_stops_between_batches_once_everything_is_found() {
    let options = CrackOptions {
        chunk_size: 2,
        threads: Some(2),
    };
    let cracker = md5_cracker(&[MD5_LETMEIN], options);
    let mut progress = Vec::new();
    let report = cracker
        .run(
            words(&["a", "letmein", "b", "c", "d", "e"]),
            |event| {
                if let CrackEvent::Progress { tried } = event {
                    progress.push(tried);
                }
            },
        )
        .unwrap();
    assert_eq!(report.tried, 2);
    assert_eq!(report.matches.len(), 1);
    assert!(progress.is_empty());
}

#[test]
fn test_reports_progress_and_remaining() {
    let options = CrackOptions {
        chunk_size: 2,
        threads: Some(1),
    };
    let cracker = md5_cracker(&[MD5_LETMEIN, MD5_DRAGON], options);
    let mut progress = Vec::new();
    let report = cracker
        .run(words(&["a", "b", "letmein", "c", "d"]), |event| {
            if let CrackEvent::Progress { tried } = event {
                progress.push(tried);
            }
        })
        .unwrap();
    assert_eq!(progress, vec![2, 4, 5]);
    assert_eq!(report.tried, 5);
    assert_eq!(report.remaining, 1);
    assert!(!report.all_found());
}

#[test]
fn test_duplicate_matches_are_counted() {
    let cracker = md5_cracker(&[MD5_PASSWORD, MD5_DRAGON], CrackOptions::default());
    let report = cracker
        .run(words(&["password", "password", "x"]), |_| {})
        .unwrap();
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.matches.len(), 2);
    assert!(report.matches[1].duplicate);
    assert_eq!(report.remaining, 1);
}

#[test]
fn test_raw_evaluators_compare_raw_digests() {
    let hash_fn = evaluator(&Compiler::new(), "md5_raw($p)");
    assert!(hash_fn.is_raw());
    let report = Cracker::new(
        hash_fn,
        Targets::new([unhex(MD5_DRAGON)]),
        CrackOptions::default(),
    )
    .run(words(&["dragon"]), |_| {})
    .unwrap();
    assert_eq!(report.matches[0].digest, unhex(MD5_DRAGON));
}

#[test]
fn test_no_targets_does_no_work() {
    let calls = AtomicUsize::new(0);
    struct Counting<'a>(&'a AtomicUsize);
    impl HashFunction for Counting<'_> {
        fn hash(&self, password: &[u8]) -> Result<Vec<u8>, EvaluationError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(password.to_vec())
        }
        fn is_raw(&self) -> bool {
            true
        }
    }

    let report = Cracker::new(Counting(&calls), Targets::default(), CrackOptions::default())
        .run(words(&["a", "b"]), |_| {})
        .unwrap();
    assert_eq!(report, CrackReport::default());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_evaluation_failures_abort_the_run() {
    struct Failing;
    impl HashFunction for Failing {
        fn hash(&self, _password: &[u8]) -> Result<Vec<u8>, EvaluationError> {
            Err(EvaluationError::Primitive {
                algorithm: "broken".to_string(),
                source: PrimitiveError::DigestSizeRequired {
                    algorithm: "broken".to_string(),
                },
            })
        }
        fn is_raw(&self) -> bool {
            true
        }
    }

    let result = Cracker::new(Failing, Targets::new([b"x".to_vec()]), CrackOptions::default())
        .run(words(&["a"]), |_| {});
    assert!(matches!(result, Err(CrackError::Evaluation(_))));
}

#[test]
fn test_read_wordlist_strips_line_endings() {
    let input = Cursor::new(b"password\r\nletmein\n\ndragon\r\r\nlast".to_vec());
    let candidates = read_wordlist(input).unwrap();
    assert_eq!(
        candidates,
        words(&["password", "letmein", "", "dragon", "last"])
    );
}

#[test]
fn test_read_wordlist_keeps_binary_candidates() {
    let input = Cursor::new(vec![0xff, 0xfe, b'\n', b'a']);
    assert_eq!(
        read_wordlist(input).unwrap(),
        vec![vec![0xff, 0xfe], b"a".to_vec()]
    );
}

#[test]
fn test_report_serializes_as_text() {
    let report = md5_cracker(&[MD5_PASSWORD], CrackOptions::default())
        .run(words(&["password"]), |_| {})
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["matches"][0]["candidate"], "password");
    assert_eq!(json["matches"][0]["digest"], MD5_PASSWORD);
    assert_eq!(json["tried"], 1);
}
