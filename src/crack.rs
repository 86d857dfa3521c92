//! Wordlist-driven search for passwords that produce known digests.

use crate::error::CrackError;
use crate::evaluator::HashFunction;
use ahash::AHashSet;
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::io::BufRead;

/// How a cracking run is split up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrackOptions {
    /// Candidates evaluated per parallel batch. Termination is checked between batches.
    pub chunk_size: usize,
    /// Worker threads; `None` lets rayon choose.
    pub threads: Option<usize>,
}

impl Default for CrackOptions {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            threads: None,
        }
    }
}

/// Digests to search for, as raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    digests: Vec<Vec<u8>>,
}

impl Targets {
    pub fn new(digests: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            digests: digests.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// The digests in the form an evaluator emits: hex text unless `raw`.
    fn normalized(self, raw: bool) -> Vec<Vec<u8>> {
        if raw {
            self.digests
        } else {
            self.digests
                .into_iter()
                .map(|d| hex::encode(d).into_bytes())
                .collect()
        }
    }
}

/// A candidate that hashed to one of the targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Position of the candidate in the input stream.
    pub index: usize,
    #[serde(serialize_with = "lossy_text")]
    pub candidate: Vec<u8>,
    /// The matched digest as the evaluator produced it.
    #[serde(serialize_with = "lossy_text")]
    pub digest: Vec<u8>,
    /// The digest had already been matched by an earlier candidate.
    pub duplicate: bool,
}

fn lossy_text<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrackReport {
    pub matches: Vec<Match>,
    pub tried: usize,
    /// Targets still unmatched when the run ended.
    pub remaining: usize,
    pub duplicates: usize,
}

impl CrackReport {
    pub fn all_found(&self) -> bool {
        self.remaining == 0
    }
}

/// Progress notifications delivered while a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrackEvent<'a> {
    Found(&'a Match),
    /// Emitted after every batch.
    Progress { tried: usize },
}

/// Maps a hash function over candidate passwords, looking for target digests.
pub struct Cracker<H> {
    hash_function: H,
    targets: AHashSet<Vec<u8>>,
    remaining: Vec<Vec<u8>>,
    options: CrackOptions,
}

impl<H: HashFunction> Cracker<H> {
    pub fn new(hash_function: H, targets: Targets, options: CrackOptions) -> Self {
        let remaining = targets.normalized(hash_function.is_raw());
        Self {
            hash_function,
            targets: remaining.iter().cloned().collect(),
            remaining,
            options,
        }
    }

    /// Runs until every candidate was tried or every target was matched.
    ///
    /// Candidates within a batch are hashed in parallel; matches are reported in
    /// candidate order.
    pub fn run<I, F>(mut self, candidates: I, mut on_event: F) -> Result<CrackReport, CrackError>
    where
        I: IntoIterator<Item = Vec<u8>>,
        F: FnMut(CrackEvent<'_>),
    {
        let mut report = CrackReport {
            remaining: self.remaining.len(),
            ..CrackReport::default()
        };
        if self.remaining.is_empty() {
            return Ok(report);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads.unwrap_or(0))
            .build()?;

        let batches = candidates
            .into_iter()
            .chunks(self.options.chunk_size.max(1));

        'batches: for batch in &batches {
            let batch: Vec<Vec<u8>> = batch.collect();
            let hash_function = &self.hash_function;
            let digests = pool.install(|| {
                batch
                    .par_iter()
                    .map(|candidate| hash_function.hash(candidate))
                    .collect::<Result<Vec<_>, _>>()
            })?;

            for (candidate, digest) in batch.into_iter().zip(digests) {
                report.tried += 1;
                if !self.targets.contains(&digest) {
                    continue;
                }

                let duplicate = match self.remaining.iter().position(|t| *t == digest) {
                    Some(i) => {
                        self.remaining.swap_remove(i);
                        false
                    }
                    None => {
                        report.duplicates += 1;
                        tracing::warn!(
                            digest = %String::from_utf8_lossy(&digest),
                            "same hash found multiple times"
                        );
                        true
                    }
                };

                let found = Match {
                    index: report.tried - 1,
                    candidate,
                    digest,
                    duplicate,
                };
                on_event(CrackEvent::Found(&found));
                report.matches.push(found);

                if self.remaining.is_empty() {
                    tracing::info!(tried = report.tried, "all hashes found, stopping");
                    break 'batches;
                }
            }

            on_event(CrackEvent::Progress {
                tried: report.tried,
            });
        }

        report.remaining = self.remaining.len();
        Ok(report)
    }
}

/// Splits a wordlist into candidates, one per line, without the line terminator.
pub fn read_wordlist<R: BufRead>(mut reader: R) -> Result<Vec<Vec<u8>>, CrackError> {
    let mut candidates = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(candidates);
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        candidates.push(line.clone());
    }
}
