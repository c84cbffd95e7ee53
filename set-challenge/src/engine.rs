//! Parallel incremental engine (component H) and the observer contract
//! it calls back through (component I).
//!
//! One OS thread per worker, coordinated by the calling thread through a
//! pair of `mpsc` channels per worker. `Rc<DeckNode>` never crosses a
//! thread boundary — each worker rebuilds its own copy of the
//! include-chain prefix and grows its own subtree entirely locally; only
//! plain, `Send` [`ReportedDeck`] values travel back to the coordinator,
//! which is the sole caller of the observer (so callbacks are totally
//! ordered without the caller needing any locking of its own).

use std::sync::mpsc;
use std::thread;

use tracing::{debug, info, instrument, trace};

use crate::cancel::CancelToken;
use crate::card::Card;
use crate::error::SetChallengeError;
use crate::validate::{build_pack_effective, validate_args};
use crate::worker::{Seed, WorkerContext};

/// Default batch size: the number of evaluate/extend steps a worker
/// performs before yielding back to the coordinator. Spec-reasonable
/// range is 100-10000; this is the spec's documented default.
pub const DEFAULT_BATCH_SIZE: usize = 800;

enum WorkerCommand {
    RunBatch(usize),
    Shutdown,
}

struct WorkerReply {
    reported: Vec<crate::worker::ReportedDeck>,
    decks_is_empty: bool,
}

/// Distributes the initial seed cards round-robin across `num_workers`.
fn build_seeds(pack_effective: &[Card], include_len: usize, deck_size: usize) -> Vec<Seed> {
    if include_len == deck_size {
        return vec![Seed::Base];
    }
    pack_effective[include_len..]
        .iter()
        .enumerate()
        .map(|(i, &card)| Seed::Extend(card, include_len + i))
        .collect()
}

fn distribute(seeds: Vec<Seed>, num_workers: usize) -> Vec<Vec<Seed>> {
    let mut per_worker = vec![Vec::new(); num_workers];
    for (i, seed) in seeds.into_iter().enumerate() {
        per_worker[i % num_workers].push(seed);
    }
    per_worker
}

/// Runs the parallel incremental engine: depth-first, Set-pruned subset
/// growth, batched across `num_workers` threads. `observer` is invoked
/// once for every deck evaluated, in coordinator order (depth-first
/// within a worker, interleaved round-robin across workers).
///
/// This is the module-H/I engine underlying [`crate::run`]; callers that
/// want the observer callback or non-default tuning use this directly.
#[instrument(skip(include, exclude, cancel, observer))]
pub fn run_parallel(
    deck_size: usize,
    include: &[Card],
    exclude: &[Card],
    cancel: &CancelToken,
    mut observer: impl FnMut(&[Card], u64, u64),
    num_workers: usize,
    batch_size: usize,
) -> Result<i64, SetChallengeError> {
    validate_args(deck_size, include, exclude)?;
    let pack_effective = build_pack_effective(include, exclude);
    let include_chain: Vec<Card> = include.to_vec();
    let num_workers = num_workers.max(1);

    if pack_effective.is_empty() {
        info!("pack_effective is empty, nothing to search");
        return Ok(0);
    }

    let seeds = build_seeds(&pack_effective, include_chain.len(), deck_size);
    let per_worker = distribute(seeds, num_workers);
    debug!(num_workers, batch_size, total_seeds = per_worker.iter().map(Vec::len).sum::<usize>(), "seeded workers");

    let mut no_set_count: i64 = 0;

    let result = thread::scope(|scope| -> Result<(), SetChallengeError> {
        let mut cmd_txs = Vec::with_capacity(num_workers);
        let mut reply_rxs = Vec::with_capacity(num_workers);

        for assigned in per_worker {
            let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
            let (reply_tx, reply_rx) = mpsc::channel::<WorkerReply>();
            let pack_effective_ref = &pack_effective;
            let include_chain_ref = &include_chain;
            let cancel = cancel.clone();

            scope.spawn(move || {
                let mut ctx = WorkerContext::new(pack_effective_ref);
                ctx.seed(include_chain_ref, &assigned);
                loop {
                    match cmd_rx.recv() {
                        Ok(WorkerCommand::RunBatch(n)) => {
                            ctx.run_batch(deck_size, n, &|| cancel.is_cancelled());
                            let reply = WorkerReply {
                                reported: ctx.take_reported(),
                                decks_is_empty: ctx.decks_is_empty(),
                            };
                            if reply_tx.send(reply).is_err() {
                                return;
                            }
                        }
                        Ok(WorkerCommand::Shutdown) | Err(_) => return,
                    }
                }
            });

            cmd_txs.push(cmd_tx);
            reply_rxs.push(reply_rx);
        }

        for tx in &cmd_txs {
            let _ = tx.send(WorkerCommand::RunBatch(batch_size));
        }

        let mut active = vec![true; num_workers];
        let mut cancelled = false;
        while active.iter().any(|a| *a) {
            if cancel.is_cancelled() {
                debug!("cancellation observed at coordinator cycle boundary");
                cancelled = true;
                for tx in &cmd_txs {
                    let _ = tx.send(WorkerCommand::Shutdown);
                }
                break;
            }
            for (i, is_active) in active.iter_mut().enumerate() {
                if !*is_active {
                    continue;
                }
                let reply = reply_rxs[i].recv().map_err(|_| {
                    SetChallengeError::Internal(format!("worker {i} channel closed unexpectedly"))
                })?;
                for deck in reply.reported {
                    trace!(size = deck.cards.len(), tested = deck.tested, are_sets = deck.are_sets, "deck evaluated");
                    observer(&deck.cards, deck.tested, deck.are_sets);
                    if deck.cards.len() == deck_size && deck.tested > 0 && deck.are_sets == 0 {
                        no_set_count += 1;
                    }
                }
                if reply.decks_is_empty {
                    *is_active = false;
                } else if cancel.is_cancelled() {
                    debug!("cancellation observed mid-batch, retiring worker {i} without redispatch");
                    cancelled = true;
                    *is_active = false;
                } else {
                    let _ = cmd_txs[i].send(WorkerCommand::RunBatch(batch_size));
                }
            }
        }

        for tx in &cmd_txs {
            let _ = tx.send(WorkerCommand::Shutdown);
        }
        if cancelled {
            return Err(SetChallengeError::Cancelled);
        }
        Ok(())
    });

    result?;
    info!(no_set_count, deck_size, "parallel engine finished");
    Ok(no_set_count)
}
