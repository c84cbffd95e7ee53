//! Counts k-card "decks" drawn from the 81-card Set-game pack that
//! contain no valid Set.
//!
//! [`run`] is the library's single entry point (spec §6): given a deck
//! size and optional include/exclude card lists, it returns the count of
//! deck-size subsets with no Set, using the parallel incremental engine
//! in [`engine`]. [`basic::run_basic`] is a slower, single-threaded
//! reference implementation kept around to cross-check the parallel
//! engine in tests and benches.

pub mod basic;
pub mod cancel;
pub mod card;
pub mod combinations;
pub mod deck;
pub mod engine;
pub mod error;
pub mod node;
pub mod set_predicate;
pub mod validate;
pub mod worker;

use tracing::instrument;

pub use cancel::CancelToken;
pub use card::{Card, Color, Count, Shading, Shape};
pub use error::SetChallengeError;

/// `hardware_parallelism - 4`, floored at 1: the worker-count tuning
/// constant from spec §4.H. Leaves a few cores free for the coordinator
/// and whatever else shares the machine.
pub fn default_num_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .saturating_sub(4)
        .max(1)
}

/// Counts `deck_size`-card decks with no Set, honoring `include` (every
/// reported deck contains all of them) and `exclude` (none of them).
/// `deck_size` must be in `[3, 81]`. Returns the count, or an error for
/// invalid arguments or cooperative cancellation via `cancel`.
#[instrument(skip(include, exclude, cancel))]
pub fn run(
    deck_size: usize,
    include: &[Card],
    exclude: &[Card],
    cancel: &CancelToken,
) -> Result<i64, SetChallengeError> {
    engine::run_parallel(
        deck_size,
        include,
        exclude,
        cancel,
        |_cards, _tested, _are_sets| {},
        default_num_workers(),
        engine::DEFAULT_BATCH_SIZE,
    )
}
