//! Thin smoke-test harness around [`set_challenge::run`]. Parses
//! `deck_size` and optional `--include`/`--exclude` comma-separated card
//! indexes, runs the engine, and prints the resulting count. The actual
//! CLI collaborator (periodic status line, Ctrl-C cancellation) is out
//! of this crate's scope (spec §6) — this binary exists only because
//! every crate in this workspace carries one.

use set_challenge::{card, run, CancelToken, Card, SetChallengeError};

fn parse_index_list(arg: &str) -> Result<Vec<Card>, SetChallengeError> {
    let pack = card::pack();
    arg.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            let index: usize = s.trim().parse().map_err(|_| {
                SetChallengeError::InvalidArgument(format!("{s} is not a valid card index"))
            })?;
            pack.get(index).copied().ok_or_else(|| {
                SetChallengeError::InvalidArgument(format!("card index {index} out of range"))
            })
        })
        .collect()
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let deck_size: usize = args
        .next()
        .expect("usage: set_challenge <deck_size> [--include i,j,...] [--exclude i,j,...]")
        .parse()
        .map_err(|_| SetChallengeError::InvalidArgument("deck_size must be an integer".into()))?;

    let mut include: Vec<Card> = Vec::new();
    let mut exclude: Vec<Card> = Vec::new();
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .unwrap_or_else(|| panic!("{flag} requires a value"));
        match flag.as_str() {
            "--include" => include = parse_index_list(&value)?,
            "--exclude" => exclude = parse_index_list(&value)?,
            other => panic!("unknown flag {other}"),
        }
    }

    let count = run(deck_size, &include, &exclude, &CancelToken::new())?;
    println!("{count}");
    Ok(())
}
