use std::{hint::black_box, time::Instant};

use log::{debug, info};

use crate::{QueryError, SearchStrategy};

/// Build a batch of `num_queries` queries for `dataset`.
///
/// The first `min(len, num_queries / 2)` queries are a prefix of the dataset
/// and hit. The rest are consecutive integers starting just above the
/// dataset maximum and cannot hit.
pub fn build_queries(dataset: &[i64], num_queries: usize) -> Result<Vec<i64>, QueryError> {
    let max = *dataset.iter().max().ok_or(QueryError::EmptyDataset)?;
    let hits = dataset.len().min(num_queries / 2);
    let misses = num_queries - hits;

    if misses > 0 {
        // The largest miss is max + misses.
        i64::try_from(misses)
            .ok()
            .and_then(|m| max.checked_add(m))
            .ok_or(QueryError::MissOverflow { max })?;
    }

    let mut qs = Vec::with_capacity(num_queries);
    qs.extend_from_slice(&dataset[..hits]);
    qs.extend((1..=misses as i64).map(|d| max + d));
    Ok(qs)
}

/// Call `strategy` once and return the elapsed wall-clock time in ms.
pub fn time_run(strategy: &dyn SearchStrategy, dataset: &[i64], queries: &[i64]) -> f64 {
    let start = Instant::now();
    black_box(strategy.count(black_box(dataset), black_box(queries)));
    let elapsed = start.elapsed();
    elapsed.as_secs_f64() * 1000.
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

pub fn time<T>(t: &str, f: impl FnOnce() -> T) -> T {
    debug!("{t}: Starting");
    let start = Instant::now();
    let r = f();
    let elapsed = start.elapsed();
    info!("{t}: Elapsed: {:?}", elapsed);
    r
}

/// Log to stderr. `verbosity` 0 shows errors only, each step adds a level.
pub fn init_trace(verbosity: usize, quiet: bool) {
    // Fails only when a logger is already installed, which is fine.
    let _ = stderrlog::new()
        .color(stderrlog::ColorChoice::Auto)
        .verbosity(verbosity)
        .quiet(quiet)
        .show_level(true)
        .init();
}
