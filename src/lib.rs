pub mod bench;
pub mod config;
pub mod error;
pub mod ids;
pub mod search;
pub mod util;

pub use bench::{Benchmark, ResultTable, Row};
pub use config::{BenchConfig, SizeClass};
pub use error::{BenchError, QueryError};
pub use ids::IdentifierSet;
pub use search::{strategies, strategy_by_name, BruteForce, Hashing, LinearSearch};

#[ctor::ctor]
fn init_color_backtrace() {
    color_backtrace::install();
}

/// A way of counting how many queries occur in a dataset.
///
/// All implementations must return the same count for the same input; they
/// only differ in how much work they do to get there.
pub trait SearchStrategy: Sync + Send {
    /// Number of queries that are present in `dataset`. Each query counts at
    /// most once, however often it occurs in the dataset.
    fn count(&self, dataset: &[i64], queries: &[i64]) -> usize;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
