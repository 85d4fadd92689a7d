use std::{path::PathBuf, str::FromStr};

use itertools::Itertools;
use crate::BenchError;

/// A named dataset size, e.g. `Small=10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeClass {
    pub label: String,
    pub size: usize,
}

impl SizeClass {
    pub fn new(label: &str, size: usize) -> Self {
        SizeClass {
            label: label.to_string(),
            size,
        }
    }
}

impl FromStr for SizeClass {
    type Err = String;

    /// Parse `LABEL=SIZE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, size) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=SIZE, got `{s}`"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(format!("empty label in `{s}`"));
        }
        let size = size
            .trim()
            .parse()
            .map_err(|e| format!("bad size in `{s}`: {e}"))?;
        Ok(SizeClass::new(label, size))
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// CSV file holding the identifiers.
    pub input: PathBuf,
    /// Header of the identifier column.
    pub column: String,
    /// Dataset sizes, benchmarked and reported in this order.
    pub sizes: Vec<SizeClass>,
    /// Timed calls per (strategy, dataset) pair.
    pub runs: usize,
    /// Length of each query batch.
    pub queries: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            input: PathBuf::from("sampleData.csv"),
            column: "log_id".to_string(),
            sizes: vec![
                SizeClass::new("Small", 10),
                SizeClass::new("Medium", 100),
                SizeClass::new("Large", 1000),
            ],
            runs: 10,
            queries: 100,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.runs == 0 {
            return Err(BenchError::Config("runs must be at least 1".into()));
        }
        if self.queries == 0 {
            return Err(BenchError::Config("queries must be at least 1".into()));
        }
        if self.sizes.is_empty() {
            return Err(BenchError::Config("no dataset sizes given".into()));
        }
        if let Some(s) = self.sizes.iter().find(|s| s.size == 0) {
            return Err(BenchError::Config(format!(
                "dataset `{}` has size 0",
                s.label
            )));
        }
        if let Some(label) = self.sizes.iter().map(|s| &s.label).duplicates().next() {
            return Err(BenchError::Config(format!(
                "dataset label `{label}` given more than once"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = BenchConfig::default();
        let labels = c.sizes.iter().map(|s| s.label.as_str()).collect_vec();
        assert_eq!(labels, ["Small", "Medium", "Large"]);
        assert_eq!(c.sizes[2].size, 1000);
        assert_eq!((c.runs, c.queries), (10, 100));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn parse_size_class() {
        assert_eq!("Huge=5000".parse::<SizeClass>(), Ok(SizeClass::new("Huge", 5000)));
        assert_eq!(" Tiny = 3 ".parse::<SizeClass>(), Ok(SizeClass::new("Tiny", 3)));
        assert!("Huge".parse::<SizeClass>().is_err());
        assert!("=5".parse::<SizeClass>().is_err());
        assert!("Huge=-1".parse::<SizeClass>().is_err());
    }

    #[test]
    fn rejects_bad_configs() {
        let mut c = BenchConfig::default();
        c.runs = 0;
        assert!(matches!(c.validate(), Err(BenchError::Config(_))));

        let mut c = BenchConfig::default();
        c.sizes.push(SizeClass::new("Small", 20));
        assert!(c.validate().is_err());

        let mut c = BenchConfig::default();
        c.sizes = vec![SizeClass::new("Zero", 0)];
        assert!(c.validate().is_err());

        let mut c = BenchConfig::default();
        c.sizes.clear();
        assert!(c.validate().is_err());
    }
}
