use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    search::strategies,
    util::{build_queries, mean, time_run},
    BenchConfig, BenchError, IdentifierSet, SearchStrategy,
};

/// Runs every configured size against a set of strategies.
pub struct Benchmark<'a> {
    ids: &'a IdentifierSet,
    config: &'a BenchConfig,
}

impl<'a> Benchmark<'a> {
    pub fn new(ids: &'a IdentifierSet, config: &'a BenchConfig) -> Self {
        Benchmark { ids, config }
    }

    /// Benchmark all strategies.
    pub fn run(&self) -> Result<ResultTable, BenchError> {
        self.run_schemes(&strategies())
    }

    /// Benchmark a single strategy.
    pub fn run_one(&self, scheme: &dyn SearchStrategy) -> Result<ResultTable, BenchError> {
        self.run_schemes(&[scheme])
    }

    /// Time each scheme `runs` times per size class, then check that all
    /// schemes found the same number of queries.
    pub fn run_schemes(&self, schemes: &[&dyn SearchStrategy]) -> Result<ResultTable, BenchError> {
        self.config.validate()?;
        let mut rows = vec![];

        for class in &self.config.sizes {
            let dataset = self.ids.prefix(class.size);
            let queries =
                build_queries(dataset, self.config.queries).map_err(|source| {
                    BenchError::Queries {
                        label: class.label.clone(),
                        source,
                    }
                })?;

            let label = if dataset.len() < class.size {
                warn!(
                    "Dataset {} wants {} identifiers, only {} available",
                    class.label,
                    class.size,
                    dataset.len()
                );
                format!("{} (n={})", class.label, dataset.len())
            } else {
                class.label.clone()
            };
            info!("Benchmarking {} ({} identifiers)", label, dataset.len());

            let means = schemes
                .iter()
                .map(|&s| {
                    let samples = (0..self.config.runs)
                        .map(|_| time_run(s, dataset, &queries))
                        .collect_vec();
                    let m = mean(&samples);
                    debug!("{label} {}: {samples:.4?}", s.name());
                    info!("{label} {}: {m:.4}ms", s.name());
                    m
                })
                .collect_vec();

            // Checked after timing, so the first sample of each strategy runs cold.
            let counts = schemes
                .iter()
                .map(|s| (s.name(), s.count(dataset, &queries)))
                .collect_vec();
            if !counts.iter().map(|&(_, c)| c).all_equal() {
                return Err(BenchError::Timing(format!(
                    "strategies disagree on dataset `{}`: {:?}",
                    class.label, counts
                )));
            }
            let found = counts.first().map_or(0, |&(_, c)| c);
            debug!("{label}: {found} of {} queries found", queries.len());

            rows.push(Row {
                label,
                requested: class.size,
                size: dataset.len(),
                found,
                means,
            });
        }

        Ok(ResultTable {
            strategies: schemes.iter().map(|s| s.name().to_string()).collect(),
            rows,
        })
    }
}

/// Mean timings, one row per dataset size.
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    /// Strategy names, the column order of `Row::means`.
    pub strategies: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Row {
    /// Size label, annotated with the real size if the dataset came up short.
    pub label: String,
    /// Configured dataset size.
    pub requested: usize,
    /// Actual dataset size.
    pub size: usize,
    /// Number of queries found, the same for every strategy.
    pub found: usize,
    /// Mean time per call in milliseconds.
    pub means: Vec<f64>,
}

impl ResultTable {
    /// Mean time in ms of `strategy` on the row labelled `label`.
    pub fn mean(&self, label: &str, strategy: &str) -> Option<f64> {
        let col = self.strategies.iter().position(|s| s == strategy)?;
        let row = self.rows.iter().find(|r| r.label == label)?;
        row.means.get(col).copied()
    }

    pub fn save_json(&self, path: &Path) -> Result<(), BenchError> {
        let f = File::create(path).map_err(|source| BenchError::Save {
            path: path.to_owned(),
            source,
        })?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self)?;
        w.flush().map_err(|source| BenchError::Save {
            path: path.to_owned(),
            source,
        })?;
        info!("Saved results to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = std::iter::once("Dataset".to_string())
            .chain(self.strategies.iter().map(|s| format!("{s} (ms)")))
            .collect_vec();
        let cells = self
            .rows
            .iter()
            .map(|r| {
                std::iter::once(r.label.clone())
                    .chain(r.means.iter().map(|m| format!("{m:.4}")))
                    .collect_vec()
            })
            .collect_vec();

        let widths = (0..header.len())
            .map(|i| {
                std::iter::once(&header)
                    .chain(&cells)
                    .filter_map(|line| line.get(i))
                    .map(|c| c.len())
                    .max()
                    .unwrap_or(0)
            })
            .collect_vec();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (c, &w))| {
                    if i == 0 {
                        format!("{c:<w$}")
                    } else {
                        format!("{c:>w$}")
                    }
                })
                .join(" | ")
        };

        let header = line(&header);
        writeln!(f, "{header}")?;
        writeln!(f, "{}", "-".repeat(header.len()))?;
        for row in &cells {
            writeln!(f, "{}", line(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{search::LinearSearch, SizeClass};

    fn ids(n: i64) -> IdentifierSet {
        IdentifierSet::from_vec((1..=n).map(|i| i * 3).collect())
    }

    fn config(runs: usize) -> BenchConfig {
        BenchConfig {
            runs,
            ..BenchConfig::default()
        }
    }

    #[test]
    fn full_table() {
        let ids = ids(1000);
        let config = config(2);
        let table = Benchmark::new(&ids, &config).run().unwrap();

        assert_eq!(
            table.strategies,
            ["Hashing", "Linear Search", "Brute Force"]
        );
        let labels = table.rows.iter().map(|r| r.label.as_str()).collect_vec();
        assert_eq!(labels, ["Small", "Medium", "Large"]);
        let found = table.rows.iter().map(|r| r.found).collect_vec();
        assert_eq!(found, [10, 50, 50]);
        for row in &table.rows {
            assert_eq!(row.size, row.requested);
            assert_eq!(row.means.len(), 3);
            assert!(row.means.iter().all(|&m| m >= 0.));
        }
        assert!(table.mean("Large", "Brute Force").is_some());
        assert!(table.mean("Large", "Binary").is_none());
    }

    #[test]
    fn short_identifier_set_shrinks_large() {
        let ids = ids(420);
        let config = config(1);
        let table = Benchmark::new(&ids, &config).run().unwrap();
        let large = &table.rows[2];
        assert_eq!(large.label, "Large (n=420)");
        assert_eq!((large.requested, large.size), (1000, 420));
        assert_eq!(table.rows[1].label, "Medium");
    }

    #[test]
    fn empty_dataset_names_label() {
        let ids = IdentifierSet::default();
        let config = config(1);
        let err = Benchmark::new(&ids, &config).run().unwrap_err();
        match &err {
            BenchError::Queries { label, source } => {
                assert_eq!(label, "Small");
                assert_eq!(*source, crate::QueryError::EmptyDataset);
            }
            other => panic!("expected Queries error, got {other:?}"),
        }
        assert_eq!(err.stage(), "query construction");
    }

    #[test]
    fn run_one_strategy() {
        let ids = ids(100);
        let config = BenchConfig {
            sizes: vec![SizeClass::new("Tiny", 5), SizeClass::new("All", 100)],
            runs: 3,
            ..BenchConfig::default()
        };
        let table = Benchmark::new(&ids, &config).run_one(&LinearSearch).unwrap();
        assert_eq!(table.strategies, ["Linear Search"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].found, 5);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let ids = ids(10);
        let config = config(0);
        let err = Benchmark::new(&ids, &config).run().unwrap_err();
        assert_eq!(err.stage(), "config");
    }

    #[test]
    fn table_layout() {
        let table = ResultTable {
            strategies: vec![
                "Hashing".into(),
                "Linear Search".into(),
                "Brute Force".into(),
            ],
            rows: vec![
                Row {
                    label: "Small".into(),
                    requested: 10,
                    size: 10,
                    found: 10,
                    means: vec![0.0012, 0.0034, 0.01],
                },
                Row {
                    label: "Large (n=420)".into(),
                    requested: 1000,
                    size: 420,
                    found: 50,
                    means: vec![0.02, 1.5, 123.45678],
                },
            ],
        };
        let out = table.to_string();
        let lines = out.lines().collect_vec();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Dataset       | Hashing (ms) | Linear Search (ms) |"));
        assert!(lines[0].ends_with("Brute Force (ms)"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));

        let cells = lines[2].split(" | ").map(str::trim).collect_vec();
        assert_eq!(cells, ["Small", "0.0012", "0.0034", "0.0100"]);
        let cells = lines[3].split(" | ").map(str::trim).collect_vec();
        assert_eq!(cells, ["Large (n=420)", "0.0200", "1.5000", "123.4568"]);
    }

    #[test]
    fn save_json() {
        let ids = ids(100);
        let config = BenchConfig {
            sizes: vec![SizeClass::new("Small", 10)],
            runs: 1,
            ..BenchConfig::default()
        };
        let table = Benchmark::new(&ids, &config).run().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        table.save_json(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["rows"][0]["label"], "Small");
        assert_eq!(json["rows"][0]["found"], 10);
        assert_eq!(json["strategies"][2], "Brute Force");
    }
}
