//! Rendering of trajectory tables and summaries.

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use walk_engine::stats::{expected_mean, expected_variance};
use walk_engine::{SummaryStatistics, TrajectoryTable};

use crate::Result;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unknown format: {}. Supported: table, csv, json",
                other
            )),
        }
    }
}

/// One reported timestep of a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRow {
    pub t: usize,
    pub mean: f64,
    pub expected_mean: f64,
    pub variance: f64,
    pub expected_variance: f64,
}

/// Picks every `every`-th timestep (1-based) plus the last one
pub fn stats_rows(summary: &SummaryStatistics, p: f64, every: usize) -> Vec<StatsRow> {
    let steps = summary.len();
    let every = every.max(1);
    let mut rows: Vec<StatsRow> = (every..=steps)
        .step_by(every)
        .map(|t| stats_row(summary, p, t))
        .collect();
    if steps % every != 0 {
        rows.push(stats_row(summary, p, steps));
    }
    rows
}

fn stats_row(summary: &SummaryStatistics, p: f64, t: usize) -> StatsRow {
    StatsRow {
        t,
        mean: summary.mean[t - 1],
        expected_mean: expected_mean(p, t),
        variance: summary.variance[t - 1],
        expected_variance: expected_variance(p, t),
    }
}

/// Writes a trajectory table in the requested format
pub fn write_table<W: Write>(
    writer: &mut W,
    table: &TrajectoryTable,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let width = table.steps().to_string().len().max(2) + 1;
            for (index, row) in table.rows().enumerate() {
                write!(writer, "{:>6} |", index)?;
                for value in row {
                    write!(writer, "{:>width$}", value, width = width)?;
                }
                writeln!(writer)?;
            }
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(&mut *writer);
            let header: Vec<String> = std::iter::once("trajectory".to_string())
                .chain((1..=table.steps()).map(|t| format!("t{}", t)))
                .collect();
            csv.write_record(&header)?;
            for (index, row) in table.rows().enumerate() {
                let record: Vec<String> = std::iter::once(index.to_string())
                    .chain(row.iter().map(i64::to_string))
                    .collect();
                csv.write_record(&record)?;
            }
            csv.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, table)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Writes summary rows in the requested format
pub fn write_stats<W: Write>(writer: &mut W, rows: &[StatsRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(
                writer,
                "{:>8} {:>12} {:>12} {:>12} {:>12}",
                "t", "mean", "(2p-1)t", "variance", "4p(1-p)t"
            )?;
            for row in rows {
                writeln!(
                    writer,
                    "{:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                    row.t, row.mean, row.expected_mean, row.variance, row.expected_variance
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(&mut *writer);
            for row in rows {
                csv.serialize(row)?;
            }
            csv.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, rows)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use walk_engine::stats::reduce;
    use walk_engine::walk::run_batch;

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_stats_rows_include_last() {
        let table = run_batch(1.0, 25, 2, 0).unwrap();
        let summary = reduce(&table);
        let rows = stats_rows(&summary, 1.0, 10);
        let ts: Vec<usize> = rows.iter().map(|r| r.t).collect();
        assert_eq!(ts, vec![10, 20, 25]);
        assert_eq!(rows[2].mean, 25.0);
        assert_eq!(rows[2].expected_mean, 25.0);
    }

    #[test]
    fn test_csv_table() {
        let table = run_batch(0.0, 3, 2, 0).unwrap();
        let mut buffer = Vec::new();
        write_table(&mut buffer, &table, OutputFormat::Csv).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "trajectory,t1,t2,t3\n0,-1,-2,-3\n1,-1,-2,-3\n");
    }

    #[test]
    fn test_json_table() {
        let table = run_batch(1.0, 2, 1, 0).unwrap();
        let mut buffer = Vec::new();
        write_table(&mut buffer, &table, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["steps"], 2);
        assert_eq!(value["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_stats_csv_header() {
        let table = run_batch(0.5, 4, 10, 0).unwrap();
        let rows = stats_rows(&reduce(&table), 0.5, 2);
        let mut buffer = Vec::new();
        write_stats(&mut buffer, &rows, OutputFormat::Csv).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("t,mean,expected_mean,variance,expected_variance\n"));
        assert_eq!(text.lines().count(), 3);
    }
}
