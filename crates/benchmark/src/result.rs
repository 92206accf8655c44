//! Comparison result types and recording.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Outcome of one variant run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Scenario name
    pub scenario: String,
    /// Variant name
    pub variant: String,
    /// Algorithm used
    pub algorithm: String,
    pub kerf_width: f64,
    pub edge_trim: f64,
    /// Seed passed to the optimizer
    pub seed: u64,
    /// Sheets consumed
    pub sheets_used: usize,
    /// Units placed
    pub placed: usize,
    /// Units left unplaced
    pub unplaced: usize,
    /// Aggregate efficiency (0.0 - 1.0)
    pub efficiency: f64,
    /// Unused area on consumed sheets
    pub waste_area: f64,
    /// Price of consumed sheets
    pub total_cost: f64,
    /// Fitness of the returned layout (genetic runs)
    pub best_fitness: Option<f64>,
    /// Wall-clock time in milliseconds
    pub time_ms: u64,
}

/// All variant runs of one scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub scenario: String,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: ComparisonRow) {
        self.rows.push(row);
    }

    /// The preferred row: fewest unplaced, then fewest sheets, then least
    /// waste. Earlier rows win ties.
    pub fn best(&self) -> Option<&ComparisonRow> {
        let mut best: Option<&ComparisonRow> = None;
        for row in &self.rows {
            let better = match best {
                None => true,
                Some(b) => {
                    (row.unplaced, row.sheets_used) < (b.unplaced, b.sheets_used)
                        || ((row.unplaced, row.sheets_used) == (b.unplaced, b.sheets_used)
                            && row.waste_area < b.waste_area)
                }
            };
            if better {
                best = Some(row);
            }
        }
        best
    }

    /// Saves the report to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Saves the rows to a CSV file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(
            file,
            "scenario,variant,algorithm,kerf_width,edge_trim,seed,sheets_used,placed,unplaced,efficiency,waste_area,total_cost,best_fitness,time_ms"
        )?;

        for row in &self.rows {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{},{},{:.4},{:.2},{:.2},{},{}",
                row.scenario,
                row.variant,
                row.algorithm,
                row.kerf_width,
                row.edge_trim,
                row.seed,
                row.sheets_used,
                row.placed,
                row.unplaced,
                row.efficiency,
                row.waste_area,
                row.total_cost,
                row.best_fitness
                    .map_or(String::new(), |f| format!("{:.4}", f)),
                row.time_ms,
            )?;
        }

        Ok(())
    }

    /// Prints a summary table to stdout.
    pub fn print_summary(&self) {
        println!("\n{:=<104}", "");
        println!("SCENARIO: {}", self.scenario);
        println!("{:=<104}", "");
        println!(
            "{:<28} {:<9} {:>6} {:>6} {:>7} {:>9} {:>8} {:>14} {:>9}",
            "Variant", "Algorithm", "Kerf", "Trim", "Sheets", "Unplaced", "Eff%", "Waste", "Time(ms)"
        );
        println!("{:-<104}", "");

        for row in &self.rows {
            println!(
                "{:<28} {:<9} {:>6.1} {:>6.1} {:>7} {:>9} {:>8.1} {:>14.0} {:>9}",
                row.variant,
                row.algorithm,
                row.kerf_width,
                row.edge_trim,
                row.sheets_used,
                row.unplaced,
                row.efficiency * 100.0,
                row.waste_area,
                row.time_ms
            );
        }

        println!("{:=<104}", "");
        if let Some(best) = self.best() {
            println!("Best: {}\n", best.variant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(variant: &str, sheets: usize, unplaced: usize, waste: f64) -> ComparisonRow {
        ComparisonRow {
            scenario: "s".to_string(),
            variant: variant.to_string(),
            algorithm: "Greedy".to_string(),
            kerf_width: 3.0,
            edge_trim: 0.0,
            seed: 42,
            sheets_used: sheets,
            placed: 10,
            unplaced,
            efficiency: 0.8,
            waste_area: waste,
            total_cost: 0.0,
            best_fitness: None,
            time_ms: 1,
        }
    }

    #[test]
    fn test_best_row_ordering() {
        let mut report = ComparisonReport::new("s");
        report.add_row(row("more-sheets", 3, 0, 100.0));
        report.add_row(row("unplaced", 1, 2, 0.0));
        report.add_row(row("winner", 2, 0, 500.0));
        report.add_row(row("tie", 2, 0, 500.0));

        assert_eq!(report.best().map(|r| r.variant.as_str()), Some("winner"));
        assert!(ComparisonReport::new("empty").best().is_none());
    }

    #[test]
    fn test_save_csv() {
        let mut report = ComparisonReport::new("s");
        report.add_row(row("a", 1, 0, 12.5));
        let path = std::env::temp_dir().join("sheetcut-bench-report-test.csv");
        report.save_csv(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("scenario,variant,algorithm"));
        assert_eq!(lines[1], "s,a,Greedy,3,0,42,1,10,0,0.8000,12.50,0.00,,1");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_json_roundtrip_shape() {
        let mut report = ComparisonReport::new("s");
        report.add_row(row("a", 1, 0, 12.5));
        let path = std::env::temp_dir().join("sheetcut-bench-report-test.json");
        report.save_json(&path).unwrap();

        let loaded: ComparisonReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.rows, report.rows);
        let _ = fs::remove_file(&path);
    }
}
