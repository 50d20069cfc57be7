//! Terminal rendering of analysis results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{
    format_value, AssociationMeasure, ColumnKind, ColumnStatistics, FeatureImportance,
    Table as DataTable,
};
use crate::report::DatasetOverview;

/// Rows shown in a data preview
pub const PREVIEW_ROWS: usize = 5;

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn print_section(emoji: &str, title: &str) {
    println!();
    println!(
        "    {} {}",
        style(emoji).cyan(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

/// Statistic rendered with two decimals, or "N/A" when unavailable
fn fmt_stat(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "N/A".to_string()
    }
}

/// Print the dataset overview: shape, column kinds and numeric statistics.
pub fn display_overview(overview: &DatasetOverview) {
    print_section("📋", "DATASET OVERVIEW");
    println!("      Total Rows: {}", style(overview.rows).yellow().bold());
    println!("      Total Columns: {}", style(overview.columns).yellow().bold());
    println!(
        "      Numeric Columns: {}",
        style(overview.numeric_columns.len()).yellow().bold()
    );
    println!();

    let mut table = new_table(&["Column", "Type", "Missing", "Mean", "Median", "Min", "Max", "Std Dev"]);
    for profile in &overview.profiles {
        let kind = match profile.kind {
            ColumnKind::Numeric => Cell::new(profile.kind.label()).fg(Color::Green),
            ColumnKind::NonNumeric => Cell::new(profile.kind.label()).fg(Color::Cyan),
        };
        let missing = Cell::new(profile.missing).fg(if profile.missing > 0 {
            Color::Red
        } else {
            Color::White
        });
        let mut row = vec![Cell::new(&profile.name), kind, missing];
        match &profile.statistics {
            Some(stats) => row.extend(
                [stats.mean, stats.median, stats.min, stats.max, stats.std_dev]
                    .into_iter()
                    .map(|v| Cell::new(fmt_stat(v))),
            ),
            None => row.extend((0..5).map(|_| Cell::new("-"))),
        }
        table.add_row(row);
    }
    print_indented(&table);

    if !overview.correlated_pairs.is_empty() {
        print_section("🔗", "CORRELATED PAIRS");
        let mut pairs = new_table(&["Feature 1", "Feature 2", "Correlation"]);
        for pair in &overview.correlated_pairs {
            pairs.add_row(vec![
                Cell::new(&pair.feature1),
                Cell::new(&pair.feature2),
                Cell::new(format!("{:.4}", pair.correlation)),
            ]);
        }
        print_indented(&pairs);
    }
}

/// Print the first rows of a table, rendering cells with [`format_value`].
pub fn display_preview(data: &DataTable, limit: usize) {
    print_section("🔍", "DATA PREVIEW");
    let header: Vec<&str> = data.columns().iter().map(String::as_str).collect();
    let mut table = new_table(&header);
    for row in data.rows().iter().take(limit) {
        table.add_row(row.cells().iter().map(|cell| {
            let text = format_value(cell);
            if text == "N/A" || text == "Invalid" {
                Cell::new(text).fg(Color::Red).add_attribute(Attribute::Bold)
            } else {
                Cell::new(text)
            }
        }));
    }
    print_indented(&table);
    if data.height() > limit {
        println!(
            "    {}",
            style(format!("... {} more row(s)", data.height() - limit)).dim()
        );
    }
}

/// Print the statistics of one column and its outlier count.
pub fn display_statistics(column: &str, stats: &ColumnStatistics, outliers: usize) {
    print_section("📊", &format!("STATISTICS: {}", column));
    if !stats.is_available() {
        println!("      {}", style("No numeric values - statistics unavailable").yellow());
        return;
    }

    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("Mean"), Cell::new(fmt_stat(stats.mean))]);
    table.add_row(vec![Cell::new("Median"), Cell::new(fmt_stat(stats.median))]);
    table.add_row(vec![Cell::new("Min"), Cell::new(fmt_stat(stats.min))]);
    table.add_row(vec![Cell::new("Max"), Cell::new(fmt_stat(stats.max))]);
    table.add_row(vec![Cell::new("Standard Deviation"), Cell::new(fmt_stat(stats.std_dev))]);
    table.add_row(vec![
        Cell::new("Outliers (>3σ)"),
        Cell::new(outliers).fg(if outliers > 0 { Color::Red } else { Color::White }),
    ]);
    print_indented(&table);
}

/// Print a correlation value with a strength bar, or a notice when unavailable.
pub fn display_correlation(col_x: &str, col_y: &str, correlation: Option<f64>) {
    print_section("🔗", &format!("CORRELATION: {} × {}", col_x, col_y));
    match correlation {
        Some(r) => {
            let filled = (r.abs() * 40.0).round() as usize;
            println!("      Correlation: {}", style(format!("{:.4}", r)).yellow().bold());
            println!(
                "      [{}{}]",
                style("█".repeat(filled)).cyan(),
                style("░".repeat(40 - filled.min(40))).dim()
            );
        }
        None => println!(
            "      {}",
            style("Correlation unavailable (no values or zero variance)").yellow()
        ),
    }
}

/// Print a Cramér's V association value.
pub fn display_association(col_x: &str, col_y: &str, v: f64) {
    print_section("🔗", &format!("CRAMÉR'S V: {} × {}", col_x, col_y));
    println!("      Cramér's V: {}", style(fmt_stat_precise(v)).yellow().bold());
}

fn fmt_stat_precise(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4}", value)
    } else {
        "N/A".to_string()
    }
}

/// Print a feature importance ranking.
pub fn display_importance(target: &str, ranked: &[FeatureImportance]) {
    print_section("🎯", &format!("FEATURE IMPORTANCE vs {}", target));
    let mut table = new_table(&["Rank", "Feature", "Importance", "Measure"]);
    for (rank, entry) in ranked.iter().enumerate() {
        let measure = match entry.measure {
            AssociationMeasure::Pearson => "|Pearson|",
            AssociationMeasure::CramersV => "Cramér's V",
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.feature),
            Cell::new(format!("{:.4}", entry.importance)).fg(Color::Green),
            Cell::new(measure),
        ]);
    }
    print_indented(&table);
}
