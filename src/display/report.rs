//! Report formatting utilities for terminal output
//!
//! Bar charts and the category breakdown view.

use crate::config::settings::Settings;
use crate::reports::CategoryBreakdown;

const BAR_WIDTH: usize = 24;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format the category breakdown as a bar chart with a legend
pub fn format_breakdown(report: &CategoryBreakdown, title: &str, settings: &Settings) -> String {
    if report.is_empty() {
        return "No expenses to display.\n\nAdd some expenses to see your analytics.\n"
            .to_string();
    }

    let symbol = &settings.currency_symbol;
    let name_width = report
        .slices
        .iter()
        .map(|s| s.category.name().chars().count())
        .max()
        .unwrap_or(8)
        .max(8);
    let line_width = name_width + BAR_WIDTH + 34;
    let max_total = report.max_total().to_f64();

    let mut output = String::new();
    output.push_str(&format!("{}\n", title));
    output.push_str(&format!("{}\n", separator(line_width)));

    for slice in &report.slices {
        output.push_str(&format!(
            "{:<width$}  {}  {:>12}  {:>5}  {}\n",
            slice.category.name(),
            format_bar(slice.total.to_f64(), max_total, BAR_WIDTH),
            slice.total.format_with_symbol(symbol),
            format_percentage(slice.percentage),
            slice.color,
            width = name_width
        ));
    }

    output.push_str(&format!("{}\n", separator(line_width)));
    output.push_str(&format!(
        "Total Expenses: {} across {} expense{}\n",
        report.total.format_with_symbol(symbol),
        report.expense_count,
        if report.expense_count == 1 { "" } else { "s" }
    ));

    output
}
