//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the extraction code stays clean and testable
//! - output changes are localized

use crate::domain::{DerivedParams, ObservedDomain};
use crate::extract::Coverage;
use crate::io::ExtractedRow;

/// Units shown next to each bundle entry.
fn unit(name: &str) -> &'static str {
    match name {
        "e" | "eh" | "skewness" => "eV",
        "topt" | "ctmin" | "ctmax" | "th" | "thermal_safety_margin" | "thermal_tolerance" | "breadth"
        | "thermal_performance_breadth" => "°C",
        _ => "",
    }
}

/// Summary of one curve: fitted parameters then the derived bundle.
pub fn format_curve_summary(row: &ExtractedRow, fitted: &[(String, f64)], domain: Option<ObservedDomain>) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ({}) ===\n", row.id, row.model));
    if let Some(d) = domain {
        out.push_str(&format!("Observed temps: [{:.2}, {:.2}]\n", d.min, d.max));
    }

    out.push_str("\nFitted parameters:\n");
    for (name, value) in fitted {
        out.push_str(&format!("  {name:<12} {value:>14.6}\n"));
    }

    out.push_str("\nDerived parameters:\n");
    match (&row.params, &row.error) {
        (Some(params), _) => out.push_str(&format_params_table(params)),
        (None, Some(err)) => out.push_str(&format!("  extraction failed: {err}\n")),
        (None, None) => out.push_str("  (none)\n"),
    }

    out
}

/// Two-column table of a bundle; undefined entries print as `NA`.
pub fn format_params_table(params: &DerivedParams) -> String {
    let mut out = String::new();
    for (name, value) in params.entries() {
        let line = format!("  {:<28} {:>14} {}", name, fmt_opt(value), unit(name));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Wide table with one row per curve (batch mode).
pub fn format_batch_table(rows: &[ExtractedRow], columns: &[&str]) -> String {
    let mut out = String::new();

    let mut header = format!("{:<20} {:<22}", "id", "model");
    let mut rule = format!("{:-<20} {:-<22}", "", "");
    for c in columns {
        header.push_str(&format!(" {c:>10}"));
        rule.push_str(&format!(" {:->10}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in rows {
        let mut line = format!("{:<20} {:<22}", truncate(&row.id, 20), truncate(&row.model, 22));
        for c in columns {
            let v = row.params.as_ref().and_then(|p| p.get(c));
            line.push_str(&format!(" {:>10}", fmt_short(v)));
        }
        if let Some(err) = &row.error {
            line.push_str(&format!("  ! {err}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// How many curves produced each entry.
pub fn format_coverage(cov: &Coverage) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Curves: {} | failed: {} | extracted: {}\n",
        cov.total,
        cov.failed,
        cov.total - cov.failed
    ));
    for (name, n) in &cov.defined {
        out.push_str(&format!("  {name:<28} {n:>6}/{}\n", cov.total - cov.failed));
    }
    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => "NA".to_string(),
    }
}

fn fmt_short(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.3}"),
        _ => "NA".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
