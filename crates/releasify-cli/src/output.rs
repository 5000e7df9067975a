use std::io::{self, Write};

use releasify_core::retry::AttemptOutcome;
use releasify_core::runner::{EntryOutcome, RunReport};

const SUMMARY_HEADERS: [&str; 4] = ["#", "ACTION", "OUTCOME", "ATTEMPTS"];

/// Write `rows` under `headers` as left-aligned columns separated by two
/// spaces, with a dashed rule below the header. Cells past the header count
/// are dropped.
fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(String::len)
                .fold(headers[col].len(), usize::max)
        })
        .collect();

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    for line in std::iter::once(&header).chain(std::iter::once(&rule)).chain(rows) {
        let mut text = String::new();
        for (cell, width) in line.iter().zip(widths.iter().copied()) {
            if !text.is_empty() {
                text.push_str("  ");
            }
            text.push_str(&format!("{cell:<width$}"));
        }
        writeln!(out, "{}", text.trim_end())?;
    }
    Ok(())
}

fn summary_row(index: usize, action: Option<&str>, outcome: &EntryOutcome) -> Vec<String> {
    let (label, attempts) = match outcome {
        EntryOutcome::Rejected(reason) => (format!("rejected: {reason}"), "-".to_string()),
        EntryOutcome::Completed(AttemptOutcome::Succeeded { attempts }) => {
            ("succeeded".to_string(), attempts.to_string())
        }
        EntryOutcome::Completed(AttemptOutcome::Skipped { attempts }) => {
            ("skipped".to_string(), attempts.to_string())
        }
    };
    vec![
        (index + 1).to_string(),
        action.unwrap_or("-").to_string(),
        label,
        attempts,
    ]
}

/// One row per declaration followed by a tally line.
fn write_summary<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    if report.entries.is_empty() {
        writeln!(out, "No actions were declared.")?;
    } else {
        let rows: Vec<Vec<String>> = report
            .entries
            .iter()
            .map(|entry| summary_row(entry.index, entry.action.as_deref(), &entry.outcome))
            .collect();
        writeln!(out)?;
        write_table(out, &SUMMARY_HEADERS, &rows)?;
    }

    writeln!(
        out,
        "{} succeeded, {} skipped, {} rejected, {} prompt(s)",
        report.succeeded(),
        report.skipped(),
        report.rejected(),
        report.prompts
    )?;
    if report.self_removed {
        writeln!(out, "Removed own executable.")?;
    }
    Ok(())
}

pub fn print_summary(report: &RunReport) -> io::Result<()> {
    write_summary(&mut io::stdout().lock(), report)
}
