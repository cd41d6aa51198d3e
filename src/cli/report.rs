//! Report formatting and printing utilities.
//!
//! Every printer has a `*_to` variant taking a writer so output can be
//! captured in tests. Separate from core logic so the engine stays usable as
//! a library.

use std::{
    collections::HashMap,
    io::{self, Write},
};

use colored::Colorize;
use unicode_width::UnicodeWidthChar;

use super::commands::{CommandResult, CommandSummary, ConvertSummary, InitSummary, ScanSummary};
use crate::{
    config::MANUAL_LOG_FILE_NAME,
    core::{
        conversion::KeyCollision,
        data::{Category, NsGroup},
    },
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Display width limit for texts in the scan's top list.
const MAX_TOP_TEXT_WIDTH: usize = 60;

pub fn print(result: &CommandResult) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Convert(summary) => print_convert_to(summary, &mut stdout),
        CommandSummary::Scan(summary) => {
            print_scan_to(summary, &mut stdout);
            print_parse_warning(&summary.parse_errors, result.verbose);
        }
        CommandSummary::Init(summary) => print_init_to(summary, &mut stdout),
    }
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(errors: &[String], verbose: bool) {
    print_parse_warning_to(errors, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(errors: &[String], verbose: bool, writer: &mut W) {
    if errors.is_empty() {
        return;
    }
    if verbose {
        for error in errors {
            let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), error);
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            errors.len(),
            "-v".cyan()
        );
    }
}

pub fn print_convert_to<W: Write>(summary: &ConvertSummary, writer: &mut W) {
    let ctx = &summary.ctx;
    let _ = writeln!(writer, "{}", ns_group_header(&ctx.ns_group));

    if ctx.records.is_empty() {
        let _ = writeln!(writer, "No translatable text found in {}", summary.file);
    } else {
        let _ = writeln!(writer, "{}", "Converted:".bold());
        for category in Category::ALL {
            let _ = writeln!(
                writer,
                "  {:<16} {}",
                category.to_string(),
                ctx.stats.count(category)
            );
        }
        let _ = writeln!(writer, "  {:<16} {}", "total", ctx.stats.total());
    }

    for collision in &ctx.collisions {
        print_collision(collision, writer);
    }

    if summary.list_keys && !ctx.records.is_empty() {
        let _ = writeln!(writer);
        let _ = writeln!(writer, "{}", "Keys:".bold());
        for record in ctx.unique_records() {
            let _ = writeln!(
                writer,
                "  {} {}",
                record.full_key,
                format!("// {}", record.original).dimmed()
            );
        }
    }

    if summary.print_diff && summary.original != summary.output {
        let _ = writeln!(writer);
        print_diff_to(&summary.file, &summary.original, &summary.output, writer);
    }

    let _ = writeln!(writer);
    if summary.written {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Written: {}", summary.file).green()
        );
    } else if ctx.has_changes() {
        let _ = writeln!(writer, "Dry run (use {} to apply changes)", "--write".cyan());
    }

    if !ctx.manual.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} site(s) need manual review (see {})",
            "note:".bold().cyan(),
            ctx.manual.len(),
            MANUAL_LOG_FILE_NAME
        );
    }
}

fn ns_group_header(ns_group: &NsGroup) -> String {
    if ns_group.group.is_empty() {
        format!("{} {}", "Namespace:".bold(), ns_group.namespace)
    } else {
        format!(
            "{} {}  {} {}",
            "Namespace:".bold(),
            ns_group.namespace,
            "Group:".bold(),
            ns_group.group
        )
    }
}

fn print_collision<W: Write>(collision: &KeyCollision, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} line {}: \"{}\" reuses key {} (first used for \"{}\")",
        "warning:".bold().yellow(),
        collision.line,
        collision.other_text,
        collision.full_key.cyan(),
        collision.first_text
    );
}

/// Line diff by index. Rewrites keep line numbering, so pairing lines by
/// position is enough.
pub fn print_diff_to<W: Write>(file: &str, original: &str, modified: &str, writer: &mut W) {
    let _ = writeln!(writer, "{}", format!("--- {} (original)", file).red());
    let _ = writeln!(writer, "{}", format!("+++ {} (modified)", file).green());

    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = modified.lines().collect();
    for i in 0..old.len().max(new.len()) {
        let (before, after) = (old.get(i), new.get(i));
        if before == after {
            continue;
        }
        if let Some(line) = before {
            let _ = writeln!(writer, "{}", format!("- {}", line).red());
        }
        if let Some(line) = after {
            let _ = writeln!(writer, "{}", format!("+ {}", line).green());
        }
    }
}

pub fn print_scan_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    let total = summary.candidate_count();
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "No convertible strings found in {} file(s)",
                summary.files_scanned
            )
            .green()
        );
        return;
    }

    let ranked = rank_texts(summary);
    if summary.top > 0 {
        let _ = writeln!(writer, "{}", format!("Top {} strings:", summary.top).bold());
        let count_width = ranked.first().map_or(1, |(_, count)| count.to_string().len());
        for (text, count) in ranked.iter().take(summary.top) {
            let _ = writeln!(
                writer,
                "  {:>width$}  \"{}\"",
                count,
                truncate_to_width(text, MAX_TOP_TEXT_WIDTH),
                width = count_width
            );
        }
        let _ = writeln!(writer);
    }

    for findings in &summary.findings {
        let _ = writeln!(writer, "{}", findings.file.bold());
        for record in &findings.records {
            let _ = writeln!(
                writer,
                "  {} ({}): \"{}\"",
                record.line.to_string().blue(),
                record.kind.category(),
                record.original
            );
        }
    }

    let _ = writeln!(writer);
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!(
            "{} candidate string(s), {} unique, in {} file(s) ({} file(s) scanned)",
            total,
            ranked.len(),
            summary.findings.len(),
            summary.files_scanned
        )
        .red()
    );
}

/// Original texts by occurrence count, most frequent first, ties by text.
fn rank_texts(summary: &ScanSummary) -> Vec<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in summary.findings.iter().flat_map(|f| &f.records) {
        *counts.entry(record.original.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.file_name).green()
    );
}
