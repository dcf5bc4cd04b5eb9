use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, CellAlignment, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use spl_cli::input::load_inputs;
use spl_cli::report::{BatchReport, write_report};
use spl_core::{BatchEntry, CancellationToken, process_batch_with};
use spl_validate::{Category, RuleRegistry, Severity, ValidationPolicy, version_sequence_rule};
use spl_vocab::Vocabulary;

use crate::cli::{CheckArgs, RulesArgs, SeverityArg, VocabArgs};
use crate::summary::{align_column, apply_table_style, header_cell, print_summary, severity_cell};

/// Run `check` and return the process exit code.
pub fn run_check(args: &CheckArgs) -> Result<i32> {
    let span = info_span!("check", snapshots = args.snapshots.len());
    let _guard = span.enter();
    let started = Instant::now();

    let vocabulary = Vocabulary::load(args.vocab_dir.as_deref()).context("load vocabulary")?;
    let policy = match &args.policy {
        Some(path) => ValidationPolicy::from_path(path).context("load validation policy")?,
        None => ValidationPolicy::default(),
    };
    let inputs = load_inputs(&args.snapshots)?;

    let progress = ProgressBar::new(inputs.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
        progress.set_style(style.progress_chars("=> "));
    }
    let cancel = CancellationToken::new();
    let entries = process_batch_with(inputs, &vocabulary, &policy, &cancel, |entry: &BatchEntry| {
        progress.set_message(entry.label.clone());
        progress.inc(1);
    })
    .context("process snapshots")?;
    progress.finish_and_clear();

    let report = BatchReport::from_entries(&entries);
    info!(
        completed = report.completed,
        failed = report.failed,
        blocked = report.blocked,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Check finished"
    );
    if let Some(path) = &args.output {
        write_report(path, &report)?;
        info!(path = %path.display(), "Wrote report");
    }
    print_summary(&report, !args.no_violations);

    let fail_on = args.fail_on.map(severity_from_arg);
    Ok(i32::from(report.fails(fail_on)))
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let category = args
        .category
        .as_deref()
        .map(|name| {
            Category::parse(name).ok_or_else(|| {
                let known: Vec<&str> = Category::all().iter().map(Category::label).collect();
                anyhow!("unknown category `{name}` (expected one of: {})", known.join(", "))
            })
        })
        .transpose()?;

    let registry = RuleRegistry::standard().context("build rule catalog")?;
    let mut rules = registry.describe();
    rules.push(version_sequence_rule());
    rules.retain(|rule| category.is_none_or(|category| rule.category == category));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Record"),
        header_cell("Category"),
        header_cell("Severity"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for rule in &rules {
        table.add_row(vec![
            Cell::new(rule.name),
            Cell::new(rule.kind.to_string()),
            Cell::new(rule.category.label()),
            severity_cell(rule.severity),
            Cell::new(rule.description),
        ]);
    }
    println!("{table}");
    println!("{} rules", rules.len());
    Ok(())
}

pub fn run_vocab(args: &VocabArgs) -> Result<()> {
    let vocabulary = Vocabulary::load(args.vocab_dir.as_deref()).context("load vocabulary")?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Entries")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, count) in vocabulary.summary() {
        table.add_row(vec![name.to_string(), count.to_string()]);
    }
    println!("{table}");
    if vocabulary.overrides().is_empty() {
        println!("Source: embedded tables");
    } else {
        for path in vocabulary.overrides() {
            println!("Override: {}", path.display());
        }
    }
    Ok(())
}

fn severity_from_arg(arg: SeverityArg) -> Severity {
    match arg {
        SeverityArg::Reject => Severity::Reject,
        SeverityArg::Error => Severity::Error,
        SeverityArg::Warning => Severity::Warning,
        SeverityArg::Info => Severity::Info,
    }
}
