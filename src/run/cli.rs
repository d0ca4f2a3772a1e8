use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::editor::{self, Editor, Outcome};
use crate::models::{TransactionForm, TransactionType};
use crate::report::{self, Summary};
use crate::store::Store;
use crate::transfer;
use crate::ui::util::{format_money, format_percent};

pub(crate) fn as_cli(args: &[String], store: &mut Store, config: &Config) -> Result<()> {
    if let Some(err) = store.load_error() {
        eprintln!("Warning: {err}");
    }

    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], store, config),
        "edit" | "e" => cli_edit(&args[2..], store, config),
        "delete" | "rm" => cli_delete(&args[2..], store),
        "list" | "ls" => cli_list(store, config),
        "summary" | "s" => cli_summary(store, config),
        "report" | "r" => cli_report(store, config),
        "export" => cli_export(&args[2..], store),
        "import" => cli_import(&args[2..], store),
        "reset" => cli_reset(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pocketbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Pocketbook: local-only income and expense tracker");
    println!();
    println!("Usage: pocketbook [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  add <income|expense> <amount> <description>");
    println!("    --date <YYYY-MM-DD>               Transaction date (default: today)");
    println!("  edit <id>                           Change fields of a transaction");
    println!("    --description <text> --amount <n> --type <income|expense> --date <YYYY-MM-DD>");
    println!("  delete <id>                         Delete a transaction");
    println!("  list                                List all transactions");
    println!("  summary                             Print income, expenses and balance");
    println!("  report                              Print expenses by category");
    println!("  export [path]                       Export a JSON snapshot (default: transactions.json)");
    println!("  import <path>                       Replace all data with a JSON snapshot");
    println!("  reset --yes                         Delete all transactions");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
}

/// Value following `--name`, if present.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Arguments with every `--flag value` pair removed.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_id(raw: Option<&str>, usage: &str) -> Result<i64> {
    let raw = raw.ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    raw.parse::<i64>()
        .map_err(|_| anyhow::anyhow!("Invalid id: {raw}"))
}

fn report_outcome(outcome: &Outcome, store: &Store, config: &Config) -> Result<()> {
    match outcome {
        Outcome::Rejected(_) => anyhow::bail!("{}", outcome.message()),
        _ => {
            println!("{}", outcome.message());
            if let Some(txn) = editor::find(store, outcome) {
                println!(
                    "  {} ({}) - {} on {}",
                    txn.description,
                    txn.kind,
                    format_money(&config.currency, txn.amount),
                    txn.date
                );
            }
            Ok(())
        }
    }
}

fn cli_add(args: &[String], store: &mut Store, config: &Config) -> Result<()> {
    const USAGE: &str = "pocketbook add <income|expense> <amount> <description> [--date YYYY-MM-DD]";
    let words = positional(args);
    if words.len() < 3 {
        anyhow::bail!("Usage: {USAGE}");
    }

    let kind = TransactionType::parse(words[0])
        .ok_or_else(|| anyhow::anyhow!("Type must be 'income' or 'expense', got '{}'", words[0]))?;
    let date = match flag(args, "--date") {
        Some(date) => date.to_string(),
        None => chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };
    let form = TransactionForm::new(words[2..].join(" "), words[1], kind, date);

    let mut editor = Editor::new();
    let outcome = editor.submit(store, &form)?;
    report_outcome(&outcome, store, config)
}

fn cli_edit(args: &[String], store: &mut Store, config: &Config) -> Result<()> {
    let id = parse_id(
        positional(args).first().copied(),
        "pocketbook edit <id> [--description ..] [--amount ..] [--type ..] [--date ..]",
    )?;

    let mut editor = Editor::new();
    let Some(mut form) = editor.begin_edit(store, id) else {
        println!("{}", Outcome::NotFound(id).message());
        return Ok(());
    };

    if let Some(description) = flag(args, "--description") {
        form.description = description.to_string();
    }
    if let Some(amount) = flag(args, "--amount") {
        form.amount = amount.to_string();
    }
    if let Some(kind) = flag(args, "--type") {
        form.kind = TransactionType::parse(kind)
            .ok_or_else(|| anyhow::anyhow!("Type must be 'income' or 'expense', got '{kind}'"))?;
    }
    if let Some(date) = flag(args, "--date") {
        form.date = date.to_string();
    }

    let outcome = editor.submit(store, &form)?;
    report_outcome(&outcome, store, config)
}

fn cli_delete(args: &[String], store: &mut Store) -> Result<()> {
    let id = parse_id(args.first().map(String::as_str), "pocketbook delete <id>")?;
    let outcome = Editor::new().delete(store, id)?;
    println!("{}", outcome.message());
    Ok(())
}

fn cli_list(store: &Store, config: &Config) -> Result<()> {
    if store.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    println!(
        "{:<14} {:<10} {:<8} {:>16}  Description",
        "ID", "Date", "Type", "Amount"
    );
    println!("{}", "─".repeat(70));
    for txn in store.all() {
        println!(
            "{:<14} {:<10} {:<8} {:>16}  {}",
            txn.id,
            txn.date,
            txn.kind,
            format_money(&config.currency, txn.amount),
            txn.description,
        );
    }
    Ok(())
}

fn cli_summary(store: &Store, config: &Config) -> Result<()> {
    let summary = Summary::from_transactions(store.all());
    let money = |v| format_money(&config.currency, v);

    println!("Pocketbook: {} transactions", store.len());
    println!("{}", "─".repeat(40));
    println!("  Income:    {}  ({} txns)", money(summary.income), summary.income_count);
    println!("  Expenses:  {}  ({} txns)", money(summary.expenses), summary.expense_count);
    println!("  Balance:   {}", money(summary.balance));
    Ok(())
}

fn cli_report(store: &Store, config: &Config) -> Result<()> {
    let txns = store.all();
    let money = |v| format_money(&config.currency, v);

    println!("Income:    {}", money(report::total_income(txns)));
    println!("Expenses:  {}", money(report::total_expenses(txns)));
    println!("Balance:   {}", money(report::balance(txns)));

    let breakdown = report::category_breakdown(txns);
    if breakdown.is_empty() {
        println!();
        println!("No expenses recorded.");
        return Ok(());
    }

    println!();
    println!("Expenses by Category:");
    for row in &breakdown {
        println!(
            "  {:<24} {:>6} - {}",
            row.name,
            format_percent(row.percent),
            money(row.amount)
        );
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| PathBuf::from(transfer::EXPORT_FILE_NAME));

    let count = transfer::export_to_file(store, &path)?;
    println!("Exported {count} transactions to {}", path.display());
    Ok(())
}

fn cli_import(args: &[String], store: &mut Store) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: pocketbook import <file.json>");
    };
    let expanded = shellexpand(file_path);
    let path = Path::new(&expanded);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let replaced = store.len();
    let count = transfer::import_from_file(store, path)?;
    println!("Imported {count} transactions (replaced {replaced})");
    Ok(())
}

fn cli_reset(args: &[String], store: &mut Store) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") {
        anyhow::bail!(
            "This deletes all {} transactions. Re-run with --yes to confirm.",
            store.len()
        );
    }
    let removed = store.len();
    transfer::reset_all(store)?;
    println!("Deleted {removed} transactions");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
