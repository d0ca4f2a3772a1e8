use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use crate::run::shellexpand;
use crate::store::Store;
use crate::transfer;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Pocketbook", cmd_quit, r);
    register_command!("quit", "Quit Pocketbook", cmd_quit, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("r", "Go to Reports", cmd_reports, r);
    register_command!("reports", "Go to Reports", cmd_reports, r);
    register_command!("s", "Go to Settings", cmd_settings, r);
    register_command!("settings", "Go to Settings", cmd_settings, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("a", "Add a transaction", cmd_add, r);
    register_command!("add", "Add a transaction", cmd_add, r);
    register_command!(
        "edit",
        "Edit transaction (selected, or e.g. :edit 1704067200000)",
        cmd_edit,
        r
    );
    register_command!(
        "delete",
        "Delete transaction (selected, or e.g. :delete 1704067200000)",
        cmd_delete,
        r
    );
    register_command!(
        "export",
        "Export JSON snapshot (e.g. :export ~/transactions.json)",
        cmd_export,
        r
    );
    register_command!(
        "import",
        "Replace all data from a JSON snapshot (e.g. :import ~/transactions.json)",
        cmd_import,
        r
    );
    register_command!("reset", "Delete all transactions", cmd_reset, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Id given as the argument, or the one under the cursor.
fn target_id(args: &str, app: &App) -> Result<i64, String> {
    if args.is_empty() {
        return app
            .selected_transaction()
            .map(|t| t.id)
            .ok_or_else(|| "No transaction selected".to_string());
    }
    args.parse::<i64>()
        .map_err(|_| format!("Invalid id: {args}"))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Overview;
    app.refresh(store);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh(store);
    Ok(())
}

fn cmd_reports(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Reports;
    app.refresh(store);
    Ok(())
}

fn cmd_settings(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Settings;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.open_new_form();
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    match target_id(args, app) {
        Ok(id) => app.open_edit_form(store, id),
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let id = match target_id(args, app) {
        Ok(id) => id,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    match store.get(id) {
        Some(txn) => {
            let description = txn.description.clone();
            app.confirm(PendingAction::DeleteTransaction { id, description });
        }
        None => app.set_status(format!("No transaction with id {id}")),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        app.data_dir.join(transfer::EXPORT_FILE_NAME)
    } else {
        PathBuf::from(shellexpand(args))
    };

    match transfer::export_to_file(store, &path) {
        Ok(count) => app.set_status(format!("Exported {count} transactions to {}", path.display())),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.json>");
        return Ok(());
    }
    let path = PathBuf::from(shellexpand(args));
    if !path.exists() {
        app.set_status(format!("File not found: {}", path.display()));
        return Ok(());
    }
    app.confirm(PendingAction::Import { path });
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.confirm(PendingAction::Reset);
    Ok(())
}
