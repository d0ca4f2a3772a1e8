use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::store::Store;
use crate::transfer;
use crate::ui::app::{App, FormField, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut Store, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    app.refresh(store);
    if let Some(err) = store.load_error() {
        app.set_status(format!("Warning: {err}"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("tui exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            handle_key(key, app, store)?;
        }
    }
    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, store),
        InputMode::Command => handle_command_input(key, app, store),
        InputMode::Form => handle_form_input(key, app, store),
        InputMode::Confirm => handle_confirm_input(key, app, store),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') if app.screen == Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('G') if app.screen == Screen::Transactions => {
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                app.visible_rows.max(1),
            );
        }
        KeyCode::Char('1') => switch_screen(app, store, Screen::Overview),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Transactions),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Reports),
        KeyCode::Char('4') => switch_screen(app, store, Screen::Settings),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, store, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Char('a') => app.open_new_form(),
        KeyCode::Char('e') | KeyCode::Enter if app.screen == Screen::Transactions => {
            commands::handle_command("edit", app, store)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete", app, store)?;
        }
        KeyCode::Char('x') if app.screen == Screen::Settings => {
            commands::handle_command("export", app, store)?;
        }
        KeyCode::Char('i') if app.screen == Screen::Settings => {
            app.input_mode = InputMode::Command;
            app.command_input = "import ".to_string();
        }
        KeyCode::Char('R') if app.screen == Screen::Settings => {
            commands::handle_command("reset", app, store)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(store)?,
        KeyCode::Tab | KeyCode::Down => app.form_field = app.form_field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form_field = app.form_field.prev(),
        KeyCode::Left | KeyCode::Right if app.form_field == FormField::Type => {
            app.form.kind = app.form.kind.toggle();
        }
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_input(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                run_pending(action, app, store)?;
            }
        }
        _ => {
            app.pending_action = None;
            app.set_status("Cancelled");
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    Ok(())
}

fn run_pending(action: PendingAction, app: &mut App, store: &mut Store) -> Result<()> {
    match action {
        PendingAction::DeleteTransaction { id, .. } => {
            let outcome = app.editor.delete(store, id)?;
            app.set_status(outcome.message());
        }
        PendingAction::Import { path } => {
            app.editor.cancel();
            match transfer::import_from_file(store, &path) {
                Ok(count) => app.set_status(format!(
                    "Imported {count} transactions from {}",
                    path.display()
                )),
                Err(e) => app.set_status(format!("Import failed: {e:#}")),
            }
        }
        PendingAction::Reset => {
            app.editor.cancel();
            transfer::reset_all(store)?;
            app.set_status("All transactions deleted");
        }
    }
    app.refresh(store);
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, store: &Store, screen: Screen) {
    app.screen = screen;
    app.refresh(store);
}

fn handle_move_down(app: &mut App) {
    if app.screen == Screen::Transactions {
        scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            app.visible_rows.max(1),
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Transactions {
        scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{TransactionForm, TransactionType};
    use std::path::PathBuf;

    fn press(app: &mut App, store: &mut Store, code: KeyCode) {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), app, store).unwrap();
    }

    fn type_str(app: &mut App, store: &mut Store, text: &str) {
        for c in text.chars() {
            press(app, store, KeyCode::Char(c));
        }
    }

    fn setup() -> (App, Store) {
        let config = Config {
            data_dir: PathBuf::from("/tmp/pocketbook-test"),
            currency: "ZMW".into(),
            log_filter: "info".into(),
        };
        let mut app = App::new(&config);
        let store = Store::in_memory().unwrap();
        app.refresh(&store);
        (app, store)
    }

    #[test]
    fn test_add_through_keys() {
        let (mut app, mut store) = setup();
        press(&mut app, &mut store, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::Form);
        type_str(&mut app, &mut store, "Salary");
        press(&mut app, &mut store, KeyCode::Tab);
        type_str(&mut app, &mut store, "1000");
        press(&mut app, &mut store, KeyCode::Tab);
        press(&mut app, &mut store, KeyCode::Right);
        assert_eq!(app.form.kind, TransactionType::Income);
        press(&mut app, &mut store, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].kind, TransactionType::Income);
    }

    #[test]
    fn test_esc_cancels_form() {
        let (mut app, mut store) = setup();
        press(&mut app, &mut store, KeyCode::Char('a'));
        type_str(&mut app, &mut store, "Lunch");
        press(&mut app, &mut store, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_confirm_and_decline() {
        let (mut app, mut store) = setup();
        app.form = TransactionForm::new("Rent", "400", TransactionType::Expense, "2024-01-02");
        app.submit_form(&mut store).unwrap();
        app.screen = Screen::Transactions;

        press(&mut app, &mut store, KeyCode::Char('D'));
        press(&mut app, &mut store, KeyCode::Char('n'));
        assert_eq!(store.len(), 1);
        assert_eq!(app.status_message, "Cancelled");

        press(&mut app, &mut store, KeyCode::Char('D'));
        press(&mut app, &mut store, KeyCode::Char('y'));
        assert!(store.is_empty());
        assert!(app.transactions.is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_reset_through_command() {
        let (mut app, mut store) = setup();
        app.form = TransactionForm::new("Rent", "400", TransactionType::Expense, "2024-01-02");
        app.submit_form(&mut store).unwrap();

        press(&mut app, &mut store, KeyCode::Char(':'));
        type_str(&mut app, &mut store, "reset");
        press(&mut app, &mut store, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Confirm);
        press(&mut app, &mut store, KeyCode::Char('y'));
        assert!(store.is_empty());
        assert_eq!(app.summary.balance, rust_decimal::Decimal::ZERO);
    }

    #[test]
    fn test_import_failure_keeps_data() {
        let (mut app, mut store) = setup();
        app.form = TransactionForm::new("Rent", "400", TransactionType::Expense, "2024-01-02");
        app.submit_form(&mut store).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        app.confirm(PendingAction::Import { path });
        press(&mut app, &mut store, KeyCode::Char('y'));

        assert_eq!(store.len(), 1);
        assert!(app.status_message.starts_with("Import failed"));
    }

    #[test]
    fn test_settings_import_key_prefills_command() {
        let (mut app, mut store) = setup();
        press(&mut app, &mut store, KeyCode::Char('4'));
        press(&mut app, &mut store, KeyCode::Char('i'));
        assert_eq!(app.input_mode, InputMode::Command);
        assert_eq!(app.command_input, "import ");

        press(&mut app, &mut store, KeyCode::Esc);
        press(&mut app, &mut store, KeyCode::Char('R'));
        assert_eq!(app.pending_action, Some(PendingAction::Reset));
    }

    #[test]
    fn test_tab_cycles_screens() {
        let (mut app, mut store) = setup();
        press(&mut app, &mut store, KeyCode::Tab);
        assert_eq!(app.screen, Screen::Transactions);
        press(&mut app, &mut store, KeyCode::BackTab);
        press(&mut app, &mut store, KeyCode::BackTab);
        assert_eq!(app.screen, Screen::Settings);
    }
}
