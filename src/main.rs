mod config;
mod db;
mod editor;
mod logging;
mod models;
mod report;
mod run;
mod store;
mod transfer;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_data_dir()?;
    logging::init(&config)?;

    let db = db::Database::open(&config.db_path())?;
    let mut store = store::Store::load(db)?;
    tracing::info!(
        db = %config.db_path().display(),
        transactions = store.len(),
        "pocketbook started"
    );

    match args.len() {
        1 => run::as_tui(&mut store, &config),
        2.. => run::as_cli(&args, &mut store, &config),
        _ => {
            eprintln!("Usage: pocketbook [command]");
            Ok(())
        }
    }
}
