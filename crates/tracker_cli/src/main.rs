//! `employee-tracker` entry point.
//!
//! # Responsibility
//! - Load `.env`, read configuration and start file logging.
//! - Open the single database connection; refuse to show menus without it.
//! - Run the menu loop and release the connection on Quit.

use log::{error, info, warn};
use std::io;
use std::process::ExitCode;
use tracker_cli::{run_menu, App, TerminalPrompter};
use tracker_core::config::ENV_DB_PATH;
use tracker_core::db::seed::seed_sample_roster;
use tracker_core::{core_version, init_logging, open_db, RosterService, TrackerConfig};

fn main() -> ExitCode {
    // Missing .env is fine; variables may come from the real environment.
    let _ = dotenvy::dotenv();
    let config = TrackerConfig::from_env();

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
    for key in &config.ignored_keys {
        warn!("event=config_load module=cli status=ignored key={key} reason=embedded_database");
        eprintln!("warning: {key} is ignored; set {ENV_DB_PATH} to choose the database file");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=startup module=cli status=error error_code=connection_failed error={err}"
            );
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if config.seed_sample_data {
        match seed_sample_roster(&conn) {
            Ok(true) => println!("Loaded the sample roster."),
            Ok(false) => {}
            Err(err) => eprintln!("warning: could not load the sample roster: {err}"),
        }
    }

    println!("Employee Tracker v{}", core_version());
    let outcome = {
        let mut app = App::new(
            RosterService::new(&conn),
            TerminalPrompter::default(),
            io::stdout(),
        );
        run_menu(&mut app)
    };

    if let Err((_, err)) = conn.close() {
        error!("event=db_close module=cli status=error error={err}");
    }

    match outcome {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
