//! CLI probe over the organizer read side.
//!
//! # Responsibility
//! - Print project summaries, or one project's detail, as JSON.
//! - Keep user-facing failures to the generic loader messages.
//!
//! Usage: `llmnote_cli [project-id]`, configured through `LLMNOTE_*` variables.

use futures::executor::block_on;
use llmnote_core::{
    core_version, init_logging, CoreConfig, ProjectDetailLoader, ProjectSummaryLoader, SqliteStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(std::env::args().nth(1)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("llmnote_cli {}: {message}", core_version());
            ExitCode::FAILURE
        }
    }
}

fn run(project_id: Option<String>) -> Result<String, String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, log_dir).map_err(|err| err.to_string())?;
    }

    let store = SqliteStore::open(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))?;

    let json = match project_id {
        Some(project_id) => {
            let loader = ProjectDetailLoader::new(&store);
            let detail = block_on(loader.load_project_detail_str(&project_id))
                .map_err(|err| format!("{} ({})", err.user_message(), err.status_code()))?;
            serde_json::to_string_pretty(&detail)
        }
        None => {
            let loader = ProjectSummaryLoader::new(&store);
            let summaries = block_on(loader.load_project_summaries());
            if let Some(err) = summaries.error {
                return Err(err.user_message());
            }
            serde_json::to_string_pretty(&summaries.projects)
        }
    };
    json.map_err(|err| err.to_string())
}
