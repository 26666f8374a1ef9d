//! `roombook init`: create the data directory and an empty reservation database.

use crate::error::CliError;
use crate::utils::{shorten_path, GlobalOptions};
use clap::Parser;
use roombook::database::{
    init_data_dir, resolve_data_dir, InitOptions, CONFIG_FILE_NAME, DATABASE_FILE_NAME,
};
use std::path::{Path, PathBuf};

/// Set up a data directory for reservations.
#[derive(Parser)]
#[command(about = "Create the data directory and reservation database")]
pub struct InitCommand {
    /// Directory to set up (defaults to the global data directory)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Replace an existing database, discarding its reservations
    #[arg(long)]
    overwrite: bool,

    /// Also write a commented config.yaml template
    #[arg(long)]
    with_config: bool,

    /// Print the steps without performing them
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// `--disable-autoinit` has no effect here; `--data-dir` names the
    /// directory to create rather than one that must already exist.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let requested = self.data_dir.clone().or_else(|| global.data_dir.clone());
        let data_dir = resolve_data_dir(requested.as_deref()).map_err(|_| {
            CliError::Config("no data directory given and no home directory found".to_string())
        })?;

        if self.dry_run {
            println!("Dry-run mode: nothing will be written");
            println!("Target: {}", data_dir.display());
            for step in self.planned_steps(&data_dir) {
                println!("  - {step}");
            }
            return Ok(());
        }

        let result = init_data_dir(
            &InitOptions::new(data_dir)
                .with_overwrite(self.overwrite)
                .with_create_config(self.with_config),
        )?;

        let mut done = Vec::new();
        if result.data_dir_created {
            done.push("Created data directory");
        }
        done.push(if self.overwrite {
            "Recreated database"
        } else {
            "Created database"
        });
        match (result.config_created, self.with_config) {
            (true, _) => done.push("Created default configuration file"),
            (false, true) => done.push("Left existing configuration file untouched (already exists)"),
            (false, false) => {}
        }

        println!("Initialized roombook in: {}", shorten_path(&result.data_dir));
        for line in done {
            println!("  - {line}");
        }
        Ok(())
    }

    fn planned_steps(&self, data_dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();

        if !data_dir.exists() {
            steps.push("Create data directory".to_string());
        }

        let database = data_dir.join(DATABASE_FILE_NAME);
        steps.push(match (database.exists(), self.overwrite) {
            (false, _) => format!("Create database {}", database.display()),
            (true, true) => format!("Replace database {}", database.display()),
            (true, false) => format!(
                "Stop: {} already exists (pass --overwrite to replace it)",
                database.display()
            ),
        });

        if self.with_config {
            let config = data_dir.join(CONFIG_FILE_NAME);
            steps.push(if config.exists() {
                format!("Keep existing configuration file {}", config.display())
            } else {
                format!("Create configuration file {}", config.display())
            });
        }

        steps
    }
}
