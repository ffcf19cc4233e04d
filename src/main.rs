// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> .env --> Config --> Logging --> Command Dispatch
//!   Backup | List | Options | Configs | Version
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use repo_vault::cli::{self, Command};
use repo_vault::cmd::backup::run_backup_command;
use repo_vault::cmd::config::{run_configs_command, run_options_command};
use repo_vault::cmd::list::run_list_command;
use repo_vault::config::Config;
use repo_vault::config::loader::load_env_file;
use repo_vault::logging::{LogConfig, init_logging};
use tracing::debug;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let command = cli.command();

    if command == Command::Version {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    if let Err(e) = load_env_file(cli.global.env_file.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let loader = cli.global.config_loader(std::env::vars());
    let config_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    for line in &config_files {
        debug!(source = %line, "configuration loaded");
    }

    dispatch_command(command, config, &config_files).await
}

async fn dispatch_command(command: Command, config: Config, config_files: &[String]) -> ExitCode {
    let result = match command {
        Command::Version => {
            handle_version_command();
            Ok(())
        }
        Command::Options => {
            run_options_command(&config);
            Ok(())
        }
        Command::Configs => {
            run_configs_command(config_files);
            Ok(())
        }
        Command::List => run_list_command(&config).await,
        Command::Backup => run_backup_command(Arc::new(config)).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}
