// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Version | Options | Inis | List | Query | Order
//!   Export | Show | Detect | Convert
//! ```

use std::process::ExitCode;

use rmm_rs::cli::global::GlobalOptions;
use rmm_rs::cli::{self, Command};
use rmm_rs::cmd::config::{run_inis_command, run_options_command};
use rmm_rs::cmd::file::{
    run_convert_command, run_detect_command, run_export_command, run_show_command,
};
use rmm_rs::cmd::mods::{run_list_command, run_order_command, run_query_command};
use rmm_rs::config::Config;
use rmm_rs::config::loader::ConfigLoader;
use rmm_rs::logging::init_logging;
use rmm_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "rmm.toml";
const ENV_PREFIX: &str = "RMM";

fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli)
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Inis) => build_config_loader(&cli.global)
            .map(|loader| run_inis_command(&loader.format_loaded_files())),
        Some(Command::List(args)) => {
            load_config(&cli.global).and_then(|config| run_list_command(args, &config))
        }
        Some(Command::Query(args)) => {
            load_config(&cli.global).and_then(|config| run_query_command(args, &config))
        }
        Some(Command::Order(args)) => {
            load_config(&cli.global).and_then(|config| run_order_command(args, &config))
        }
        Some(Command::Export(args)) => {
            load_config(&cli.global).and_then(|config| run_export_command(args, &config))
        }
        Some(Command::Show(args)) => {
            load_config(&cli.global).and_then(|config| run_show_command(args, &config))
        }
        Some(Command::Detect(args)) => run_detect_command(args),
        Some(Command::Convert(args)) => {
            load_config(&cli.global).and_then(|config| run_convert_command(args, &config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
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

fn build_config_loader(global: &GlobalOptions) -> rmm_rs::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for (key, value) in global.to_config_overrides()? {
        loader = loader.set_str(&key, &value)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> rmm_rs::error::Result<Config> {
    build_config_loader(global)?.build()
}
