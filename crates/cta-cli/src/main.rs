//! Document file-name auditor CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use cta_cli::commands::{default_workers, load_rules, run_audit, run_check};
use cta_cli::logging::{LogConfig, LogFormat, init_logging};
use cta_cli::summary::{check_table, print_audit_summary, print_rules};
use cta_cli::types::AuditOptions;

mod cli;

use crate::cli::{AuditArgs, CheckArgs, CheckFormatArg, Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let rules_path = cli.rules.clone();
    let exit_code = match cli.command {
        Command::Audit(args) => match run_audit(&audit_options(args, rules_path)) {
            Ok(run) => {
                print_audit_summary(&run);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Check(args) => match check(&args, rules_path.as_deref()) {
            Ok(code) => code,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Rules => match load_rules(rules_path.as_deref()) {
            Ok(rules) => {
                print_rules(&rules);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn audit_options(args: AuditArgs, rules: Option<std::path::PathBuf>) -> AuditOptions {
    AuditOptions {
        sheet: args.sheet,
        output: args.output,
        json: args.json,
        rules,
        workers: args.workers.map_or_else(default_workers, usize::from),
    }
}

/// Prints the checked names; exit code 1 when any needs attention.
fn check(args: &CheckArgs, rules: Option<&std::path::Path>) -> anyhow::Result<i32> {
    let checked = run_check(load_rules(rules)?, &args.names);
    match args.format {
        CheckFormatArg::Table => println!("{}", check_table(&checked)),
        CheckFormatArg::Json => println!("{}", serde_json::to_string_pretty(&checked)?),
    }
    let flagged = checked
        .iter()
        .any(|entry| entry.outcome.decision.needs_attention());
    Ok(i32::from(flagged))
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
