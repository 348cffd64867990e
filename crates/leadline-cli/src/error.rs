use anyhow::Error;
use leadline_config::ConfigError;
use leadline_core::CoreError;
use leadline_store::error::{StoreError, StoreErrorKind};
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_UNAUTHORIZED: u8 = 4;
pub const EXIT_CONFLICT: u8 = 5;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

#[derive(Debug, Serialize)]
struct FailureReport {
    success: bool,
    message: String,
}

/// Failures go to the caller as a structured record in JSON mode; internal
/// chain detail stays behind `--verbose`.
pub fn report_error(err: &Error, verbose: bool, json: bool) {
    if json {
        let report = FailureReport {
            success: false,
            message: if verbose {
                format!("{:#}", err)
            } else {
                err.to_string()
            },
        };
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => eprintln!("{rendered}"),
            Err(_) => eprintln!("error: {}", err),
        }
        return;
    }

    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            });
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::Conflict => EXIT_CONFLICT,
        StoreErrorKind::Unauthorized => EXIT_UNAUTHORIZED,
        StoreErrorKind::InvalidId
        | StoreErrorKind::InvalidDate
        | StoreErrorKind::InvalidBackupPath
        | StoreErrorKind::InvalidInteractionKind
        | StoreErrorKind::InvalidDataPath
        | StoreErrorKind::Core => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidSoonDays(_)
        | ConfigError::InvalidPageSize(_)
        | ConfigError::InvalidLeadSource
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
