// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::constants;
use crate::operation::Operation;
use crate::result::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::PathBuf;
use test_extension_shared::logger::rolling_logger::RollingLogger;
use test_extension_shared::logger::{logger_manager, LoggerLevel};

static OPERATION_LOGGER_KEY: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        constants::OPERATION_LOG_NAME_PREFIX,
        constants::EXTENSION_VERSION
    )
});

/// Opens the general log and the operations log under `log_folder`.
/// Fails when either file cannot be created.
pub fn init_logger(log_folder: PathBuf) -> Result<()> {
    let general_logger = RollingLogger::create_new(
        log_folder.clone(),
        constants::GENERAL_LOG_NAME.to_string(),
        constants::MAX_LOG_FILE_SIZE,
        constants::MAX_LOG_FILE_COUNT,
    );
    general_logger.open_check()?;

    let operation_logger = RollingLogger::create_new(
        log_folder,
        OPERATION_LOGGER_KEY.to_string(),
        constants::MAX_LOG_FILE_SIZE,
        constants::MAX_LOG_FILE_COUNT,
    );
    operation_logger.open_check()?;

    let mut loggers = HashMap::new();
    loggers.insert(constants::GENERAL_LOG_NAME.to_string(), general_logger);
    loggers.insert(OPERATION_LOGGER_KEY.to_string(), operation_logger);

    // info goes to stdout, warnings and errors to stderr
    logger_manager::set_system_logger(LoggerLevel::Info);
    logger_manager::set_loggers(
        loggers,
        constants::GENERAL_LOG_NAME.to_string(),
        LoggerLevel::Info,
    );
    Ok(())
}

fn with_version(message: String) -> String {
    format!("[{}] {}", constants::EXTENSION_VERSION, message)
}

pub fn write(message: String) {
    logger_manager::write_info(with_version(message));
}

pub fn write_warning(message: String) {
    logger_manager::write_warn(with_version(message));
}

pub fn write_error(message: String) {
    logger_manager::write_err(with_version(message));
}

/// Operations log line: `[Seq Num: 3] [operation: enable] transitioning: enabling in progress`
pub fn write_operation(seq_no: i32, operation: Operation, message: String) {
    logger_manager::log(
        &OPERATION_LOGGER_KEY,
        LoggerLevel::Info,
        format!("[Seq Num: {seq_no}] [operation: {operation}] {message}"),
    );
}
