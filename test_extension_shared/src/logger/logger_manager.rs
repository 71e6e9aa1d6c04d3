// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
//! This module manages the loggers for the application.
//! It provides functionality to set up loggers, write logs, and manage log levels.
//! It uses a static `OnceCell` to ensure that the loggers are initialized only once.

use super::rolling_logger::RollingLogger;
use crate::logger::LoggerLevel;
use std::collections::HashMap;

// The loggers are stored in a static `OnceCell` to ensure they are initialized only once.
static LOGGERS: tokio::sync::OnceCell<HashMap<String, RollingLogger>> =
    tokio::sync::OnceCell::const_new();
// The `DEFAULT_LOGGER_KEY` is used to specify which rolling logger should be used by default when no key is provided.
static DEFAULT_LOGGER_KEY: tokio::sync::OnceCell<String> = tokio::sync::OnceCell::const_new();
// The `MAX_LOG_LEVEL` is used to set the maximum log level for the loggers.
static MAX_LOG_LEVEL: tokio::sync::OnceCell<LoggerLevel> = tokio::sync::OnceCell::const_new();
// The `MAX_SYSTEM_LOG_LEVEL` is used to set the maximum log level for console output.
static MAX_SYSTEM_LOG_LEVEL: tokio::sync::OnceCell<LoggerLevel> =
    tokio::sync::OnceCell::const_new();

/// Setup the loggers and set the default logger key
/// # Arguments
/// * `loggers` - A hashmap of loggers
/// * `default_logger_key` - The default logger key
/// * `max_log_level` - The maximum log level for file logging
/// # Returns
/// false if the default logger key is not one of the loggers; the loggers are not set then.
/// Loggers can only be set once per process, later calls keep the first set and return true.
pub fn set_loggers(
    loggers: HashMap<String, RollingLogger>,
    default_logger_key: String,
    max_log_level: LoggerLevel,
) -> bool {
    if LOGGERS.initialized() {
        return true;
    }

    if !loggers.contains_key(&default_logger_key) {
        write_system_log(
            LoggerLevel::Error,
            format!("Default logger key '{default_logger_key}' not found in the loggers"),
        );
        return false;
    }

    if let Err(e) = MAX_LOG_LEVEL.set(max_log_level) {
        write_system_log(
            LoggerLevel::Error,
            format!("Failed to set logger level: {e}"),
        );
    }
    // set the loggers once
    if let Err(e) = LOGGERS.set(loggers) {
        write_system_log(LoggerLevel::Error, format!("Failed to set loggers: {e}"));
    };
    if let Err(e) = DEFAULT_LOGGER_KEY.set(default_logger_key) {
        write_system_log(
            LoggerLevel::Error,
            format!("Failed to set default logger key: {e}"),
        );
    }
    true
}

pub fn set_system_logger(max_log_level: LoggerLevel) {
    if !MAX_SYSTEM_LOG_LEVEL.initialized() {
        if let Err(e) = MAX_SYSTEM_LOG_LEVEL.set(max_log_level) {
            write_system_log(
                LoggerLevel::Error,
                format!("Failed to set system logger level: {e}"),
            );
        }
    }
}

pub fn get_max_logger_level() -> LoggerLevel {
    match MAX_LOG_LEVEL.get() {
        Some(l) => *l,
        None => LoggerLevel::Trace,
    }
}

fn get_logger(logger_key: Option<&str>) -> Option<&'static RollingLogger> {
    let loggers = LOGGERS.get()?;
    let key = match logger_key {
        Some(k) => k,
        None => DEFAULT_LOGGER_KEY.get()?.as_str(),
    };
    loggers.get(key)
}

fn internal_log(logger_key: Option<&str>, log_level: LoggerLevel, message: String) {
    if log_level > get_max_logger_level() {
        return;
    }

    if let Some(logger) = get_logger(logger_key) {
        if let Err(e) = logger.write(log_level, message.clone()) {
            eprintln!("Error writing to log: {e}");
        }
    }

    write_system_log(log_level, message);
}

/// Writes to the logger registered under `logger_key` only; nothing is echoed to the console.
pub fn log(logger_key: &str, log_level: LoggerLevel, message: String) {
    if log_level > get_max_logger_level() {
        return;
    }
    if let Some(logger) = get_logger(Some(logger_key)) {
        if let Err(e) = logger.write(log_level, message) {
            eprintln!("Error writing to log: {e}");
        }
    }
}

/// Writes to the default logger and echoes to the console.
pub fn write_log(log_level: LoggerLevel, message: String) {
    internal_log(None, log_level, message);
}

pub fn write_info(message: String) {
    write_log(LoggerLevel::Info, message);
}

pub fn write_warn(message: String) {
    write_log(LoggerLevel::Warn, message);
}

pub fn write_err(message: String) {
    write_log(LoggerLevel::Error, message);
}

fn write_system_log(log_level: LoggerLevel, message: String) {
    if log_level > get_max_system_logger_level() {
        return;
    }

    // Linux automatically captures console logs to syslog.
    if log_level <= LoggerLevel::Warn {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
}

fn get_max_system_logger_level() -> LoggerLevel {
    match MAX_SYSTEM_LOG_LEVEL.get() {
        Some(l) => *l,
        None => LoggerLevel::Error,
    }
}

#[cfg(test)]
mod tests {
    use crate::logger::rolling_logger::RollingLogger;
    use crate::logger::LoggerLevel;
    use ctor::{ctor, dtor};
    use std::collections::HashMap;
    use std::env;
    use std::fs;

    const TEST_LOGGER_KEY: &str = "logger_manager_test";
    const TEST_SECOND_LOGGER_KEY: &str = "logger_manager_second";

    fn get_temp_test_dir() -> std::path::PathBuf {
        let mut temp_test_path = env::temp_dir();
        temp_test_path.push(TEST_LOGGER_KEY);
        temp_test_path
    }

    #[ctor]
    fn setup() {
        // Setup logger_manager for unit tests
        _ = fs::remove_dir_all(get_temp_test_dir());
        let mut loggers = HashMap::new();
        loggers.insert(
            TEST_LOGGER_KEY.to_string(),
            RollingLogger::create_new(get_temp_test_dir(), "test".to_string(), 200, 6),
        );
        loggers.insert(
            TEST_SECOND_LOGGER_KEY.to_string(),
            RollingLogger::create_new(get_temp_test_dir(), "second".to_string(), 1024, 2),
        );
        super::set_loggers(loggers, TEST_LOGGER_KEY.to_string(), LoggerLevel::Debug);
    }

    #[dtor]
    fn cleanup() {
        // clean up and ignore the clean up errors
        _ = fs::remove_dir_all(get_temp_test_dir());
    }

    #[test]
    fn logger_manager_test() {
        assert!(super::LOGGERS.initialized());
        assert_eq!(LoggerLevel::Debug, super::get_max_logger_level());

        for _ in [0; 20] {
            super::write_log(
                LoggerLevel::Trace,
                String::from("This is a test message This is a test message"),
            );
            super::write_log(
                LoggerLevel::Debug,
                String::from("This is a test message This is a test message"),
            );
            super::write_info("message from write_info".to_string());
            super::write_warn("message from write_warn".to_string());
            super::write_err("message from write_err".to_string());
        }
        super::log(
            TEST_SECOND_LOGGER_KEY,
            LoggerLevel::Info,
            "message for the second logger".to_string(),
        );
        super::log(
            "logger_not_registered",
            LoggerLevel::Info,
            "dropped".to_string(),
        );

        let second = fs::read_to_string(get_temp_test_dir().join("second.log")).unwrap();
        assert!(second.contains("message for the second logger"));
        assert!(!second.contains("write_info"));

        let test_files = crate::misc_helpers::search_files(&get_temp_test_dir(), r"^test\..*log$")
            .unwrap();
        assert_eq!(6, test_files.len(), "log file count mismatch");
        for file in test_files {
            let content = fs::read_to_string(file).unwrap();
            assert!(!content.contains("[TRACE]"), "trace is above max level");
        }
    }

    #[test]
    fn set_loggers_only_once() {
        let mut loggers = HashMap::new();
        loggers.insert(
            "another".to_string(),
            RollingLogger::create_new(get_temp_test_dir(), "another".to_string(), 200, 6),
        );
        assert!(super::set_loggers(
            loggers,
            "another".to_string(),
            LoggerLevel::Trace
        ));
        assert_eq!(LoggerLevel::Debug, super::get_max_logger_level());
    }
}
