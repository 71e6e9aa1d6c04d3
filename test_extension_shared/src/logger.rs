// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT

use crate::misc_helpers;

pub mod logger_manager;
pub mod rolling_logger;

pub type LoggerLevel = log::Level;

/// Fixed-width line header: `2020-08-18T20:29:16.079 [INFO]    `
pub fn get_log_header(level: LoggerLevel) -> String {
    format!(
        "{} {:<10}",
        misc_helpers::get_date_time_string_with_milliseconds(),
        format!("[{}]", level)
    )
}

#[cfg(test)]
mod tests {
    use log::Level;
    use std::str::FromStr;

    #[test]
    fn logger_level_test() {
        let info_level = Level::Info;
        assert_eq!(Level::from_str("Info").unwrap(), Level::Info);

        let trace_level = Level::from_str("Trace").unwrap();
        assert_eq!(trace_level, Level::Trace);
        assert!(
            info_level < trace_level,
            "Info level should be lower than Trace level"
        );
        assert!(Level::Warn < info_level, "Warn level should be lower than Info level");
    }

    #[test]
    fn log_header_test() {
        let info_header = super::get_log_header(Level::Info);
        let error_header = super::get_log_header(Level::Error);
        assert_eq!(34, info_header.len(), "'{info_header}'");
        assert_eq!(info_header.len(), error_header.len());
        assert!(info_header.contains("[INFO]"));
        assert!(error_header.ends_with("[ERROR]   "));
    }
}
