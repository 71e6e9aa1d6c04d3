// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
//! The optional `--jsonfile` document. It lists the commands that should
//! simulate a failure and tunes how sequence and silent failures are handled.
//!
//! ```json
//! {
//!     "failCommands": [
//!         { "command": "enable", "errorMessage": "boom", "exitCode": "42", "reportStatusCorrectly": "true" }
//!     ],
//!     "silentFailureMode": "suppressTerminalStatus",
//!     "sequenceFailurePolicy": "continue"
//! }
//! ```

use crate::logger;
use crate::result::Result;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use test_extension_shared::misc_helpers;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct FailCommand {
    pub command: String,
    #[serde(default)]
    pub errorMessage: String,
    // empty keeps the exit code untouched
    #[serde(default, deserialize_with = "string_or_integer")]
    pub exitCode: String,
    #[serde(default, deserialize_with = "bool_or_bool_string")]
    reportStatusCorrectly: Option<bool>,
}

impl FailCommand {
    pub fn new(command: &str, error_message: &str, exit_code: &str, report_status: bool) -> Self {
        FailCommand {
            command: command.to_string(),
            errorMessage: error_message.to_string(),
            exitCode: exit_code.to_string(),
            reportStatusCorrectly: Some(report_status),
        }
    }

    pub fn get_report_status_correctly(&self) -> bool {
        self.reportStatusCorrectly.unwrap_or(true)
    }
}

/// What a fail-injected command with `reportStatusCorrectly = false` keeps quiet.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SilentFailureMode {
    /// neither success nor error is reported, only transitioning
    #[default]
    SuppressTerminalStatus,
    /// the error is still reported, only the success report is dropped
    SuppressSuccessOnly,
}

/// How the sequence gate reacts when the sequence numbers cannot be read or saved.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SequenceFailurePolicy {
    #[default]
    Continue,
    Abort,
}

#[derive(Deserialize, Debug, Default)]
#[allow(non_snake_case)]
pub struct RuntimeConfig {
    #[serde(default)]
    failCommands: Vec<FailCommand>,
    silentFailureMode: Option<SilentFailureMode>,
    sequenceFailurePolicy: Option<SequenceFailurePolicy>,
}

impl RuntimeConfig {
    pub fn from_json_file(file_path: &Path) -> Result<Self> {
        Ok(misc_helpers::json_read_from_file::<RuntimeConfig>(
            file_path,
        )?)
    }

    /// A missing or unreadable file is not fatal, the run continues with defaults.
    pub fn load(file_path: Option<&Path>) -> Self {
        let file_path = match file_path {
            Some(path) => path,
            None => {
                logger::write("No runtime configuration file provided".to_string());
                return RuntimeConfig::default();
            }
        };

        match RuntimeConfig::from_json_file(file_path) {
            Ok(config) => {
                logger::write(format!(
                    "Runtime configuration loaded from '{}' with {} fail command(s)",
                    misc_helpers::path_to_string(file_path),
                    config.failCommands.len()
                ));
                config
            }
            Err(e) => {
                logger::write_warning(format!(
                    "Failed to read runtime configuration '{}', using defaults: {}",
                    misc_helpers::path_to_string(file_path),
                    e
                ));
                RuntimeConfig::default()
            }
        }
    }

    pub fn get_fail_commands(&self) -> &[FailCommand] {
        &self.failCommands
    }

    pub fn get_silent_failure_mode(&self) -> SilentFailureMode {
        self.silentFailureMode.unwrap_or_default()
    }

    pub fn get_sequence_failure_policy(&self) -> SequenceFailurePolicy {
        self.sequenceFailurePolicy.unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrInteger {
    String(String),
    Integer(i64),
}

fn string_or_integer<'de, D>(deserializer: D) -> core::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrInteger::deserialize(deserializer)? {
        StringOrInteger::String(s) => s,
        StringOrInteger::Integer(i) => i.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    String(String),
}

fn bool_or_bool_string<'de, D>(deserializer: D) -> core::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(Some(b)),
        BoolOrString::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid reportStatusCorrectly value '{other}'"
            ))),
        },
    }
}
