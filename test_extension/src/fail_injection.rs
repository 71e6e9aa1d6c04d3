// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
//! Simulated failures configured through the runtime configuration's `failCommands`.
//! The policy only decides; the dispatcher applies the returned directive.

use crate::logger;
use crate::operation::Operation;
use crate::runtime_config::FailCommand;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitCodeOverride {
    /// `exitCode` was empty
    Keep,
    Override(i32),
    /// `exitCode` held something that is not an exit code in `0..=255`
    Invalid(String),
}

impl ExitCodeOverride {
    fn parse(exit_code: &str) -> Self {
        let exit_code = exit_code.trim();
        if exit_code.is_empty() {
            return ExitCodeOverride::Keep;
        }
        // the host only sees the low 8 bits of a process exit code
        match exit_code.parse::<i32>() {
            Ok(code) if (0..=255).contains(&code) => ExitCodeOverride::Override(code),
            _ => ExitCodeOverride::Invalid(exit_code.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDirective {
    pub operation: Operation,
    pub error_message: String,
    pub exit_code: ExitCodeOverride,
    pub report_error_status: bool,
}

#[derive(Debug, Default)]
pub struct FailInjectionPolicy {
    fail_commands: HashMap<Operation, FailCommand>,
}

impl FailInjectionPolicy {
    /// Unknown command names are ignored; a later entry for the same command replaces the earlier one.
    pub fn new(fail_commands: &[FailCommand]) -> Self {
        let mut map = HashMap::new();
        for fail_command in fail_commands {
            let operation = match fail_command.command.parse::<Operation>() {
                Ok(op) => op,
                Err(e) => {
                    logger::write_warning(format!("Ignoring fail command: {e}"));
                    continue;
                }
            };
            if let Some(replaced) = map.insert(operation, fail_command.clone()) {
                logger::write_warning(format!(
                    "Fail command for '{}' configured more than once, replacing {:?}",
                    operation, replaced
                ));
            }
        }
        FailInjectionPolicy { fail_commands: map }
    }

    pub fn len(&self) -> usize {
        self.fail_commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fail_commands.is_empty()
    }

    pub fn evaluate(&self, operation: Operation) -> Option<FailureDirective> {
        let fail_command = self.fail_commands.get(&operation)?;

        let error_message = if fail_command.errorMessage.is_empty() {
            format!("{operation} failed based on provided failCommand")
        } else {
            fail_command.errorMessage.clone()
        };
        let exit_code = ExitCodeOverride::parse(&fail_command.exitCode);
        let report_error_status = fail_command.get_report_status_correctly();

        logger::write_error(format!(
            "Simulating failure for '{}': {}, exit code: '{}', report status: {}",
            operation, error_message, fail_command.exitCode, report_error_status
        ));

        Some(FailureDirective {
            operation,
            error_message,
            exit_code,
            report_error_status,
        })
    }
}
