// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
//! Status reporting: every operation moves `transitioning -> success | error`
//! and each report is written to the status sink and the operations log.
//! A failed report never stops the run, it is collected as an execution error.
//! Without an environment sequence number nothing is written to the sink.

use crate::common;
use crate::constants;
use crate::error::Error;
use crate::logger;
use crate::operation::Operation;
use crate::result::Result;
use crate::run_context::RunContext;
use crate::structs::{FormattedMessage, StatusObj, TopLevelStatus};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use test_extension_shared::misc_helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Transitioning,
    Success,
    Error,
}

impl StatusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::Transitioning => constants::TRANSITIONING_STATUS,
            StatusType::Success => constants::SUCCESS_STATUS,
            StatusType::Error => constants::ERROR_STATUS,
        }
    }

    pub fn status_code(&self) -> i32 {
        match self {
            StatusType::Error => constants::STATUS_CODE_NOT_OK,
            _ => constants::STATUS_CODE_OK,
        }
    }
}

impl Display for StatusType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait StatusSink {
    fn report(
        &self,
        seq_no: i32,
        operation: Operation,
        status: StatusType,
        message: &str,
    ) -> Result<()>;
}

/// Writes `<statusFolder>/<seq>.status`, replacing the previous report for the sequence.
pub struct FileStatusSink {
    status_folder: PathBuf,
}

impl FileStatusSink {
    pub fn new(status_folder: PathBuf) -> Self {
        FileStatusSink { status_folder }
    }
}

impl StatusSink for FileStatusSink {
    fn report(
        &self,
        seq_no: i32,
        operation: Operation,
        status: StatusType,
        message: &str,
    ) -> Result<()> {
        if seq_no < 0 {
            return Err(Error::Status(format!(
                "cannot be written for unknown sequence number {seq_no}"
            )));
        }
        misc_helpers::try_create_folder(&self.status_folder)?;

        let status_obj = StatusObj {
            name: constants::EXTENSION_NAME.to_string(),
            operation: operation.to_string(),
            configurationAppliedTime: misc_helpers::get_date_time_string(),
            status: status.to_string(),
            code: status.status_code(),
            formattedMessage: FormattedMessage {
                lang: constants::LANG_EN_US.to_string(),
                message: message.to_string(),
            },
            substatus: Vec::new(),
        };
        let root_status = vec![TopLevelStatus {
            version: constants::STATUS_VERSION.to_string(),
            timestampUTC: misc_helpers::get_date_time_string(),
            status: status_obj,
        }];

        let status_file =
            common::get_file_path(&self.status_folder, seq_no, constants::STATUS_FILE_SUFFIX);
        misc_helpers::json_write_to_file(&root_status, &status_file)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    NotStarted,
    Transitioning,
    Success,
    Error,
}

impl OperationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Success | OperationState::Error)
    }
}

impl From<StatusType> for OperationState {
    fn from(status: StatusType) -> Self {
        match status {
            StatusType::Transitioning => OperationState::Transitioning,
            StatusType::Success => OperationState::Success,
            StatusType::Error => OperationState::Error,
        }
    }
}

pub struct StatusReporter<'a> {
    sink: &'a dyn StatusSink,
    states: HashMap<Operation, OperationState>,
}

impl<'a> StatusReporter<'a> {
    pub fn new(sink: &'a dyn StatusSink) -> Self {
        StatusReporter {
            sink,
            states: HashMap::new(),
        }
    }

    pub fn get_state(&self, operation: Operation) -> OperationState {
        self.states.get(&operation).copied().unwrap_or_default()
    }

    pub fn report_transitioning(&mut self, ctx: &mut RunContext, operation: Operation, message: &str) {
        self.report(ctx, operation, StatusType::Transitioning, message);
    }

    pub fn report_success(&mut self, ctx: &mut RunContext, operation: Operation, message: &str) {
        self.report(ctx, operation, StatusType::Success, message);
    }

    pub fn report_error(&mut self, ctx: &mut RunContext, operation: Operation, message: &str) {
        self.report(ctx, operation, StatusType::Error, message);
    }

    fn report(
        &mut self,
        ctx: &mut RunContext,
        operation: Operation,
        status: StatusType,
        message: &str,
    ) {
        let current = self.get_state(operation);
        if current.is_terminal() {
            logger::write_warning(format!(
                "Operation '{operation}' already ended as {current:?}, ignoring {status} report: {message}"
            ));
            return;
        }

        let seq_no = ctx.environment_seq();
        logger::write(format!("Reporting {status} for '{operation}': {message}"));
        logger::write_operation(seq_no, operation, format!("{status}: {message}"));

        if seq_no < 0 {
            // no status file name exists without a sequence number
            logger::write_warning(format!(
                "Environment sequence number unknown, skip reporting {status} status for '{operation}'"
            ));
        } else if let Err(e) = self.sink.report(seq_no, operation, status, message) {
            // a single attempt, the state moves on either way
            ctx.add_execution_error(format!(
                "Failed to report {status} status for '{operation}': {e}"
            ));
        }
        self.states.insert(operation, OperationState::from(status));
    }
}
