// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
//! Per-invocation state: the sequence numbers read at start, the errors
//! collected while the operation runs, and the exit code the run intends to end with.

use crate::constants;
use crate::logger;

#[derive(Debug)]
pub struct RunContext {
    extension_seq: i32,
    environment_seq: i32,
    execution_errors: Vec<String>,
    intended_exit_code: i32,
}

impl Default for RunContext {
    fn default() -> Self {
        RunContext::new()
    }
}

impl RunContext {
    pub fn new() -> Self {
        RunContext {
            extension_seq: constants::UNKNOWN_SEQUENCE_NUMBER,
            environment_seq: constants::UNKNOWN_SEQUENCE_NUMBER,
            execution_errors: Vec::new(),
            intended_exit_code: constants::EXIT_CODE_SUCCESS,
        }
    }

    pub fn set_sequence_numbers(&mut self, extension_seq: i32, environment_seq: i32) {
        self.extension_seq = extension_seq;
        self.environment_seq = environment_seq;
    }

    pub fn extension_seq(&self) -> i32 {
        self.extension_seq
    }

    pub fn environment_seq(&self) -> i32 {
        self.environment_seq
    }

    pub fn add_execution_error(&mut self, error: String) {
        logger::write_error(error.clone());
        self.execution_errors.push(error);
    }

    pub fn execution_errors(&self) -> &[String] {
        &self.execution_errors
    }

    pub fn set_intended_exit_code(&mut self, exit_code: i32) {
        self.intended_exit_code = exit_code;
    }

    pub fn intended_exit_code(&self) -> i32 {
        self.intended_exit_code
    }

    /// Collected errors take priority over any configured exit code.
    pub fn final_exit_code(&self) -> i32 {
        if self.execution_errors.is_empty() {
            self.intended_exit_code
        } else {
            constants::EXIT_CODE_GENERAL_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RunContext;
    use crate::constants;

    #[test]
    fn new_run_context_test() {
        let ctx = RunContext::new();
        assert_eq!(-1, ctx.extension_seq());
        assert_eq!(-1, ctx.environment_seq());
        assert!(ctx.execution_errors().is_empty());
        assert_eq!(constants::EXIT_CODE_SUCCESS, ctx.final_exit_code());
    }

    #[test]
    fn final_exit_code_test() {
        let mut ctx = RunContext::new();
        ctx.set_intended_exit_code(42);
        assert_eq!(42, ctx.intended_exit_code());
        assert_eq!(42, ctx.final_exit_code());

        ctx.add_execution_error("first".to_string());
        ctx.add_execution_error("second".to_string());
        assert_eq!(
            vec!["first".to_string(), "second".to_string()],
            ctx.execution_errors()
        );
        assert_eq!(constants::EXIT_CODE_GENERAL_ERROR, ctx.final_exit_code());
        // the configured code is kept, only overruled
        assert_eq!(42, ctx.intended_exit_code());
    }
}
