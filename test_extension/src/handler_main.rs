// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::cli::Cli;
use crate::common::{self, ExtensionFolders};
use crate::constants;
use crate::fail_injection::{ExitCodeOverride, FailInjectionPolicy, FailureDirective};
use crate::logger;
use crate::operation::Operation;
use crate::run_context::RunContext;
use crate::runtime_config::{RuntimeConfig, SequenceFailurePolicy, SilentFailureMode};
use crate::sequence::{FileSequenceProvider, GateDecision, SequenceGate, SequenceProvider};
use crate::settings::{FileSettingsProvider, SettingsProvider};
use crate::status::{FileStatusSink, StatusReporter, StatusSink};
use crate::structs::{ProtectedSettings, PublicSettings};
use std::env;
use std::path::{Path, PathBuf};
use test_extension_shared::version::Version;
use test_extension_shared::{current_info, misc_helpers, secrets_redactor};

/// Runs one invocation and returns the process exit code.
pub fn program_start(cli: Cli) -> i32 {
    if cli.version {
        println!("{}", constants::EXTENSION_VERSION);
        return constants::EXIT_CODE_SUCCESS;
    }

    let exe_dir = misc_helpers::get_current_exe_dir();
    let (folders, handler_env_error) = match common::get_handler_environment(&exe_dir) {
        Ok((extension_folder, handler_environment)) => (
            ExtensionFolders::from_handler_environment(extension_folder, &handler_environment),
            None,
        ),
        Err(e) => (ExtensionFolders::fallback(exe_dir), Some(e)),
    };

    if let Err(e) = logger::init_logger(folders.log_folder.clone()) {
        eprintln!(
            "Failed to open log files in '{}': {}",
            misc_helpers::path_to_string(&folders.log_folder),
            e
        );
        return constants::EXIT_CODE_LOGFILE_NOT_OPENED;
    }

    logger::write(format!(
        "{} Version: {}, OS Arch: {}, OS Version: {}",
        constants::EXTENSION_SHORT_NAME,
        constants::EXTENSION_VERSION,
        current_info::get_processor_arch(),
        current_info::get_long_os_version()
    ));
    if let Some(e) = handler_env_error {
        logger::write_warning(format!(
            "{}, using folders under '{}'",
            e,
            misc_helpers::path_to_string(&folders.extension_folder)
        ));
    }
    check_extension_version(env::var(constants::ENV_EXTENSION_VERSION).ok());

    run_command(
        cli.command.as_deref(),
        cli.jsonfile.as_deref(),
        &folders,
        env::var(constants::ENV_CONFIG_SEQUENCE_NUMBER).ok(),
    )
}

/// Dispatches `--command` against the files under `folders`.
/// A missing or unknown command returns before any sequence or status file is touched.
fn run_command(
    command: Option<&str>,
    jsonfile: Option<&Path>,
    folders: &ExtensionFolders,
    config_seq_no: Option<String>,
) -> i32 {
    let operation = match parse_command(command) {
        Ok(op) => op,
        Err(exit_code) => return exit_code,
    };

    let runtime_config = RuntimeConfig::load(jsonfile);
    let sequence_provider = FileSequenceProvider::new(
        folders.extension_folder.clone(),
        folders.config_folder.clone(),
        config_seq_no,
    );
    let settings_provider =
        FileSettingsProvider::new(folders.config_folder.clone(), get_certificate_folder(folders));
    let status_sink = FileStatusSink::new(folders.status_folder.clone());

    let handler = ExtensionHandler::new(
        &sequence_provider,
        &settings_provider,
        &status_sink,
        &runtime_config,
    );
    handler.run(operation)
}

#[cfg(not(windows))]
fn get_certificate_folder(_folders: &ExtensionFolders) -> PathBuf {
    PathBuf::from(constants::CERTIFICATE_FOLDER)
}

#[cfg(windows)]
fn get_certificate_folder(folders: &ExtensionFolders) -> PathBuf {
    folders.config_folder.clone()
}

/// Maps `--command` to an operation, or to the exit code for a missing or unknown command.
pub fn parse_command(command: Option<&str>) -> Result<Operation, i32> {
    let command = match command {
        Some(c) if !c.trim().is_empty() => c,
        _ => {
            logger::write_warning("No --command provided".to_string());
            return Err(constants::EXIT_CODE_COMMAND_NOT_FOUND);
        }
    };
    command.parse::<Operation>().map_err(|e| {
        logger::write_warning(format!(
            "{e}, expected one of install, enable, disable, uninstall, update"
        ));
        constants::EXIT_CODE_COMMAND_NOT_RECOGNIZED
    })
}

/// A version mismatch is only worth a warning, the run carries on.
fn check_extension_version(requested_version: Option<String>) -> bool {
    let requested_version = match requested_version {
        Some(v) => v,
        None => return true,
    };
    let current = match Version::from_string(constants::EXTENSION_VERSION) {
        Ok(v) => v,
        Err(e) => {
            logger::write_warning(format!("Failed to parse extension version: {e}"));
            return false;
        }
    };
    match Version::from_string(&requested_version) {
        Ok(requested) if requested.is_same_as(&current) => true,
        Ok(requested) => {
            logger::write_warning(format!(
                "Extension version {} does not match the requested version {}",
                current.to_full_string(),
                requested.to_full_string()
            ));
            false
        }
        Err(e) => {
            logger::write_warning(format!(
                "Failed to parse requested version '{requested_version}': {e}"
            ));
            false
        }
    }
}

pub struct ExtensionHandler<'a> {
    sequence_provider: &'a dyn SequenceProvider,
    settings_provider: &'a dyn SettingsProvider,
    status_sink: &'a dyn StatusSink,
    fail_policy: FailInjectionPolicy,
    sequence_failure_policy: SequenceFailurePolicy,
    silent_failure_mode: SilentFailureMode,
}

impl<'a> ExtensionHandler<'a> {
    pub fn new(
        sequence_provider: &'a dyn SequenceProvider,
        settings_provider: &'a dyn SettingsProvider,
        status_sink: &'a dyn StatusSink,
        runtime_config: &RuntimeConfig,
    ) -> Self {
        ExtensionHandler {
            sequence_provider,
            settings_provider,
            status_sink,
            fail_policy: FailInjectionPolicy::new(runtime_config.get_fail_commands()),
            sequence_failure_policy: runtime_config.get_sequence_failure_policy(),
            silent_failure_mode: runtime_config.get_silent_failure_mode(),
        }
    }

    pub fn run(&self, operation: Operation) -> i32 {
        let mut ctx = RunContext::new();
        let gate = SequenceGate::new(self.sequence_provider, self.sequence_failure_policy);
        match gate.check(&mut ctx) {
            GateDecision::Proceed => {}
            GateDecision::AlreadyProcessed => return constants::EXIT_CODE_SHOULD_NOT_RUN,
            GateDecision::Abort(exit_code) => return exit_code,
        }

        let mut reporter = StatusReporter::new(self.status_sink);
        self.handle_command(&mut ctx, &mut reporter, operation);
        report_execution_status(&ctx)
    }

    fn handle_command(
        &self,
        ctx: &mut RunContext,
        reporter: &mut StatusReporter,
        operation: Operation,
    ) {
        logger::write(format!(
            "Handling '{}' command, extension sequence number: {}, environment sequence number: {}",
            operation,
            ctx.extension_seq(),
            ctx.environment_seq()
        ));
        reporter.report_transitioning(ctx, operation, &operation.in_progress_message());

        // a configured failure wins over anything the operation itself would do
        if let Some(directive) = self.fail_policy.evaluate(operation) {
            self.apply_failure(ctx, reporter, directive);
            return;
        }

        if operation == Operation::Enable && !self.retrieve_settings(ctx, reporter) {
            return;
        }

        reporter.report_success(ctx, operation, &operation.complete_message());
    }

    fn retrieve_settings(&self, ctx: &mut RunContext, reporter: &mut StatusReporter) -> bool {
        match self
            .settings_provider
            .get_extension_settings(ctx.environment_seq())
        {
            Ok((public_settings, protected_settings)) => {
                log_settings(&public_settings, &protected_settings);
                true
            }
            Err(e) => {
                let message = format!("Failed to get extension settings: {e}");
                ctx.add_execution_error(message.clone());
                reporter.report_error(ctx, Operation::Enable, &message);
                false
            }
        }
    }

    fn apply_failure(
        &self,
        ctx: &mut RunContext,
        reporter: &mut StatusReporter,
        directive: FailureDirective,
    ) {
        match directive.exit_code {
            ExitCodeOverride::Keep => {}
            ExitCodeOverride::Override(exit_code) => ctx.set_intended_exit_code(exit_code),
            ExitCodeOverride::Invalid(value) => ctx.add_execution_error(format!(
                "Invalid exitCode '{}' in fail command for '{}'",
                value, directive.operation
            )),
        }

        if directive.report_error_status
            || self.silent_failure_mode == SilentFailureMode::SuppressSuccessOnly
        {
            reporter.report_error(ctx, directive.operation, &directive.error_message);
        } else {
            logger::write_warning(format!(
                "Final status for '{}' not reported as configured",
                directive.operation
            ));
        }
    }
}

fn log_settings(public_settings: &PublicSettings, protected_settings: &ProtectedSettings) {
    match (
        serde_json::to_value(public_settings),
        serde_json::to_value(protected_settings),
    ) {
        (Ok(public), Ok(protected)) => logger::write(format!(
            "Extension settings retrieved, public: {}, protected: {}",
            secrets_redactor::redact_json(&public),
            secrets_redactor::redact_json(&protected)
        )),
        _ => logger::write_warning("Failed to serialize extension settings for logging".to_string()),
    }
}

/// Any collected error turns the exit code into `GENERAL_ERROR`.
pub fn report_execution_status(ctx: &RunContext) -> i32 {
    let exit_code = ctx.final_exit_code();
    if ctx.execution_errors().is_empty() {
        logger::write(format!("Finished with exit code {exit_code}"));
    } else {
        logger::write_error(format!(
            "Finished with {} error(s), exit code {}: {}",
            ctx.execution_errors().len(),
            exit_code,
            ctx.execution_errors().join("; ")
        ));
    }
    exit_code
}
