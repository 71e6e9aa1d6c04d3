// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
//! The sequence gate: an invocation only runs when the host presents a
//! sequence number this extension has not processed yet.

use crate::constants;
use crate::error::Error;
use crate::logger;
use crate::result::Result;
use crate::run_context::RunContext;
use crate::runtime_config::SequenceFailurePolicy;
use std::fs;
use std::path::PathBuf;
use test_extension_shared::misc_helpers;

pub trait SequenceProvider {
    /// Returns (extension sequence, environment sequence).
    fn get_most_recent_sequence_number(&self) -> Result<(i32, i32)>;
    fn set_extension_most_recent_sequence_number(&self, seq_no: i32) -> Result<()>;
}

/// Keeps the processed sequence number in the `mrseq` file of the extension
/// folder and reads the host's sequence number from `ConfigSequenceNumber`,
/// or from the newest `<n>.settings` file when the variable is not set.
pub struct FileSequenceProvider {
    extension_folder: PathBuf,
    config_folder: PathBuf,
    config_seq_no: Option<String>,
}

impl FileSequenceProvider {
    pub fn new(
        extension_folder: PathBuf,
        config_folder: PathBuf,
        config_seq_no: Option<String>,
    ) -> Self {
        FileSequenceProvider {
            extension_folder,
            config_folder,
            config_seq_no,
        }
    }

    fn mrseq_file(&self) -> PathBuf {
        self.extension_folder.join(constants::MRSEQ_FILE)
    }

    fn read_extension_seq(&self) -> Result<i32> {
        let mrseq_file = self.mrseq_file();
        if !mrseq_file.exists() {
            return Ok(constants::UNKNOWN_SEQUENCE_NUMBER);
        }
        let content = fs::read_to_string(&mrseq_file)?;
        content.trim().parse::<i32>().map_err(|_| {
            Error::Sequence(format!(
                "file '{}' holds '{}'",
                misc_helpers::path_to_string(&mrseq_file),
                content.trim()
            ))
        })
    }

    fn read_environment_seq(&self) -> Result<i32> {
        if let Some(config_seq_no) = &self.config_seq_no {
            return config_seq_no.trim().parse::<i32>().map_err(|_| {
                Error::Sequence(format!(
                    "'{}' from {} is not a number",
                    config_seq_no,
                    constants::ENV_CONFIG_SEQUENCE_NUMBER
                ))
            });
        }

        let settings_files =
            misc_helpers::search_files(&self.config_folder, constants::SETTINGS_FILE_SEARCH_PATTERN)?;
        // the file names sort as text, so pick the highest number explicitly
        settings_files
            .iter()
            .filter_map(|file| {
                file.file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| stem.parse::<i32>().ok())
            })
            .max()
            .ok_or_else(|| {
                Error::Sequence(format!(
                    "not found: {} is not set and '{}' has no settings file",
                    constants::ENV_CONFIG_SEQUENCE_NUMBER,
                    misc_helpers::path_to_string(&self.config_folder)
                ))
            })
    }
}

impl SequenceProvider for FileSequenceProvider {
    fn get_most_recent_sequence_number(&self) -> Result<(i32, i32)> {
        let extension_seq = self.read_extension_seq()?;
        let environment_seq = self.read_environment_seq()?;
        Ok((extension_seq, environment_seq))
    }

    fn set_extension_most_recent_sequence_number(&self, seq_no: i32) -> Result<()> {
        misc_helpers::try_create_folder(&self.extension_folder)?;
        fs::write(self.mrseq_file(), seq_no.to_string())?;
        Ok(())
    }
}

/// True when `environment_seq` has not been handled yet.
/// A negative `extension_seq` means the extension never recorded one.
pub fn should_process(extension_seq: i32, environment_seq: i32) -> bool {
    extension_seq < 0 || extension_seq < environment_seq
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    AlreadyProcessed,
    /// stop with this exit code, nothing is reported
    Abort(i32),
}

pub struct SequenceGate<'a> {
    provider: &'a dyn SequenceProvider,
    policy: SequenceFailurePolicy,
}

impl<'a> SequenceGate<'a> {
    pub fn new(provider: &'a dyn SequenceProvider, policy: SequenceFailurePolicy) -> Self {
        SequenceGate { provider, policy }
    }

    /// Reads both sequence numbers into `ctx` and, when the invocation should
    /// run, records the environment sequence as processed.
    pub fn check(&self, ctx: &mut RunContext) -> GateDecision {
        match self.provider.get_most_recent_sequence_number() {
            Ok((extension_seq, environment_seq)) => {
                ctx.set_sequence_numbers(extension_seq, environment_seq);
            }
            Err(e) => match self.policy {
                SequenceFailurePolicy::Continue => {
                    logger::write_warning(format!(
                        "Failed to read sequence numbers, continuing as never run: {e}"
                    ));
                    ctx.set_sequence_numbers(
                        constants::UNKNOWN_SEQUENCE_NUMBER,
                        constants::UNKNOWN_SEQUENCE_NUMBER,
                    );
                }
                SequenceFailurePolicy::Abort => {
                    logger::write_error(format!("Failed to read sequence numbers: {e}"));
                    return GateDecision::Abort(constants::EXIT_CODE_MRSEQ_NOT_FOUND);
                }
            },
        }

        logger::write(format!(
            "Extension sequence number: {}, environment sequence number: {}",
            ctx.extension_seq(),
            ctx.environment_seq()
        ));

        if !should_process(ctx.extension_seq(), ctx.environment_seq()) {
            logger::write_warning(format!(
                "Sequence number {} was already processed (most recent is {}), nothing to do",
                ctx.environment_seq(),
                ctx.extension_seq()
            ));
            return GateDecision::AlreadyProcessed;
        }

        self.record_processed(ctx)
    }

    fn record_processed(&self, ctx: &mut RunContext) -> GateDecision {
        let environment_seq = ctx.environment_seq();
        if environment_seq < 0 {
            logger::write("Environment sequence number unknown, skip saving it".to_string());
            return GateDecision::Proceed;
        }

        match self
            .provider
            .set_extension_most_recent_sequence_number(environment_seq)
        {
            Ok(()) => {
                logger::write(format!(
                    "Most recent sequence number set to {environment_seq}"
                ));
                GateDecision::Proceed
            }
            Err(e) => {
                let message =
                    format!("Failed to set most recent sequence number to {environment_seq}: {e}");
                match self.policy {
                    SequenceFailurePolicy::Continue => {
                        ctx.add_execution_error(message);
                        GateDecision::Proceed
                    }
                    SequenceFailurePolicy::Abort => {
                        logger::write_error(message);
                        GateDecision::Abort(constants::EXIT_CODE_SEQ_NUMBER_SET_ERROR)
                    }
                }
            }
        }
    }
}
