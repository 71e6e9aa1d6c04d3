// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
pub const EXTENSION_NAME: &str = "GuestAgentTestExtension";
pub const EXTENSION_SHORT_NAME: &str = "GATestExt";
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const HANDLER_ENVIRONMENT_FILE: &str = "HandlerEnvironment.json";
pub const GENERAL_LOG_NAME: &str = "GuestAgentTestExtension";
pub const OPERATION_LOG_NAME_PREFIX: &str = "operations";
pub const MAX_LOG_FILE_SIZE: u64 = 20 * 1024 * 1024;
pub const MAX_LOG_FILE_COUNT: u16 = 30;
pub const MRSEQ_FILE: &str = "mrseq";
pub const ENV_CONFIG_SEQUENCE_NUMBER: &str = "ConfigSequenceNumber";
pub const ENV_EXTENSION_VERSION: &str = "AZURE_GUEST_AGENT_EXTENSION_VERSION";
pub const SETTINGS_FILE_SUFFIX: &str = "settings";
pub const SETTINGS_FILE_SEARCH_PATTERN: &str = r"^[0-9]+\.settings$";
pub const STATUS_FILE_SUFFIX: &str = "status";
pub const STATUS_FOLDER_NAME: &str = "status";
pub const CONFIG_FOLDER_NAME: &str = "config";
#[cfg(not(windows))]
pub const CERTIFICATE_FOLDER: &str = "/var/lib/waagent";
pub const STATUS_VERSION: &str = "1.0";
pub const LANG_EN_US: &str = "en-US";
pub const UNKNOWN_SEQUENCE_NUMBER: i32 = -1;

pub const TRANSITIONING_STATUS: &str = "transitioning";
pub const SUCCESS_STATUS: &str = "success";
pub const ERROR_STATUS: &str = "error";
pub const STATUS_CODE_OK: i32 = 0;
pub const STATUS_CODE_NOT_OK: i32 = 1;

// Process exit codes, host-side scripts depend on these values.
pub const EXIT_CODE_SUCCESS: i32 = 0;
pub const EXIT_CODE_GENERAL_ERROR: i32 = 1;
pub const EXIT_CODE_COMMAND_NOT_FOUND: i32 = 2;
pub const EXIT_CODE_LOGFILE_NOT_OPENED: i32 = 3;
pub const EXIT_CODE_MRSEQ_NOT_FOUND: i32 = 4;
pub const EXIT_CODE_SHOULD_NOT_RUN: i32 = 5;
pub const EXIT_CODE_SEQ_NUMBER_SET_ERROR: i32 = 6;
pub const EXIT_CODE_STATUS_REPORTING_ERROR: i32 = 7;
pub const EXIT_CODE_SETTINGS_NOT_FOUND: i32 = 8;
pub const EXIT_CODE_VERSION_MISMATCH: i32 = 9;
pub const EXIT_CODE_JSON_PARSING_ERROR: i32 = 10;
pub const EXIT_CODE_COMMAND_NOT_RECOGNIZED: i32 = 11;
