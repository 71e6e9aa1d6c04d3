// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::constants;
use crate::error::Error;
use crate::result::Result;
use crate::structs::{Handler, HandlerEnvironment};
use std::path::{Path, PathBuf};
use test_extension_shared::misc_helpers;

/// Reads `HandlerEnvironment.json` from `exe_dir`, or from its parent when the
/// executable lives in a sub folder of the extension package.
/// Returns the folder the file was found in together with its first entry.
pub fn get_handler_environment(exe_dir: &Path) -> Result<(PathBuf, HandlerEnvironment)> {
    let mut candidates = vec![exe_dir.to_path_buf()];
    if let Some(parent) = exe_dir.parent() {
        candidates.push(parent.to_path_buf());
    }

    for folder in candidates {
        let handler_env_file = folder.join(constants::HANDLER_ENVIRONMENT_FILE);
        if !handler_env_file.exists() {
            continue;
        }
        let handlers: Vec<Handler> = misc_helpers::json_read_from_file(&handler_env_file)?;
        return match handlers.into_iter().next() {
            Some(handler) => Ok((folder, handler.handlerEnvironment)),
            None => Err(Error::HandlerEnvironment(format!(
                "file '{}' is empty",
                misc_helpers::path_to_string(&handler_env_file)
            ))),
        };
    }

    Err(Error::HandlerEnvironment(format!(
        "file '{}' not found in '{}' or its parent",
        constants::HANDLER_ENVIRONMENT_FILE,
        misc_helpers::path_to_string(exe_dir)
    )))
}

/// `<folder>/<seq_no>.<suffix>`, e.g. `status/3.status`
pub fn get_file_path(folder: &Path, seq_no: i32, suffix: &str) -> PathBuf {
    folder.join(format!("{seq_no}.{suffix}"))
}

/// Folders one invocation works with.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionFolders {
    /// holds `HandlerEnvironment.json` and the `mrseq` file
    pub extension_folder: PathBuf,
    pub log_folder: PathBuf,
    pub status_folder: PathBuf,
    pub config_folder: PathBuf,
}

impl ExtensionFolders {
    pub fn from_handler_environment(
        extension_folder: PathBuf,
        handler_environment: &HandlerEnvironment,
    ) -> Self {
        ExtensionFolders {
            extension_folder,
            log_folder: PathBuf::from(&handler_environment.logFolder),
            status_folder: PathBuf::from(&handler_environment.statusFolder),
            config_folder: PathBuf::from(&handler_environment.configFolder),
        }
    }

    /// Used when no handler environment can be read: everything lives next to the executable.
    pub fn fallback(exe_dir: PathBuf) -> Self {
        ExtensionFolders {
            log_folder: exe_dir.clone(),
            status_folder: exe_dir.join(constants::STATUS_FOLDER_NAME),
            config_folder: exe_dir.join(constants::CONFIG_FOLDER_NAME),
            extension_folder: exe_dir,
        }
    }
}
