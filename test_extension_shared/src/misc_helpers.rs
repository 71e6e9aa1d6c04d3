// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::error::Error;
use crate::result::Result;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    process::Command,
};
use time::{macros::format_description, OffsetDateTime};

pub fn get_date_time_string_with_milliseconds() -> String {
    let date_format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]");
    OffsetDateTime::now_utc()
        .format(date_format)
        .unwrap_or_default()
}

pub fn get_date_time_string() -> String {
    let date_format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
    OffsetDateTime::now_utc()
        .format(date_format)
        .unwrap_or_default()
}

pub fn get_date_time_unix_nano() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos()
}

pub fn try_create_folder(dir: &Path) -> Result<()> {
    match dir.try_exists() {
        Ok(true) => Ok(()),
        // Recursively create a directory and all of its parent components if they are missing
        Ok(false) => {
            fs::create_dir_all(dir).map_err(|e| Error::Folder(path_to_string(dir), e))
        }
        Err(e) => Err(Error::Folder(path_to_string(dir), e)),
    }
}

pub fn json_write_to_file<T>(obj: &T, file_path: &Path) -> Result<()>
where
    T: ?Sized + Serialize,
{
    let file = File::create(file_path)?;
    serde_json::to_writer_pretty(file, obj)?;

    Ok(())
}

pub fn json_read_from_file<T>(file_path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(file_path)?;
    let obj: T = serde_json::from_reader(file)?;

    Ok(obj)
}

/// The folder holding the running executable, or the working directory
/// when the executable path cannot be resolved.
pub fn get_current_exe_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(mut path) => {
            path.pop();
            path
        }
        Err(_) => PathBuf::from("."),
    }
}

pub fn path_to_string(path: &Path) -> String {
    path.display().to_string()
}

pub fn get_file_name(path: &Path) -> String {
    match path.file_name() {
        Some(s) => s.to_str().unwrap_or("InvalidPath").to_string(),
        None => "InvalidPath".to_string(),
    }
}

/// Search files in a directory with a regex pattern
/// # Arguments
/// * `dir` - The directory to search
/// * `search_regex_pattern` - The regex pattern matched against the file name
/// # Returns
/// A vector of PathBufs that match the search pattern in ascending order
/// # Errors
/// Returns an error if the regex pattern is invalid or if there is an IO error
/// # Example
/// ```rust
/// use test_extension_shared::misc_helpers;
/// let dir = std::env::temp_dir();
/// let settings_files = misc_helpers::search_files(&dir, r"^[0-9]+\.settings$").unwrap();
/// ```
pub fn search_files(dir: &Path, search_regex_pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let regex = Regex::new(search_regex_pattern)?;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_full_path = entry.path();
        if !entry.metadata()?.is_file() {
            continue;
        }
        if regex.is_match(&get_file_name(&file_full_path)) {
            files.push(file_full_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Runs `program` to completion and returns (exit code, stdout, stderr).
/// `default_error_code` is used when the process cannot be started or was
/// terminated by a signal.
pub fn execute_command(
    program: &str,
    args: Vec<&str>,
    default_error_code: i32,
) -> (i32, String, String) {
    match Command::new(program).args(args).output() {
        Ok(output) => (
            output.status.code().unwrap_or(default_error_code),
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        ),
        Err(e) => {
            let error = format!("Failed to execute command {} with error {}", program, e);
            (default_error_code, String::new(), error)
        }
    }
}
