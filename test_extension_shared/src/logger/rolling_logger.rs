// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::logger::{self, LoggerLevel};
use crate::misc_helpers;
use crate::result::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::PathBuf;

#[derive(Debug)]
pub struct RollingLogger {
    log_dir: PathBuf,
    log_file_name: String,
    log_file_extension: String,

    max_log_file_size: u64,  // max log file size in bytes
    max_log_file_count: u16, // max log file count, if exceed the count, the older log files will be removed.
}

impl RollingLogger {
    pub fn create_new(
        dir: PathBuf,
        file_name: String,
        log_size: u64,
        log_count: u16,
    ) -> RollingLogger {
        RollingLogger {
            log_dir: dir,
            log_file_name: file_name,
            log_file_extension: String::from("log"),
            max_log_file_size: log_size,
            max_log_file_count: log_count.max(1),
        }
    }

    /// Creates the log folder and opens the current log file once,
    /// so an unusable log location is reported before anything is logged.
    pub fn open_check(&self) -> Result<()> {
        self.open_file().map(|_| ())
    }

    pub fn current_file(&self) -> PathBuf {
        self.get_current_file_full_path(None)
    }

    fn open_file(&self) -> Result<LineWriter<File>> {
        misc_helpers::try_create_folder(&self.log_dir)?;

        let f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_file())?;
        Ok(LineWriter::new(f))
    }

    pub fn write(&self, level: LoggerLevel, message: String) -> Result<()> {
        let message = format!("{}{}", logger::get_log_header(level), message);
        self.write_line(message)
    }

    fn write_line(&self, message: String) -> Result<()> {
        self.roll_if_needed()?;

        let mut writer = self.open_file()?;
        writer.write_all(message.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }

    fn archive_file(&self) -> Result<()> {
        let archived_name = self.get_current_file_full_path(Some(format!(
            "{}-{}",
            misc_helpers::get_date_time_string_with_milliseconds(),
            misc_helpers::get_date_time_unix_nano()
        )));
        fs::rename(self.current_file(), archived_name)?;

        // keep room for the new current file
        let log_files = self.get_log_files()?;
        let max_count: usize = self.max_log_file_count.into();
        if log_files.len() >= max_count {
            let remove_count = log_files.len() + 1 - max_count;
            for log in log_files.iter().take(remove_count) {
                fs::remove_file(log)?;
            }
        }

        Ok(())
    }

    /// All files of this logger, archived ones first, sorted by name.
    pub fn get_log_files(&self) -> Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.log_file_name);
        let suffix = format!(".{}", self.log_file_extension);

        let mut log_files: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&self.log_dir)? {
            let entry = entry?;
            if !entry.metadata()?.is_file() {
                continue;
            }

            // log file name should able convert to string safely; if not, ignore this file entry
            if let Ok(file_name) = entry.file_name().into_string() {
                if file_name.starts_with(&prefix) && file_name.ends_with(&suffix) {
                    log_files.push(entry.path());
                }
            }
        }

        log_files.sort();
        Ok(log_files)
    }

    fn get_current_file_full_path(&self, timestamp: Option<String>) -> PathBuf {
        // the name may carry dots (operations-1.0.2), so the extension is appended, not set
        let file_name = match timestamp {
            Some(time) => format!(
                "{}.{}.{}",
                self.log_file_name,
                time.replace(':', "."),
                self.log_file_extension
            ),
            None => format!("{}.{}", self.log_file_name, self.log_file_extension),
        };
        self.log_dir.join(file_name)
    }

    fn roll_if_needed(&self) -> Result<()> {
        let file = self.current_file();
        let file_length = match file.metadata() {
            Ok(metadata) => metadata.len(),
            Err(_) => return Ok(()),
        };

        if file_length >= self.max_log_file_size {
            self.archive_file()?;
        }

        Ok(())
    }
}
