// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::common;
use crate::constants;
use crate::error::Error;
use crate::result::Result;
use crate::structs::{HandlerSettings, HandlerSettingsFile, ProtectedSettings, PublicSettings};
use base64::Engine;
use std::path::PathBuf;
use test_extension_shared::misc_helpers;

pub trait SettingsProvider {
    fn get_extension_settings(&self, seq_no: i32) -> Result<(PublicSettings, ProtectedSettings)>;
}

/// Reads `<configFolder>/<seq>.settings` written by the guest agent.
pub struct FileSettingsProvider {
    config_folder: PathBuf,
    #[allow(dead_code)]
    certificate_folder: PathBuf,
}

impl FileSettingsProvider {
    pub fn new(config_folder: PathBuf, certificate_folder: PathBuf) -> Self {
        FileSettingsProvider {
            config_folder,
            certificate_folder,
        }
    }

    fn read_handler_settings(&self, seq_no: i32) -> Result<HandlerSettings> {
        if seq_no < 0 {
            return Err(Error::Settings(format!(
                "cannot be read for unknown sequence number {seq_no}"
            )));
        }
        let settings_file =
            common::get_file_path(&self.config_folder, seq_no, constants::SETTINGS_FILE_SUFFIX);
        let settings: HandlerSettingsFile = misc_helpers::json_read_from_file(&settings_file)?;
        match settings.runtimeSettings.into_iter().next() {
            Some(runtime_settings) => Ok(runtime_settings.handlerSettings),
            None => Err(Error::Settings(format!(
                "file '{}' has no runtimeSettings",
                misc_helpers::path_to_string(&settings_file)
            ))),
        }
    }

    fn get_protected_settings(
        &self,
        seq_no: i32,
        handler_settings: &HandlerSettings,
    ) -> Result<ProtectedSettings> {
        let encoded = match &handler_settings.protectedSettings {
            Some(s) if !s.trim().is_empty() => s.trim(),
            _ => return Ok(ProtectedSettings::default()),
        };
        let thumbprint = match &handler_settings.protectedSettingsCertThumbprint {
            Some(tp) if !tp.is_empty() => tp,
            _ => {
                return Err(Error::Settings(
                    "protectedSettingsCertThumbprint is missing".to_string(),
                ))
            }
        };

        let encrypted = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        let decrypted = self.decrypt(seq_no, &encrypted, thumbprint)?;
        Ok(serde_json::from_str::<ProtectedSettings>(&decrypted)?)
    }

    #[cfg(not(windows))]
    fn decrypt(&self, seq_no: i32, encrypted: &[u8], thumbprint: &str) -> Result<String> {
        let encrypted_file = common::get_file_path(&self.config_folder, seq_no, "protected.der");
        std::fs::write(&encrypted_file, encrypted)?;

        let cert_file = misc_helpers::path_to_string(
            &self.certificate_folder.join(format!("{thumbprint}.crt")),
        );
        let key_file = misc_helpers::path_to_string(
            &self.certificate_folder.join(format!("{thumbprint}.prv")),
        );
        let encrypted_file_str = misc_helpers::path_to_string(&encrypted_file);
        let (exit_code, stdout, stderr) = misc_helpers::execute_command(
            "openssl",
            vec![
                "smime",
                "-inform",
                "DER",
                "-decrypt",
                "-recip",
                &cert_file,
                "-inkey",
                &key_file,
                "-in",
                &encrypted_file_str,
            ],
            -1,
        );
        // the encrypted copy is not kept even when openssl fails
        _ = std::fs::remove_file(&encrypted_file);

        if exit_code != 0 {
            return Err(Error::Settings(format!(
                "protected settings decryption failed with exit code {}: {}",
                exit_code,
                stderr.trim()
            )));
        }
        Ok(stdout)
    }

    #[cfg(windows)]
    fn decrypt(&self, _seq_no: i32, _encrypted: &[u8], _thumbprint: &str) -> Result<String> {
        Err(Error::Settings(
            "protected settings decryption is not supported on Windows".to_string(),
        ))
    }
}

impl SettingsProvider for FileSettingsProvider {
    fn get_extension_settings(&self, seq_no: i32) -> Result<(PublicSettings, ProtectedSettings)> {
        let handler_settings = self.read_handler_settings(seq_no)?;
        let public_settings = match &handler_settings.publicSettings {
            Some(value) => serde_json::from_value::<PublicSettings>(value.clone())?,
            None => PublicSettings::default(),
        };
        let protected_settings = self.get_protected_settings(seq_no, &handler_settings)?;
        Ok((public_settings, protected_settings))
    }
}
