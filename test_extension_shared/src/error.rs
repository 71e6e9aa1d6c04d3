// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Failed to create regex with error: {0}")]
    Regex(#[from] regex::Error),

    #[error("{0}")]
    ParseVersion(ParseVersionErrorType),

    #[error("Cannot access folder '{0}': {1}")]
    Folder(String, std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseVersionErrorType {
    #[error("Invalid version string")]
    InvalidString,

    #[error("Cannot read Major build from {0}")]
    MajorBuild(String),

    #[error("Cannot read Minor build from {0}")]
    MinorBuild(String),
}

#[cfg(test)]
mod test {
    use super::{Error, ParseVersionErrorType};
    use std::io::ErrorKind;

    #[test]
    fn error_formatting_test() {
        let mut error: Error = regex::Regex::new(r"abc(").map_err(Into::into).unwrap_err();
        assert!(error
            .to_string()
            .contains("Failed to create regex with error: regex parse error:"));

        error = Error::ParseVersion(ParseVersionErrorType::MajorBuild("a.5.0".to_string()));
        assert_eq!(error.to_string(), "Cannot read Major build from a.5.0");

        error = Error::Folder(
            "log".to_string(),
            std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(error.to_string(), "Cannot access folder 'log': denied");

        error = serde_json::from_str::<u32>("\"text\"")
            .map_err(Into::into)
            .unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }
}
