// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::error::{Error, ParseVersionErrorType};
use crate::result::Result;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl Version {
    pub fn from_major_minor_build_revision(
        major: u32,
        minor: u32,
        build: Option<u32>,
        revision: Option<u32>,
    ) -> Self {
        Version {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parses `major.minor[.build[.revision]]`.
    pub fn from_string(version_string: &str) -> Result<Version> {
        let version_parts = version_string.trim().split('.').collect::<Vec<&str>>();
        if version_parts.len() < 2 || version_parts.len() > 4 {
            return Err(Error::ParseVersion(ParseVersionErrorType::InvalidString));
        }

        let major = version_parts[0].parse::<u32>().map_err(|_| {
            Error::ParseVersion(ParseVersionErrorType::MajorBuild(
                version_string.to_string(),
            ))
        })?;
        let minor = version_parts[1].parse::<u32>().map_err(|_| {
            Error::ParseVersion(ParseVersionErrorType::MinorBuild(
                version_string.to_string(),
            ))
        })?;
        let build = version_parts.get(2).and_then(|b| b.parse::<u32>().ok());
        let revision = version_parts.get(3).and_then(|r| r.parse::<u32>().ok());

        Ok(Version::from_major_minor_build_revision(
            major, minor, build, revision,
        ))
    }

    /// Missing build and revision count as 0, so `1.0.2` matches `1.0.2.0`.
    pub fn is_same_as(&self, other: &Version) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.build.unwrap_or(0) == other.build.unwrap_or(0)
            && self.revision.unwrap_or(0) == other.revision.unwrap_or(0)
    }

    /// Four part form with missing parts as 0.
    pub fn to_full_string(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.major,
            self.minor,
            self.build.unwrap_or(0),
            self.revision.unwrap_or(0)
        )
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(b) = self.build {
            write!(f, ".{}", b)?;
            if let Some(r) = self.revision {
                write!(f, ".{}", r)?;
            }
        }
        Ok(())
    }
}
