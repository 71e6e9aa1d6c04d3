// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use crate::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The lifecycle commands the guest agent invokes the handler with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Install,
    Enable,
    Disable,
    Uninstall,
    Update,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Install,
        Operation::Enable,
        Operation::Disable,
        Operation::Uninstall,
        Operation::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Install => "install",
            Operation::Enable => "enable",
            Operation::Disable => "disable",
            Operation::Uninstall => "uninstall",
            Operation::Update => "update",
        }
    }

    fn progress_noun(&self) -> &'static str {
        match self {
            Operation::Install => "installation",
            Operation::Enable => "enabling",
            Operation::Disable => "disabling",
            Operation::Uninstall => "uninstallation",
            Operation::Update => "updating",
        }
    }

    pub fn in_progress_message(&self) -> String {
        format!("{} in progress", self.progress_noun())
    }

    pub fn complete_message(&self) -> String {
        format!("{} is complete", self.progress_noun())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| Error::UnrecognizedCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Operation;

    #[test]
    fn operation_from_str_test() {
        for op in Operation::ALL {
            assert_eq!(op, op.as_str().parse::<Operation>().unwrap());
            assert_eq!(op.as_str(), op.to_string());
        }

        // matching is exact
        assert!("Install".parse::<Operation>().is_err());
        assert!(" enable".parse::<Operation>().is_err());
        let error = "reset".parse::<Operation>().unwrap_err();
        assert_eq!("Command \"reset\" not recognized", error.to_string());
    }

    #[test]
    fn operation_messages_test() {
        assert_eq!(
            "installation in progress",
            Operation::Install.in_progress_message()
        );
        assert_eq!("installation is complete", Operation::Install.complete_message());
        assert_eq!("enabling in progress", Operation::Enable.in_progress_message());
        assert_eq!("updating is complete", Operation::Update.complete_message());
    }
}
