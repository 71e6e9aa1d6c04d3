// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT

use clap::Parser;
use std::path::PathBuf;

/// GATestExt --command=<install|enable|disable|uninstall|update> [--jsonfile=<path>]
/// GATestExt --version - print the version of the extension.
#[derive(Parser, Debug)]
#[command()]
pub struct Cli {
    /// the lifecycle command requested by the guest agent
    #[arg(long)]
    pub command: Option<String>,

    /// runtime configuration file, may list commands to fail
    #[arg(long)]
    pub jsonfile: Option<PathBuf>,

    /// print the version of the extension
    #[arg(short, long)]
    pub version: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parse_command_test() {
        let cli = Cli::try_parse_from(["GATestExt", "--command=enable"]).unwrap();
        assert_eq!(Some("enable".to_string()), cli.command);
        assert_eq!(None, cli.jsonfile);
        assert!(!cli.version);

        let cli = Cli::try_parse_from([
            "GATestExt",
            "--command",
            "install",
            "--jsonfile=/tmp/runtime.json",
        ])
        .unwrap();
        assert_eq!(Some("install".to_string()), cli.command);
        assert_eq!(Some(PathBuf::from("/tmp/runtime.json")), cli.jsonfile);
    }

    #[test]
    fn parse_free_command_value_test() {
        // unknown names are left for the dispatcher to reject
        let cli = Cli::try_parse_from(["GATestExt", "--command=reset"]).unwrap();
        assert_eq!(Some("reset".to_string()), cli.command);

        let cli = Cli::try_parse_from(["GATestExt"]).unwrap();
        assert_eq!(None, cli.command);

        let cli = Cli::try_parse_from(["GATestExt", "--version"]).unwrap();
        assert!(cli.version);

        assert!(Cli::try_parse_from(["GATestExt", "--unknown"]).is_err());
    }
}
