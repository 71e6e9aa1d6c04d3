// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use clap::error::ErrorKind;
use clap::Parser;
use guest_agent_test_extension::cli::Cli;
use guest_agent_test_extension::{constants, handler_main};
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            eprintln!("{e}");
            process::exit(constants::EXIT_CODE_COMMAND_NOT_FOUND);
        }
    };
    process::exit(handler_main::program_start(cli));
}
