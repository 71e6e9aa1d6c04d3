// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
pub mod cli;
pub mod common;
pub mod constants;
pub mod error;
pub mod fail_injection;
pub mod handler_main;
pub mod logger;
pub mod operation;
pub mod result;
pub mod run_context;
pub mod runtime_config;
pub mod sequence;
pub mod settings;
pub mod status;
pub mod structs;
