// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT

pub mod current_info;
pub mod error;
pub mod logger;
pub mod misc_helpers;
pub mod result;
pub mod secrets_redactor;
pub mod version;
