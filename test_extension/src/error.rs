// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Shared(#[from] test_extension_shared::error::Error),

    #[error("Failed to decode protected settings: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Handler environment {0}")]
    HandlerEnvironment(String),

    #[error("Sequence number {0}")]
    Sequence(String),

    #[error("Extension settings {0}")]
    Settings(String),

    #[error("Status reporting {0}")]
    Status(String),

    #[error("Command \"{0}\" not recognized")]
    UnrecognizedCommand(String),
}
