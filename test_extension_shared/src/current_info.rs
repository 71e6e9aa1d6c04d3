// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use once_cell::sync::Lazy;
use os_info::Info;

static OS_INFO: Lazy<Info> = Lazy::new(os_info::get);

pub fn get_os_version() -> String {
    OS_INFO.version().to_string()
}

pub fn get_os_type() -> String {
    OS_INFO.os_type().to_string()
}

pub fn get_long_os_version() -> String {
    #[cfg(windows)]
    let family = "Windows";
    #[cfg(not(windows))]
    let family = "Linux";
    format!("{}:{}-{}", family, get_os_type(), get_os_version())
}

pub fn get_processor_arch() -> String {
    match OS_INFO.architecture() {
        Some(arch) => arch.to_string(),
        None => "Unknown".to_string(),
    }
}
