// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the PT-Gen lookup service

use chrono::{Datelike, Utc};

/// Product name used in logs and `/health`
pub const PRODUCT_NAME: &str = "PT-Gen";

/// Holder named in every envelope's copyright line
pub const COPYRIGHT_HOLDER: &str = "PT-Gen-Modern";

/// Semantic version number stamped into every envelope
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2025-10-13";

/// Copyright line for the given year, e.g. `© 2025 PT-Gen-Modern`
pub fn copyright_notice(year: i32) -> String {
    format!("© {} {}", year, COPYRIGHT_HOLDER)
}

/// Copyright line for the current year
pub fn current_copyright() -> String {
    copyright_notice(Utc::now().year())
}

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("{} {} ({})", PRODUCT_NAME, VERSION_NUMBER, BUILD_DATE)
}
