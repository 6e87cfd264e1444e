//! Shared test helpers for `skoo-core` integration tests.
//!
//! The port fakes live in `skoo_core::testing`.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

/// Wednesday 2025-03-12 08:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 12, 8, 0, 0).unwrap()
}
