// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// Format a timestamp as "<Month name> <day>" on the user's local calendar,
/// e.g. "March 7".
pub fn format_month_day(date: DateTime<Utc>) -> String {
    format_month_day_in(date, &Local)
}

/// Format a timestamp as "<Month name> <day>" in the given timezone.
pub fn format_month_day_in<Tz>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz).format("%B %-d").to_string()
}
