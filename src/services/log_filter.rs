// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date-range and limit filtering of a retrieved exercise log.

use crate::coerce;
use crate::dates;
use crate::models::Exercise;

/// Optional filters for a user's log, as received in the query string.
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl LogFilter {
    /// Read the filter from a raw query string.
    ///
    /// Never fails: undecodable bytes are replaced, unknown keys are ignored,
    /// and a repeated key keeps all its values joined with `,`.
    pub fn from_query(query: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

        let mut filter = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "from" => &mut filter.from,
                "to" => &mut filter.to,
                "limit" => &mut filter.limit,
                _ => continue,
            };
            if let Some(existing) = slot {
                existing.push(',');
                existing.push_str(&value);
            } else {
                *slot = Some(value);
            }
        }
        filter
    }

    /// Filter `log` without reordering it.
    ///
    /// The date range applies only when both `from` and `to` are given, and
    /// is inclusive at both ends. An unparseable bound or entry date never
    /// satisfies the range. `limit` then keeps a prefix of what remains.
    pub fn apply(&self, mut log: Vec<Exercise>) -> Vec<Exercise> {
        if let (Some(from), Some(to)) = (present(&self.from), present(&self.to)) {
            let from = dates::timestamp_millis(from);
            let to = dates::timestamp_millis(to);
            log.retain(|exercise| match (dates::timestamp_millis(&exercise.date), from, to) {
                (Some(date), Some(from), Some(to)) => date >= from && date <= to,
                _ => false,
            });
        }

        if let Some(limit) = present(&self.limit) {
            let end = coerce::prefix_end(limit, log.len());
            log.truncate(end);
        }

        log
    }
}
