// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use tracing::debug;

use crate::error::{Result, SearchError};
use crate::params::{ParamValue, Params};

/// Result window (`start`, `rows`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginateOptions {
    start: Option<u64>,
    rows: Option<u64>,
}

impl PaginateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<u64> {
        self.start
    }

    pub fn rows(&self) -> Option<u64> {
        self.rows
    }

    /// Set `start` and/or `rows`; `None` keeps the current value.
    pub fn update(&mut self, start: Option<i64>, rows: Option<i64>) -> Result<()> {
        let start = start.map(|v| non_negative("start", v)).transpose()?;
        let rows = rows.map(|v| non_negative("rows", v)).transpose()?;

        if start.is_some() {
            self.start = start;
        }
        if rows.is_some() {
            self.rows = rows;
        }
        Ok(())
    }

    pub fn options(&self) -> Params {
        let mut opts = Params::new();
        if let Some(start) = self.start {
            opts.insert("start".to_string(), ParamValue::Int(start as i64));
        }
        if let Some(rows) = self.rows {
            opts.insert("rows".to_string(), ParamValue::Int(rows as i64));
        }
        opts
    }
}

fn non_negative(param: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        debug!(param, value, "Pagination value rejected");
        SearchError::InvalidArgument(format!("{} must be 0 or greater, got {}", param, value))
    })
}
