use crate::{MulticallError, Result};

use std::collections::BTreeMap;

/// Maps the cumulative call count at the end of each non-empty group to
/// that group's label. Keys are 1-indexed and never 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakpointMap {
    breakpoints: BTreeMap<usize, String>,
    total_count: usize,
}

impl BreakpointMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a group of `call_count` calls. Empty groups leave no trace.
    pub fn push_group(&mut self, label: &str, call_count: usize) {
        if call_count == 0 {
            return;
        }

        self.total_count += call_count;
        self.breakpoints.insert(self.total_count, label.to_string());
    }

    pub fn get(&self, breakpoint: usize) -> Option<&str> {
        self.breakpoints.get(&breakpoint).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.breakpoints
            .iter()
            .map(|(breakpoint, label)| (*breakpoint, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Number of calls across all recorded groups.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Label of the group containing the 0-based `flat_index`: the first
    /// breakpoint in `flat_index + 1 ..= total_count`. The search never
    /// looks past `total_count`.
    pub fn resolve_label(&self, flat_index: usize, total_count: usize) -> Result<&str> {
        let not_found = MulticallError::BreakpointNotFound {
            flat_index,
            total_count,
        };

        if flat_index >= total_count {
            return Err(not_found);
        }

        self.breakpoints
            .range(flat_index + 1..=total_count)
            .next()
            .map(|(_, label)| label.as_str())
            .ok_or(not_found)
    }
}
