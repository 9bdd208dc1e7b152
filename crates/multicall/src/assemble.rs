use crate::{BreakpointMap, CallCodec, FlatCallSet, MulticallError, Result};

use alloy::{dyn_abi::DynSolValue, primitives::Bytes};
use fnv::FnvHashMap;

/// Decoded results keyed by group label. Each label maps to one decoded
/// output tuple per call, in the order the calls were submitted. Only
/// non-empty groups have an entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet(FnvHashMap<String, Vec<Vec<DynSolValue>>>);

impl ResultSet {
    pub fn get(&self, label: &str) -> Option<&[Vec<DynSolValue>]> {
        self.0.get(label).map(Vec::as_slice)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<DynSolValue>])> {
        self.0
            .iter()
            .map(|(label, values)| (label.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> FnvHashMap<String, Vec<Vec<DynSolValue>>> {
        self.0
    }
}

/// Routes each flat result back to its group and position. Any resolve or
/// decode failure fails the whole set.
pub fn assemble(
    codec: &CallCodec,
    flat: &FlatCallSet,
    breakpoints: &BreakpointMap,
    results: Vec<Bytes>,
) -> Result<ResultSet> {
    let total_count = flat.len();
    if results.len() != total_count {
        return Err(MulticallError::Transport(format!(
            "expected {} results, got {}",
            total_count,
            results.len()
        )));
    }

    let mut result_set = FnvHashMap::<String, Vec<Vec<DynSolValue>>>::default();

    for (flat_index, data) in results.iter().enumerate() {
        let label = breakpoints.resolve_label(flat_index, total_count)?;
        let value = codec.decode(flat_index, &flat.function_names()[flat_index], data)?;

        let values = result_set.entry(label.to_string()).or_default();
        let position = flat.positions()[flat_index];
        if position != values.len() {
            return Err(MulticallError::NonContiguousPosition {
                label: label.to_string(),
                position,
                expected: values.len(),
            });
        }

        values.push(value);
    }

    Ok(ResultSet(result_set))
}
