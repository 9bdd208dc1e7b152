use crate::{BreakpointMap, CallCodec, EncodedCall, LabelledGroup, MulticallError, Result};

use fnv::FnvHashSet;

/// Calls from every non-empty group, concatenated in group order. The three
/// sequences are parallel and always the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatCallSet {
    pub(crate) calls: Vec<EncodedCall>,
    pub(crate) function_names: Vec<String>,
    pub(crate) positions: Vec<usize>,
}

impl FlatCallSet {
    pub fn calls(&self) -> &[EncodedCall] {
        &self.calls
    }

    pub fn function_names(&self) -> &[String] {
        &self.function_names
    }

    /// 0-based position of each call within its own group.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    fn push(&mut self, call: EncodedCall, function_name: &str, position: usize) {
        self.calls.push(call);
        self.function_names.push(function_name.to_string());
        self.positions.push(position);
    }
}

/// Encodes every call and records a breakpoint at the end of each non-empty
/// group. Fails on the first call that does not encode, before anything is
/// sent.
pub fn flatten(
    codec: &CallCodec,
    groups: &[LabelledGroup],
) -> Result<(FlatCallSet, BreakpointMap)> {
    let mut flat = FlatCallSet::default();
    let mut breakpoints = BreakpointMap::new();
    let mut labels = FnvHashSet::default();

    for group in groups.iter().filter(|group| !group.is_empty()) {
        if !labels.insert(group.label.as_str()) {
            return Err(MulticallError::DuplicateLabel(group.label.clone()));
        }

        for (position, call) in group.calls.iter().enumerate() {
            flat.push(codec.encode(call)?, &call.function_name, position);
        }

        breakpoints.push_group(&group.label, group.len());
    }

    Ok((flat, breakpoints))
}
