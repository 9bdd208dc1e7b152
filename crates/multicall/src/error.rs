pub type Result<T> = std::result::Result<T, MulticallError>;

#[derive(Debug, thiserror::Error)]
pub enum MulticallError {
    #[error("invalid abi: {0}")]
    InvalidAbi(String),

    /// Arguments did not match the function signature, or the function is
    /// unknown to the codec's ABI. Raised before anything is sent.
    #[error("failed to encode call to {function_name}: {reason}")]
    Encode {
        function_name: String,
        reason: String,
    },

    /// The aggregate call failed as a whole.
    #[error("aggregate call failed: {0}")]
    Transport(String),

    #[error("failed to decode result {flat_index} of {function_name}: {reason}")]
    Decode {
        flat_index: usize,
        function_name: String,
        reason: String,
    },

    /// The flattener and resolver disagree on the call count. This is a bug,
    /// not a runtime condition.
    #[error("no breakpoint found for flat index {flat_index} (total {total_count})")]
    BreakpointNotFound {
        flat_index: usize,
        total_count: usize,
    },

    #[error("failed to parse block id: {0}")]
    InvalidBlockId(String),

    #[error("duplicate group label {0:?}")]
    DuplicateLabel(String),

    /// A group's results did not arrive at positions `0..k-1` in order.
    /// Flattening always produces contiguous positions, so this guards that
    /// invariant rather than a runtime condition.
    #[error("result for {label:?} at position {position}, expected position {expected}")]
    NonContiguousPosition {
        label: String,
        position: usize,
        expected: usize,
    },
}

impl MulticallError {
    pub(crate) fn encode(function_name: &str, reason: impl ToString) -> Self {
        MulticallError::Encode {
            function_name: function_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decode(flat_index: usize, function_name: &str, reason: impl ToString) -> Self {
        MulticallError::Decode {
            flat_index,
            function_name: function_name.to_string(),
            reason: reason.to_string(),
        }
    }
}
