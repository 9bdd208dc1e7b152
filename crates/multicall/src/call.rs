use crate::abi::multicall3;

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes},
};

/// One read-only contract call: target, function and arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct CallDescriptor {
    pub address: Address,
    pub function_name: String,
    pub params: Vec<DynSolValue>,
}

impl CallDescriptor {
    pub fn new(address: Address, function_name: impl Into<String>) -> Self {
        Self {
            address,
            function_name: function_name.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<DynSolValue>) -> Self {
        self.params = params;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelledGroup {
    pub label: String,
    pub calls: Vec<CallDescriptor>,
}

impl LabelledGroup {
    pub fn new(label: impl Into<String>, calls: Vec<CallDescriptor>) -> Self {
        Self {
            label: label.into(),
            calls,
        }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// An encoded call as submitted to the aggregate transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedCall {
    pub target: Address,
    pub call_data: Bytes,
}

impl From<EncodedCall> for multicall3::Call3 {
    // allowFailure is off: one reverting call reverts the whole aggregate.
    fn from(call: EncodedCall) -> Self {
        multicall3::Call3 {
            target: call.target,
            allowFailure: false,
            callData: call.call_data,
        }
    }
}
