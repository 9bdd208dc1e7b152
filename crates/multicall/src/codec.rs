use crate::{CallDescriptor, EncodedCall, MulticallError, Result};

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt, Specifier},
    json_abi::{Function, JsonAbi},
};

/// Encodes calls and decodes their return data against a single contract ABI.
#[derive(Clone, Debug)]
pub struct CallCodec {
    abi: JsonAbi,
}

impl CallCodec {
    pub fn new(abi: JsonAbi) -> Self {
        Self { abi }
    }

    /// Standard JSON ABI, as emitted by solc.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|err| MulticallError::InvalidAbi(err.to_string()))
    }

    /// Human readable signatures, e.g. `function balanceOf(address) view returns (uint256)`.
    pub fn parse<'a>(signatures: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        JsonAbi::parse(signatures)
            .map(Self::new)
            .map_err(|err| MulticallError::InvalidAbi(err.to_string()))
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    // `name` is either a bare function name or a full signature like
    // `balanceOf(address)`. Bare names must not be overloaded.
    fn function(&self, name: &str) -> std::result::Result<&Function, String> {
        if name.contains('(') {
            return self
                .abi
                .functions()
                .find(|function| function.signature() == name)
                .ok_or_else(|| format!("no function with signature {name}"));
        }

        match self.abi.function(name).map(Vec::as_slice) {
            Some([function]) => Ok(function),
            Some([]) | None => Err(format!("no function named {name}")),
            Some(overloads) => Err(format!(
                "{name} is overloaded ({}), use a full signature",
                overloads
                    .iter()
                    .map(Function::signature)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }

    pub fn encode(&self, call: &CallDescriptor) -> Result<EncodedCall> {
        let function = self
            .function(&call.function_name)
            .map_err(|reason| MulticallError::encode(&call.function_name, reason))?;

        let call_data = function
            .abi_encode_input(&call.params)
            .map_err(|err| MulticallError::encode(&call.function_name, err))?;

        Ok(EncodedCall {
            target: call.address,
            call_data: call_data.into(),
        })
    }

    /// Decodes the output tuple of `function_name`. `flat_index` is only used
    /// to identify the failing result in the error.
    pub fn decode(
        &self,
        flat_index: usize,
        function_name: &str,
        data: &[u8],
    ) -> Result<Vec<DynSolValue>> {
        let function = self
            .function(function_name)
            .map_err(|reason| MulticallError::decode(flat_index, function_name, reason))?;

        function
            .abi_decode_output(data)
            .map_err(|err| MulticallError::decode(flat_index, function_name, err))
    }

    /// Parses textual arguments against the input types of `function_name`.
    pub fn coerce_params(&self, function_name: &str, params: &[&str]) -> Result<Vec<DynSolValue>> {
        let function = self
            .function(function_name)
            .map_err(|reason| MulticallError::encode(function_name, reason))?;

        if function.inputs.len() != params.len() {
            return Err(MulticallError::encode(
                function_name,
                format!(
                    "expected {} params, got {}",
                    function.inputs.len(),
                    params.len()
                ),
            ));
        }

        function
            .inputs
            .iter()
            .zip(params)
            .map(|(input, param)| {
                input
                    .resolve()
                    .and_then(|ty| ty.coerce_str(param))
                    .map_err(|err| MulticallError::encode(function_name, err))
            })
            .collect()
    }
}
