use labelled_multicall::{CallCodec, CallDescriptor, LabelledGroup};

use alloy::primitives::Address;

use eyre::{Result, WrapErr};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GroupInput {
    pub label: String,
    pub calls: Vec<CallInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallInput {
    pub address: String,
    pub function_name: String,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

impl CallInput {
    fn into_descriptor(self, codec: &CallCodec) -> Result<CallDescriptor> {
        // lowercase first so mixed-case input is never rejected as a bad checksum
        let address = self
            .address
            .to_lowercase()
            .parse::<Address>()
            .wrap_err_with(|| format!("invalid address {}", self.address))?;

        let params = self
            .params
            .iter()
            // numbers keep their source text (arbitrary_precision), so
            // integers past u64 reach coercion exactly
            .map(|param| match param {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>();
        let params = codec.coerce_params(
            &self.function_name,
            &params.iter().map(String::as_str).collect::<Vec<_>>(),
        )?;

        Ok(CallDescriptor::new(address, self.function_name).with_params(params))
    }
}

pub fn parse_groups(json: &str, codec: &CallCodec) -> Result<Vec<LabelledGroup>> {
    let inputs: Vec<GroupInput> =
        serde_json::from_str(json).wrap_err("failed to parse groups json")?;

    inputs
        .into_iter()
        .map(|group| {
            let label = group.label;
            group
                .calls
                .into_iter()
                .map(|call| call.into_descriptor(codec))
                .collect::<Result<Vec<_>>>()
                .wrap_err_with(|| format!("invalid call in group {label}"))
                .map(|calls| LabelledGroup::new(label, calls))
        })
        .collect()
}
