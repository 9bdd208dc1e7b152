use labelled_multicall::{LabelledGroup, ResultSet};

use alloy::{dyn_abi::DynSolValue, primitives::hex};

use serde_json::{Map, Value};

pub fn value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        // integers can exceed json's safe range
        DynSolValue::Int(i, _) => Value::String(i.to_string()),
        DynSolValue::Uint(u, _) => Value::String(u.to_string()),
        DynSolValue::Address(address) => Value::String(address.to_checksum(None)),
        DynSolValue::FixedBytes(word, size) => Value::String(hex::encode_prefixed(&word[..*size])),
        DynSolValue::Bytes(bytes) => Value::String(hex::encode_prefixed(bytes)),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) | DynSolValue::Tuple(values) => {
            Value::Array(values.iter().map(value_to_json).collect())
        }
        other => Value::String(format!("{other:?}")),
    }
}

/// `label -> [[value, ...], ...]`, one inner array per call. Empty groups
/// are left out, as they are in the result set.
pub fn result_set_to_json(groups: &[LabelledGroup], result_set: &ResultSet) -> Value {
    let mut output = Map::new();

    for group in groups {
        if let Some(results) = result_set.get(&group.label) {
            output.insert(
                group.label.clone(),
                Value::Array(
                    results
                        .iter()
                        .map(|values| Value::Array(values.iter().map(value_to_json).collect()))
                        .collect(),
                ),
            );
        }
    }

    Value::Object(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy::primitives::{address, FixedBytes, I256, U256};
    use serde_json::json;

    #[test]
    fn test_value_to_json() {
        assert_eq!(value_to_json(&DynSolValue::Bool(true)), json!(true));
        assert_eq!(
            value_to_json(&DynSolValue::Uint(U256::MAX, 256)),
            json!(U256::MAX.to_string())
        );
        assert_eq!(
            value_to_json(&DynSolValue::Int(I256::MINUS_ONE, 256)),
            json!("-1")
        );
        assert_eq!(
            value_to_json(&DynSolValue::Address(address!(
                "ca11bde05977b3631167028862be2a173976ca11"
            ))),
            json!("0xcA11bde05977b3631167028862bE2a173976CA11")
        );
        assert_eq!(
            value_to_json(&DynSolValue::FixedBytes(
                FixedBytes::<32>::right_padding_from(&[0xab, 0xcd]),
                2
            )),
            json!("0xabcd")
        );
        assert_eq!(
            value_to_json(&DynSolValue::Bytes(vec![0xde, 0xad])),
            json!("0xdead")
        );
        assert_eq!(
            value_to_json(&DynSolValue::Tuple(vec![
                DynSolValue::String("weth".to_string()),
                DynSolValue::Array(vec![DynSolValue::Uint(U256::from(18), 8)]),
            ])),
            json!(["weth", ["18"]])
        );
    }

    #[test]
    fn test_result_set_to_json() {
        use labelled_multicall::{assemble, flatten, CallCodec, CallDescriptor};

        let codec = CallCodec::parse(["function decimals() view returns (uint8)"]).unwrap();
        let token = address!("4200000000000000000000000000000000000006");
        let groups = vec![
            LabelledGroup::new("weth", vec![CallDescriptor::new(token, "decimals")]),
            LabelledGroup::new("none", vec![]),
        ];
        let (flat, breakpoints) = flatten(&codec, &groups).unwrap();
        let results = vec![DynSolValue::Tuple(vec![DynSolValue::Uint(U256::from(18), 8)])
            .abi_encode_params()
            .into()];

        let result_set = assemble(&codec, &flat, &breakpoints, results).unwrap();

        assert_eq!(
            result_set_to_json(&groups, &result_set),
            json!({ "weth": [["18"]] })
        );
    }
}
