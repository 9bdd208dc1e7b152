use crate::{
    assemble, flatten, AggregateTransport, CallCodec, CallDescriptor, LabelledGroup,
    MulticallError, Result, ResultSet,
};

use alloy::dyn_abi::DynSolValue;
use tracing::{debug, instrument};

/// Executes every call of every group in one aggregate call and returns the
/// decoded results keyed by group label.
///
/// Either every call is decoded or an error is returned; there are no
/// partial results. Empty groups are skipped and have no entry in the
/// result set.
#[instrument(skip_all, fields(groups_count = groups.len()))]
pub async fn labelled_group_multicall<T: AggregateTransport>(
    transport: &T,
    codec: &CallCodec,
    groups: &[LabelledGroup],
) -> Result<ResultSet> {
    let (flat, breakpoints) = flatten(codec, groups)?;
    debug!(
        calls_count = flat.len(),
        breakpoints_count = breakpoints.len(),
        "flattened groups"
    );

    if flat.is_empty() {
        return Ok(ResultSet::default());
    }

    let results = transport.aggregate(flat.calls().to_vec()).await?;

    assemble(codec, &flat, &breakpoints, results)
}

/// Ungrouped variant: one decoded output tuple per call, in call order.
#[instrument(skip_all, fields(calls_count = calls.len()))]
pub async fn multicall<T: AggregateTransport>(
    transport: &T,
    codec: &CallCodec,
    calls: &[CallDescriptor],
) -> Result<Vec<Vec<DynSolValue>>> {
    if calls.is_empty() {
        return Ok(Vec::new());
    }

    let encoded = calls
        .iter()
        .map(|call| codec.encode(call))
        .collect::<Result<Vec<_>>>()?;

    let results = transport.aggregate(encoded).await?;
    if results.len() != calls.len() {
        return Err(MulticallError::Transport(format!(
            "expected {} results, got {}",
            calls.len(),
            results.len()
        )));
    }

    results
        .iter()
        .zip(calls)
        .enumerate()
        .map(|(idx, (data, call))| codec.decode(idx, &call.function_name, data))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodedCall;

    use alloy::primitives::{address, Address, Bytes, U256};
    use eyre::Result;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    const TARGET: Address = address!("00000000000000000000000000000000000000c1");

    fn codec() -> CallCodec {
        CallCodec::parse([
            "function echoUint(uint256 value) view returns (uint256)",
        ])
        .unwrap()
    }

    fn echo_uint(value: u64) -> CallDescriptor {
        CallDescriptor::new(TARGET, "echoUint")
            .with_params(vec![DynSolValue::Uint(U256::from(value), 256)])
    }

    fn uint(value: u64) -> Vec<DynSolValue> {
        vec![DynSolValue::Uint(U256::from(value), 256)]
    }

    // Returns each call's arguments as its result, optionally in reverse.
    #[derive(Default)]
    struct EchoTransport {
        reverse: bool,
        requests: AtomicUsize,
        submitted: Mutex<Vec<EncodedCall>>,
    }

    impl AggregateTransport for EchoTransport {
        async fn aggregate(&self, calls: Vec<EncodedCall>) -> crate::Result<Vec<Bytes>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.submitted.lock().unwrap().extend(calls.iter().cloned());

            let mut results = calls
                .iter()
                .map(|call| Bytes::copy_from_slice(&call.call_data[4..]))
                .collect::<Vec<_>>();
            if self.reverse {
                results.reverse();
            }

            Ok(results)
        }
    }

    struct FailingTransport;

    impl AggregateTransport for FailingTransport {
        async fn aggregate(&self, _calls: Vec<EncodedCall>) -> crate::Result<Vec<Bytes>> {
            Err(MulticallError::Transport("connection refused".to_string()))
        }
    }

    fn scenario() -> Vec<LabelledGroup> {
        vec![
            LabelledGroup::new("A", vec![echo_uint(1), echo_uint(2)]),
            LabelledGroup::new("B", vec![]),
            LabelledGroup::new("C", vec![echo_uint(3)]),
        ]
    }

    #[tokio::test]
    async fn test_labelled_group_multicall() -> Result<()> {
        let codec = codec();
        let transport = EchoTransport::default();

        let result_set = labelled_group_multicall(&transport, &codec, &scenario()).await?;

        assert_eq!(transport.requests.load(Ordering::SeqCst), 1);
        assert_eq!(
            *transport.submitted.lock().unwrap(),
            vec![
                codec.encode(&echo_uint(1))?,
                codec.encode(&echo_uint(2))?,
                codec.encode(&echo_uint(3))?,
            ]
        );

        let mut labels = result_set.labels().collect::<Vec<_>>();
        labels.sort();
        assert_eq!(labels, vec!["A", "C"]);
        assert_eq!(result_set.get("A").unwrap(), [uint(1), uint(2)]);
        assert_eq!(result_set.get("C").unwrap(), [uint(3)]);
        assert_eq!(result_set.get("B"), None);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_group_does_not_shift_later_groups() -> Result<()> {
        let codec = codec();
        let groups = vec![
            LabelledGroup::new("before", vec![echo_uint(1)]),
            LabelledGroup::new("empty", vec![]),
            LabelledGroup::new("after", vec![echo_uint(2), echo_uint(3)]),
        ];
        let without_empty = vec![groups[0].clone(), groups[2].clone()];

        let with = labelled_group_multicall(&EchoTransport::default(), &codec, &groups).await?;
        let without =
            labelled_group_multicall(&EchoTransport::default(), &codec, &without_empty).await?;

        assert_eq!(with, without);
        assert_eq!(with.get("after").unwrap(), [uint(2), uint(3)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_reordering_transport_corrupts_results() -> Result<()> {
        let transport = EchoTransport {
            reverse: true,
            ..Default::default()
        };

        let result_set = labelled_group_multicall(&transport, &codec(), &scenario()).await?;

        // the results are not checked against the request, so reversed
        // return data lands in the wrong groups
        assert_eq!(result_set.get("A").unwrap(), [uint(3), uint(2)]);
        assert_eq!(result_set.get("C").unwrap(), [uint(1)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure_returns_no_results() {
        let result = labelled_group_multicall(&FailingTransport, &codec(), &scenario()).await;

        assert!(matches!(result, Err(MulticallError::Transport(_))));
    }

    #[tokio::test]
    async fn test_encode_failure_skips_transport() {
        let transport = EchoTransport::default();
        let groups = vec![
            LabelledGroup::new("A", vec![echo_uint(1)]),
            LabelledGroup::new("B", vec![CallDescriptor::new(TARGET, "echoUint")]),
        ];

        assert!(matches!(
            labelled_group_multicall(&transport, &codec(), &groups).await,
            Err(MulticallError::Encode { .. })
        ));
        assert_eq!(transport.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_only_empty_groups_skips_transport() -> Result<()> {
        let transport = EchoTransport::default();

        let result_set = labelled_group_multicall(
            &transport,
            &codec(),
            &[LabelledGroup::new("A", vec![]), LabelledGroup::new("B", vec![])],
        )
        .await?;

        assert!(result_set.is_empty());
        assert_eq!(transport.requests.load(Ordering::SeqCst), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_multicall() -> Result<()> {
        let transport = EchoTransport::default();
        let calls = (1..=4).map(echo_uint).collect::<Vec<_>>();

        let results = multicall(&transport, &codec(), &calls).await?;

        assert_eq!(results, vec![uint(1), uint(2), uint(3), uint(4)]);
        assert_eq!(transport.requests.load(Ordering::SeqCst), 1);
        assert!(multicall(&FailingTransport, &codec(), &calls).await.is_err());

        Ok(())
    }
}
