use crate::{
    abi::multicall3::{self, multicall_tx_request},
    BlockId, EncodedCall, MulticallError, Result,
};

use alloy::{
    primitives::{Address, Bytes},
    providers::Provider,
    sol_types::SolCall,
};

use std::future::Future;
use tracing::{debug, instrument};

/// Executes a batch of calls in a single round trip.
///
/// Implementations must return exactly one result per submitted call, in
/// submission order. Results are never reordered or checked against the
/// request afterwards, so a transport that reorders silently corrupts the
/// decoded output.
pub trait AggregateTransport {
    fn aggregate(&self, calls: Vec<EncodedCall>) -> impl Future<Output = Result<Vec<Bytes>>> + Send;
}

/// Sends the batch as one `aggregate3` eth_call to a Multicall3 contract.
pub struct Multicall3Transport<P> {
    provider: P,
    multicall_address: Address,
    block_id: BlockId,
}

impl<P: Provider> Multicall3Transport<P> {
    pub fn new(provider: P) -> Self {
        Self::with_address(provider, multicall3::MULTICALL3_ADDRESS)
    }

    pub fn with_address(provider: P, multicall_address: Address) -> Self {
        Self {
            provider,
            multicall_address,
            block_id: BlockId::Latest,
        }
    }

    pub fn at_block(mut self, block_id: BlockId) -> Self {
        self.block_id = block_id;
        self
    }

    pub fn multicall_address(&self) -> &Address {
        &self.multicall_address
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }
}

impl<P: Provider> AggregateTransport for Multicall3Transport<P> {
    #[instrument(skip_all, fields(calls_count = calls.len(), block_id = %self.block_id))]
    async fn aggregate(&self, calls: Vec<EncodedCall>) -> Result<Vec<Bytes>> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let calls_count = calls.len();
        let tx = multicall_tx_request(
            self.multicall_address,
            calls.into_iter().map(Into::into).collect(),
        );

        let res = self
            .provider
            .call(tx)
            .block(self.block_id.into())
            .await
            .map_err(|err| MulticallError::Transport(format!("multicall call failed: {err}")))?;

        let results = multicall3::aggregate3Call::abi_decode_returns(res.as_ref()).map_err(|err| {
            MulticallError::Transport(format!("failed to abi decode multicall: {err}"))
        })?;

        if results.len() != calls_count {
            return Err(MulticallError::Transport(format!(
                "multicall returned {} results for {} calls",
                results.len(),
                calls_count
            )));
        }

        debug!(results_count = results.len(), "multicall complete");

        results
            .into_iter()
            .enumerate()
            .map(|(idx, result)| {
                if result.success {
                    Ok(result.returnData)
                } else {
                    Err(MulticallError::Transport(format!("call {idx} reverted")))
                }
            })
            .collect()
    }
}
