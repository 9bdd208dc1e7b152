use alloy::{
    network::TransactionBuilder,
    primitives::{address, Address},
    rpc::types::eth::TransactionRequest,
    sol,
    sol_types::SolCall,
};

/// Multicall3 is deployed at the same address on every supported chain.
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Call3 {
        // Target contract to call.
        address target;
        // If false, the entire call will revert if the call fails.
        bool allowFailure;
        // Data to call on the target contract.
        bytes callData;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Result {
        // True if the call succeeded, false otherwise.
        bool success;
        // Return data if the call succeeded, or revert data if the call reverted.
        bytes returnData;
    }

    /// @notice Aggregate calls, ensuring each returns success if required
    /// @param calls An array of Call3 structs
    /// @return returnData An array of Result structs
    function aggregate3(Call3[] calldata calls) public payable returns (Result[] memory returnData);
}

pub fn multicall_tx_request(multicall_address: Address, calls: Vec<Call3>) -> TransactionRequest {
    let data = aggregate3Call { calls }.abi_encode();
    TransactionRequest::default()
        .with_to(multicall_address)
        .with_input(data)
}
