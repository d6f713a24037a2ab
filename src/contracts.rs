//! ABI surface of the on-chain contracts this crate talks to.

use alloy::sol;

sol! {
    /// Batch executor. Executes the packed transaction records atomically;
    /// the wallet reaches it through a delegate call.
    interface IMultiSend {
        function multiSend(bytes memory transactions) external payable;
    }

    /// Helper contract invoked in a delegated context to measure execution
    /// gas for a single wallet operation.
    interface ISimulateTxAccessor {
        function simulate(address to, uint256 value, bytes calldata data, uint8 operation)
            external
            returns (uint256 estimate, bool success, bytes memory returnData);
    }

    /// Wallet-side entry point that delegate-calls into a target and then
    /// reverts with the target's result, so the data survives call contexts
    /// that would swallow a normal return value.
    interface ISafe {
        function simulateAndRevert(address targetContract, bytes calldata calldataPayload) external;
    }
}
