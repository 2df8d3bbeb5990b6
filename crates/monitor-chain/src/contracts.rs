use alloy::sol;

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    contract SwarmCoordinator {
        function getEoa(string[] peerIds) external view returns (address[] memory);
    }
);
