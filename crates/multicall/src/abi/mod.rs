pub mod multicall3;
