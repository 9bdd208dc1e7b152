//! Batches read-only contract calls from many labelled groups into a single
//! Multicall3 round trip and routes the decoded results back to their groups.

pub use assemble::{assemble, ResultSet};
pub use block_id::BlockId;
pub use breakpoint::BreakpointMap;
pub use call::{CallDescriptor, EncodedCall, LabelledGroup};
pub use codec::CallCodec;
pub use error::{MulticallError, Result};
pub use flatten::{flatten, FlatCallSet};
pub use multicall::{labelled_group_multicall, multicall};
pub use transport::{AggregateTransport, Multicall3Transport};

mod assemble;
mod block_id;
mod breakpoint;
mod call;
mod codec;
mod error;
mod flatten;
mod multicall;
mod transport;

pub mod abi;
