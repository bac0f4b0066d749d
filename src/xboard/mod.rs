//! XBoard-style wire protocol.

mod protocol;

pub use protocol::Protocol;
