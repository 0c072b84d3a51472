use thiserror::Error;

/// Failure reaching or executing a call on the grant authority.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteCallFault {
    /// The authority could not be reached (dead peer, broken transport).
    #[error("Grant authority unreachable: {0}")]
    Unreachable(String),

    /// The authority received the call but refused or failed it.
    #[error("Grant authority rejected call: {0}")]
    Rejected(String),
}
