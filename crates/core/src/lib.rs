//! Contracts for the drop permission grant authority.
//!
//! The authority lives out of process. Everything here is the client-side
//! view of it: the calls it accepts, the tokens it hands out, and the single
//! fault kind it can produce.

pub mod error;
pub mod event;
pub mod remote;
pub mod token;

pub use error::RemoteCallFault;
pub use event::DragEvent;
pub use remote::{DropGrant, OwnerScopes};
pub use token::OwnerToken;
