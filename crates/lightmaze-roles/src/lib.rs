//! Role-claim management for lightmaze.
//!
//! A role is an exclusively owned claim: at most one connected client holds
//! a given role at any time. This crate tracks who holds what, and hands
//! roles back to the unclaimed pool on an explicit leave or a disconnect.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session actor (above)  ← consults claims to gate every intent
//!     ↕
//! Role layer (this crate)  ← claim / release / occupancy
//!     ↕
//! Protocol layer (below)  ← provides Role, ClientId
//! ```

mod error;
mod registry;

pub use error::RoleError;
pub use registry::RoleRegistry;
