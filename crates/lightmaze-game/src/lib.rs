//! Game rules for lightmaze: the authoritative session aggregate and the
//! pure functions that read and advance it.
//!
//! # Key types
//!
//! - [`SessionStore`] — single owner of the mutable [`SessionState`]; every
//!   write funnels through [`SessionStore::apply`]
//! - [`project`] — derives the per-role [`View`] of the session (the guide
//!   sees walls, movers see masked floor, the admin sees stage metadata)
//! - [`apply_move`] / [`set_stage`] / [`restart`] — the movement and
//!   progression reducer
//! - [`StageSet`] — the ordered maze templates a session progresses through
//!
//! Nothing in this crate does I/O. The session actor in the server crate
//! owns a `SessionStore` and calls in here; that single ownership is the
//! serialization boundary that keeps transitions from interleaving.

mod config;
mod error;
mod grid;
mod project;
mod reducer;
mod stage;
mod state;

pub use config::{GameConfig, HazardPolicy, Offset};
pub use error::{GameError, TemplateError};
pub use grid::Grid;
pub use project::{AdminView, FullView, MoverView, View, project};
pub use reducer::{MoveOutcome, apply_move, restart, set_stage};
pub use stage::{StageSet, StageTemplate};
pub use state::{SessionState, SessionStore};
