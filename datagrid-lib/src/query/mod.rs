//! Query state and the reducer that advances it.
//!
//! ```text
//! QueryState + QueryAction  →  reduce()  →  new QueryState
//! ```
//!
//! A `QueryState` is never changed in place. Each action yields a fresh
//! snapshot, so a caller driving the grid from an event loop never observes a
//! half-applied change, and two grids never share mutable state.

mod action;
mod state;

pub use action::Concern;
pub use action::QueryAction;
pub use state::QueryState;
