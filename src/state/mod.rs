//! Client-side note state.
//!
//! One [`NoteCollection`] per view, parameterised by [`Scope`]: the home view
//! uses `Scope::Active`, the archive view `Scope::Archived`. Both share the
//! same selection, search and reconciliation logic and differ only in the
//! actions [`available_actions`] offers.
//!
//! [`Scope`]: crate::models::Scope

mod busy;
mod collection;
mod editor;

pub use busy::Busy;
pub use collection::*;
pub use editor::*;
