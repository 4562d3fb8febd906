//! Button-driven menu
//!
//! A small fixed state machine: banner, item list, and one page per
//! item. Presses produce display [`Action`]s; periodic ticks on a page
//! produce [`Refresh`] requests that the caller fulfils with live data.

pub mod items;
pub mod machine;

pub use items::MenuItem;
pub use machine::{Action, Actions, Menu, Refresh, State};
