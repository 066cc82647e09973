//! Domain types and rules shared by every computer manager crate.

pub mod alert;
pub mod computer;
pub mod error;
