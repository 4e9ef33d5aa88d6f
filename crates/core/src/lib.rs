//! Domain logic for the portfolio showcase.
//!
//! Everything in this crate is pure: no I/O, no async, no global state.
//! The data layer feeds raw records in, the presentation layer reads
//! normalized [`project::Project`] values out.

pub mod error;
pub mod form;
pub mod grid;
pub mod icons;
pub mod modal;
pub mod project;
pub mod roles;
pub mod types;
