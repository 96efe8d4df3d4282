//! Segmented time editors.
//!
//! [`time_field`] holds the editing engine and its two variants,
//! [`time_model`] the parse/format/snap functions shared by both, and
//! [`time_list`] the companion list picker.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod time_field;
pub mod time_list;
pub mod time_model;

pub use crate::time_field::{CountdownField, TimeField, TimeFieldArgs, TimerField};
