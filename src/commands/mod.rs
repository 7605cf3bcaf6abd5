//! Command implementations for the weft CLI

pub mod check_in;
pub mod release;
