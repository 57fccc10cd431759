//! Command implementations

pub mod detect;
pub mod release;
pub mod stage;
