//! CLI command implementations

pub mod down;
pub mod seed;
pub mod status;
pub mod up;
