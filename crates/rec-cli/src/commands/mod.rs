//! Subcommand implementations.

pub(crate) mod recommend;
pub(crate) mod transform;
