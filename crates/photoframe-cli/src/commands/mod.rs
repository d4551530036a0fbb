//! Command handlers grouped by backend concern.

pub(crate) mod settings;
pub(crate) mod status;
