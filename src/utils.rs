//! Small numeric helpers.

pub mod safe_cast;
