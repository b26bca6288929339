//! Platform path resolution.

pub mod paths;
