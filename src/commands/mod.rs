//! Commands behind the `clink-opencode` binary.

mod normalize;

pub use normalize::*;
