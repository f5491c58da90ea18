//! Dependency identification and deny-list evaluation.
//!
//! Everything in here is synchronous and free of I/O so it can be exercised
//! without a GitHub connection.

pub mod deny;
pub mod policy;
pub mod title;

pub use deny::{is_denied, DenyRule, Verdict};
pub use policy::{resolve, DenyPolicy, EffectivePolicy};
pub use title::{extract_org, parse_title};
