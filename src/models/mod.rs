pub mod policy;
pub mod rule;

pub use policy::Policy;
pub use rule::{ClarifiedRule, Rule};
