#![deny(unsafe_code)]

pub mod context;
pub mod options;
pub mod pipeline;
pub mod rule;
pub mod rules;

pub use context::RuleContext;
pub use options::DeriveOptions;
pub use pipeline::PostProcessor;
pub use rule::DerivationRule;
