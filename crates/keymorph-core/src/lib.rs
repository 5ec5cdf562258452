//! Deterministic password remapping engine.
//!
//! Derives a policy-compliant password from a memorable base password and a
//! master key. The same pair always reproduces the same output and nothing is
//! stored. Zero I/O, zero async: the shell crate owns presentation.
//!
//! This is obfuscation for convenience, not a cryptographic primitive.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod locale;
pub mod pools;

pub mod seed;
pub mod sequence;

pub mod risk;

pub mod password;

pub mod policy;

pub use error::EngineError;
pub use locale::Language;
pub use password::{
    generate, generate_detailed, remap, repair, Generation, MAX_REPAIR_ATTEMPTS, MIN_PASSWORD_LENGTH,
};
pub use policy::{evaluate, validate_with, ValidationReport};
pub use pools::CharClass;
pub use risk::{find_risks, Risk, RiskKind, RISK_WINDOW};
pub use seed::derive_seed;
pub use sequence::{Draws, Mulberry32};
