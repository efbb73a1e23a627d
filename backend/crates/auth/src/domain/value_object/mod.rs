//! Value Object Module

pub mod token_claims;
