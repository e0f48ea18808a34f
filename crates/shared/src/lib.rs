//! Wire and domain types shared by the HDP quick start client and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod status;
