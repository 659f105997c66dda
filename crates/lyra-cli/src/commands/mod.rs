//! Command implementations for the Lyra CLI

#![allow(unreachable_pub)]

pub mod check;
pub mod run;
