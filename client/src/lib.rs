//! Client-side pipeline for the enrollment program.
//!
//! Loads a signing identity, derives the program's accounts, builds instructions, assembles and
//! signs transactions, and submits them to a cluster.

pub mod config;
pub mod connection;
pub mod e2e_helpers;
pub mod error;
pub mod instructions;
pub mod keys;
pub mod logs;
pub mod pda;
pub mod pipeline;
pub mod submit;
pub mod transactions;

pub use logs::LogColor;
