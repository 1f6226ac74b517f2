//! Command line tool for decoding and signing Thor transactions.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod cli;
pub mod commands;
