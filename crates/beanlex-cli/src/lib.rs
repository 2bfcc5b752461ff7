//! The reference command-line driver for the beanlex parser.
//!
//! This crate is the "outer surface" spec.md §6 explicitly disclaims owning:
//! no CLI, environment variable, or persisted-state handling belongs to the
//! parser core itself. `beanlex-cli` is that surface, realized as a thin
//! binary depending on [`beanlex_core`] and [`beanlex_parser`] the way
//! `rustledger`'s binaries depend on `rustledger-parser`.

#![warn(missing_docs)]

pub mod cli;
pub mod error;
pub mod report;
