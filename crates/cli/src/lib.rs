//! install-type1 CLI library.

pub mod cli;
