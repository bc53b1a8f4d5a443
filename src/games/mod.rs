//! Game implementations.

pub mod dominoes;
