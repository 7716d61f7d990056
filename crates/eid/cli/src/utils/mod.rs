//! Utility functions and types for the perso CLI

pub mod display;
pub mod reader;
