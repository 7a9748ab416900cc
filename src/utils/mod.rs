//! Small shared helpers that do not belong to any single layer.

pub mod code_generator;
