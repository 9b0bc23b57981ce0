//! Reusable view components.

pub mod evidence_map;
