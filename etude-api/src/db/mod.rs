//! Database access layer: catalog lookups and the practice state stores

pub mod catalog;
pub mod favorites;
pub mod history;
pub mod overrides;
pub mod proficiency;
