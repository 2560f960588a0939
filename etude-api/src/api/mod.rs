//! HTTP API layer — thin request/response plumbing over the stores

pub mod catalog;
pub mod favorites;
pub mod health;
pub mod history;
pub mod overrides;
pub mod proficiency;
pub mod recommend;
