//! Domain logic for the Lectern course marketplace.
//!
//! Pure types and rules with no database or HTTP dependencies: the
//! curriculum tree, the authoring workflow, publish/draft validation, rating
//! aggregates, and the course authorization policy.

pub mod account;
pub mod course;
pub mod curriculum;
pub mod enrollment;
pub mod error;
pub mod notes;
pub mod pagination;
pub mod policy;
pub mod rating;
pub mod roles;
pub mod types;
pub mod workflow;
