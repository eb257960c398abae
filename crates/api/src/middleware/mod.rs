//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the caller if a token was sent, for public routes.
//! - [`rbac`] -- role gates: admin, instructor, student.
//!
//! Course-scoped decisions (ownership, enrollment) are not made here; see
//! `lectern_core::policy`.

pub mod auth;
pub mod rbac;
