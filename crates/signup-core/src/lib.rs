//! # Signup Core
//!
//! The domain layer of the signup service.
//! Holds the `User` entity, the field validation rules and the ports that
//! infrastructure implements. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
