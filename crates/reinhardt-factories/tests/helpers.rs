//! Test helpers for reinhardt-factories integration tests.
//!
//! This module provides an in-process ORM double and a project directory
//! builder for definition files.

#[path = "helpers/orm.rs"]
pub mod orm;

#[path = "helpers/project.rs"]
pub mod project;
