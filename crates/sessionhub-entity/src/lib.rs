//! # sessionhub-entity
//!
//! Domain entity models for SessionHub. [`session::SessionRecord`] is the
//! persisted document; the remaining types are value objects attached to
//! it or derived from it.

pub mod session;
