//! Integration tests driving the HTTP router against the in-memory store.

mod helpers;

mod health_test;
mod session_test;
