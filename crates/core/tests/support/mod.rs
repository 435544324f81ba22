//! Shared test helpers for `slotwise-core` integration tests.
//!
//! Fixed reference instants and lightweight in-memory mocks so the tests can
//! focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod calendar;
pub mod fixtures;
