//! Test helpers module
//!
//! This module provides utilities for testing the localization subsystem:
//! a mock locales server and ready-made pages, dictionaries and storage.

#![allow(dead_code)]

pub mod locales_mock;
pub mod test_data;

pub use locales_mock::*;
pub use test_data::*;
