//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and helpers for 2D gameplay
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
