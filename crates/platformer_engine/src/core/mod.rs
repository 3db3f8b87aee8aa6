//! Core engine infrastructure
//!
//! Houses the unified configuration types shared by every subsystem.

pub mod config;
