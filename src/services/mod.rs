//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own sanitization and persistence so route handlers stay
//! focused on protocol translation.

pub mod persistence;
