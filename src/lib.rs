//! Fare Scout - airline fare extraction from rendered booking pages
//!
//! The core is the extraction pipeline: selector cascades locate
//! fare-bearing elements across markup variants, free-text fragments parse
//! into typed fields, and partial fallback sources reconcile into a single
//! result set. Page acquisition, URL assembly and console output are thin
//! orchestration around it.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
