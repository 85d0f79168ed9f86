//! Application layer - service coordination over the extraction core.

pub mod fare_service;

pub use fare_service::FareScrapeService;
