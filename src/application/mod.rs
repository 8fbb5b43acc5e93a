// Application layer - Use cases over the domain
pub mod aggregator;
pub mod dashboard_service;
pub mod diagnostics;
pub mod normalizer;
pub mod poller;
pub mod reading_repository;
pub mod reading_service;
