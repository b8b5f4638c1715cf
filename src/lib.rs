pub mod config;
pub mod domain;
pub mod mailer;
pub mod repository;
pub mod seed;
pub mod telemetry;
pub mod usecase;
