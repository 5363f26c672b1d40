//! # Warden Core
//!
//! The domain layer of the Warden admin backend.
//! This crate contains entities, ports and services with zero infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod service;

pub use error::DomainError;
