//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing the clinic's records
//! - `ports`: Trait definitions for persistence
//!
//! Appointments reference doctors and patients by identity only. Deleting
//! a doctor or patient leaves its appointments in place.

pub mod entities;
pub mod ports;
