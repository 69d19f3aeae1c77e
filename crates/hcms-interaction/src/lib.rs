//! HTTP implementation of the HCMS backend ports.
//!
//! [`HttpHospitalClient`] implements every API trait from
//! `hcms_core::api` over `reqwest`. URL construction lives in
//! [`endpoints`] and response normalisation in [`response`]; both are pure
//! and tested without a network.

mod appointment;
mod auth;
mod client;
mod doctor;
pub mod endpoints;
mod patient;
mod prescription;
pub mod response;

pub use client::{ClientConfig, HttpHospitalClient};
pub use endpoints::Endpoints;
