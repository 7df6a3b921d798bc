//! Sento - prompt-to-website generation service.
//!
//! Users describe a website in prose and receive a complete HTML document.
//! Subscription tiers gate monthly generations, stored projects, pages, AI
//! iterations, export formats and analytics; Stripe handles checkout.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
