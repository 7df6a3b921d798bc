//! HTTP adapter for stored websites.
//!
//! - `GET /api/websites` - list the caller's websites
//! - `POST /api/websites` - store a generated website
//! - `GET /api/websites/:id` - fetch one website
//! - `DELETE /api/websites/:id` - delete a website and its analytics
//! - `POST /api/websites/:id/pages` - add a page
//! - `PUT /api/websites/:id/pages/:index` - replace a page's HTML (AI iteration)
//! - `GET /api/websites/:id/export/:format` - download the website

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::website_routes;
