//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Groq chat completions, plus a scripted mock
//! - `auth` - bcrypt password hashing and JWT sessions
//! - `document` - DOCX and PDF renderers
//! - `http` - axum REST API
//! - `memory` - In-process stores
//! - `postgres` - sqlx-backed stores

pub mod ai;
pub mod auth;
pub mod document;
pub mod http;
pub mod memory;
pub mod postgres;
