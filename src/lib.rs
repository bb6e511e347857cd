//! Classroom Router - Rust Implementation
//!
//! Client-side routing and state bootstrap for the student/teacher
//! management web app.
//!
//! This library provides:
//! - A declarative route table with nested destinations and a catch-all
//! - Per-entity guards that probe the API before detail pages render
//! - Global hooks that warm up the entity stores and drive a progress bar
//! - HTTP-backed entity stores (reqwest, works natively and in WASM)
//! - Web UI shell (Dioxus + Tailwind CSS)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI shell (shared between native preview and WASM client)
pub mod app;

pub mod config;
pub mod error;
pub mod history;
pub mod network;
pub mod progress;
pub mod router;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use classroom_model as model;
pub use error::{NavigationError, RouteError, StoreError};
pub use router::{Location, NavigationTarget, Navigator, Router};
