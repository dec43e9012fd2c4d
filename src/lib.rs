//! # Tutormatch Backend
//!
//! Tutoring slot assignment backend: matches teacher availability against
//! student availability and preference for a single calendar month.
//!
//! The matching core converts two independent sets of availability records
//! into a conflict-free set of (teacher, student, day, time) assignments,
//! with an incremental-update rule that lets repeated runs extend an existing
//! assignment set without reassigning already-scheduled slots. Everything
//! around it — rosters, availability storage, HTTP routing, persistence — is
//! thin orchestration over an abstract document store.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Domain types shared across the crate (ids, slots, assignments)
//! - [`models`]: Calendar types (`YearMonth`)
//! - [`matcher`]: The matching core — pure functions, no I/O
//! - [`db`]: Repository traits, the in-memory store, and the service layer
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod db;
pub mod matcher;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

use db::repository::FullRepository;
use db::RepositoryFactory;

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton for the selected backend.
#[cfg(feature = "local-repo")]
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_env()
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
