//! Database module: the document store behind the matching service.
//!
//! The store is an external collaborator reached through the Repository
//! pattern, so storage backends can be swapped without touching the matcher
//! or the HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Orchestration             │
//! │  - Roster registration                                   │
//! │  - Availability replace/fetch                            │
//! │  - Matching runs (load → match → persist)                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! **Use the service layer:**
//! ```ignore
//! use tutormatch::db::{factory::RepositoryFactory, services};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!     let teachers = services::list_teachers(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// ==================== Service Layer ====================

pub use services::{
    fetch_student_month, fetch_teacher_availability, generate_assignments, health_check,
    list_students, list_teachers, matched_for_teacher, register_student, register_teacher,
    replace_student_month, replace_teacher_availability,
};

// ==================== Repository Pattern Exports ====================

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    AssignmentRepository, AvailabilityRepository, ErrorContext, FullRepository, RepositoryError,
    RepositoryResult, RosterRepository,
};
