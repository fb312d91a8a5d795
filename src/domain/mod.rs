//! # Domain Layer
//!
//! The domain layer contains the core business model of the voting service.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate their own invariants (dish ownership, display order)

pub mod entities;

// Re-export commonly used types
pub use entities::*;
