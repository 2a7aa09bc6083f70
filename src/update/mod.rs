//! Partial-update expression builder
//!
//! Builds the single SET mutation sent for an update request.
//!
//! # Guarantees
//!
//! - Exactly the supplied, declared attributes are assigned
//! - The identity key is never assigned
//! - Values are bound through placeholders, never inlined
//! - An empty mutation is never produced

mod directive;

pub use directive::{Clause, DirectiveError, MutationDirective, PLACEHOLDER_PREFIX};
