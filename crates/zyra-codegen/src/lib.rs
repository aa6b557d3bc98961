//! Text generators for the artifacts that sit next to the SQL migration: ORM
//! schemas for Prisma and Drizzle, a validation schema, native model
//! declarations and sync bucket definitions. Every generator walks the same
//! [`SchemaDescriptor`] and returns the generated file as a string.
//!
//! [`SchemaDescriptor`]: zyra_core::SchemaDescriptor

pub mod drizzle;
pub use drizzle::{Dialect, DrizzleOptions};

pub mod prisma;
pub use prisma::PrismaOptions;

pub mod rust_model;

pub mod sync_rules;
pub use sync_rules::SyncRulesOptions;

mod util;

pub mod zod;
