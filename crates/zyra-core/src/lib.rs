mod diagnostics;
pub use diagnostics::{Diagnostics, Warning};

mod error;
pub use error::Error;

pub mod rls;

pub mod schema;
pub use schema::SchemaDescriptor;

pub mod validate;

/// A Result type alias that uses Zyra's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
