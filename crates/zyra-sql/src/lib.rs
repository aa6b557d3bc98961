mod capability;
pub use capability::{Capability, StorageTypes};

pub mod migration;
pub use migration::{Migration, Section};

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
