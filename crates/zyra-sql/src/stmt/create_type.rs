use super::Statement;

use zyra_core::schema::EnumDescriptor;

/// `CREATE TYPE ... AS ENUM`. PostgreSQL only.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateType {
    pub name: String,
    pub values: Vec<String>,
}

impl Statement {
    pub fn create_type(descriptor: &EnumDescriptor) -> Self {
        CreateType {
            name: descriptor.name.clone(),
            values: descriptor.values.clone(),
        }
        .into()
    }
}

impl From<CreateType> for Statement {
    fn from(value: CreateType) -> Self {
        Self::CreateType(value)
    }
}
