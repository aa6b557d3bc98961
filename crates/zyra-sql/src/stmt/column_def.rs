use super::Type;
use crate::Capability;

use zyra_core::schema::{DefaultValue, FlatColumn};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,

    /// Raw `CHECK` expression
    pub check: Option<String>,
}

impl ColumnDef {
    pub(crate) fn from_schema(flat: &FlatColumn, primary_key: bool, capability: &Capability) -> ColumnDef {
        let column = &flat.column;

        ColumnDef {
            name: column.name.clone(),
            ty: Type::from_column(
                flat,
                primary_key,
                capability.named_enums,
                &capability.storage_types,
            ),
            not_null: primary_key || !column.nullable,
            unique: column.unique && !primary_key,
            default: column.default.clone(),
            check: column.check.clone(),
        }
    }
}
