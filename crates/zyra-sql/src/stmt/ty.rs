use crate::StorageTypes;

use zyra_core::schema::{self, FlatColumn};

/// Database storage type of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Boolean,

    /// A signed integer of the given byte width.
    Integer(u8),

    Double,
    Decimal { precision: u32, scale: u32 },
    Text,
    VarChar(u64),
    Char(u64),
    Uuid,
    Timestamp,
    Json,

    /// A named enum type declared with `CREATE TYPE`.
    Enum(String),

    /// An enum whose values are listed on the column itself.
    InlineEnum(Vec<String>),
}

impl Type {
    /// Picks the storage type of a physical column.
    ///
    /// `keyed` is true for the primary key column; unique and foreign key
    /// columns are detected from the column itself.
    pub fn from_column(
        flat: &FlatColumn,
        keyed: bool,
        named_enums: bool,
        storage_types: &StorageTypes,
    ) -> Type {
        if flat.is_json() {
            return Type::Json;
        }

        let column = &flat.column;
        let keyed = keyed || column.is_keyed();

        if column.encrypted {
            return if keyed {
                storage_types.keyed_string_type.clone()
            } else {
                storage_types.default_string_type.clone()
            };
        }

        match &column.ty {
            schema::Type::String => {
                let bounded = column
                    .max_len()
                    .zip(storage_types.varchar)
                    .filter(|(len, limit)| len <= limit);

                match bounded {
                    Some((len, _)) => Type::VarChar(len),
                    None if keyed || column.default.is_some() => {
                        storage_types.keyed_string_type.clone()
                    }
                    None => storage_types.default_string_type.clone(),
                }
            }
            schema::Type::Integer => Type::Integer(4),
            schema::Type::BigInt => Type::Integer(8),
            schema::Type::Boolean => Type::Boolean,
            schema::Type::Double => Type::Double,
            schema::Type::Decimal { precision, scale } => Type::Decimal {
                precision: *precision,
                scale: *scale,
            },
            schema::Type::Uuid if storage_types.native_uuid => Type::Uuid,
            schema::Type::Uuid => Type::Char(36),
            schema::Type::Timestamp => Type::Timestamp,
            schema::Type::Enum(descriptor) if named_enums => Type::Enum(descriptor.name.clone()),
            schema::Type::Enum(descriptor) => Type::InlineEnum(descriptor.values.clone()),
            schema::Type::Object | schema::Type::Array => Type::Json,
        }
    }
}
