use crate::stmt::Type;

/// Describes what a database flavor supports. Statements are lowered from
/// the schema according to these flags.
#[derive(Debug)]
pub struct Capability {
    /// Column storage types supported by the database
    pub storage_types: StorageTypes,

    /// When true, enums are declared once as named types. Otherwise each
    /// enum column lists its values inline.
    pub named_enums: bool,

    /// Supports `ENABLE ROW LEVEL SECURITY` and `CREATE POLICY`.
    pub row_level_security: bool,

    /// Triggers call a separately declared function instead of carrying
    /// their own body.
    pub trigger_functions: bool,

    /// Appended after the closing parenthesis of every `CREATE TABLE`.
    pub table_options: Option<&'static str>,
}

#[derive(Debug)]
pub struct StorageTypes {
    /// The default storage type for a string.
    pub default_string_type: Type,

    /// Storage type for an unbounded string that is a key (primary, unique
    /// or foreign) or has a default value.
    pub keyed_string_type: Type,

    /// When `Some`, strings with a maximum length are stored as varchar up to
    /// the specified limit.
    pub varchar: Option<u64>,

    /// When false, uuids are stored as `CHAR(36)`.
    pub native_uuid: bool,
}

impl Capability {
    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        storage_types: StorageTypes::POSTGRESQL,
        named_enums: true,
        row_level_security: true,
        trigger_functions: true,
        table_options: None,
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        storage_types: StorageTypes::MYSQL,
        named_enums: false,
        row_level_security: false,
        trigger_functions: false,
        table_options: Some("ENGINE=InnoDB DEFAULT CHARSET=utf8mb4"),
    };
}

impl StorageTypes {
    pub const POSTGRESQL: StorageTypes = StorageTypes {
        default_string_type: Type::Text,
        keyed_string_type: Type::Text,

        // TEXT and VARCHAR perform the same in PostgreSQL; lengths are
        // enforced by validation rather than by the column type.
        varchar: None,
        native_uuid: true,
    };

    pub const MYSQL: StorageTypes = StorageTypes {
        default_string_type: Type::Text,

        // TEXT columns cannot be indexed without a prefix length, nor carry
        // a literal default.
        keyed_string_type: Type::VarChar(255),

        // Values in VARCHAR columns are variable-length strings. The length can
        // be specified as a value from 0 to 65,535.
        varchar: Some(65_535),
        native_uuid: false,
    };
}
