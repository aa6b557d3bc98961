use super::EnumDescriptor;

/// The logical type of a column. Each SQL flavor maps it to its own storage
/// type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    String,
    Integer,
    BigInt,
    Boolean,
    Double,

    /// Fixed-point decimal with the given precision and scale.
    Decimal { precision: u32, scale: u32 },

    Uuid,
    Timestamp,
    Enum(EnumDescriptor),

    /// Structured value. The column's nested schema, if any, describes the
    /// fields and how they are stored.
    Object,

    /// Ordered list. The column's nested schema, if any, describes the
    /// element.
    Array,
}

impl Type {
    pub fn decimal(precision: u32, scale: u32) -> Self {
        Type::Decimal { precision, scale }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer | Type::BigInt)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Type::Integer | Type::BigInt | Type::Double | Type::Decimal { .. }
        )
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Type::Object | Type::Array)
    }

    pub fn as_enum(&self) -> Option<&EnumDescriptor> {
        match self {
            Type::Enum(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}
