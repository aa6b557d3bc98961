use super::Error;

/// A foreign key references a column other than the target table's primary
/// key.
///
/// Schemas are build-time configuration, so this is reported as soon as the
/// schema is constructed and there is no fallback.
#[derive(Debug)]
pub(super) struct InvalidForeignKey {
    table: Box<str>,
    column: Box<str>,
    referenced_table: Box<str>,
    referenced_column: Box<str>,
    primary_key: Box<str>,
}

impl std::error::Error for InvalidForeignKey {}

impl core::fmt::Display for InvalidForeignKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "invalid foreign key: `{}.{}` references `{}.{}`, but the primary key of `{}` is `{}`; \
             reference `{}` instead or declare `{}` as the primary key of `{}`",
            self.table,
            self.column,
            self.referenced_table,
            self.referenced_column,
            self.referenced_table,
            self.primary_key,
            self.primary_key,
            self.referenced_column,
            self.referenced_table,
        )
    }
}

impl Error {
    /// Creates an invalid foreign key error.
    pub fn invalid_foreign_key(
        table: &str,
        column: &str,
        referenced_table: &str,
        referenced_column: &str,
        primary_key: &str,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidForeignKey(InvalidForeignKey {
            table: table.into(),
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
            primary_key: primary_key.into(),
        }))
    }

    /// Returns `true` if this error is an invalid foreign key error.
    pub fn is_invalid_foreign_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidForeignKey(_))
    }
}
