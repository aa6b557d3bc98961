use super::{
    constraint::{ConstraintIntRange, ConstraintLength, ConstraintPattern, ConstraintRange},
    Constraint, EnumDescriptor, ForeignKeyAction, ForeignKeyReference, Format, LetterCase,
    ManyToManyMarker, NestedFieldSchema, Parity, Sign, StorageStrategy, Type, Value,
};

/// Describes one column of a table.
///
/// Descriptors are built fluently: each modifier consumes the descriptor and
/// returns the modified copy.
///
/// ```
/// use zyra_core::schema::{ColumnDescriptor, ForeignKeyAction};
///
/// let author = ColumnDescriptor::uuid("author_id")
///     .references("users")
///     .on_delete(ForeignKeyAction::Cascade);
///
/// assert_eq!(author.foreign_key.unwrap().table, "users");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// The name of the column in the database.
    pub name: String,

    pub ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    pub unique: bool,

    /// Values are encrypted by the client before storage, so the database
    /// only ever sees text.
    pub encrypted: bool,

    pub default: Option<DefaultValue>,

    /// Raw SQL boolean expression for a `CHECK` constraint.
    pub check: Option<String>,

    pub foreign_key: Option<ForeignKeyReference>,

    /// Shape of structured (object or array) columns.
    pub nested: Option<Box<NestedFieldSchema>>,

    /// Validation constraints.
    pub constraints: Vec<Constraint>,

    pub(crate) many_to_many: Option<Box<ManyToManyMarker>>,
}

/// The default value of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// The current time at insertion.
    Now,

    Value(Value),

    /// Raw SQL, emitted verbatim.
    Sql(String),
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            unique: false,
            encrypted: false,
            default: None,
            check: None,
            foreign_key: None,
            nested: None,
            constraints: vec![],
            many_to_many: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, Type::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, Type::Integer)
    }

    pub fn bigint(name: impl Into<String>) -> Self {
        Self::new(name, Type::BigInt)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, Type::Boolean)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, Type::Double)
    }

    pub fn decimal(name: impl Into<String>, precision: u32, scale: u32) -> Self {
        Self::new(name, Type::decimal(precision, scale))
    }

    /// A uuid column. Values are also validated as UUIDs.
    pub fn uuid(name: impl Into<String>) -> Self {
        Self::new(name, Type::Uuid).format(Format::Uuid)
    }

    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, Type::Timestamp)
    }

    pub fn enumeration(name: impl Into<String>, descriptor: EnumDescriptor) -> Self {
        Self::new(name, Type::Enum(descriptor))
    }

    /// A structured column with the given fields, stored as JSON unless a
    /// different strategy is chosen with [`strategy`](Self::strategy).
    pub fn object(name: impl Into<String>, fields: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        Self::new(name, Type::Object).nested(NestedFieldSchema::object(fields))
    }

    /// A list column. The element's name is only used for the `value`
    /// column of separate-table storage and may be anything.
    pub fn array(name: impl Into<String>, element: ColumnDescriptor) -> Self {
        Self::new(name, Type::Array).nested(NestedFieldSchema::array(element))
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_now(mut self) -> Self {
        self.default = Some(DefaultValue::Now);
        self
    }

    pub fn default_sql(mut self, sql: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Sql(sql.into()));
        self
    }

    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.check = Some(expr.into());
        self
    }

    /// References the `id` column of `table`. On delete the column is set to
    /// null, on update the change cascades.
    pub fn references(self, table: impl Into<String>) -> Self {
        self.foreign_key(ForeignKeyReference::new(table))
    }

    pub fn references_column(self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_key(ForeignKeyReference::to_column(table, column))
    }

    pub fn foreign_key(mut self, foreign_key: ForeignKeyReference) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    /// Sets the delete action of the column's foreign key. Has no effect on
    /// columns without one.
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        if let Some(foreign_key) = &mut self.foreign_key {
            foreign_key.on_delete = action;
        }
        self
    }

    /// Sets the update action of the column's foreign key. Has no effect on
    /// columns without one.
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        if let Some(foreign_key) = &mut self.foreign_key {
            foreign_key.on_update = action;
        }
        self
    }

    pub fn nested(mut self, nested: NestedFieldSchema) -> Self {
        self.nested = Some(Box::new(nested));
        self
    }

    /// Sets how the column's nested structure is stored. Has no effect on
    /// columns without one.
    pub fn strategy(mut self, strategy: StorageStrategy) -> Self {
        self.nested = self
            .nested
            .map(|nested| Box::new(nested.with_strategy(strategy)));
        self
    }

    pub fn flattened(self) -> Self {
        self.strategy(StorageStrategy::flattened())
    }

    pub fn flattened_with_prefix(self, prefix: impl Into<String>) -> Self {
        self.strategy(StorageStrategy::Flattened {
            prefix: Some(prefix.into()),
        })
    }

    pub fn inline_json(self) -> Self {
        self.strategy(StorageStrategy::InlineJson)
    }

    /// Declares a many-to-many relationship with `target_table`.
    pub fn belongs_to_many(self, target_table: impl Into<String>) -> Self {
        self.many_to_many(ManyToManyMarker::new(target_table))
    }

    pub fn many_to_many(mut self, marker: ManyToManyMarker) -> Self {
        self.many_to_many = Some(Box::new(marker));
        self
    }

    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    pub fn min_length(self, min: u64) -> Self {
        self.constraint(ConstraintLength {
            min: Some(min),
            ..Default::default()
        })
    }

    pub fn max_length(self, max: u64) -> Self {
        self.constraint(ConstraintLength {
            max: Some(max),
            ..Default::default()
        })
    }

    pub fn length(self, exact: u64) -> Self {
        self.constraint(ConstraintLength {
            exact: Some(exact),
            ..Default::default()
        })
    }

    pub fn min(self, min: f64) -> Self {
        self.constraint(ConstraintRange {
            min: Some(min),
            max: None,
        })
    }

    pub fn max(self, max: f64) -> Self {
        self.constraint(ConstraintRange {
            min: None,
            max: Some(max),
        })
    }

    pub fn int_min(self, min: i64) -> Self {
        self.constraint(ConstraintIntRange {
            min: Some(min),
            max: None,
        })
    }

    pub fn int_max(self, max: i64) -> Self {
        self.constraint(ConstraintIntRange {
            min: None,
            max: Some(max),
        })
    }

    pub fn positive(self) -> Self {
        self.constraint(Constraint::Sign(Sign::Positive))
    }

    pub fn negative(self) -> Self {
        self.constraint(Constraint::Sign(Sign::Negative))
    }

    pub fn even(self) -> Self {
        self.constraint(Constraint::Parity(Parity::Even))
    }

    pub fn odd(self) -> Self {
        self.constraint(Constraint::Parity(Parity::Odd))
    }

    pub fn pattern(self, regex: impl Into<String>) -> Self {
        self.constraint(Constraint::pattern(regex))
    }

    pub fn pattern_with_message(self, regex: impl Into<String>, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Pattern(ConstraintPattern {
            regex: regex.into(),
            message: Some(message.into()),
        }))
    }

    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.constraint(Constraint::StartsWith(prefix.into()))
    }

    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.constraint(Constraint::EndsWith(suffix.into()))
    }

    pub fn includes(self, needle: impl Into<String>) -> Self {
        self.constraint(Constraint::Includes(needle.into()))
    }

    pub fn uppercase(self) -> Self {
        self.constraint(Constraint::Case(LetterCase::Upper))
    }

    pub fn lowercase(self) -> Self {
        self.constraint(Constraint::Case(LetterCase::Lower))
    }

    /// Restricts the column to a well-known format. Adding the same format
    /// twice is a no-op.
    pub fn format(self, format: Format) -> Self {
        if self.has_format(format) {
            return self;
        }
        self.constraint(Constraint::Format(format))
    }

    pub fn email(self) -> Self {
        self.format(Format::Email)
    }

    pub fn url(self) -> Self {
        self.format(Format::Url)
    }

    pub fn http_url(self) -> Self {
        self.format(Format::HttpUrl)
    }

    /// Validates values with the rule registered under `rule`.
    pub fn custom(self, rule: impl Into<String>, message: impl Into<String>) -> Self {
        self.constraint(Constraint::custom(rule, message))
    }

    /// Returns a copy of the column under a different name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn enum_ref(&self) -> Option<&EnumDescriptor> {
        self.ty.as_enum()
    }

    pub fn many_to_many_marker(&self) -> Option<&ManyToManyMarker> {
        self.many_to_many.as_deref()
    }

    pub fn has_format(&self, format: Format) -> bool {
        self.constraints
            .iter()
            .any(|constraint| constraint.as_format() == Some(format))
    }

    /// The tightest maximum length declared by the column's length
    /// constraints.
    pub fn max_len(&self) -> Option<u64> {
        self.constraints
            .iter()
            .filter_map(Constraint::as_length)
            .filter_map(ConstraintLength::upper_bound)
            .min()
    }

    /// Whether the column is used as a key: unique or a foreign key.
    pub fn is_keyed(&self) -> bool {
        self.unique || self.foreign_key.is_some()
    }

    pub(crate) fn take_many_to_many(&mut self) -> Option<ManyToManyMarker> {
        self.many_to_many.take().map(|marker| *marker)
    }
}
