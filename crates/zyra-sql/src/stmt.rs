mod add_foreign_key;
pub use add_foreign_key::AddForeignKey;

mod column_def;
pub use column_def::ColumnDef;

mod create_function;
pub use create_function::CreateFunction;

mod create_index;
pub use create_index::CreateIndex;

mod create_policy;
pub use create_policy::CreatePolicy;

mod create_table;
pub use create_table::CreateTable;

mod create_trigger;
pub use create_trigger::CreateTrigger;

mod create_type;
pub use create_type::CreateType;

mod enable_rls;
pub use enable_rls::EnableRls;

mod insert;
pub use insert::Insert;

mod ty;
pub use ty::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    AddForeignKey(AddForeignKey),
    CreateFunction(CreateFunction),
    CreateIndex(CreateIndex),
    CreatePolicy(CreatePolicy),
    CreateTable(CreateTable),
    CreateTrigger(CreateTrigger),
    CreateType(CreateType),
    EnableRls(EnableRls),
    Insert(Insert),
}

impl Statement {
    /// The table the statement operates on. `None` for enum types and
    /// trigger functions.
    pub fn table(&self) -> Option<&str> {
        match self {
            Statement::AddForeignKey(stmt) => Some(&stmt.table),
            Statement::CreateIndex(stmt) => Some(&stmt.on),
            Statement::CreatePolicy(stmt) => Some(&stmt.on),
            Statement::CreateTable(stmt) => Some(&stmt.name),
            Statement::CreateTrigger(stmt) => Some(&stmt.on),
            Statement::EnableRls(stmt) => Some(&stmt.table),
            Statement::Insert(stmt) => Some(&stmt.table),
            Statement::CreateFunction(_) | Statement::CreateType(_) => None,
        }
    }
}
