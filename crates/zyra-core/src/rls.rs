//! Row level security policies.
//!
//! Policies are boolean SQL expressions over the row being accessed. Two
//! front ends build them: [`OwnershipPolicy`] offers one method per common
//! rule, [`PolicyBuilder`] combines roles, operations and a row match. Both
//! produce [`RlsPolicyRule`] values that the SQL serializer renders as
//! `CREATE POLICY` statements.

mod fluent;
pub use fluent::{Match, PolicyBuilder};

mod generate;

mod ownership;
pub use ownership::OwnershipPolicy;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlsPolicyRule {
    /// Policy name, unique per table.
    pub name: String,

    pub operation: Operation,

    pub kind: PolicyKind,

    /// Expression rows must satisfy to be visible.
    pub using: String,

    /// Expression new rows must satisfy. Falls back to `using` for
    /// operations that write rows.
    pub with_check: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    #[default]
    Permissive,
    Restrictive,
}

/// Names the expressions and tables policies are written against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlsConfig {
    /// SQL expression evaluating to the id of the current user.
    pub current_user: String,

    /// Table holding users and their roles.
    pub users_table: String,

    /// Column of the users table holding its identity.
    pub identity_column: String,

    /// Column of the users table holding the user's role.
    pub role_column: String,

    /// Column of owned tables referencing their owner.
    pub owner_column: String,
}

impl Default for RlsConfig {
    fn default() -> Self {
        Self {
            current_user: "auth.uid()".to_string(),
            users_table: "users".to_string(),
            identity_column: "id".to_string(),
            role_column: "role".to_string(),
            owner_column: "user_id".to_string(),
        }
    }
}

impl RlsPolicyRule {
    pub fn new(name: impl Into<String>, operation: Operation, using: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operation,
            kind: PolicyKind::Permissive,
            using: using.into(),
            with_check: None,
        }
    }

    pub fn restrictive(mut self) -> Self {
        self.kind = PolicyKind::Restrictive;
        self
    }

    pub fn with_check(mut self, expr: impl Into<String>) -> Self {
        self.with_check = Some(expr.into());
        self
    }

    /// The `USING` expression, if the operation takes one. PostgreSQL
    /// rejects `USING` on insert policies.
    pub fn using_expr(&self) -> Option<&str> {
        match self.operation {
            Operation::Insert => None,
            _ => Some(&self.using),
        }
    }

    /// The `WITH CHECK` expression, if the operation takes one.
    pub fn check_expr(&self) -> Option<&str> {
        match self.operation {
            Operation::Insert | Operation::Update | Operation::All => {
                Some(self.with_check.as_deref().unwrap_or(&self.using))
            }
            Operation::Select | Operation::Delete => None,
        }
    }
}

impl Operation {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::All => "ALL",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Select => "select",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::All => "all",
        }
    }

    pub fn parse(src: &str) -> Option<Self> {
        match src.to_ascii_lowercase().as_str() {
            "select" | "read" => Some(Operation::Select),
            "insert" | "create" => Some(Operation::Insert),
            "update" => Some(Operation::Update),
            "delete" => Some(Operation::Delete),
            "all" => Some(Operation::All),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PolicyKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            PolicyKind::Permissive => "PERMISSIVE",
            PolicyKind::Restrictive => "RESTRICTIVE",
        }
    }
}

impl RlsConfig {
    /// Matches rows owned by the current user.
    pub fn own_row(&self, owner_column: &str) -> String {
        format!("{} = {}", quote(owner_column), self.current_user)
    }

    /// Matches when the current user has one of `roles`. An empty role
    /// list matches nothing.
    pub fn has_role<S: AsRef<str>>(&self, roles: &[S]) -> String {
        if roles.is_empty() {
            return "false".to_string();
        }

        let roles: Vec<String> = roles
            .iter()
            .map(|role| format!("'{}'", role.as_ref().replace('\'', "''")))
            .collect();

        format!(
            "EXISTS (SELECT 1 FROM {users} WHERE {users}.{id} = {current} AND {users}.{role} IN ({roles}))",
            users = quote(&self.users_table),
            id = quote(&self.identity_column),
            current = self.current_user,
            role = quote(&self.role_column),
            roles = roles.join(", "),
        )
    }

    /// Matches any signed in user.
    pub fn is_authenticated(&self) -> String {
        format!("{} IS NOT NULL", self.current_user)
    }
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
