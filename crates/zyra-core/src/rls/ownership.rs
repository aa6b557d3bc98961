use super::{Operation, RlsConfig, RlsPolicyRule};

/// Builds the usual ownership and role based policies for one table.
///
/// ```
/// use zyra_core::rls::{OwnershipPolicy, RlsConfig};
///
/// let policies = OwnershipPolicy::new("todos", &RlsConfig::default())
///     .can_access_own()
///     .build();
///
/// assert_eq!(policies[0].using, "\"user_id\" = auth.uid()");
/// ```
#[derive(Debug, Clone)]
pub struct OwnershipPolicy {
    table: String,
    config: RlsConfig,
    owner_column: String,
    rules: Vec<RlsPolicyRule>,
}

impl OwnershipPolicy {
    pub fn new(table: impl Into<String>, config: &RlsConfig) -> Self {
        Self {
            table: table.into(),
            owner_column: config.owner_column.clone(),
            config: config.clone(),
            rules: vec![],
        }
    }

    /// Uses `column` instead of the configured owner column.
    pub fn owner_column(mut self, column: impl Into<String>) -> Self {
        self.owner_column = column.into();
        self
    }

    pub fn own_row(&self) -> String {
        self.config.own_row(&self.owner_column)
    }

    pub fn has_role<S: AsRef<str>>(&self, roles: &[S]) -> String {
        self.config.has_role(roles)
    }

    pub fn is_authenticated(&self) -> String {
        self.config.is_authenticated()
    }

    pub fn can_access_own(self) -> Self {
        self.own(Operation::All)
    }

    pub fn can_read_own(self) -> Self {
        self.own(Operation::Select)
    }

    pub fn can_insert_own(self) -> Self {
        self.own(Operation::Insert)
    }

    pub fn can_update_own(self) -> Self {
        self.own(Operation::Update)
    }

    pub fn can_delete_own(self) -> Self {
        self.own(Operation::Delete)
    }

    /// Owners, and users with one of `roles`, can do anything.
    pub fn can_access_own_or_roles<S: AsRef<str>>(self, roles: &[S]) -> Self {
        let expr = format!("({}) OR ({})", self.own_row(), self.has_role(roles));
        let name = format!("{}_own_or_{}_all", self.table, join_roles(roles));
        self.push(RlsPolicyRule::new(name, Operation::All, expr))
    }

    /// Users with one of `roles` can perform `operation` on any row.
    pub fn role_can<S: AsRef<str>>(self, roles: &[S], operation: Operation) -> Self {
        let expr = self.has_role(roles);
        let name = format!("{}_{}_{operation}", self.table, join_roles(roles));
        self.push(RlsPolicyRule::new(name, operation, expr))
    }

    /// Any signed in user can perform `operation` on any row.
    pub fn authenticated_can(self, operation: Operation) -> Self {
        let expr = self.is_authenticated();
        let name = format!("{}_authenticated_{operation}", self.table);
        self.push(RlsPolicyRule::new(name, operation, expr))
    }

    /// Everyone, signed in or not, can read every row.
    pub fn public_read(self) -> Self {
        let name = format!("{}_public_select", self.table);
        self.push(RlsPolicyRule::new(name, Operation::Select, "true"))
    }

    pub fn build(self) -> Vec<RlsPolicyRule> {
        self.rules
    }

    fn own(self, operation: Operation) -> Self {
        let expr = self.own_row();
        let name = format!("{}_own_{operation}", self.table);
        self.push(RlsPolicyRule::new(name, operation, expr))
    }

    fn push(mut self, rule: RlsPolicyRule) -> Self {
        self.rules.push(rule);
        self
    }
}

pub(super) fn join_roles<S: AsRef<str>>(roles: &[S]) -> String {
    if roles.is_empty() {
        return "no_role".to_string();
    }

    let roles: Vec<&str> = roles.iter().map(AsRef::as_ref).collect();
    std_util::str::sanitize_identifier(&roles.join("_"))
}
