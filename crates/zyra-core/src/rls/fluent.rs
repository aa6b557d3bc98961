use super::{ownership::join_roles, Operation, PolicyKind, RlsConfig, RlsPolicyRule};

/// Which rows a policy applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Match {
    /// Rows owned by the current user.
    #[default]
    OwnRow,

    /// Rows satisfying a raw SQL expression.
    Sql(String),

    /// Every row.
    Always,
}

/// Combines who, what and which rows into one policy per operation.
///
/// ```
/// use zyra_core::rls::{Match, Operation, PolicyBuilder, RlsConfig};
///
/// let policies = PolicyBuilder::new("posts", &RlsConfig::default())
///     .who(["authenticated"])
///     .access([Operation::Select, Operation::Update])
///     .matching(Match::OwnRow)
///     .build();
///
/// assert_eq!(policies[0].name, "posts_authenticated_select");
/// assert_eq!(policies[1].name, "posts_authenticated_update");
/// ```
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    table: String,
    config: RlsConfig,
    roles: Vec<String>,
    operations: Vec<Operation>,
    matching: Match,
    kind: PolicyKind,
}

/// Roles that do not restrict access.
const PUBLIC_ROLES: [&str; 2] = ["public", "anon"];

const AUTHENTICATED_ROLE: &str = "authenticated";

impl PolicyBuilder {
    pub fn new(table: impl Into<String>, config: &RlsConfig) -> Self {
        Self {
            table: table.into(),
            config: config.clone(),
            roles: vec![],
            operations: vec![],
            matching: Match::default(),
            kind: PolicyKind::default(),
        }
    }

    /// Roles the policies apply to. `public` and `anon` apply to everyone,
    /// `authenticated` to any signed in user, and any other role is looked
    /// up in the users table.
    pub fn who<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Operations to emit a policy for. Defaults to [`Operation::All`].
    pub fn access(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(operations);
        self
    }

    pub fn matching(mut self, matching: Match) -> Self {
        self.matching = matching;
        self
    }

    pub fn permissive(mut self) -> Self {
        self.kind = PolicyKind::Permissive;
        self
    }

    pub fn restrictive(mut self) -> Self {
        self.kind = PolicyKind::Restrictive;
        self
    }

    pub fn build(self) -> Vec<RlsPolicyRule> {
        let expr = match (self.roles_expr(), self.match_expr()) {
            (None, None) => "true".to_string(),
            (Some(expr), None) | (None, Some(expr)) => expr,
            (Some(roles), Some(matching)) => format!("({roles}) AND ({matching})"),
        };

        let who = if self.roles.is_empty() {
            "public".to_string()
        } else {
            join_roles(&self.roles)
        };

        let operations = if self.operations.is_empty() {
            vec![Operation::All]
        } else {
            self.operations.clone()
        };

        operations
            .into_iter()
            .map(|operation| RlsPolicyRule {
                name: format!("{}_{who}_{operation}", self.table),
                operation,
                kind: self.kind,
                using: expr.clone(),
                with_check: None,
            })
            .collect()
    }

    fn roles_expr(&self) -> Option<String> {
        if self.roles.iter().any(|role| PUBLIC_ROLES.contains(&role.as_str())) {
            return None;
        }

        let mut parts = vec![];

        if self.roles.iter().any(|role| role == AUTHENTICATED_ROLE) {
            parts.push(self.config.is_authenticated());
        }

        let custom: Vec<&str> = self
            .roles
            .iter()
            .map(String::as_str)
            .filter(|role| *role != AUTHENTICATED_ROLE)
            .collect();

        if !custom.is_empty() {
            parts.push(self.config.has_role(&custom));
        }

        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(
                parts
                    .iter()
                    .map(|part| format!("({part})"))
                    .collect::<Vec<_>>()
                    .join(" OR "),
            ),
        }
    }

    fn match_expr(&self) -> Option<String> {
        match &self.matching {
            Match::OwnRow => Some(self.config.own_row(&self.config.owner_column)),
            Match::Sql(expr) => Some(expr.clone()),
            Match::Always => None,
        }
    }
}
