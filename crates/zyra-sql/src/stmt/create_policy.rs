use super::Statement;

use zyra_core::rls::{Operation, PolicyKind, RlsPolicyRule};

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePolicy {
    pub name: String,

    /// Table the policy applies to
    pub on: String,

    pub kind: PolicyKind,
    pub operation: Operation,
    pub using: Option<String>,
    pub with_check: Option<String>,
}

impl Statement {
    pub fn create_policy(table: &str, rule: &RlsPolicyRule) -> Self {
        CreatePolicy {
            name: rule.name.clone(),
            on: table.to_string(),
            kind: rule.kind,
            operation: rule.operation,
            using: rule.using_expr().map(str::to_string),
            with_check: rule.check_expr().map(str::to_string),
        }
        .into()
    }
}

impl From<CreatePolicy> for Statement {
    fn from(value: CreatePolicy) -> Self {
        Self::CreatePolicy(value)
    }
}
