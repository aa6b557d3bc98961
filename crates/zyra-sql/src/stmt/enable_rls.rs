use super::Statement;

#[derive(Debug, Clone, PartialEq)]
pub struct EnableRls {
    pub table: String,
}

impl Statement {
    pub fn enable_rls(table: &str) -> Self {
        EnableRls {
            table: table.to_string(),
        }
        .into()
    }
}

impl From<EnableRls> for Statement {
    fn from(value: EnableRls) -> Self {
        Self::EnableRls(value)
    }
}
