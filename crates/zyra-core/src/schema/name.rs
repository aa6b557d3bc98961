use std_util::str;

/// A table or field name split into its snake case words, for rendering in
/// the casing each generated language expects.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = str::snake_case(&str::sanitize_identifier(src));
        let parts = snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    /// The name of a table with the schema's database prefix removed.
    pub fn from_table(table: &str, db_prefix: &str) -> Self {
        Self::new(str::strip_prefix(table, db_prefix))
    }

    pub fn camel_case(&self) -> String {
        str::camel_case(&self.snake_case())
    }

    pub fn upper_camel_case(&self) -> String {
        str::upper_camel_case(&self.snake_case())
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }
}
