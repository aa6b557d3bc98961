use super::{Ident, ToSql};

use crate::stmt;

impl ToSql for &stmt::ColumnDef {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let name = Ident(&self.name);
        let ty = &self.ty;
        let not_null = self.not_null.then_some(" NOT NULL");
        let unique = self.unique.then_some(" UNIQUE");
        let default = self.default.as_ref().map(|default| (" DEFAULT ", default));
        let check = self.check.as_ref().map(|check| (" CHECK (", check, ")"));

        fmt!(f, name " " ty not_null unique default check)
    }
}
