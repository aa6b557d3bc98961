use super::{value::Quoted, Comma, Ident, ToSql};

use crate::stmt::{self, Statement};

use zyra_core::schema::DefaultValue;

impl ToSql for &Statement {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        match self {
            Statement::AddForeignKey(stmt) => stmt.to_sql(f),
            Statement::CreateFunction(stmt) => stmt.to_sql(f),
            Statement::CreateIndex(stmt) => stmt.to_sql(f),
            Statement::CreatePolicy(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::CreateTrigger(stmt) => stmt.to_sql(f),
            Statement::CreateType(stmt) => stmt.to_sql(f),
            Statement::EnableRls(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
        }
    }
}

struct ColumnsWithConstraints<'a>(&'a stmt::CreateTable);

impl ToSql for ColumnsWithConstraints<'_> {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        for (index, column) in self.0.columns.iter().enumerate() {
            fmt!(f, "\n    " column);
            if index < self.0.columns.len() - 1 {
                fmt!(f, ",");
            }
        }

        if self.0.primary_key.is_empty() {
            fmt!(f, "\n");
        } else {
            let pk = Comma(self.0.primary_key.iter().map(Ident));
            fmt!(f, ",\n    PRIMARY KEY (" pk ")\n");
        }
    }
}

impl ToSql for &stmt::AddForeignKey {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let table = Ident(&self.table);
        let name = Ident(&self.name);
        let column = Ident(&self.column);
        let references = Ident(&self.references);
        let referenced_column = Ident(&self.referenced_column);

        fmt!(
            f, "ALTER TABLE " table " ADD CONSTRAINT " name " FOREIGN KEY (" column ") REFERENCES "
            references " (" referenced_column ") ON DELETE " self.on_delete.as_sql()
            " ON UPDATE " self.on_update.as_sql()
        );
    }
}

impl ToSql for &stmt::CreateFunction {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let name = Ident(&self.name);
        let column = Ident(&self.column);
        let now = &DefaultValue::Now;

        fmt!(
            f, "CREATE OR REPLACE FUNCTION " name "()\n"
            "RETURNS TRIGGER AS $$\n"
            "BEGIN\n"
            "    NEW." column " = " now ";\n"
            "    RETURN NEW;\n"
            "END;\n"
            "$$ LANGUAGE plpgsql"
        );
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let index_name = Ident(&self.name);
        let table_name = Ident(&self.on);
        let columns = Comma(
            self.columns
                .iter()
                .map(|(name, order)| (Ident(name), order.is_desc().then_some(" DESC"))),
        );
        let unique = if self.unique { "UNIQUE " } else { "" };

        fmt!(
            f, "CREATE " unique "INDEX " index_name " ON " table_name " (" columns ")"
        );
    }
}

impl ToSql for &stmt::CreatePolicy {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let name = Ident(&self.name);
        let table = Ident(&self.on);
        let using = self.using.as_ref().map(|expr| (" USING (", expr, ")"));
        let with_check = self.with_check.as_ref().map(|expr| (" WITH CHECK (", expr, ")"));

        fmt!(
            f, "CREATE POLICY " name " ON " table " AS " self.kind.as_sql()
            " FOR " self.operation.as_sql() using with_check
        );
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let name = Ident(&self.name);
        let columns = ColumnsWithConstraints(self);
        let options = self.options.as_ref().map(|options| (" ", options));

        fmt!(f, "CREATE TABLE " name " (" columns ")" options);
    }
}

impl ToSql for &stmt::CreateTrigger {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let name = Ident(&self.name);
        let table = Ident(&self.on);
        let now = &DefaultValue::Now;

        fmt!(f, "CREATE TRIGGER " name "\nBEFORE UPDATE ON " table "\nFOR EACH ROW\n");

        match &self.function {
            Some(function) => fmt!(f, "EXECUTE FUNCTION " Ident(function) "()"),
            None => fmt!(f, "SET NEW." Ident(&self.column) " = " now),
        }
    }
}

impl ToSql for &stmt::CreateType {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let name = Ident(&self.name);
        let values = Comma(self.values.iter().map(|value| Quoted(value)));

        fmt!(f, "CREATE TYPE " name " AS ENUM (" values ")");
    }
}

impl ToSql for &stmt::EnableRls {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        fmt!(f, "ALTER TABLE " Ident(&self.table) " ENABLE ROW LEVEL SECURITY");
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql(self, f: &mut super::Formatter<'_>) {
        let table = Ident(&self.table);
        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(&self.values);

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")");
    }
}
