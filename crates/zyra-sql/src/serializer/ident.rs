use super::{Formatter, ToSql};

/// A quoted identifier: `"name"` on PostgreSQL, `` `name` `` on MySQL.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let quote = if f.serializer.is_mysql() { '`' } else { '"' };
        let name = self.0.as_ref();

        f.dst.push(quote);
        for c in name.chars() {
            if c == quote {
                f.dst.push(quote);
            }
            f.dst.push(c);
        }
        f.dst.push(quote);
    }
}
