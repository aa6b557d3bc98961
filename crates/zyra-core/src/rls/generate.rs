use super::{quote, Operation, RlsConfig, RlsPolicyRule};
use crate::schema::{TableDescriptor, TableKind};
use crate::SchemaDescriptor;

/// Tables whose name ends with this hold user accounts.
const USERS_SUFFIX: &str = "users";

impl TableDescriptor {
    pub fn is_users_table(&self) -> bool {
        self.name.ends_with(USERS_SUFFIX)
    }

    /// The policies to install for this table.
    ///
    /// Users tables always get exactly two policies, letting a user read and
    /// update their own row; configured policies are ignored. Inserting and
    /// deleting users is left to the backend.
    pub fn generate_rls(&self, config: &RlsConfig) -> Vec<RlsPolicyRule> {
        if !self.is_users_table() {
            return self.rls_policies.clone();
        }

        let own = format!("{} = {}", quote(&self.primary_key), config.current_user);

        vec![
            RlsPolicyRule::new(format!("{}_self_select", self.name), Operation::Select, &own),
            RlsPolicyRule::new(format!("{}_self_update", self.name), Operation::Update, &own)
                .with_check(&own),
        ]
    }
}

impl SchemaDescriptor {
    /// Whether `table` is a declared users table. Join and child tables
    /// never are, whatever their name.
    pub fn is_users_table(&self, table: &TableDescriptor) -> bool {
        table.is_users_table() && self.table_kind(&table.name) == Some(TableKind::Declared)
    }

    /// The policies to install for `table`, applying the users table
    /// override to declared tables only.
    pub fn rls_policies(&self, table: &TableDescriptor) -> Vec<RlsPolicyRule> {
        if self.is_users_table(table) {
            table.generate_rls(self.rls_config())
        } else {
            table.rls_policies.clone()
        }
    }
}
