use super::SchemaDescriptor;
use crate::{Diagnostics, Warning};

use std::collections::BTreeSet;

impl SchemaDescriptor {
    /// Orders tables so that every table comes after the tables it
    /// references (Kahn's algorithm). Ready tables are taken in name order.
    /// Self references are ignored. When the references form a cycle, the
    /// declaration order is returned instead.
    pub(super) fn topological_order(&self, diagnostics: &mut Diagnostics) -> Vec<usize> {
        let num_tables = self.tables.len();

        let mut dependencies = vec![BTreeSet::new(); num_tables];
        for (index, layout) in self.layouts.iter().enumerate() {
            for flat in layout.iter().filter(|flat| !flat.is_json()) {
                let Some(fk) = &flat.column.foreign_key else {
                    continue;
                };

                match self.table_index(&fk.table) {
                    Some(target) if target != index => {
                        dependencies[index].insert(target);
                    }
                    _ => {}
                }
            }
        }

        let mut dependents = vec![vec![]; num_tables];
        let mut in_degree = vec![0; num_tables];

        for (index, targets) in dependencies.iter().enumerate() {
            in_degree[index] = targets.len();
            for &target in targets {
                dependents[target].push(index);
            }
        }

        let mut ready: BTreeSet<(&str, usize)> = (0..num_tables)
            .filter(|&index| in_degree[index] == 0)
            .map(|index| (self.tables[index].name.as_str(), index))
            .collect();

        let mut order = Vec::with_capacity(num_tables);

        while let Some((_, index)) = ready.pop_first() {
            order.push(index);

            for &dependent in &dependents[index] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert((self.tables[dependent].name.as_str(), dependent));
                }
            }
        }

        if order.len() < num_tables {
            let mut tables: Vec<String> = (0..num_tables)
                .filter(|&index| in_degree[index] > 0)
                .map(|index| self.tables[index].name.clone())
                .collect();
            tables.sort();

            diagnostics.warn(Warning::DependencyCycle { tables });
            return (0..num_tables).collect();
        }

        order
    }
}
