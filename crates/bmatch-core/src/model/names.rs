//! Optional names for variables and constraints.
//!
//! Names are unique per table; renaming an entry releases its old name.

use std::collections::HashMap;
use std::hash::Hash;

use bmatch_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

#[derive(Debug, Clone)]
pub(crate) struct NameTable<Id> {
    by_id: HashMap<Id, String>,
    by_name: HashMap<String, Id>,
}

impl<Id> Default for NameTable<Id> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash> NameTable<Id> {
    /// Returns the id that already holds `name`, if it is a different one.
    fn insert(&mut self, id: Id, name: String) -> Result<(), Id> {
        match self.by_name.get(&name) {
            Some(&holder) if holder != id => return Err(holder),
            _ => {}
        }
        if let Some(previous) = self.by_id.insert(id, name.clone()) {
            self.by_name.remove(&previous);
        }
        self.by_name.insert(name, id);
        Ok(())
    }

    fn name(&self, id: Id) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    fn lookup(&self, name: &str) -> Option<Id> {
        self.by_name.get(name).copied()
    }
}

impl Model {
    pub fn set_variable_name(&mut self, id: VariableId, name: String) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.variable_names
            .insert(id, name.clone())
            .map_err(|_| ModelError::DuplicateName { name })
    }

    pub fn get_variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names.name(id)
    }

    pub fn get_variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.variable_names.lookup(name)
    }

    pub fn set_constraint_name(
        &mut self,
        id: ConstraintId,
        name: String,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        self.constraint_names
            .insert(id, name.clone())
            .map_err(|_| ModelError::DuplicateName { name })
    }

    pub fn get_constraint_name(&self, id: ConstraintId) -> Option<&str> {
        self.constraint_names.name(id)
    }

    pub fn get_constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_names.lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::NameTable;

    #[test]
    fn rename_releases_old_name() {
        let mut table = NameTable::default();
        table.insert(0u32, "a".to_string()).unwrap();
        table.insert(0u32, "b".to_string()).unwrap();
        assert_eq!(table.lookup("a"), None);
        assert_eq!(table.lookup("b"), Some(0));
        assert_eq!(table.name(0), Some("b"));
    }

    #[test]
    fn taken_name_reports_holder() {
        let mut table = NameTable::default();
        table.insert(1u32, "row".to_string()).unwrap();
        assert_eq!(table.insert(2, "row".to_string()), Err(1));
        assert!(table.insert(1, "row".to_string()).is_ok());
        assert_eq!(table.name(2), None);
    }
}
