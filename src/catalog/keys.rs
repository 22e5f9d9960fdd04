//! Primary-Key Registry
//!
//! Maps a resource name to its single identity column. Used exclusively
//! by generic delete to build the one-row predicate; composite keys are
//! not a thing here.

use std::collections::HashMap;

/// Identity-column lookup for deletable resources.
#[derive(Debug)]
pub struct PrimaryKeyRegistry {
    entries: HashMap<&'static str, &'static str>,
}

impl PrimaryKeyRegistry {
    pub fn new() -> Self {
        let entries = HashMap::from([
            ("animal", "a_id"),
            ("species", "s_id"),
            ("enclosure", "e_id"),
            ("medrec", "mr_id"),
            ("eats", "eats_id"),
            ("employee", "emp_id"),
            ("employee_enclosure", "ee_id"),
            ("animal_enclosure", "ae_id"),
            ("food", "f_id"),
            ("visitor", "v_id"),
            ("ticket", "t_id"),
            ("event", "ev_id"),
            ("event_infra", "ei_id"),
            ("infra", "i_id"),
            ("feed_log", "fl_id"),
            ("notifications", "n_id"),
        ]);
        Self { entries }
    }

    pub fn key_column(&self, resource: &str) -> Option<&'static str> {
        self.entries.get(resource).copied()
    }
}

impl Default for PrimaryKeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::zoo_schema::table_defs;

    #[test]
    fn test_key_columns_agree_with_table_declarations() {
        let registry = PrimaryKeyRegistry::new();
        for def in table_defs() {
            let resource = def.name.as_str();
            assert_eq!(
                registry.key_column(resource),
                Some(def.key_column.as_str()),
                "key mismatch for {resource}"
            );
        }
    }

    #[test]
    fn test_unknown_resource_has_no_key() {
        assert!(PrimaryKeyRegistry::new().key_column("unicorn").is_none());
    }
}
