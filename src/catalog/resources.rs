//! Resource Schema Registry
//!
//! Maps a logical resource name to its accepted fields, positional insert
//! template, and optional pre-insert hook. `fields` doubles as the input
//! whitelist and the binding order for the template; no field is ever
//! required to be present at the API edge (the store's own constraints
//! validate).

use std::collections::HashMap;

use crate::store::Insert;

/// Pre-insert side effects, one variant per resource that needs one, so
/// the set of hooked resources is statically enumerable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreInsert {
    /// Ticket with no visitor reference: create a placeholder Visitor on
    /// the live connection and bind its identity before the ticket
    /// insert runs.
    EnsureVisitor,
}

/// Per-resource schema descriptor.
#[derive(Debug)]
pub struct ResourceSchema {
    pub fields: Vec<&'static str>,
    pub insert: Insert,
    pub pre_insert: Option<PreInsert>,
}

impl ResourceSchema {
    fn plain(table: &'static str, fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
            insert: Insert::into_table(table, fields),
            pre_insert: None,
        }
    }

    fn with_hook(table: &'static str, fields: &[&'static str], hook: PreInsert) -> Self {
        Self {
            pre_insert: Some(hook),
            ..Self::plain(table, fields)
        }
    }
}

/// Registry of insertable resources. Closed-world: an unregistered name
/// never reaches the store layer.
#[derive(Debug)]
pub struct ResourceRegistry {
    entries: HashMap<&'static str, ResourceSchema>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        let mut entries = HashMap::new();

        entries.insert(
            "animal",
            ResourceSchema::plain(
                "animal",
                &["name", "species_id", "birth_date", "gender", "arrival_date"],
            ),
        );
        entries.insert(
            "species",
            ResourceSchema::plain(
                "species",
                &["scientific_name", "common_name", "conservation_status", "size"],
            ),
        );
        entries.insert(
            "enclosure",
            ResourceSchema::plain("enclosure", &["name", "location", "capacity", "size"]),
        );
        entries.insert(
            "medrec",
            ResourceSchema::plain(
                "medrec",
                &["a_id", "last_checked", "next_check", "diseases", "notes"],
            ),
        );
        entries.insert(
            "eats",
            ResourceSchema::plain("eats", &["a_id", "species_id", "f_id", "preference"]),
        );
        entries.insert(
            "visitor",
            ResourceSchema::plain("visitor", &["name", "age", "contact"]),
        );
        entries.insert(
            "ticket",
            ResourceSchema::with_hook(
                "ticket",
                &["type", "price", "visitor_id"],
                PreInsert::EnsureVisitor,
            ),
        );
        entries.insert(
            "food",
            ResourceSchema::plain("food", &["name", "type", "quantity", "unit", "price_per_unit"]),
        );
        entries.insert(
            "employee",
            ResourceSchema::plain("employee", &["name", "role", "salary", "hire_date"]),
        );
        entries.insert(
            "infra",
            ResourceSchema::plain("infra", &["name", "type", "size"]),
        );
        entries.insert(
            "event",
            ResourceSchema::plain("event", &["title", "e_date", "e_id", "location", "capacity"]),
        );
        entries.insert(
            "event_infra",
            ResourceSchema::plain("event_infra", &["ev_id", "i_id", "quantity"]),
        );
        entries.insert(
            "employee_enclosure",
            ResourceSchema::plain(
                "employee_enclosure",
                &["emp_id", "e_id", "assigned_from", "assigned_to", "role_desc"],
            ),
        );
        entries.insert(
            "animal_enclosure",
            ResourceSchema::plain(
                "animal_enclosure",
                &["a_id", "e_id", "assigned_from", "assigned_to"],
            ),
        );
        entries.insert(
            "feed_log",
            ResourceSchema::plain("feed_log", &["a_id", "f_id", "amount", "unit", "fed_by"]),
        );

        Self { entries }
    }

    pub fn lookup(&self, resource: &str) -> Option<&ResourceSchema> {
        self.entries.get(resource)
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_match_insert_template_order() {
        let registry = ResourceRegistry::new();
        for (name, schema) in &registry.entries {
            assert_eq!(
                schema.fields,
                schema.insert.columns.iter().map(String::as_str).collect::<Vec<_>>(),
                "binding order mismatch for {name}"
            );
        }
    }

    #[test]
    fn test_only_ticket_carries_a_hook() {
        let registry = ResourceRegistry::new();
        let hooked: Vec<_> = registry
            .entries
            .iter()
            .filter(|(_, schema)| schema.pre_insert.is_some())
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(hooked, vec!["ticket"]);
    }

    #[test]
    fn test_unregistered_resource_is_unknown() {
        let registry = ResourceRegistry::new();
        assert!(registry.lookup("notifications").is_none());
        assert!(registry.lookup("unicorn").is_none());
    }
}
