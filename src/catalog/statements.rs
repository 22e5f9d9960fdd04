//! Statement Catalog
//!
//! Immutable mapping from a logical read-query name to a self-contained
//! read statement. Every entry carries its own fixed ordering: listings
//! by identity ascending, time-ordered logs most recent first.

use std::collections::HashMap;

use crate::store::{JoinKind, Select};

/// Registry of named parameterless read queries.
#[derive(Debug)]
pub struct StatementCatalog {
    entries: HashMap<&'static str, Select>,
}

impl StatementCatalog {
    /// Build the full catalog. Constructed once at startup; never
    /// mutated afterwards.
    pub fn new() -> Self {
        let mut entries = HashMap::new();

        // Plain listings, identity ascending.
        entries.insert("animals", Select::from("animal").order_asc("a_id"));
        entries.insert("species", Select::from("species").order_asc("s_id"));
        entries.insert("enclosures", Select::from("enclosure").order_asc("e_id"));
        entries.insert("food", Select::from("food").order_asc("f_id"));
        entries.insert("medrecs", Select::from("medrec").order_asc("mr_id"));
        entries.insert("eats", Select::from("eats").order_asc("eats_id"));
        entries.insert(
            "employee_enclosure",
            Select::from("employee_enclosure").order_asc("ee_id"),
        );
        entries.insert(
            "animal_enclosure",
            Select::from("animal_enclosure").order_asc("ae_id"),
        );
        entries.insert("visitors", Select::from("visitor").order_asc("v_id"));
        entries.insert("tickets", Select::from("ticket").order_asc("t_id"));
        entries.insert("employees", Select::from("employee").order_asc("emp_id"));
        entries.insert("infra", Select::from("infra").order_asc("i_id"));
        entries.insert("events", Select::from("event").order_asc("ev_id"));
        entries.insert(
            "event_infra",
            Select::from("event_infra")
                .columns(&[("ei_id", "ei_id"), ("ev_id", "ev_id"), ("i_id", "i_id")])
                .order_asc("ei_id"),
        );

        // Append-only logs, most recent first.
        entries.insert("feed_log", Select::from("feed_log").order_desc("fl_id"));
        entries.insert(
            "notifications",
            Select::from("notifications").order_desc("created_at"),
        );

        // Joined reads for the dashboard views.
        entries.insert(
            "inner_animal_species",
            Select::from("animal")
                .join(JoinKind::Inner, "species", "species_id", "s_id")
                .columns(&[
                    ("animal.a_id", "a_id"),
                    ("animal.name", "animal_name"),
                    ("animal.birth_date", "birth_date"),
                    ("animal.gender", "gender"),
                    ("species.s_id", "species_id"),
                    ("species.common_name", "species_name"),
                    ("species.scientific_name", "scientific_name"),
                    ("species.conservation_status", "conservation_status"),
                ])
                .order_asc("a_id"),
        );
        entries.insert(
            "inner_event_infra",
            Select::from("event")
                .join(JoinKind::Inner, "event_infra", "ev_id", "ev_id")
                .join(JoinKind::Inner, "infra", "event_infra.i_id", "i_id")
                .columns(&[
                    ("event.ev_id", "ev_id"),
                    ("event.title", "event_title"),
                    ("event.e_date", "e_date"),
                    ("event.location", "event_location"),
                    ("event_infra.ei_id", "ei_id"),
                    ("infra.i_id", "infra_id"),
                    ("infra.name", "infra_name"),
                    ("event_infra.quantity", "quantity"),
                ])
                .order_asc("ev_id")
                .order_asc("infra.i_id"),
        );
        entries.insert(
            "left_enclosure_animals",
            Select::from("enclosure")
                .join(JoinKind::Left, "animal_enclosure", "e_id", "e_id")
                .join(JoinKind::Left, "animal", "animal_enclosure.a_id", "a_id")
                .columns(&[
                    ("enclosure.e_id", "e_id"),
                    ("enclosure.name", "enclosure_name"),
                    ("enclosure.capacity", "capacity"),
                    ("animal_enclosure.ae_id", "ae_id"),
                    ("animal.a_id", "animal_id"),
                    ("animal.name", "animal_name"),
                    ("animal_enclosure.assigned_from", "assigned_from"),
                    ("animal_enclosure.assigned_to", "assigned_to"),
                ])
                .order_asc("e_id")
                .order_asc("animal_enclosure.ae_id"),
        );
        // Every animal with its medical records, record-less animals
        // included (the original expressed this as a right join).
        entries.insert(
            "right_animal_medrec",
            Select::from("animal")
                .join(JoinKind::Left, "medrec", "a_id", "a_id")
                .columns(&[
                    ("animal.a_id", "a_id"),
                    ("animal.name", "animal_name"),
                    ("medrec.mr_id", "mr_id"),
                    ("medrec.last_checked", "last_checked"),
                    ("medrec.next_check", "next_check"),
                    ("medrec.diseases", "diseases"),
                    ("medrec.notes", "notes"),
                ])
                .order_asc("a_id")
                .order_asc("medrec.mr_id"),
        );

        Self { entries }
    }

    /// Resolve a query name. `None` is the caller's signal for a
    /// client-input error, never a server fault.
    pub fn resolve(&self, name: &str) -> Option<&Select> {
        self.entries.get(name)
    }

    /// Registered names, for diagnostics.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for StatementCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_queries_are_registered() {
        let catalog = StatementCatalog::new();
        for name in ["animals", "species", "tickets", "feed_log", "notifications"] {
            assert!(catalog.resolve(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        let catalog = StatementCatalog::new();
        assert!(catalog.resolve("drop_tables").is_none());
    }

    #[test]
    fn test_logs_are_ordered_most_recent_first() {
        let catalog = StatementCatalog::new();
        let feed_log = catalog.resolve("feed_log").unwrap();
        assert_eq!(
            feed_log.order,
            vec![("fl_id".to_string(), crate::store::Direction::Desc)]
        );
    }
}
