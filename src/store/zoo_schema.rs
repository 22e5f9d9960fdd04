//! Zoo table declarations
//!
//! One entry per resource kind plus the append-only notifications log.
//! Every table has a single auto-increment identity column; required
//! columns mirror the original schema's NOT NULL constraints.

use super::engine::{ColumnDef, TableDef};

/// All tables the engine serves, declared once at startup.
pub fn table_defs() -> Vec<TableDef> {
    vec![
        TableDef::new(
            "animal",
            "a_id",
            vec![
                ColumnDef::required("name"),
                ColumnDef::new("species_id"),
                ColumnDef::new("birth_date"),
                ColumnDef::new("gender"),
                ColumnDef::new("arrival_date"),
            ],
        ),
        TableDef::new(
            "species",
            "s_id",
            vec![
                ColumnDef::required("scientific_name"),
                ColumnDef::required("common_name"),
                ColumnDef::new("conservation_status"),
                ColumnDef::new("size"),
            ],
        ),
        TableDef::new(
            "enclosure",
            "e_id",
            vec![
                ColumnDef::required("name"),
                ColumnDef::new("location"),
                ColumnDef::new("capacity"),
                ColumnDef::new("size"),
            ],
        ),
        TableDef::new(
            "medrec",
            "mr_id",
            vec![
                ColumnDef::required("a_id"),
                ColumnDef::new("last_checked"),
                ColumnDef::new("next_check"),
                ColumnDef::new("diseases"),
                ColumnDef::new("notes"),
            ],
        ),
        TableDef::new(
            "eats",
            "eats_id",
            vec![
                ColumnDef::new("a_id"),
                ColumnDef::new("species_id"),
                ColumnDef::new("f_id"),
                ColumnDef::new("preference"),
            ],
        ),
        TableDef::new(
            "food",
            "f_id",
            vec![
                ColumnDef::required("name"),
                ColumnDef::new("type"),
                ColumnDef::new("quantity"),
                ColumnDef::new("unit"),
                ColumnDef::new("price_per_unit"),
            ],
        ),
        TableDef::new(
            "feed_log",
            "fl_id",
            vec![
                ColumnDef::required("a_id"),
                ColumnDef::required("f_id"),
                ColumnDef::new("amount"),
                ColumnDef::new("unit"),
                ColumnDef::new("fed_by"),
            ],
        ),
        TableDef::new(
            "visitor",
            "v_id",
            vec![
                ColumnDef::required("name"),
                ColumnDef::new("age"),
                ColumnDef::new("contact"),
            ],
        ),
        TableDef::new(
            "ticket",
            "t_id",
            vec![
                ColumnDef::new("type"),
                ColumnDef::new("price"),
                ColumnDef::required("visitor_id"),
            ],
        ),
        TableDef::new(
            "employee",
            "emp_id",
            vec![
                ColumnDef::required("name"),
                ColumnDef::new("role"),
                ColumnDef::new("salary"),
                ColumnDef::new("hire_date"),
            ],
        ),
        TableDef::new(
            "infra",
            "i_id",
            vec![
                ColumnDef::required("name"),
                ColumnDef::new("type"),
                ColumnDef::new("size"),
            ],
        ),
        TableDef::new(
            "event",
            "ev_id",
            vec![
                ColumnDef::required("title"),
                ColumnDef::new("e_date"),
                ColumnDef::new("e_id"),
                ColumnDef::new("location"),
                ColumnDef::new("capacity"),
            ],
        ),
        // Unique per (event, infra item); re-assignment must not clobber
        // the stored quantity.
        TableDef::new(
            "event_infra",
            "ei_id",
            vec![
                ColumnDef::required("ev_id"),
                ColumnDef::required("i_id"),
                ColumnDef::new("quantity"),
            ],
        )
        .unique_pair("ev_id", "i_id"),
        TableDef::new(
            "employee_enclosure",
            "ee_id",
            vec![
                ColumnDef::required("emp_id"),
                ColumnDef::required("e_id"),
                ColumnDef::new("assigned_from"),
                ColumnDef::new("assigned_to"),
                ColumnDef::new("role_desc"),
            ],
        ),
        TableDef::new(
            "animal_enclosure",
            "ae_id",
            vec![
                ColumnDef::required("a_id"),
                ColumnDef::required("e_id"),
                ColumnDef::new("assigned_from"),
                ColumnDef::new("assigned_to"),
            ],
        ),
        // Append-only; created_at is engine-filled at insert time.
        TableDef::new(
            "notifications",
            "n_id",
            vec![
                ColumnDef::required("level"),
                ColumnDef::required("message"),
                ColumnDef::timestamp("created_at"),
            ],
        ),
    ]
}
