//! End-to-end flattening of the shared order log fixture into a file-backed catalog.

use std::collections::HashSet;
use std::path::PathBuf;

use ocel_core::{OcelDocument, OcelTables};
use ocel_lake::OcelLake;
use pretty_assertions::assert_eq;

fn fixture_tables() -> OcelTables {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../ocel-core/tests/fixtures/order_log.json");
    let doc = OcelDocument::from_path(&path).expect("fixture parses");
    OcelTables::from_document(&doc)
}

fn column(lake: &OcelLake, sql: &str) -> Vec<String> {
    let mut stmt = lake.conn().prepare(sql).unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn fixture_row_counts_land_in_catalog() {
    let tmpdir = tempfile::tempdir().unwrap();
    let mut lake = OcelLake::open(tmpdir.path(), "main").unwrap();
    let tables = fixture_tables();

    let summary = lake.replace_tables("logistics", &tables).unwrap();

    for (name, rows) in tables.row_counts() {
        assert_eq!(
            lake.count_rows("logistics", name).unwrap(),
            rows as u64,
            "row count for {name}"
        );
    }
    assert_eq!(summary.total_rows(), 28);
    assert_eq!(summary.namespace.to_string(), "main.logistics");
}

#[test]
fn stored_rows_reference_stored_parents() {
    let tmpdir = tempfile::tempdir().unwrap();
    let mut lake = OcelLake::open(tmpdir.path(), "main").unwrap();
    lake.replace_tables("logistics", &fixture_tables()).unwrap();

    let objects: HashSet<String> = column(&lake, "SELECT object_id FROM logistics.objects")
        .into_iter()
        .collect();
    let attribute_parents = column(&lake, "SELECT object_id FROM logistics.object_attributes");
    assert_eq!(attribute_parents.len(), 6);
    assert!(attribute_parents.iter().all(|id| objects.contains(id)));

    let values = column(
        &lake,
        "SELECT attribute_value FROM logistics.event_attributes ORDER BY attribute_name",
    );
    assert_eq!(values, vec!["120.5", "web", "true"]);
}
