use carsheet_core::ListingEntry;
use carsheet_engine::{export_sheet, ExportError, ExportOptions};
use pretty_assertions::assert_eq;

fn heterogeneous_entries() -> Vec<ListingEntry> {
    vec![
        ListingEntry::new("Audi", "R8", Some(2024))
            .with_spec("Engine", "5.2L V10")
            .with_spec("MSRP", "$158,600"),
        ListingEntry::new("BMW", "M4", None).with_spec("Doors", "2"),
        ListingEntry::new("Ford", "Mustang", Some(2024)),
    ]
}

#[test]
fn columns_are_the_union_and_missing_cells_stay_blank() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("cars.csv");

    let summary = export_sheet(&heterogeneous_entries(), &path, &ExportOptions::default()).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.columns, 6);
    assert_eq!(summary.path, path);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Brand,Model,Year,Doors,Engine,MSRP",
            "Audi,R8,2024,,5.2L V10,\"$158,600\"",
            "BMW,M4,,2,,",
            "Ford,Mustang,2024,,,",
        ]
    );
}

#[test]
fn cells_with_separators_and_quotes_are_escaped() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("quoted.csv");
    let entries = vec![
        ListingEntry::new("Mercedes-Benz", "AMG GT", Some(2024))
            .with_spec("Note", "fast, loud and \"pretty\"")
    ];

    export_sheet(&entries, &path, &ExportOptions::default()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content
        .lines()
        .any(|line| line.ends_with("\"fast, loud and \"\"pretty\"\"\"")));
}

#[test]
fn empty_table_is_a_no_rows_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("empty.csv");

    let err = export_sheet(&[], &path, &ExportOptions::default()).unwrap_err();

    assert!(matches!(err, ExportError::NoRows));
    assert!(!path.exists());
}

#[test]
fn missing_parent_directory_is_created() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("exports").join("cars.csv");

    let summary = export_sheet(&heterogeneous_entries(), &path, &ExportOptions::default()).unwrap();

    assert!(summary.path.exists());
}

#[test]
fn re_export_replaces_the_previous_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("cars.csv");
    let first = vec![ListingEntry::new("Audi", "R8", Some(2024))];
    let second = vec![
        ListingEntry::new("BMW", "M4", Some(2024)),
        ListingEntry::new("BMW", "Z4", Some(2024)),
    ];

    export_sheet(&first, &path, &ExportOptions::default()).unwrap();
    export_sheet(&second, &path, &ExportOptions::default()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("Z4"));
    assert!(!content.contains("R8"));
}

#[test]
fn tab_separator_produces_a_tsv() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("cars.tsv");
    let entries = vec![ListingEntry::new("Audi", "R8", Some(2024)).with_spec("MSRP", "$158,600")];

    export_sheet(&entries, &path, &ExportOptions { separator: '\t' }).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.lines().nth(1),
        Some("Audi\tR8\t2024\t$158,600")
    );
}
