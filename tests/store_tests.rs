//! Assignment store tests against real workbook files.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

mod fixtures;

use fixtures::{family_xlsx, summary_xlsx, SheetBuilder, XlsxBuilder};
use shelfmap::editor::{apply_edit, TableEdit};
use shelfmap::export::ValidationHints;
use shelfmap::family::{FamilyIndex, FamilySheetLayout};
use shelfmap::store::AssignmentStore;
use shelfmap::{generate, parser, GridCell, ShelfmapError, SideRef};

fn generated() -> (AssignmentStore, FamilyIndex) {
    let summary = parser::parse(&summary_xlsx(&[("A", 1, 2, 2, 3), ("B", 2, 1, 1, 2)])).unwrap();
    let families =
        parser::parse(&family_xlsx(&[("Dairy", &["Milk", "Cheese"]), ("Bakery", &["Bread"])]))
            .unwrap();
    generate(&summary, &families, FamilySheetLayout::default()).unwrap()
}

#[test]
fn assign_dairy_milk_to_two_shelves() {
    let (mut store, _) = generated();
    let side = SideRef::new("A", 1, 1);
    let cells = [GridCell::new(1, 1), GridCell::new(1, 2)];

    assert_eq!(store.assign(&cells, &side, "Dairy", "Milk"), 2);

    for shelf in 1..=2 {
        let record = store.find_by_coordinate("A", 1, 1, 1, shelf).unwrap();
        assert_eq!(record.family, "Dairy");
        assert_eq!(record.category, "Milk");
    }
    let untouched = store.find_by_coordinate("A", 1, 1, 1, 3).unwrap();
    assert!(untouched.family.is_empty());
    let other_side = store.find_by_coordinate("A", 1, 2, 1, 1).unwrap();
    assert!(other_side.category.is_empty());
}

#[test]
fn cells_outside_the_table_are_ignored() {
    let (mut store, _) = generated();
    let side = SideRef::new("B", 1, 1);
    let cells = [GridCell::new(1, 1), GridCell::new(4, 9)];
    assert_eq!(store.assign(&cells, &side, "Bakery", "Bread"), 1);
    assert_eq!(store.len(), 16);
}

#[test]
fn persisted_file_keeps_labels_and_dropdowns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf assignment.xlsx");
    let (store, index) = generated();
    let mut store = store.with_backing(&path);
    store.assign(&[GridCell::new(2, 3)], &SideRef::new("A", 1, 2), "Dairy", "Cheese");
    store.persist().unwrap();

    let reloaded = AssignmentStore::load(&parser::parse_file(&path).unwrap())
        .unwrap()
        .with_backing(&path)
        .with_hints(ValidationHints::from_index(&index));
    assert_eq!(reloaded.records(), store.records());

    reloaded.persist().unwrap();
    let sheet = parser::parse_file(&path).unwrap().sheets.remove(0);
    assert_eq!(sheet.data_validations.len(), 2);
    assert_eq!(sheet.data_validations[0].sqref, "F2:F17");
    assert_eq!(
        sheet.data_validations[1].validation.list_values,
        Some(vec!["Milk".into(), "Cheese".into(), "Bread".into()])
    );
}

#[test]
fn table_edits_flow_into_saved_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    let (store, _) = generated();
    let mut store = store.with_backing(&path);

    apply_edit(
        &mut store,
        &TableEdit::SetFamily {
            row: 0,
            value: " Dairy ".into(),
        },
    )
    .unwrap();
    apply_edit(
        &mut store,
        &TableEdit::SetCategory {
            row: 0,
            value: "Milk".into(),
        },
    )
    .unwrap();
    store.persist().unwrap();

    let reloaded = AssignmentStore::load(&parser::parse_file(&path).unwrap()).unwrap();
    assert_eq!(reloaded.records()[0].family, "Dairy");
    assert_eq!(reloaded.records()[0].category, "Milk");
}

#[test]
fn edit_past_last_row_is_rejected() {
    let (mut store, _) = generated();
    let err = apply_edit(
        &mut store,
        &TableEdit::SetCategory {
            row: 99,
            value: "Milk".into(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ShelfmapError::RowOutOfRange { row: 99, len: 16 }));
}

#[test]
fn loads_hand_made_table_with_text_numbers() {
    let xlsx = XlsxBuilder::new()
        .sheet(
            SheetBuilder::new("Shelves")
                .row(
                    1,
                    &["Section", "Aisle", "Side", "Level", "Shelf", "Family", "Category"],
                )
                .row(2, &["12", "1", "1", "1", "1", "Dairy", "Milk"])
                .cell("A4", "12")
                .cell("B4", 1)
                .cell("C4", 1)
                .cell("D4", 1)
                .cell("E4", 2),
        )
        .build();
    let store = AssignmentStore::load(&parser::parse(&xlsx).unwrap()).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.find_by_coordinate("12", 1, 1, 1, 1).unwrap().category, "Milk");
    assert!(store.find_by_coordinate("12", 1, 1, 1, 2).unwrap().family.is_empty());
}

#[test]
fn repeated_coordinate_in_file_is_rejected() {
    let xlsx = XlsxBuilder::new()
        .sheet(
            SheetBuilder::new("Shelves")
                .row(1, &["Section", "Aisle", "Side", "Level", "Shelf"])
                .row(2, &["A", "1", "1", "1", "1"])
                .row(3, &["A", "1", "1", "1", "1"]),
        )
        .build();
    let err = AssignmentStore::load(&parser::parse(&xlsx).unwrap()).unwrap_err();
    assert!(matches!(err, ShelfmapError::DuplicateCoordinate(_)));
}

#[test]
fn save_to_unwritable_path_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = generated();
    let mut store = store.with_backing(dir.path().join("missing-dir").join("out.xlsx"));
    store.assign(&[GridCell::new(1, 1)], &SideRef::new("A", 1, 1), "Dairy", "Milk");

    assert!(matches!(store.persist(), Err(ShelfmapError::Io(_))));
    assert_eq!(store.find_by_coordinate("A", 1, 1, 1, 1).unwrap().family, "Dairy");
}
