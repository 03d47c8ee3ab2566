mod common;
use common::{assert_grid_invariants, memory_store, rows_in_column};
use serde_json::json;
use shelfmap::core::undo::{Snapshot, UNDO_DEPTH, UndoManager};
use shelfmap::errors::AppError;
use shelfmap::core::placement::compact_column_in_place;
use shelfmap::models::{Cell, Placement, Product, ROWS};

#[test]
fn test_place_in_empty_column_takes_first_row() {
    let mut store = memory_store();
    let id = store.add_product("Milk", "", "").expect("added");

    let cell = store.place_in_column(&id, 2).expect("placed");

    assert_eq!(cell, Cell::new(0, 2));
    assert_eq!(store.get(&id).unwrap().cell(), Some(Cell::new(0, 2)));
    assert_eq!(store.count_occupied(), 1);
    assert_grid_invariants(&store);
}

#[test]
fn test_full_column_rejects_eighth_placement() {
    let mut store = memory_store();
    for i in 0..ROWS {
        let id = store.add_product(&format!("P{i}"), "", "").unwrap();
        store.place_in_column(&id, 2).unwrap();
    }
    let extra = store.add_product("Extra", "", "").unwrap();
    let before = store.products().to_vec();
    let undo_before = store.undo_len();

    let err = store.place_in_column(&extra, 2).unwrap_err();

    assert!(matches!(err, AppError::ColumnFull { col: 2 }));
    assert_eq!(store.products(), &before[..]);
    assert_eq!(store.undo_len(), undo_before);
    assert_eq!(rows_in_column(&store, 2).len(), ROWS as usize);
    assert_eq!(store.get(&extra).unwrap().placement, Placement::Unplaced);
}

#[test]
fn test_place_rejects_product_in_picking_or_already_placed() {
    let mut store = memory_store();
    let a = store.add_product("A", "", "").unwrap();
    store.place_in_column(&a, 0).unwrap();
    assert!(matches!(
        store.place_in_column(&a, 1),
        Err(AppError::AlreadyPlaced(_))
    ));

    store.enter_picking(&a).unwrap();
    assert!(matches!(
        store.place_in_column(&a, 1),
        Err(AppError::InPicking(_))
    ));
    assert!(matches!(
        store.place_in_column(&a, 10),
        Err(AppError::InvalidColumn(10))
    ));
}

#[test]
fn test_unplace_compacts_vacated_column() {
    let mut store = memory_store();
    let mut ids = Vec::new();
    for r in 0..5 {
        let name = if r == 3 { "Milk".to_string() } else { format!("P{r}") };
        let id = store
            .place_at_cell(Cell::new(r, 2), &name, "", "")
            .unwrap()
            .unwrap();
        ids.push(id);
    }

    store.unplace(&ids[3]).unwrap();

    assert_eq!(store.get(&ids[3]).unwrap().placement, Placement::Unplaced);
    assert_eq!(store.get(&ids[4]).unwrap().cell(), Some(Cell::new(3, 2)));
    assert_eq!(rows_in_column(&store, 2), vec![0, 1, 2, 3]);

    store.compact_column(2).unwrap();
    assert_eq!(store.get(&ids[4]).unwrap().cell(), Some(Cell::new(3, 2)));
    assert_grid_invariants(&store);
}

#[test]
fn test_compaction_closes_gaps_in_row_order() {
    let mut store = memory_store();
    store.import_products(&[
        json!({"id": "a", "name": "A", "row": 6, "col": 3, "dateAdded": "2025-01-03T00:00:00Z"}),
        json!({"id": "b", "name": "B", "row": 1, "col": 3, "dateAdded": "2025-01-02T00:00:00Z"}),
        json!({"id": "c", "name": "C", "row": 4, "col": 3, "dateAdded": "2025-01-01T00:00:00Z"}),
        json!({"id": "d", "name": "D", "row": 2, "col": 5, "dateAdded": "2025-01-01T00:00:00Z"}),
    ]);

    store.compact_column(3).unwrap();

    assert_eq!(store.get("b").unwrap().cell(), Some(Cell::new(0, 3)));
    assert_eq!(store.get("c").unwrap().cell(), Some(Cell::new(1, 3)));
    assert_eq!(store.get("a").unwrap().cell(), Some(Cell::new(2, 3)));
    assert_eq!(store.get("d").unwrap().cell(), Some(Cell::new(2, 5)));
    assert_eq!(rows_in_column(&store, 3), vec![0, 1, 2]);
}

#[test]
fn test_compaction_demotes_rows_beyond_grid_height() {
    let rows = [8, 0, 3, 12, 1, 5, 2, 6, 4];
    let mut products: Vec<Product> = rows
        .iter()
        .map(|&r| Product::new_at(Cell::new(r, 4), &format!("P{r}"), "", ""))
        .collect();
    products.push(Product::new_at(Cell::new(9, 1), "Other", "", ""));

    compact_column_in_place(&mut products, 4);

    let name_at = |row: i64| {
        products
            .iter()
            .find(|p| p.cell() == Some(Cell::new(row, 4)))
            .map(|p| p.name.as_str())
    };
    let kept: Vec<_> = (0..ROWS).map(|r| name_at(r).unwrap()).collect();
    assert_eq!(kept, vec!["P0", "P1", "P2", "P3", "P4", "P5", "P6"]);

    for name in ["P8", "P12"] {
        let p = products.iter().find(|p| p.name == name).unwrap();
        assert_eq!(p.placement, Placement::Unplaced);
    }
    // other columns are left alone, even when out of range
    assert_eq!(products[9].cell(), Some(Cell::new(9, 1)));
}

#[test]
fn test_invalid_cell_error_does_not_overflow() {
    let mut store = memory_store();

    let err = store.place_at_cell(Cell::new(i64::MAX, 0), "X", "", "").unwrap_err();

    assert!(matches!(err, AppError::InvalidCell { row: i64::MAX, col: 1 }));
    assert_eq!(Cell::new(i64::MAX, i64::MAX).label(), format!("R{0}C{0}", i64::MAX));
    assert!(store.products().is_empty());
}

#[test]
fn test_move_goes_to_bottom_of_target_and_compacts_origin() {
    let mut store = memory_store();
    let a = store.add_product("A", "", "").unwrap();
    let b = store.add_product("B", "", "").unwrap();
    let c = store.add_product("C", "", "").unwrap();
    store.place_in_column(&a, 0).unwrap();
    store.place_in_column(&b, 0).unwrap();
    store.place_in_column(&c, 1).unwrap();

    let cell = store.move_to_column(&a, 1).unwrap();

    assert_eq!(cell, Cell::new(1, 1));
    assert_eq!(store.get(&b).unwrap().cell(), Some(Cell::new(0, 0)));
    assert_grid_invariants(&store);
}

#[test]
fn test_move_into_full_column_restores_origin() {
    let mut store = memory_store();
    for i in 0..ROWS {
        let id = store.add_product(&format!("F{i}"), "", "").unwrap();
        store.place_in_column(&id, 4).unwrap();
    }
    let a = store.add_product("A", "", "").unwrap();
    let b = store.add_product("B", "", "").unwrap();
    store.place_in_column(&a, 0).unwrap();
    store.place_in_column(&b, 0).unwrap();

    let err = store.move_to_column(&a, 4).unwrap_err();

    assert!(matches!(err, AppError::ColumnFull { col: 4 }));
    // origin was compacted first, so A lands below B
    assert_eq!(store.get(&b).unwrap().cell(), Some(Cell::new(0, 0)));
    assert_eq!(store.get(&a).unwrap().cell(), Some(Cell::new(1, 0)));
    assert_eq!(rows_in_column(&store, 4).len(), ROWS as usize);
    assert_grid_invariants(&store);
}

#[test]
fn test_move_of_unplaced_product_places_it() {
    let mut store = memory_store();
    let a = store.add_product("A", "", "").unwrap();

    let cell = store.move_to_column(&a, 9).unwrap();

    assert_eq!(cell, Cell::new(0, 9));
}

#[test]
fn test_picking_conflict_on_trimmed_names() {
    let mut store = memory_store();
    let first = store.add_product(" Eggs ", "", "").unwrap();
    let second = store.add_product("Eggs", "", "").unwrap();
    store.place_in_column(&second, 1).unwrap();
    store.enter_picking(&first).unwrap();
    let before = store.products().to_vec();

    let err = store.enter_picking(&second).unwrap_err();

    assert!(matches!(err, AppError::PickingConflict { ref name } if name == "Eggs"));
    assert_eq!(store.products(), &before[..]);
    assert_eq!(store.get(&second).unwrap().cell(), Some(Cell::new(0, 1)));
}

#[test]
fn test_picking_round_trip_restores_cell() {
    let mut store = memory_store();
    let a = store.add_product("A", "", "").unwrap();
    let b = store.add_product("B", "", "").unwrap();
    store.place_in_column(&a, 6).unwrap();
    store.place_in_column(&b, 6).unwrap();

    store.enter_picking(&b).unwrap();
    assert_eq!(
        store.get(&b).unwrap().placement,
        Placement::Picking {
            saved: Some(Cell::new(1, 6))
        }
    );
    assert_grid_invariants(&store);

    let back = store.exit_picking(&b).unwrap();
    assert_eq!(back, Placement::Placed(Cell::new(1, 6)));
    assert_eq!(store.count_occupied(), 2);
}

#[test]
fn test_exit_picking_into_reused_cell_is_settled_by_sanitizer() {
    let mut store = memory_store();
    let old = store.add_product("Old", "", "").unwrap();
    store.place_in_column(&old, 0).unwrap();
    store.enter_picking(&old).unwrap();

    // a newer product takes the vacated cell
    let newer = store.add_product("New", "", "").unwrap();
    store.place_in_column(&newer, 0).unwrap();

    store.exit_picking(&old).unwrap();

    assert_eq!(store.get(&newer).unwrap().cell(), Some(Cell::new(0, 0)));
    assert_eq!(store.get(&old).unwrap().placement, Placement::Unplaced);
    let report = store.last_commit().unwrap();
    assert_eq!(report.sanitized.collisions, vec![old.clone()]);
    assert_grid_invariants(&store);
}

#[test]
fn test_exit_picking_requires_picking() {
    let mut store = memory_store();
    let a = store.add_product("A", "", "").unwrap();
    assert!(matches!(store.exit_picking(&a), Err(AppError::NotPicking(_))));
}

#[test]
fn test_place_at_cell_creates_then_edits_in_place() {
    let mut store = memory_store();
    let cell = Cell::new(5, 7);

    assert_eq!(store.place_at_cell(cell, "", " ", "").unwrap(), None);
    assert_eq!(store.undo_len(), 0);

    let id = store.place_at_cell(cell, "Flour", "010/25", "GEN 26").unwrap().unwrap();
    let again = store.place_at_cell(cell, "Flour 00", "010/25", "GEN 26").unwrap().unwrap();

    assert_eq!(id, again);
    assert_eq!(store.products().len(), 1);
    assert_eq!(store.product_at(cell).unwrap().name, "Flour 00");
    let kinds: Vec<&str> = store.events().iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["add", "edit"]);

    assert!(matches!(
        store.place_at_cell(Cell::new(7, 0), "X", "", ""),
        Err(AppError::InvalidCell { row: 8, col: 1 })
    ));
}

#[test]
fn test_edit_rejected_while_in_picking() {
    let mut store = memory_store();
    let a = store.add_product("A", "", "").unwrap();
    store.enter_picking(&a).unwrap();

    assert!(matches!(
        store.edit_product(&a, "B", "", ""),
        Err(AppError::InPicking(_))
    ));
    assert_eq!(store.get(&a).unwrap().name, "A");
}

#[test]
fn test_delete_compacts_and_logs_remove() {
    let mut store = memory_store();
    let a = store.add_product("A", "", "").unwrap();
    let b = store.add_product("B", "", "").unwrap();
    store.place_in_column(&a, 3).unwrap();
    store.place_in_column(&b, 3).unwrap();

    let removed = store.delete(&a).unwrap();

    assert_eq!(removed.name, "A");
    assert!(store.get(&a).is_none());
    assert_eq!(store.get(&b).unwrap().cell(), Some(Cell::new(0, 3)));
    assert_eq!(store.events().last().unwrap().kind.as_str(), "remove");
}

#[test]
fn test_import_collision_first_in_list_wins_on_equal_dates() {
    let mut store = memory_store();

    store.import_products(&[
        json!({"name": "X", "row": 2, "col": 2}),
        json!({"name": "Y", "row": 2, "col": 2}),
    ]);

    let x = store.products().iter().find(|p| p.name == "X").unwrap();
    let y = store.products().iter().find(|p| p.name == "Y").unwrap();
    assert_eq!(x.cell(), Some(Cell::new(2, 2)));
    assert_eq!(y.placement, Placement::Unplaced);
    assert_eq!(store.count_occupied(), 1);
}

#[test]
fn test_import_collision_most_recent_wins() {
    let mut store = memory_store();

    store.import_products(&[
        json!({"name": "X", "row": 2, "col": 2, "dateAdded": "2025-01-01T08:00:00Z"}),
        json!({"name": "Y", "row": 2, "col": 2, "dateAdded": "2025-03-01T08:00:00Z"}),
        json!({"name": "Z", "row": 9, "col": 2, "dateAdded": "2025-03-02T08:00:00Z"}),
    ]);

    assert_eq!(store.products()[0].name, "Z");
    let y = store.products().iter().find(|p| p.name == "Y").unwrap();
    assert_eq!(y.cell(), Some(Cell::new(2, 2)));
    let report = store.last_commit().unwrap();
    assert_eq!(report.sanitized.out_of_bounds.len(), 1);
    assert_eq!(report.sanitized.collisions.len(), 1);
    assert_grid_invariants(&store);
}

#[test]
fn test_undo_restores_products_and_events() {
    let mut store = memory_store();
    let a = store.add_product("A", "L1", "MAR 26").unwrap();
    store.place_in_column(&a, 1).unwrap();
    let products = store.products().to_vec();
    let events = store.events().to_vec();

    store.delete(&a).unwrap();
    assert!(store.undo());

    assert_eq!(store.products(), &products[..]);
    assert_eq!(store.events(), &events[..]);
    assert_eq!(store.count_occupied(), 1);
}

#[test]
fn test_undo_on_empty_history() {
    let mut store = memory_store();
    assert!(!store.can_undo());
    assert!(!store.undo());
}

#[test]
fn test_undo_keeps_only_most_recent_snapshots() {
    let mut mgr = UndoManager::default();
    for t in 0..=UNDO_DEPTH as i64 {
        mgr.push(Snapshot {
            state: Vec::new(),
            events: Vec::new(),
            t,
        });
    }

    assert_eq!(mgr.len(), UNDO_DEPTH);
    let kept: Vec<i64> = mgr.iter().map(|s| s.t).collect();
    assert_eq!(kept, (1..=UNDO_DEPTH as i64).collect::<Vec<_>>());
    assert_eq!(mgr.pop().map(|s| s.t), Some(UNDO_DEPTH as i64));
}

#[test]
fn test_store_undo_history_is_bounded() {
    let mut store = memory_store();
    for i in 0..15 {
        store.add_product(&format!("P{i}"), "", "").unwrap();
    }

    assert_eq!(store.undo_len(), UNDO_DEPTH);
    for _ in 0..UNDO_DEPTH {
        assert!(store.undo());
    }
    assert!(!store.undo());
    assert_eq!(store.products().len(), 5);
}

#[test]
fn test_invariants_hold_over_mixed_operations() {
    let mut store = memory_store();
    let mut ids = Vec::new();
    for i in 0..30 {
        ids.push(store.add_product(&format!("Item {}", i % 12), "", "").unwrap());
    }

    // deterministic pseudo-random walk over the placement operations
    let mut seed: u64 = 0x5eed;
    for _ in 0..400 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let id = &ids[(seed >> 33) as usize % ids.len()];
        let col = ((seed >> 20) % 10) as i64;
        let _ = match (seed >> 60) % 6 {
            0 => store.place_in_column(id, col).map(|_| ()),
            1 => store.unplace(id),
            2 => store.move_to_column(id, col).map(|_| ()),
            3 => store.enter_picking(id),
            4 => store.exit_picking(id).map(|_| ()),
            _ => store.compact_column(col),
        };
        assert_grid_invariants(&store);
    }
}
