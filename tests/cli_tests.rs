use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add_product, cmd, init_test_db, setup_test_db, temp_out};

#[test]
fn test_init_runs_migrations() {
    let db_path = setup_test_db("cli_init");

    cmd()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    cmd()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("init"));
}

#[test]
fn test_add_and_list() {
    let db_path = setup_test_db("cli_add_list");
    init_test_db(&db_path);

    add_product(&db_path, "Whole Milk", "123/25", "MAR 26");
    add_product(&db_path, "Eggs", "", "");

    cmd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Whole Milk"))
        .stdout(contains("Eggs"))
        .stdout(contains("2 product(s)"));

    cmd()
        .args(["--db", &db_path, "list", "--search", "milk"])
        .assert()
        .success()
        .stdout(contains("Whole Milk").and(contains("Eggs").not()));
}

#[test]
fn test_add_with_all_fields_empty_is_a_no_op() {
    let db_path = setup_test_db("cli_add_empty");
    init_test_db(&db_path);

    cmd()
        .args(["--db", &db_path, "add", "--name", "  "])
        .assert()
        .success()
        .stderr(contains("Nothing to add"));

    cmd()
        .args(["--db", &db_path, "undo"])
        .assert()
        .success()
        .stdout(contains("Nothing to undo"));
}

#[test]
fn test_place_and_map() {
    let db_path = setup_test_db("cli_place_map");
    init_test_db(&db_path);
    let id = add_product(&db_path, "Flour", "010/25", "");

    cmd()
        .args(["--db", &db_path, "place", &id[..6], "--col", "3"])
        .assert()
        .success()
        .stdout(contains("R1C3"));

    cmd()
        .args(["--db", &db_path, "map"])
        .assert()
        .success()
        .stdout(contains("Occupied: 1"))
        .stdout(contains("Flour"));

    cmd()
        .args(["--db", &db_path, "list", "--filter", "floor"])
        .assert()
        .success()
        .stdout(contains("R1C3"));
}

#[test]
fn test_place_asks_for_column_on_stdin() {
    let db_path = setup_test_db("cli_place_prompt");
    init_test_db(&db_path);
    let id = add_product(&db_path, "Sugar", "", "");

    cmd()
        .args(["--db", &db_path, "place", &id])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(contains("Operation cancelled"));

    cmd()
        .args(["--db", &db_path, "place", &id])
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout(contains("Columns with free rows"))
        .stdout(contains("R1C7"));
}

#[test]
fn test_place_rejects_invalid_column() {
    let db_path = setup_test_db("cli_place_invalid_col");
    init_test_db(&db_path);
    let id = add_product(&db_path, "Salt", "", "");

    cmd()
        .args(["--db", &db_path, "place", &id, "--col", "11"])
        .assert()
        .failure()
        .stderr(contains("Invalid column: 11"));
}

#[test]
fn test_full_column_fails_without_change() {
    let db_path = setup_test_db("cli_full_column");
    init_test_db(&db_path);

    for r in 1..=7 {
        cmd()
            .args([
                "--db",
                &db_path,
                "cell",
                &r.to_string(),
                "2",
                "--name",
                &format!("Box {r}"),
            ])
            .assert()
            .success();
    }
    let id = add_product(&db_path, "Overflow", "", "");

    cmd()
        .args(["--db", &db_path, "place", &id, "--col", "2"])
        .assert()
        .failure()
        .stderr(contains("Column 2 is full"));

    cmd()
        .args(["--db", &db_path, "list", "--filter", "shelf"])
        .assert()
        .success()
        .stdout(contains("Overflow"));
}

#[test]
fn test_move_into_full_column_reports_rollback() {
    let db_path = setup_test_db("cli_move_full");
    init_test_db(&db_path);

    for r in 1..=7 {
        cmd()
            .args(["--db", &db_path, "cell", &r.to_string(), "5", "--name", "Crate"])
            .assert()
            .success();
    }
    let id = add_product(&db_path, "Pallet", "", "");
    cmd()
        .args(["--db", &db_path, "place", &id, "--col", "1"])
        .assert()
        .success();

    cmd()
        .args(["--db", &db_path, "move", &id, "--col", "5"])
        .assert()
        .failure()
        .stderr(contains("is full"))
        .stderr(contains("R1C1"));
}

#[test]
fn test_picking_conflict_is_reported() {
    let db_path = setup_test_db("cli_picking_conflict");
    init_test_db(&db_path);
    let first = add_product(&db_path, " Eggs ", "", "");
    let second = add_product(&db_path, "Eggs", "", "");

    cmd()
        .args(["--db", &db_path, "pick", &first])
        .assert()
        .success();

    cmd()
        .args(["--db", &db_path, "pick", &second])
        .assert()
        .failure()
        .stderr(contains("already in picking"));

    cmd()
        .args(["--db", &db_path, "done", &first])
        .assert()
        .success()
        .stdout(contains("unplaced"));
}

#[test]
fn test_delete_then_undo() {
    let db_path = setup_test_db("cli_delete_undo");
    init_test_db(&db_path);
    let id = add_product(&db_path, "Yeast", "", "");

    cmd()
        .args(["--db", &db_path, "del", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    cmd()
        .args(["--db", &db_path, "del", &id, "--yes"])
        .assert()
        .success();

    cmd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Yeast").not());

    cmd()
        .args(["--db", &db_path, "undo"])
        .assert()
        .success()
        .stdout(contains("reverted"));

    cmd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Yeast"));
}

#[test]
fn test_unknown_id_fails() {
    let db_path = setup_test_db("cli_unknown_id");
    init_test_db(&db_path);

    cmd()
        .args(["--db", &db_path, "unplace", "doesnotexist"])
        .assert()
        .failure()
        .stderr(contains("No product matches id"));
}

#[test]
fn test_export_json_and_import_back() {
    let db_path = setup_test_db("cli_export_import");
    init_test_db(&db_path);
    let id = add_product(&db_path, "Pasta", "200/25", "DIC 26");
    cmd()
        .args(["--db", &db_path, "place", &id, "--col", "9"])
        .assert()
        .success();

    let out = temp_out("cli_export_import", "json");
    cmd()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("\"expiryText\": \"DIC 26\""));
    assert!(content.contains("\"col\": 8"));

    let other_db = setup_test_db("cli_export_import_target");
    init_test_db(&other_db);
    cmd()
        .args(["--db", &other_db, "import", "--file", &out, "--yes"])
        .assert()
        .success()
        .stdout(contains("Imported 1 products"));

    cmd()
        .args(["--db", &other_db, "map"])
        .assert()
        .success()
        .stdout(contains("Occupied: 1"))
        .stdout(contains("Pasta"));
}

#[test]
fn test_export_csv_uses_one_based_cells() {
    let db_path = setup_test_db("cli_export_csv");
    init_test_db(&db_path);
    cmd()
        .args(["--db", &db_path, "cell", "3", "4", "--name", "Oil", "--lot", "1/25"])
        .assert()
        .success();

    let out = temp_out("cli_export_csv", "csv");
    cmd()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,name,lot,expiryText,dateAdded,row,col,inPrelievo")
    );
    assert!(lines.next().is_some_and(|l| l.contains("Oil,1/25,,") && l.ends_with(",3,4,false")));
}

#[test]
fn test_export_existing_file_needs_confirmation() {
    let db_path = setup_test_db("cli_export_overwrite");
    init_test_db(&db_path);
    let out = temp_out("cli_export_overwrite", "json");
    fs::write(&out, "keep me").unwrap();

    cmd()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    cmd()
        .args(["--db", &db_path, "export", "--file", &out, "-f"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with('['));
}

#[test]
fn test_import_rejects_bad_payloads() {
    let db_path = setup_test_db("cli_import_bad");
    init_test_db(&db_path);
    add_product(&db_path, "Keep", "", "");

    let dir = tempfile::tempdir().expect("tempdir");
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ nope").unwrap();
    let object = dir.path().join("object.json");
    fs::write(&object, r#"{"name": "X"}"#).unwrap();

    cmd()
        .args(["--db", &db_path, "import", "--yes", "--file"])
        .arg(&broken)
        .assert()
        .failure()
        .stderr(contains("invalid JSON file"));

    cmd()
        .args(["--db", &db_path, "import", "--yes", "--file"])
        .arg(&object)
        .assert()
        .failure()
        .stderr(contains("invalid file format"));

    cmd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Keep"));
}

#[test]
fn test_stats_summary() {
    let db_path = setup_test_db("cli_stats");
    init_test_db(&db_path);
    add_product(&db_path, "Beans", "", "GEN 20");
    add_product(&db_path, "Beans", "", "");

    cmd()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Total:"))
        .stdout(contains("Beans (2)"))
        .stdout(contains("expired"));
}

#[test]
fn test_compact_rejects_bad_column() {
    let db_path = setup_test_db("cli_compact");
    init_test_db(&db_path);

    cmd()
        .args(["--db", &db_path, "compact", "3"])
        .assert()
        .success();

    cmd()
        .args(["--db", &db_path, "compact", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid column"));
}

#[test]
fn test_config_check_reports_missing_fields() {
    let home = tempfile::tempdir().expect("tempdir");
    let conf_dir = home.path().join(".shelfmap");
    fs::create_dir_all(&conf_dir).unwrap();
    fs::write(conf_dir.join("shelfmap.conf"), "database: /tmp/x.sqlite\n").unwrap();

    cmd()
        .env("HOME", home.path())
        .args(["config", "--check"])
        .assert()
        .success()
        .stderr(contains("Missing field: default_filter"))
        .stderr(contains("database").not());
}
