// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use payoff::{cli, commands::importer, db, utils};
use rusqlite::Connection;
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn write_csv(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn import(conn: &mut Connection, path: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["payoff", "import", "debts", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("import command not parsed");
    }
}

#[test]
fn import_debts_inserts_rows() {
    let mut conn = setup();
    let f = write_csv(
        "name,balance,rate,min_payment\n\
         Visa, 2750.55 ,22.99,80\n\
         Car,8400,6.9,210\n",
    );
    import(&mut conn, f.path().to_str().unwrap()).unwrap();

    let debts = utils::load_debts(&conn).unwrap();
    assert_eq!(debts.len(), 2);
    assert_eq!(debts[0].name, "Visa");
    assert_eq!(debts[0].principal, dec!(2750.55));
    assert_eq!(debts[1].name, "Car");
    assert_eq!(debts[1].minimum_payment, dec!(210));
}

#[test]
fn import_updates_existing_names() {
    let mut conn = setup();
    let first = write_csv("name,balance,rate,min_payment\nVisa,2750.55,22.99,80\n");
    import(&mut conn, first.path().to_str().unwrap()).unwrap();
    let second = write_csv("name,balance,rate,min_payment\nVisa,2100,19.99,75\n");
    import(&mut conn, second.path().to_str().unwrap()).unwrap();

    let debts = utils::load_debts(&conn).unwrap();
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0].principal, dec!(2100));
    assert_eq!(debts[0].annual_rate_percent, dec!(19.99));
}

#[test]
fn bad_row_rolls_back_whole_file() {
    let mut conn = setup();
    let f = write_csv(
        "name,balance,rate,min_payment\n\
         Visa,2750.55,22.99,80\n\
         Broken,100,-4,10\n",
    );
    let err = import(&mut conn, f.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Row 3"));
    assert!(utils::load_debts(&conn).unwrap().is_empty());
}
