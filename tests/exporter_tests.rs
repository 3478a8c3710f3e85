// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use payoff::{cli, commands::exporter, db};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for (name, balance, min) in [("Small", "100", "50"), ("Large", "1000", "50")] {
        conn.execute(
            "INSERT INTO debts(name, balance, rate, min_payment) VALUES (?1, ?2, '0', ?3)",
            params![name, balance, min],
        )
        .unwrap();
    }
    conn
}

fn export(conn: &Connection, format: &str, out: &str) {
    let matches = cli::build_cli().get_matches_from([
        "payoff",
        "export",
        "schedule",
        "--strategy",
        "snowball",
        "--format",
        format,
        "--out",
        out,
        "--extra",
        "100",
        "--start",
        "2025-01",
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_schedule_json_is_month_ordered() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("ledger.json");
    export(&conn, "json", &out_path.to_string_lossy());

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
    assert_eq!(rows.len(), 7);

    assert_eq!(rows[0]["month"], "2025-01");
    assert_eq!(rows[0]["debt"], "Small");
    assert_eq!(rows[1]["debt"], "Large");
    assert_eq!(rows[6]["month"], "2025-06");
    assert_eq!(rows[6]["period"], 6);

    let amount = |v: &serde_json::Value| v.as_str().unwrap().parse::<Decimal>().unwrap();
    assert_eq!(amount(&rows[2]["payment"]), Decimal::from(200));
    assert!(amount(&rows[6]["balance"]).is_zero());
}

#[test]
fn export_schedule_csv_has_header() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("ledger.csv");
    export(&conn, "csv", &out_path.to_string_lossy());

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "month",
            "period",
            "debt",
            "payment",
            "interest",
            "principal",
            "capitalized_interest",
            "balance"
        ]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 7);
    assert_eq!(&records[0][2], "Small");
    assert_eq!(&records[6][0], "2025-06");
}

#[test]
fn export_rejects_unknown_format() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("ledger.xml").to_string_lossy().to_string();
    let err = cli::build_cli()
        .try_get_matches_from([
            "payoff",
            "export",
            "schedule",
            "--strategy",
            "avalanche",
            "--format",
            "xml",
            "--out",
            out.as_str(),
        ])
        .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    assert!(!dir.path().join("ledger.xml").exists());
}
