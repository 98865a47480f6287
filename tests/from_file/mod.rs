//! Tests against the actual crate binary: CSV dataset in, recommendation CSV
//! on stdout. Fixture dates are generated relative to today so they always
//! fall inside the analysis window.

use std::path::PathBuf;
use std::process::Command;

use chrono::{Days, Local, NaiveDate};

fn recent(days_ago: u64) -> NaiveDate {
    Local::now()
        .date_naive()
        .checked_sub_days(Days::new(days_ago))
        .unwrap()
}

fn write_fixtures(dir: &PathBuf) -> (PathBuf, PathBuf, PathBuf) {
    let clients = dir.join("clients.csv");
    let transactions = dir.join("transactions.csv");
    let transfers = dir.join("transfers.csv");

    std::fs::write(
        &clients,
        "client_code,name,status,age,city,avg_monthly_balance_KZT\n\
         1,Айгерим,Зарплатный клиент,31,Алматы,240000\n\
         2,Данияр,Премиальный клиент,45,Астана,8000000\n",
    )
    .unwrap();

    let mut tx_rows = String::from("client_code,date,category,amount,currency\n");
    for days_ago in [5u64, 15, 25, 35, 45, 55] {
        tx_rows.push_str(&format!("1,{},Такси,9000,KZT\n", recent(days_ago)));
    }
    tx_rows.push_str(&format!("1,{},Отели,120000,KZT\n", recent(20)));
    tx_rows.push_str(&format!("2,{},Кафе и рестораны,90000,KZT\n", recent(10)));
    std::fs::write(&transactions, tx_rows).unwrap();

    std::fs::write(
        &transfers,
        format!(
            "client_code,date,type,direction,amount,currency\n\
             1,{},salary_in,in,320000,KZT\n",
            recent(12)
        ),
    )
    .unwrap();

    (clients, transactions, transfers)
}

#[test]
fn binary_streams_a_recommendation_per_customer() {
    let dir = std::env::temp_dir().join(format!("reco-engine-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let (clients, transactions, transfers) = write_fixtures(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_reco-engine-rs"))
        .arg(&clients)
        .arg(&transactions)
        .arg(&transfers)
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "binary exited with non-zero status.\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("binary output was not valid UTF-8");
    assert!(stdout.starts_with("client_code,product,push_notification\r\n"));

    let mut reader = csv::ReaderBuilder::new().from_reader(stdout.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[1][0], "2");
    for row in &rows {
        assert!(!row[1].is_empty());
        let length = row[2].chars().count();
        assert!((50..=220).contains(&length), "bad message length {length}");
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn binary_without_arguments_fails_with_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_reco-engine-rs"))
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}
