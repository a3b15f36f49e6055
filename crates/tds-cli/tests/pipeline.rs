//! Integration tests for the local pipeline.

use std::fs;
use std::path::Path;

use tds_cli::config::Config;
use tds_cli::pipeline::{Destination, ReshapeRequest, decode, load_and_reshape, run_local};
use tds_ingest::SheetLayout;
use tds_output::SqliteSink;
use tds_transform::{CategoryPolicy, DEFAULT_METADATA_KEYS};
use tempfile::TempDir;

const PUBLISHED: &str = "\
Provider Time & Distance Standards,,,,,,
COUNTY,ST,COUNTY DESIGNA-TION,Cardiology,,Oncology,
,,,123,,200,
,,,Time,Distance,Time,Distance
Wake,NC,Metro,12.5,8,30,20
Durham,NC,Micro,,9,35,
";

fn metadata_keys() -> Vec<String> {
    DEFAULT_METADATA_KEYS.map(String::from).to_vec()
}

fn write_sheet(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("published.csv");
    fs::write(&path, PUBLISHED).expect("write sheet");
    path
}

#[test]
fn decode_classifies_header() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_sheet(dir.path());

    let decoded = decode(&input, None, &SheetLayout::default(), &metadata_keys()).expect("decode");

    assert_eq!(
        decoded.header.metadata.keys().collect::<Vec<_>>(),
        vec!["COUNTY", "ST", "COUNTY DESIGNA-TION"]
    );
    assert_eq!(decoded.header.measurements.len(), 4);
    assert_eq!(decoded.header.categories().len(), 2);
}

#[test]
fn reshape_csv_into_sqlite() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_sheet(dir.path());
    let database = dir.path().join("db").join("time_distance.db");
    let keys = metadata_keys();
    let request = ReshapeRequest {
        input: &input,
        sheet: None,
        layout: SheetLayout::default(),
        metadata_keys: &keys,
        policy: CategoryPolicy::PerCategory,
    };
    let destination = Destination::Sqlite {
        database: database.clone(),
        table: "time_distance_data".to_string(),
    };

    let summary = run_local(&request, &destination).expect("run");

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.records, 4);
    assert_eq!(summary.written, 4);

    let sink = SqliteSink::open(&database).expect("reopen");
    let (designation, time): (String, String) = sink
        .connection()
        .query_row(
            "SELECT county_designation, time FROM time_distance_data \
             WHERE county = 'Durham' AND specialty_code = '123'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("query");
    assert_eq!(designation, "Micro");
    assert_eq!(time, "Missing");

    let (time, distance): (String, String) = sink
        .connection()
        .query_row(
            "SELECT time, distance FROM time_distance_data \
             WHERE county = 'Wake' AND specialty_code = '200'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("query");
    assert_eq!((time.as_str(), distance.as_str()), ("30", "20"));

    // Second run replaces rather than appends.
    run_local(&request, &destination).expect("rerun");
    let count: i64 = sink
        .connection()
        .query_row("SELECT COUNT(*) FROM time_distance_data", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 4);
}

#[test]
fn last_wins_policy_emits_one_record_per_row() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_sheet(dir.path());
    let keys = metadata_keys();
    let request = ReshapeRequest {
        input: &input,
        sheet: None,
        layout: SheetLayout::default(),
        metadata_keys: &keys,
        policy: CategoryPolicy::LastWins,
    };

    let (_, records) = load_and_reshape(&request).expect("reshape");

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].get("specialty_description").unwrap().to_string(),
        "Oncology"
    );
}

#[test]
fn reshape_csv_export_snapshot() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_sheet(dir.path());
    let output = dir.path().join("records.csv");
    let keys = vec!["COUNTY".to_string(), "ST".to_string()];
    let request = ReshapeRequest {
        input: &input,
        sheet: None,
        layout: SheetLayout::default(),
        metadata_keys: &keys,
        policy: CategoryPolicy::PerCategory,
    };

    run_local(&request, &Destination::Csv(output.clone())).expect("run");

    let contents = fs::read_to_string(&output).expect("read csv");
    insta::assert_snapshot!(contents, @r"
    county,st,specialty_description,specialty_code,time,distance
    Wake,NC,Cardiology,123,12.5,8
    Wake,NC,Oncology,200,30,20
    Durham,NC,Cardiology,123,Missing,9
    Durham,NC,Oncology,200,35,Missing
    ");
}

#[test]
fn config_file_loads_with_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("JsonConfigFile.json");
    fs::write(
        &path,
        r#"{
            "url": "https://example.org/files/provider-time-distance.xlsx",
            "file_pattern": "Provider Time Distance",
            "sheets": { "provider_time_distance": "Provider Time & Distance" },
            "policy": "last_wins",
            "output": { "table": "td" }
        }"#,
    )
    .expect("write config");

    let config = Config::load(&path).expect("load");

    assert_eq!(config.policy, CategoryPolicy::LastWins);
    assert_eq!(config.output.table, "td");
    assert_eq!(config.output.database, Path::new("time_distance.db"));
    assert_eq!(config.file_name(), "Provider_Time_Distance.xlsx");
    assert_eq!(config.sheet(), "Provider Time & Distance");
}

#[test]
fn missing_config_file_reports_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.json");

    let err = Config::load(&path).unwrap_err();

    assert!(format!("{err:#}").contains("absent.json"));
}
