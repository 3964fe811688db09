//! Integration tests for the `seedvault` binary
//!
//! These tests run the built binary and check exit status and JSON output.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SESSION: &str = r#"
[SDS]
sds_path = /data/SDS

[DATABASE]
db_path = /data/SDS/database.sqlite

[PROCESSING]
num_processes = 4
gap_tolerance = 60
download_type = event
logging = debug

[AUTH]
IU.ANMO = alice:s3cret
GE.* = bob:hunter2

[WAVEFORM]
client = IRIS
channel_pref = HH,BH
location_pref = 00,10
days_per_request = 3

[STATION]
client = IRIS
network = IU,GE
station = ANMO,WLF
location = 00
channel = ?H?,?N?
force_stations = IU.ANMO,GE.WLF
exclude_stations = IU.COLA
local_inventory = /data/inventory.xml
includerestricted = true
level = response
starttime = 2024-08-20T00:00:00
endtime = 2024-09-20T00:00:00
startbefore =
startafter =
endbefore =
endafter = 2024-01-01T00:00:00
geo_constraint = bounding
minlatitude = -10.5
maxlatitude = 45
minlongitude = 100
maxlongitude = 150.25

[EVENT]
client = USGS
model = ak135
starttime = 2024-08-20T00:00:00
endtime = 2024-09-20T00:00:00
before_p_sec = 20
after_p_sec = 130
min_depth = 0
max_depth = 700
minmagnitude = 6
maxmagnitude = 9.5
minradius = 30
maxradius = 90
includeallorigins = false
includeallmagnitudes = true
includearrivals = false
limit = 100
offset = 5
local_catalog =
contributor = ISC
updatedafter = 2024-01-01T00:00:00
geo_constraint = circle
latitude = 35.5
longitude = 139.7
minsearchradius = 0
maxsearchradius = 20
"#;

fn seedvault(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seedvault"))
        .args(args)
        .env("RUST_LOG", "off")
        .env_remove("SEEDVAULT_CONFIG")
        .env_remove("SEEDVAULT_SDS_PATH")
        .env_remove("SEEDVAULT_DB_PATH")
        .env_remove("SEEDVAULT_NUM_PROCESSES")
        .env_remove("SEEDVAULT_DOWNLOAD_TYPE")
        .output()
        .expect("Failed to execute command")
}

fn write_config(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn json_stdout(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_check_reports_clean_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);

    let output = seedvault(&["check", arg(&config), "--strict", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["valid"], true);
    assert_eq!(parsed["data"]["errors"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_check_strict_fails_on_errors() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "broken.cfg", "[SDS]\nsds_path = /data/SDS\n");

    // Without --strict the problems are reported but the command succeeds
    let lenient = seedvault(&["check", arg(&config), "--json"]);
    assert!(lenient.status.success());
    let parsed = json_stdout(&lenient);
    assert_eq!(parsed["data"]["valid"], false);
    let errors = parsed["data"]["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["section"] == "STATION"));

    let strict = seedvault(&["check", arg(&config), "--strict"]);
    assert!(!strict.status.success());
}

#[test]
fn test_check_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.cfg");

    let output = seedvault(&["check", arg(&missing)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"), "{}", stderr);
}

#[test]
fn test_inspect_shows_cli_overrides_and_redacts_credentials() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);

    let output = seedvault(&["inspect", arg(&config), "--num-processes", "9", "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    let values = parsed["data"]["values"].as_array().unwrap();
    let find = |key: &str| values.iter().find(|v| v["key"] == key).cloned().unwrap();

    let processes = find("PROCESSING.num_processes");
    assert_eq!(processes["value"], "9");
    assert_eq!(processes["source"], "Cli");

    let sds = find("SDS.sds_path");
    assert_eq!(sds["value"], "/data/SDS");
    assert_eq!(sds["source"], "File");

    for value in values.iter().filter(|v| v["key"].as_str().unwrap().starts_with("AUTH.")) {
        assert_eq!(value["value"], "<redacted>");
    }
}

#[test]
fn test_invalid_download_type_flag_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);

    let output = seedvault(&["inspect", arg(&config), "--download-type", "hourly"]);
    assert!(!output.status.success());
}

#[test]
fn test_export_then_diff_shows_no_changes() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);
    let exported = dir.path().join("exported.cfg");

    let output = seedvault(&["export", arg(&config), "--out", arg(&exported)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(exported.exists());

    let output = seedvault(&["diff", arg(&config), arg(&exported), "--json"]);
    assert!(output.status.success());
    let parsed = json_stdout(&output);
    assert_eq!(parsed["data"]["changes"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_diff_lists_changed_fields() {
    let dir = TempDir::new().unwrap();
    let before = write_config(&dir, "before.cfg", SESSION);
    let after = write_config(
        &dir,
        "after.cfg",
        &SESSION.replace("num_processes = 4", "num_processes = 8"),
    );

    let output = seedvault(&["diff", arg(&before), arg(&after), "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    let changes = parsed["data"]["changes"].as_array().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["path"], "processing.num_processes");
    assert_eq!(changes[0]["before"], 4);
    assert_eq!(changes[0]["after"], 8);
}

#[test]
fn test_snapshot_save_and_show() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);
    let snapshot = dir.path().join("session.svsn");

    let output = seedvault(&["snapshot", "save", arg(&config), arg(&snapshot), "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(snapshot.exists());

    let output = seedvault(&["snapshot", "show", arg(&snapshot), "--json"]);
    assert!(output.status.success());
    let parsed = json_stdout(&output);
    assert_eq!(parsed["data"]["version"], 1);
    assert_eq!(parsed["data"]["sds_path"], "/data/SDS");
    assert_eq!(parsed["data"]["download_type"], "event");
    assert_eq!(parsed["data"]["has_event_search"], true);
}

#[test]
fn test_snapshot_save_reports_written_size() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);
    let snapshot = dir.path().join("session.svsn");

    let output = seedvault(&["snapshot", "save", arg(&config), arg(&snapshot), "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let parsed = json_stdout(&output);
    let written = std::fs::metadata(&snapshot).unwrap().len();
    assert_eq!(parsed["data"]["bytes"], written);
    assert_eq!(parsed["data"]["version"], 1);
}

#[test]
fn test_snapshot_save_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);
    let snapshot = dir.path().join("absent").join("session.svsn");

    let output = seedvault(&["snapshot", "save", arg(&config), arg(&snapshot)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to write snapshot"));
}

#[test]
fn test_snapshot_show_rejects_text_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "session.cfg", SESSION);

    let output = seedvault(&["snapshot", "show", arg(&config)]);
    assert!(!output.status.success());
}
