//! CLI settings loading with real INI files on disk.

use chrono::Duration;
use std::io::Write;

use tickerlens::cli::load_settings;
use tickerlens::domain::error::TickerlensError;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[data]
path = /srv/tickerlens/prices

[analysis]
benchmark = ^AXJO
benchmark_label = ASX 200
risk_free_rate = 0.04
lookback_years = 2
buffer_days = 60
"#;

#[test]
fn load_settings_valid_full() {
    let file = write_temp_ini(VALID_INI);
    let settings = load_settings(file.path()).unwrap();

    assert_eq!(settings.data_path.to_str().unwrap(), "/srv/tickerlens/prices");
    assert_eq!(settings.benchmark, "^AXJO");
    assert_eq!(settings.benchmark_label, "ASX 200");
    assert!((settings.risk.risk_free_rate - 0.04).abs() < f64::EPSILON);
    assert_eq!(settings.lookback, Duration::days(2 * 365));
    assert_eq!(settings.buffer, Duration::days(60));
}

#[test]
fn load_settings_uses_defaults() {
    let file = write_temp_ini("[data]\npath = /srv/prices\n");
    let settings = load_settings(file.path()).unwrap();

    assert_eq!(settings.benchmark, "^GSPC");
    assert_eq!(settings.benchmark_label, "S&P 500");
    assert!((settings.risk.risk_free_rate - 0.03).abs() < f64::EPSILON);
    assert!((settings.risk.trading_days_per_year - 252.0).abs() < f64::EPSILON);
    assert_eq!(settings.lookback, Duration::days(3 * 365));
    assert_eq!(settings.buffer, Duration::days(50));
}

#[test]
fn load_settings_missing_data_path() {
    let file = write_temp_ini("[analysis]\nbenchmark = ^GSPC\n");
    let result = load_settings(file.path());

    assert!(matches!(
        result,
        Err(TickerlensError::ConfigMissing { ref section, ref key })
            if section == "data" && key == "path"
    ));
}

#[test]
fn load_settings_rejects_nonpositive_lookback() {
    let file = write_temp_ini("[data]\npath = /srv/prices\n\n[analysis]\nlookback_years = 0\n");
    let result = load_settings(file.path());

    assert!(matches!(
        result,
        Err(TickerlensError::ConfigInvalid { ref key, .. }) if key == "lookback_years"
    ));
}

#[test]
fn load_settings_rejects_negative_buffer() {
    let file = write_temp_ini("[data]\npath = /srv/prices\n\n[analysis]\nbuffer_days = -5\n");
    let result = load_settings(file.path());

    assert!(matches!(
        result,
        Err(TickerlensError::ConfigInvalid { ref key, .. }) if key == "buffer_days"
    ));
}

#[test]
fn load_settings_missing_file() {
    let result = load_settings(std::path::Path::new("/nonexistent/config.ini"));
    assert!(matches!(result, Err(TickerlensError::ConfigParse { .. })));
}
