use chrono::{TimeZone, Utc};
use countries_api::models::{Country, Status};
use countries_api::summary;
use std::fs;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn sample_country(name: &str, gdp: Option<f64>) -> Country {
    Country {
        name: name.into(),
        capital: None,
        region: Some("Europe".into()),
        population: Some(1_000_000),
        currency_code: Some("EUR".into()),
        currency_name: Some("Euro".into()),
        exchange_rate: None,
        estimated_gdp: gdp,
        flag_url: None,
        last_refreshed_at: None,
    }
}

#[test]
fn writes_png_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(summary::SUMMARY_FILE);

    let status = Status {
        total_countries: 250,
        status: "active".into(),
        last_refreshed_at: Some(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()),
    };
    let top = vec![
        sample_country("Germany", Some(4.1e12)),
        sample_country("France", Some(3.0e12)),
        sample_country("Italy", None),
    ];

    summary::draw_summary(&status, &top, &path).unwrap();

    let bytes = fs::read(&path).expect("file created");
    assert!(bytes.len() > PNG_MAGIC.len(), "png has content");
    assert_eq!(&bytes[..PNG_MAGIC.len()], &PNG_MAGIC);
}

#[test]
fn renders_before_any_refresh_data_exists() {
    // Empty store snapshot: zero rows, no refresh stamp, empty top list.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.png");

    let status = Status {
        total_countries: 0,
        status: "active".into(),
        last_refreshed_at: None,
    };

    summary::draw_summary(&status, &[], &path).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
