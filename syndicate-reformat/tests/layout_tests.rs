use chrono::{Datelike, Timelike};
use pretty_assertions::assert_eq;
use syndicate_reformat::{
    parse_datetime, Layout, LayoutMismatch, LayoutTable, ReformatError, DEFAULT_LAYOUTS,
};

// ── Default table ────────────────────────────────────────────────

#[test]
fn default_table_order() {
    let names = LayoutTable::shared().names();
    assert_eq!(
        names,
        vec![
            "YYYY-MM-DD HH:MM:SS",
            "YYYY-MM-DD HH:MM:SS ±HH:MM",
            "YYYY-MM-DD HH:MM:SS±HH:MM",
            "YYYY-MM-DDTHH:MM:SS",
            "YYYY-MM-DDTHH:MM:SS.ffffff",
        ]
    );
}

#[test]
fn default_matches_shared() {
    assert_eq!(&LayoutTable::default(), LayoutTable::shared());
    assert_eq!(LayoutTable::shared().layouts(), &DEFAULT_LAYOUTS[..]);
    assert_eq!(LayoutTable::shared().len(), 5);
    assert!(!LayoutTable::shared().is_empty());
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn space_separated_is_utc() {
    let ts = parse_datetime("2023-05-01 10:20:30").unwrap();
    assert_eq!(ts.offset().local_minus_utc(), 0);
    assert_eq!(ts.to_rfc3339(), "2023-05-01T10:20:30+00:00");
}

#[test]
fn offset_with_space() {
    let ts = parse_datetime("2023-05-01 10:20:30 +05:30").unwrap();
    assert_eq!(ts.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    assert_eq!(ts.hour(), 10);
    assert_eq!(ts.minute(), 20);
}

#[test]
fn offset_without_space() {
    let ts = parse_datetime("2023-05-01 10:20:30-07:00").unwrap();
    assert_eq!(ts.offset().local_minus_utc(), -7 * 3600);
    assert_eq!(ts.hour(), 10);
}

#[test]
fn t_separated() {
    let ts = parse_datetime("2023-05-01T10:20:30").unwrap();
    assert_eq!(
        (ts.year(), ts.month(), ts.day(), ts.hour(), ts.minute(), ts.second()),
        (2023, 5, 1, 10, 20, 30)
    );
    assert_eq!(ts.nanosecond(), 0);
}

#[test]
fn microseconds_preserved() {
    let ts = parse_datetime("2023-05-01T10:20:30.123456").unwrap();
    assert_eq!(ts.second(), 30);
    assert_eq!(ts.nanosecond(), 123_456_000);
}

#[test]
fn fraction_accepted_after_seconds_with_space() {
    let ts = parse_datetime("2023-05-01 10:20:30.5").unwrap();
    assert_eq!(ts.nanosecond(), 500_000_000);
}

#[test]
fn same_instant_from_different_layouts() {
    let a = parse_datetime("2023-05-01 10:20:30").unwrap();
    let b = parse_datetime("2023-05-01T10:20:30").unwrap();
    let c = parse_datetime("2023-05-01 10:20:30 +00:00").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn garbage_names_all_layouts() {
    let err = parse_datetime("garbage").unwrap_err();
    match &err {
        ReformatError::ExhaustedFormats { layouts, source } => {
            assert_eq!(layouts.len(), 5);
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let msg = err.to_string();
    assert!(msg.starts_with("failed to parse datetime from available formats"));
    for layout in DEFAULT_LAYOUTS.iter() {
        assert!(msg.contains(&*layout.name), "missing {}", layout.name);
    }
}

#[test]
fn trailing_input_rejected() {
    assert!(parse_datetime("2023-05-01 10:20:30 junk").is_err());
}

#[test]
fn date_only_rejected() {
    assert!(parse_datetime("2023-05-01").is_err());
}

#[test]
fn invalid_calendar_date_rejected() {
    assert!(parse_datetime("2023-02-30 10:20:30").is_err());
}

// ── Field widths and separators ──────────────────────────────────

fn assert_exhausted(input: &str) {
    match parse_datetime(input) {
        Err(ReformatError::ExhaustedFormats { layouts, .. }) => assert_eq!(layouts.len(), 5),
        other => panic!("{input:?} should match no layout, got {other:?}"),
    }
}

#[test]
fn short_year_rejected() {
    assert_exhausted("23-05-01 10:20:30");
    assert_exhausted("23-05-01T10:20:30");
}

#[test]
fn long_year_rejected() {
    assert_exhausted("12023-05-01 10:20:30");
}

#[test]
fn single_digit_fields_rejected() {
    assert_exhausted("2023-5-1 10:20:30");
    assert_exhausted("2023-05-01 1:20:30");
    assert_exhausted("2023-05-01T10:2:30");
    assert_exhausted("2023-05-01 10:20:3");
}

#[test]
fn signed_year_rejected() {
    assert_exhausted("+2023-05-01 10:20:30");
    assert_exhausted("-2023-05-01T10:20:30");
}

#[test]
fn extra_whitespace_rejected() {
    assert_exhausted(" 2023-05-01 10:20:30");
    assert_exhausted("2023-05-01  10:20:30");
    assert_exhausted("2023-05-01 10:20:30 ");
    assert_exhausted("2023-05-01 10:20:30  +05:30");
}

#[test]
fn offset_must_be_hh_colon_mm() {
    assert_exhausted("2023-05-01 10:20:30 +0530");
    assert_exhausted("2023-05-01 10:20:30+0530");
    assert_exhausted("2023-05-01 10:20:30 +5:30");
    assert_exhausted("2023-05-01 10:20:30 05:30");
    assert_exhausted("2023-05-01 10:20:30Z");
}

#[test]
fn fraction_needs_digits() {
    assert_exhausted("2023-05-01 10:20:30.");
    assert_exhausted("2023-05-01T10:20:30.");
}

#[test]
fn shape_mismatch_reports_layout_and_position() {
    let err = DEFAULT_LAYOUTS[0].parse("2023-5-01 10:20:30").unwrap_err();
    match &err {
        LayoutMismatch::Shape { layout, position } => {
            assert_eq!(layout, "YYYY-MM-DD HH:MM:SS");
            assert_eq!(*position, 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("at byte 5"));
}

#[test]
fn well_shaped_but_impossible_is_a_parse_error() {
    let err = DEFAULT_LAYOUTS[0].parse("2023-13-01 10:20:30").unwrap_err();
    assert!(matches!(err, LayoutMismatch::Parse(_)));
}

#[test]
fn well_formed_offsets_still_parse() {
    let ts = parse_datetime("2023-05-01 10:20:30.25 -03:00").unwrap();
    assert_eq!(ts.offset().local_minus_utc(), -3 * 3600);
    assert_eq!(ts.nanosecond(), 250_000_000);
}

// ── Single layouts ───────────────────────────────────────────────

#[test]
fn fixed_microsecond_layout_alone() {
    let table = LayoutTable::new(vec![DEFAULT_LAYOUTS[4].clone()]);
    let ts = table.parse("2023-05-01T10:20:30.000001").unwrap();
    assert_eq!(ts.nanosecond(), 1_000);
    assert!(table.parse("2023-05-01 10:20:30.000001").is_err());
}

#[test]
fn layout_parse_directly() {
    let layout = Layout::new("HH:MM DD.MM.YYYY", "%H:%M %d.%m.%Y");
    let ts = layout.parse("08:15 24.12.2022").unwrap();
    assert_eq!((ts.year(), ts.month(), ts.day()), (2022, 12, 24));
    assert_eq!((ts.hour(), ts.minute(), ts.second()), (8, 15, 0));
}

// ── Custom tables ────────────────────────────────────────────────

#[test]
fn custom_table_from_json() {
    let json = r#"[{"name": "DD/MM/YYYY HH:MM", "format": "%d/%m/%Y %H:%M"}]"#;
    let table: LayoutTable = serde_json::from_str(json).unwrap();
    assert_eq!(table.names(), vec!["DD/MM/YYYY HH:MM"]);
    let ts = table.parse("01/05/2023 10:20").unwrap();
    assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2023, 5, 1, 10));
    assert!(table.parse("2023-05-01 10:20:30").is_err());
}

#[test]
fn table_serializes_as_array() {
    let table = LayoutTable::new(vec![Layout::new("YYYY", "%Y")]);
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json, serde_json::json!([{"name": "YYYY", "format": "%Y"}]));
}

#[test]
fn first_matching_layout_wins() {
    let table = LayoutTable::new(vec![
        Layout::new("offset", "%Y-%m-%d %H:%M:%S %:z"),
        Layout::new("naive", "%Y-%m-%d %H:%M:%S"),
    ]);
    let ts = table.parse("2023-05-01 10:20:30 +02:00").unwrap();
    assert_eq!(ts.offset().local_minus_utc(), 7200);
    let ts = table.parse("2023-05-01 10:20:30").unwrap();
    assert_eq!(ts.offset().local_minus_utc(), 0);
}

#[test]
fn empty_table_always_fails() {
    let table = LayoutTable::new(Vec::new());
    assert!(table.is_empty());
    let err = table.parse("2023-05-01 10:20:30").unwrap_err();
    match &err {
        ReformatError::ExhaustedFormats { layouts, source } => {
            assert!(layouts.is_empty());
            assert!(source.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("no layouts configured"));
}
