//! Library-level integration: fixture tables loaded through the real
//! importers, queried through the resolver.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use tariff::config::Policy;
use tariff::duty::{DutyResolver, QuoteLine, QuoteRequest, Transport};
use tariff::importers;

use cli_helpers::{write_hts_fixture, write_sec301_csv_fixture, write_sec301_xlsx_fixture};

fn resolver_from_csv(dir: &TempDir) -> DutyResolver {
    let hts = write_hts_fixture(dir);
    let sec301 = write_sec301_csv_fixture(dir);
    DutyResolver::new(
        importers::load_schedule(&hts).unwrap(),
        importers::load_sec301(&sec301).unwrap(),
        Policy::default(),
    )
}

#[test]
fn full_code_matches_its_schedule_row() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    let breakdown = resolver.resolve("3923.50.0000", Some("China")).unwrap();
    assert_eq!(breakdown.hts_number, "3923.50.0000");
    assert_eq!(breakdown.description, "Stoppers, lids, caps and other closures");
    assert_eq!(breakdown.base_rate_display, "5.3%");
    assert_eq!(breakdown.total_rate, dec!(175.3));
}

#[test]
fn unflagged_origin_drops_reciprocal_component() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    let breakdown = resolver.resolve("3923.50.0000", Some("Other")).unwrap();
    assert_eq!(breakdown.total_rate, dec!(30.3));
}

#[test]
fn absent_codes_resolve_to_not_found() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    assert!(resolver.resolve("9999.99.9999", None).is_none());
    assert!(resolver.resolve("no digits here", None).is_none());
    assert!(resolver.resolve("", None).is_none());
}

#[test]
fn partial_codes_match_first_row_in_table_order() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    // "3923" prefixes both 3923.50.0000 and 3923.90.0080
    let breakdown = resolver.resolve("3923", None).unwrap();
    assert_eq!(breakdown.hts_number, "3923.50.0000");
}

#[test]
fn unit_based_rates_contribute_zero_and_flag_approximation() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    let breakdown = resolver.resolve("0401.10.0000", Some("Other")).unwrap();
    assert_eq!(breakdown.base_rate, Decimal::ZERO);
    assert_eq!(breakdown.base_rate_display, "$0.02/kg");
    assert!(breakdown.approximate);
    assert_eq!(breakdown.total_rate, Decimal::ZERO);
}

#[test]
fn xlsx_and_csv_trade_action_tables_agree() {
    let dir = TempDir::new().unwrap();
    let hts = write_hts_fixture(&dir);
    let csv = write_sec301_csv_fixture(&dir);
    let xlsx = write_sec301_xlsx_fixture(&dir);

    let from_csv = DutyResolver::new(
        importers::load_schedule(&hts).unwrap(),
        importers::load_sec301(&csv).unwrap(),
        Policy::default(),
    );
    let from_xlsx = DutyResolver::new(
        importers::load_schedule(&hts).unwrap(),
        importers::load_sec301(&xlsx).unwrap(),
        Policy::default(),
    );

    let a = from_csv.resolve("3923.50.0000", Some("China")).unwrap();
    let b = from_xlsx.resolve("3923.50.0000", Some("China")).unwrap();
    assert_eq!(a.section_301_rate, dec!(25));
    assert_eq!(a.section_301_rate, b.section_301_rate);
    assert_eq!(a.total_rate, b.total_rate);
}

#[test]
fn repeated_queries_do_not_accumulate_state() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    let request = QuoteRequest {
        lines: vec![QuoteLine::new("3923.50.0000"), QuoteLine::new("8471.30.0100")],
        shipment_value: Some(dec!(10000)),
        origin: Some("China".to_string()),
        transport: None,
    };

    let first = resolver.quote(&request).unwrap();
    for _ in 0..5 {
        let again = resolver.quote(&request).unwrap();
        assert_eq!(again.total_duty_amount, first.total_duty_amount);
        assert_eq!(again.grand_total, first.grand_total);
        assert_eq!(again.lines.len(), first.lines.len());
    }
}

#[test]
fn ocean_quote_carries_both_fees() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    let request = QuoteRequest {
        lines: vec![QuoteLine {
            code: "3923.50.0000".to_string(),
            value: Some(dec!(10000)),
            origin: Some("Other".to_string()),
        }],
        shipment_value: None,
        origin: None,
        transport: Some(Transport::Ocean),
    };
    let quote = resolver.quote(&request).unwrap();

    assert_eq!(quote.mpf, Some(dec!(34.64)));
    assert_eq!(quote.hmf, Some(dec!(12.5)));
    assert_eq!(quote.total_duty_amount, dec!(3030));
    assert_eq!(quote.grand_total, dec!(3077.14));
}

#[test]
fn air_quote_has_no_harbor_fee() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_from_csv(&dir);

    let request = QuoteRequest {
        lines: vec![QuoteLine {
            code: "3923.50.0000".to_string(),
            value: Some(dec!(10000)),
            origin: None,
        }],
        shipment_value: None,
        origin: None,
        transport: Some(Transport::Air),
    };
    let quote = resolver.quote(&request).unwrap();

    assert_eq!(quote.hmf, Some(Decimal::ZERO));
    assert_eq!(quote.mpf, Some(dec!(34.64)));
}

#[test]
fn policy_override_changes_reciprocal_rate() {
    let dir = TempDir::new().unwrap();
    let hts = write_hts_fixture(&dir);
    let sec301 = write_sec301_csv_fixture(&dir);

    let policy_path = dir.path().join("policy.toml");
    std::fs::write(
        &policy_path,
        "[reciprocal]\nrate = \"30.0\"\ncountries = [\"China\", \"Hong Kong\"]\n",
    )
    .unwrap();

    let resolver = DutyResolver::new(
        importers::load_schedule(&hts).unwrap(),
        importers::load_sec301(&sec301).unwrap(),
        Policy::load(&policy_path).unwrap(),
    );

    let breakdown = resolver.resolve("3923.50.0000", Some("Hong Kong")).unwrap();
    assert_eq!(breakdown.reciprocal_rate, dec!(30.0));
    assert_eq!(breakdown.total_rate, dec!(60.3));
}
