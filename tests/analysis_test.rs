//! 庫存分析與快取集成測試

use chrono::{NaiveDate, TimeZone, Utc};
use restock::*;
use std::collections::BTreeSet;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn catalog_items() -> Vec<Item> {
    vec![
        Item::new("A".to_string(), "Filtro".to_string(), 30.0)
            .with_line("Filtros".to_string())
            .with_unit_cost(4.0),
        Item::new("B".to_string(), "Aceite".to_string(), 50.0)
            .with_line("Aceites".to_string())
            .with_unit_cost(10.0),
        Item::new("C".to_string(), "Varios".to_string(), 5.0),
    ]
}

fn movements() -> Vec<MovementRecord> {
    vec![
        MovementRecord::new("A".to_string(), 40.0, "COMPRA".to_string(), ymd(2025, 9, 2)),
        MovementRecord::new("A".to_string(), -10.0, "VENTA".to_string(), ymd(2025, 9, 20)),
        MovementRecord::new("B".to_string(), 50.0, "COMPRA".to_string(), ymd(2025, 10, 1)),
        MovementRecord::new("A".to_string(), -5.0, "VENTA".to_string(), ymd(2025, 11, 3)),
    ]
}

#[test]
fn test_weekly_series_through_facade() {
    let roles = RoleMap::from_pairs([("inventory", "standard")]);
    let query = SeriesQuery::new(Period::Week)
        .with_range(Some(ymd(2025, 9, 15)), Some(ymd(2025, 10, 5)))
        .with_items(["A".to_string()].into());

    let series = inventory_series_for(&roles, &catalog_items(), &movements(), &query)
        .unwrap()
        .unwrap();

    assert_eq!(
        series.dates,
        vec![ymd(2025, 9, 15), ymd(2025, 9, 22), ymd(2025, 9, 29)]
    );
    // 期初 40，9/20 出庫 10
    assert_eq!(series.units_series, vec![30.0, 30.0, 30.0]);
    assert_eq!(series.value_series, vec![120.0, 120.0, 120.0]);
}

#[test]
fn test_series_requires_inventory_access() {
    let roles = RoleMap::from_pairs([("inventory", "none"), ("crm", "admin")]);
    let query = SeriesQuery::new(Period::Month);

    let result = inventory_series_for(&roles, &catalog_items(), &movements(), &query);

    assert!(matches!(result, Err(RestockError::AccessDenied { .. })));
}

#[test]
fn test_line_distribution_for_selection() {
    let catalog = CatalogIndex::build(&catalog_items());
    let selection: BTreeSet<String> = ["A".to_string(), "C".to_string()].into();

    let all = DistributionCalculator::by_line(&catalog, None).unwrap();
    let selected = DistributionCalculator::by_line(&catalog, Some(&selection)).unwrap();

    let lines: Vec<&str> = all.iter().map(|s| s.line.as_str()).collect();
    assert_eq!(lines, vec!["Aceites", "Filtros", "Sin linea"]);
    assert_eq!(
        selected,
        vec![
            LineShare { line: "Filtros".to_string(), stock: 30.0 },
            LineShare { line: "Sin linea".to_string(), stock: 5.0 },
        ]
    );
}

#[test]
fn test_snapshot_reused_until_newer_upload() {
    let first_upload = UploadLog::new(
        Dataset::Movements,
        "movimientos_sep.xlsx".to_string(),
        Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap(),
    );
    let config = ReplenishmentConfig::default().with_reference_date(ymd(2025, 11, 30));
    let calculator = ReplenishmentCalculator::new(config);
    let mut cache: SnapshotCache<ReplenishmentResult> = SnapshotCache::new();

    let fetched = vec![first_upload.clone()];
    assert!(cache.lookup(&fetched).is_none());
    let result = calculator.calculate(&catalog_items(), &movements()).unwrap();
    cache.store(result.clone(), fetched.clone());

    assert_eq!(cache.lookup(&fetched), Some(&result));
    assert!(cache.stale_datasets(&fetched).is_clean());

    let newer = UploadLog::new(
        Dataset::Catalog,
        "catalogo.xlsx".to_string(),
        Utc.with_ymd_and_hms(2025, 11, 2, 9, 0, 0).unwrap(),
    );
    let fetched = vec![first_upload, newer];
    assert!(has_newer_logs(cache.logs(), &fetched));
    assert!(cache.lookup(&fetched).is_none());
    assert_eq!(cache.stale_datasets(&fetched).dirty_datasets(), vec![Dataset::Catalog]);
    assert_eq!(
        latest_upload(&fetched, Some(Dataset::Movements)),
        Some(Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap())
    );

    cache.invalidate();
    assert!(cache.is_empty());
}
