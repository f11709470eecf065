//! 補貨建議報表示例

use anyhow::Context;
use chrono::NaiveDate;
use restock::{
    replenishment_for, AppArea, Item, MovementRecord, ReplenishmentConfig, Role, RoleMap,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== 補貨建議報表示例 ===\n");

    let items = vec![
        Item::new("FIL-001".to_string(), "Filtro de aceite".to_string(), 12.0)
            .with_brand("Mann".to_string())
            .with_line("Filtros".to_string())
            .with_unit_cost(4.5),
        Item::new("FIL-002".to_string(), "Filtro de aire".to_string(), 80.0)
            .with_brand("Mann".to_string())
            .with_line("Filtros".to_string())
            .with_unit_cost(6.0),
        Item::new("ACE-010".to_string(), "Aceite 5W30".to_string(), 3.0)
            .with_brand("Total".to_string())
            .with_line("Aceites".to_string()),
        Item::new("VAR-100".to_string(), "Abrazadera".to_string(), 0.0),
    ];

    let mut movements = Vec::new();
    for month in 1..=11 {
        let date = NaiveDate::from_ymd_opt(2025, month, 10).context("fecha inválida")?;
        movements.push(MovementRecord::new("FIL-001".to_string(), -8.0, "VENTA".to_string(), date));
        movements.push(MovementRecord::new("FIL-002".to_string(), -3.0, "VENTA".to_string(), date));
        movements.push(MovementRecord::new("ACE-010".to_string(), -5.0, "VENTA".to_string(), date));
    }
    movements.push(MovementRecord::new(
        "DISCONTINUADO".to_string(),
        -40.0,
        "VENTA".to_string(),
        NaiveDate::from_ymd_opt(2025, 6, 1).context("fecha inválida")?,
    ));

    let config = ReplenishmentConfig::from_json(
        r#"{"months_window": 12, "target_coverage_months": 6, "lead_time_months": 1.5, "buffer_months": 2}"#,
    )?;
    let roles = RoleMap::new().with_role(AppArea::Inventory, Role::Standard);

    let result = replenishment_for(&roles, &items, &movements, config)?;

    if let Some(date) = result.reference_date {
        println!("基準日期: {}\n", date);
    }

    println!("物料建議:");
    for row in &result.rows {
        let coverage = if row.has_infinite_coverage() {
            "∞".to_string()
        } else {
            format!("{:.1}", row.months_coverage)
        };
        println!(
            "  - {} {:<18} 庫存 {:>6.1} 月消耗 {:>5.2} 覆蓋 {:>5} 採購 {:>6.1} 成本 {:>8.2}{}",
            row.code,
            row.description,
            row.stock_current,
            row.consumption_monthly,
            coverage,
            row.qty_to_buy,
            row.cost_estimate,
            if row.should_buy { "  *" } else { "" }
        );
    }

    println!("\n品牌彙總:");
    for brand in &result.brand_rows {
        println!(
            "  - {:<12} 物料 {} 數量 {:.1} 成本 {:.2}",
            brand.brand, brand.items, brand.qty, brand.cost
        );
    }
    println!("\n估算總成本: {:.2}", result.total_cost());

    if !result.warnings.is_empty() {
        println!("\n警告:");
        for warning in &result.warnings {
            println!("  - [{:?}] {}: {}", warning.severity, warning.item_code, warning.message);
        }
    }

    Ok(())
}
