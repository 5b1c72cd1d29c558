//! 用料（MTO）報表示例
//!
//! 從保存的報價列 JSON 還原窗洞規格，產生四大分類的用料彙總。

use anyhow::Context;
use mto::model::{
    CatalogItem, CatalogSnapshot, ComponentSlot, PricingConfig, QuotationRow, RoleTag, TypologyRecord,
};
use mto::{MtoCalculator, WarningSeverity};
use mto::engine::FormulaTable;
use rust_decimal::Decimal;

const SAVED_ROWS: &str = r#"[
    { "series": "3200 SP", "typology": "T-2T2S", "insideInterlock": "AL-IL", "outsideInterlock": "AL-IL",
      "rail": "AL-RAIL", "glass": "GL-5", "finish": "FN-PC", "lock": "LK-TOUCH",
      "widthMM": 1200, "heightMM": 1500, "qty": 2, "rateType": "sqft" },
    { "series": "3200 SP", "typology": "T-2T2S", "insideInterlock": "AL-IL", "outsideInterlock": "AL-IL",
      "rail": "AL-RAIL", "glass": "GL-5", "finish": "FN-PC", "lock": "LK-TOUCH",
      "widthMM": 1200, "heightMM": 1500, "qty": 2, "rateType": "sqft" },
    { "series": "3200 SP", "typology": "T-FIX", "glass": "GL-5", "widthMM": 900, "heightMM": 600 },
    { "series": "3200 SP", "typology": "", "widthMM": 1000, "heightMM": 1000 }
]"#;

fn build_catalog() -> mto::Result<CatalogSnapshot> {
    let profile = |id: &str, name: &str, role: RoleTag, factor: i64| {
        CatalogItem::new(id, name, role, Decimal::ZERO)
            .with_conversion_factor(Decimal::new(factor, 1))
            .with_finish_parameter(Decimal::from(120))
    };

    let items = vec![
        profile("AL-TRACK", "32SP 2 TRACK", RoleTag::Track, 10),
        profile("AL-HANDLE", "32SP HANDLE SGU", RoleTag::Handle, 9),
        profile("AL-TB", "32SP TOP/BOTTOM SGU", RoleTag::TopBottom, 7),
        profile("AL-IL", "32SP INTERLOCK", RoleTag::Interlock, 12),
        profile("AL-RAIL", "ALUMINUM RAIL", RoleTag::Rail, 8),
        CatalogItem::new("GL-5", "5MM CLEAR GLASS", RoleTag::Glass, Decimal::from(1200)),
        CatalogItem::new("FN-PC", "POWDER COATING", RoleTag::Finish, Decimal::from(100)),
        CatalogItem::new("LK-TOUCH", "TOUCH LOCK", RoleTag::Lock, Decimal::from(250)),
        CatalogItem::new("HW-ROLLER", "ROLLER", RoleTag::HardwarePiece, Decimal::from(40))
            .with_vendor_code("PH412"),
        CatalogItem::new("HW-SILICON", "SILICON SEALANT", RoleTag::HardwarePiece, Decimal::from(180))
            .with_vendor_code("WACKER GN CL 270"),
    ];

    let typologies = vec![
        TypologyRecord::new("T-2T2S", "3200 SP", "2 TRACK 2 SHUTTER")
            .with_profile(ComponentSlot::Track, "AL-TRACK")
            .with_profile(ComponentSlot::Handle, "AL-HANDLE")
            .with_profile(ComponentSlot::TopBottom, "AL-TB"),
        TypologyRecord::new("T-FIX", "3200 SP", "FIXED GLASS").with_profile(ComponentSlot::Track, "AL-TRACK"),
    ];

    CatalogSnapshot::new(items, typologies)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== 用料報表示例 ===\n");

    let config = PricingConfig::from_json(r#"{ "expression_scale": 3 }"#)?;
    let calculator = MtoCalculator::new(FormulaTable::standard(), config)?;
    let catalog = build_catalog().context("建立目錄快照失敗")?;

    let rows: Vec<QuotationRow> = serde_json::from_str(SAVED_ROWS).context("無法解析保存的報價列")?;
    let specs: Vec<_> = rows.iter().map(QuotationRow::to_window_spec).collect();
    println!("讀取 {} 列報價", specs.len());

    let result = calculator.generate_mto(&specs, &catalog, Decimal::from(300));

    for section in &result.sections {
        println!("\n[{}]", section.category);
        if section.is_empty() {
            println!("  (無)");
        }
        for item in &section.items {
            println!("  {:>2}. {:<22} {:>10}  = {}", item.sr_no, item.material, item.total, item.quantity);
        }
    }

    println!("\n警告:");
    for warning in &result.warnings {
        let level = match warning.severity {
            WarningSeverity::Info => "提示",
            WarningSeverity::Warning => "警告",
            WarningSeverity::Error => "錯誤",
        };
        println!("  [{}] {}: {}", level, warning.component_id, warning.message);
    }

    println!("\n保存格式:\n{}", result.to_output_json()?);

    Ok(())
}
