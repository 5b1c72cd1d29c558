//! 推拉窗報價示例
//!
//! 建立目錄快照、計價三列窗洞，並計算報價單合計。

use anyhow::Context;
use mto::model::{
    CatalogItem, CatalogSnapshot, ComponentSlot, QuotationHeader, QuotationRow, RateBasis, RoleTag,
    TaxJurisdiction, TypologyRecord, WindowSpec,
};
use mto::MtoCalculator;
use rust_decimal::Decimal;

fn profile(id: &str, name: &str, role: RoleTag, factor: i64, finish: i64) -> CatalogItem {
    CatalogItem::new(id, name, role, Decimal::ZERO)
        .with_conversion_factor(Decimal::new(factor, 1))
        .with_finish_parameter(Decimal::from(finish))
}

fn build_catalog() -> mto::Result<CatalogSnapshot> {
    let items = vec![
        profile("AL-TRACK", "32SP 2 TRACK", RoleTag::Track, 10, 200),
        profile("AL-TRACK3", "32SP 3 TRACK", RoleTag::Track, 14, 260),
        profile("AL-HANDLE", "32SP HANDLE SGU", RoleTag::Handle, 9, 150),
        profile("AL-TB", "32SP TOP/BOTTOM SGU", RoleTag::TopBottom, 7, 120),
        profile("AL-IL", "32SP INTERLOCK", RoleTag::Interlock, 12, 100),
        profile("AL-MIL", "32SP MESH INTERLOCK", RoleTag::Interlock, 9, 80),
        profile("AL-RAIL", "ALUMINUM RAIL", RoleTag::Rail, 8, 50),
        CatalogItem::new("GL-5", "5MM CLEAR GLASS", RoleTag::Glass, Decimal::from(1200)),
        CatalogItem::new("FN-PC", "POWDER COATING", RoleTag::Finish, Decimal::from(100)),
        CatalogItem::new("LK-TOUCH", "TOUCH LOCK", RoleTag::Lock, Decimal::from(250)),
        CatalogItem::new("HW-ROLLER", "ROLLER", RoleTag::HardwarePiece, Decimal::from(40))
            .with_vendor_code("PH412"),
        CatalogItem::new("HW-SCREW", "SCREW 8X19", RoleTag::HardwarePiece, Decimal::from(2))
            .with_vendor_code("CSK PH 8X19 [SS-304]"),
    ];

    let typologies = vec![
        TypologyRecord::new("T-2T2S", "3200 SP", "2 TRACK 2 SHUTTER")
            .with_profile(ComponentSlot::Track, "AL-TRACK")
            .with_profile(ComponentSlot::Handle, "AL-HANDLE")
            .with_profile(ComponentSlot::TopBottom, "AL-TB"),
        TypologyRecord::new("T-3T3S1M", "3200 SP", "3 TRACK 3 SHUTTER 1 MESH")
            .with_profile(ComponentSlot::Track, "AL-TRACK3")
            .with_profile(ComponentSlot::Handle, "AL-HANDLE")
            .with_profile(ComponentSlot::TopBottom, "AL-TB"),
    ];

    CatalogSnapshot::new(items, typologies)
}

fn window(typology: &str, width: i64, height: i64, quantity: u32) -> WindowSpec {
    WindowSpec::new("3200 SP", typology, Decimal::from(width), Decimal::from(height))
        .with_quantity(quantity)
        .with_component(ComponentSlot::InsideInterlock, "AL-IL")
        .with_component(ComponentSlot::OutsideInterlock, "AL-IL")
        .with_component(ComponentSlot::MeshInterlock, "AL-MIL")
        .with_component(ComponentSlot::Rail, "AL-RAIL")
        .with_component(ComponentSlot::Glass, "GL-5")
        .with_component(ComponentSlot::Finish, "FN-PC")
        .with_component(ComponentSlot::Lock, "LK-TOUCH")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== 推拉窗報價示例 ===\n");

    let catalog = build_catalog().context("建立目錄快照失敗")?;
    let calculator = MtoCalculator::standard();

    let header = QuotationHeader::new("Acme Builders", "Pune", Decimal::from(300))
        .with_tax(TaxJurisdiction::default())
        .with_area_charges(Decimal::from(50), Decimal::from(20), RateBasis::PerSqFt)
        .with_discount_percent(Decimal::from(5));

    let specs = vec![
        window("T-2T2S", 1200, 1500, 1),
        window("T-2T2S", 1800, 1200, 2),
        window("T-3T3S1M", 2400, 1500, 1).with_rate_basis(RateBasis::PerSqM),
    ];

    let (rows, summary) = calculator.quote(&header, &specs, &catalog);

    println!("報價列:");
    for (idx, row) in rows.iter().enumerate() {
        match row.priced() {
            Some(priced) => {
                let shown = QuotationRow::from_priced(&row.spec, priced, calculator.config());
                println!(
                    "  {}. {} {}×{} 數量 {} → 面積 {} sqft，單價 {} / sqft，金額 {}",
                    idx + 1,
                    priced.typology_name,
                    row.spec.width_mm.unwrap_or_default(),
                    row.spec.height_mm.unwrap_or_default(),
                    shown.qty,
                    shown.sqft,
                    shown.rate_sq_ft,
                    shown.amount
                );
                for hardware in &priced.unstocked_hardware {
                    println!("       (未計價五金: {})", hardware);
                }
            }
            None => println!("  {}. 計價失敗: {:?}", idx + 1, row.error()),
        }
    }

    let totals = summary
        .totals
        .context("有列計價失敗，無法產生合計")?
        .presentation(calculator.config());

    println!("\n合計:");
    println!("  產品金額: {}", totals.products_amount);
    println!("  總面積:   {} sqft", totals.quoted_area);
    println!("  加工費:   {}", totals.fabrication_charge);
    println!("  安裝費:   {}", totals.installation_charge);
    println!("  折扣:     -{}", totals.discount_amount);
    println!("  稅前金額: {}", totals.taxable_amount);
    for tax in &totals.taxes {
        println!("  {} {}%: {}", tax.name, tax.percent, tax.amount);
    }
    println!("  總計:     {}", totals.grand_total);

    Ok(())
}
