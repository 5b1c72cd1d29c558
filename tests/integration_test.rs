//! 集成測試

mod common;

use common::{catalog, dec, golden_window, window, SERIES, TYPOLOGY_IDS};
use mto::engine::{FormulaTable, MtoCalculator, QuotationCalculator};
use mto::model::*;
use mto::WarningSeverity;
use rstest::rstest;
use rust_decimal::Decimal;

#[test]
fn test_golden_quotation_row() {
    // 場景：3200 SP 二軌二扇，1200 × 1500，數量 1，鋁材單價 300
    let calculator = MtoCalculator::standard();
    let catalog = catalog();

    // 1. 計價
    let priced = calculator.price(&golden_window(), &catalog, dec("300")).unwrap();
    assert_eq!(priced.total_per_unit, dec("7653.8"));
    assert_eq!(priced.total_per_unit, priced.breakdown_sum());

    // 2. 保存格式
    let row = QuotationRow::from_priced(&golden_window(), &priced, calculator.config());
    assert_eq!(row.sqft, "19.375");
    assert_eq!(row.sqm, "1.800");
    assert_eq!(row.rate_sq_m, "4252.11");
    assert_eq!(row.rate_sq_ft, "395.03");
    assert_eq!(row.amount, "7653.80");

    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["series"], SERIES);
    assert_eq!(json["typology"], "T-2T2S");
    assert_eq!(json["insideInterlock"], "AL-IL");
    assert_eq!(json["widthMM"], 1200.0);
    assert_eq!(json["qty"], 1);
    assert_eq!(json["rateType"], "sqft");

    // 3. 由保存格式還原後重新計價，結果一致
    let restored: QuotationRow = serde_json::from_value(json).unwrap();
    let repriced = calculator.price(&restored.to_window_spec(), &catalog, dec("300")).unwrap();
    assert_eq!(repriced.total_per_unit, priced.total_per_unit);
}

#[test]
fn test_two_identical_rows_merge() {
    let calculator = MtoCalculator::standard();
    let specs = vec![golden_window(), golden_window()];

    let result = calculator.generate_mto(&specs, &catalog(), dec("300"));

    let aluminium = result.section(MtoCategory::Aluminium).unwrap();
    let rail = aluminium.find("ALUMINUM RAIL").unwrap();
    assert_eq!(rail.quantity, "2 × 1.20 + 2 × 1.20");
    assert_eq!(rail.total, dec("4.80"));

    let glass = result.section(MtoCategory::Glass).unwrap();
    assert_eq!(glass.items.len(), 1);
    assert_eq!(glass.items[0].sr_no, 1);
    assert_eq!(glass.items[0].total, dec("3.60"));

    let finish = result.section(MtoCategory::Finish).unwrap();
    assert_eq!(finish.items[0].quantity, "1 × 2.24 + 1 × 2.24");
    assert_eq!(finish.items[0].total, dec("4.48"));

    // 序號依首次出現順序連續編號
    let numbers: Vec<u32> = aluminium.items.iter().map(|item| item.sr_no).collect();
    assert_eq!(numbers, (1..=aluminium.items.len() as u32).collect::<Vec<_>>());
}

#[rstest]
fn test_aluminium_cost_reconstructed_from_bom(
    #[values("T-2T2S", "T-2T3S", "T-2T4S", "T-3T2S1M", "T-3T3S1M", "T-3T4S2M", "T-4T4S", "T-FIX")] typology: &str,
    #[values(1, 3)] quantity: u32,
) {
    let calculator = MtoCalculator::standard();
    let catalog = catalog();
    let rate = dec("300");
    let spec = window(typology, "1650", "1350").with_quantity(quantity);

    let priced = calculator.price(&spec, &catalog, rate).unwrap();
    let records = calculator.derive_bom(&spec, &priced, &catalog).unwrap();

    let from_bom: Decimal = records
        .iter()
        .filter(|record| record.category == MtoCategory::Aluminium)
        .map(|record| {
            let id = record.catalog_ref.as_deref().unwrap();
            let factor = catalog.find_by_id(id).unwrap().conversion_factor.unwrap();
            record.quantity_total * factor * rate
        })
        .sum();

    let priced_aluminium: Decimal = [
        PriceComponent::Structural,
        PriceComponent::InsideInterlock,
        PriceComponent::OutsideInterlock,
        PriceComponent::MeshInterlock,
        PriceComponent::Rail,
    ]
    .iter()
    .map(|component| priced.component(*component))
    .sum();

    assert_eq!(from_bom, priced_aluminium * Decimal::from(quantity));
}

#[test]
fn test_every_typology_total_is_breakdown_sum() {
    let calculator = MtoCalculator::standard();
    let catalog = catalog();

    for typology in TYPOLOGY_IDS {
        let priced = calculator
            .price(&window(typology, "1800", "1200"), &catalog, dec("275.5"))
            .unwrap();
        assert_eq!(priced.total_per_unit, priced.breakdown_sum(), "型式 {}", typology);
        assert_eq!(
            priced.total_for_quantity,
            priced.total_per_unit * Decimal::from(priced.quantity)
        );
    }
}

#[rstest]
#[case::zero_width("0", "1500", 1, "widthMM")]
#[case::zero_height("1200", "0", 1, "heightMM")]
#[case::zero_quantity("1200", "1500", 0, "qty")]
fn test_boundaries_report_missing_field(
    #[case] width: &str,
    #[case] height: &str,
    #[case] quantity: u32,
    #[case] field: &str,
) {
    let calculator = MtoCalculator::standard();
    let spec = window("T-2T2S", width, height).with_quantity(quantity);

    let err = calculator.price(&spec, &catalog(), dec("300")).unwrap_err();
    assert_eq!(err, MtoError::MissingField(field.to_string()));

    // 用料計算不會中斷，而是以錯誤警告列出該列
    let result = calculator.generate_mto(&[spec], &catalog(), dec("300"));
    assert!(result.has_errors());
    assert!(result.sections.iter().all(AggregatedMto::is_empty));
}

#[test]
fn test_large_quantity_flows_through_every_engine() {
    let calculator = MtoCalculator::standard();
    let catalog = catalog();
    let spec = golden_window().with_quantity(3_000_000_000);

    let priced = calculator.price(&spec, &catalog, dec("300")).unwrap();
    let records = calculator.derive_bom(&spec, &priced, &catalog).unwrap();
    assert!(!records.is_empty());

    let result = calculator.generate_mto(&[spec], &catalog, dec("300"));
    assert!(!result.has_errors());
    let rail = result.section(MtoCategory::Aluminium).unwrap().find("ALUMINUM RAIL").unwrap();
    assert_eq!(rail.quantity, "6000000000 × 1.20");
    assert_eq!(rail.total, dec("7200000000.00"));

    // 超出尺寸上限：兩個引擎都回報同一個錯誤
    let mut oversized = golden_window().with_quantity(1000);
    oversized.width_mm = Some(dec("100000000000000000"));
    oversized.height_mm = Some(dec("100000000000000000"));
    assert!(matches!(
        calculator.price(&oversized, &catalog, dec("300")),
        Err(MtoError::InvalidDimension { .. })
    ));
    assert!(calculator.generate_mto(&[oversized], &catalog, dec("300")).has_errors());
}

#[test]
fn test_unresolved_references_are_errors() {
    let calculator = MtoCalculator::standard();
    let catalog = catalog();

    let unknown_typology = WindowSpec::new(SERIES, "T-NONE", dec("1200"), dec("1500"));
    assert!(matches!(
        calculator.price(&unknown_typology, &catalog, dec("300")),
        Err(MtoError::UnknownTypology { .. })
    ));

    let unknown_rail = golden_window().with_component(ComponentSlot::Rail, "AL-NONE");
    assert_eq!(
        calculator.price(&unknown_rail, &catalog, dec("300")).unwrap_err(),
        MtoError::UnknownComponent {
            slot: "RAIL".to_string(),
            id: "AL-NONE".to_string(),
        }
    );

    let wrong_role = golden_window().with_component(ComponentSlot::Lock, "GL-5");
    assert!(matches!(
        calculator.price(&wrong_role, &catalog, dec("300")),
        Err(MtoError::RoleMismatch { .. })
    ));
}

#[test]
fn test_zero_area_rate_is_undefined() {
    // 直接以零面積的計價結果檢查單價哨兵
    let rate = UnitRate::per_area(dec("7653.8"), Decimal::ZERO);
    assert_eq!(rate, UnitRate::Undefined);
    assert_eq!(rate.value(), None);
}

#[test]
fn test_quotation_totals_and_failed_rows() {
    let calculator = MtoCalculator::standard();
    let catalog = catalog();
    let header = QuotationHeader::new("Acme Builders", "Pune", dec("300"))
        .with_area_charges(dec("50"), dec("20"), RateBasis::PerSqFt)
        .with_discount_percent(dec("10"))
        .with_fixed_charge(dec("500"));

    // 1. 全部成功
    let (rows, summary) = calculator.quote(&header, &[golden_window()], &catalog);
    assert_eq!(rows.len(), 1);
    let totals = summary.totals.unwrap().presentation(calculator.config());
    assert_eq!(totals.taxable_amount, dec("8559.05"));
    assert_eq!(totals.grand_total, dec("10099.67"));

    // 2. 任一列失敗則不產生合計
    let mut broken = golden_window();
    broken.typology_id = None;
    let rows = calculator.recompute(&[golden_window(), broken], &catalog, header.aluminium_rate);
    let summary = QuotationCalculator::summarize(&header, &rows);
    assert!(summary.totals.is_none());
    assert_eq!(summary.failed_rows[0].row_no, 2);
}

#[test]
fn test_global_rate_change_recomputes_every_row() {
    let calculator = MtoCalculator::standard();
    let catalog = catalog();
    let specs = vec![golden_window(), window("T-3T4S2M", "2400", "1500").with_quantity(2)];

    let before = calculator.recompute(&specs, &catalog, dec("300"));
    let after = calculator.recompute(&specs, &catalog, dec("330"));

    for (old, new) in before.iter().zip(&after) {
        let old = old.priced().unwrap();
        let new = new.priced().unwrap();
        assert_eq!(
            new.component(PriceComponent::Structural),
            old.component(PriceComponent::Structural) * dec("1.1")
        );
        assert_eq!(new.component(PriceComponent::Glass), old.component(PriceComponent::Glass));
    }
}

#[test]
fn test_custom_formula_table() {
    // 以 JSON 擴充型式，不需修改程式
    let json = r#"{
        "TOP HUNG": {
            "name": "top hung",
            "profiles": [
                { "slot": "Track", "count": 2, "dimension": "Width" },
                { "slot": "Track", "count": 2, "dimension": "Height" }
            ],
            "glass_panes": 1,
            "lock_count": 1,
            "hardware": [ { "vendor_code": "PH412", "count": 2 } ]
        }
    }"#;
    let formulas = FormulaTable::from_json(json).unwrap();
    let calculator = MtoCalculator::new(formulas, PricingConfig::default()).unwrap();

    let base = catalog();
    let mut typologies = base.typologies().to_vec();
    typologies.push(
        TypologyRecord::new("T-TOP", SERIES, "Top Hung").with_profile(ComponentSlot::Track, "AL-TRACK"),
    );
    let catalog = CatalogSnapshot::new(base.items().to_vec(), typologies).unwrap();

    let spec = WindowSpec::new(SERIES, "T-TOP", dec("600"), dec("600"))
        .with_component(ComponentSlot::Glass, "GL-5")
        .with_component(ComponentSlot::Lock, "LK-TOUCH");
    let priced = calculator.price(&spec, &catalog, dec("300")).unwrap();

    // 外框 1.0 × 2.4 × 300 + 玻璃 0.36 × 1200 + 鎖 250 + 滾輪 2 × 40
    assert_eq!(priced.total_per_unit, dec("1482"));
    assert!(priced.is_fully_stocked());

    // 標準表中的型式在自訂表中不存在，但推拉窗名稱仍可即時產生
    assert!(calculator.price(&golden_window(), &catalog, dec("300")).is_ok());
}

#[test]
fn test_mto_output_shape() {
    let calculator = MtoCalculator::standard();
    let result = calculator.generate_mto(&[golden_window()], &catalog(), dec("300"));

    let value: serde_json::Value = serde_json::from_str(&result.to_output_json().unwrap()).unwrap();
    let categories: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|section| section["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["ALUMINIUM", "GLASS", "FINISH", "HARDWARE"]);

    let first = &value[0]["items"][0];
    assert_eq!(first["srNo"], 1);
    assert_eq!(first["material"], "32SP 2 TRACK");
    assert_eq!(first["quantity"], "2 × 1.20 + 2 × 1.50");
    assert_eq!(first["total"], "5.40");

    // 目錄沒有的五金只留下提示，不是錯誤
    assert!(result
        .warnings
        .iter()
        .all(|warning| warning.severity == WarningSeverity::Info));
}
