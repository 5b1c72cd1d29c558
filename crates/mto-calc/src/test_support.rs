//! 測試共用的目錄與窗洞資料

use mto_core::{CatalogItem, CatalogSnapshot, ComponentSlot, RoleTag, TypologyRecord, WindowSpec};
use rust_decimal::Decimal;

pub const SERIES: &str = "3200 SP";

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

pub fn catalog_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("AL-TRACK", "32SP 2 TRACK", RoleTag::Track, Decimal::ZERO)
            .with_conversion_factor(dec("1.0"))
            .with_finish_parameter(dec("200")),
        CatalogItem::new("AL-TRACK3", "32SP 3 TRACK", RoleTag::Track, Decimal::ZERO)
            .with_conversion_factor(dec("1.4"))
            .with_finish_parameter(dec("260")),
        CatalogItem::new("AL-HANDLE", "32SP HANDLE SGU", RoleTag::Handle, Decimal::ZERO)
            .with_conversion_factor(dec("0.9"))
            .with_finish_parameter(dec("150")),
        CatalogItem::new("AL-TB", "32SP TOP/BOTTOM SGU", RoleTag::TopBottom, Decimal::ZERO)
            .with_conversion_factor(dec("0.7"))
            .with_finish_parameter(dec("120")),
        CatalogItem::new("AL-MID", "32SP MIDDLE", RoleTag::Middle, Decimal::ZERO)
            .with_conversion_factor(dec("1.1"))
            .with_finish_parameter(dec("110")),
        CatalogItem::new("AL-IL", "32SP INTERLOCK", RoleTag::Interlock, Decimal::ZERO)
            .with_conversion_factor(dec("1.2"))
            .with_finish_parameter(dec("100")),
        CatalogItem::new("AL-MIL", "32SP MESH INTERLOCK", RoleTag::Interlock, Decimal::ZERO)
            .with_conversion_factor(dec("0.9"))
            .with_finish_parameter(dec("80")),
        CatalogItem::new("AL-RAIL", "ALUMINUM RAIL", RoleTag::Rail, Decimal::ZERO)
            .with_conversion_factor(dec("0.8"))
            .with_finish_parameter(dec("50")),
        CatalogItem::new("GL-5", "5MM CLEAR GLASS", RoleTag::Glass, dec("1200")),
        CatalogItem::new("FN-PC", "POWDER COATING", RoleTag::Finish, dec("100")),
        CatalogItem::new("LK-TOUCH", "TOUCH LOCK", RoleTag::Lock, dec("250")),
        CatalogItem::new("HW-ROLLER", "ROLLER", RoleTag::HardwarePiece, dec("40"))
            .with_vendor_code("PH412"),
        CatalogItem::new("HW-SCREW", "SCREW 8X19", RoleTag::HardwarePiece, dec("2"))
            .with_vendor_code("CSK PH 8X19 [SS-304]"),
        // 零單價的五金：計價為零，也不列入用料
        CatalogItem::new("HW-PLUG", "ROWEL PLUG", RoleTag::HardwarePiece, Decimal::ZERO)
            .with_vendor_code("32MM WP"),
    ]
}

pub fn typologies() -> Vec<TypologyRecord> {
    vec![
        TypologyRecord::new("T-2T2S", SERIES, "2 TRACK 2 SHUTTER")
            .with_profile(ComponentSlot::Track, "AL-TRACK")
            .with_profile(ComponentSlot::Handle, "AL-HANDLE")
            .with_profile(ComponentSlot::TopBottom, "AL-TB"),
        TypologyRecord::new("T-3T4S2M", SERIES, "3 TRACK 4 SHUTTER 2 MESH")
            .with_profile(ComponentSlot::Track, "AL-TRACK3")
            .with_profile(ComponentSlot::Handle, "AL-HANDLE")
            .with_profile(ComponentSlot::TopBottom, "AL-TB")
            .with_profile(ComponentSlot::Middle, "AL-MID"),
        TypologyRecord::new("T-FIX", SERIES, "FIXED GLASS")
            .with_profile(ComponentSlot::Track, "AL-TRACK"),
        TypologyRecord::new("T-CASE", SERIES, "CASEMENT LEFT")
            .with_profile(ComponentSlot::Track, "AL-TRACK"),
    ]
}

pub fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new(catalog_items(), typologies()).unwrap()
}

/// 1200 × 1500 的二軌二扇推拉窗，數量 1
pub fn golden_spec() -> WindowSpec {
    WindowSpec::new(SERIES, "T-2T2S", dec("1200"), dec("1500"))
        .with_component(ComponentSlot::InsideInterlock, "AL-IL")
        .with_component(ComponentSlot::OutsideInterlock, "AL-IL")
        .with_component(ComponentSlot::Rail, "AL-RAIL")
        .with_component(ComponentSlot::Glass, "GL-5")
        .with_component(ComponentSlot::Finish, "FN-PC")
        .with_component(ComponentSlot::Lock, "LK-TOUCH")
}

/// 1800 × 1200 的三軌四扇二紗推拉窗
pub fn mesh_spec() -> WindowSpec {
    WindowSpec::new(SERIES, "T-3T4S2M", dec("1800"), dec("1200"))
        .with_component(ComponentSlot::InsideInterlock, "AL-IL")
        .with_component(ComponentSlot::OutsideInterlock, "AL-IL")
        .with_component(ComponentSlot::MeshInterlock, "AL-MIL")
        .with_component(ComponentSlot::Rail, "AL-RAIL")
        .with_component(ComponentSlot::Glass, "GL-5")
        .with_component(ComponentSlot::Finish, "FN-PC")
        .with_component(ComponentSlot::Lock, "LK-TOUCH")
}

pub const ALUMINIUM_RATE: Decimal = Decimal::from_parts(300, 0, 0, false, 0);
