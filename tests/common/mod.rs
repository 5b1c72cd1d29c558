//! 集成測試共用資料

#![allow(dead_code)]

use mto::model::{CatalogItem, CatalogSnapshot, ComponentSlot, RoleTag, TypologyRecord, WindowSpec};
use rust_decimal::Decimal;

pub const SERIES: &str = "3200 SP";

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn profile(id: &str, name: &str, role: RoleTag, factor: &str, finish: &str) -> CatalogItem {
    CatalogItem::new(id, name, role, Decimal::ZERO)
        .with_conversion_factor(dec(factor))
        .with_finish_parameter(dec(finish))
}

/// 目錄快照：型材、玻璃、塗裝、鎖具與兩種五金
pub fn catalog() -> CatalogSnapshot {
    let items = vec![
        profile("AL-TRACK", "32SP 2 TRACK", RoleTag::Track, "1.0", "200"),
        profile("AL-HANDLE", "32SP HANDLE SGU", RoleTag::Handle, "0.9", "150"),
        profile("AL-TB", "32SP TOP/BOTTOM SGU", RoleTag::TopBottom, "0.7", "120"),
        profile("AL-MID", "32SP MIDDLE", RoleTag::Middle, "1.1", "110"),
        profile("AL-IL", "32SP INTERLOCK", RoleTag::Interlock, "1.2", "100"),
        profile("AL-MIL", "32SP MESH INTERLOCK", RoleTag::Interlock, "0.9", "80"),
        profile("AL-RAIL", "ALUMINUM RAIL", RoleTag::Rail, "0.8", "50"),
        CatalogItem::new("GL-5", "5MM CLEAR GLASS", RoleTag::Glass, dec("1200")),
        CatalogItem::new("FN-PC", "POWDER COATING", RoleTag::Finish, dec("100")),
        CatalogItem::new("LK-TOUCH", "TOUCH LOCK", RoleTag::Lock, dec("250")),
        CatalogItem::new("HW-ROLLER", "ROLLER", RoleTag::HardwarePiece, dec("40"))
            .with_vendor_code("PH412"),
        CatalogItem::new("HW-SCREW", "SCREW 8X19", RoleTag::HardwarePiece, dec("2"))
            .with_vendor_code("CSK PH 8X19 [SS-304]"),
    ];

    let structural = |record: TypologyRecord| {
        record
            .with_profile(ComponentSlot::Track, "AL-TRACK")
            .with_profile(ComponentSlot::Handle, "AL-HANDLE")
            .with_profile(ComponentSlot::TopBottom, "AL-TB")
            .with_profile(ComponentSlot::Middle, "AL-MID")
    };

    let typologies = vec![
        structural(TypologyRecord::new("T-2T2S", SERIES, "2 TRACK 2 SHUTTER")),
        structural(TypologyRecord::new("T-2T3S", SERIES, "2 TRACK 3 SHUTTER")),
        structural(TypologyRecord::new("T-2T4S", SERIES, "2 TRACK 4 SHUTTER")),
        structural(TypologyRecord::new("T-3T2S1M", SERIES, "3 TRACK 2 SHUTTER 1 MESH")),
        structural(TypologyRecord::new("T-3T3S1M", SERIES, "3 TRACK 3 SHUTTER 1 MESH")),
        structural(TypologyRecord::new("T-3T4S2M", SERIES, "3 TRACK 4 SHUTTER 2 MESH")),
        structural(TypologyRecord::new("T-4T4S", SERIES, "4 TRACK 4 SHUTTER")),
        TypologyRecord::new("T-FIX", SERIES, "FIXED GLASS").with_profile(ComponentSlot::Track, "AL-TRACK"),
    ];

    CatalogSnapshot::new(items, typologies).unwrap()
}

/// 選齊所有可選元件的窗洞
pub fn window(typology: &str, width: &str, height: &str) -> WindowSpec {
    WindowSpec::new(SERIES, typology, dec(width), dec(height))
        .with_component(ComponentSlot::InsideInterlock, "AL-IL")
        .with_component(ComponentSlot::OutsideInterlock, "AL-IL")
        .with_component(ComponentSlot::MeshInterlock, "AL-MIL")
        .with_component(ComponentSlot::Rail, "AL-RAIL")
        .with_component(ComponentSlot::Glass, "GL-5")
        .with_component(ComponentSlot::Finish, "FN-PC")
        .with_component(ComponentSlot::Lock, "LK-TOUCH")
}

pub fn golden_window() -> WindowSpec {
    window("T-2T2S", "1200", "1500")
}

pub const TYPOLOGY_IDS: [&str; 8] = [
    "T-2T2S", "T-2T3S", "T-2T4S", "T-3T2S1M", "T-3T3S1M", "T-3T4S2M", "T-4T4S", "T-FIX",
];
