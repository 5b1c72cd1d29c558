//! 計價結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::PricingConfig;
use crate::window::{ComponentSlot, RateBasis};

/// 價格組成項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceComponent {
    /// 結構鋁材（外框、把手梃、上下梃、中梃）
    Structural,
    /// 內勾企
    InsideInterlock,
    /// 外勾企
    OutsideInterlock,
    /// 紗窗勾企
    MeshInterlock,
    /// 滑軌
    Rail,
    /// 玻璃
    Glass,
    /// 表面處理
    Finish,
    /// 五金
    Hardware,
    /// 鎖具
    Lock,
}

impl PriceComponent {
    /// 所有組成項目（固定順序）
    pub const ALL: [PriceComponent; 9] = [
        PriceComponent::Structural,
        PriceComponent::InsideInterlock,
        PriceComponent::OutsideInterlock,
        PriceComponent::MeshInterlock,
        PriceComponent::Rail,
        PriceComponent::Glass,
        PriceComponent::Finish,
        PriceComponent::Hardware,
        PriceComponent::Lock,
    ];

    /// 型材位置所屬的組成項目
    pub fn for_slot(slot: ComponentSlot) -> Self {
        match slot {
            ComponentSlot::Track
            | ComponentSlot::Handle
            | ComponentSlot::TopBottom
            | ComponentSlot::Middle => PriceComponent::Structural,
            ComponentSlot::InsideInterlock => PriceComponent::InsideInterlock,
            ComponentSlot::OutsideInterlock => PriceComponent::OutsideInterlock,
            ComponentSlot::MeshInterlock => PriceComponent::MeshInterlock,
            ComponentSlot::Rail => PriceComponent::Rail,
            ComponentSlot::Glass => PriceComponent::Glass,
            ComponentSlot::Finish => PriceComponent::Finish,
            ComponentSlot::Lock => PriceComponent::Lock,
        }
    }
}

/// 面積單價
///
/// 面積為零時為 `Undefined`，不會產生 NaN 或無限大。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitRate {
    Defined(Decimal),
    Undefined,
}

impl UnitRate {
    /// 金額除以面積
    pub fn per_area(amount: Decimal, area: Decimal) -> Self {
        if area > Decimal::ZERO {
            amount
                .checked_div(area)
                .map(UnitRate::Defined)
                .unwrap_or(UnitRate::Undefined)
        } else {
            UnitRate::Undefined
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            UnitRate::Defined(v) => Some(*v),
            UnitRate::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, UnitRate::Defined(_))
    }

    fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Self {
        match self {
            UnitRate::Defined(v) => UnitRate::Defined(f(v)),
            UnitRate::Undefined => UnitRate::Undefined,
        }
    }
}

/// 單樘計價結果（嵌入報價列，不單獨保存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedUnit {
    /// 正規化後的型式名稱
    pub typology_name: String,

    /// 數量
    pub quantity: u32,

    /// 面積（平方米）
    pub area_sqm: Decimal,

    /// 面積（平方英尺）
    pub area_sqft: Decimal,

    /// 價格組成
    pub breakdown: BTreeMap<PriceComponent, Decimal>,

    /// 單樘總價
    pub total_per_unit: Decimal,

    /// 數量總價
    pub total_for_quantity: Decimal,

    /// 每平方英尺單價
    pub rate_per_sqft: UnitRate,

    /// 每平方米單價
    pub rate_per_sqm: UnitRate,

    /// 目錄中沒有庫存的五金料號（未計價）
    pub unstocked_hardware: Vec<String>,
}

impl PricedUnit {
    /// 某組成項目的金額
    pub fn component(&self, component: PriceComponent) -> Decimal {
        self.breakdown
            .get(&component)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 組成項目加總
    pub fn breakdown_sum(&self) -> Decimal {
        self.breakdown.values().copied().sum()
    }

    /// 依單價基準取得面積單價
    pub fn quoted_rate(&self, basis: RateBasis) -> UnitRate {
        match basis {
            RateBasis::PerSqFt => self.rate_per_sqft,
            RateBasis::PerSqM => self.rate_per_sqm,
        }
    }

    /// 是否所有五金都有計價
    pub fn is_fully_stocked(&self) -> bool {
        self.unstocked_hardware.is_empty()
    }

    /// 呈現用的取整副本（金額與面積依配置取整）
    pub fn presentation(&self, config: &PricingConfig) -> PricedUnit {
        PricedUnit {
            typology_name: self.typology_name.clone(),
            quantity: self.quantity,
            area_sqm: config.area(self.area_sqm),
            area_sqft: config.area(self.area_sqft),
            breakdown: self
                .breakdown
                .iter()
                .map(|(component, amount)| (*component, config.money(*amount)))
                .collect(),
            total_per_unit: config.money(self.total_per_unit),
            total_for_quantity: config.money(self.total_for_quantity),
            rate_per_sqft: self.rate_per_sqft.map(|v| config.money(v)),
            rate_per_sqm: self.rate_per_sqm.map(|v| config.money(v)),
            unstocked_hardware: self.unstocked_hardware.clone(),
        }
    }
}
