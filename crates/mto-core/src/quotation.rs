//! 報價單表頭與保存格式

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::priced::{PricedUnit, UnitRate};
use crate::window::{ComponentSlot, RateBasis, WindowSpec};

/// 稅務管轄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "location", rename_all = "snake_case")]
pub enum TaxJurisdiction {
    /// 州內交易：CGST + SGST
    IntraState {
        cgst_percent: Decimal,
        sgst_percent: Decimal,
    },
    /// 跨州交易：IGST
    InterState { igst_percent: Decimal },
}

impl TaxJurisdiction {
    /// 合計稅率（百分比）
    pub fn total_percent(&self) -> Decimal {
        match self {
            TaxJurisdiction::IntraState {
                cgst_percent,
                sgst_percent,
            } => *cgst_percent + *sgst_percent,
            TaxJurisdiction::InterState { igst_percent } => *igst_percent,
        }
    }
}

impl Default for TaxJurisdiction {
    fn default() -> Self {
        TaxJurisdiction::IntraState {
            cgst_percent: Decimal::from(9),
            sgst_percent: Decimal::from(9),
        }
    }
}

/// 報價單表頭
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationHeader {
    /// 客戶名稱
    pub client_name: String,

    /// 客戶城市
    pub client_city: String,

    /// 報價日期
    pub quoted_on: Option<NaiveDate>,

    /// 稅務管轄
    pub tax: TaxJurisdiction,

    /// 加工費（每單位面積）
    pub fabrication_rate_per_area: Decimal,

    /// 安裝費（每單位面積）
    pub installation_rate_per_area: Decimal,

    /// 加工費 / 安裝費的面積基準
    pub charge_basis: RateBasis,

    /// 折扣（百分比）
    pub discount_percent: Decimal,

    /// 鋁材單價（每公斤），全單共用
    pub aluminium_rate: Decimal,

    /// 固定費用
    pub fixed_charge: Decimal,
}

impl QuotationHeader {
    /// 創建新的表頭（預設州內 9% + 9%，無附加費用）
    pub fn new(
        client_name: impl Into<String>,
        client_city: impl Into<String>,
        aluminium_rate: Decimal,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            client_city: client_city.into(),
            quoted_on: None,
            tax: TaxJurisdiction::default(),
            fabrication_rate_per_area: Decimal::ZERO,
            installation_rate_per_area: Decimal::ZERO,
            charge_basis: RateBasis::PerSqFt,
            discount_percent: Decimal::ZERO,
            aluminium_rate,
            fixed_charge: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置報價日期
    pub fn with_quoted_on(mut self, date: NaiveDate) -> Self {
        self.quoted_on = Some(date);
        self
    }

    /// 建構器模式：設置稅務管轄
    pub fn with_tax(mut self, tax: TaxJurisdiction) -> Self {
        self.tax = tax;
        self
    }

    /// 建構器模式：設置加工費與安裝費
    pub fn with_area_charges(mut self, fabrication: Decimal, installation: Decimal, basis: RateBasis) -> Self {
        self.fabrication_rate_per_area = fabrication;
        self.installation_rate_per_area = installation;
        self.charge_basis = basis;
        self
    }

    /// 建構器模式：設置折扣
    pub fn with_discount_percent(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    /// 建構器模式：設置固定費用
    pub fn with_fixed_charge(mut self, amount: Decimal) -> Self {
        self.fixed_charge = amount;
        self
    }
}

/// 報價列保存格式
///
/// 欄位名稱必須與既有已保存的報價單相容。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRow {
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub typology: String,
    #[serde(default)]
    pub inside_interlock: String,
    #[serde(default)]
    pub outside_interlock: String,
    #[serde(default)]
    pub mesh_interlock: String,
    #[serde(default)]
    pub rail: String,
    #[serde(default)]
    pub finish: String,
    #[serde(default)]
    pub glass: String,
    #[serde(default)]
    pub lock: String,
    #[serde(rename = "widthMM", default, with = "rust_decimal::serde::float_option")]
    pub width_mm: Option<Decimal>,
    #[serde(rename = "heightMM", default, with = "rust_decimal::serde::float_option")]
    pub height_mm: Option<Decimal>,
    #[serde(default = "default_qty")]
    pub qty: u32,
    #[serde(default)]
    pub sqft: String,
    #[serde(default)]
    pub sqm: String,
    #[serde(default)]
    pub rate_sq_ft: String,
    #[serde(default)]
    pub rate_sq_m: String,
    #[serde(default)]
    pub rate_type: RateBasis,
    #[serde(default)]
    pub amount: String,
}

fn default_qty() -> u32 {
    1
}

/// 保存列欄位與元件位置的對應
const ROW_SLOTS: [ComponentSlot; 7] = [
    ComponentSlot::InsideInterlock,
    ComponentSlot::OutsideInterlock,
    ComponentSlot::MeshInterlock,
    ComponentSlot::Rail,
    ComponentSlot::Finish,
    ComponentSlot::Glass,
    ComponentSlot::Lock,
];

impl QuotationRow {
    /// 由規格與計價結果建立保存列（金額 / 面積在此取整）
    pub fn from_priced(spec: &WindowSpec, priced: &PricedUnit, config: &PricingConfig) -> Self {
        let rate = |r: UnitRate| {
            r.value()
                .map(|v| config.money(v).to_string())
                .unwrap_or_default()
        };

        let mut row = Self::from_spec(spec);
        row.sqft = config.area(priced.area_sqft).to_string();
        row.sqm = config.area(priced.area_sqm).to_string();
        row.rate_sq_ft = rate(priced.rate_per_sqft);
        row.rate_sq_m = rate(priced.rate_per_sqm);
        row.amount = config.money(priced.total_for_quantity).to_string();
        row
    }

    /// 由規格建立尚未計價的保存列
    pub fn from_spec(spec: &WindowSpec) -> Self {
        let mut row = Self {
            series: spec.series_id.clone(),
            typology: spec.typology_id.clone().unwrap_or_default(),
            inside_interlock: String::new(),
            outside_interlock: String::new(),
            mesh_interlock: String::new(),
            rail: String::new(),
            finish: String::new(),
            glass: String::new(),
            lock: String::new(),
            width_mm: spec.width_mm,
            height_mm: spec.height_mm,
            qty: spec.quantity,
            sqft: String::new(),
            sqm: String::new(),
            rate_sq_ft: String::new(),
            rate_sq_m: String::new(),
            rate_type: spec.rate_basis,
            amount: String::new(),
        };
        for slot in ROW_SLOTS {
            if let (Some(id), Some(field)) = (spec.selected(slot), row.field_mut(slot)) {
                *field = id.to_string();
            }
        }
        row
    }

    /// 還原為窗洞規格（空字串與零尺寸視為未填）
    pub fn to_window_spec(&self) -> WindowSpec {
        let mut spec = WindowSpec::blank(self.series.clone());
        spec.typology_id = Some(self.typology.clone()).filter(|t| !t.is_empty());
        spec.width_mm = self.width_mm.filter(|w| !w.is_zero());
        spec.height_mm = self.height_mm.filter(|h| !h.is_zero());
        spec.quantity = self.qty;
        spec.rate_basis = self.rate_type;
        for slot in ROW_SLOTS {
            if let Some(value) = self.field(slot) {
                spec.set_component(slot, Some(value.to_string()));
            }
        }
        spec
    }

    /// 取得某位置的欄位值（空字串視為未選）
    pub fn field(&self, slot: ComponentSlot) -> Option<&str> {
        let value = match slot {
            ComponentSlot::InsideInterlock => &self.inside_interlock,
            ComponentSlot::OutsideInterlock => &self.outside_interlock,
            ComponentSlot::MeshInterlock => &self.mesh_interlock,
            ComponentSlot::Rail => &self.rail,
            ComponentSlot::Finish => &self.finish,
            ComponentSlot::Glass => &self.glass,
            ComponentSlot::Lock => &self.lock,
            _ => return None,
        };
        Some(value.as_str()).filter(|v| !v.is_empty())
    }

    // 結構型材不在保存格式內
    fn field_mut(&mut self, slot: ComponentSlot) -> Option<&mut String> {
        match slot {
            ComponentSlot::InsideInterlock => Some(&mut self.inside_interlock),
            ComponentSlot::OutsideInterlock => Some(&mut self.outside_interlock),
            ComponentSlot::MeshInterlock => Some(&mut self.mesh_interlock),
            ComponentSlot::Rail => Some(&mut self.rail),
            ComponentSlot::Finish => Some(&mut self.finish),
            ComponentSlot::Glass => Some(&mut self.glass),
            ComponentSlot::Lock => Some(&mut self.lock),
            _ => None,
        }
    }
}
