//! 窗洞規格模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::RoleTag;

/// 元件位置
///
/// 結構型材（外框、把手、上下梃、中梃）由型式記錄指定；
/// 其餘位置由操作員在報價列上選擇。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentSlot {
    /// 軌道外框
    Track,
    /// 把手梃（扇的直向外側料）
    Handle,
    /// 上下梃（扇的橫向料）
    TopBottom,
    /// 中梃
    Middle,
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
    /// 鎖具
    Lock,
}

impl ComponentSlot {
    /// 所有位置（固定順序）
    pub const ALL: [ComponentSlot; 11] = [
        ComponentSlot::Track,
        ComponentSlot::Handle,
        ComponentSlot::TopBottom,
        ComponentSlot::Middle,
        ComponentSlot::InsideInterlock,
        ComponentSlot::OutsideInterlock,
        ComponentSlot::MeshInterlock,
        ComponentSlot::Rail,
        ComponentSlot::Glass,
        ComponentSlot::Finish,
        ComponentSlot::Lock,
    ];

    /// 對應的目錄角色
    pub fn role(&self) -> RoleTag {
        match self {
            ComponentSlot::Track => RoleTag::Track,
            ComponentSlot::Handle => RoleTag::Handle,
            ComponentSlot::TopBottom => RoleTag::TopBottom,
            ComponentSlot::Middle => RoleTag::Middle,
            ComponentSlot::InsideInterlock
            | ComponentSlot::OutsideInterlock
            | ComponentSlot::MeshInterlock => RoleTag::Interlock,
            ComponentSlot::Rail => RoleTag::Rail,
            ComponentSlot::Glass => RoleTag::Glass,
            ComponentSlot::Finish => RoleTag::Finish,
            ComponentSlot::Lock => RoleTag::Lock,
        }
    }

    /// 是否為由型式記錄指定的結構型材
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ComponentSlot::Track
                | ComponentSlot::Handle
                | ComponentSlot::TopBottom
                | ComponentSlot::Middle
        )
    }

    /// 是否為鋁型材（按長度與換算係數計價）
    pub fn is_profile(&self) -> bool {
        self.role().is_profile()
    }

    /// 顯示標籤
    pub fn label(&self) -> &'static str {
        match self {
            ComponentSlot::Track => "TRACK",
            ComponentSlot::Handle => "HANDLE",
            ComponentSlot::TopBottom => "TOP/BOTTOM",
            ComponentSlot::Middle => "MIDDLE",
            ComponentSlot::InsideInterlock => "INSIDE INTERLOCK",
            ComponentSlot::OutsideInterlock => "OUTSIDE INTERLOCK",
            ComponentSlot::MeshInterlock => "MESH INTERLOCK",
            ComponentSlot::Rail => "RAIL",
            ComponentSlot::Glass => "GLASS",
            ComponentSlot::Finish => "FINISH",
            ComponentSlot::Lock => "LOCK",
        }
    }
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 單價基準
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateBasis {
    /// 每平方英尺
    #[default]
    #[serde(rename = "sqft")]
    PerSqFt,
    /// 每平方米
    #[serde(rename = "sqm")]
    PerSqM,
}

/// 窗洞規格（報價單中的一列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// 系列ID
    pub series_id: String,

    /// 型式ID
    pub typology_id: Option<String>,

    /// 寬度（毫米）
    pub width_mm: Option<Decimal>,

    /// 高度（毫米）
    pub height_mm: Option<Decimal>,

    /// 數量
    pub quantity: u32,

    /// 已選元件（位置 → 目錄ID）
    pub selected_components: BTreeMap<ComponentSlot, String>,

    /// 單價基準
    pub rate_basis: RateBasis,
}

impl WindowSpec {
    /// 創建新的窗洞規格（數量預設為 1）
    pub fn new(
        series_id: impl Into<String>,
        typology_id: impl Into<String>,
        width_mm: Decimal,
        height_mm: Decimal,
    ) -> Self {
        Self {
            series_id: series_id.into(),
            typology_id: Some(typology_id.into()),
            width_mm: Some(width_mm),
            height_mm: Some(height_mm),
            quantity: 1,
            selected_components: BTreeMap::new(),
            rate_basis: RateBasis::default(),
        }
    }

    /// 創建尚未填寫型式與尺寸的空白列
    pub fn blank(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            typology_id: None,
            width_mm: None,
            height_mm: None,
            quantity: 1,
            selected_components: BTreeMap::new(),
            rate_basis: RateBasis::default(),
        }
    }

    /// 建構器模式：設置數量
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// 建構器模式：選擇元件
    pub fn with_component(mut self, slot: ComponentSlot, catalog_id: impl Into<String>) -> Self {
        self.selected_components.insert(slot, catalog_id.into());
        self
    }

    /// 建構器模式：設置單價基準
    pub fn with_rate_basis(mut self, basis: RateBasis) -> Self {
        self.rate_basis = basis;
        self
    }

    /// 取得某位置已選的目錄ID
    pub fn selected(&self, slot: ComponentSlot) -> Option<&str> {
        self.selected_components
            .get(&slot)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// 修改元件選擇（空字串視為取消選擇）
    pub fn set_component(&mut self, slot: ComponentSlot, catalog_id: Option<String>) {
        match catalog_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                self.selected_components.insert(slot, id);
            }
            None => {
                self.selected_components.remove(&slot);
            }
        }
    }
}
