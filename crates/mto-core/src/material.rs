//! 用料（Material Take-Off）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::RoleTag;
use crate::window::ComponentSlot;

/// 用料分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MtoCategory {
    Aluminium,
    Glass,
    Finish,
    Hardware,
}

impl MtoCategory {
    /// 輸出順序
    pub const ALL: [MtoCategory; 4] = [
        MtoCategory::Aluminium,
        MtoCategory::Glass,
        MtoCategory::Finish,
        MtoCategory::Hardware,
    ];

    /// 由目錄角色推得分類：型材 → 鋁材，鎖具與五金 → 五金
    pub fn from_role(role: RoleTag) -> Self {
        match role {
            RoleTag::Glass => MtoCategory::Glass,
            RoleTag::Finish => MtoCategory::Finish,
            RoleTag::Lock | RoleTag::HardwarePiece => MtoCategory::Hardware,
            RoleTag::Interlock
            | RoleTag::Rail
            | RoleTag::Track
            | RoleTag::Handle
            | RoleTag::TopBottom
            | RoleTag::Middle => MtoCategory::Aluminium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MtoCategory::Aluminium => "ALUMINIUM",
            MtoCategory::Glass => "GLASS",
            MtoCategory::Finish => "FINISH",
            MtoCategory::Hardware => "HARDWARE",
        }
    }
}

impl fmt::Display for MtoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 單列用料記錄（由 BOM 推導產生，立即交給彙總）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialConsumption {
    /// 用料名稱
    pub material_label: String,

    /// 可稽核的數量算式，例如 "3 × 2.40"
    pub quantity_expression: String,

    /// 算式數值（完整精度）
    pub quantity_total: Decimal,

    /// 分類
    pub category: MtoCategory,

    /// 來源位置（五金為 None）
    pub slot: Option<ComponentSlot>,

    /// 目錄ID或五金料號
    pub catalog_ref: Option<String>,

    /// 是否成功對應到目錄項目
    pub resolved: bool,
}

impl MaterialConsumption {
    /// 創建已對應目錄的用料記錄
    pub fn new(
        material_label: impl Into<String>,
        quantity_expression: impl Into<String>,
        quantity_total: Decimal,
        category: MtoCategory,
    ) -> Self {
        Self {
            material_label: material_label.into(),
            quantity_expression: quantity_expression.into(),
            quantity_total,
            category,
            slot: None,
            catalog_ref: None,
            resolved: true,
        }
    }

    /// 建構器模式：設置來源位置
    pub fn with_slot(mut self, slot: ComponentSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// 建構器模式：設置目錄參照
    pub fn with_catalog_ref(mut self, catalog_ref: impl Into<String>) -> Self {
        self.catalog_ref = Some(catalog_ref.into());
        self
    }

    /// 建構器模式：標記為無法對應目錄
    pub fn unresolved(mut self) -> Self {
        self.resolved = false;
        self
    }
}

/// 彙總後的用料明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtoItem {
    /// 分類內序號（從 1 開始）
    #[serde(rename = "srNo")]
    pub sr_no: u32,

    /// 用料名稱
    pub material: String,

    /// 各列算式以 " + " 串接
    pub quantity: String,

    /// 總量（已取整）
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// 單一分類的彙總用料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMto {
    pub category: MtoCategory,
    pub items: Vec<MtoItem>,
}

impl AggregatedMto {
    /// 創建空的分類
    pub fn empty(category: MtoCategory) -> Self {
        Self {
            category,
            items: Vec::new(),
        }
    }

    /// 依名稱查找明細
    pub fn find(&self, material: &str) -> Option<&MtoItem> {
        self.items.iter().find(|item| item.material == material)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_role() {
        assert_eq!(MtoCategory::from_role(RoleTag::Interlock), MtoCategory::Aluminium);
        assert_eq!(MtoCategory::from_role(RoleTag::Glass), MtoCategory::Glass);
        assert_eq!(MtoCategory::from_role(RoleTag::Finish), MtoCategory::Finish);
        assert_eq!(MtoCategory::from_role(RoleTag::Lock), MtoCategory::Hardware);
        assert_eq!(MtoCategory::from_role(RoleTag::HardwarePiece), MtoCategory::Hardware);
    }

    #[test]
    fn test_consumption_builder() {
        let record = MaterialConsumption::new("INSIDE INTERLOCK", "1 × 1.50", Decimal::new(15, 1), MtoCategory::Aluminium)
            .with_slot(ComponentSlot::InsideInterlock)
            .with_catalog_ref("AL-IL")
            .unresolved();

        assert_eq!(record.slot, Some(ComponentSlot::InsideInterlock));
        assert_eq!(record.catalog_ref.as_deref(), Some("AL-IL"));
        assert!(!record.resolved);
    }

    #[test]
    fn test_output_shape() {
        let section = AggregatedMto {
            category: MtoCategory::Aluminium,
            items: vec![MtoItem {
                sr_no: 1,
                material: "ALUMINUM RAIL".to_string(),
                quantity: "1 × 2.40 + 2 × 2.40".to_string(),
                total: Decimal::new(720, 2),
            }],
        };

        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["category"], "ALUMINIUM");
        assert_eq!(json["items"][0]["srNo"], 1);
        assert_eq!(json["items"][0]["material"], "ALUMINUM RAIL");
        assert_eq!(json["items"][0]["quantity"], "1 × 2.40 + 2 × 2.40");
        assert_eq!(json["items"][0]["total"], "7.20");
        assert!(section.find("ALUMINUM RAIL").is_some());
    }
}
