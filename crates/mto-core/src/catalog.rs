//! 目錄模型（型材、玻璃、表面處理、鎖具、五金）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::window::ComponentSlot;
use crate::{MtoError, Result};

/// 目錄項目角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    /// 勾企
    Interlock,
    /// 滑軌
    Rail,
    /// 軌道外框
    Track,
    /// 把手梃
    Handle,
    /// 上下梃
    TopBottom,
    /// 中梃
    Middle,
    /// 玻璃
    Glass,
    /// 表面處理
    Finish,
    /// 鎖具
    Lock,
    /// 五金配件
    HardwarePiece,
}

impl RoleTag {
    /// 是否為鋁型材
    pub fn is_profile(&self) -> bool {
        matches!(
            self,
            RoleTag::Interlock
                | RoleTag::Rail
                | RoleTag::Track
                | RoleTag::Handle
                | RoleTag::TopBottom
                | RoleTag::Middle
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleTag::Interlock => "INTERLOCK",
            RoleTag::Rail => "RAIL",
            RoleTag::Track => "TRACK",
            RoleTag::Handle => "HANDLE",
            RoleTag::TopBottom => "TOP/BOTTOM",
            RoleTag::Middle => "MIDDLE",
            RoleTag::Glass => "GLASS",
            RoleTag::Finish => "FINISH",
            RoleTag::Lock => "LOCK",
            RoleTag::HardwarePiece => "HARDWARE",
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 目錄項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// 目錄ID
    pub id: String,

    /// 顯示名稱（型號 / 品名）
    pub display_name: String,

    /// 單價（型材為每公斤，玻璃為每平方米，表面處理為每單位塗裝量，其餘為每件）
    pub rate: Decimal,

    /// 角色
    pub role: RoleTag,

    /// 換算係數（每米公斤數），僅型材適用
    pub conversion_factor: Option<Decimal>,

    /// 表面處理參數（每米塗裝係數），僅型材適用
    pub finish_parameter: Option<Decimal>,

    /// 供應商料號
    pub vendor_code: Option<String>,
}

impl CatalogItem {
    /// 創建新的目錄項目
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        role: RoleTag,
        rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            rate,
            role,
            conversion_factor: None,
            finish_parameter: None,
            vendor_code: None,
        }
    }

    /// 建構器模式：設置換算係數
    pub fn with_conversion_factor(mut self, factor: Decimal) -> Self {
        self.conversion_factor = Some(factor);
        self
    }

    /// 建構器模式：設置表面處理參數
    pub fn with_finish_parameter(mut self, parameter: Decimal) -> Self {
        self.finish_parameter = Some(parameter);
        self
    }

    /// 建構器模式：設置供應商料號
    pub fn with_vendor_code(mut self, code: impl Into<String>) -> Self {
        self.vendor_code = Some(code.into());
        self
    }

    /// 取得換算係數，缺少時回報錯誤
    pub fn require_conversion_factor(&self) -> Result<Decimal> {
        self.conversion_factor
            .ok_or_else(|| self.missing_attribute("conversionFactor"))
    }

    /// 取得表面處理參數，缺少時回報錯誤
    pub fn require_finish_parameter(&self) -> Result<Decimal> {
        self.finish_parameter
            .ok_or_else(|| self.missing_attribute("finishParameter"))
    }

    fn missing_attribute(&self, attribute: &str) -> MtoError {
        MtoError::MissingAttribute {
            item: self.id.clone(),
            attribute: attribute.to_string(),
        }
    }
}

/// 型式記錄（系列下的一種門窗結構）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypologyRecord {
    /// 型式ID
    pub id: String,

    /// 所屬系列
    pub series_id: String,

    /// 型式名稱，例如 "2 TRACK 2 SHUTTER"
    pub name: String,

    /// 結構型材（位置 → 目錄ID）
    #[serde(default)]
    pub profiles: BTreeMap<ComponentSlot, String>,
}

impl TypologyRecord {
    /// 創建新的型式記錄
    pub fn new(
        id: impl Into<String>,
        series_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            series_id: series_id.into(),
            name: name.into(),
            profiles: BTreeMap::new(),
        }
    }

    /// 建構器模式：指定結構型材
    pub fn with_profile(mut self, slot: ComponentSlot, catalog_id: impl Into<String>) -> Self {
        self.profiles.insert(slot, catalog_id.into());
        self
    }

    /// 取得某位置的型材ID
    pub fn profile_id(&self, slot: ComponentSlot) -> Option<&str> {
        self.profiles.get(&slot).map(String::as_str)
    }
}

/// 目錄快照
///
/// 計價開始前一次性取得，計算期間不可變。
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    items: Vec<CatalogItem>,
    typologies: Vec<TypologyRecord>,
    by_id: HashMap<String, usize>,
    by_vendor_code: HashMap<String, usize>,
}

impl CatalogSnapshot {
    /// 建立快照並建立索引
    ///
    /// 目錄ID必須唯一；同一系列下的型式ID也必須唯一。
    pub fn new(items: Vec<CatalogItem>, typologies: Vec<TypologyRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_vendor_code = HashMap::new();

        for (idx, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), idx).is_some() {
                return Err(MtoError::DuplicateId(item.id.clone()));
            }
            if let Some(code) = &item.vendor_code {
                // 同一料號出現多次時，以第一筆為準
                by_vendor_code.entry(code.clone()).or_insert(idx);
            }
        }

        {
            let mut seen = std::collections::HashSet::new();
            for typology in &typologies {
                if !seen.insert((typology.series_id.as_str(), typology.id.as_str())) {
                    return Err(MtoError::DuplicateId(format!(
                        "{}/{}",
                        typology.series_id, typology.id
                    )));
                }
            }
        }

        tracing::debug!(
            "建立目錄快照：項目 {} 筆，型式 {} 筆",
            items.len(),
            typologies.len()
        );

        Ok(Self {
            items,
            typologies,
            by_id,
            by_vendor_code,
        })
    }

    /// 依角色與型號片段查找（不分大小寫，保持目錄順序）
    pub fn find_by_role_and_model(&self, role: RoleTag, model_substring: &str) -> Vec<&CatalogItem> {
        let needle = model_substring.to_uppercase();
        self.items
            .iter()
            .filter(|item| item.role == role)
            .filter(|item| item.display_name.to_uppercase().contains(&needle))
            .collect()
    }

    /// 依ID查找
    pub fn find_by_id(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// 依系列與型式ID查找型式記錄
    pub fn find_by_typology(&self, series_id: &str, typology_id: &str) -> Option<&TypologyRecord> {
        self.typologies
            .iter()
            .find(|t| t.series_id == series_id && t.id == typology_id)
    }

    /// 依供應商料號查找
    pub fn find_by_vendor_code(&self, code: &str) -> Option<&CatalogItem> {
        self.by_vendor_code.get(code).map(|&idx| &self.items[idx])
    }

    /// 所有目錄項目
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// 所有型式記錄
    pub fn typologies(&self) -> &[TypologyRecord] {
        &self.typologies
    }
}
