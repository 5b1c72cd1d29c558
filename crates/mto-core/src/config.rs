//! 計價配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::units;
use crate::window::RateBasis;
use crate::{MtoError, Result};

/// 小數位數上限（超過即視為配置錯誤）
const MAX_SCALE: u32 = 10;

/// 計價與用料輸出配置
///
/// 只影響呈現層的取整；引擎內部一律保留完整精度。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// 金額小數位數
    pub money_scale: u32,

    /// 面積小數位數
    pub area_scale: u32,

    /// 用料算式中長度 / 面積的小數位數
    pub expression_scale: u32,

    /// 預設的單價基準（每平方英尺 / 每平方米）
    pub default_rate_basis: RateBasis,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            money_scale: 2,
            area_scale: 3,
            expression_scale: 2,
            default_rate_basis: RateBasis::PerSqFt,
        }
    }
}

impl PricingConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PricingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置金額小數位數
    pub fn with_money_scale(mut self, scale: u32) -> Self {
        self.money_scale = scale;
        self
    }

    /// 建構器模式：設置面積小數位數
    pub fn with_area_scale(mut self, scale: u32) -> Self {
        self.area_scale = scale;
        self
    }

    /// 建構器模式：設置算式小數位數
    pub fn with_expression_scale(mut self, scale: u32) -> Self {
        self.expression_scale = scale;
        self
    }

    /// 建構器模式：設置預設單價基準
    pub fn with_default_rate_basis(mut self, basis: RateBasis) -> Self {
        self.default_rate_basis = basis;
        self
    }

    /// 檢查配置是否有效
    pub fn validate(&self) -> Result<()> {
        for (name, scale) in [
            ("money_scale", self.money_scale),
            ("area_scale", self.area_scale),
            ("expression_scale", self.expression_scale),
        ] {
            if scale > MAX_SCALE {
                return Err(MtoError::InvalidConfig(format!(
                    "{} 不可超過 {}，目前為 {}",
                    name, MAX_SCALE, scale
                )));
            }
        }
        Ok(())
    }

    /// 金額取整
    pub fn money(&self, value: Decimal) -> Decimal {
        units::fixed(value, self.money_scale)
    }

    /// 面積取整
    pub fn area(&self, value: Decimal) -> Decimal {
        units::fixed(value, self.area_scale)
    }

    /// 算式中的量測值
    pub fn expression(&self, value: Decimal) -> String {
        units::fixed_string(value, self.expression_scale)
    }
}
