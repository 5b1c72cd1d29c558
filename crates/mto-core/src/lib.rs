//! # MTO Core
//!
//! 鋁門窗報價與用料（MTO）核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod material;
pub mod priced;
pub mod quotation;
pub mod units;
pub mod window;

// Re-export 主要類型
pub use catalog::{CatalogItem, CatalogSnapshot, RoleTag, TypologyRecord};
pub use config::PricingConfig;
pub use material::{AggregatedMto, MaterialConsumption, MtoCategory, MtoItem};
pub use priced::{PriceComponent, PricedUnit, UnitRate};
pub use quotation::{QuotationHeader, QuotationRow, TaxJurisdiction};
pub use units::SQFT_PER_SQM;
pub use window::{ComponentSlot, RateBasis, WindowSpec};

/// 報價 / 用料錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MtoError {
    #[error("缺少必要欄位: {0}")]
    MissingField(String),

    #[error("無效的尺寸 {field}: {value}")]
    InvalidDimension { field: String, value: String },

    #[error("找不到型式: 系列 {series} / 型式 {typology}")]
    UnknownTypology { series: String, typology: String },

    #[error("找不到元件 {slot}: {id}")]
    UnknownComponent { slot: String, id: String },

    #[error("元件 {id} 的角色為 {actual}，不能用於 {slot}")]
    RoleMismatch {
        slot: String,
        id: String,
        actual: String,
    },

    #[error("型式 {typology} 未設定 {slot} 型材")]
    ProfileNotConfigured { typology: String, slot: String },

    #[error("目錄項目 {item} 缺少屬性 {attribute}")]
    MissingAttribute { item: String, attribute: String },

    #[error("找不到型式公式: {0}")]
    FormulaNotFound(String),

    #[error("重複的目錄 ID: {0}")]
    DuplicateId(String),

    #[error("數值溢位: {0}")]
    Overflow(String),

    #[error("計價結果已過期: {0}")]
    StalePricedUnit(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("序列化錯誤: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MtoError {
    fn from(err: serde_json::Error) -> Self {
        MtoError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MtoError>;
