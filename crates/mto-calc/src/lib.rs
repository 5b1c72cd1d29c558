//! # MTO Calculation Engine
//!
//! 鋁門窗計價、用料推導與用料彙總引擎

pub mod aggregation;
pub mod bom;
pub mod calculator;
pub mod formula;
pub mod geometry;
pub mod pricing;
pub mod recompute;
pub mod resolve;
pub mod totals;

#[cfg(test)]
mod test_support;

// Re-export 主要類型
pub use aggregation::MtoAggregator;
pub use bom::BomCalculator;
pub use calculator::MtoCalculator;
pub use formula::{FormulaSpec, FormulaTable, SlidingShape};
pub use geometry::{TakeOffPlan, WindowGeometry};
pub use pricing::PricingCalculator;
pub use recompute::{recompute, PricedRow};
pub use totals::{FailedRow, QuotationCalculator, QuotationSummary, QuotationTotals, UnstockedRow};

use mto_core::{AggregatedMto, MtoCategory};

/// 用料計算結果
#[derive(Debug, Clone, PartialEq)]
pub struct MtoResult {
    /// 依 ALUMINIUM、GLASS、FINISH、HARDWARE 排列的彙總用料
    pub sections: Vec<AggregatedMto>,

    /// 警告信息
    pub warnings: Vec<MtoWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl MtoResult {
    /// 創建空的計算結果（四個分類皆無用料）
    pub fn empty() -> Self {
        Self {
            sections: MtoCategory::ALL.iter().map(|c| AggregatedMto::empty(*c)).collect(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: MtoWarning) {
        self.warnings.push(warning);
    }

    /// 取得某分類
    pub fn section(&self, category: MtoCategory) -> Option<&AggregatedMto> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// 是否有錯誤等級的警告
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Error)
    }

    /// 輸出為保存格式：`[{category, items: [{srNo, material, quantity, total}]}]`
    pub fn to_output_json(&self) -> mto_core::Result<String> {
        Ok(serde_json::to_string_pretty(&self.sections)?)
    }
}

/// 用料警告
#[derive(Debug, Clone, PartialEq)]
pub struct MtoWarning {
    pub component_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl MtoWarning {
    pub fn new(component_id: impl Into<String>, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            component_id: component_id.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn info(component_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(component_id, message, WarningSeverity::Info)
    }

    pub fn warning(component_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(component_id, message, WarningSeverity::Warning)
    }

    pub fn error(component_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(component_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
