//! 批次重算
//!
//! 全單鋁材單價或目錄變更後，由呼叫端明確觸發，整列重新計價。

use mto_core::{
    CatalogSnapshot, MtoError, PricedUnit, PricingConfig, QuotationRow, Result, WindowSpec,
};
use rust_decimal::Decimal;

use crate::formula::FormulaTable;
use crate::pricing::PricingCalculator;

/// 單列的計價結果
#[derive(Debug, Clone, PartialEq)]
pub struct PricedRow {
    pub spec: WindowSpec,
    pub outcome: Result<PricedUnit>,
}

impl PricedRow {
    pub fn priced(&self) -> Option<&PricedUnit> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&MtoError> {
        self.outcome.as_ref().err()
    }

    pub fn is_priced(&self) -> bool {
        self.outcome.is_ok()
    }

    /// 轉為保存格式；計價失敗的列保留輸入欄位，計算欄位留空
    pub fn to_quotation_row(&self, config: &PricingConfig) -> QuotationRow {
        match &self.outcome {
            Ok(priced) => QuotationRow::from_priced(&self.spec, priced, config),
            Err(_) => QuotationRow::from_spec(&self.spec),
        }
    }
}

/// 以新的鋁材單價重新計價所有列（保持列順序，單列失敗不影響其他列）
pub fn recompute(
    specs: &[WindowSpec],
    catalog: &CatalogSnapshot,
    formulas: &FormulaTable,
    aluminium_rate: Decimal,
) -> Vec<PricedRow> {
    tracing::info!("重新計價 {} 列，鋁材單價 {}", specs.len(), aluminium_rate);

    specs
        .iter()
        .enumerate()
        .map(|(idx, spec)| {
            let outcome = PricingCalculator::price(spec, catalog, formulas, aluminium_rate);
            if let Err(err) = &outcome {
                tracing::warn!("第 {} 列計價失敗: {}", idx + 1, err);
            }
            PricedRow {
                spec: spec.clone(),
                outcome,
            }
        })
        .collect()
}
