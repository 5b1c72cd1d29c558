//! MTO 主計算器

use mto_core::{
    AggregatedMto, CatalogSnapshot, MaterialConsumption, PricedUnit, PricingConfig,
    QuotationHeader, Result, WindowSpec,
};
use rust_decimal::Decimal;

use crate::aggregation::MtoAggregator;
use crate::bom::BomCalculator;
use crate::formula::FormulaTable;
use crate::pricing::PricingCalculator;
use crate::recompute::{self, PricedRow};
use crate::resolve::ResolvedWindow;
use crate::totals::{QuotationCalculator, QuotationSummary};
use crate::{MtoResult, MtoWarning};

/// MTO 計算器
///
/// 持有唯一一份型式公式表，計價與用料推導都經由它取得長度。
#[derive(Debug, Clone)]
pub struct MtoCalculator {
    /// 型式公式表
    formulas: FormulaTable,

    /// 輸出配置
    config: PricingConfig,
}

impl Default for MtoCalculator {
    fn default() -> Self {
        Self {
            formulas: FormulaTable::standard(),
            config: PricingConfig::default(),
        }
    }
}

impl MtoCalculator {
    /// 創建新的計算器
    pub fn new(formulas: FormulaTable, config: PricingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { formulas, config })
    }

    /// 使用標準公式表與預設配置
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn formulas(&self) -> &FormulaTable {
        &self.formulas
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// 單樘計價
    pub fn price(&self, spec: &WindowSpec, catalog: &CatalogSnapshot, aluminium_rate: Decimal) -> Result<PricedUnit> {
        PricingCalculator::price(spec, catalog, &self.formulas, aluminium_rate)
    }

    /// 單列用料推導
    pub fn derive_bom(
        &self,
        spec: &WindowSpec,
        priced: &PricedUnit,
        catalog: &CatalogSnapshot,
    ) -> Result<Vec<MaterialConsumption>> {
        BomCalculator::derive(spec, priced, catalog, &self.formulas, &self.config)
    }

    /// 彙總多列用料
    pub fn aggregate(&self, rows: &[Vec<MaterialConsumption>]) -> Vec<AggregatedMto> {
        MtoAggregator::aggregate(rows, &self.config)
    }

    /// 以新的鋁材單價重算所有列
    pub fn recompute(&self, specs: &[WindowSpec], catalog: &CatalogSnapshot, aluminium_rate: Decimal) -> Vec<PricedRow> {
        recompute::recompute(specs, catalog, &self.formulas, aluminium_rate)
    }

    /// 整張報價單：依表頭的鋁材單價計價所有列並計算合計
    pub fn quote(
        &self,
        header: &QuotationHeader,
        specs: &[WindowSpec],
        catalog: &CatalogSnapshot,
    ) -> (Vec<PricedRow>, QuotationSummary) {
        let rows = self.recompute(specs, catalog, header.aluminium_rate);
        let summary = QuotationCalculator::summarize(header, &rows);
        (rows, summary)
    }

    /// 主用料入口：逐列計價、推導用料，最後彙總
    ///
    /// 計價失敗的列不會消失，而是以錯誤等級的警告列出。
    pub fn generate_mto(&self, specs: &[WindowSpec], catalog: &CatalogSnapshot, aluminium_rate: Decimal) -> MtoResult {
        tracing::info!("開始用料計算：{} 列，鋁材單價 {}", specs.len(), aluminium_rate);
        let start_time = std::time::Instant::now();

        let mut rows = Vec::with_capacity(specs.len());
        let mut warnings = Vec::new();

        for (idx, spec) in specs.iter().enumerate() {
            let row_no = idx + 1;
            tracing::debug!("推導第 {} 列用料", row_no);

            match self.derive_row(spec, catalog, aluminium_rate) {
                Ok((priced, records)) => {
                    for code in &priced.unstocked_hardware {
                        warnings.push(MtoWarning::info(
                            code.clone(),
                            format!("第 {} 列的五金 {} 不在目錄中，未列入用料", row_no, code),
                        ));
                    }
                    rows.push(records);
                }
                Err(err) => {
                    tracing::warn!("第 {} 列無法推導用料: {}", row_no, err);
                    warnings.push(MtoWarning::error(
                        spec.typology_id.clone().unwrap_or_else(|| spec.series_id.clone()),
                        format!("第 {} 列計價失敗，未列入用料: {}", row_no, err),
                    ));
                }
            }
        }

        let mut result = MtoAggregator::aggregate_with_warnings(&rows, &self.config);
        warnings.append(&mut result.warnings);
        result.warnings = warnings;

        let elapsed = start_time.elapsed().as_millis();
        result.calculation_time_ms = Some(elapsed);

        tracing::info!(
            "用料計算完成：{} 列，警告 {} 筆，耗時 {} ms",
            rows.len(),
            result.warnings.len(),
            elapsed
        );

        result
    }

    /// 報價合計
    pub fn summarize_quotation(&self, header: &QuotationHeader, rows: &[PricedRow]) -> QuotationSummary {
        QuotationCalculator::summarize(header, rows)
    }

    /// 同一次解析同時用於計價與用料推導
    fn derive_row(
        &self,
        spec: &WindowSpec,
        catalog: &CatalogSnapshot,
        aluminium_rate: Decimal,
    ) -> Result<(PricedUnit, Vec<MaterialConsumption>)> {
        let resolved = ResolvedWindow::resolve(spec, catalog, &self.formulas)?;
        let priced = PricingCalculator::price_resolved(&resolved, aluminium_rate)?;
        let records = BomCalculator::derive_resolved(&resolved, &priced, &self.config)?;
        Ok((priced, records))
    }
}
