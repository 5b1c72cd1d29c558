//! 報價單合計（產品金額、加工與安裝費、折扣、稅額）

use mto_core::{MtoError, PricingConfig, QuotationHeader, RateBasis, TaxJurisdiction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recompute::PricedRow;

/// 稅項
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub name: String,
    pub percent: Decimal,
    pub amount: Decimal,
}

/// 報價單合計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationTotals {
    /// 各列數量總價加總
    pub products_amount: Decimal,

    /// 總面積（依表頭的面積基準）
    pub quoted_area: Decimal,

    pub fabrication_charge: Decimal,
    pub installation_charge: Decimal,
    pub fixed_charge: Decimal,

    /// 折扣前小計
    pub subtotal: Decimal,
    pub discount_amount: Decimal,

    /// 稅前金額
    pub taxable_amount: Decimal,
    pub taxes: Vec<TaxLine>,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

impl QuotationTotals {
    /// 呈現用的取整副本
    pub fn presentation(&self, config: &PricingConfig) -> QuotationTotals {
        QuotationTotals {
            products_amount: config.money(self.products_amount),
            quoted_area: config.area(self.quoted_area),
            fabrication_charge: config.money(self.fabrication_charge),
            installation_charge: config.money(self.installation_charge),
            fixed_charge: config.money(self.fixed_charge),
            subtotal: config.money(self.subtotal),
            discount_amount: config.money(self.discount_amount),
            taxable_amount: config.money(self.taxable_amount),
            taxes: self
                .taxes
                .iter()
                .map(|line| TaxLine {
                    name: line.name.clone(),
                    percent: line.percent,
                    amount: config.money(line.amount),
                })
                .collect(),
            tax_amount: config.money(self.tax_amount),
            grand_total: config.money(self.grand_total),
        }
    }
}

/// 計價失敗的列（序號從 1 開始）
#[derive(Debug, Clone, PartialEq)]
pub struct FailedRow {
    pub row_no: usize,
    pub error: MtoError,
}

/// 有五金不在目錄中的列（序號從 1 開始）
///
/// 這些料號沒有計價，合計中不含其金額。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstockedRow {
    pub row_no: usize,
    pub vendor_codes: Vec<String>,
}

/// 報價單彙總
///
/// 只要有任何一列計價失敗就不產生合計，避免以零元計入總價。
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationSummary {
    pub failed_rows: Vec<FailedRow>,
    pub unstocked: Vec<UnstockedRow>,
    pub totals: Option<QuotationTotals>,
}

impl QuotationSummary {
    pub fn is_complete(&self) -> bool {
        self.totals.is_some()
    }

    /// 合計是否涵蓋所有五金
    pub fn is_fully_stocked(&self) -> bool {
        self.unstocked.is_empty()
    }
}

/// 報價單合計計算器
pub struct QuotationCalculator;

impl QuotationCalculator {
    pub fn summarize(header: &QuotationHeader, rows: &[PricedRow]) -> QuotationSummary {
        let failed_rows: Vec<FailedRow> = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                row.error().map(|error| FailedRow {
                    row_no: idx + 1,
                    error: error.clone(),
                })
            })
            .collect();

        let unstocked: Vec<UnstockedRow> = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let priced = row.priced()?;
                (!priced.is_fully_stocked()).then(|| UnstockedRow {
                    row_no: idx + 1,
                    vendor_codes: priced.unstocked_hardware.clone(),
                })
            })
            .collect();
        if !unstocked.is_empty() {
            tracing::warn!("{} 列有五金不在目錄中，合計不含其金額", unstocked.len());
        }

        if !failed_rows.is_empty() {
            tracing::warn!("{} 列計價失敗，不產生報價合計", failed_rows.len());
            return QuotationSummary {
                failed_rows,
                unstocked,
                totals: None,
            };
        }

        let mut products_amount = Decimal::ZERO;
        let mut quoted_area = Decimal::ZERO;
        for priced in rows.iter().filter_map(PricedRow::priced) {
            let area = match header.charge_basis {
                RateBasis::PerSqFt => priced.area_sqft,
                RateBasis::PerSqM => priced.area_sqm,
            };
            products_amount += priced.total_for_quantity;
            quoted_area += area * Decimal::from(priced.quantity);
        }

        let fabrication_charge = header.fabrication_rate_per_area * quoted_area;
        let installation_charge = header.installation_rate_per_area * quoted_area;
        let subtotal = products_amount + fabrication_charge + installation_charge + header.fixed_charge;
        let discount_amount = subtotal * header.discount_percent / Decimal::ONE_HUNDRED;
        let taxable_amount = subtotal - discount_amount;

        let taxes = Self::tax_lines(&header.tax, taxable_amount);
        let tax_amount: Decimal = taxes.iter().map(|line| line.amount).sum();
        let grand_total = taxable_amount + tax_amount;

        tracing::info!(
            "報價合計：{} 列，稅前 {}，稅額 {}，總計 {}",
            rows.len(),
            taxable_amount,
            tax_amount,
            grand_total
        );

        QuotationSummary {
            failed_rows,
            unstocked,
            totals: Some(QuotationTotals {
                products_amount,
                quoted_area,
                fabrication_charge,
                installation_charge,
                fixed_charge: header.fixed_charge,
                subtotal,
                discount_amount,
                taxable_amount,
                taxes,
                tax_amount,
                grand_total,
            }),
        }
    }

    fn tax_lines(tax: &TaxJurisdiction, taxable: Decimal) -> Vec<TaxLine> {
        let line = |name: &str, percent: Decimal| TaxLine {
            name: name.to_string(),
            percent,
            amount: taxable * percent / Decimal::ONE_HUNDRED,
        };

        match *tax {
            TaxJurisdiction::IntraState {
                cgst_percent,
                sgst_percent,
            } => vec![line("CGST", cgst_percent), line("SGST", sgst_percent)],
            TaxJurisdiction::InterState { igst_percent } => vec![line("IGST", igst_percent)],
        }
    }
}
