//! 用料彙總

use mto_core::units::fixed;
use mto_core::{AggregatedMto, MaterialConsumption, MtoCategory, MtoItem, PricingConfig};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::{MtoResult, MtoWarning};

/// 分類內的一組用料
#[derive(Debug)]
struct Group {
    label: String,
    expressions: Vec<String>,
    total: Decimal,
}

/// 單一分類的累積器（保持首次出現順序）
#[derive(Debug, Default)]
struct Section {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl Section {
    fn add(&mut self, record: &MaterialConsumption) {
        match self.index.get(&record.material_label) {
            Some(&idx) => {
                let group = &mut self.groups[idx];
                group.expressions.push(record.quantity_expression.clone());
                group.total += record.quantity_total;
            }
            None => {
                self.index.insert(record.material_label.clone(), self.groups.len());
                self.groups.push(Group {
                    label: record.material_label.clone(),
                    expressions: vec![record.quantity_expression.clone()],
                    total: record.quantity_total,
                });
            }
        }
    }

    fn finish(self, category: MtoCategory, scale: u32) -> AggregatedMto {
        let items = self
            .groups
            .into_iter()
            .zip(1u32..)
            .map(|(group, sr_no)| MtoItem {
                sr_no,
                material: group.label,
                quantity: group.expressions.join(" + "),
                total: fixed(group.total, scale),
            })
            .collect();

        AggregatedMto { category, items }
    }
}

/// 用料彙總器
pub struct MtoAggregator;

impl MtoAggregator {
    /// 依 (分類, 名稱) 彙總所有列的用料
    ///
    /// 固定輸出四個分類（ALUMINIUM、GLASS、FINISH、HARDWARE），
    /// 分類內依首次出現順序編號。
    pub fn aggregate(rows: &[Vec<MaterialConsumption>], config: &PricingConfig) -> Vec<AggregatedMto> {
        Self::aggregate_with_warnings(rows, config).sections
    }

    /// 彙總並對無法對應目錄的用料發出警告
    pub fn aggregate_with_warnings(rows: &[Vec<MaterialConsumption>], config: &PricingConfig) -> MtoResult {
        let mut sections: HashMap<MtoCategory, Section> = HashMap::new();
        let mut warnings = Vec::new();

        for (row_idx, row) in rows.iter().enumerate() {
            for record in row {
                if !record.resolved {
                    warnings.push(MtoWarning::warning(
                        record.catalog_ref.clone().unwrap_or_else(|| record.material_label.clone()),
                        format!(
                            "第 {} 列的 {} 無法對應目錄，以位置名稱列出",
                            row_idx + 1,
                            record.material_label
                        ),
                    ));
                }
                sections.entry(record.category).or_default().add(record);
            }
        }

        let sections = MtoCategory::ALL
            .iter()
            .map(|category| {
                sections
                    .remove(category)
                    .unwrap_or_default()
                    .finish(*category, config.expression_scale)
            })
            .collect();

        MtoResult {
            sections,
            warnings,
            calculation_time_ms: None,
        }
    }
}
