//! 用料推導（BOM）
//!
//! 與計價共用同一份取料計畫，長度、面積與件數完全一致。

use mto_core::{
    CatalogItem, CatalogSnapshot, ComponentSlot, MaterialConsumption, MtoCategory, MtoError,
    PricedUnit, PricingConfig, Result, WindowSpec,
};
use mto_core::units::{checked_add, checked_mul};
use rust_decimal::Decimal;

use crate::formula::FormulaTable;
use crate::geometry::TakeOffPlan;
use crate::resolve::{ResolvedWindow, SlotResolution};

/// 用料推導計算器
pub struct BomCalculator;

impl BomCalculator {
    /// 推導單列窗洞的用料
    ///
    /// 單一位置解析失敗時不會丟棄該列，而是以位置標籤代替名稱並標記為未對應。
    pub fn derive(
        spec: &WindowSpec,
        priced: &PricedUnit,
        catalog: &CatalogSnapshot,
        formulas: &FormulaTable,
        config: &PricingConfig,
    ) -> Result<Vec<MaterialConsumption>> {
        let resolved = ResolvedWindow::resolve(spec, catalog, formulas)?;
        Self::derive_resolved(&resolved, priced, config)
    }

    /// 對已解析的窗洞推導用料
    pub fn derive_resolved(
        resolved: &ResolvedWindow<'_>,
        priced: &PricedUnit,
        config: &PricingConfig,
    ) -> Result<Vec<MaterialConsumption>> {
        let plan = &resolved.plan;
        Self::check_fresh(plan, priced)?;

        let quantity = Decimal::from(plan.geometry.quantity);
        let mut records = Vec::new();

        // 型材：每段 "支數 × 每支長度"
        let mut coated = Decimal::ZERO;
        for resolution in &resolved.profiles {
            let Some(target) = Target::of(resolution, &plan.typology_name) else {
                continue;
            };

            for run in plan.runs_for(resolution.slot) {
                let count = Decimal::from(run.count) * quantity;
                records.push(target.consumption(
                    resolution.slot,
                    count,
                    run.piece_m,
                    config,
                )?);
            }

            if let Target::Resolved(item) = target {
                match item.finish_parameter {
                    Some(parameter) => {
                        let length = plan.slot_length(resolution.slot);
                        let per_unit = checked_mul(parameter / Decimal::ONE_THOUSAND, length, &item.id)?;
                        coated = checked_add(coated, per_unit, &item.id)?;
                    }
                    None => tracing::warn!("型材 {} 沒有表面處理參數，不計入塗裝量", item.id),
                }
            }
        }

        if let Some(glass) = &resolved.glass {
            if let Some(target) = Target::of(glass, &plan.typology_name) {
                records.push(target.consumption(
                    ComponentSlot::Glass,
                    Decimal::from(plan.glass_panes) * quantity,
                    plan.geometry.area_sqm,
                    config,
                )?);
            }
        }

        if let Some(target) = Target::of(&resolved.finish, &plan.typology_name) {
            records.push(target.consumption(ComponentSlot::Finish, quantity, coated, config)?);
        }

        if let Some(lock) = &resolved.lock {
            if let Some(target) = Target::of(lock, &plan.typology_name) {
                records.push(target.counted(ComponentSlot::Lock, quantity, plan.lock_count));
            }
        }

        // 五金：只列出有庫存且單價為正的料號
        for hardware in &resolved.hardware {
            let Some(item) = hardware.item.filter(|item| item.rate > Decimal::ZERO) else {
                continue;
            };
            let per_unit = Decimal::from(hardware.term.count);
            records.push(
                MaterialConsumption::new(
                    item.display_name.clone(),
                    format!("{} × {}", quantity, per_unit),
                    quantity * per_unit,
                    MtoCategory::Hardware,
                )
                .with_catalog_ref(hardware.term.vendor_code.clone()),
            );
        }

        tracing::debug!("型式 {} 推導出 {} 筆用料", plan.typology_name, records.len());
        Ok(records)
    }

    /// 計價結果必須與目前的規格一致
    fn check_fresh(plan: &TakeOffPlan, priced: &PricedUnit) -> Result<()> {
        let geometry = &plan.geometry;
        if priced.quantity != geometry.quantity {
            return Err(MtoError::StalePricedUnit(format!(
                "數量 {} ≠ {}",
                priced.quantity, geometry.quantity
            )));
        }
        if priced.area_sqm != geometry.area_sqm {
            return Err(MtoError::StalePricedUnit(format!(
                "面積 {} ≠ {}",
                priced.area_sqm, geometry.area_sqm
            )));
        }
        if priced.typology_name != plan.typology_name {
            return Err(MtoError::StalePricedUnit(format!(
                "型式 {} ≠ {}",
                priced.typology_name, plan.typology_name
            )));
        }
        Ok(())
    }
}

/// 用料名稱的來源
enum Target<'a> {
    Resolved(&'a CatalogItem),
    /// 解析失敗：保留原本的目錄ID
    Unresolved(Option<String>),
}

impl<'a> Target<'a> {
    /// 未選擇的位置回傳 None
    fn of(resolution: &SlotResolution<'a>, typology: &str) -> Option<Self> {
        match resolution.item() {
            Ok(Some(item)) => Some(Target::Resolved(item)),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("型式 {} 的 {} 無法對應目錄: {}", typology, resolution.slot, err);
                Some(Target::Unresolved(resolution.catalog_id.clone()))
            }
        }
    }

    fn base(&self, slot: ComponentSlot, expression: String, total: Decimal) -> MaterialConsumption {
        let category = MtoCategory::from_role(slot.role());
        match self {
            Target::Resolved(item) => {
                MaterialConsumption::new(item.display_name.clone(), expression, total, category)
                    .with_slot(slot)
                    .with_catalog_ref(item.id.clone())
            }
            Target::Unresolved(catalog_id) => {
                let record = MaterialConsumption::new(slot.label(), expression, total, category)
                    .with_slot(slot)
                    .unresolved();
                match catalog_id {
                    Some(id) => record.with_catalog_ref(id.clone()),
                    None => record,
                }
            }
        }
    }

    /// "數量 × 長度或面積"
    fn consumption(
        &self,
        slot: ComponentSlot,
        count: Decimal,
        measure: Decimal,
        config: &PricingConfig,
    ) -> Result<MaterialConsumption> {
        let expression = format!("{} × {}", count, config.expression(measure));
        let total = checked_mul(count, measure, slot.label())?;
        Ok(self.base(slot, expression, total))
    }

    /// "數量 × 件數"
    fn counted(&self, slot: ComponentSlot, quantity: Decimal, per_unit: u32) -> MaterialConsumption {
        let per_unit = Decimal::from(per_unit);
        let expression = format!("{} × {}", quantity, per_unit);
        self.base(slot, expression, quantity * per_unit)
    }
}
