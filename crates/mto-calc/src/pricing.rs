//! 單樘計價

use mto_core::units::{checked_add, checked_mul};
use mto_core::{CatalogSnapshot, PriceComponent, PricedUnit, Result, UnitRate, WindowSpec};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::formula::FormulaTable;
use crate::resolve::ResolvedWindow;

/// 計價計算器
///
/// 純函數：相同的規格、目錄快照與鋁材單價永遠得到相同的結果。
pub struct PricingCalculator;

impl PricingCalculator {
    /// 計算單樘價格
    pub fn price(
        spec: &WindowSpec,
        catalog: &CatalogSnapshot,
        formulas: &FormulaTable,
        aluminium_rate: Decimal,
    ) -> Result<PricedUnit> {
        let resolved = ResolvedWindow::resolve(spec, catalog, formulas)?;
        Self::price_resolved(&resolved, aluminium_rate)
    }

    /// 對已解析的窗洞計價（任何位置解析失敗即回報錯誤）
    pub fn price_resolved(resolved: &ResolvedWindow<'_>, aluminium_rate: Decimal) -> Result<PricedUnit> {
        let plan = &resolved.plan;
        let geometry = plan.geometry;

        let mut breakdown: BTreeMap<PriceComponent, Decimal> = PriceComponent::ALL
            .iter()
            .map(|component| (*component, Decimal::ZERO))
            .collect();

        // 型材：換算係數 × 長度 × 鋁材單價
        let mut profile_items = Vec::with_capacity(resolved.profiles.len());
        for resolution in &resolved.profiles {
            let Some(item) = resolution.item()? else {
                continue;
            };
            let length = plan.slot_length(resolution.slot);
            let weight = checked_mul(item.require_conversion_factor()?, length, &item.id)?;
            let amount = checked_mul(weight, aluminium_rate, &item.id)?;
            tracing::debug!("{} ({}) 長度 {} 米，金額 {}", resolution.slot, item.id, length, amount);

            accumulate(&mut breakdown, PriceComponent::for_slot(resolution.slot), amount)?;
            profile_items.push((item, length));
        }

        // 表面處理：Σ(參數 / 1000 × 長度) × 表面處理單價
        if let Some(finish) = resolved.finish.item()? {
            let mut coated = Decimal::ZERO;
            for (item, length) in &profile_items {
                let per_meter = item.require_finish_parameter()? / Decimal::ONE_THOUSAND;
                coated = checked_add(coated, checked_mul(per_meter, *length, &item.id)?, &finish.id)?;
            }
            accumulate(&mut breakdown, PriceComponent::Finish, checked_mul(coated, finish.rate, &finish.id)?)?;
        }

        if let Some(glass) = &resolved.glass {
            if let Some(item) = glass.item()? {
                accumulate(&mut breakdown, PriceComponent::Glass, checked_mul(plan.glass_area(), item.rate, &item.id)?)?;
            }
        }

        if let Some(lock) = &resolved.lock {
            if let Some(item) = lock.item()? {
                let amount = checked_mul(item.rate, Decimal::from(plan.lock_count), &item.id)?;
                accumulate(&mut breakdown, PriceComponent::Lock, amount)?;
            }
        }

        let mut unstocked_hardware = Vec::new();
        for hardware in &resolved.hardware {
            match hardware.item {
                Some(item) => {
                    let amount = checked_mul(item.rate, Decimal::from(hardware.term.count), &item.id)?;
                    accumulate(&mut breakdown, PriceComponent::Hardware, amount)?;
                }
                None => {
                    tracing::warn!(
                        "型式 {} 的五金 {} 不在目錄中，未計價",
                        plan.typology_name,
                        hardware.term.vendor_code
                    );
                    unstocked_hardware.push(hardware.term.vendor_code.clone());
                }
            }
        }

        let mut total_per_unit = Decimal::ZERO;
        for amount in breakdown.values() {
            total_per_unit = checked_add(total_per_unit, *amount, &plan.typology_name)?;
        }
        let total_for_quantity = checked_mul(total_per_unit, Decimal::from(geometry.quantity), &plan.typology_name)?;

        tracing::debug!(
            "型式 {} 單樘 {}，數量 {}，合計 {}",
            plan.typology_name,
            total_per_unit,
            geometry.quantity,
            total_for_quantity
        );

        Ok(PricedUnit {
            typology_name: plan.typology_name.clone(),
            quantity: geometry.quantity,
            area_sqm: geometry.area_sqm,
            area_sqft: geometry.area_sqft,
            breakdown,
            total_per_unit,
            total_for_quantity,
            rate_per_sqft: UnitRate::per_area(total_per_unit, geometry.area_sqft),
            rate_per_sqm: UnitRate::per_area(total_per_unit, geometry.area_sqm),
            unstocked_hardware,
        })
    }
}

/// 累加到組成項目
fn accumulate(
    breakdown: &mut BTreeMap<PriceComponent, Decimal>,
    component: PriceComponent,
    amount: Decimal,
) -> Result<()> {
    let entry = breakdown.entry(component).or_insert(Decimal::ZERO);
    *entry = checked_add(*entry, amount, &format!("{:?}", component))?;
    Ok(())
}
