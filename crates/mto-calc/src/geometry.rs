//! 窗洞幾何與取料計畫

use mto_core::units::mm_to_m;
use mto_core::{ComponentSlot, MtoError, Result, WindowSpec, SQFT_PER_SQM};
use rust_decimal::Decimal;

use crate::formula::{Dimension, FormulaSpec, HardwareTerm};

/// 單邊尺寸上限（毫米）
///
/// 在此範圍內，長度、面積與周長的運算都不會溢位。
pub const MAX_DIMENSION_MM: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// 窗洞幾何（米 / 平方米，完整精度）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width_m: Decimal,
    pub height_m: Decimal,
    pub quantity: u32,
    pub area_sqm: Decimal,
    pub area_sqft: Decimal,
    pub perimeter_m: Decimal,
}

impl WindowGeometry {
    /// 從窗洞規格計算幾何
    ///
    /// 寬、高必須為正數且不超過 `MAX_DIMENSION_MM`，數量至少為 1。
    pub fn from_spec(spec: &WindowSpec) -> Result<Self> {
        let width_mm = positive(spec.width_mm, "widthMM")?;
        let height_mm = positive(spec.height_mm, "heightMM")?;
        if spec.quantity == 0 {
            return Err(MtoError::MissingField("qty".to_string()));
        }

        Ok(Self::new(mm_to_m(width_mm), mm_to_m(height_mm), spec.quantity))
    }

    /// 直接以米為單位建立
    pub fn new(width_m: Decimal, height_m: Decimal, quantity: u32) -> Self {
        let area_sqm = width_m * height_m;
        Self {
            width_m,
            height_m,
            quantity,
            area_sqm,
            area_sqft: area_sqm * SQFT_PER_SQM,
            perimeter_m: Decimal::TWO * (width_m + height_m),
        }
    }

    /// 取得某方向的尺寸
    pub fn dimension(&self, dimension: Dimension) -> Decimal {
        match dimension {
            Dimension::Width => self.width_m,
            Dimension::Height => self.height_m,
        }
    }
}

fn positive(value: Option<Decimal>, field: &str) -> Result<Decimal> {
    match value {
        Some(v) if v > MAX_DIMENSION_MM => Err(MtoError::InvalidDimension {
            field: field.to_string(),
            value: v.to_string(),
        }),
        Some(v) if v > Decimal::ZERO => Ok(v),
        _ => Err(MtoError::MissingField(field.to_string())),
    }
}

/// 單段型材取料：`count` 支，每支 `piece_m` 米
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRun {
    pub slot: ComponentSlot,
    pub count: u32,
    pub piece_m: Decimal,
}

impl ProfileRun {
    /// 單樘總長度
    pub fn length(&self) -> Decimal {
        Decimal::from(self.count) * self.piece_m
    }
}

/// 取料計畫
///
/// 由公式與幾何產生，計價與用料推導都只從這裡讀取長度與數量。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeOffPlan {
    pub typology_name: String,
    pub geometry: WindowGeometry,
    pub runs: Vec<ProfileRun>,
    pub glass_panes: u32,
    pub lock_count: u32,
    pub hardware: Vec<HardwareTerm>,
}

impl TakeOffPlan {
    pub fn new(formula: &FormulaSpec, geometry: WindowGeometry) -> Self {
        let runs = formula
            .profiles
            .iter()
            .map(|term| ProfileRun {
                slot: term.slot,
                count: term.count,
                piece_m: geometry.dimension(term.dimension) / Decimal::from(term.divisor.max(1)),
            })
            .filter(|run| run.count > 0)
            .collect();

        Self {
            typology_name: formula.name.clone(),
            geometry,
            runs,
            glass_panes: formula.glass_panes,
            lock_count: formula.lock_count,
            hardware: formula.hardware.clone(),
        }
    }

    /// 某位置的所有取料段
    pub fn runs_for(&self, slot: ComponentSlot) -> impl Iterator<Item = &ProfileRun> {
        self.runs.iter().filter(move |run| run.slot == slot)
    }

    /// 某位置的單樘總長度
    pub fn slot_length(&self, slot: ComponentSlot) -> Decimal {
        self.runs_for(slot).map(ProfileRun::length).sum()
    }

    /// 用到的型材位置（首次出現順序）
    pub fn profile_slots(&self) -> Vec<ComponentSlot> {
        let mut slots: Vec<ComponentSlot> = Vec::new();
        for run in &self.runs {
            if !slots.contains(&run.slot) {
                slots.push(run.slot);
            }
        }
        slots
    }

    /// 單樘玻璃面積
    pub fn glass_area(&self) -> Decimal {
        Decimal::from(self.glass_panes) * self.geometry.area_sqm
    }

    pub fn uses_glass(&self) -> bool {
        self.glass_panes > 0
    }

    pub fn uses_lock(&self) -> bool {
        self.lock_count > 0
    }
}
