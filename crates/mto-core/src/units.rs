//! 單位換算與取整

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{MtoError, Result};

/// 一平方米 = 10.7639 平方英尺（固定常數）
pub const SQFT_PER_SQM: Decimal = Decimal::from_parts(107_639, 0, 0, false, 4);

/// 毫米轉米
pub fn mm_to_m(mm: Decimal) -> Decimal {
    mm / Decimal::ONE_THOUSAND
}

/// 四捨五入（中點遠離零，與報價單上的顯示一致）
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// 取整並補齊小數位數，例如 `2.4` → `2.40`
pub fn fixed(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = round_half_up(value, dp);
    rounded.rescale(dp);
    rounded
}

/// 乘法，溢位時回報 `Overflow`
pub fn checked_mul(lhs: Decimal, rhs: Decimal, context: &str) -> Result<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| MtoError::Overflow(format!("{}: {} × {}", context, lhs, rhs)))
}

/// 加法，溢位時回報 `Overflow`
pub fn checked_add(lhs: Decimal, rhs: Decimal, context: &str) -> Result<Decimal> {
    lhs.checked_add(rhs)
        .ok_or_else(|| MtoError::Overflow(format!("{}: {} + {}", context, lhs, rhs)))
}

/// 取整後的字串表示
pub fn fixed_string(value: Decimal, dp: u32) -> String {
    fixed(value, dp).to_string()
}
