//! # MTO
//!
//! 鋁門窗報價與用料（Material Take-Off）引擎
//!
//! - [`model`]：資料模型（目錄、窗洞規格、計價結果、用料、報價單）
//! - [`engine`]：計價、用料推導、用料彙總與報價合計

pub use mto_calc as engine;
pub use mto_core as model;

pub use mto_calc::{MtoCalculator, MtoResult, MtoWarning, WarningSeverity};
pub use mto_core::{MtoError, Result};
