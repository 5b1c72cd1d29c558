//! 型式公式表
//!
//! 計價與用料共用同一份公式表：每種型式的型材長度、玻璃面積、
//! 鎖具數量與五金件數都以資料描述，兩個引擎都從這裡取得長度，
//! 不各自推導。

use mto_core::{ComponentSlot, MtoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// 推拉窗型式名稱：`<T> TRACK <S> SHUTTER [<M> MESH]`
static SLIDING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+) TRACK (\d+) SHUTTERS?(?: (\d+) MESH(?:ES)?)?$")
        .expect("SLIDING_PATTERN 是合法的正則表達式")
});

/// 固定玻璃型式名稱
pub const FIXED_GLASS: &str = "FIXED GLASS";

/// 推拉窗名稱中軌道數、扇數、紗扇數的上限
pub const MAX_SHAPE_COUNT: u32 = 16;

/// 公式中單項支數、片數或件數的上限
pub const MAX_TERM_COUNT: u32 = 10_000;

/// 五金供應商料號
pub mod vendor {
    pub const ROLLER: &str = "PH412";
    pub const SCREW_8X19: &str = "CSK PH 8X19 [SS-304]";
    pub const CLEAT: &str = "CCC1022";
    pub const SHUTTER_ANGLE: &str = "ACC_90ANGLE";
    pub const ANTI_LIFT: &str = "PH343/B";
    pub const INTERLOCK_COVER: &str = "3504";
    pub const INTERLOCK_END_CAP: &str = "PH308/B";
    pub const DRAINAGE_COVER: &str = "PDC101/B";
    pub const WALL_SCREW: &str = "CSK PH 8X75 [SS-304]";
    pub const ROWEL_PLUG: &str = "32MM WP";
    pub const SILICON: &str = "WACKER GN CL 270";
    pub const GLASS_PACKER: &str = "MANGALUM";
    pub const SS_PATTI: &str = "ARYAN ENTR.";
    pub const SCREW_7X19: &str = "CSK PH 7X19 [SS-304]";
    pub const SCREW_7X13: &str = "CSK PH 7X13 GI";
    pub const SCREW_8X25: &str = "CSK PH 8X25 [SS-304]";
    pub const BRUSH: &str = "ACC_BRUSH";
    pub const DISTANCE_PIECE: &str = "PH139/B";
    pub const WOOL_PIPE: &str = "4.8X6 GREY WP";
    pub const TRACK_EPDM: &str = "EPDM 4746";
    pub const INTERLOCK_EPDM: &str = "EPDM 8085";
    pub const GLASS_EPDM: &str = "OSAKA";
    pub const RECEIVER: &str = "ORBITA";
    pub const MESH_END_CAP: &str = "PH260/B";
    pub const PUSH_BUTTON: &str = "10MM PB";
    pub const PACKING: &str = "PC_2X_3X";
    pub const PTA_25X8: &str = "PTA 25X8";
    pub const NON_ROLLER: &str = "NONROLLER";
}

/// 正規化型式名稱：轉大寫、合併空白
pub fn normalize_typology_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 長度基準
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Width,
    Height,
}

/// 型材長度項：`count × 尺寸 / divisor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileTerm {
    pub slot: ComponentSlot,
    pub count: u32,
    pub dimension: Dimension,
    #[serde(default = "one")]
    pub divisor: u32,
}

fn one() -> u32 {
    1
}

impl ProfileTerm {
    pub fn new(slot: ComponentSlot, count: u32, dimension: Dimension) -> Self {
        Self {
            slot,
            count,
            dimension,
            divisor: 1,
        }
    }

    /// 建構器模式：設置除數（例如每扇寬度 = 總寬 / 扇數）
    pub fn divided_by(mut self, divisor: u32) -> Self {
        self.divisor = divisor;
        self
    }

    /// 計算長度（米）
    pub fn length(&self, width_m: Decimal, height_m: Decimal) -> Decimal {
        let base = match self.dimension {
            Dimension::Width => width_m,
            Dimension::Height => height_m,
        };
        Decimal::from(self.count) * base / Decimal::from(self.divisor)
    }
}

/// 五金件數項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareTerm {
    pub vendor_code: String,
    pub count: u32,
}

impl HardwareTerm {
    pub fn new(vendor_code: impl Into<String>, count: u32) -> Self {
        Self {
            vendor_code: vendor_code.into(),
            count,
        }
    }
}

/// 推拉窗結構：軌道數、玻璃扇數、紗扇數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingShape {
    pub tracks: u32,
    pub shutters: u32,
    pub mesh: u32,
}

impl SlidingShape {
    pub fn new(tracks: u32, shutters: u32, mesh: u32) -> Self {
        Self {
            tracks,
            shutters,
            mesh,
        }
    }

    /// 從正規化後的型式名稱解析
    ///
    /// 任一數量超過 `MAX_SHAPE_COUNT` 時不視為推拉窗。
    pub fn parse(normalized_name: &str) -> Option<Self> {
        let caps = SLIDING_PATTERN.captures(normalized_name)?;
        let tracks: u32 = caps.get(1)?.as_str().parse().ok()?;
        let shutters: u32 = caps.get(2)?.as_str().parse().ok()?;
        let mesh: u32 = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };

        if tracks == 0 || shutters == 0 {
            return None;
        }
        if [tracks, shutters, mesh].iter().any(|count| *count > MAX_SHAPE_COUNT) {
            return None;
        }
        Some(Self::new(tracks, shutters, mesh))
    }

    /// 標準型式名稱
    pub fn name(&self) -> String {
        if self.mesh > 0 {
            format!("{} TRACK {} SHUTTER {} MESH", self.tracks, self.shutters, self.mesh)
        } else {
            format!("{} TRACK {} SHUTTER", self.tracks, self.shutters)
        }
    }

    /// 中間兩扇碰頭處使用中梃（四扇時）
    pub fn middles(&self) -> u32 {
        u32::from(self.shutters == 4)
    }

    /// 勾企對數 = 扇與扇的碰頭數 − 中梃
    pub fn interlock_pairs(&self) -> u32 {
        self.shutters.saturating_sub(1).saturating_sub(self.middles())
    }

    /// 所有活動扇（玻璃 + 紗）
    pub fn panels(&self) -> u32 {
        self.shutters + self.mesh
    }
}

/// 單一型式的公式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaSpec {
    /// 正規化型式名稱
    pub name: String,

    /// 型材長度項
    pub profiles: Vec<ProfileTerm>,

    /// 玻璃面積倍數
    pub glass_panes: u32,

    /// 鎖具數量
    pub lock_count: u32,

    /// 五金件數
    pub hardware: Vec<HardwareTerm>,
}

impl FormulaSpec {
    /// 依推拉窗結構產生公式
    pub fn sliding(shape: SlidingShape) -> Self {
        use ComponentSlot::*;
        use Dimension::*;

        let pairs = shape.interlock_pairs();
        let middles = shape.middles();
        let panels = shape.panels();

        let mut profiles = vec![
            ProfileTerm::new(Track, 2, Width),
            ProfileTerm::new(Track, 2, Height),
            ProfileTerm::new(Handle, 2 + shape.mesh, Height),
            ProfileTerm::new(TopBottom, 2, Width),
        ];
        if shape.mesh > 0 {
            profiles.push(ProfileTerm::new(TopBottom, 2 * shape.mesh, Width).divided_by(shape.shutters));
        }
        if middles > 0 {
            profiles.push(ProfileTerm::new(Middle, middles, Height));
        }
        if pairs > 0 {
            profiles.push(ProfileTerm::new(InsideInterlock, pairs, Height));
            profiles.push(ProfileTerm::new(OutsideInterlock, pairs, Height));
        }
        if shape.mesh > 0 {
            profiles.push(ProfileTerm::new(MeshInterlock, shape.mesh, Height));
        }
        profiles.push(ProfileTerm::new(Rail, shape.tracks, Width));

        let hardware = vec![
            HardwareTerm::new(vendor::ROLLER, 2 * panels),
            HardwareTerm::new(vendor::SCREW_8X19, 10 + 4 * panels.saturating_sub(2)),
            HardwareTerm::new(vendor::CLEAT, 4 + 4 * panels),
            HardwareTerm::new(vendor::SHUTTER_ANGLE, 4 * panels),
            HardwareTerm::new(vendor::ANTI_LIFT, 2 * shape.shutters),
            HardwareTerm::new(vendor::INTERLOCK_COVER, 2 * (pairs + shape.mesh)),
            HardwareTerm::new(vendor::INTERLOCK_END_CAP, 2 * pairs),
            HardwareTerm::new(vendor::DRAINAGE_COVER, shape.tracks),
            HardwareTerm::new(vendor::WALL_SCREW, 8),
            HardwareTerm::new(vendor::ROWEL_PLUG, 8),
            HardwareTerm::new(vendor::SILICON, 1),
            HardwareTerm::new(vendor::SS_PATTI, shape.tracks),
            HardwareTerm::new(vendor::SCREW_7X19, 4 * shape.shutters),
            HardwareTerm::new(vendor::SCREW_7X13, 4 * panels),
            HardwareTerm::new(vendor::SCREW_8X25, 1),
            HardwareTerm::new(vendor::BRUSH, 1),
            HardwareTerm::new(vendor::DISTANCE_PIECE, 2 * panels),
            HardwareTerm::new(vendor::WOOL_PIPE, 1),
            HardwareTerm::new(vendor::TRACK_EPDM, 1),
            HardwareTerm::new(vendor::INTERLOCK_EPDM, 1),
            HardwareTerm::new(vendor::GLASS_EPDM, 1),
            HardwareTerm::new(vendor::RECEIVER, shape.shutters.max(2)),
            HardwareTerm::new(vendor::MESH_END_CAP, 1),
            HardwareTerm::new(vendor::PUSH_BUTTON, 1),
            HardwareTerm::new(vendor::PACKING, 1),
            HardwareTerm::new(vendor::PTA_25X8, 1),
            HardwareTerm::new(vendor::NON_ROLLER, 1),
        ]
        .into_iter()
        .filter(|term| term.count > 0)
        .collect();

        Self {
            name: shape.name(),
            profiles,
            glass_panes: 1,
            lock_count: shape.shutters.max(2),
            hardware,
        }
    }

    /// 固定玻璃：只有外框與玻璃
    pub fn fixed_glass() -> Self {
        Self {
            name: FIXED_GLASS.to_string(),
            profiles: vec![
                ProfileTerm::new(ComponentSlot::Track, 2, Dimension::Width),
                ProfileTerm::new(ComponentSlot::Track, 2, Dimension::Height),
            ],
            glass_panes: 1,
            lock_count: 0,
            hardware: vec![
                HardwareTerm::new(vendor::SILICON, 1),
                HardwareTerm::new(vendor::GLASS_PACKER, 4),
                HardwareTerm::new(vendor::WALL_SCREW, 8),
                HardwareTerm::new(vendor::ROWEL_PLUG, 8),
                HardwareTerm::new(vendor::GLASS_EPDM, 1),
                HardwareTerm::new(vendor::PACKING, 1),
            ],
        }
    }

    /// 公式中用到的型材位置（依首次出現順序）
    pub fn profile_slots(&self) -> Vec<ComponentSlot> {
        let mut slots = Vec::new();
        for term in &self.profiles {
            if !slots.contains(&term.slot) {
                slots.push(term.slot);
            }
        }
        slots
    }

    /// 是否使用某位置
    pub fn uses_slot(&self, slot: ComponentSlot) -> bool {
        match slot {
            ComponentSlot::Glass => self.glass_panes > 0,
            ComponentSlot::Lock => self.lock_count > 0,
            // 只要有型材就有表面處理
            ComponentSlot::Finish => !self.profiles.is_empty(),
            _ => self.profiles.iter().any(|term| term.slot == slot),
        }
    }

    /// 檢查公式是否有效
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MtoError::InvalidConfig("公式缺少型式名稱".to_string()));
        }
        for term in &self.profiles {
            if !term.slot.is_profile() {
                return Err(MtoError::InvalidConfig(format!(
                    "型式 {} 的 {} 不是型材位置",
                    self.name, term.slot
                )));
            }
            if term.divisor == 0 {
                return Err(MtoError::InvalidConfig(format!(
                    "型式 {} 的 {} 長度除數為零",
                    self.name, term.slot
                )));
            }
        }

        let counts = self
            .profiles
            .iter()
            .map(|term| (term.slot.label().to_string(), term.count))
            .chain(self.hardware.iter().map(|term| (term.vendor_code.clone(), term.count)))
            .chain([
                ("GLASS".to_string(), self.glass_panes),
                ("LOCK".to_string(), self.lock_count),
            ]);
        for (what, count) in counts {
            if count > MAX_TERM_COUNT {
                return Err(MtoError::InvalidConfig(format!(
                    "型式 {} 的 {} 數量 {} 超過上限 {}",
                    self.name, what, count, MAX_TERM_COUNT
                )));
            }
        }
        Ok(())
    }
}

/// 型式公式表（正規化名稱 → 公式）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormulaTable {
    entries: BTreeMap<String, FormulaSpec>,
}

impl FormulaTable {
    /// 創建空的公式表
    pub fn new() -> Self {
        Self::default()
    }

    /// 標準公式表
    pub fn standard() -> Self {
        let mut table = Self::new();
        for shape in [
            SlidingShape::new(2, 2, 0),
            SlidingShape::new(2, 3, 0),
            SlidingShape::new(2, 4, 0),
            SlidingShape::new(3, 2, 1),
            SlidingShape::new(3, 3, 1),
            SlidingShape::new(3, 4, 2),
        ] {
            table.entries.insert(shape.name(), FormulaSpec::sliding(shape));
        }
        table.entries.insert(FIXED_GLASS.to_string(), FormulaSpec::fixed_glass());
        table
    }

    /// 從 JSON 載入公式表
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, FormulaSpec> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (_, spec) in raw {
            table.register(spec)?;
        }
        Ok(table)
    }

    /// 輸出為 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 註冊（或覆蓋）一筆公式
    pub fn register(&mut self, mut spec: FormulaSpec) -> Result<()> {
        spec.name = normalize_typology_name(&spec.name);
        spec.validate()?;
        tracing::debug!("註冊型式公式: {}", spec.name);
        self.entries.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// 依名稱取得已註冊的公式
    pub fn get(&self, name: &str) -> Option<&FormulaSpec> {
        self.entries.get(&normalize_typology_name(name))
    }

    /// 解析型式公式
    ///
    /// 先查表；表中沒有但名稱符合推拉窗格式時即時產生。
    pub fn resolve(&self, name: &str) -> Result<Cow<'_, FormulaSpec>> {
        let normalized = normalize_typology_name(name);
        if let Some(spec) = self.entries.get(&normalized) {
            return Ok(Cow::Borrowed(spec));
        }

        match SlidingShape::parse(&normalized) {
            Some(shape) => {
                tracing::debug!("型式 {} 未註冊，依推拉窗結構產生公式", normalized);
                Ok(Cow::Owned(FormulaSpec::sliding(shape)))
            }
            None => Err(MtoError::FormulaNotFound(normalized)),
        }
    }

    /// 已註冊的型式名稱
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
