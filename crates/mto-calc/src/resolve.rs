//! 元件解析
//!
//! 把窗洞規格上的選擇與型式記錄上的結構型材對應到目錄項目。
//! 計價遇到解析失敗直接回報錯誤；用料推導則退回位置標籤並發出警告。

use mto_core::{
    CatalogItem, CatalogSnapshot, ComponentSlot, MtoError, Result, TypologyRecord, WindowSpec,
};

use crate::formula::{FormulaTable, HardwareTerm};
use crate::geometry::{TakeOffPlan, WindowGeometry};

/// 單一位置的解析結果
#[derive(Debug, Clone, PartialEq)]
pub struct SlotResolution<'a> {
    pub slot: ComponentSlot,

    /// 採用的目錄ID（窗洞選擇優先，其次是型式記錄）
    pub catalog_id: Option<String>,

    /// `Ok(None)` 表示未選擇，不計價也不產生用料
    pub outcome: Result<Option<&'a CatalogItem>>,
}

impl<'a> SlotResolution<'a> {
    fn resolve(
        slot: ComponentSlot,
        spec: &WindowSpec,
        typology: &TypologyRecord,
        catalog: &'a CatalogSnapshot,
    ) -> Self {
        let catalog_id = spec
            .selected(slot)
            .or_else(|| typology.profile_id(slot))
            .map(str::to_string);

        let outcome = match &catalog_id {
            None if slot.is_structural() => Err(MtoError::ProfileNotConfigured {
                typology: typology.name.clone(),
                slot: slot.label().to_string(),
            }),
            None => Ok(None),
            Some(id) => lookup(slot, id, catalog).map(Some),
        };

        Self {
            slot,
            catalog_id,
            outcome,
        }
    }

    /// 嚴格取得目錄項目
    pub fn item(&self) -> Result<Option<&'a CatalogItem>> {
        self.outcome.clone()
    }

    pub fn is_unset(&self) -> bool {
        matches!(self.outcome, Ok(None))
    }
}

fn lookup<'a>(slot: ComponentSlot, id: &str, catalog: &'a CatalogSnapshot) -> Result<&'a CatalogItem> {
    let item = catalog
        .find_by_id(id)
        .ok_or_else(|| MtoError::UnknownComponent {
            slot: slot.label().to_string(),
            id: id.to_string(),
        })?;

    if item.role != slot.role() {
        return Err(MtoError::RoleMismatch {
            slot: slot.label().to_string(),
            id: id.to_string(),
            actual: item.role.label().to_string(),
        });
    }
    Ok(item)
}

/// 五金件的解析結果（目錄沒有該料號時為 None）
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareResolution<'a> {
    pub term: HardwareTerm,
    pub item: Option<&'a CatalogItem>,
}

/// 已解析的窗洞
#[derive(Debug, Clone)]
pub struct ResolvedWindow<'a> {
    pub typology: &'a TypologyRecord,
    pub plan: TakeOffPlan,
    pub profiles: Vec<SlotResolution<'a>>,
    pub glass: Option<SlotResolution<'a>>,
    pub finish: SlotResolution<'a>,
    pub lock: Option<SlotResolution<'a>>,
    pub hardware: Vec<HardwareResolution<'a>>,
}

impl<'a> ResolvedWindow<'a> {
    /// 驗證規格、查找型式與公式並解析所有位置
    ///
    /// 幾何、型式與公式的錯誤直接回傳；單一位置的錯誤保留在各自的結果中。
    pub fn resolve(
        spec: &WindowSpec,
        catalog: &'a CatalogSnapshot,
        formulas: &FormulaTable,
    ) -> Result<Self> {
        let geometry = WindowGeometry::from_spec(spec)?;

        let typology_id = spec
            .typology_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| MtoError::MissingField("typology".to_string()))?;

        let typology = catalog
            .find_by_typology(&spec.series_id, typology_id)
            .ok_or_else(|| MtoError::UnknownTypology {
                series: spec.series_id.clone(),
                typology: typology_id.to_string(),
            })?;

        let formula = formulas.resolve(&typology.name)?;
        let plan = TakeOffPlan::new(&formula, geometry);

        let profiles = plan
            .profile_slots()
            .into_iter()
            .map(|slot| SlotResolution::resolve(slot, spec, typology, catalog))
            .collect();

        let glass = plan
            .uses_glass()
            .then(|| SlotResolution::resolve(ComponentSlot::Glass, spec, typology, catalog));
        let finish = SlotResolution::resolve(ComponentSlot::Finish, spec, typology, catalog);
        let lock = plan
            .uses_lock()
            .then(|| SlotResolution::resolve(ComponentSlot::Lock, spec, typology, catalog));

        let hardware = plan
            .hardware
            .iter()
            .map(|term| HardwareResolution {
                term: term.clone(),
                item: catalog.find_by_vendor_code(&term.vendor_code),
            })
            .collect();

        Ok(Self {
            typology,
            plan,
            profiles,
            glass,
            finish,
            lock,
            hardware,
        })
    }

    /// 窗洞幾何
    pub fn geometry(&self) -> &WindowGeometry {
        &self.plan.geometry
    }
}
