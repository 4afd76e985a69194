//! Process-scoped resource bundle
//!
//! A process owns at most one bundle. It is created `Uninitialized`, moves
//! through `Loading` to `Ready`, and a reload while `Ready` tears the active
//! packs down first so two locales are never mixed. The bundle is only
//! touched during the single threaded startup window; it is passed around
//! explicitly instead of living in a global.

use apphost_core::Result;
use log::{debug, error, info};

use crate::layout::{resolve_locale, ResourceLayout};
use crate::pack::{DataPack, TextEncoding};

/// Lifecycle of the bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleState {
    Uninitialized,
    Loading,
    Ready,
}

#[derive(Debug)]
struct ActivePacks {
    locale: String,
    locale_pack: DataPack,
    common: Vec<DataPack>,
}

#[derive(Debug)]
pub struct ResourceBundle {
    state: BundleState,
    active: Option<ActivePacks>,
    loads: usize,
}

impl Default for ResourceBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self {
            state: BundleState::Uninitialized,
            active: None,
            loads: 0,
        }
    }

    pub fn state(&self) -> BundleState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == BundleState::Ready
    }

    /// Locale of the active packs
    pub fn locale(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.locale.as_str())
    }

    /// Completed loads over the process lifetime
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Load the packs for `locale`, replacing any active ones.
    ///
    /// On failure the bundle is left `Uninitialized`; callers treat the
    /// error as fatal.
    pub fn load(&mut self, locale: &str, layout: &ResourceLayout) -> Result<BundleState> {
        if self.is_ready() {
            debug!(
                "Tearing down resource bundle for locale {:?}",
                self.locale().unwrap_or_default()
            );
            self.teardown();
        }

        let locale = resolve_locale(locale);
        self.state = BundleState::Loading;

        match Self::read_packs(locale, layout) {
            Ok(active) => {
                info!(
                    "Resource bundle ready: locale={} packs={}",
                    active.locale,
                    active.common.len() + 1
                );
                self.active = Some(active);
                self.state = BundleState::Ready;
                self.loads += 1;
                Ok(self.state)
            }
            Err(e) => {
                error!("Resource bundle load failed: {}", e);
                self.state = BundleState::Uninitialized;
                Err(e)
            }
        }
    }

    fn read_packs(locale: &str, layout: &ResourceLayout) -> Result<ActivePacks> {
        let locale_pack = DataPack::load(&layout.locale_pack(locale))?;
        let common = layout
            .common_packs()
            .iter()
            .map(|path| DataPack::load(path))
            .collect::<Result<Vec<_>>>()?;

        Ok(ActivePacks {
            locale: locale.to_string(),
            locale_pack,
            common,
        })
    }

    /// Drop the active packs
    pub fn teardown(&mut self) {
        self.active = None;
        self.state = BundleState::Uninitialized;
    }

    /// Localized resource from the locale pack
    pub fn localized(&self, id: u16) -> Option<&[u8]> {
        self.active.as_ref()?.locale_pack.get(id)
    }

    /// Localized string, decoded per the pack's declared encoding
    pub fn localized_string(&self, id: u16) -> Option<String> {
        let active = self.active.as_ref()?;
        let bytes = active.locale_pack.get(id)?;
        Some(match active.locale_pack.encoding() {
            TextEncoding::Utf16 => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            TextEncoding::Utf8 | TextEncoding::Binary => String::from_utf8_lossy(bytes).into_owned(),
        })
    }

    /// Locale independent resource; common packs are searched in attach
    /// order before the locale pack
    pub fn raw(&self, id: u16) -> Option<&[u8]> {
        let active = self.active.as_ref()?;
        active
            .common
            .iter()
            .find_map(|pack| pack.get(id))
            .or_else(|| active.locale_pack.get(id))
    }
}
