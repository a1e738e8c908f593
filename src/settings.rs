//! Viewer preferences, persisted as JSON in localStorage.

use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;
use crate::state::stepwise::{DEFAULT_ZOOM, ZOOM_RANGE};

pub const STORAGE_KEY: &str = "pn_viewer_settings";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub show_tooltips: bool,
    pub show_column_labels: bool,
    /// Developer aid: report click positions on the explorer illustration.
    pub coordinate_picker: bool,
    /// Scale applied when the explorer zooms onto an entrapment site.
    pub entrapment_zoom: f64,
    /// Skip the path and zoom transitions.
    pub reduced_motion: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            show_tooltips: true,
            show_column_labels: true,
            coordinate_picker: false,
            entrapment_zoom: DEFAULT_ZOOM,
            reduced_motion: false,
        }
    }
}

impl ViewerSettings {
    /// Lenient parse: missing fields take defaults, garbage yields defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(s) => s.sanitized(),
            Err(e) => {
                log::warn!("discarding stored settings: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn sanitized(mut self) -> Self {
        self.entrapment_zoom = if self.entrapment_zoom.is_finite() {
            self.entrapment_zoom.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1)
        } else {
            DEFAULT_ZOOM
        };
        self
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { column_labels: self.show_column_labels }
    }

    pub fn transition_ms(&self) -> u32 {
        if self.reduced_motion { 0 } else { 450 }
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if store.set_item(STORAGE_KEY, &self.to_json()).is_err() {
                    log::warn!("could not persist viewer settings");
                }
            }
        }
    }
}
