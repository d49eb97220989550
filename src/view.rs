use serde::{Deserialize, Serialize};

use crate::model::{LatLon, Model, SearchMode};
use crate::parcel::ParcelRecord;
use crate::SIDEBAR_ID_PREVIEW_LENGTH;

/// Map overlay for one parcel: the polygon as delivered plus a popup
/// label carrying code and area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParcelOverlay {
    pub imovel_code: String,
    pub label: String,
    pub geometry: Option<geojson::Geometry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidebarEntry {
    pub code_preview: String,
    pub location: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

/// Immutable snapshot the shell renders from. Nothing in here refers back
/// into the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub mode: SearchMode,
    pub origin: LatLon,
    pub radius_km: f64,
    pub farm_id: String,
    pub overlays: Vec<ParcelOverlay>,
    pub sidebar: Vec<SidebarEntry>,
    pub result_count: usize,
    pub map: MapViewport,
    pub show_origin_marker: bool,
    /// Query radius in meters, present only in radius mode.
    pub radius_circle_m: Option<f64>,
    pub is_loading: bool,
    pub can_load_more: bool,
    pub error: Option<String>,
}

#[must_use]
pub fn build(model: &Model) -> ViewModel {
    ViewModel {
        mode: model.mode,
        origin: model.origin,
        radius_km: model.radius_km,
        farm_id: model.farm_id.clone(),
        overlays: model.results.iter().map(overlay).collect(),
        sidebar: model.results.iter().map(sidebar_entry).collect(),
        result_count: model.results.len(),
        map: MapViewport {
            lat: model.map_center.lat,
            lon: model.map_center.lon,
            zoom: model.map_zoom,
        },
        show_origin_marker: model.mode.shows_origin_marker(),
        radius_circle_m: model
            .mode
            .shows_radius_circle()
            .then(|| model.radius_km * 1000.0),
        is_loading: model.is_loading(),
        can_load_more: model.mode.is_paged()
            && model.cursor.has_more
            && model.results.len() >= model.cursor.page_size,
        error: model
            .active_error
            .as_ref()
            .map(|e| e.user_facing_message().to_string()),
    }
}

fn overlay(record: &ParcelRecord) -> ParcelOverlay {
    let label = match record.area_size {
        Some(area) => format!("{} · {area:.1} ha", record.imovel_code),
        None => record.imovel_code.clone(),
    };
    ParcelOverlay {
        imovel_code: record.imovel_code.clone(),
        label,
        geometry: record.geometry.clone(),
    }
}

fn sidebar_entry(record: &ParcelRecord) -> SidebarEntry {
    SidebarEntry {
        code_preview: code_preview(&record.imovel_code, SIDEBAR_ID_PREVIEW_LENGTH),
        location: match (record.city.as_deref(), record.state_code.as_deref()) {
            (Some(city), Some(state)) => format!("{city} - {state}"),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => String::new(),
        },
    }
}

fn code_preview(code: &str, max_len: usize) -> String {
    if code.chars().count() <= max_len {
        code.to_string()
    } else {
        let mut preview: String = code.chars().take(max_len).collect();
        preview.push_str("...");
        preview
    }
}
