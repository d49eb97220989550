use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::pagination::PageCursor;
use crate::parcel::ParcelRecord;
use crate::{
    API_BASE, DEFAULT_MAP_ZOOM, DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LON, DEFAULT_RADIUS_KM,
};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Radius,
    Point,
    Id,
}

impl SearchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::Point => "point",
            Self::Id => "id",
        }
    }

    /// Radius and point searches page through results; an ID lookup
    /// resolves to at most one record.
    #[must_use]
    pub const fn is_paged(self) -> bool {
        matches!(self, Self::Radius | Self::Point)
    }

    #[must_use]
    pub const fn shows_origin_marker(self) -> bool {
        matches!(self, Self::Radius | Self::Point)
    }

    #[must_use]
    pub const fn shows_radius_circle(self) -> bool {
        matches!(self, Self::Radius)
    }
}

/// The one request currently on the wire. Present iff a search is loading;
/// carries what the response handler needs to fold the page correctly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFlightQuery {
    pub mode: SearchMode,
    pub page: u32,
    pub new_search: bool,
}

pub struct Model {
    pub api_base: String,
    pub mode: SearchMode,
    /// Center of the last submitted (or edited) query. The map viewport
    /// follows this; ID lookups move it to the found parcel.
    pub origin: LatLon,
    pub radius_km: f64,
    pub farm_id: String,
    pub results: Vec<ParcelRecord>,
    pub cursor: PageCursor,
    pub in_flight: Option<InFlightQuery>,
    pub map_center: LatLon,
    pub map_zoom: f64,
    pub active_error: Option<QueryError>,
}

impl Default for Model {
    fn default() -> Self {
        let origin = LatLon::new(DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LON);
        Self {
            api_base: API_BASE.to_string(),
            mode: SearchMode::default(),
            origin,
            radius_km: DEFAULT_RADIUS_KM,
            farm_id: String::new(),
            results: Vec::new(),
            cursor: PageCursor::default(),
            in_flight: None,
            map_center: origin,
            map_zoom: DEFAULT_MAP_ZOOM,
            active_error: None,
        }
    }
}

impl Model {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Recenter the map on the query origin, preserving the zoom level.
    /// The only viewport mutation outside of user pan/zoom.
    pub fn follow_origin(&mut self) {
        self.map_center = self.origin;
    }

    pub fn set_error(&mut self, error: QueryError) {
        self.active_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.active_error = None;
    }
}
