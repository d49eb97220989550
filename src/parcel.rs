use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::LatLon;

/// One farm parcel as returned by the backend. Immutable once received.
///
/// Field names follow the wire contract of the parcel service; `geometry`
/// is a GeoJSON polygon with rings of `[lon, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelRecord {
    pub imovel_code: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    /// Parcel area in hectares.
    #[serde(default)]
    pub area_size: Option<f64>,
    #[serde(default)]
    pub fiscal_module: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub geometry: Option<geojson::Geometry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("geometry is not a polygon")]
    NotAPolygon,
    #[error("polygon has no ring or an empty first ring")]
    EmptyRing,
    #[error("first coordinate pair is incomplete")]
    ShortPosition,
}

/// First coordinate pair of the polygon's first ring, read as
/// `(lon, lat)`. This is what an ID lookup recenters the map on.
pub fn first_vertex(geometry: &geojson::Geometry) -> Result<LatLon, GeometryError> {
    let geojson::Value::Polygon(rings) = &geometry.value else {
        return Err(GeometryError::NotAPolygon);
    };

    let position = rings
        .first()
        .and_then(|ring| ring.first())
        .ok_or(GeometryError::EmptyRing)?;

    match position.as_slice() {
        [lon, lat, ..] => Ok(LatLon::new(*lat, *lon)),
        _ => Err(GeometryError::ShortPosition),
    }
}
