use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::QueryError;
use crate::model::{LatLon, SearchMode};

pub const POINT_ENDPOINT: &str = "busca-ponto";
pub const RADIUS_ENDPOINT: &str = "busca-raio";

/// Body of a paged radius/point request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageQueryBody {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    pub page: u32,
    pub size: usize,
}

/// One of the three request shapes the backend understands. Built
/// entirely from client state; dispatch happens at the Http capability.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRequest {
    /// `GET {base}/{id}` — single record, non-paginated.
    Lookup { url: String },
    /// `POST {base}/busca-ponto` or `{base}/busca-raio`.
    Page { url: String, body: PageQueryBody },
}

impl QueryRequest {
    /// Build the request for the active mode. Inputs are taken as-is
    /// apart from trimming the farm id; a request that cannot be formed
    /// is a `QueryError` like any other failed search.
    pub fn build(
        base: &str,
        mode: SearchMode,
        origin: LatLon,
        radius_km: f64,
        farm_id: &str,
        page: u32,
        page_size: usize,
    ) -> Result<Self, QueryError> {
        match mode {
            SearchMode::Id => {
                let id = farm_id.trim();
                if id.is_empty() {
                    return Err(QueryError::InvalidInput("farm id is empty".into()));
                }
                Ok(Self::Lookup {
                    url: endpoint_url(base, id)?,
                })
            }
            SearchMode::Point => Ok(Self::Page {
                url: endpoint_url(base, POINT_ENDPOINT)?,
                body: PageQueryBody {
                    latitude: origin.lat,
                    longitude: origin.lon,
                    radius_km: None,
                    page,
                    size: page_size,
                },
            }),
            SearchMode::Radius => Ok(Self::Page {
                url: endpoint_url(base, RADIUS_ENDPOINT)?,
                body: PageQueryBody {
                    latitude: origin.lat,
                    longitude: origin.lon,
                    radius_km: Some(radius_km),
                    page,
                    size: page_size,
                },
            }),
        }
    }
}

fn endpoint_url(base: &str, segment: &str) -> Result<String, QueryError> {
    let url = format!("{}/{}", base.trim_end_matches('/'), segment);
    Url::parse(&url).map_err(|err| QueryError::InvalidInput(format!("bad request url: {err}")))?;
    Ok(url)
}
