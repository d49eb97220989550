#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod model;
pub mod pagination;
pub mod parcel;
pub mod query;
pub mod view;

pub use app::{App, Capabilities, Effect, Event};
pub use error::QueryError;
pub use model::{LatLon, Model, SearchMode};
pub use pagination::PageCursor;
pub use parcel::ParcelRecord;
pub use view::ViewModel;

pub use crux_core::App as CruxApp;

/// Service root of the parcel backend. All three request shapes are
/// relative to this.
pub const API_BASE: &str = "http://localhost:8004/fazendas";

pub const PAGE_SIZE: usize = 20;
pub const DEFAULT_ORIGIN_LAT: f64 = -21.45;
pub const DEFAULT_ORIGIN_LON: f64 = -51.045;
pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_MAP_ZOOM: f64 = 12.0;
pub const SIDEBAR_ID_PREVIEW_LENGTH: usize = 15;
