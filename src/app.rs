use crux_core::render::Render;
use crux_http::Http;
use tracing::{debug, warn};

use crate::error::QueryError;
use crate::model::{InFlightQuery, LatLon, Model, SearchMode};
use crate::pagination::{fold_lookup, fold_page};
use crate::parcel::ParcelRecord;
use crate::query::QueryRequest;
use crate::view::{self, ViewModel};

pub enum Event {
    ModeSelected(SearchMode),
    OriginChanged { lat: f64, lon: f64 },
    RadiusChanged { km: f64 },
    FarmIdChanged { id: String },

    /// The search operation. `new_search` restarts from page 1 and clears
    /// accumulated results; otherwise the cursor's current page is fetched
    /// and appended.
    SearchRequested { new_search: bool },

    MapMoved { lat: f64, lon: f64, zoom: f64 },
    DismissError,

    PageResponse(Box<crux_http::Result<crux_http::Response<Vec<ParcelRecord>>>>),
    LookupResponse(Box<crux_http::Result<crux_http::Response<ParcelRecord>>>),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ModeSelected(_) => "mode_selected",
            Self::OriginChanged { .. } => "origin_changed",
            Self::RadiusChanged { .. } => "radius_changed",
            Self::FarmIdChanged { .. } => "farm_id_changed",
            Self::SearchRequested { .. } => "search_requested",
            Self::MapMoved { .. } => "map_moved",
            Self::DismissError => "dismiss_error",
            Self::PageResponse(_) => "page_response",
            Self::LookupResponse(_) => "lookup_response",
        }
    }
}

#[derive(Default)]
pub struct App;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), "handling event");

        match event {
            Event::ModeSelected(mode) => {
                // Other inputs and stale results survive a mode switch.
                model.mode = mode;
                caps.render.render();
            }

            Event::OriginChanged { lat, lon } => {
                model.origin = LatLon::new(lat, lon);
                model.follow_origin();
                caps.render.render();
            }

            Event::RadiusChanged { km } => {
                model.radius_km = km;
                caps.render.render();
            }

            Event::FarmIdChanged { id } => {
                model.farm_id = id;
                caps.render.render();
            }

            Event::SearchRequested { new_search } => {
                Self::start_search(new_search, model, caps);
            }

            Event::MapMoved { lat, lon, zoom } => {
                // User pan/zoom; the query origin is not touched.
                model.map_center = LatLon::new(lat, lon);
                model.map_zoom = zoom;
                caps.render.render();
            }

            Event::DismissError => {
                model.clear_error();
                caps.render.render();
            }

            Event::PageResponse(result) => {
                Self::apply_page_response(*result, model);
                caps.render.render();
            }

            Event::LookupResponse(result) => {
                Self::apply_lookup_response(*result, model);
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        view::build(model)
    }
}

impl App {
    fn start_search(new_search: bool, model: &mut Model, caps: &Capabilities) {
        if model.is_loading() {
            // One request on the wire at a time. Otherwise a slow page
            // could land after a newer search already reset the results.
            debug!("search ignored, a request is already in flight");
            return;
        }

        if !new_search && !model.cursor.has_more {
            debug!("load-more ignored, end of results reached");
            return;
        }

        model.clear_error();

        if new_search {
            model.results.clear();
            model.cursor.reset();
        }
        let page = model.cursor.page;

        let request = QueryRequest::build(
            &model.api_base,
            model.mode,
            model.origin,
            model.radius_km,
            &model.farm_id,
            page,
            model.cursor.page_size,
        );
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                model.set_error(err);
                caps.render.render();
                return;
            }
        };

        match request {
            QueryRequest::Lookup { url } => {
                debug!(%url, "dispatching id lookup");
                model.in_flight = Some(InFlightQuery {
                    mode: model.mode,
                    page,
                    new_search,
                });
                caps.http
                    .get(url)
                    .expect_json::<ParcelRecord>()
                    .send(|result| Event::LookupResponse(Box::new(result)));
            }
            QueryRequest::Page { url, body } => {
                debug!(%url, page, "dispatching paged search");
                match caps.http.post(url).body_json(&body) {
                    Ok(builder) => {
                        model.in_flight = Some(InFlightQuery {
                            mode: model.mode,
                            page,
                            new_search,
                        });
                        builder
                            .expect_json::<Vec<ParcelRecord>>()
                            .send(|result| Event::PageResponse(Box::new(result)));
                    }
                    Err(err) => {
                        model.set_error(QueryError::transport(&err));
                    }
                }
            }
        }

        caps.render.render();
    }

    fn apply_page_response(
        result: crux_http::Result<crux_http::Response<Vec<ParcelRecord>>>,
        model: &mut Model,
    ) {
        let Some(in_flight) = model.in_flight.take() else {
            warn!("page response with no request in flight, dropping");
            return;
        };

        match result {
            Ok(mut response) if response.status().is_success() => {
                match response.take_body() {
                    Some(records) => {
                        debug!(page = in_flight.page, count = records.len(), "page received");
                        fold_page(
                            &mut model.results,
                            &mut model.cursor,
                            in_flight.page,
                            in_flight.new_search,
                            records,
                        );
                    }
                    None => {
                        model.set_error(QueryError::BadResponse("response body missing".into()));
                    }
                }
            }
            Ok(response) => {
                model.set_error(QueryError::Transport(format!(
                    "server returned {}",
                    response.status()
                )));
            }
            Err(err) => {
                model.set_error(QueryError::transport(&err));
            }
        }
    }

    fn apply_lookup_response(
        result: crux_http::Result<crux_http::Response<ParcelRecord>>,
        model: &mut Model,
    ) {
        if model.in_flight.take().is_none() {
            warn!("lookup response with no request in flight, dropping");
            return;
        }

        match result {
            Ok(mut response) if response.status().is_success() => match response.take_body() {
                Some(record) => {
                    debug!(imovel_code = %record.imovel_code, "parcel found");
                    let recenter = fold_lookup(&mut model.results, &mut model.cursor, record);
                    if let Some(origin) = recenter {
                        model.origin = origin;
                        model.follow_origin();
                    }
                }
                None => {
                    model.set_error(QueryError::BadResponse("response body missing".into()));
                }
            },
            Ok(response) => {
                model.set_error(QueryError::Transport(format!(
                    "server returned {}",
                    response.status()
                )));
            }
            Err(err) => {
                model.set_error(QueryError::transport(&err));
            }
        }
    }
}
