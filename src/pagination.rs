use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::LatLon;
use crate::parcel::{first_vertex, ParcelRecord};
use crate::PAGE_SIZE;

/// Progress through a paged radius/point query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// 1-based page number of the next request.
    pub page: u32,
    pub page_size: usize,
    pub has_more: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
            has_more: true,
        }
    }
}

impl PageCursor {
    /// Back to page 1 with more assumed available. Every new search
    /// starts here.
    pub fn reset(&mut self) {
        self.page = 1;
        self.has_more = true;
    }
}

/// Fold one page of a radius/point response into the running result set.
///
/// A new search replaces the set; a continuation appends in arrival
/// order. Duplicates across overlapping pages are kept as delivered.
/// The cursor always moves to the page that would be requested next,
/// even when this page was the last.
pub fn fold_page(
    results: &mut Vec<ParcelRecord>,
    cursor: &mut PageCursor,
    requested_page: u32,
    new_search: bool,
    records: Vec<ParcelRecord>,
) {
    cursor.has_more = records.len() == cursor.page_size;
    cursor.page = requested_page + 1;

    if new_search {
        *results = records;
    } else {
        results.extend(records);
    }
}

/// Fold an ID-lookup response: the single record becomes the entire
/// result set and pagination ends. Returns the parcel's first polygon
/// vertex as the new query origin, or `None` when the geometry is absent
/// or malformed (kept silent toward the user, logged only).
pub fn fold_lookup(
    results: &mut Vec<ParcelRecord>,
    cursor: &mut PageCursor,
    record: ParcelRecord,
) -> Option<LatLon> {
    let recenter = match &record.geometry {
        Some(geometry) => match first_vertex(geometry) {
            Ok(vertex) => Some(vertex),
            Err(err) => {
                warn!(imovel_code = %record.imovel_code, %err, "parcel geometry unusable for recenter");
                None
            }
        },
        None => None,
    };

    *results = vec![record];
    cursor.has_more = false;

    recenter
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Geometry, Value};
    use proptest::prelude::*;

    fn parcel(code: &str) -> ParcelRecord {
        ParcelRecord {
            imovel_code: code.to_string(),
            city: Some("Dracena".into()),
            state_code: Some("SP".into()),
            area_size: Some(12.5),
            fiscal_module: None,
            status: None,
            kind: None,
            created_at: None,
            geometry: None,
        }
    }

    fn page_of(n: usize) -> Vec<ParcelRecord> {
        (0..n).map(|i| parcel(&format!("P{i}"))).collect()
    }

    #[test]
    fn test_three_pages_accumulate() {
        let mut results = Vec::new();
        let mut cursor = PageCursor::default();

        fold_page(&mut results, &mut cursor, 1, true, page_of(20));
        assert_eq!(results.len(), 20);
        assert!(cursor.has_more);
        assert_eq!(cursor.page, 2);

        fold_page(&mut results, &mut cursor, 2, false, page_of(20));
        assert_eq!(results.len(), 40);
        assert!(cursor.has_more);
        assert_eq!(cursor.page, 3);

        fold_page(&mut results, &mut cursor, 3, false, page_of(7));
        assert_eq!(results.len(), 47);
        assert!(!cursor.has_more);
        assert_eq!(cursor.page, 4);
    }

    #[test]
    fn test_new_search_replaces_prior_results() {
        let mut results = page_of(40);
        let mut cursor = PageCursor {
            page: 3,
            page_size: PAGE_SIZE,
            has_more: true,
        };

        fold_page(&mut results, &mut cursor, 1, true, page_of(20));

        assert_eq!(results.len(), 20);
        assert_eq!(cursor.page, 2);
        assert!(cursor.has_more);
    }

    #[test]
    fn test_has_more_boundary() {
        for (n, expected) in [(20, true), (19, false), (0, false)] {
            let mut results = Vec::new();
            let mut cursor = PageCursor::default();
            fold_page(&mut results, &mut cursor, 1, true, page_of(n));
            assert_eq!(cursor.has_more, expected, "page of {n}");
        }
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let mut results = Vec::new();
        let mut cursor = PageCursor::default();

        fold_page(&mut results, &mut cursor, 1, true, vec![parcel("A"), parcel("B")]);
        fold_page(&mut results, &mut cursor, 2, false, vec![parcel("C")]);

        let codes: Vec<_> = results.iter().map(|r| r.imovel_code.as_str()).collect();
        assert_eq!(codes, ["A", "B", "C"]);
    }

    #[test]
    fn test_lookup_replaces_and_ends_pagination() {
        let mut results = page_of(25);
        let mut cursor = PageCursor {
            page: 2,
            page_size: PAGE_SIZE,
            has_more: true,
        };

        let recenter = fold_lookup(&mut results, &mut cursor, parcel("ONLY"));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].imovel_code, "ONLY");
        assert!(!cursor.has_more);
        assert_eq!(recenter, None);
    }

    #[test]
    fn test_lookup_recenters_on_first_vertex() {
        let mut record = parcel("GEO");
        record.geometry = Some(Geometry::new(Value::Polygon(vec![vec![
            vec![-51.05, -21.46],
            vec![-51.04, -21.46],
            vec![-51.04, -21.45],
            vec![-51.05, -21.46],
        ]])));

        let mut results = Vec::new();
        let mut cursor = PageCursor::default();
        let recenter = fold_lookup(&mut results, &mut cursor, record);

        assert_eq!(recenter, Some(LatLon::new(-21.46, -51.05)));
    }

    #[test]
    fn test_lookup_malformed_geometry_is_silent() {
        let mut record = parcel("BAD");
        record.geometry = Some(Geometry::new(Value::Point(vec![-51.05, -21.46])));

        let mut results = Vec::new();
        let mut cursor = PageCursor::default();
        let recenter = fold_lookup(&mut results, &mut cursor, record);

        assert_eq!(recenter, None);
        assert_eq!(results.len(), 1);
        assert!(!cursor.has_more);
    }

    proptest! {
        #[test]
        fn prop_has_more_iff_full_page(n in 0usize..=PAGE_SIZE) {
            let mut results = Vec::new();
            let mut cursor = PageCursor::default();
            fold_page(&mut results, &mut cursor, 1, true, page_of(n));
            prop_assert_eq!(cursor.has_more, n == PAGE_SIZE);
        }

        #[test]
        fn prop_result_len_is_sum_of_pages(sizes in prop::collection::vec(0usize..=PAGE_SIZE, 1..6)) {
            let mut results = Vec::new();
            let mut cursor = PageCursor::default();

            for (i, &n) in sizes.iter().enumerate() {
                let page = u32::try_from(i).unwrap() + 1;
                fold_page(&mut results, &mut cursor, page, i == 0, page_of(n));
                prop_assert_eq!(cursor.page, page + 1);
            }

            prop_assert_eq!(results.len(), sizes.iter().sum::<usize>());
        }
    }
}
