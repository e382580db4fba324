//! Batch scraping across every configured route.
//!
//! Routes are independent: each page is fetched and assembled on its own,
//! and a failure on one route never touches the others. The only shared
//! state is the read-only stop directory.

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::config::{FeedConfig, RouteSource};
use crate::domain::{RouteId, StopDirectory, TripSet, TripSetError};
use crate::fetch::{FetchError, PageSource};
use crate::html::{SelectorError, TableExtractor};
use crate::timetable::{ExtractError, PageTrips, TripSetAssembler};

/// A route whose page could not be fetched.
#[derive(Debug)]
pub struct RouteFailure {
    pub route_id: RouteId,
    pub url: String,
    pub error: FetchError,
}

/// What happened on one successfully fetched route page.
#[derive(Debug, Clone)]
pub struct RouteSummary {
    pub route_id: RouteId,
    pub url: String,
    /// Trips kept from this page.
    pub trips: usize,
    /// Block- and cell-level problems on this page.
    pub issues: Vec<ExtractError>,
    /// Trips dropped because their id was already taken.
    pub duplicates: Vec<String>,
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// All trips, in route order then page order, with unique ids.
    pub trips: TripSet,
    /// One summary per route that was fetched.
    pub routes: Vec<RouteSummary>,
    /// Routes that failed to fetch.
    pub failures: Vec<RouteFailure>,
}

impl BatchReport {
    /// Trips with no stop times, which point at a broken table.
    pub fn empty_trips(&self) -> impl Iterator<Item = &str> {
        self.trips.iter().filter(|t| t.is_empty()).map(|t| t.trip_id())
    }
}

/// Fetch and assemble one route page.
async fn scrape_route<S: PageSource>(
    source: &S,
    extractor: &TableExtractor,
    config: &FeedConfig,
    route: &RouteSource,
    directory: &StopDirectory,
) -> Result<PageTrips, FetchError> {
    let document = source.fetch(&route.url).await?;
    let blocks = extractor.extract(&document);
    let context = config.route_context(route);
    Ok(TripSetAssembler::new(&context, directory).assemble(blocks))
}

/// Scrape every configured route.
///
/// Pages are fetched concurrently (the page source bounds how many at
/// once). Results are merged in configured route order, so the output is
/// deterministic regardless of which fetch finishes first.
pub async fn scrape_routes<S: PageSource>(
    source: &S,
    config: &FeedConfig,
    directory: &StopDirectory,
) -> Result<BatchReport, SelectorError> {
    let extractor = TableExtractor::new(&config.layout)?;

    let pages = join_all(
        config
            .routes
            .iter()
            .map(|route| scrape_route(source, &extractor, config, route, directory)),
    )
    .await;

    let mut report = BatchReport::default();

    for (route, page) in config.routes.iter().zip(pages) {
        match page {
            Ok(page) => {
                let summary = merge_page(&mut report.trips, route, page);
                info!(
                    route_id = %route.route_id,
                    trips = summary.trips,
                    issues = summary.issues.len(),
                    "scraped route"
                );
                report.routes.push(summary);
            }
            Err(e) => {
                error!(route_id = %route.route_id, url = %route.url, "failed to fetch route page: {e}");
                report.failures.push(RouteFailure {
                    route_id: route.route_id.clone(),
                    url: route.url.clone(),
                    error: e,
                });
            }
        }
    }

    Ok(report)
}

/// Add a page's trips to the run, dropping any whose id is already taken.
fn merge_page(trips: &mut TripSet, route: &RouteSource, page: PageTrips) -> RouteSummary {
    let mut kept = 0;
    let mut duplicates = Vec::new();

    for trip in page.trips {
        match trips.insert(trip) {
            Ok(()) => kept += 1,
            Err(TripSetError::DuplicateTripId(id)) => {
                warn!(route_id = %route.route_id, trip_id = %id, "dropping trip with duplicate id");
                duplicates.push(id);
            }
        }
    }

    RouteSummary {
        route_id: route.route_id.clone(),
        url: route.url.clone(),
        trips: kept,
        issues: page.issues,
        duplicates,
    }
}
