// Defines actions and events exchanged between the scout UI and its
// network actor.
use crate::client::{SearchParams, UrlFetchRequest};
use crate::model::RawListing;

#[derive(Debug)]
pub enum Action {
    /// POST raw portal URLs to /api/fetch.
    FetchUrls(UrlFetchRequest),
    /// POST structured parameters to /api/search-rightmove.
    Search(SearchParams),
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    ListingsLoaded(Vec<RawListing>),
    Error(String),
    Status(String),
}
