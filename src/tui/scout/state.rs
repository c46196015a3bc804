// File: ./src/tui/scout/state.rs
// Manages the application state for the scout TUI.
use crate::client::{SearchParams, UrlFetchRequest};
use crate::config::Config;
use crate::context::SharedContext;
use crate::model::Listing;
use crate::pipeline::{self, FilterOptions, SortKey};
use ratatui::widgets::TableState;
use strum::IntoEnumIterator;

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    /// Editing one of the request-form fields.
    EditingField,
    /// Editing the undervalue threshold.
    EditingThreshold,
}

/// Which request shape the form currently targets.
#[derive(PartialEq, Clone, Copy)]
pub enum RequestShape {
    Urls,
    Search,
}

pub struct ScoutState {
    pub ctx: SharedContext,

    // Data
    pub listings: Vec<Listing>,
    pub error: Option<String>,

    // Pipeline controls
    pub opts: FilterOptions,
    pub sort: SortKey,

    // Request form
    pub shape: RequestShape,
    pub rightmove_url: String,
    pub zoopla_url: String,
    pub location: String,
    pub radius_km: String,
    pub min_price: String,
    pub max_price: String,
    pub min_beds: String,
    pub max_beds: String,
    pub property_type: String,
    pub active_field: usize,

    // UI state
    pub mode: InputMode,
    pub input_buffer: String,
    pub table_state: TableState,
    pub message: String,
    pub loading: bool,
    pub show_help: bool,
}

impl ScoutState {
    pub fn new(ctx: SharedContext, config: &Config) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            ctx,
            listings: vec![],
            error: None,
            opts: FilterOptions {
                min_undervalue_pct: config.min_undervalue_pct,
                require_area: config.require_area,
            },
            sort: config.default_sort,
            shape: RequestShape::Urls,
            rightmove_url: String::new(),
            zoopla_url: String::new(),
            location: String::new(),
            radius_km: String::new(),
            min_price: String::new(),
            max_price: String::new(),
            min_beds: String::new(),
            max_beds: String::new(),
            property_type: String::new(),
            active_field: 0,
            mode: InputMode::Normal,
            input_buffer: String::new(),
            table_state,
            message: "Connecting...".to_string(),
            loading: false,
            show_help: false,
        }
    }

    /// The filtered+sorted view. Recomputed on every call; the pipeline
    /// does not cache.
    pub fn visible(&self) -> Vec<&Listing> {
        pipeline::select(&self.listings, &self.opts, self.sort)
    }

    pub fn visible_len(&self) -> usize {
        self.visible().len()
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        let visible = self.visible();
        let idx = self.table_state.selected()?;
        visible.get(idx).copied()
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn cycle_sort(&mut self) {
        let keys: Vec<SortKey> = SortKey::iter().collect();
        let pos = keys.iter().position(|k| *k == self.sort).unwrap_or(0);
        self.sort = keys[(pos + 1) % keys.len()];
    }

    // --- REQUEST FORM ---

    pub fn field_count(&self) -> usize {
        match self.shape {
            RequestShape::Urls => 2,
            RequestShape::Search => 7,
        }
    }

    pub fn field_label(&self, idx: usize) -> &'static str {
        match self.shape {
            RequestShape::Urls => match idx {
                0 => "Rightmove URL",
                _ => "Zoopla URL",
            },
            RequestShape::Search => match idx {
                0 => "Location",
                1 => "Radius (km)",
                2 => "Min price",
                3 => "Max price",
                4 => "Min beds",
                5 => "Max beds",
                _ => "Property type",
            },
        }
    }

    pub fn field_value(&self, idx: usize) -> &str {
        match self.shape {
            RequestShape::Urls => match idx {
                0 => &self.rightmove_url,
                _ => &self.zoopla_url,
            },
            RequestShape::Search => match idx {
                0 => &self.location,
                1 => &self.radius_km,
                2 => &self.min_price,
                3 => &self.max_price,
                4 => &self.min_beds,
                5 => &self.max_beds,
                _ => &self.property_type,
            },
        }
    }

    pub fn field_value_mut(&mut self, idx: usize) -> &mut String {
        match self.shape {
            RequestShape::Urls => match idx {
                0 => &mut self.rightmove_url,
                _ => &mut self.zoopla_url,
            },
            RequestShape::Search => match idx {
                0 => &mut self.location,
                1 => &mut self.radius_km,
                2 => &mut self.min_price,
                3 => &mut self.max_price,
                4 => &mut self.min_beds,
                5 => &mut self.max_beds,
                _ => &mut self.property_type,
            },
        }
    }

    /// Builds the /api/fetch body; empty inputs stay off the wire.
    pub fn url_request(&self) -> UrlFetchRequest {
        UrlFetchRequest {
            rightmove_url: non_empty(&self.rightmove_url),
            zoopla_url: non_empty(&self.zoopla_url),
        }
    }

    /// Builds the /api/search-rightmove body. Numeric fields that do not
    /// parse are omitted rather than sent as garbage.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            portal: Some("rightmove".to_string()),
            location: non_empty(&self.location),
            radius_km: self.radius_km.trim().parse().ok(),
            min_price: self.min_price.trim().parse().ok(),
            max_price: self.max_price.trim().parse().ok(),
            min_beds: self.min_beds.trim().parse().ok(),
            max_beds: self.max_beds.trim().parse().ok(),
            property_type: non_empty(&self.property_type),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
