use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lru::LruCache;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app::{
        events::{
            AppEvent, SEARCH_DEBOUNCE, ScheduledTask, schedule_search, start_clock_task,
            start_refresh_task,
        },
        settings::{Preferences, load_preferences, save_preferences},
    },
    cli::{Cli, IconMode},
    data::{
        forecast::{FetchError, ForecastClient},
        geocode::{GeocodeClient, SearchResult},
        geoip::GeoIpClient,
    },
    domain::weather::{
        FetchScope, ForecastSeries, LocationRecord, Provenance, RefreshMetadata, Units, parse_date,
    },
    forecast::{ForecastCache, ForecastStore, LocationSession, SelectionController},
    render::RenderCoordinator,
};

mod input;
mod methods_fetch;

const SEARCH_CACHE_CAPACITY: usize = 50;
const MIN_QUERY_LEN: usize = 2;

/// Wall-clock source; swapped out in tests.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Search { query: String },
    Date { input: String },
}

/// Network clients used by the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct Services {
    pub forecast: ForecastClient,
    pub geocode: GeocodeClient,
    pub geoip: GeoIpClient,
}

impl Services {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            forecast: cli
                .forecast_url
                .as_deref()
                .map_or_else(ForecastClient::new, ForecastClient::with_base_url),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub last_error: Option<String>,
    pub status: Option<String>,
    pub session: LocationSession,
    pub cache: ForecastCache,
    pub store: ForecastStore,
    pub selection: SelectionController,
    pub units: Units,
    pub icon_mode: IconMode,
    pub refresh_meta: RefreshMetadata,
    pub fetch_in_flight: bool,
    pub prompt: Option<Prompt>,
    pub suggestions: Vec<SearchResult>,
    pub suggestion_cursor: usize,
    pending_date: Option<NaiveDate>,
    forecast_request: u64,
    reset_selection: bool,
    pick_first_result: bool,
    search_cache: LruCache<String, Vec<SearchResult>>,
    services: Services,
    settings_path: Option<PathBuf>,
    clock: Clock,
    clock_task: Option<ScheduledTask>,
    refresh_task: Option<ScheduledTask>,
    search_task: Option<ScheduledTask>,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        Self::with_services(cli, Services::from_cli(cli), true)
    }

    pub fn with_services(cli: &Cli, services: Services, enable_disk: bool) -> Self {
        let (preferences, settings_path) = load_preferences(cli, enable_disk);
        Self {
            mode: AppMode::Loading,
            running: true,
            loading_message: "Initializing...".to_string(),
            last_error: None,
            status: None,
            session: LocationSession::new(cli.country_code.clone()),
            cache: ForecastCache::new(),
            store: ForecastStore::new(),
            selection: SelectionController::new(),
            units: preferences.units,
            icon_mode: cli.icon_mode(),
            refresh_meta: RefreshMetadata::default(),
            fetch_in_flight: false,
            prompt: None,
            suggestions: Vec::new(),
            suggestion_cursor: 0,
            pending_date: cli.date,
            forecast_request: 0,
            reset_selection: true,
            pick_first_result: false,
            search_cache: LruCache::new(
                NonZeroUsize::new(SEARCH_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
            services,
            settings_path,
            clock: Utc::now,
            clock_task: None,
            refresh_task: None,
            search_task: None,
        }
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    #[must_use]
    pub fn utc_now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Wall clock in the active series' local time.
    #[must_use]
    pub fn local_now(&self) -> NaiveDateTime {
        let now = self.utc_now();
        self.store.local_now(now).unwrap_or_else(|| now.naive_utc())
    }

    #[must_use]
    pub fn view(&self) -> RenderCoordinator<'_> {
        RenderCoordinator::new(&self.store, &self.selection, self.units, self.local_now())
    }

    /// Id of the most recent forecast load; older results are discarded.
    #[must_use]
    pub fn forecast_request(&self) -> u64 {
        self.forecast_request
    }

    #[must_use]
    pub fn location(&self) -> Option<&LocationRecord> {
        self.session.active()
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.handle_bootstrap(tx, cli)?,
            AppEvent::Input(input) => self.handle_input(input, tx).await?,
            AppEvent::ClockTick => self.handle_clock_tick(),
            AppEvent::RefreshTick => self.refresh(tx),
            AppEvent::LocationResolved {
                location,
                country_code,
            } => {
                if let Some(code) = country_code.as_deref() {
                    self.session.remember_detected_country(code);
                }
                self.change_location(tx, location);
            }
            AppEvent::LocationFailed(message) => {
                warn!(%message, "falling back to default location");
                self.status = Some(message);
                self.change_location(tx, LocationRecord::default_location());
            }
            AppEvent::ForecastLoaded {
                generation,
                request,
                series,
            } => self.handle_forecast_loaded(generation, request, series),
            AppEvent::ForecastFailed {
                generation,
                request,
                error,
            } => self.handle_forecast_failed(generation, request, &error),
            AppEvent::SearchDue(query) => self.handle_search_due(tx, &query),
            AppEvent::SearchResults { query, results } => {
                self.handle_search_results(tx, query, results);
            }
            AppEvent::SearchFailed { query, error } => {
                warn!(%query, %error, "location search failed");
                self.pick_first_result = false;
                self.status = Some(format!("Search failed for \"{query}\""));
            }
            AppEvent::Quit => self.mode = AppMode::Quit,
        }
        Ok(())
    }

    fn handle_bootstrap(&mut self, tx: &mpsc::Sender<AppEvent>, cli: &Cli) -> Result<()> {
        cli.validate()?;
        if !cli.one_shot {
            self.clock_task = Some(start_clock_task(tx.clone()));
            self.refresh_task = Some(start_refresh_task(tx.clone(), cli.refresh_interval));
        }
        self.resolve_initial_location(tx, cli);
        Ok(())
    }

    fn handle_clock_tick(&mut self) {
        let now = self.local_now();
        if self.selection.on_periodic_tick(&self.store, now) {
            debug!(hour = self.selection.hour_index(), "live pointer advanced");
        }
    }

    /// Makes `location` active and loads its forecast.
    pub fn change_location(&mut self, tx: &mpsc::Sender<AppEvent>, location: LocationRecord) {
        self.session.set_location(location);
        self.fetch_in_flight = false;
        self.reset_selection = true;
        let scope = self
            .pending_date
            .map_or(FetchScope::Forecast, FetchScope::SingleDate);
        self.load_forecast(tx, scope);
    }

    /// Returns to live "now", reloading the rolling forecast if a single
    /// day is on screen.
    pub fn go_to_now(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if matches!(self.store.scope(), Some(FetchScope::SingleDate(_))) {
            self.reset_selection = true;
            self.load_forecast(tx, FetchScope::Forecast);
            return;
        }
        let now = self.local_now();
        self.selection.go_to_now(&self.store, now);
    }

    pub fn jump_to_date(&mut self, tx: &mpsc::Sender<AppEvent>, date: NaiveDate) {
        info!(%date, "jumping to date");
        self.reset_selection = true;
        self.load_forecast(tx, FetchScope::SingleDate(date));
    }

    /// Forced reload for the scope on screen; the cache is bypassed.
    pub fn refresh(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.fetch_in_flight || self.session.active().is_none() {
            return;
        }
        self.cache.invalidate();
        let scope = self.store.scope().unwrap_or(FetchScope::Forecast);
        self.load_forecast(tx, scope);
    }

    fn is_latest_load(&self, generation: u64, request: u64) -> bool {
        if !self.session.is_current(generation) {
            debug!(generation, "dropping forecast for a previous location");
            return false;
        }
        if request != self.forecast_request {
            debug!(request, latest = self.forecast_request, "dropping superseded forecast");
            return false;
        }
        true
    }

    fn handle_forecast_loaded(&mut self, generation: u64, request: u64, series: ForecastSeries) {
        if !self.is_latest_load(generation, request) {
            return;
        }
        self.fetch_in_flight = false;
        self.refresh_meta.mark_success();
        self.last_error = None;

        let series = Arc::new(series);
        if series.scope == FetchScope::Forecast
            && let Some(location) = self.session.active()
        {
            self.cache.store(Arc::clone(&series), location, self.utc_now());
        }
        self.apply_series(series);
    }

    fn handle_forecast_failed(&mut self, generation: u64, request: u64, error: &FetchError) {
        if !self.is_latest_load(generation, request) {
            return;
        }
        warn!(error = %error, "forecast fetch failed");
        self.fetch_in_flight = false;
        self.refresh_meta.mark_failure();
        self.last_error = Some(error.to_string());
        self.mode = AppMode::Error;
    }

    /// Swaps in a series and repositions the pointer for it. Only an
    /// explicit jump or location change re-anchors a single date on noon;
    /// refreshes keep the pinned hour.
    fn apply_series(&mut self, series: Arc<ForecastSeries>) {
        let scope = series.scope;
        self.store.replace(series);
        match scope {
            FetchScope::SingleDate(_) if self.reset_selection => {
                self.pending_date = None;
                self.selection.apply_date_jump(&self.store);
            }
            FetchScope::SingleDate(_) => self.selection.reconcile(&self.store),
            FetchScope::Forecast if self.reset_selection || self.selection.is_live() => {
                let now = self.local_now();
                self.selection.go_to_now(&self.store, now);
            }
            FetchScope::Forecast => self.selection.reconcile(&self.store),
        }
        self.reset_selection = false;
        self.mode = AppMode::Ready;
    }

    pub fn toggle_units(&mut self) {
        self.units = self.units.toggled();
        self.persist_preferences();
    }

    fn persist_preferences(&self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(err) = save_preferences(path, Preferences { units: self.units }) {
            warn!(error = %err, "could not save preferences");
        }
    }

    fn choose_result(&mut self, tx: &mpsc::Sender<AppEvent>, result: SearchResult) {
        self.close_prompt();
        self.status = None;
        self.change_location(tx, result.into_location());
    }

    fn close_prompt(&mut self) {
        self.prompt = None;
        self.search_task = None;
        self.suggestions.clear();
        self.suggestion_cursor = 0;
        self.pick_first_result = false;
    }
}

#[cfg(test)]
mod tests;
