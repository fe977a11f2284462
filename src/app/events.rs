use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, interval_at, sleep},
};

use crate::{
    data::{forecast::FetchError, geocode::SearchResult},
    domain::weather::{ForecastSeries, LocationRecord},
};

pub const CLOCK_TICK: Duration = Duration::from_secs(60);
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
const MIN_REFRESH_SECS: u64 = 10;

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    Input(Event),
    ClockTick,
    RefreshTick,
    LocationResolved {
        location: LocationRecord,
        country_code: Option<String>,
    },
    LocationFailed(String),
    /// `generation` names the location, `request` the individual load.
    ForecastLoaded {
        generation: u64,
        request: u64,
        series: ForecastSeries,
    },
    ForecastFailed {
        generation: u64,
        request: u64,
        error: FetchError,
    },
    SearchDue(String),
    SearchResults {
        query: String,
        results: Vec<SearchResult>,
    },
    SearchFailed {
        query: String,
        error: String,
    },
    Quit,
}

/// A spawned timer that stops when dropped or replaced.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

fn start_periodic(tx: mpsc::Sender<AppEvent>, period: Duration, make: fn() -> AppEvent) -> ScheduledTask {
    ScheduledTask::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            if tx.send(make()).await.is_err() {
                break;
            }
        }
    })
}

pub fn start_clock_task(tx: mpsc::Sender<AppEvent>) -> ScheduledTask {
    start_periodic(tx, CLOCK_TICK, || AppEvent::ClockTick)
}

pub fn start_refresh_task(tx: mpsc::Sender<AppEvent>, refresh_secs: u64) -> ScheduledTask {
    let period = Duration::from_secs(refresh_secs.max(MIN_REFRESH_SECS));
    start_periodic(tx, period, || AppEvent::RefreshTick)
}

/// Emits `SearchDue(query)` after `delay` unless the task is dropped first.
pub fn schedule_search(tx: mpsc::Sender<AppEvent>, query: String, delay: Duration) -> ScheduledTask {
    ScheduledTask::spawn(async move {
        sleep(delay).await;
        let _ = tx.send(AppEvent::SearchDue(query)).await;
    })
}
