use super::*;

impl AppState {
    /// CLI coordinates, then a CLI city, then IP lookup, then the default.
    pub(super) fn resolve_initial_location(&mut self, tx: &mpsc::Sender<AppEvent>, cli: &Cli) {
        self.loading_message = "Detecting location...".to_string();
        let tx2 = tx.clone();

        if let Some((lat, lon)) = cli.coordinates() {
            let geocoder = self.services.geocode.clone();
            tokio::spawn(async move {
                let name = geocoder.reverse(lat, lon).await;
                let location = LocationRecord::new(lat, lon, name, Provenance::Gps);
                let _ = tx2
                    .send(AppEvent::LocationResolved {
                        location,
                        country_code: None,
                    })
                    .await;
            });
            return;
        }

        if let Some(city) = cli.city.clone() {
            let geocoder = self.services.geocode.clone();
            let country_code = self.session.country_code().map(str::to_string);
            tokio::spawn(async move {
                let event = match geocoder.search(&city, country_code.as_deref()).await {
                    Ok(results) => match results.into_iter().next() {
                        Some(first) => AppEvent::LocationResolved {
                            location: first.into_location(),
                            country_code: None,
                        },
                        None => AppEvent::LocationFailed(format!("No location found for \"{city}\"")),
                    },
                    Err(err) => {
                        warn!(error = %err, %city, "city lookup failed");
                        AppEvent::LocationFailed(format!("Could not look up \"{city}\""))
                    }
                };
                let _ = tx2.send(event).await;
            });
            return;
        }

        let geoip = self.services.geoip.clone();
        tokio::spawn(async move {
            let event = match geoip.detect().await {
                Some(detected) => AppEvent::LocationResolved {
                    location: detected.location,
                    country_code: detected.country_code,
                },
                None => AppEvent::LocationFailed("Location detection failed".to_string()),
            };
            let _ = tx2.send(event).await;
        });
    }

    /// Serves a rolling forecast from the cache when valid; everything else
    /// goes to the network, tagged with the location generation and a fresh
    /// request id. Any load supersedes the ones before it.
    pub(super) fn load_forecast(&mut self, tx: &mpsc::Sender<AppEvent>, scope: FetchScope) {
        let Some(location) = self.session.active().cloned() else {
            return;
        };
        self.forecast_request = self.forecast_request.wrapping_add(1);

        if scope == FetchScope::Forecast
            && let Some(series) = self.cache.series(&location, self.utc_now())
        {
            debug!(name = %location.display_name, "forecast served from cache");
            self.fetch_in_flight = false;
            self.apply_series(series);
            return;
        }

        self.fetch_in_flight = true;
        self.refresh_meta.mark_attempt();
        self.loading_message = match scope {
            FetchScope::Forecast => format!("Fetching weather for {}...", location.short_name()),
            FetchScope::SingleDate(date) => format!("Fetching weather for {date}..."),
        };
        if !self.store.is_loaded() {
            self.mode = AppMode::Loading;
        }

        let generation = self.session.generation();
        let request = self.forecast_request;
        let client = self.services.forecast.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch(&location, scope).await {
                Ok(series) => AppEvent::ForecastLoaded {
                    generation,
                    request,
                    series,
                },
                Err(error) => AppEvent::ForecastFailed {
                    generation,
                    request,
                    error,
                },
            };
            let _ = tx2.send(event).await;
        });
    }

    /// Runs a suggestion lookup unless the prompt has moved on.
    pub(super) fn handle_search_due(&mut self, tx: &mpsc::Sender<AppEvent>, query: &str) {
        let Some(Prompt::Search { query: current }) = self.prompt.as_ref() else {
            return;
        };
        if current.trim() != query.trim() {
            return;
        }

        let key = search_key(query);
        if key.chars().count() < MIN_QUERY_LEN {
            self.pick_first_result = false;
            return;
        }
        if let Some(hit) = self.search_cache.get(&key).cloned() {
            debug!(query = %key, "suggestions served from cache");
            self.show_suggestions(tx, hit);
            return;
        }

        let geocoder = self.services.geocode.clone();
        let country_code = self.session.country_code().map(str::to_string);
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match geocoder.search(&key, country_code.as_deref()).await {
                Ok(results) => AppEvent::SearchResults {
                    query: key,
                    results,
                },
                Err(err) => AppEvent::SearchFailed {
                    query: key,
                    error: format!("{err:#}"),
                },
            };
            let _ = tx2.send(event).await;
        });
    }

    pub(super) fn handle_search_results(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        query: String,
        results: Vec<SearchResult>,
    ) {
        self.search_cache.put(query.clone(), results.clone());
        let still_wanted = matches!(
            self.prompt.as_ref(),
            Some(Prompt::Search { query: current }) if search_key(current) == query
        );
        if still_wanted {
            self.show_suggestions(tx, results);
        }
    }

    fn show_suggestions(&mut self, tx: &mpsc::Sender<AppEvent>, results: Vec<SearchResult>) {
        if std::mem::take(&mut self.pick_first_result) {
            match results.into_iter().next() {
                Some(first) => self.choose_result(tx, first),
                None => self.status = Some("No matching places".to_string()),
            }
            return;
        }
        self.status = results
            .is_empty()
            .then(|| "No matching places".to_string());
        self.suggestions = results;
        self.suggestion_cursor = 0;
    }
}

/// Cache key for a search query.
pub(super) fn search_key(query: &str) -> String {
    query.trim().to_lowercase()
}
