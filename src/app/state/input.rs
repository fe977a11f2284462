use super::*;

impl AppState {
    pub(super) async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if is_interrupt(key) {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key, tx);
            return Ok(());
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => tx.send(AppEvent::Quit).await?,
            KeyCode::Left => self.selection.navigate_hour(&self.store, -1),
            KeyCode::Right => self.selection.navigate_hour(&self.store, 1),
            KeyCode::Up => self.selection.navigate_day(&self.store, -1),
            KeyCode::Down => self.selection.navigate_day(&self.store, 1),
            KeyCode::Home | KeyCode::Char('n') => self.go_to_now(tx),
            KeyCode::Char('/' | 's') => self.open_prompt(Prompt::Search {
                query: String::new(),
            }),
            KeyCode::Char('g') => self.open_prompt(Prompt::Date {
                input: String::new(),
            }),
            KeyCode::Char('u') => self.toggle_units(),
            KeyCode::Char('r' | 'R') => self.refresh(tx),
            _ => {}
        }
        Ok(())
    }

    fn open_prompt(&mut self, prompt: Prompt) {
        self.close_prompt();
        self.status = None;
        self.prompt = Some(prompt);
    }

    fn handle_prompt_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) {
        if key.code == KeyCode::Esc {
            self.close_prompt();
            return;
        }
        match self.prompt.as_mut() {
            Some(Prompt::Search { .. }) => self.handle_search_key(key, tx),
            Some(Prompt::Date { input }) => match key.code {
                KeyCode::Char(ch) if is_date_char(ch) && input.len() < 10 => input.push(ch),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => {
                    let raw = input.trim().to_string();
                    self.submit_date(tx, &raw);
                }
                _ => {}
            },
            None => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) {
        let Some(Prompt::Search { query }) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(ch) if is_query_char(ch) => {
                query.push(ch);
                let query = query.clone();
                self.debounce_search(tx, query);
            }
            KeyCode::Backspace => {
                query.pop();
                let query = query.clone();
                self.debounce_search(tx, query);
            }
            KeyCode::Up => {
                self.suggestion_cursor = self.suggestion_cursor.saturating_sub(1);
            }
            KeyCode::Down if !self.suggestions.is_empty() => {
                self.suggestion_cursor = (self.suggestion_cursor + 1).min(self.suggestions.len() - 1);
            }
            KeyCode::Enter => {
                if let Some(result) = self.suggestions.get(self.suggestion_cursor).cloned() {
                    self.choose_result(tx, result);
                } else {
                    let query = query.clone();
                    self.pick_first_result = true;
                    self.search_task = None;
                    self.handle_search_due(tx, &query);
                }
            }
            _ => {}
        }
    }

    fn submit_date(&mut self, tx: &mpsc::Sender<AppEvent>, raw: &str) {
        match parse_date(raw) {
            Some(date) => {
                self.close_prompt();
                self.jump_to_date(tx, date);
            }
            None => self.status = Some(format!("\"{raw}\" is not a YYYY-MM-DD date")),
        }
    }

    /// Replaces any pending lookup; the newest keystroke wins.
    fn debounce_search(&mut self, tx: &mpsc::Sender<AppEvent>, query: String) {
        self.search_task = None;
        if query.trim().chars().count() < MIN_QUERY_LEN {
            self.suggestions.clear();
            self.suggestion_cursor = 0;
            return;
        }
        self.search_task = Some(schedule_search(tx.clone(), query, SEARCH_DEBOUNCE));
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

pub(super) fn is_query_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '\'' | '’' | ',' | '.')
}

fn is_date_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '-'
}
