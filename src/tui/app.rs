use crate::actions::{self, Notice, SearchReport, NO_RESULTS_MESSAGE};
use crate::event::{Event, EventResult};
use crate::ingredients::IngredientList;
use crate::search::{RecipeSearch, SearchResult};
use crate::session::{SearchSession, SearchTicket};
use crate::tui::{CardList, InputWidget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

type Finished = (SearchTicket, SearchReport);

/// Main application state
pub struct App {
    searcher: Arc<RecipeSearch>,
    ingredients: IngredientList,
    /// Index of the highlighted ingredient chip
    selected: Option<usize>,
    /// Input widget for ingredient names
    pub input: InputWidget,
    cards: CardList,
    session: SearchSession,
    notice: Option<Notice>,
    should_quit: bool,
    spinner_frame: usize,
    result_tx: mpsc::UnboundedSender<Finished>,
    result_rx: mpsc::UnboundedReceiver<Finished>,
}

impl App {
    pub fn new(searcher: Arc<RecipeSearch>) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        Self {
            searcher,
            ingredients: IngredientList::new(),
            selected: None,
            input: InputWidget::new(),
            cards: CardList::new(),
            session: SearchSession::new(),
            notice: None,
            should_quit: false,
            spinner_frame: 0,
            result_tx,
            result_rx,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether a search is outstanding (the search trigger is disabled)
    pub fn is_loading(&self) -> bool {
        self.session.is_busy()
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn results(&self) -> &[SearchResult] {
        self.cards.cards()
    }

    pub fn selected_ingredient(&self) -> Option<&str> {
        self.selected.and_then(|i| self.ingredients.iter().nth(i))
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Apply every search that has finished since the last call
    pub fn poll_results(&mut self) {
        while let Ok(finished) = self.result_rx.try_recv() {
            self.apply(finished);
        }
    }

    /// Wait for the next finished search and apply it
    pub async fn wait_for_search(&mut self) {
        if let Some(finished) = self.result_rx.recv().await {
            self.apply(finished);
        }
    }

    fn apply(&mut self, (ticket, report): Finished) {
        if !self.session.finish(ticket) {
            tracing::debug!(?ticket, "dropping stale search response");
            return;
        }

        tracing::debug!(
            result_count = report.results.len(),
            notice = ?report.notice,
            "search finished"
        );
        self.cards.set_cards(report.results);
        self.notice = report.notice;
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                self.poll_results();
                Ok(())
            }
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Event::Resize(..) => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('l') if ctrl => self.clear_ingredients(),
            KeyCode::Up => self.cards.scroll_up(1),
            KeyCode::Down => self.cards.scroll_down(1),
            KeyCode::PageUp => self.cards.scroll_up(10),
            KeyCode::PageDown => self.cards.scroll_down(10),
            KeyCode::Home => self.cards.scroll_to_top(),
            KeyCode::End => self.cards.scroll_to_bottom(),
            KeyCode::Enter => {
                if self.input.is_blank() {
                    self.start_search();
                } else {
                    self.add_ingredient();
                }
            }
            KeyCode::Left if self.input.is_blank() => self.select_previous(),
            KeyCode::Right if self.input.is_blank() => self.select_next(),
            KeyCode::Delete if self.input.is_blank() => self.remove_selected(),
            KeyCode::Backspace if self.input.is_blank() => {
                if let Some(removed) = self.ingredients.pop() {
                    tracing::debug!(ingredient = %removed, "ingredient removed");
                    self.after_removal();
                }
            }
            _ => self.input.handle_key(key),
        }
        Ok(())
    }

    fn add_ingredient(&mut self) {
        let text = self.input.take_text();
        if self.ingredients.add(&text) {
            tracing::debug!(ingredient = %text.trim(), "ingredient added");
        }
    }

    fn select_previous(&mut self) {
        let last = match self.ingredients.len() {
            0 => return,
            len => len - 1,
        };
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => last,
        });
    }

    fn select_next(&mut self) {
        let last = match self.ingredients.len() {
            0 => return,
            len => len - 1,
        };
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(last),
            None => 0,
        });
    }

    fn remove_selected(&mut self) {
        let Some(name) = self.selected_ingredient().map(str::to_string) else {
            return;
        };
        if self.ingredients.remove(&name) {
            tracing::debug!(ingredient = %name, "ingredient removed");
            self.after_removal();
        }
    }

    /// Keep the chip selection in range and drop results once the list is empty
    fn after_removal(&mut self) {
        if self.ingredients.is_empty() {
            self.selected = None;
            self.discard_results();
        } else if let Some(i) = self.selected {
            self.selected = Some(i.min(self.ingredients.len() - 1));
        }
    }

    fn clear_ingredients(&mut self) {
        self.ingredients.clear();
        self.selected = None;
        self.discard_results();
    }

    fn discard_results(&mut self) {
        self.session.invalidate();
        self.cards.clear();
        self.notice = None;
    }

    /// Start a search with the current ingredients; ignored when there are
    /// none or a search is already running
    fn start_search(&mut self) {
        if self.ingredients.is_empty() {
            return;
        }
        let Some(ticket) = self.session.begin() else {
            return;
        };

        self.cards.clear();
        self.notice = None;

        let query = self.ingredients.query_string();
        tracing::info!(?ticket, ingredients = %query, "search started");

        let searcher = Arc::clone(&self.searcher);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let report = actions::search_recipes(searcher, query).await;
            let _ = tx.send((ticket, report));
        });
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Ingredient chips
                Constraint::Length(3), // Input
                Constraint::Length(3), // Status bar
                Constraint::Min(3),    // Results
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_ingredients(frame, chunks[1]);
        self.input.render(frame, chunks[2]);
        self.render_status(frame, chunks[3]);
        self.render_results(frame, chunks[4]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "レシピ検索",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "食材を入力して、おいしいレシピを見つけましょう",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);

        frame.render_widget(header, area);
    }

    fn render_ingredients(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "検索する食材: ",
            Style::default().fg(Color::Gray),
        )];
        for (i, ingredient) in self.ingredients.iter().enumerate() {
            let background = if self.selected == Some(i) {
                Color::Yellow
            } else {
                Color::LightCyan
            };
            spans.push(Span::styled(
                format!(" {} ", ingredient),
                Style::default().fg(Color::Black).bg(background),
            ));
            spans.push(Span::raw(" "));
        }

        let chips = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        frame.render_widget(chips, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("状態: ", Style::default().fg(Color::Yellow)),
            Span::raw(if self.is_loading() {
                format!("{} 検索中...", SPINNER[self.spinner_frame % SPINNER.len()])
            } else if self.ingredients.is_empty() {
                "食材を追加してください".to_string()
            } else {
                "準備完了".to_string()
            }),
        ];

        if let Some(notice) = &self.notice {
            let color = if notice.is_error() {
                Color::LightRed
            } else {
                Color::Yellow
            };
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(notice.message(), Style::default().fg(color)));
        }

        let status = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ←→=選択 │ Del=削除 │ Ctrl+L=クリア │ ↑↓=スクロール │ Esc=終了 ")
                .border_style(Style::default().fg(Color::White)),
        );

        frame.render_widget(status, area);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let title = if !self.ingredients.is_empty() && !self.cards.is_empty() {
            format!(" {} ", self.ingredients.heading())
        } else {
            " 検索結果 ".to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::White));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let nothing_found = !self.ingredients.is_empty()
            && self.cards.is_empty()
            && !self.is_loading()
            && matches!(self.notice, Some(Notice::NoResults));

        if nothing_found {
            let message = Paragraph::new(NO_RESULTS_MESSAGE)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true });
            frame.render_widget(message, inner);
        } else {
            self.cards.render(frame, inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchSettings;
    use ratatui::{backend::TestBackend, Terminal};

    fn app_without_credentials() -> App {
        let searcher = RecipeSearch::from_settings(&SearchSettings::default()).unwrap();
        App::new(Arc::new(searcher))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
        .unwrap();
    }

    fn type_ingredient(app: &mut App, name: &str) {
        for ch in name.chars() {
            press(app, KeyCode::Char(ch));
        }
        press(app, KeyCode::Enter);
    }

    #[tokio::test]
    async fn test_enter_adds_ingredients() {
        let mut app = app_without_credentials();
        type_ingredient(&mut app, "卵");
        type_ingredient(&mut app, "牛乳");
        type_ingredient(&mut app, "卵");

        assert_eq!(app.ingredients().query_string(), "卵, 牛乳");
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_search_disabled_without_ingredients() {
        let mut app = app_without_credentials();
        press(&mut app, KeyCode::Enter);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_search_shows_mock_results_and_notice() {
        let mut app = app_without_credentials();
        type_ingredient(&mut app, "卵");
        type_ingredient(&mut app, "牛乳");

        press(&mut app, KeyCode::Enter);
        assert!(app.is_loading());

        // A second trigger while loading is ignored
        press(&mut app, KeyCode::Enter);

        app.wait_for_search().await;
        assert!(!app.is_loading());
        assert_eq!(app.results().len(), 6);
        assert!(app.results()[0].title.contains('卵'));
        assert_eq!(app.notice(), Some(&Notice::Synthetic));
    }

    #[tokio::test]
    async fn test_clearing_drops_in_flight_results() {
        let mut app = app_without_credentials();
        type_ingredient(&mut app, "トマト");
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'l');

        app.wait_for_search().await;
        assert!(app.ingredients().is_empty());
        assert!(app.results().is_empty());
        assert!(app.notice().is_none());
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_backspace_on_empty_input_removes_last_ingredient() {
        let mut app = app_without_credentials();
        type_ingredient(&mut app, "卵");
        type_ingredient(&mut app, "牛乳");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.ingredients().query_string(), "卵");
    }

    #[tokio::test]
    async fn test_delete_removes_selected_chip() {
        let mut app = app_without_credentials();
        type_ingredient(&mut app, "卵");
        type_ingredient(&mut app, "牛乳");
        type_ingredient(&mut app, "砂糖");

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected_ingredient(), Some("牛乳"));

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.ingredients().query_string(), "卵, 砂糖");
        assert_eq!(app.selected_ingredient(), Some("砂糖"));

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_ingredient(), Some("卵"));
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Delete);
        assert!(app.ingredients().is_empty());
        assert_eq!(app.selected_ingredient(), None);

        // Nothing selected: Delete is a no-op
        type_ingredient(&mut app, "トマト");
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.ingredients().query_string(), "トマト");
    }

    #[tokio::test]
    async fn test_escape_quits() {
        let mut app = app_without_credentials();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_render_after_search() {
        let mut app = app_without_credentials();
        type_ingredient(&mut app, "卵");
        press(&mut app, KeyCode::Enter);
        app.wait_for_search().await;

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("https://example.com/recipe1"));
    }
}
