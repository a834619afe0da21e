use crate::search::SearchResult;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthChar;

/// Spacing between cards
const CARD_GAP: u16 = 1;

/// Scrollable list of recipe cards
pub struct CardList {
    cards: Vec<SearchResult>,
    scroll_offset: u16,
    viewport_height: u16,
    viewport_width: u16,
}

impl CardList {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            scroll_offset: 0,
            viewport_height: 0,
            viewport_width: 0,
        }
    }

    /// Replace the cards and scroll back to the top
    pub fn set_cards(&mut self, cards: Vec<SearchResult>) {
        self.cards = cards;
        self.scroll_offset = 0;
    }

    pub fn cards(&self) -> &[SearchResult] {
        &self.cards
    }

    /// Height of a card: borders, title, wrapped snippet, link and image rows
    fn card_height(&self, card: &SearchResult, width: u16) -> u16 {
        let border_height = 2;
        let fixed_rows = 3; // title, link, image
        let snippet_lines = wrap_text(&card.snippet, content_width(width)).len() as u16;
        border_height + fixed_rows + snippet_lines
    }

    fn total_height(&self, width: u16) -> u16 {
        let mut total = 0u16;
        for card in &self.cards {
            total = total.saturating_add(self.card_height(card, width) + CARD_GAP);
        }
        total.saturating_sub(CARD_GAP)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.viewport_height = area.height;
        self.viewport_width = area.width;

        let max_scroll = self.max_scroll();
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let visible_start = self.scroll_offset;
        let visible_end = visible_start.saturating_add(area.height);
        let mut current_y = 0u16;

        for card in &self.cards {
            let height = self.card_height(card, area.width);
            let top = current_y;
            current_y = current_y.saturating_add(height + CARD_GAP);

            // Cards whose top edge is scrolled out are skipped; the last
            // visible card is clipped at the bottom.
            if top < visible_start || top >= visible_end {
                continue;
            }

            let render_y = top - visible_start;
            let card_area = Rect {
                x: area.x,
                y: area.y + render_y,
                width: area.width,
                height: height.min(area.height - render_y),
            };
            render_card(frame, card, card_area);
        }
    }

    fn max_scroll(&self) -> u16 {
        self.total_height(self.viewport_width.max(1))
            .saturating_sub(self.viewport_height)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.scroll_offset = 0;
    }
}

impl Default for CardList {
    fn default() -> Self {
        Self::new()
    }
}

fn content_width(width: u16) -> usize {
    width.saturating_sub(4) as usize // borders plus one column of padding each side
}

fn render_card(frame: &mut Frame, card: &SearchResult, area: Rect) {
    let width = content_width(area.width);
    let title_style = Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::raw(" "),
        Span::styled(truncate_to_width(&card.title, width), title_style),
    ])];

    for line in wrap_text(&card.snippet, width) {
        lines.push(Line::from(format!(" {}", line)));
    }

    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            truncate_to_width(&card.link, width),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" 画像: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            truncate_to_width(card.image_or_placeholder(), width.saturating_sub(6)),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Gray));

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

/// Wrap text to fit within the given display width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let max_width = max_width.max(10);
    wrap(text, max_width)
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
