//! Card grid: one vertical lane per bucket, one card per row.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::config::ColorParser;
use crate::session::{Card, CardBucket, CardView};

#[derive(Debug, Clone, Copy)]
pub struct CardGridColors {
    pub lane_header: Color,
    pub card_background: Color,
    pub card_text: Color,
    pub dimmed: Color,
}

pub struct CardGrid<'v, 'a> {
    view: &'v CardView<'a>,
    parser: &'v ColorParser,
    colors: CardGridColors,
    card_width: u16,
    lane_offset: usize,
    card_offset: usize,
}

impl<'v, 'a> CardGrid<'v, 'a> {
    pub fn new(view: &'v CardView<'a>, parser: &'v ColorParser, colors: CardGridColors) -> Self {
        Self {
            view,
            parser,
            colors,
            card_width: 32,
            lane_offset: 0,
            card_offset: 0,
        }
    }

    pub fn card_width(mut self, width: u16) -> Self {
        self.card_width = width;
        self
    }

    /// First lane and first card (within each lane) to draw.
    pub fn offsets(mut self, lane_offset: usize, card_offset: usize) -> Self {
        self.lane_offset = lane_offset;
        self.card_offset = card_offset;
        self
    }

    /// Height of one card: a line per visible column inside a border.
    pub fn card_height(&self) -> u16 {
        self.view.visible_columns.len().max(1) as u16 + 2
    }

    fn render_lane(&self, bucket: &CardBucket<'_>, area: Rect, buf: &mut Buffer) {
        let header = format!("{} ({})", bucket.key, bucket.cards.len());
        Paragraph::new(header)
            .style(
                Style::default()
                    .fg(self.colors.lane_header)
                    .add_modifier(Modifier::BOLD),
            )
            .render(Rect { height: 1, ..area }, buf);

        let card_height = self.card_height();
        let mut y = area.y + 1;
        let start = self
            .card_offset
            .min(bucket.cards.len().saturating_sub(1));
        // The first card always shows, clipped to the lane when it is taller.
        for (i, card) in bucket.cards.iter().skip(start).enumerate() {
            let remaining = area.bottom().saturating_sub(y);
            if remaining == 0 || (i > 0 && card_height > remaining) {
                break;
            }
            let height = card_height.min(remaining);
            self.render_card(card, Rect::new(area.x, y, area.width, height), buf);
            y += height;
        }
        if bucket.cards.is_empty() && area.height > 1 {
            Paragraph::new("(no rows)")
                .style(Style::default().fg(self.colors.dimmed))
                .render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
        }
    }

    fn render_card(&self, card: &Card<'_>, area: Rect, buf: &mut Buffer) {
        let background = self
            .parser
            .adapt(card.color.unwrap_or(self.colors.card_background));
        let style = Style::default().bg(background).fg(self.colors.card_text);
        let lines: Vec<Line> = self
            .view
            .visible_columns
            .iter()
            .map(|col| Line::from(format!("{}: {}", col, card.row.value_or_empty(col))))
            .collect();
        Paragraph::new(lines)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!("#{}", card.row.index() + 1))
                    .style(style),
            )
            .render(area, buf);
    }
}

impl Widget for CardGrid<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width == 0 {
            return;
        }
        let lane_width = self.card_width.min(area.width);
        let stride = lane_width + 1;
        let mut x = area.x;
        for bucket in self.view.buckets.iter().skip(self.lane_offset) {
            if x + lane_width > area.right() {
                break;
            }
            self.render_lane(bucket, Rect::new(x, area.y, lane_width, area.height), buf);
            x += stride;
        }
    }
}
