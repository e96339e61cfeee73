//! Banner list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use super::Theme;
use crate::types::BannerView;

/// Draws one line per banner, in queue order:
/// `<icon> <lead>: <text>  [x]`.
pub struct BannerList<'a> {
    banners: &'a [BannerView],
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> BannerList<'a> {
    pub fn new(banners: &'a [BannerView], theme: &'a Theme) -> Self {
        Self {
            banners,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for BannerList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        for (row, banner) in self.banners.iter().enumerate().take(inner.height as usize) {
            let line = banner_line(banner, self.theme);
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}

/// Styled line for a single banner.
pub fn banner_line(banner: &BannerView, theme: &Theme) -> Line<'static> {
    let style = theme.severity(banner.variant);
    let mut spans = vec![
        Span::styled(format!("{} ", banner.icon.glyph()), style),
        Span::styled(
            format!("{}: ", banner.lead),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::raw(banner.text.clone()),
    ];
    if banner.dismissible {
        spans.push(Span::styled("  [x]", theme.muted()));
    }
    Line::from(spans)
}
