//! Clickable text list: lines and their click targets built together so the
//! rows can never drift apart.

use ratatui::widgets::{Paragraph, Wrap};
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// Pairs rendered [`Line`]s with action IDs.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Shop"));
/// cl.push_clickable(Line::from(" [1] Laser Pliers"), BUY_UPGRADE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, inner_width);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    /// Rows needed to show every line when wrapped at `inner_width`
    /// (0 = no wrapping).
    pub fn height(&self, inner_width: u16) -> u16 {
        self.lines
            .iter()
            .map(|line| visual_height(line, inner_width))
            .fold(0u16, u16::saturating_add)
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every visual row of every clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders. Pass the
    /// content width as `inner_width` when the paragraph wraps, or 0 when it
    /// does not.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut starts = Vec::with_capacity(self.lines.len());
        let mut heights = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            let h = visual_height(line, inner_width);
            starts.push(cumulative);
            heights.push(h);
            cumulative = cumulative.saturating_add(h);
        }

        for &(idx, action_id) in &self.actions {
            for vr in starts[idx]..starts[idx] + heights[idx] {
                let row = content_y.saturating_add(vr);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

/// Rows a line occupies when wrapped at `width` (0 = no wrapping). Measured
/// with the same word wrapper `Paragraph` renders with.
fn visual_height(line: &Line, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let rows = Paragraph::new(line.clone())
        .wrap(Wrap { trim: false })
        .line_count(width);
    rows.max(1) as u16
}
