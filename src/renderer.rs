use std::{collections::HashMap, sync::Mutex};

use macroquad::prelude::*;
use crate::model::{Button, HitItem, Pitcher};

pub const BUTTON_COLORS: [Color; 6] = [
    Color::new(0.937, 0.267, 0.267, 1.0), // RED
    Color::new(0.231, 0.510, 0.965, 1.0), // BLUE
    Color::new(0.627, 0.125, 0.941, 1.0), // PURPLE
    Color::new(0.0  , 0.5  , 0.5  , 1.0), // TEAL
    Color::new(1.0  , 0.647, 0.0  , 1.0), // ORANGE
    Color::new(0.5  , 0.5  , 0.0  , 1.0), // OLIVE
];
const WATER: Color = Color::new(0.376, 0.647, 0.980, 1.0);
const GOAL_MET: Color = Color::new(0.086, 0.639, 0.290, 1.0);
const GOAL_MISSED: Color = Color::new(0.863, 0.149, 0.149, 1.0);

/// Unscaled extents of a string at the reference font size.
#[derive(Copy, Clone, Debug)]
struct TextExtents {
    width: f32,
    height: f32,
    baseline: f32,
}

/// Largest font size at which a label fits a rect, with the offsets that
/// centre it. Measurements are taken once per string and scaled after.
pub struct TextFitter {
    extents: Mutex<HashMap<String, TextExtents>>,
}

impl TextFitter {
    const REFERENCE_SIZE: u16 = 100;

    pub fn new() -> Self {
        Self {
            extents: Mutex::new(HashMap::new()),
        }
    }

    fn extents(&self, text: &str) -> TextExtents {
        if let Ok(cache) = self.extents.lock()
            && let Some(extents) = cache.get(text)
        {
            return *extents;
        }
        let dimensions = measure_text(text, None, Self::REFERENCE_SIZE, 1.0);
        let extents = TextExtents {
            width: dimensions.width,
            height: dimensions.height,
            baseline: dimensions.offset_y,
        };
        if let Ok(mut cache) = self.extents.lock() {
            cache.insert(text.to_string(), extents);
        }
        extents
    }

    /// Returns `(font_size, offset_x, baseline_y)` relative to the rect.
    pub fn fit(&self, text: &str, rect_width: f32, rect_height: f32) -> (f32, f32, f32) {
        let extents = self.extents(text);
        if extents.width <= 0.0 || extents.height <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let scale = (rect_width / extents.width).min(rect_height / extents.height);
        let offset_x = (rect_width - extents.width * scale) / 2.0;
        let offset_y = (rect_height - extents.height * scale) / 2.0;
        (
            Self::REFERENCE_SIZE as f32 * scale,
            offset_x,
            offset_y + extents.baseline * scale,
        )
    }
}

pub struct Renderer {
    text_fitter: TextFitter,
    /// Clickable regions of the last frame, in draw order.
    hit_regions: Vec<(Rect, HitItem)>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}
impl Renderer {
    pub fn new() -> Self {
        Self {
            text_fitter: TextFitter::new(),
            hit_regions: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 1024.0,
            height: 720.0,
        }
    }

    /// Item under the point. Later draws sit on top of earlier ones.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<HitItem> {
        let point = vec2(x, y);
        self.hit_regions
            .iter()
            .rev()
            .find_map(|(rect, item)| rect.contains(point).then_some(*item))
    }

    fn register_hit(&mut self, rect: Rect, item: HitItem) {
        self.hit_regions.push((rect, item));
    }

    pub fn set_viewport(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        if self.x == x && self.y == y && self.width == width && self.height == height {
            return false;
        }
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        true
    }

    pub fn autoset_viewport(&mut self) -> bool {
        let (screen_w, screen_h) = (screen_width(), screen_height());
        self.set_viewport(0.0, 0.0, screen_w, screen_h)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render_game(
        &mut self,
        pitchers: &[Pitcher],
        goal: &[u32],
        goal_matches: &[bool],
        buttons: &[&Button],
        selected_pitcher: Option<usize>,
        active_button: Option<usize>,
        max_capacity: u32,
        max_columns: usize,
    ) {
        // New frame: hit regions are rebuilt from scratch.
        self.hit_regions.clear();

        clear_background(BLACK);
        let area_padding = 10.0;
        let button_area_height = self.height * 0.1;
        let heading_height = self.height * 0.06;
        let pitcher_area_height =
            self.height - button_area_height - heading_height - 2.0 * area_padding;
        self.render_button_lineup(
            buttons,
            active_button,
            Rect::new(self.x, self.y, self.width, button_area_height),
        );
        self.render_text(
            "Target:",
            Rect::new(
                self.x,
                self.y + button_area_height + area_padding,
                self.width,
                heading_height,
            ),
            WHITE,
        );
        self.render_pitcher_grid(
            pitchers,
            goal,
            goal_matches,
            selected_pitcher,
            max_capacity,
            max_columns.max(1),
            Rect::new(
                self.x,
                self.y + button_area_height + heading_height + 2.0 * area_padding,
                self.width,
                pitcher_area_height,
            ),
        );
    }

    pub fn render_text(&self, text: &str, rect: Rect, color: Color) {
        let (font_size, x, baseline) = self.text_fitter.fit(text, rect.w, rect.h);
        if font_size < 1.0 {
            return;
        }
        draw_text(text, rect.x + x, rect.y + baseline, font_size, color);
    }

    /// One pitcher column: goal on top, the vessel scaled against the
    /// largest pitcher, contents underneath.
    #[allow(clippy::too_many_arguments)]
    pub fn render_pitcher(
        &mut self,
        pitcher: &Pitcher,
        index: usize,
        goal: Option<u32>,
        goal_met: bool,
        max_capacity: u32,
        selected: bool,
        rect: Rect,
    ) {
        self.register_hit(rect, HitItem::Pitcher { index });

        let label_height = rect.h * 0.12;
        let lift = rect.h * 0.06;
        if let Some(goal) = goal {
            let color = if goal_met { GOAL_MET } else { GOAL_MISSED };
            self.render_text(
                &goal.to_string(),
                Rect::new(rect.x, rect.y, rect.w, label_height),
                color,
            );
        }
        self.render_text(
            &pitcher.get_contents().to_string(),
            Rect::new(rect.x, rect.y + rect.h - label_height, rect.w, label_height),
            WHITE,
        );

        let body_area_height = rect.h - 2.0 * label_height - lift;
        let body_height =
            body_area_height * pitcher.get_capacity() as f32 / max_capacity.max(1) as f32;
        let bottom = rect.y + rect.h - label_height - if selected { lift } else { 0.0 };
        let body = Rect::new(rect.x, bottom - body_height, rect.w, body_height);

        let water_height = body.h * pitcher.get_fill_ratio();
        draw_rectangle(body.x, body.bottom() - water_height, body.w, water_height, WATER);
        let (thickness, outline) = if selected { (6.0, YELLOW) } else { (4.0, WHITE) };
        // Open-topped vessel.
        draw_line(body.left(), body.top(), body.left(), body.bottom(), thickness, outline);
        draw_line(body.right(), body.top(), body.right(), body.bottom(), thickness, outline);
        draw_line(body.left(), body.bottom(), body.right(), body.bottom(), thickness, outline);
        self.render_text(
            &pitcher.get_capacity().to_string(),
            Rect::new(body.x, body.y, body.w, label_height.min(body.h)),
            GRAY,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render_pitcher_lineup(
        &mut self,
        pitchers: &[Pitcher],
        goal: &[u32],
        goal_matches: &[bool],
        selected: Option<usize>,
        max_capacity: u32,
        start_index: usize,
        rect: Rect,
    ) {
        let pitcher_count = pitchers.len() as f32;
        let spacing = rect.w * 0.05;
        let total_spacing = spacing * (pitcher_count + 1.0);
        let pitcher_width = (rect.w - total_spacing) / pitcher_count;
        for (i, pitcher) in pitchers.iter().enumerate() {
            let index = start_index + i;
            let pitcher_x = rect.x + spacing + i as f32 * (pitcher_width + spacing);
            self.render_pitcher(
                pitcher,
                index,
                goal.get(index).copied(),
                goal_matches.get(index).copied().unwrap_or(false),
                max_capacity,
                Some(index) == selected,
                Rect::new(pitcher_x, rect.y, pitcher_width, rect.h),
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render_pitcher_grid(
        &mut self,
        pitchers: &[Pitcher],
        goal: &[u32],
        goal_matches: &[bool],
        selected: Option<usize>,
        max_capacity: u32,
        max_columns: usize,
        rect: Rect,
    ) {
        if pitchers.is_empty() {
            return;
        }
        let rows = pitchers.len().div_ceil(max_columns);
        let spacing = 10.0;
        let total_spacing_y = spacing * (rows as f32 - 1.0);
        let row_height = (rect.h - total_spacing_y) / rows as f32;

        for (row, row_pitchers) in pitchers.chunks(max_columns).enumerate() {
            let row_y = rect.y + row as f32 * (row_height + spacing);
            self.render_pitcher_lineup(
                row_pitchers,
                goal,
                goal_matches,
                selected,
                max_capacity,
                row * max_columns,
                Rect::new(rect.x, row_y, rect.w, row_height),
            );
        }
    }

    pub fn render_button(&mut self, button: &Button, active: bool, rect: Rect) {
        self.register_hit(
            rect,
            HitItem::Button {
                action: button.get_action(),
            },
        );

        draw_rectangle(rect.x, rect.y, rect.w, rect.h, button.get_color());
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLACK);
        let inset = rect.h * 0.2;
        self.render_text(
            button.get_label(),
            Rect::new(rect.x + inset, rect.y + inset, rect.w - 2.0 * inset, rect.h - 2.0 * inset),
            WHITE,
        );
        if active {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 4.0, WHITE);
        }
    }

    pub fn render_button_lineup(&mut self, buttons: &[&Button], active: Option<usize>, rect: Rect) {
        if buttons.is_empty() {
            return;
        }
        let button_count = buttons.len() as f32;
        let spacing = 10.0;
        let total_spacing = spacing * (button_count - 1.0);
        let button_width = (rect.w - total_spacing) / button_count;
        for (i, button) in buttons.iter().enumerate() {
            let button_x = rect.x + i as f32 * (button_width + spacing);
            self.render_button(
                button,
                Some(i) == active,
                Rect::new(button_x, rect.y, button_width, rect.h),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ControlAction;

    #[test]
    fn topmost_region_wins() {
        let mut renderer = Renderer::new();
        renderer.register_hit(Rect::new(0.0, 0.0, 100.0, 100.0), HitItem::Pitcher { index: 0 });
        renderer.register_hit(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            HitItem::Button {
                action: ControlAction::Reset,
            },
        );
        assert_eq!(
            renderer.hit_test(15.0, 15.0),
            Some(HitItem::Button {
                action: ControlAction::Reset
            })
        );
        assert_eq!(renderer.hit_test(50.0, 50.0), Some(HitItem::Pitcher { index: 0 }));
        assert_eq!(renderer.hit_test(150.0, 50.0), None);
    }
}
