use std::f32::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::catalog::WeatherType;
use crate::scene::{ElementKind, Scene, SceneElement, StyleClass};

pub struct SceneView;

pub struct SceneViewProps<'a> {
    pub scene: &'a Scene,
    /// Icon font available for snowflakes
    pub icon_glyphs: bool,
}

const RAIN: Color = Color::Rgb(120, 170, 255);
const SNOW: Color = Color::Rgb(235, 245, 255);
const WIND: Color = Color::Rgb(170, 190, 185);
const CLOUD: Color = Color::Rgb(190, 190, 200);
const SUN: Color = Color::Rgb(255, 205, 60);

const CLOUD_ART: [&str; 4] = [
    "     .--.      ",
    "  .-(    ).    ",
    " (___.__)__)   ",
    "               ",
];

const SUN_FRAMES: [[&str; 5]; 2] = [
    [
        "    \\  |  /    ",
        "     .---.     ",
        " -- (     ) -- ",
        "     `---'     ",
        "    /  |  \\    ",
    ],
    [
        "   `   .   '   ",
        "  '  .---.  `  ",
        " .  (     )  . ",
        "  .  `---'  '  ",
        "   '   `   .   ",
    ],
];

const WIND_SEGMENT: &str = "~~~~~~~~~";

fn marker_tint(marker: Option<WeatherType>) -> Color {
    match marker {
        Some(WeatherType::Sunny) => SUN,
        Some(WeatherType::Rainy) => Color::Rgb(90, 130, 200),
        Some(WeatherType::Snowy) => Color::Rgb(200, 230, 255),
        Some(WeatherType::Windy) => Color::Rgb(150, 200, 180),
        Some(WeatherType::Cloudy) => Color::Rgb(150, 150, 160),
        None => Color::DarkGray,
    }
}

impl Component<Action> for SceneView {
    type Props<'a> = SceneViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let scene = props.scene;
        let title = match scene.marker {
            Some(marker) => format!(" {} ", marker.marker()),
            None => " Sky ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(marker_tint(scene.marker)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let buf = frame.buffer_mut();
        for element in &scene.elements {
            if let Some(progress) = element.progress(scene.elapsed_ms) {
                draw_element(buf, inner, element, progress, props.icon_glyphs);
            }
        }
    }
}

fn draw_element(buf: &mut Buffer, area: Rect, el: &SceneElement, progress: f32, icons: bool) {
    let width = area.width as f32;
    let height = area.height as f32;
    let left = el.left_pct.unwrap_or(50.0) / 100.0;

    match el.kind {
        ElementKind::Raindrop => {
            let x = (left * width) as i32;
            let y = (progress * height) as i32;
            put_str(buf, area, x, y, "│", Style::default().fg(RAIN));
        }
        ElementKind::Snowflake => {
            let glyph = if icons && el.extra_class == Some(StyleClass::IconGlyph) {
                "❄"
            } else {
                "*"
            };
            let sway = ((progress * TAU * 2.0).sin() * 1.5).round() as i32;
            let x = (left * width) as i32 + sway;
            let y = (progress * height) as i32;
            put_str(buf, area, x, y, glyph, Style::default().fg(SNOW));
        }
        ElementKind::WindLine => {
            let len = WIND_SEGMENT.len() as f32;
            let x = (progress * (width + len) - len) as i32;
            let y = (left * height) as i32;
            put_str(buf, area, x, y, WIND_SEGMENT, Style::default().fg(WIND));
        }
        ElementKind::Cloud => {
            let art_w = CLOUD_ART[0].chars().count() as f32;
            let x = (progress * (width + art_w) - art_w) as i32;
            let y = (height / 5.0) as i32;
            for (row, line) in CLOUD_ART.iter().enumerate() {
                put_str(buf, area, x, y + row as i32, line, Style::default().fg(CLOUD));
            }
        }
        ElementKind::SunRays => {
            let art = &SUN_FRAMES[(progress * 8.0) as usize % SUN_FRAMES.len()];
            let art_w = art[0].chars().count() as i32;
            let x = (area.width as i32 - art_w) / 2;
            let y = (area.height as i32 / 5).max(0);
            for (row, line) in art.iter().enumerate() {
                put_str(buf, area, x, y + row as i32, line, Style::default().fg(SUN));
            }
        }
    }
}

/// Write non-space characters at an offset inside `area`, clipping the rest
fn put_str(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < 0 || y >= area.height as i32 {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if ch == ' ' || cx < 0 || cx >= area.width as i32 {
            continue;
        }
        let cell = &mut buf[(area.x + cx as u16, area.y + y as u16)];
        cell.set_char(ch).set_style(style);
    }
}
