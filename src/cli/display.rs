// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the quarry CLI.
//!
//! Two frame styles: light `Section` boxes for result and block tables, and a
//! double-ruled `Banner` for the index summary. Colors come from a dark or a
//! light palette picked once per process. `NO_COLOR` and non-TTY output get
//! plain text.
//!
//! # Theme detection order
//!
//! 1. `QUARRY_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

/// Inner width of every frame, borders excluded.
pub const FRAME_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn theme_from(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    match explicit.map(str::to_lowercase).as_deref() {
        Some("light" | "l") => return Theme::Light,
        Some("dark" | "d") => return Theme::Dark,
        _ => {}
    }
    // "fg;bg": backgrounds 7 and 9..=15 are light, 8 is dark gray
    let light_bg = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok())
        .is_some_and(|bg| bg >= 7 && bg != 8);
    if light_bg {
        Theme::Light
    } else {
        Theme::Dark
    }
}

pub fn theme() -> Theme {
    *THEME.get_or_init(|| {
        theme_from(
            std::env::var("QUARRY_THEME").ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    })
}

pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Gray,
    BrightGreen,
    BrightCyan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Bold,
    Dim,
}

type Rgb = (u8, u8, u8);

impl Color {
    /// OneDark for dark terminals, One Light for light ones.
    fn rgb(self, theme: Theme) -> Rgb {
        match (theme, self) {
            (Theme::Dark, Color::Red) => (224, 108, 117),
            (Theme::Dark, Color::Green) => (152, 195, 121),
            (Theme::Dark, Color::Yellow) => (229, 192, 123),
            (Theme::Dark, Color::Blue) => (97, 175, 239),
            (Theme::Dark, Color::Cyan) => (86, 182, 194),
            (Theme::Dark, Color::Gray) => (92, 99, 112),
            (Theme::Dark, Color::BrightGreen) => (166, 226, 46),
            (Theme::Dark, Color::BrightCyan) => (102, 217, 239),
            (Theme::Light, Color::Red) => (228, 86, 73),
            (Theme::Light, Color::Green) => (80, 161, 79),
            (Theme::Light, Color::Yellow) => (193, 132, 1),
            (Theme::Light, Color::Blue) => (64, 120, 242),
            (Theme::Light, Color::Cyan) => (1, 132, 188),
            (Theme::Light, Color::Gray) => (160, 161, 167),
            (Theme::Light, Color::BrightGreen) => (68, 140, 39),
            (Theme::Light, Color::BrightCyan) => (1, 112, 158),
        }
    }

    fn escape(self) -> String {
        let (r, g, b) = self.rgb(theme());
        format!("\x1b[38;2;{r};{g};{b}m")
    }
}

impl Style {
    fn escape(self) -> &'static str {
        match self {
            Style::Plain => "",
            Style::Bold => "\x1b[1m",
            Style::Dim => "\x1b[2m",
        }
    }
}

/// `text` in `color`, or unchanged when colors are off.
pub fn paint(color: Color, style: Style, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", style.escape(), color.escape(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length on screen, ANSI escapes excluded.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        match c {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if !in_escape => len += 1,
            _ => {}
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// FRAMES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// `┌─ LABEL ─┐` tables
    Section,
    /// `╔═══╗` summary banner
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Middle,
    Bottom,
}

impl Frame {
    fn horizontal(self) -> char {
        match self {
            Frame::Section => '─',
            Frame::Banner => '═',
        }
    }

    fn vertical(self) -> char {
        match self {
            Frame::Section => '│',
            Frame::Banner => '║',
        }
    }

    fn corners(self, edge: Edge) -> (char, char) {
        match (self, edge) {
            (Frame::Section, Edge::Top) => ('┌', '┐'),
            (Frame::Section, Edge::Middle) => ('├', '┤'),
            (Frame::Section, Edge::Bottom) => ('└', '┘'),
            (Frame::Banner, Edge::Top) => ('╔', '╗'),
            (Frame::Banner, Edge::Middle) => ('╠', '╣'),
            (Frame::Banner, Edge::Bottom) => ('╚', '╝'),
        }
    }

    fn border(self) -> Color {
        match self {
            Frame::Section => Color::Gray,
            Frame::Banner => Color::Blue,
        }
    }

    fn paint_border(self, text: &str) -> String {
        paint(self.border(), Style::Plain, text)
    }
}

/// A horizontal rule, optionally carrying a label after the left corner.
pub fn rule_line(frame: Frame, edge: Edge, label: Option<&str>) -> String {
    let (left, right) = frame.corners(edge);
    let h = frame.horizontal().to_string();
    match label {
        None => frame.paint_border(&format!("{left}{}{right}", h.repeat(FRAME_WIDTH))),
        Some(label) => {
            let label = format!(" {} ", paint(Color::Cyan, Style::Bold, label));
            let fill = FRAME_WIDTH.saturating_sub(visible_len(&label) + 1);
            format!(
                "{}{}{}",
                frame.paint_border(&format!("{left}{h}")),
                label,
                frame.paint_border(&format!("{}{right}", h.repeat(fill)))
            )
        }
    }
}

/// One content row, padded to the frame width.
pub fn content_line(frame: Frame, content: &str) -> String {
    let v = frame.paint_border(&frame.vertical().to_string());
    format!("{v}{}{v}", pad_right(content, FRAME_WIDTH))
}

pub fn rule(frame: Frame, edge: Edge, label: Option<&str>) {
    println!("{}", rule_line(frame, edge, label));
}

pub fn line(frame: Frame, content: &str) {
    println!("{}", content_line(frame, content));
}

/// A bold title centered inside the frame.
pub fn centered(frame: Frame, text: &str) {
    let colored = paint(Color::BrightCyan, Style::Bold, text);
    let left = FRAME_WIDTH.saturating_sub(visible_len(&colored)) / 2;
    line(frame, &format!("{}{}", " ".repeat(left), colored));
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_len(s));
    format!("{}{}", " ".repeat(fill), s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(fill))
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    match bytes as f64 {
        b if b >= KB * KB => format!("{:.1} MB", b / KB / KB),
        b if b >= KB => format!("{:.1} KB", b / KB),
        _ => format!("{bytes} B"),
    }
}

/// Keep the tail of a long path, char-safe: `.../name.txt`.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let tail: String = path.chars().skip(count - keep).collect();
    format!("...{tail}")
}

/// Milliseconds, green under 5, yellow under 20, red above.
pub fn timing_ms(value: f64) -> String {
    let color = match value {
        v if v < 5.0 => Color::Green,
        v if v < 20.0 => Color::Yellow,
        _ => Color::Red,
    };
    paint(color, Style::Plain, &format!("{value:>10.3}"))
}

/// A score colored by how close it is to the best in its result set.
pub fn score_value(score: f64, best: f64) -> String {
    let ratio = if best > 0.0 { score / best } else { 0.0 };
    let color = match ratio {
        r if r >= 0.9 => Color::BrightGreen,
        r if r >= 0.5 => Color::Green,
        r if r >= 0.2 => Color::Yellow,
        _ => Color::Gray,
    };
    paint(color, Style::Plain, &format!("{score:>10.4}"))
}
