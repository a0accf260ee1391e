use medflash_lib::terms::MasteryLevel;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Wrap `text` in `code` when colors are enabled
pub fn paint(text: &str, code: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", code, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn mastery_badge(level: MasteryLevel, use_color: bool) -> String {
    let code = match level {
        MasteryLevel::New => Color::DIM,
        MasteryLevel::Learning => Color::YELLOW,
        MasteryLevel::Familiar => Color::CYAN,
        MasteryLevel::Mastered => Color::GREEN,
    };
    paint(&format!("[{}]", level), code, use_color)
}

/// One-line Monday..Sunday strip, e.g. `M T W T F S S` with studied days marked
pub fn week_strip(week: &[bool; 7], use_color: bool) -> String {
    const DAYS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];
    DAYS.iter()
        .zip(week.iter())
        .map(|(day, studied)| {
            if *studied {
                paint(&format!("{}\u{25cf}", day), Color::GREEN, use_color)
            } else {
                paint(&format!("{}\u{00b7}", day), Color::DIM, use_color)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap text to `width` columns with a prefix on every line
pub fn wrap_lines(text: &str, prefix: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(format!("{}{}", prefix, current));
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(format!("{}{}", prefix, current));
    }

    lines
}
