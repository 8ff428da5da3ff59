//! Default theme

use super::{USER_LINE_GROUP, USER_PATTERN_GROUP};
use crate::syntax::style::{Color, Style};
use crate::syntax::theme::Theme;

const ORANGE: Color = Color::new(0xFF, 0x96, 0x6C);
const BLUE: Color = Color::new(0x65, 0xBC, 0xFF);
const GREY: Color = Color::new(0x63, 0x6D, 0xA6);
const GREEN: Color = Color::new(0xC3, 0xE8, 0x8D);
const CYAN: Color = Color::new(0x89, 0xDD, 0xFF);
const PURPLE: Color = Color::new(0xC0, 0x99, 0xFF);
const SKY: Color = Color::new(0x82, 0xAA, 0xFF);
const RED: Color = Color::new(0xC5, 0x3B, 0x53);
const YELLOW: Color = Color::new(0xFF, 0xC7, 0x77);
const NIGHT: Color = Color::new(0x22, 0x24, 0x36);
const DUSK: Color = Color::new(0x2F, 0x33, 0x4D);

/// Create the default theme
pub fn default_theme() -> Theme {
    let mut theme = Theme::new("default");

    theme.insert(Style::new("Constant").with_fg(ORANGE));
    theme.insert(Style::link("Number", "Constant"));
    theme.insert(Style::link("Float", "Number"));
    theme.insert(Style::link("Boolean", "Constant"));
    theme.insert(Style::new("Special").with_fg(BLUE));
    theme.insert(Style::new("Comment").with_fg(GREY).with_italic());
    theme.insert(Style::new("String").with_fg(GREEN));
    theme.insert(Style::new("Type").with_fg(BLUE));
    theme.insert(Style::link("Structure", "Type"));
    theme.insert(Style::new("Operator").with_fg(CYAN));
    theme.insert(Style::new("Statement").with_fg(PURPLE));
    theme.insert(Style::link("Label", "Statement"));
    theme.insert(Style::link("Exception", "Statement"));
    theme.insert(Style::new("Function").with_fg(SKY));
    theme.insert(Style::new("Underlined").with_underline());
    theme.insert(Style::new("ErrorMsg").with_fg(RED).with_bold());
    theme.insert(Style::new("WarningMsg").with_fg(YELLOW));
    theme.insert(Style::new("Debug").with_fg(ORANGE));
    theme.insert(Style::new("LogGreen").with_fg(GREEN));
    theme.insert(Style::new("LogBlue").with_fg(BLUE));

    theme.insert(
        Style::new(USER_PATTERN_GROUP)
            .with_fg(NIGHT)
            .with_bg(PURPLE)
            .with_bold(),
    );
    theme.insert(Style::new(USER_LINE_GROUP).with_bg(DUSK));

    theme
}
