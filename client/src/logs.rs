//! Console output for the pipeline stages. Progress goes to stdout, problems to stderr so a
//! caller can pipe the signature and explorer link on their own.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};

#[derive(strum_macros::Display, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE")]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sink {
    Stdout,
    Stderr,
}

impl Level {
    fn color(self) -> LogColor {
        match self {
            Self::Info => LogColor::Info,
            Self::Success => LogColor::Highlight,
            Self::Warning => LogColor::Warning,
            Self::Error => LogColor::Error,
        }
    }

    fn sink(self) -> Sink {
        match self {
            Self::Info | Self::Success => Sink::Stdout,
            Self::Warning | Self::Error => Sink::Stderr,
        }
    }
}

fn format_line(level: Level, label: impl Display, msg: impl Display) -> String {
    format!(
        "[{}] {} {}",
        level.to_string().color(level.color()),
        label.to_string().color(LogColor::Label),
        msg.to_string().bright_black()
    )
}

fn emit(level: Level, label: impl Display, msg: impl Display) {
    let line = format_line(level, label, msg);
    match level.sink() {
        Sink::Stdout => println!("{line}"),
        Sink::Stderr => eprintln!("{line}"),
    }
}

#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Highlight,
    Label,
    Error,
    Warning,
    Info,
    Gray,
}

#[rustfmt::skip]
mod unformatted {
    use super::*;

    pub fn log_info(label: impl Display, msg: impl Display) { emit(Level::Info, label, msg) }
    pub fn log_success(label: impl Display, msg: impl Display) { emit(Level::Success, label, msg) }
    pub fn log_warning(label: impl Display, msg: impl Display) { emit(Level::Warning, label, msg) }
    pub fn log_error(label: impl Display, msg: impl Display) { emit(Level::Error, label, msg) }
    pub fn log_divider() { println!("--------------------------------------------------------------------------------"); }

    impl From<LogColor> for Color {
        fn from(value: LogColor) -> Color {
            match value {
                LogColor::Highlight => Color::TrueColor { r: 255, g: 215, b: 87  },
                LogColor::Label     => Color::TrueColor { r: 40,  g: 100, b: 153 },
                LogColor::Error     => Color::TrueColor { r: 255, g: 0,   b: 45  },
                LogColor::Warning   => Color::TrueColor { r: 180, g: 105, b: 0   },
                LogColor::Info      => Color::TrueColor { r: 0,   g: 95,  b: 255 },
                LogColor::Gray      => Color::TrueColor { r: 192, g: 192, b: 192 },
            }
        }
    }
}

pub use unformatted::*;
