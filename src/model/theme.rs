//! Theme names and the palettes derived from them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The two themes the application can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeName::Light => light_theme(),
            ThemeName::Dark => dark_theme(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }
}

impl Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// A main/dark/light triple plus the text color drawn on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub main: &'static str,
    pub dark: &'static str,
    pub light: &'static str,
    pub contrast_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub default: &'static str,
    pub paper: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeName,
    pub primary: ColorSet,
    pub secondary: ColorSet,
    pub background: Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typography {
    /// Color applied to every text variant.
    pub color: &'static str,
}

/// Everything a renderer needs to style the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub palette: Palette,
    pub typography: Typography,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        self.name == ThemeName::Dark
    }

    /// Foreground used by the drawer buttons (logout, theme switch).
    pub fn drawer_foreground(&self) -> &'static str {
        if self.is_dark() {
            "#fff"
        } else {
            "#111"
        }
    }
}

mod cyan {
    pub const C300: &str = "#4dd0e1";
    pub const C400: &str = "#26c6da";
    pub const C500: &str = "#00bcd4";
    pub const C700: &str = "#0097a7";
    pub const C800: &str = "#00838f";
}

const PRIMARY: ColorSet = ColorSet {
    main: cyan::C700,
    dark: cyan::C800,
    light: cyan::C500,
    contrast_text: "#fff",
};

const SECONDARY: ColorSet = ColorSet {
    main: cyan::C500,
    dark: cyan::C400,
    light: cyan::C300,
    contrast_text: "#fff",
};

pub fn light_theme() -> Theme {
    Theme {
        name: ThemeName::Light,
        palette: Palette {
            mode: ThemeName::Light,
            primary: PRIMARY,
            secondary: SECONDARY,
            background: Background {
                default: "#f7f6f3",
                paper: "#ffffff",
            },
        },
        typography: Typography { color: "#111" },
    }
}

pub fn dark_theme() -> Theme {
    Theme {
        name: ThemeName::Dark,
        palette: Palette {
            mode: ThemeName::Dark,
            primary: PRIMARY,
            secondary: SECONDARY,
            background: Background {
                default: "#111",
                paper: "#303134",
            },
        },
        typography: Typography { color: "#FFF" },
    }
}
