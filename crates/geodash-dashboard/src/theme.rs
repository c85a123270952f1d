// Theme system for the desktop dashboard
//
// A wrapper div carries the data-theme attribute; colors come from CSS
// variables in assets/style.css.

use dioxus::prelude::*;

/// Available themes
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// CSS data-theme attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark]
    }

    fn from_attr(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Global theme signal
pub static CURRENT_THEME: GlobalSignal<Theme> = Signal::global(Theme::default);

/// Dropdown for theme selection
#[component]
pub fn ThemeSwitcher() -> Element {
    let current_theme = *CURRENT_THEME.read();

    rsx! {
        div { class: "theme-switcher",
            select {
                class: "theme-select",
                value: current_theme.as_str(),
                onchange: move |e| {
                    *CURRENT_THEME.write() = Theme::from_attr(&e.value());
                },
                for theme in Theme::all() {
                    option {
                        value: theme.as_str(),
                        selected: *theme == current_theme,
                        "{theme.display_name()}"
                    }
                }
            }
        }
    }
}

/// Wraps children with the data-theme attribute
#[component]
pub fn ThemedRoot(children: Element) -> Element {
    let theme = *CURRENT_THEME.read();

    rsx! {
        div {
            "data-theme": theme.as_str(),
            class: "themed-root",
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_round_trip() {
        for theme in Theme::all() {
            assert_eq!(Theme::from_attr(theme.as_str()), *theme);
        }
        assert_eq!(Theme::from_attr("unknown"), Theme::Light);
    }
}
