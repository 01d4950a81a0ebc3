use serde::{Deserialize, Serialize};

use crate::Color;
use crate::error::ConfigError;

/// Color scheme. Views read it at draw time, so switching theme between frames
/// repaints everything without relayout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub description: Color,
    pub notification_text: Color,
    pub separator: Color,

    pub list_item_separator: Color,
    pub list_item_value: Color,
    pub list_item_faint_value: Color,

    pub table_even_background: Color,
    pub table_body_text: Color,

    pub spinner_bar: Color,
    pub header_rectangle: Color,
    pub scrollbar_thumb: Color,

    pub button_primary_enabled_text: Color,
    pub button_primary_disabled_text: Color,
    pub button_bordered_text: Color,
    pub button_regular_text: Color,
    pub dialog_button: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::from_rgb(235, 235, 235),
            text: Color::from_rgb(45, 45, 45),
            description: Color::from_rgb(140, 140, 140),
            notification_text: Color::from_rgb(255, 255, 255),
            separator: Color::from_rgb(45, 45, 45),
            list_item_separator: Color::from_rgb(207, 207, 207),
            list_item_value: Color::from_rgb(43, 81, 226),
            list_item_faint_value: Color::from_rgb(181, 184, 191),
            table_even_background: Color::from_rgb(240, 240, 240),
            table_body_text: Color::from_rgb(131, 131, 131),
            spinner_bar: Color::from_rgba(131, 131, 131, 102),
            header_rectangle: Color::from_rgb(127, 127, 127),
            scrollbar_thumb: Color::from_rgba(45, 45, 45, 140),
            button_primary_enabled_text: Color::from_rgb(255, 255, 255),
            button_primary_disabled_text: Color::from_rgb(140, 140, 140),
            button_bordered_text: Color::from_rgb(45, 45, 45),
            button_regular_text: Color::from_rgb(45, 45, 45),
            dialog_button: Color::from_rgb(50, 80, 240),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb(45, 45, 45),
            text: Color::from_rgb(255, 255, 255),
            description: Color::from_rgb(163, 163, 163),
            notification_text: Color::from_rgb(255, 255, 255),
            separator: Color::from_rgb(255, 255, 255),
            list_item_separator: Color::from_rgb(78, 78, 78),
            list_item_value: Color::from_rgb(88, 195, 169),
            list_item_faint_value: Color::from_rgb(93, 103, 105),
            table_even_background: Color::from_rgb(57, 58, 60),
            table_body_text: Color::from_rgb(155, 157, 156),
            spinner_bar: Color::from_rgba(131, 131, 131, 102),
            header_rectangle: Color::from_rgb(160, 160, 160),
            scrollbar_thumb: Color::from_rgba(221, 221, 221, 140),
            button_primary_enabled_text: Color::from_rgb(52, 41, 81),
            button_primary_disabled_text: Color::from_rgb(61, 61, 61),
            button_bordered_text: Color::from_rgb(255, 255, 255),
            button_regular_text: Color::from_rgb(255, 255, 255),
            dialog_button: Color::from_rgb(0, 255, 204),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "theme",
            source,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
