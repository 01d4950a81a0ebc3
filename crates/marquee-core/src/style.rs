//! Named metrics read by layout and drawing.
//!
//! Every group deserializes with defaults, so a host config only has to list
//! the values it overrides:
//!
//! ```rust
//! use marquee_core::Style;
//!
//! let style = Style::from_json(r#"{ "list": { "item": { "padding": 30 } } }"#).unwrap();
//! assert_eq!(style.list.item.padding, 30);
//! assert_eq!(style.list.item.height, 70);
//! assert_eq!(style.lookup("list.item.padding").unwrap(), 30.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub animation_duration: AnimationDurations,
    pub applet_frame: AppletFrameMetrics,
    pub popup_frame: PopupFrameMetrics,
    pub list: ListMetrics,
    pub header: HeaderMetrics,
    pub table: TableMetrics,
    pub label: LabelMetrics,
    pub hint: HintMetrics,
    pub progress_display: ProgressDisplayMetrics,
    pub progress_spinner: ProgressSpinnerMetrics,
}

impl Style {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "style",
            source,
        })
    }

    /// Numeric value of a dotted field path such as `"list.item.padding"`.
    pub fn lookup(&self, path: &str) -> Result<f64, ConfigError> {
        let tree = serde_json::to_value(self).map_err(|source| ConfigError::Parse {
            what: "style",
            source,
        })?;
        let pointer = format!("/{}", path.replace('.', "/"));
        let value = tree
            .pointer(&pointer)
            .ok_or_else(|| ConfigError::UnknownField(path.to_string()))?;
        value
            .as_f64()
            .ok_or_else(|| ConfigError::NotNumeric(path.to_string()))
    }
}

/// Milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDurations {
    pub show: u64,
    pub show_slide: u64,
    pub highlight: u64,
    pub shake: u64,
    pub collapse: u64,
    pub progress: u64,
    pub notification_timeout: u64,
    /// Pause before and between ticker scrolls.
    pub ticker_wait: u64,
    /// Ticker scroll duration per pixel of ticker width.
    pub ticker_ms_per_px: u64,
}

impl Default for AnimationDurations {
    fn default() -> Self {
        Self {
            show: 250,
            show_slide: 125,
            highlight: 100,
            shake: 15,
            collapse: 100,
            progress: 1000,
            notification_timeout: 4000,
            ticker_wait: 1500,
            ticker_ms_per_px: 15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppletFrameMetrics {
    pub header_height_regular: u32,
    pub header_height_popup: u32,
    pub footer_height: u32,
    pub image_left_padding: u32,
    pub image_top_padding: u32,
    pub image_size: u32,
    pub separator_spacing: u32,
    pub title_size: u32,
    pub title_start: u32,
    pub title_offset: u32,
    pub footer_text_size: u32,
    pub footer_text_spacing: u32,
    /// Horizontal travel of a sliding content view, in pixels.
    pub slide_animation: u32,
}

impl Default for AppletFrameMetrics {
    fn default() -> Self {
        Self {
            header_height_regular: 88,
            header_height_popup: 129,
            footer_height: 73,
            image_left_padding: 64,
            image_top_padding: 20,
            image_size: 48,
            separator_spacing: 30,
            title_size: 28,
            title_start: 130,
            title_offset: 5,
            footer_text_size: 22,
            footer_text_spacing: 30,
            slide_animation: 20,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupFrameMetrics {
    pub edge_padding: u32,
    pub image_left_padding: u32,
    pub image_top_padding: u32,
    pub image_size: u32,
    pub header_text_left_padding: u32,
    pub header_text_top_padding: u32,
    pub sub_title_left_padding: u32,
    pub sub_title_top_padding: u32,
    pub sub_title_spacing: u32,
    pub sub_title_separator_top_padding: u32,
    pub sub_title_separator_height: u32,
    pub header_font_size: u32,
    pub sub_title_font_size: u32,
}

impl Default for PopupFrameMetrics {
    fn default() -> Self {
        Self {
            edge_padding: 120,
            image_left_padding: 50,
            image_top_padding: 18,
            image_size: 96,
            header_text_left_padding: 252,
            header_text_top_padding: 62,
            sub_title_left_padding: 252,
            sub_title_top_padding: 94,
            sub_title_spacing: 20,
            sub_title_separator_top_padding: 93,
            sub_title_separator_height: 20,
            header_font_size: 27,
            sub_title_font_size: 16,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMetrics {
    pub margin_left_right: u32,
    pub margin_top_bottom: u32,
    pub spacing: u32,
    pub group_spacing_height: u32,
    pub scrollbar_width: u32,
    pub item: ListItemMetrics,
}

impl Default for ListMetrics {
    fn default() -> Self {
        Self {
            margin_left_right: 40,
            margin_top_bottom: 38,
            spacing: 61,
            group_spacing_height: 1,
            scrollbar_width: 4,
            item: ListItemMetrics::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListItemMetrics {
    pub height: u32,
    pub height_with_sub_label: u32,
    pub value_size: u32,
    pub padding: u32,
    pub thumbnail_padding: u32,
    pub description_indent: u32,
    pub description_spacing: u32,
    pub indent: u32,
    pub select_radius: u32,
}

impl Default for ListItemMetrics {
    fn default() -> Self {
        Self {
            height: 70,
            height_with_sub_label: 96,
            value_size: 20,
            padding: 22,
            thumbnail_padding: 11,
            description_indent: 16,
            description_spacing: 16,
            indent: 40,
            select_radius: 15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderMetrics {
    pub height: u32,
    pub padding: u32,
    pub rectangle_width: u32,
    pub font_size: u32,
}

impl Default for HeaderMetrics {
    fn default() -> Self {
        Self {
            height: 44,
            padding: 11,
            rectangle_width: 5,
            font_size: 18,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableMetrics {
    pub row_height: u32,
    pub padding: u32,
}

impl Default for TableMetrics {
    fn default() -> Self {
        Self {
            row_height: 38,
            padding: 15,
        }
    }
}

/// Font sizes per label style, plus line heights for wrapped labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelMetrics {
    pub regular_font_size: u32,
    pub medium_font_size: u32,
    pub small_font_size: u32,
    pub description_font_size: u32,
    pub crash_font_size: u32,
    pub button_font_size: u32,
    pub list_item_font_size: u32,
    pub notification_font_size: u32,
    pub dialog_font_size: u32,
    pub hint_font_size: u32,
    pub line_height: f32,
    pub notification_line_height: f32,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            regular_font_size: 20,
            medium_font_size: 18,
            small_font_size: 16,
            description_font_size: 16,
            crash_font_size: 24,
            button_font_size: 24,
            list_item_font_size: 24,
            notification_font_size: 18,
            dialog_font_size: 24,
            hint_font_size: 22,
            line_height: 1.65,
            notification_line_height: 1.35,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintMetrics {
    /// Gap between two consecutive hints.
    pub spacing: u32,
}

impl Default for HintMetrics {
    fn default() -> Self {
        Self { spacing: 30 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressDisplayMetrics {
    pub percentage_label_width: u32,
}

impl Default for ProgressDisplayMetrics {
    fn default() -> Self {
        Self {
            percentage_label_width: 70,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSpinnerMetrics {
    pub center_gap_multiplier: f32,
    pub bar_width_multiplier: f32,
}

impl Default for ProgressSpinnerMetrics {
    fn default() -> Self {
        Self {
            center_gap_multiplier: 0.2,
            bar_width_multiplier: 0.06,
        }
    }
}
