//! Host-provided modal input: an on-screen keyboard and a value picker.
//!
//! Both are synchronous from the caller's point of view: the list item that
//! opens one gets the outcome back as the return value.

use bitflags::bitflags;

bitflags! {
    /// Keys the on-screen keyboard should refuse.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyboardKeys: u32 {
        const SPACE = 1 << 1;
        const AT = 1 << 2;
        const PERCENT = 1 << 3;
        const FORWARD_SLASH = 1 << 4;
        const BACKSLASH = 1 << 5;
        const NUMBERS = 1 << 6;
        const DOWNLOAD_CODE = 1 << 7;
        const USERNAME = 1 << 8;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInputRequest {
    pub header: String,
    pub sub_text: String,
    pub max_length: usize,
    pub initial: String,
    pub disabled_keys: KeyboardKeys,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumberInputRequest {
    pub header: String,
    pub max_length: usize,
    pub initial: String,
    /// Extra keys beside the digits; empty for none.
    pub left_button: String,
    pub right_button: String,
}

pub trait InputOverlay {
    /// `None` when the user cancelled.
    fn open_for_text(&mut self, request: &TextInputRequest) -> Option<String>;
    /// `None` when the user cancelled.
    fn open_for_number(&mut self, request: &NumberInputRequest) -> Option<i64>;
}

pub trait ValuePicker {
    /// Shows `values` with `selected` pre-highlighted. Returns the picked
    /// index, or `None` when dismissed. Hosts may return indices outside
    /// `values`; callers must ignore those.
    fn pick(&mut self, title: &str, values: &[String], selected: Option<usize>) -> Option<i32>;
}
