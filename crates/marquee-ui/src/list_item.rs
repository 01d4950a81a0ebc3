//! List rows.
//!
//! [`ListItem`] is the plain row: label, optional value on the right,
//! optional sub-label, description under the row, thumbnail and a checked
//! marker. The specialised rows wrap a `ListItem` and add click behavior.

use std::f32::consts::FRAC_PI_4;

use marquee_core::{
    Color, DrawCtx, InputOverlay, KeyboardKeys, LayoutCtx, LayoutRole, NumberInputRequest, Path,
    Rect, TextInputRequest, Vec2, View, ViewBase, ViewId, ValuePicker,
};
use marquee_text::{HAlign, VAlign};

use crate::apportion::{RowInputs, RowSpace, apportion};
use crate::label::{Label, LabelAnimation, LabelStyle};
use crate::rectangle::Rectangle;

pub type ClickListener = Box<dyn FnMut(ViewId)>;

/// The value label currently shown and the one it replaced, kept for the
/// crossfade.
struct ValuePair {
    current: Label,
    previous: Label,
}

pub struct ListItem {
    base: ViewBase,
    label: Label,
    sub_label: Option<Label>,
    description: Option<Label>,
    value: Option<ValuePair>,
    thumbnail: Option<Box<dyn View>>,
    checked: bool,
    indented: bool,
    reduce_description_spacing: bool,
    draw_top_separator: bool,
    click_listeners: Vec<ClickListener>,
    space: RowSpace,
}

impl ListItem {
    pub fn new(label: impl Into<String>) -> Self {
        let base = ViewBase::new();
        let id = base.id();
        let mut label = Label::new(LabelStyle::ListItem, label, false);
        label.set_parent(Some(id));
        Self {
            base,
            label,
            sub_label: None,
            description: None,
            value: None,
            thumbnail: None,
            checked: false,
            indented: false,
            reduce_description_spacing: false,
            draw_top_separator: true,
            click_listeners: Vec::new(),
            space: RowSpace::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    pub fn with_sub_label(mut self, sub_label: impl Into<String>) -> Self {
        self.set_sub_label(sub_label);
        self
    }

    fn child_label(&self, style: LabelStyle, text: String, multiline: bool) -> Label {
        let mut label = Label::new(style, text, multiline);
        label.set_parent(Some(self.base.id()));
        label
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
        self.base.invalidate();
    }

    /// An empty description removes it.
    pub fn set_description(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.description = if text.is_empty() {
            None
        } else {
            Some(self.child_label(LabelStyle::Description, text, true))
        };
        self.base.invalidate();
    }

    pub fn description(&self) -> Option<&Label> {
        self.description.as_ref()
    }

    pub fn set_sub_label(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.sub_label.as_mut() {
            Some(sub) => sub.set_text(text),
            None => {
                let mut sub = self.child_label(LabelStyle::Description, text, false);
                sub.set_vertical_align(VAlign::Top);
                self.sub_label = Some(sub);
            }
        }
        self.base.invalidate();
    }

    pub fn sub_label(&self) -> Option<&Label> {
        self.sub_label.as_ref()
    }

    fn has_sub_label(&self) -> bool {
        self.sub_label.as_ref().is_some_and(|s| !s.text().is_empty())
    }

    /// Sets the right-hand value. With `animate`, the previous value fades out
    /// while the new one fades in; the first value never animates.
    pub fn set_value(&mut self, value: impl Into<String>, faint: bool, animate: bool) {
        let value = value.into();
        let style = if faint {
            LabelStyle::ListItemValueFaint
        } else {
            LabelStyle::ListItemValue
        };

        match self.value.as_mut() {
            None => {
                let mut current = self.child_label(style, value, false);
                current.set_horizontal_align(HAlign::Right);
                let mut previous = self.child_label(style, String::new(), false);
                previous.set_horizontal_align(HAlign::Right);
                self.value = Some(ValuePair { current, previous });
            }
            Some(pair) => {
                let old_text = pair.current.text().to_string();
                let old_style = pair.current.label_style();
                pair.previous.set_text(old_text);
                pair.previous.set_style(old_style);
                pair.previous.reset_ticker_animation();

                pair.current.set_text(value);
                pair.current.set_style(style);
                pair.current.reset_ticker_animation();

                if animate && !pair.previous.text().is_empty() {
                    pair.previous.animate(LabelAnimation::EaseOut);
                    pair.current.animate(LabelAnimation::EaseIn);
                } else {
                    pair.previous.reset_text_animation();
                    pair.current.reset_text_animation();
                }
            }
        }
        self.base.invalidate();
    }

    pub fn value(&self) -> &str {
        self.value.as_ref().map_or("", |v| v.current.text())
    }

    pub fn value_label(&self) -> Option<&Label> {
        self.value.as_ref().map(|v| &v.current)
    }

    pub fn previous_value_label(&self) -> Option<&Label> {
        self.value.as_ref().map(|v| &v.previous)
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        self.base.invalidate();
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_indented(&mut self, indented: bool) {
        self.indented = indented;
        self.base.invalidate();
    }

    pub fn set_reduce_description_spacing(&mut self, reduce: bool) {
        self.reduce_description_spacing = reduce;
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.label.set_font_size(size);
        self.base.invalidate();
    }

    /// Replaces the thumbnail; `None` removes it.
    pub fn set_thumbnail(&mut self, thumbnail: Option<Box<dyn View>>) {
        self.thumbnail = thumbnail.map(|mut t| {
            t.set_parent(Some(self.base.id()));
            t
        });
        self.base.invalidate();
    }

    pub fn draws_top_separator(&self) -> bool {
        self.draw_top_separator
    }

    /// Last computed label/sub-label/value widths.
    pub fn space(&self) -> RowSpace {
        self.space
    }

    pub fn on_click_subscribe(&mut self, listener: impl FnMut(ViewId) + 'static) {
        self.click_listeners.push(Box::new(listener));
    }

    /// Notifies click listeners. Returns whether anyone was listening.
    pub fn on_click(&mut self) -> bool {
        let id = self.base.id();
        for listener in &mut self.click_listeners {
            listener(id);
        }
        !self.click_listeners.is_empty()
    }

    fn row_height(&self, ctx: &LayoutCtx<'_>) -> u32 {
        let item = &ctx.style.list.item;
        if self.has_sub_label() {
            item.height_with_sub_label
        } else {
            item.height
        }
    }

    fn description_indent(&self, ctx: &LayoutCtx<'_>) -> u32 {
        let item = &ctx.style.list.item;
        item.description_indent + if self.indented { item.indent } else { 0 }
    }

    fn description_width(&self, ctx: &LayoutCtx<'_>, width: f32) -> f32 {
        (width - self.description_indent(ctx) as f32 * 2.0).max(0.0)
    }
}

impl View for ListItem {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, width: f32) -> f32 {
        let mut h = self.row_height(ctx) as f32;
        let desc_width = self.description_width(ctx, width);
        if let Some(desc) = self.description.as_mut() {
            h += desc.preferred_height(ctx, desc_width) + ctx.style.list.item.description_spacing as f32;
        }
        h
    }

    fn layout_role(&self) -> LayoutRole {
        LayoutRole::Row {
            has_description: self.description.is_some(),
            reduce_description_spacing: self.reduce_description_spacing,
            collapsed: self.base.is_collapsed(),
        }
    }

    fn set_draw_top_separator(&mut self, draw: bool) {
        self.draw_top_separator = draw;
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        f(&self.label);
        if let Some(sub) = &self.sub_label {
            f(sub);
        }
        if let Some(desc) = &self.description {
            f(desc);
        }
        if let Some(pair) = &self.value {
            f(&pair.current);
            f(&pair.previous);
        }
        if let Some(thumb) = &self.thumbnail {
            f(thumb.as_ref());
        }
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let item = &ctx.style.list.item;
        let rect = self.base.rect();
        let (x, y) = (rect.x, rect.y);
        let width = rect.w.max(0.0) as u32;
        let row_height = self.row_height(ctx);
        let has_sub = self.has_sub_label();

        self.label.measure(ctx);
        if let Some(sub) = self.sub_label.as_mut() {
            sub.measure(ctx);
        }
        if let Some(pair) = self.value.as_mut() {
            pair.current.measure(ctx);
            pair.previous.measure(ctx);
        }

        let thumb_size = row_height.saturating_sub(item.thumbnail_padding * 2);
        let left_padding = if self.thumbnail.is_some() {
            thumb_size + item.thumbnail_padding * 2
        } else {
            item.padding
        };

        let value_width = self
            .value
            .as_ref()
            .filter(|v| !v.current.text().is_empty())
            .map(|v| v.current.text_width() as u32);
        self.space = apportion(&RowInputs {
            width,
            left_padding,
            padding: item.padding,
            select_radius: item.select_radius,
            checked: self.checked,
            label_width: self.label.text_width() as u32,
            sub_label_width: has_sub
                .then(|| self.sub_label.as_ref().map_or(0, |s| s.text_width() as u32)),
            value_width,
        });

        let label_divisor = if has_sub { 3 } else { 2 };
        self.label.set_bounds(Rect::new(
            x + left_padding as f32,
            y + (row_height / label_divisor) as f32,
            self.space.label as f32,
            0.0,
        ));
        self.label.layout(ctx);

        if let Some(pair) = self.value.as_mut() {
            let value_x = x + width as f32 - item.padding as f32;
            let (value_y, align) = if has_sub {
                ((row_height - row_height / 3) as f32, VAlign::Top)
            } else {
                ((row_height / 2) as f32, VAlign::Middle)
            };
            for label in [&mut pair.current, &mut pair.previous] {
                label.set_vertical_align(align);
                label.set_bounds(Rect::new(value_x, y + value_y, self.space.value as f32, 0.0));
                label.layout(ctx);
            }
        }

        if let Some(sub) = self.sub_label.as_mut() {
            sub.set_bounds(Rect::new(
                x + left_padding as f32,
                y + (row_height - row_height / 3) as f32,
                self.space.sub_label as f32,
                0.0,
            ));
            sub.layout(ctx);
        }

        let mut height = row_height as f32;
        let indent = self.description_indent(ctx) as f32;
        let desc_width = self.description_width(ctx, rect.w);
        if let Some(desc) = self.description.as_mut() {
            desc.set_bounds(Rect::new(
                x + indent,
                y + row_height as f32 + item.description_spacing as f32,
                desc_width,
                0.0,
            ));
            desc.layout(ctx);
            height += desc.base().rect().h + item.description_spacing as f32;
        }

        if let Some(thumb) = self.thumbnail.as_mut() {
            let pad = item.thumbnail_padding as f32;
            thumb.set_bounds(Rect::new(x + pad, y + pad, thumb_size as f32, thumb_size as f32));
            thumb.layout(ctx);
        }

        self.base.set_height(height);
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let style = ctx.style;
        let item = &style.list.item;
        let rect = self.base.rect();
        let (mut x, y, mut width) = (rect.x, rect.y, rect.w);
        if self.indented {
            x += item.indent as f32;
            width -= item.indent as f32;
        }
        let row_height = if self.has_sub_label() {
            item.height_with_sub_label
        } else {
            item.height
        } as f32;
        let padding = item.padding as f32;
        let radius = item.select_radius as f32;

        if let Some(desc) = self.description.as_mut() {
            desc.frame(ctx);
        }

        if let Some(pair) = self.value.as_mut() {
            pair.current.frame(ctx);
            if pair.current.text_animation() != 1.0 {
                pair.previous.frame(ctx);
            }
        }

        if self.checked {
            let cx = x + width - radius - padding;
            let cy = y + row_height / 2.0;
            let thickness = (radius * 0.10).round();
            let accent = ctx.a(ctx.theme.list_item_value);
            let mark = ctx.a(ctx.theme.background);

            ctx.canvas.fill(&Path::circle(Vec2::new(cx, cy), radius), accent);

            ctx.canvas.save();
            ctx.canvas.translate(cx, cy);
            ctx.canvas.rotate(-FRAC_PI_4);
            ctx.canvas
                .fill_rect(Rect::new(-(radius * 0.55), 0.0, radius * 1.3, thickness), mark);
            ctx.canvas.restore();

            ctx.canvas.save();
            ctx.canvas.translate(cx - radius * 0.65, cy);
            ctx.canvas.rotate(FRAC_PI_4);
            ctx.canvas
                .fill_rect(Rect::new(0.0, -(thickness / 2.0).floor(), radius * 0.53, thickness), mark);
            ctx.canvas.restore();
        }

        self.label.frame(ctx);
        if let Some(sub) = self.sub_label.as_mut() {
            sub.frame(ctx);
        }
        if let Some(thumb) = self.thumbnail.as_mut() {
            thumb.frame(ctx);
        }

        let separator: Color = ctx.a(ctx.theme.list_item_separator);
        if self.draw_top_separator {
            ctx.canvas.fill_rect(Rect::new(x, y - 1.0, width, 1.0), separator);
        }
        ctx.canvas
            .fill_rect(Rect::new(x, y + 1.0 + row_height, width, 1.0), separator);
    }
}

/// Implements [`View`] for a row wrapper by forwarding to its `ListItem`.
macro_rules! delegate_row {
    ($ty:ty => $($field:ident).+) => {
        impl View for $ty {
            fn base(&self) -> &ViewBase {
                self.$($field).+.base()
            }
            fn base_mut(&mut self) -> &mut ViewBase {
                self.$($field).+.base_mut()
            }
            fn layout(&mut self, ctx: &LayoutCtx<'_>) {
                self.$($field).+.layout(ctx)
            }
            fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
                self.$($field).+.draw(ctx)
            }
            fn set_parent(&mut self, parent: Option<ViewId>) {
                self.$($field).+.set_parent(parent)
            }
            fn set_bounds(&mut self, rect: Rect) {
                self.$($field).+.set_bounds(rect)
            }
            fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, width: f32) -> f32 {
                self.$($field).+.preferred_height(ctx, width)
            }
            fn layout_role(&self) -> LayoutRole {
                self.$($field).+.layout_role()
            }
            fn set_draw_top_separator(&mut self, draw: bool) {
                self.$($field).+.set_draw_top_separator(draw)
            }
            fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
                self.$($field).+.visit_children(f)
            }
        }
    };
}

/// On/off row. Clicking flips the state and swaps the value text.
pub struct ToggleListItem {
    item: ListItem,
    state: bool,
    on_value: String,
    off_value: String,
}

impl ToggleListItem {
    pub fn new(label: impl Into<String>, initial: bool) -> Self {
        Self::with_values(label, initial, "On", "Off")
    }

    pub fn with_values(
        label: impl Into<String>,
        initial: bool,
        on_value: impl Into<String>,
        off_value: impl Into<String>,
    ) -> Self {
        let mut toggle = Self {
            item: ListItem::new(label),
            state: initial,
            on_value: on_value.into(),
            off_value: off_value.into(),
        };
        toggle.update_value();
        toggle
    }

    fn update_value(&mut self) {
        if self.state {
            self.item.set_value(self.on_value.clone(), false, true);
        } else {
            self.item.set_value(self.off_value.clone(), true, true);
        }
    }

    pub fn state(&self) -> bool {
        self.state
    }

    pub fn item(&self) -> &ListItem {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut ListItem {
        &mut self.item
    }

    pub fn on_click(&mut self) -> bool {
        self.state = !self.state;
        self.update_value();
        self.item.on_click();
        true
    }
}

delegate_row!(ToggleListItem => item);

/// Row whose value is edited through the host keyboard.
pub struct InputListItem {
    item: ListItem,
    help_text: String,
    max_input_length: usize,
    disabled_keys: KeyboardKeys,
}

impl InputListItem {
    pub fn new(
        label: impl Into<String>,
        initial: impl Into<String>,
        help_text: impl Into<String>,
        max_input_length: usize,
    ) -> Self {
        let mut item = ListItem::new(label);
        item.set_value(initial, false, false);
        Self {
            item,
            help_text: help_text.into(),
            max_input_length,
            disabled_keys: KeyboardKeys::empty(),
        }
    }

    pub fn with_disabled_keys(mut self, keys: KeyboardKeys) -> Self {
        self.disabled_keys = keys;
        self
    }

    pub fn item(&self) -> &ListItem {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut ListItem {
        &mut self.item
    }

    /// Opens the keyboard prefilled with the current value; a confirmed entry
    /// becomes the new value.
    pub fn on_click(&mut self, overlay: &mut dyn InputOverlay) -> bool {
        let request = TextInputRequest {
            header: self.help_text.clone(),
            sub_text: String::new(),
            max_length: self.max_input_length,
            initial: self.item.value().to_string(),
            disabled_keys: self.disabled_keys,
        };
        if let Some(text) = overlay.open_for_text(&request) {
            self.item.set_value(text, false, true);
        }
        self.item.on_click();
        true
    }
}

delegate_row!(InputListItem => item);

/// Row whose value is edited through the host numeric keypad.
pub struct IntegerInputListItem {
    input: InputListItem,
}

impl IntegerInputListItem {
    pub fn new(
        label: impl Into<String>,
        initial: i64,
        help_text: impl Into<String>,
        max_input_length: usize,
    ) -> Self {
        Self {
            input: InputListItem::new(label, initial.to_string(), help_text, max_input_length),
        }
    }

    pub fn item(&self) -> &ListItem {
        self.input.item()
    }

    pub fn item_mut(&mut self) -> &mut ListItem {
        self.input.item_mut()
    }

    pub fn on_click(&mut self, overlay: &mut dyn InputOverlay) -> bool {
        let request = NumberInputRequest {
            header: self.input.help_text.clone(),
            max_length: self.input.max_input_length,
            initial: self.input.item.value().to_string(),
            left_button: String::new(),
            right_button: String::new(),
        };
        if let Some(n) = overlay.open_for_number(&request) {
            self.input.item.set_value(n.to_string(), false, true);
        }
        self.input.item.on_click();
        true
    }
}

delegate_row!(IntegerInputListItem => input.item);

/// Row picking one of a fixed set of values through the host picker.
pub struct SelectListItem {
    item: ListItem,
    values: Vec<String>,
    selected: usize,
    on_value_selected: Vec<Box<dyn FnMut(usize)>>,
}

impl SelectListItem {
    /// An out-of-range `selected` falls back to the first value.
    pub fn new(label: impl Into<String>, values: Vec<String>, selected: usize) -> Self {
        let mut select = Self {
            item: ListItem::new(label),
            values,
            selected: 0,
            on_value_selected: Vec::new(),
        };
        let selected = if selected < select.values.len() { selected } else { 0 };
        select.apply_selection(selected);
        select
    }

    fn apply_selection(&mut self, index: usize) {
        self.selected = index;
        let text = self.values.get(index).cloned().unwrap_or_default();
        self.item.set_value(text, false, false);
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn selected_value(&self) -> usize {
        self.selected
    }

    pub fn item(&self) -> &ListItem {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut ListItem {
        &mut self.item
    }

    pub fn on_value_selected(&mut self, listener: impl FnMut(usize) + 'static) {
        self.on_value_selected.push(Box::new(listener));
    }

    /// Out-of-range indices are ignored.
    pub fn set_selected_value(&mut self, index: usize) {
        if index < self.values.len() {
            self.apply_selection(index);
        }
    }

    /// Replaces the choices and selects the first one.
    pub fn update_values(&mut self, values: Vec<String>) {
        self.values = values;
        self.apply_selection(0);
    }

    pub fn on_click(&mut self, picker: &mut dyn ValuePicker) -> bool {
        let title = self.item.label().text().to_string();
        let current = (self.selected < self.values.len()).then_some(self.selected);
        let picked = picker.pick(&title, &self.values, current);
        if let Some(index) = picked.and_then(|i| usize::try_from(i).ok())
            && index < self.values.len()
        {
            self.apply_selection(index);
            for listener in &mut self.on_value_selected {
                listener(index);
            }
        }
        self.item.on_click();
        true
    }
}

delegate_row!(SelectListItem => item);

/// Vertical gap between groups of rows, optionally drawn as a separator line.
pub struct ListItemGroupSpacing {
    rect: Rectangle,
    separator: bool,
}

impl ListItemGroupSpacing {
    pub fn new(separator: bool) -> Self {
        Self {
            rect: Rectangle::new(Color::TRANSPARENT),
            separator,
        }
    }
}

impl View for ListItemGroupSpacing {
    fn base(&self) -> &ViewBase {
        self.rect.base()
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        self.rect.base_mut()
    }

    fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, _width: f32) -> f32 {
        ctx.style.list.group_spacing_height as f32
    }

    fn layout_role(&self) -> LayoutRole {
        LayoutRole::GroupSpacing
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        self.rect.layout(ctx);
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let color = if self.separator {
            ctx.theme.list_item_separator
        } else {
            Color::TRANSPARENT
        };
        self.rect.set_color(color);
        self.rect.draw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelRendering;
    use marquee_core::animation;
    use marquee_core::{Scene, SceneNode, StaticTranslator, Style, Theme};
    use marquee_text::MonospaceMeasurer;
    use web_time::Duration;

    fn lay_out(view: &mut dyn View, rect: Rect) {
        let style = Style::default();
        let measurer = MonospaceMeasurer::default();
        let translator = StaticTranslator::new();
        let ctx = LayoutCtx {
            style: &style,
            measurer: &measurer,
            translator: &translator,
        };
        view.set_bounds(rect);
        view.layout(&ctx);
    }

    fn draw(view: &mut dyn View) -> Scene {
        let style = Style::default();
        let theme = Theme::default();
        let mut scene = Scene::new();
        let mut ctx = DrawCtx::new(&mut scene, &style, &theme);
        view.frame(&mut ctx);
        scene
    }

    struct Keyboard(Option<String>, Option<TextInputRequest>);

    impl InputOverlay for Keyboard {
        fn open_for_text(&mut self, request: &TextInputRequest) -> Option<String> {
            self.1 = Some(request.clone());
            self.0.clone()
        }
        fn open_for_number(&mut self, _request: &NumberInputRequest) -> Option<i64> {
            self.0.as_deref().and_then(|s| s.parse().ok())
        }
    }

    struct Picker(Option<i32>);

    impl ValuePicker for Picker {
        fn pick(&mut self, _title: &str, _values: &[String], _selected: Option<usize>) -> Option<i32> {
            self.0
        }
    }

    #[test]
    fn test_row_positions_label_and_value() {
        let mut item = ListItem::new("Language");
        item.set_value("English", false, false);
        lay_out(&mut item, Rect::new(0.0, 100.0, 600.0, 0.0));

        assert_eq!(item.base().rect().h, 70.0);
        assert_eq!(item.label().base().rect().x, 22.0);
        assert_eq!(item.label().base().rect().y, 135.0);
        // "English" is 7 * 10px at the value size, right-aligned to the padding.
        let value = item.value_label().map(|l| l.base().rect());
        assert_eq!(value.map(|r| r.x), Some(600.0 - 22.0 - 70.0));
        assert_eq!(item.space().value, 70);
    }

    #[test]
    fn test_sub_label_row_is_taller() {
        let mut item = ListItem::new("Title").with_sub_label("Author");
        lay_out(&mut item, Rect::new(0.0, 0.0, 600.0, 0.0));
        assert_eq!(item.base().rect().h, 96.0);
        assert_eq!(item.label().base().rect().y, 32.0);
        assert_eq!(item.sub_label().map(|s| s.base().rect().y), Some(64.0));
    }

    #[test]
    fn test_description_extends_height() {
        let mut item = ListItem::new("Sleep").with_description("Turns the screen off");
        lay_out(&mut item, Rect::new(0.0, 0.0, 600.0, 0.0));
        let line = (16.0_f32 * 1.65).ceil();
        assert_eq!(item.base().rect().h, 70.0 + line + 16.0);
        let desc = item.description().map(|d| d.base().rect());
        assert_eq!(desc.map(|r| (r.x, r.w)), Some((16.0, 600.0 - 32.0)));
    }

    #[test]
    fn test_indented_description() {
        let mut item = ListItem::new("Sleep").with_description("Turns the screen off");
        item.set_indented(true);
        lay_out(&mut item, Rect::new(0.0, 0.0, 600.0, 0.0));
        let desc = item.description().map(|d| d.base().rect());
        assert_eq!(desc.map(|r| r.x), Some(56.0));
    }

    #[test]
    fn test_value_crossfade() {
        let mut item = ListItem::new("Volume");
        item.set_value("Low", false, true);
        assert_eq!(item.value_label().map(Label::text_animation), Some(1.0));

        item.set_value("High", false, true);
        assert_eq!(item.previous_value_label().map(Label::text), Some("Low"));
        assert_eq!(item.value(), "High");
        lay_out(&mut item, Rect::new(0.0, 0.0, 600.0, 0.0));

        animation::advance(Duration::from_millis(50));
        let scene = draw(&mut item);
        let texts: Vec<&str> = scene.texts().collect();
        assert!(texts.contains(&"High") && texts.contains(&"Low"));

        animation::advance(Duration::from_millis(50));
        let scene = draw(&mut item);
        let texts: Vec<&str> = scene.texts().collect();
        insta::assert_snapshot!(texts.join("|"), @"High|Volume");
    }

    #[test]
    fn test_checked_marker_keeps_value_to_a_third() {
        let mut item = ListItem::new("Dark mode");
        item.set_value("On", false, false);
        item.set_checked(true);
        lay_out(&mut item, Rect::new(0.0, 0.0, 600.0, 0.0));
        assert_eq!(item.space().value, 200);
        assert_eq!(
            item.value_label().map(Label::rendering),
            Some(LabelRendering::Plain)
        );

        item.set_value("A much longer value than a third of the row", false, false);
        lay_out(&mut item, Rect::new(0.0, 0.0, 600.0, 0.0));
        assert_eq!(item.space().value, 200);
        assert_eq!(
            item.value_label().map(Label::rendering),
            Some(LabelRendering::Ellipsis)
        );
        assert_eq!(item.value_label().map(Label::box_width), Some(200.0));

        let scene = draw(&mut item);
        let circle = scene.nodes.iter().find_map(|n| match n {
            SceneNode::Fill { path, .. } => path.segments().iter().find_map(|s| match s {
                marquee_core::PathSegment::Circle { center, radius } => Some((*center, *radius)),
                _ => None,
            }),
            _ => None,
        });
        assert_eq!(circle, Some((Vec2::new(600.0 - 15.0 - 22.0, 35.0), 15.0)));
        let rotations = scene
            .nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Rotate { .. }))
            .count();
        assert_eq!(rotations, 2);
    }

    #[test]
    fn test_separators() {
        let mut item = ListItem::new("A");
        lay_out(&mut item, Rect::new(0.0, 10.0, 300.0, 0.0));
        let fills = |scene: &Scene| {
            scene
                .nodes
                .iter()
                .filter_map(|n| match n {
                    SceneNode::Fill { path, .. } => match path.segments() {
                        [marquee_core::PathSegment::Rect(r)] => Some(r.y),
                        _ => None,
                    },
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(fills(&draw(&mut item)), vec![9.0, 81.0]);

        item.set_draw_top_separator(false);
        assert_eq!(fills(&draw(&mut item)), vec![81.0]);
    }

    #[test]
    fn test_toggle_flips_and_styles_value() {
        let mut toggle = ToggleListItem::new("Wi-Fi", true);
        assert_eq!(toggle.item().value(), "On");
        assert!(toggle.on_click());
        assert!(!toggle.state());
        assert_eq!(toggle.item().value(), "Off");
        assert_eq!(
            toggle.item().value_label().map(Label::label_style),
            Some(LabelStyle::ListItemValueFaint)
        );
    }

    #[test]
    fn test_input_item_uses_keyboard_result() {
        let mut input = InputListItem::new("Name", "Ada", "Enter a name", 16)
            .with_disabled_keys(KeyboardKeys::AT | KeyboardKeys::PERCENT);
        let mut kb = Keyboard(Some("Grace".into()), None);
        input.on_click(&mut kb);
        assert_eq!(input.item().value(), "Grace");
        let request = kb.1.unwrap();
        assert_eq!(request.initial, "Ada");
        assert_eq!(request.max_length, 16);
        assert!(request.disabled_keys.contains(KeyboardKeys::AT));

        let mut cancelled = Keyboard(None, None);
        input.on_click(&mut cancelled);
        assert_eq!(input.item().value(), "Grace");
    }

    #[test]
    fn test_integer_input_item() {
        let mut input = IntegerInputListItem::new("Port", 8080, "Port number", 5);
        assert_eq!(input.item().value(), "8080");
        input.on_click(&mut Keyboard(Some("443".into()), None));
        assert_eq!(input.item().value(), "443");
    }

    #[test]
    fn test_select_ignores_out_of_range_pick() {
        let values = vec!["Low".to_string(), "Mid".to_string(), "High".to_string()];
        let mut select = SelectListItem::new("Quality", values, 1);
        assert_eq!(select.item().value(), "Mid");

        select.on_click(&mut Picker(Some(7)));
        assert_eq!(select.selected_value(), 1);
        select.on_click(&mut Picker(Some(-1)));
        assert_eq!(select.selected_value(), 1);

        let picked = std::rc::Rc::new(std::cell::Cell::new(None));
        let p = picked.clone();
        select.on_value_selected(move |i| p.set(Some(i)));
        select.on_click(&mut Picker(Some(2)));
        assert_eq!(select.item().value(), "High");
        assert_eq!(picked.get(), Some(2));
        // A picked value swaps in at once, without a crossfade.
        assert_eq!(select.item().value_label().map(Label::text_animation), Some(1.0));
        assert_eq!(
            select.item().previous_value_label().map(Label::text_animation),
            Some(1.0)
        );

        select.set_selected_value(9);
        assert_eq!(select.selected_value(), 2);

        select.update_values(vec!["A".into(), "B".into()]);
        assert_eq!(select.selected_value(), 0);
        assert_eq!(select.item().value(), "A");
    }

    #[test]
    fn test_click_listeners_receive_row_id() {
        let mut item = ListItem::new("Open");
        assert!(!item.on_click());
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let s = seen.clone();
        item.on_click_subscribe(move |id| s.set(id));
        assert!(item.on_click());
        assert_eq!(seen.get(), item.id());
    }
}
