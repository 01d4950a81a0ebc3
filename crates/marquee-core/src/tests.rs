#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::animation::{self, AnimTag, Animated, Easing, Tween};
    use crate::focus;
    use crate::view::{ViewAnimation, ViewBase};
    use crate::{Color, Rect, Style, Theme, Vec2};
    use web_time::Duration;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::parse_hex("#12"), None);
    }

    #[test]
    fn test_color_mul_alpha() {
        assert_eq!(Color(10, 20, 30, 200).mul_alpha(0.5), Color(10, 20, 30, 100));
        assert_eq!(Color::WHITE.mul_alpha(2.0), Color::WHITE);
        assert_eq!(Color::WHITE.mul_alpha(0.0).3, 0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_tween_linear_progress() {
        let v = Animated::new(0.0);
        animation::push(Tween::new(&v, 10.0, ms(1000)).easing(Easing::Linear));

        assert!(animation::advance(ms(250)));
        assert!((v.get() - 2.5).abs() < 0.01);

        assert!(!animation::advance(ms(750)));
        assert!((v.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_kill_by_tag_skips_completion() {
        let v = Animated::new(0.0);
        let completed = Rc::new(Cell::new(false));
        let c = completed.clone();
        animation::push(Tween::new(&v, 1.0, ms(100)).on_complete(move || c.set(true)));

        animation::advance(ms(50));
        assert_eq!(animation::kill_by_tag(v.tag()), 1);
        animation::advance(ms(100));

        assert!(!completed.get());
        assert!(!v.is_animating());
        assert!((v.get() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_timer_completion_can_schedule_more() {
        let tag = AnimTag::next();
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        animation::start_timer(tag, ms(100), move || {
            l.borrow_mut().push("first");
            let l2 = l.clone();
            animation::start_timer(tag, ms(100), move || l2.borrow_mut().push("second"));
        });

        animation::advance(ms(100));
        assert_eq!(*log.borrow(), vec!["first"]);
        assert!(animation::is_running(tag));

        animation::advance(ms(100));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_dropping_animated_cancels_its_tweens() {
        let v = Animated::new(0.0);
        let tag = v.tag();
        animation::push(Tween::new(&v, 1.0, ms(100)));
        assert!(animation::is_running(tag));
        drop(v);
        assert!(!animation::is_running(tag));
    }

    #[test]
    fn test_on_tick_reports_values() {
        let v = Animated::new(0.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        animation::push(
            Tween::new(&v, 4.0, ms(100))
                .easing(Easing::Linear)
                .on_tick(move |x| s.borrow_mut().push(x)),
        );
        animation::advance(ms(50));
        animation::advance(ms(50));
        assert_eq!(*seen.borrow(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_easing_endpoints() {
        for e in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(e.interpolate(0.0), 0.0);
            assert_eq!(e.interpolate(1.0), 1.0);
        }
        assert_eq!(Easing::EaseInOut.interpolate(0.5), 0.5);
    }

    #[test]
    fn test_focus_listeners_and_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let sub = focus::subscribe(move |v| s.borrow_mut().push(v));

        focus::set_focus(Some(7));
        assert_eq!(focus::focused(), Some(7));
        drop(sub);
        focus::set_focus(Some(8));

        assert_eq!(*seen.borrow(), vec![Some(7)]);
        assert_eq!(focus::listener_count(), 0);
    }

    #[test]
    fn test_show_hide_fade() {
        let base = ViewBase::new();
        let hidden_done = Rc::new(Cell::new(false));
        let h = hidden_done.clone();
        base.hide(Box::new(move || h.set(true)), true, ViewAnimation::Fade);

        assert!(base.is_fading());
        assert!(!base.is_hidden());
        animation::advance(ms(250));
        assert!(base.is_hidden());
        assert!(hidden_done.get());
        assert_eq!(base.alpha(), 0.0);

        base.show(Box::new(|| {}), false, ViewAnimation::Fade);
        assert!(!base.is_hidden());
        assert_eq!(base.alpha(), 1.0);
    }

    #[test]
    fn test_slide_uses_shorter_duration() {
        let base = ViewBase::new();
        base.show(Box::new(|| {}), true, ViewAnimation::SlideLeft);
        assert_eq!(base.alpha(), 0.0);
        animation::advance(ms(125));
        assert_eq!(base.alpha(), 1.0);
        assert!(!base.is_fading());
    }

    #[test]
    fn test_collapse_marks_layout_needed() {
        let mut base = ViewBase::new();
        base.mark_laid_out();
        assert!(!base.needs_layout());

        base.collapse(true);
        assert!(base.needs_layout());
        animation::advance(ms(100));
        assert_eq!(base.collapse_state(), 0.0);
        assert!(base.is_collapsed());
        assert!(!base.needs_layout());
    }

    #[test]
    fn test_style_partial_json_keeps_defaults() {
        let style = Style::from_json(r#"{ "label": { "list_item_font_size": 30 } }"#).unwrap();
        assert_eq!(style.label.list_item_font_size, 30);
        assert_eq!(style.label.regular_font_size, 20);
        assert_eq!(style.lookup("applet_frame.footer_height").unwrap(), 73.0);
        assert!(style.lookup("applet_frame.nope").is_err());
        assert!(style.lookup("list.item").is_err());
    }

    #[test]
    fn test_theme_json_colors() {
        let theme = Theme::from_json(r##"{ "text": "#102030" }"##).unwrap();
        assert_eq!(theme.text, Color(0x10, 0x20, 0x30, 255));
        assert_eq!(theme.description, Theme::dark().description);
        assert!(Theme::from_json(r#"{ "text": "blue" }"#).is_err());
    }
}
