//! Horizontal space sharing inside a list row.
//!
//! A row holds a main label on the left, optionally a value label on the
//! right and a sub-label under the main label. The value gets up to a third
//! of the row; whatever it does not need goes to the text on its left.

/// Measured text widths and the row geometry, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowInputs {
    pub width: u32,
    /// Left inset of the labels (thumbnail-aware).
    pub left_padding: u32,
    pub padding: u32,
    pub select_radius: u32,
    pub checked: bool,
    pub label_width: u32,
    pub sub_label_width: Option<u32>,
    pub value_width: Option<u32>,
}

/// Widths granted to each label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowSpace {
    pub label: u32,
    pub sub_label: u32,
    pub value: u32,
}

pub fn apportion(row: &RowInputs) -> RowSpace {
    let available = row
        .width
        .saturating_sub(row.left_padding)
        .saturating_sub(row.padding);

    // Room left once the gap between value and text is taken out.
    let remaining = available.saturating_sub(row.padding);
    let share = (row.width / 3).min(remaining);

    // The check mark takes the value's place; a value is still clipped to
    // its share.
    if row.checked {
        return RowSpace {
            label: available
                .saturating_sub(row.select_radius * 2)
                .saturating_sub(row.padding),
            sub_label: 0,
            value: share,
        };
    }

    let Some(value_width) = row.value_width else {
        return RowSpace {
            label: available,
            sub_label: if row.sub_label_width.is_some() { available } else { 0 },
            value: 0,
        };
    };

    if value_width <= share {
        let freed = remaining.saturating_sub(value_width);
        return match row.sub_label_width {
            Some(_) => RowSpace {
                label: available,
                sub_label: freed,
                value: value_width,
            },
            None => RowSpace {
                label: freed,
                sub_label: 0,
                value: value_width,
            },
        };
    }

    // The value wants more than its share; give it whatever the text beside
    // it does not need.
    let rest = remaining - share;
    match row.sub_label_width {
        Some(sub) if sub < rest => RowSpace {
            label: available,
            sub_label: sub,
            value: remaining - sub,
        },
        Some(_) => RowSpace {
            label: available,
            sub_label: rest,
            value: share,
        },
        None if row.label_width < rest => RowSpace {
            label: row.label_width,
            sub_label: 0,
            value: remaining - row.label_width,
        },
        None => RowSpace {
            label: rest,
            sub_label: 0,
            value: share,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(width: u32) -> RowInputs {
        RowInputs {
            width,
            left_padding: 22,
            padding: 22,
            select_radius: 15,
            ..RowInputs::default()
        }
    }

    #[test]
    fn test_label_only_takes_everything() {
        let r = RowInputs {
            label_width: 100,
            ..row(600)
        };
        assert_eq!(
            apportion(&r),
            RowSpace {
                label: 556,
                sub_label: 0,
                value: 0
            }
        );
    }

    #[test]
    fn test_checked_reserves_marker() {
        let r = RowInputs {
            checked: true,
            label_width: 100,
            value_width: Some(50),
            ..row(600)
        };
        assert_eq!(apportion(&r).label, 556 - 30 - 22);
        assert_eq!(apportion(&r).value, 200);
        assert_eq!(apportion(&r).sub_label, 0);
    }

    #[test]
    fn test_value_within_its_third() {
        let r = RowInputs {
            label_width: 100,
            value_width: Some(80),
            ..row(600)
        };
        assert_eq!(
            apportion(&r),
            RowSpace {
                label: 556 - 22 - 80,
                sub_label: 0,
                value: 80
            }
        );
    }

    #[test]
    fn test_wide_value_takes_what_label_leaves() {
        let r = RowInputs {
            label_width: 100,
            value_width: Some(400),
            ..row(600)
        };
        let space = apportion(&r);
        assert_eq!(space.label, 100);
        assert_eq!(space.value, 556 - 100 - 22);
    }

    #[test]
    fn test_wide_value_and_wide_label_split_at_third() {
        let r = RowInputs {
            label_width: 500,
            value_width: Some(400),
            ..row(600)
        };
        let space = apportion(&r);
        assert_eq!(space.value, 200);
        assert_eq!(space.label, 556 - 22 - 200);
    }

    #[test]
    fn test_sub_label_shares_with_value() {
        let fits = RowInputs {
            label_width: 100,
            sub_label_width: Some(120),
            value_width: Some(80),
            ..row(600)
        };
        assert_eq!(
            apportion(&fits),
            RowSpace {
                label: 556,
                sub_label: 556 - 22 - 80,
                value: 80
            }
        );

        let wide = RowInputs {
            sub_label_width: Some(120),
            value_width: Some(400),
            ..fits
        };
        assert_eq!(
            apportion(&wide),
            RowSpace {
                label: 556,
                sub_label: 120,
                value: 556 - 120 - 22
            }
        );

        let crowded = RowInputs {
            sub_label_width: Some(500),
            value_width: Some(400),
            ..fits
        };
        assert_eq!(
            apportion(&crowded),
            RowSpace {
                label: 556,
                sub_label: 556 - 22 - 200,
                value: 200
            }
        );
    }

    #[test]
    fn test_tiny_rows_do_not_underflow() {
        for width in [0, 10, 44, 50, 66, 70] {
            for value in [None, Some(0), Some(30), Some(500)] {
                for sub in [None, Some(5), Some(500)] {
                    for checked in [false, true] {
                        let r = RowInputs {
                            checked,
                            label_width: 40,
                            sub_label_width: sub,
                            value_width: value,
                            ..row(width)
                        };
                        let space = apportion(&r);
                        let available = width.saturating_sub(44);
                        assert!(space.label <= available, "{r:?}");
                        assert!(space.sub_label <= available, "{r:?}");
                        assert!(space.value <= available, "{r:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_text_plus_value_fills_available_width() {
        for width in [300u32, 640, 1280] {
            for label in [0u32, 50, 300, 900] {
                for value in [10u32, 150, 700] {
                    for sub in [None, Some(40), Some(800)] {
                        let r = RowInputs {
                            label_width: label,
                            sub_label_width: sub,
                            value_width: Some(value),
                            ..row(width)
                        };
                        let space = apportion(&r);
                        let available = width - 44;
                        let beside = if sub.is_some() { space.sub_label } else { space.label };
                        assert_eq!(beside + 22 + space.value, available, "{r:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_widths_stay_within_row_for_every_field_combination() {
        for width in [200u32, 640, 1280] {
            for checked in [false, true] {
                for value in [None, Some(30), Some(2000)] {
                    for sub in [None, Some(60), Some(2000)] {
                        let r = RowInputs {
                            checked,
                            label_width: 2000,
                            sub_label_width: sub,
                            value_width: value,
                            ..row(width)
                        };
                        let space = apportion(&r);
                        let available = width - 44;
                        assert!(space.label <= available, "{r:?}");
                        assert!(space.sub_label <= available, "{r:?}");
                        assert!(space.value <= available - 22, "{r:?}");
                        if checked {
                            assert_eq!(space.value, width / 3);
                            assert_eq!(space.sub_label, 0);
                        } else {
                            let beside = if sub.is_some() { space.sub_label } else { space.label };
                            if value.is_some() {
                                assert!(beside + 22 + space.value <= available, "{r:?}");
                            } else {
                                assert_eq!(space.value, 0);
                                assert_eq!(space.label, available);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_apportion_is_idempotent() {
        let r = RowInputs {
            label_width: 300,
            sub_label_width: Some(250),
            value_width: Some(400),
            ..row(640)
        };
        let first = apportion(&r);
        assert_eq!(apportion(&r), first);

        // Feeding the granted widths back in changes nothing.
        let again = RowInputs {
            sub_label_width: Some(first.sub_label),
            value_width: Some(first.value),
            ..r
        };
        assert_eq!(apportion(&again), first);
    }
}
