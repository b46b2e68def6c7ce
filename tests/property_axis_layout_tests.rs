use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use sucrose::axis::{AxisConfig, AxisLayout, LabelStrategy, has_collision};
use sucrose::core::Scale;
use sucrose::render::MonospaceTextMeasurer;

fn label_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,9}( [a-z]{1,9}){0,2}", 2..12)
}

fn check_resolved(layout: &AxisLayout, config: &AxisConfig) -> Result<(), TestCaseError> {
    match layout.strategy {
        LabelStrategy::Rotate { angle_deg } => {
            prop_assert_eq!(angle_deg, 30.0);
            prop_assert!(layout.labels.iter().all(|label| label.offset == 0.0));
        }
        LabelStrategy::Stagger { .. } => {
            prop_assert!(config.stagger_ticks);
            prop_assert!(!has_collision(&layout.dimensions, 2, config.label_gap));
        }
        LabelStrategy::Wrap => {
            prop_assert!(config.wrap_ticks);
            prop_assert!(!has_collision(&layout.dimensions, 1, config.label_gap));
        }
        LabelStrategy::None => {
            prop_assert!(!has_collision(&layout.dimensions, 1, config.label_gap));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn resolved_labels_never_overlap_unless_rotated(
        labels in label_strategy(),
        width in 60.0f64..900.0,
        wrap in any::<bool>(),
        stagger in any::<bool>(),
        char_width in 4.0f64..10.0
    ) {
        let measurer = MonospaceTextMeasurer::new(char_width, 14.0);
        let scale = Scale::band(labels, (0.0, width)).expect("band scale");
        let config = AxisConfig::bottom()
            .with_wrap_ticks(wrap)
            .with_stagger_ticks(stagger);
        let layout = AxisLayout::compute(&config, &scale, &measurer).expect("layout");
        check_resolved(&layout, &config)?;
    }

    #[test]
    fn continuous_bottom_axis_never_overlaps_unless_rotated(
        max in 1.0f64..5_000_000.0,
        width in 60.0f64..900.0,
        tick_count in 2usize..16,
        wrap in any::<bool>(),
        stagger in any::<bool>(),
        show_max_min in any::<bool>(),
        char_width in 4.0f64..10.0
    ) {
        let measurer = MonospaceTextMeasurer::new(char_width, 14.0);
        let scale = Scale::linear((0.0, max), (0.0, width)).expect("linear scale");
        let config = AxisConfig::bottom()
            .with_tick_count(tick_count)
            .with_wrap_ticks(wrap)
            .with_stagger_ticks(stagger)
            .with_show_max_min(show_max_min)
            .with_value_formatter(|value, _| format!("{} units", value.default_label()));
        let layout = AxisLayout::compute(&config, &scale, &measurer).expect("layout");
        check_resolved(&layout, &config)?;
        if show_max_min {
            prop_assert_eq!(layout.end_labels.len(), 2);
            prop_assert!(layout.end_labels.iter().all(|label| label.opacity == 1.0));
        }
    }

    #[test]
    fn time_axis_never_overlaps_unless_rotated(
        days in 1.0f64..2_000.0,
        width in 60.0f64..900.0,
        stagger in any::<bool>()
    ) {
        let start = 1_600_000_000_000.0;
        let scale = Scale::time((start, start + days * 86_400_000.0), (0.0, width))
            .expect("time scale");
        let config = AxisConfig::bottom().with_stagger_ticks(stagger).with_tick_count(8);
        let layout = AxisLayout::compute(&config, &scale, &MonospaceTextMeasurer::default())
            .expect("layout");
        check_resolved(&layout, &config)?;
    }

    #[test]
    fn axis_layout_is_deterministic(
        labels in label_strategy(),
        width in 60.0f64..900.0
    ) {
        let measurer = MonospaceTextMeasurer::default();
        let scale = Scale::band(labels, (0.0, width)).expect("band scale");
        let config = AxisConfig::bottom().with_wrap_ticks(true).with_stagger_ticks(true);
        let first = AxisLayout::compute(&config, &scale, &measurer).expect("first");
        let second = AxisLayout::compute(&config, &scale, &measurer).expect("second");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn thickness_covers_every_visible_label(
        max in 1.0f64..5_000_000.0,
        height in 80.0f64..600.0
    ) {
        let measurer = MonospaceTextMeasurer::default();
        let scale = Scale::linear((0.0, max), (height, 0.0)).expect("linear scale");
        let config = AxisConfig::left().with_show_max_min(true);
        let layout = AxisLayout::compute(&config, &scale, &measurer).expect("layout");
        let base = config.tick_size + config.tick_padding;
        for label in layout.visible_labels().chain(layout.end_labels.iter()) {
            prop_assert!(base + label.width() <= layout.margin.left + 1e-9);
        }
    }
}
