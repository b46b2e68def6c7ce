use std::cell::RefCell;
use std::rc::Rc;

use sucrose::api::{
    Chart, ChartConfig, ChartEvent, ChartKind, ChartState, EventKind, RenderOutcome,
};
use sucrose::axis::{Direction, LabelStrategy};
use sucrose::core::{ChartData, Series, SeriesValue, Viewport};
use sucrose::render::{MonospaceTextMeasurer, NullRenderer, PrimitiveRole, SvgRenderer};

fn regional_sales() -> ChartData {
    let categories = ["Alpha", "Bravo", "Charlie", "Delta", "Echo"];
    let series = |key: &str, scale: f64| {
        Series::new(
            key,
            categories
                .iter()
                .enumerate()
                .map(|(i, c)| SeriesValue::new(*c, (i as f64 + 1.0) * scale))
                .collect(),
        )
    };
    ChartData::new(vec![series("North", 12.0), series("South", 7.5)]).with_title("Sales")
}

fn bar_chart(viewport: Viewport) -> Chart<NullRenderer> {
    let mut chart = Chart::new(
        NullRenderer::default(),
        ChartKind::Bar,
        ChartConfig::new(viewport),
    )
    .and_then(|chart| chart.with_data(regional_sales()))
    .expect("chart");
    chart.set_measurer(MonospaceTextMeasurer::new(7.0, 14.0));
    chart
}

#[test]
fn five_short_categories_settle_within_a_pixel() {
    let mut chart = bar_chart(Viewport::new(640, 400));
    assert_eq!(chart.render().expect("render"), RenderOutcome::Rendered);

    let report = chart.last_report().expect("report");
    assert_eq!(report.passes.len(), ChartKind::Bar.layout_passes());
    assert!(report.is_stable(1.0), "passes: {:?}", report.passes);
    assert_eq!(report.x_strategy, Some(LabelStrategy::None));
    assert!(report.inner_margin.left > 0.0);
    assert!(report.inner_margin.bottom > 0.0);
}

#[test]
fn every_pass_is_recorded_for_overridden_pass_count() {
    let config = ChartConfig::new(Viewport::new(640, 400)).with_layout_passes(5);
    let mut chart = Chart::new(NullRenderer::default(), ChartKind::Line, config)
        .and_then(|chart| chart.with_data(regional_sales()))
        .expect("chart");
    chart.render().expect("render");
    let report = chart.last_report().expect("report");
    assert_eq!(report.passes.len(), 5);
    assert!(report.passes.iter().enumerate().all(|(i, p)| p.pass == i));
}

#[test]
fn rerender_with_identical_input_is_idempotent() {
    let mut chart = bar_chart(Viewport::new(640, 400));
    chart.render().expect("first render");
    let first_frame = chart.renderer().last_frame.clone().expect("frame");
    let first_report = chart.last_report().cloned().expect("report");

    chart.render().expect("second render");
    let second_frame = chart.renderer().last_frame.clone().expect("frame");
    assert_eq!(first_frame, second_frame);
    assert_eq!(Some(&first_report), chart.last_report());
    assert!(chart.last_diff().is_noop());
    assert_eq!(chart.last_diff().update, vec!["North", "South"]);
}

#[test]
fn crowded_axis_rotates_and_thickens_bottom_margin() {
    let data = ChartData::new(vec![Series::new(
        "Revenue",
        [
            "January", "February", "March", "April", "May", "June", "July",
        ]
        .iter()
        .enumerate()
        .map(|(i, month)| SeriesValue::new(*month, 10.0 + i as f64))
        .collect(),
    )]);
    let mut roomy = Chart::new(
        NullRenderer::default(),
        ChartKind::Bar,
        ChartConfig::new(Viewport::new(900, 400)),
    )
    .and_then(|chart| chart.with_data(data.clone()))
    .expect("roomy");
    let mut narrow = Chart::new(
        NullRenderer::default(),
        ChartKind::Bar,
        ChartConfig::new(Viewport::new(300, 400)),
    )
    .and_then(|chart| chart.with_data(data))
    .expect("narrow");
    roomy.set_measurer(MonospaceTextMeasurer::new(8.0, 14.0));
    narrow.set_measurer(MonospaceTextMeasurer::new(8.0, 14.0));

    roomy.render().expect("roomy render");
    narrow.render().expect("narrow render");
    let roomy = roomy.last_report().expect("roomy report");
    let narrow = narrow.last_report().expect("narrow report");

    assert_eq!(roomy.x_strategy, Some(LabelStrategy::None));
    assert_eq!(narrow.x_strategy, Some(LabelStrategy::Rotate { angle_deg: 30.0 }));
    assert!(narrow.inner_margin.bottom > roomy.inner_margin.bottom);
}

#[test]
fn empty_and_all_zero_data_render_no_data_message() {
    let mut chart = Chart::new(
        NullRenderer::default(),
        ChartKind::Bar,
        ChartConfig::new(Viewport::new(400, 300)),
    )
    .expect("chart");
    assert_eq!(chart.render().expect("render"), RenderOutcome::NoData);
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    let message: Vec<_> = frame.texts_with_role(PrimitiveRole::Message).collect();
    assert_eq!(message.len(), 1);
    assert_eq!(message[0].text(), "No Data Available");

    chart
        .set_data(ChartData::new(vec![Series::new(
            "Flat",
            vec![SeriesValue::new("Q1", 0.0), SeriesValue::new("Q2", 0.0)],
        )]))
        .expect("data");
    assert_eq!(chart.render().expect("render"), RenderOutcome::NoData);
    assert_eq!(chart.last_outcome(), Some(RenderOutcome::NoData));
}

#[test]
fn short_viewport_reports_insufficient_space() {
    let mut chart = bar_chart(Viewport::new(640, 140));
    assert_eq!(chart.render().expect("render"), RenderOutcome::InsufficientSpace);
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert!(
        frame
            .texts_with_role(PrimitiveRole::Message)
            .any(|text| text.text() == "Chart cannot be displayed")
    );
    assert_eq!(frame.texts_with_role(PrimitiveRole::TickLabel).count(), 0);
}

#[test]
fn toggling_series_emits_state_and_exits_key() {
    let mut chart = bar_chart(Viewport::new(640, 400));
    let states = Rc::new(RefCell::new(Vec::<ChartState>::new()));
    let sink = Rc::clone(&states);
    chart.on(EventKind::StateChange, move |event| {
        if let ChartEvent::StateChange { state } = event {
            sink.borrow_mut().push(state.clone());
        }
    });

    chart.render().expect("first render");
    chart.toggle_series(1).expect("toggle");
    chart.render().expect("second render");

    let states = states.borrow();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].disabled, vec![false, true]);
    assert_eq!(chart.last_diff().exit, vec!["South"]);
    assert!(chart.toggle_series(7).is_err());
}

#[test]
fn change_state_applies_persisted_json() {
    let mut chart = bar_chart(Viewport::new(640, 400));
    let state = ChartState::from_json_str(r#"{"disabled":[true,false],"stacked":true}"#)
        .expect("state json");
    let handled = chart.dispatch(ChartEvent::ChangeState { state });
    assert_eq!(handled, 0);

    let current = chart.state();
    assert_eq!(current.disabled, vec![true, false]);
    assert_eq!(current.stacked, Some(true));
    assert!(chart.config().stacked);

    let json = current.to_json_string().expect("serialize");
    assert_eq!(ChartState::from_json_str(&json).expect("round trip"), current);
}

#[test]
fn svg_output_carries_axes_legend_and_rtl_direction() {
    let config = ChartConfig::new(Viewport::new(640, 400)).with_direction(Direction::Rtl);
    let mut chart = Chart::new(SvgRenderer::new(), ChartKind::Bar, config)
        .and_then(|chart| chart.with_data(regional_sales()))
        .expect("chart");
    chart.render().expect("render");

    let svg = chart.renderer().svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"class="sc-tick-label""#));
    assert!(svg.contains(r#"class="sc-legend""#));
    assert!(svg.contains(r#"class="sc-title""#));
    assert!(svg.contains(r#"direction="rtl""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn unknown_kind_tag_is_rejected() {
    let err = Chart::from_tag(NullRenderer::default(), "sparkline", ChartConfig::default());
    assert!(err.is_err());
    let chart = Chart::from_tag(NullRenderer::default(), "multibar", ChartConfig::default())
        .expect("alias");
    assert_eq!(chart.kind(), ChartKind::Bar);
}

#[test]
fn labelled_groups_draw_bars_matched_by_group_id() {
    let data = ChartData::from_json_str(
        r#"{
            "properties": {"groups": [{"group": 1, "label": "Q1"}, {"group": 2, "label": "Q2"}]},
            "data": [
                {"key": "North", "values": [{"x": 1, "y": 30}, {"x": 2, "y": 20}]},
                {"key": "South", "values": [{"x": 1, "y": 50}, {"x": 2, "y": 10}]}
            ]
        }"#,
    )
    .expect("data");
    let config = ChartConfig::new(Viewport::new(640, 400)).with_stacked(true);
    let mut chart = Chart::new(NullRenderer::default(), ChartKind::Bar, config)
        .and_then(|chart| chart.with_data(data))
        .expect("chart");
    chart.set_measurer(MonospaceTextMeasurer::new(7.0, 14.0));
    assert_eq!(chart.render().expect("render"), RenderOutcome::Rendered);

    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    let bars = frame
        .rects
        .iter()
        .filter(|rect| rect.role == PrimitiveRole::Series)
        .count();
    assert_eq!(bars, 4);

    let labels: Vec<String> = frame
        .texts_with_role(PrimitiveRole::TickLabel)
        .map(|text| text.text())
        .collect();
    assert!(labels.iter().any(|label| label == "Q1"));
    assert!(labels.iter().any(|label| label == "Q2"));
    assert!(labels.iter().any(|label| label == "80"), "y ticks: {labels:?}");
}
