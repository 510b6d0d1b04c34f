use trellis_chart::api::{
    RenderContext, TooltipEngine, TooltipField, TooltipMeasureValue, TooltipMetrics,
    TrellisSettings, nearest_line,
};
use trellis_chart::core::{
    AxisSide, CategoryColumn, DataTable, MeasureColumn, TooltipColumn, Viewport,
};

fn context() -> RenderContext {
    let mut table = DataTable::with_numeric_x("Day", vec![0.0, 10.0, 20.0, 0.0, 10.0, 20.0]);
    table.line_by = Some(CategoryColumn::text(
        "Region",
        ["a", "a", "a", "b", "b", "b"],
    ));
    table.left_measures = vec![MeasureColumn::new(
        "Sales",
        vec![
            Some(10.0),
            Some(20.0),
            Some(30.0),
            Some(100.0),
            Some(200.0),
            Some(300.0),
        ],
    )];
    table.tooltips = vec![TooltipColumn::Category(CategoryColumn::text(
        "Owner",
        ["ann", "ann", "ann", "bob", "bob", "bob"],
    ))];
    RenderContext::build(
        3,
        &table,
        &TrellisSettings::default(),
        Viewport::new(800.0, 600.0),
    )
    .expect("context")
}

#[test]
fn pointer_snaps_to_nearest_x_and_line() {
    let context = context();
    let panel = context.panel(0).expect("panel");
    assert_eq!(panel.origin, (60.0, 60.0));
    assert_eq!(panel.size, Viewport::new(725.0, 480.0));

    let engine = TooltipEngine::new(TooltipMetrics::default(), false);
    let pointer = (60.0 + 725.0 * 9.0 / 20.0, 60.0 + 180.0);
    let snapshot = engine
        .snapshot(context.generation, panel, pointer, &context.roles.tooltip_fields)
        .expect("snapshot");

    assert_eq!(snapshot.generation, 3);
    assert!((snapshot.target_x - 9.0).abs() <= 1e-9);
    assert_eq!(snapshot.snapped_x, 10.0);
    assert!((snapshot.snapped_px - 362.5).abs() <= 1e-9);
    assert_eq!(snapshot.x_label, "10");
    assert_eq!(snapshot.line.key, "b");
    assert_eq!(snapshot.line.side, AxisSide::Left);
    assert_eq!(snapshot.measures.len(), 1);
    assert_eq!(snapshot.measures[0].value, Some(200.0));
    assert_eq!(snapshot.measures[0].label, "200");
    assert_eq!(
        snapshot.fields,
        vec![TooltipField {
            name: "Owner".to_owned(),
            value: "bob".to_owned(),
        }]
    );
}

#[test]
fn nearest_line_prefers_smallest_vertical_distance() {
    let context = context();
    let panel = context.panel(0).expect("panel");

    let near_bottom = nearest_line(panel, 20.0, 470.0).expect("line");
    assert_eq!(near_bottom.key, "a");

    let near_top = nearest_line(panel, 20.0, 0.0).expect("line");
    assert_eq!(near_top.key, "b");
    assert!(near_top.distance_px < near_bottom.pixel_y);

    assert!(nearest_line(panel, 5.0, 0.0).is_none());
}

#[test]
fn box_size_counts_rows_and_longest_texts() {
    let engine = TooltipEngine::new(TooltipMetrics::default(), false);
    let measures = vec![TooltipMeasureValue {
        name: "Sales".to_owned(),
        side: AxisSide::Left,
        value: Some(200.0),
        label: "200".to_owned(),
        pixel_y: Some(10.0),
    }];
    let fields = vec![TooltipField {
        name: "Owner".to_owned(),
        value: "bob".to_owned(),
    }];

    let (width, height) = engine.box_size(&measures, &fields);
    assert_eq!(width, 8.0 * 7.0 + 30.0);
    assert_eq!(height, 3.0 * 25.0);

    let by_measure = TooltipEngine::new(TooltipMetrics::default(), true);
    let (_, height) = by_measure.box_size(&measures, &fields);
    assert_eq!(height, 3.0 * 25.0);
    let (_, height) = by_measure.box_size(&measures, &[]);
    assert_eq!(height, 2.0 * 25.0);
}

#[test]
fn box_flips_left_of_the_line_near_the_right_edge() {
    let engine = TooltipEngine::new(TooltipMetrics::default(), false);

    let fits = engine.place_box((100.0, 50.0), 98.0, (120.0, 60.0), (400.0, 300.0));
    assert_eq!(fits, (110.0, 50.0));

    let flipped = engine.place_box((350.0, 280.0), 348.0, (120.0, 60.0), (400.0, 300.0));
    assert_eq!(flipped, (348.0 - 120.0 - 10.0, 240.0));
}

#[test]
fn empty_panel_yields_no_snapshot() {
    let mut table = DataTable::with_numeric_x("Day", vec![1.0, 2.0]);
    table.left_measures = vec![MeasureColumn::new("Sales", vec![None, None])];
    let context = RenderContext::build(
        1,
        &table,
        &TrellisSettings::default(),
        Viewport::new(800.0, 600.0),
    )
    .expect("context");
    let panel = context.panel(0).expect("panel");

    let engine = TooltipEngine::new(TooltipMetrics::default(), false);
    assert!(engine.snapshot(1, panel, (200.0, 200.0), &[]).is_none());
}

fn tied_context(line_order: [&str; 4]) -> RenderContext {
    let mut table = DataTable::with_numeric_x("Day", vec![0.0, 10.0, 0.0, 10.0]);
    table.line_by = Some(CategoryColumn::text("Region", line_order));
    table.left_measures = vec![MeasureColumn::new(
        "Sales",
        vec![Some(10.0), Some(20.0), Some(30.0), Some(20.0)],
    )];
    RenderContext::build(
        1,
        &table,
        &TrellisSettings::default(),
        Viewport::new(800.0, 600.0),
    )
    .expect("context")
}

#[test]
fn equal_distances_keep_the_first_line_in_panel_order() {
    let context = tied_context(["a", "a", "b", "b"]);
    let panel = context.panel(0).expect("panel");

    for pointer_y in [0.0, 240.0, 480.0] {
        let nearest = nearest_line(panel, 10.0, pointer_y).expect("line");
        assert_eq!(nearest.key, "a");
    }

    let reversed = tied_context(["b", "b", "a", "a"]);
    let panel = reversed.panel(0).expect("panel");
    assert_eq!(nearest_line(panel, 10.0, 240.0).expect("line").key, "b");
}

#[test]
fn hit_test_finds_the_panel_under_the_pointer() {
    let single = context();
    assert_eq!(single.panel_at((100.0, 100.0)), Some(0));
    assert_eq!(single.panel_at((10.0, 100.0)), None);
    assert_eq!(single.panel_at((790.0, 100.0)), None);

    let mut table = DataTable::with_numeric_x("Day", vec![0.0, 1.0, 2.0, 3.0]);
    table.trellis_by = Some(CategoryColumn::text("Country", ["fr", "de", "it", "es"]));
    table.left_measures = vec![MeasureColumn::new(
        "Sales",
        vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
    )];
    let grid = RenderContext::build(
        1,
        &table,
        &TrellisSettings::default(),
        Viewport::new(800.0, 600.0),
    )
    .expect("context");

    assert_eq!(grid.panels[3].origin, (460.0, 350.0));
    assert_eq!(grid.panel_at((600.0, 100.0)), Some(1));
    assert_eq!(grid.panel_at((600.0, 450.0)), Some(3));
    assert_eq!(grid.panel_at((420.0, 450.0)), None);
}
