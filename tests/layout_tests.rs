use trellis_chart::ChartError;
use trellis_chart::api::{LayoutRequest, TrellisLayout, column_count};
use trellis_chart::core::Viewport;

fn request(panel_count: usize) -> LayoutRequest {
    LayoutRequest {
        viewport: Viewport::new(1000.0, 800.0),
        panel_count,
        left_axis_count: 1,
        right_axis_count: 0,
        legend_by_trellis: true,
        vertical_legend: false,
        auto_layout: true,
        user_columns: 1,
    }
}

#[test]
fn auto_layout_uses_square_root_columns() {
    assert_eq!(column_count(1, true, 1), 1);
    assert_eq!(column_count(4, true, 1), 2);
    assert_eq!(column_count(5, true, 1), 3);
    assert_eq!(column_count(0, true, 1), 1);
}

#[test]
fn grid_divides_the_window_between_cells() {
    let layout = TrellisLayout::compute(request(4)).expect("layout");

    assert_eq!((layout.columns, layout.rows), (2, 2));
    assert!(layout.legend_by_trellis);
    assert_eq!(layout.margins.top, 40.0);
    assert_eq!(layout.margins.left, 60.0);
    assert_eq!(layout.margins.right, 15.0);
    assert_eq!(layout.legend_band, Viewport::new(1000.0, 20.0));
    // (1000 - 75 * 2) / 2 and (780 - 100 * 2) / 2
    assert_eq!(layout.panel_size, Viewport::new(425.0, 290.0));

    assert_eq!(layout.panel_origin(0), (60.0, 60.0));
    assert_eq!(layout.panel_origin(3), (500.0 + 60.0, 20.0 + 390.0 + 40.0));
}

#[test]
fn single_panel_never_uses_panel_legends() {
    let layout = TrellisLayout::compute(request(1)).expect("layout");

    assert!(!layout.legend_by_trellis);
    assert_eq!(layout.margins.top, 20.0);
    assert_eq!(layout.legend_band.height, 40.0);
}

#[test]
fn vertical_legend_takes_a_right_column() {
    let mut vertical = request(1);
    vertical.vertical_legend = true;

    let layout = TrellisLayout::compute(vertical).expect("layout");

    assert_eq!(layout.legend_band, Viewport::new(120.0, 800.0));
    assert_eq!(layout.panel_size.width, 1000.0 - 120.0 - 75.0);
    assert_eq!(layout.panel_origin(0), (60.0, 20.0));
}

#[test]
fn viewport_too_small_for_margins_is_rejected() {
    let mut tiny = request(9);
    tiny.viewport = Viewport::new(100.0, 100.0);

    assert!(matches!(
        TrellisLayout::compute(tiny),
        Err(ChartError::InvalidViewport { .. })
    ));
}
