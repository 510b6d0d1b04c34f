use trellis_chart::core::{AxisSide, DataGrouper, MeasureReplication, Row, replicate_by_measure};

fn row(x: f64, line: &str, trellis: &str, left: f64, right: f64) -> Row {
    Row {
        x_value: x,
        y_values_left: vec![Some(left)],
        y_values_right: vec![Some(right)],
        line_by: line.to_owned(),
        visual_group_by: format!("group-{line}"),
        trellis_by: trellis.to_owned(),
        tooltip_data: Vec::new(),
    }
}

#[test]
fn panels_and_lines_keep_first_seen_order() {
    let rows = vec![
        row(3.0, "b", "east", 1.0, 10.0),
        row(1.0, "a", "west", 2.0, 20.0),
        row(2.0, "a", "east", 3.0, 30.0),
        row(1.0, "b", "east", 4.0, 40.0),
    ];

    let grouped = DataGrouper::new().group(rows);

    let panel_keys: Vec<&str> = grouped.panels.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(panel_keys, vec!["east", "west"]);

    let east = grouped.panel(0).expect("east panel");
    let line_keys: Vec<&str> = east.lines.keys().map(String::as_str).collect();
    assert_eq!(line_keys, vec!["b", "a"]);
    assert_eq!(east.distinct_x(), &[1.0, 2.0, 3.0]);
    assert_eq!(east.row_count(), 3);
    assert_eq!(east.x_extent(), Some((1.0, 3.0)));
}

#[test]
fn grouping_preserves_every_row() {
    let rows: Vec<Row> = (0..30)
        .map(|i| {
            let line = ["x", "y", "z"][i % 3];
            let trellis = ["p", "q"][i % 2];
            row(i as f64, line, trellis, i as f64, 0.0)
        })
        .collect();

    let grouped = DataGrouper::new().group(rows);

    assert_eq!(grouped.rows().count(), 30);
    for panel in &grouped.panels {
        for line in panel.lines.values() {
            assert!(line.rows.iter().all(|r| r.line_by == line.key));
            assert!(line.rows.iter().all(|r| r.trellis_by == panel.key));
        }
    }
}

#[test]
fn empty_trellis_column_yields_a_single_panel() {
    let rows = vec![row(1.0, "a", "", 1.0, 1.0), row(2.0, "b", "", 2.0, 2.0)];

    let grouped = DataGrouper::new().group(rows);

    assert_eq!(grouped.panel_count(), 1);
    assert_eq!(grouped.panels[0].key, "");
    assert_eq!(grouped.panels[0].lines.len(), 2);
}

#[test]
fn max_value_respects_side_and_measure_filter() {
    let mut wide = row(1.0, "a", "t", 5.0, 50.0);
    wide.y_values_left.push(Some(9.0));
    let rows = vec![wide, row(2.0, "a", "u", 7.0, 70.0)];

    let grouped = DataGrouper::new().group(rows);

    assert_eq!(grouped.max_value(AxisSide::Left, None), Some(9.0));
    assert_eq!(grouped.max_value(AxisSide::Left, Some(0)), Some(7.0));
    assert_eq!(grouped.max_value(AxisSide::Right, None), Some(70.0));
    assert_eq!(grouped.panels[0].max_value(AxisSide::Left, Some(1)), Some(9.0));
    assert_eq!(grouped.panels[1].max_value(AxisSide::Left, Some(1)), None);
}

#[test]
fn by_measure_grouping_builds_one_panel_per_measure() {
    let rows = vec![row(1.0, "a", "", 1.0, 100.0), row(2.0, "b", "", 2.0, 200.0)];
    let measures = MeasureReplication {
        left: vec!["Sales".to_owned()],
        right: vec!["Profit".to_owned()],
    };

    let grouper = DataGrouper::by_measure(measures);
    assert!(grouper.is_by_measure());
    let grouped = grouper.group(rows);

    let keys: Vec<&str> = grouped.panels.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["Sales", "Profit"]);
    assert_eq!(grouped.rows().count(), 4);

    let profit = grouped.panel(1).expect("profit panel");
    assert_eq!(profit.max_value(AxisSide::Right, None), Some(200.0));
    assert_eq!(profit.max_value(AxisSide::Left, None), None);
}

#[test]
fn replicated_rows_carry_only_their_measure() {
    let mut source = row(4.0, "a", "", 1.0, 3.0);
    source.y_values_left.push(Some(2.0));
    let measures = MeasureReplication {
        left: vec!["L0".to_owned(), "L1".to_owned()],
        right: vec!["R0".to_owned()],
    };

    let replicas = replicate_by_measure(&[source], &measures);

    assert_eq!(replicas.len(), 3);
    assert_eq!(replicas[0].trellis_by, "L0");
    assert_eq!(replicas[0].y_values_left, vec![Some(1.0)]);
    assert_eq!(replicas[1].trellis_by, "L1");
    assert_eq!(replicas[1].y_values_left, vec![Some(2.0)]);
    assert!(replicas[1].y_values_right.is_empty());
    assert_eq!(replicas[2].trellis_by, "R0");
    assert_eq!(replicas[2].y_values_right, vec![Some(3.0)]);
    assert!(replicas[2].y_values_left.is_empty());
}

#[test]
fn line_lookup_by_exact_x() {
    let rows = vec![row(1.0, "a", "", 1.0, 0.0), row(3.0, "a", "", 3.0, 0.0)];
    let grouped = DataGrouper::new().group(rows);
    let line = grouped.panels[0].lines.get("a").expect("line a");

    assert_eq!(line.row_at(3.0).map(|r| r.x_value), Some(3.0));
    assert!(line.row_at(2.0).is_none());
    assert_eq!(line.visual_group(), "group-a");
    assert_eq!(
        line.measure_points(AxisSide::Left, 0),
        vec![(1.0, 1.0), (3.0, 3.0)]
    );
}
