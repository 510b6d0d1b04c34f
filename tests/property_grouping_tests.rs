use proptest::prelude::*;
use trellis_chart::core::{DataGrouper, Row};

fn rows_from(triples: &[(u8, u8, i16)]) -> Vec<Row> {
    triples
        .iter()
        .map(|(line, trellis, x)| Row {
            x_value: f64::from(*x),
            y_values_left: vec![Some(f64::from(*x) * 2.0)],
            y_values_right: Vec::new(),
            line_by: format!("line-{line}"),
            visual_group_by: format!("line-{line}"),
            trellis_by: format!("panel-{trellis}"),
            tooltip_data: Vec::new(),
        })
        .collect()
}

/// Row contents of one group, order-independent.
fn members(rows: &[Row]) -> Vec<(f64, Vec<Option<f64>>, String)> {
    let mut members: Vec<_> = rows
        .iter()
        .map(|row| (row.x_value, row.y_values_left.clone(), row.visual_group_by.clone()))
        .collect();
    members.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.2.cmp(&b.2)));
    members
}

proptest! {
    #[test]
    fn grouping_partitions_rows_without_loss(
        triples in prop::collection::vec((0u8..5, 0u8..4, -50i16..50), 0..80)
    ) {
        let rows = rows_from(&triples);
        let grouped = DataGrouper::new().group(rows.clone());

        prop_assert_eq!(grouped.rows().count(), rows.len());
        for panel in &grouped.panels {
            for line in panel.lines.values() {
                prop_assert!(!line.rows.is_empty());
                for row in &line.rows {
                    prop_assert_eq!(&row.line_by, &line.key);
                    prop_assert_eq!(&row.trellis_by, &panel.key);
                }
            }
            let xs = panel.distinct_x();
            prop_assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn panel_membership_is_independent_of_row_order(
        (triples, shuffled) in prop::collection::vec((0u8..4, 0u8..3, -20i16..20), 1..40)
            .prop_flat_map(|triples| {
                let shuffled = Just(triples.clone()).prop_shuffle();
                (Just(triples), shuffled)
            })
    ) {
        let forward = DataGrouper::new().group(rows_from(&triples));
        let permuted = DataGrouper::new().group(rows_from(&shuffled));

        prop_assert_eq!(forward.panel_count(), permuted.panel_count());
        for panel in &forward.panels {
            let other = permuted
                .panels
                .iter()
                .find(|candidate| candidate.key == panel.key)
                .expect("same panel keys");
            prop_assert_eq!(panel.distinct_x(), other.distinct_x());
            prop_assert_eq!(panel.lines.len(), other.lines.len());
            for (key, line) in &panel.lines {
                let other_line = other.lines.get(key).expect("same line keys");
                prop_assert_eq!(members(&line.rows), members(&other_line.rows));
            }
        }
    }
}
