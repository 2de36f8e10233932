// View model builder - Turns a data view and a settings snapshot into data points
use crate::domain::data_view::{Categorical, DataView, MeasureColumn, Role};
use crate::domain::palette::default_colors;
use crate::domain::settings::{Calculate, Comparison, StateOrder, VisualSettings};
use crate::domain::view_model::{DataPoint, ThresholdState, ViewModel};

#[derive(Debug, Default)]
struct Totals {
    value: Option<f64>,
    state_value: Option<f64>,
    target: Option<f64>,
}

fn accumulate(total: &mut Option<f64>, value: f64) {
    *total = Some(total.unwrap_or(0.0) + value);
}

/// Build the view model for one update.
///
/// Never fails: a missing categorical section, zero rows or zero measure columns all
/// produce an empty model with no totals.
pub fn build(data_view: &DataView, settings: &VisualSettings) -> ViewModel {
    let Some(categorical) = data_view.categorical.as_ref() else {
        tracing::debug!("Data view has no categorical section");
        return ViewModel::empty(settings.clone());
    };

    let rows = categorical.row_count();
    if rows == 0 || categorical.values.is_empty() {
        tracing::debug!(
            "Nothing to build: {} rows, {} measure columns",
            rows,
            categorical.values.len()
        );
        return ViewModel::empty(settings.clone());
    }

    let mut settings = settings.clone();
    if settings.calculate.needs_target() && !categorical.has_column_with(Role::Target) {
        tracing::debug!(
            "No target column bound, calculating {:?} as absolute",
            settings.calculate
        );
        settings.calculate = Calculate::Absolute;
    }

    let value_columns = categorical
        .values
        .iter()
        .filter(|c| c.has_role(Role::Value))
        .count();
    if value_columns > 1 {
        tracing::warn!(
            "{} columns carry the Values role, the last non-null one wins per row",
            value_columns
        );
    }

    let bound_states =
        categorical.has_column_with(Role::Target) || categorical.has_column_with(Role::States);

    let mut totals = Totals::default();
    let mut data_points = Vec::with_capacity(rows);
    for row in 0..rows {
        match build_row(categorical, row, &settings, bound_states, &mut totals) {
            Some(point) => data_points.push(point),
            None => tracing::debug!("Dropping row {}: no primary value", row),
        }
    }

    ViewModel {
        data_points,
        total_value: totals.value,
        total_state_value: totals.state_value,
        total_target: totals.target,
        settings,
    }
}

fn build_row(
    categorical: &Categorical,
    row: usize,
    settings: &VisualSettings,
    bound_states: bool,
    totals: &mut Totals,
) -> Option<DataPoint> {
    let mut value = None;
    let mut display_name = String::new();
    let mut format = None;
    let mut state_value = None;
    let mut target = None;
    let mut target_display_name = None;
    let mut states = Vec::new();

    for column in &categorical.values {
        let cell = column.cell(row);

        if column.has_role(Role::Value) {
            if let Some(v) = cell {
                value = Some(v);
                display_name = column.display_name.clone();
                format = column.format.clone();
                accumulate(&mut totals.value, v);
            }
        }

        if column.has_role(Role::StateValue) {
            if let Some(v) = cell {
                state_value = Some(v);
                accumulate(&mut totals.state_value, v);
            }
        }

        let is_target = column.has_role(Role::Target);
        if !(is_target || column.has_role(Role::States)) {
            continue;
        }
        let Some(v) = cell else {
            continue;
        };

        if is_target {
            target = Some(v);
            target_display_name = Some(column.display_name.clone());
            accumulate(&mut totals.target, v);
        }

        // Against a target the target column is the reference, not a boundary
        if is_target && settings.calculate.needs_target() {
            continue;
        }
        states.push(bound_state(column, v, is_target, states.len()));
    }

    let value = value?;

    // Manual slots keep their configured order
    let states = if bound_states {
        order_states(states, settings.comparison)
    } else {
        manual_states(settings)
    };
    let states = with_default_colors(states, settings.comparison);

    Some(DataPoint {
        category: categorical.category(row),
        display_name,
        value: Some(value),
        state_value: state_value.or(Some(value)),
        target,
        target_display_name,
        states,
        format,
    })
}

fn bound_state(
    column: &MeasureColumn,
    value: f64,
    is_target: bool,
    source_position: usize,
) -> ThresholdState {
    let overrides = column.overrides.clone().unwrap_or_default();
    ThresholdState {
        value,
        color: overrides.color,
        text: overrides.text,
        icon: overrides.icon,
        is_target,
        source_position,
    }
}

/// States synthesized from the manual slots, in slot order
fn manual_states(settings: &VisualSettings) -> Vec<ThresholdState> {
    let mut states = Vec::new();
    for slot in settings.thresholds.slots() {
        let (Some(value), true) = (slot.value, slot.is_configured()) else {
            continue;
        };
        states.push(ThresholdState {
            value,
            color: slot.color.clone(),
            text: slot.text.clone(),
            icon: slot.icon.clone(),
            is_target: false,
            source_position: states.len(),
        });
    }
    states
}

/// Sort boundaries by the comparison's order and move target entries to the end
pub fn order_states(states: Vec<ThresholdState>, comparison: Comparison) -> Vec<ThresholdState> {
    let (mut ordered, targets): (Vec<_>, Vec<_>) = states.into_iter().partition(|s| !s.is_target);

    match comparison.state_order() {
        StateOrder::Ascending => ordered.sort_by(|a, b| {
            a.value
                .total_cmp(&b.value)
                .then(a.source_position.cmp(&b.source_position))
        }),
        StateOrder::Descending => ordered.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then(b.source_position.cmp(&a.source_position))
        }),
        StateOrder::Source => {}
    }

    ordered.extend(targets);
    ordered
}

fn with_default_colors(
    mut states: Vec<ThresholdState>,
    comparison: Comparison,
) -> Vec<ThresholdState> {
    let palette = default_colors(states.len(), comparison);
    for (state, color) in states.iter_mut().zip(palette) {
        if state.color.is_none() {
            state.color = Some(color.to_string());
        }
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state_classifier::classify;
    use crate::domain::data_view::{CategoryColumn, CategoryValue, StateOverride};
    use crate::domain::settings::{ManualThreshold, ManualThresholds};

    fn categories(labels: &[&str]) -> Option<CategoryColumn> {
        Some(CategoryColumn {
            display_name: "Region".to_string(),
            values: labels
                .iter()
                .map(|l| CategoryValue::Text(l.to_string()))
                .collect(),
        })
    }

    fn settings(comparison: Comparison, calculate: Calculate) -> VisualSettings {
        VisualSettings {
            comparison,
            calculate,
            ..VisualSettings::default()
        }
    }

    fn values(states: &[ThresholdState]) -> Vec<f64> {
        states.iter().map(|s| s.value).collect()
    }

    #[test]
    fn test_missing_categorical_is_empty() {
        let model = build(&DataView::default(), &VisualSettings::default());
        assert!(model.is_empty());
        assert_eq!(model.total_value, None);
        assert_eq!(model.total_state_value, None);
        assert_eq!(model.total_target, None);
    }

    #[test]
    fn test_zero_rows_is_empty() {
        let view = DataView::categorical(
            categories(&[]),
            vec![MeasureColumn::new("Sales", &[Role::Value], vec![])],
        );
        let model = build(&view, &VisualSettings::default());
        assert!(model.is_empty());
        assert_eq!(model.total_value, None);
    }

    #[test]
    fn test_zero_measure_columns_is_empty() {
        let view = DataView::categorical(categories(&["North", "South"]), vec![]);
        let model = build(&view, &VisualSettings::default());
        assert!(model.is_empty());
        assert_eq!(model.total_value, None);
        assert_eq!(model.total_target, None);
    }

    #[test]
    fn test_null_values_drop_rows() {
        let view = DataView::categorical(
            categories(&["North", "South", "East"]),
            vec![MeasureColumn::new(
                "Sales",
                &[Role::Value],
                vec![Some(10.0), None, Some(5.0)],
            )],
        );
        let model = build(&view, &VisualSettings::default());

        assert_eq!(model.data_points.len(), 2);
        assert_eq!(
            model.data_points[0].category,
            Some(CategoryValue::Text("North".to_string()))
        );
        assert_eq!(
            model.data_points[1].category,
            Some(CategoryValue::Text("East".to_string()))
        );
        assert_eq!(model.total_value, Some(15.0));
        assert_eq!(model.data_points[1].display_name, "Sales");
    }

    #[test]
    fn test_state_value_defaults_to_value() {
        let view = DataView::categorical(
            categories(&["A", "B"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(10.0), Some(20.0)]),
                MeasureColumn::new("Score", &[Role::StateValue], vec![Some(3.0), None]),
            ],
        );
        let model = build(&view, &VisualSettings::default());

        assert_eq!(model.data_points[0].state_value, Some(3.0));
        assert_eq!(model.data_points[1].state_value, Some(20.0));
        assert_eq!(model.total_state_value, Some(3.0));
    }

    #[test]
    fn test_ascending_sort_with_tie_break_and_target_last() {
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(50.0)]),
                MeasureColumn::new("High", &[Role::States], vec![Some(80.0)]),
                MeasureColumn::new("Goal", &[Role::Target, Role::States], vec![Some(1.0)]),
                MeasureColumn::new("Low", &[Role::States], vec![Some(20.0)]),
                MeasureColumn::new("Mid", &[Role::States], vec![Some(20.0)]),
            ],
        );
        let model = build(&view, &settings(Comparison::Less, Calculate::Absolute));
        let states = &model.data_points[0].states;

        assert_eq!(values(states), vec![20.0, 20.0, 80.0, 1.0]);
        assert!(states[0].source_position < states[1].source_position);
        assert!(states[3].is_target);
        assert_eq!(model.data_points[0].target, Some(1.0));
        assert_eq!(
            model.data_points[0].target_display_name.as_deref(),
            Some("Goal")
        );
    }

    #[test]
    fn test_descending_sort_with_descending_tie_break() {
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(50.0)]),
                MeasureColumn::new("S1", &[Role::States], vec![Some(10.0)]),
                MeasureColumn::new("S2", &[Role::States], vec![Some(30.0)]),
                MeasureColumn::new("S3", &[Role::States], vec![Some(10.0)]),
            ],
        );
        let model = build(&view, &settings(Comparison::GreaterOrEqual, Calculate::Absolute));
        let states = &model.data_points[0].states;

        assert_eq!(values(states), vec![30.0, 10.0, 10.0]);
        assert_eq!(states[1].source_position, 2);
        assert_eq!(states[2].source_position, 0);
    }

    #[test]
    fn test_equal_keeps_source_order() {
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(50.0)]),
                MeasureColumn::new("S1", &[Role::States], vec![Some(30.0)]),
                MeasureColumn::new("S2", &[Role::States], vec![Some(10.0)]),
                MeasureColumn::new("S3", &[Role::States], vec![Some(20.0)]),
            ],
        );
        let model = build(&view, &settings(Comparison::Equal, Calculate::Absolute));
        assert_eq!(values(&model.data_points[0].states), vec![30.0, 10.0, 20.0]);
    }

    #[test]
    fn test_null_state_cell_produces_no_state() {
        let view = DataView::categorical(
            categories(&["A", "B"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(1.0), Some(2.0)]),
                MeasureColumn::new("S1", &[Role::States], vec![Some(5.0), None]),
            ],
        );
        let model = build(&view, &VisualSettings::default());
        assert_eq!(model.data_points[0].states.len(), 1);
        assert!(model.data_points[1].states.is_empty());
    }

    #[test]
    fn test_no_target_column_forces_absolute() {
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(1.0)]),
                MeasureColumn::new("S1", &[Role::States], vec![Some(5.0)]),
            ],
        );
        let model = build(&view, &settings(Comparison::Greater, Calculate::Percentage));
        assert_eq!(model.settings.calculate, Calculate::Absolute);
    }

    #[test]
    fn test_target_excluded_from_states_against_target() {
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(120.0)]),
                MeasureColumn::new("Band", &[Role::States], vec![Some(0.1)]),
                MeasureColumn::new("Goal", &[Role::States, Role::Target], vec![Some(100.0)]),
            ],
        );

        let model = build(&view, &settings(Comparison::Greater, Calculate::Modifier));
        let point = &model.data_points[0];
        assert_eq!(model.settings.calculate, Calculate::Modifier);
        assert_eq!(point.target, Some(100.0));
        assert_eq!(values(&point.states), vec![0.1]);
        assert!(point.states.iter().all(|s| !s.is_target));

        let model = build(&view, &settings(Comparison::Greater, Calculate::Absolute));
        let states = &model.data_points[0].states;
        assert_eq!(values(states), vec![0.1, 100.0]);
        assert!(states.last().unwrap().is_target);
    }

    #[test]
    fn test_manual_states_in_slot_order() {
        let mut settings = settings(Comparison::Greater, Calculate::Absolute);
        settings.thresholds = ManualThresholds::from_slots([
            ManualThreshold::new(10.0, "#ff0000").with_text("Low"),
            ManualThreshold::new(30.0, "#ff8800"),
            ManualThreshold::new(50.0, "#ffff00"),
            ManualThreshold::new(70.0, "#88ff00"),
            ManualThreshold::new(90.0, "#00ff00").with_icon("star"),
        ]);
        let view = DataView::categorical(
            categories(&["A"]),
            vec![MeasureColumn::new("Sales", &[Role::Value], vec![Some(95.0)])],
        );

        let model = build(&view, &settings);
        let point = &model.data_points[0];
        let states = &point.states;

        assert_eq!(states.len(), 5);
        assert_eq!(values(states), vec![10.0, 30.0, 50.0, 70.0, 90.0]);
        assert_eq!(states[0].text.as_deref(), Some("Low"));
        assert_eq!(states[4].icon.as_deref(), Some("star"));
        assert_eq!(states[1].color.as_deref(), Some("#ff8800"));

        // First-match scan sees slot 1 first
        assert_eq!(classify(point, &model.settings), Some(0));
    }

    #[test]
    fn test_manual_slots_without_value_or_color_are_skipped() {
        let mut settings = VisualSettings::default();
        settings.thresholds = ManualThresholds::from_slots([
            ManualThreshold::new(90.0, "#00ff00"),
            ManualThreshold::default(),
            ManualThreshold {
                value: Some(50.0),
                ..ManualThreshold::default()
            },
            ManualThreshold {
                color: Some("#ff0000".to_string()),
                ..ManualThreshold::default()
            },
            ManualThreshold::new(10.0, "#ff0000"),
        ]);
        let view = DataView::categorical(
            categories(&["A"]),
            vec![MeasureColumn::new("Sales", &[Role::Value], vec![Some(60.0)])],
        );

        let model = build(&view, &settings);
        assert_eq!(values(&model.data_points[0].states), vec![90.0, 10.0]);
    }

    #[test]
    fn test_manual_slots_ignored_when_states_are_bound() {
        let mut settings = VisualSettings::default();
        settings.thresholds.slot1 = ManualThreshold::new(90.0, "#00ff00");
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(60.0)]),
                MeasureColumn::new("S1", &[Role::States], vec![Some(40.0)]),
            ],
        );

        let model = build(&view, &settings);
        assert_eq!(values(&model.data_points[0].states), vec![40.0]);
    }

    #[test]
    fn test_default_colors_fill_only_missing() {
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(60.0)]),
                MeasureColumn::new("S1", &[Role::States], vec![Some(40.0)]).with_overrides(
                    StateOverride {
                        color: Some("#123456".to_string()),
                        text: Some("Ok".to_string()),
                        icon: None,
                    },
                ),
                MeasureColumn::new("S2", &[Role::States], vec![Some(80.0)]),
            ],
        );

        let model = build(&view, &settings(Comparison::Greater, Calculate::Absolute));
        let states = &model.data_points[0].states;

        assert_eq!(states[0].value, 80.0);
        assert_eq!(
            states[0].color.as_deref(),
            Some(default_colors(2, Comparison::Greater)[0])
        );
        assert_eq!(states[1].color.as_deref(), Some("#123456"));
        assert_eq!(states[1].text.as_deref(), Some("Ok"));
    }

    #[test]
    fn test_last_values_column_wins() {
        let view = DataView::categorical(
            categories(&["A", "B"]),
            vec![
                MeasureColumn::new("First", &[Role::Value], vec![Some(1.0), Some(2.0)]),
                MeasureColumn::new("Second", &[Role::Value], vec![Some(10.0), None])
                    .with_format("0%"),
            ],
        );
        let model = build(&view, &VisualSettings::default());

        assert_eq!(model.data_points[0].value, Some(10.0));
        assert_eq!(model.data_points[0].display_name, "Second");
        assert_eq!(model.data_points[0].format.as_deref(), Some("0%"));
        assert_eq!(model.data_points[1].value, Some(2.0));
        assert_eq!(model.data_points[1].display_name, "First");
    }

    #[test]
    fn test_rows_without_categories() {
        let view = DataView::categorical(
            None,
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(5.0)]),
                MeasureColumn::new("Goal", &[Role::Target], vec![Some(4.0)]),
            ],
        );
        let model = build(&view, &VisualSettings::default());

        assert_eq!(model.data_points.len(), 1);
        assert_eq!(model.data_points[0].category, None);
        assert_eq!(model.total_target, Some(4.0));
    }

    #[test]
    fn test_unknown_role_column_is_ignored() {
        let view = DataView::categorical(
            categories(&["A"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(5.0)]),
                MeasureColumn::new("Tooltip", &[Role::Unknown], vec![Some(99.0)]),
            ],
        );
        let model = build(&view, &VisualSettings::default());

        assert_eq!(model.data_points[0].value, Some(5.0));
        assert!(model.data_points[0].states.is_empty());
        assert_eq!(model.total_value, Some(5.0));
    }

    #[test]
    fn test_build_is_idempotent() {
        let view = DataView::categorical(
            categories(&["A", "B"]),
            vec![
                MeasureColumn::new("Sales", &[Role::Value], vec![Some(5.0), Some(7.0)]),
                MeasureColumn::new("S1", &[Role::States], vec![Some(4.0), Some(4.0)]),
                MeasureColumn::new("S2", &[Role::States], vec![Some(6.0), Some(6.0)]),
                MeasureColumn::new("Goal", &[Role::Target], vec![Some(5.0), Some(5.0)]),
            ],
        );
        let settings = settings(Comparison::LessOrEqual, Calculate::Absolute);

        assert_eq!(build(&view, &settings), build(&view, &settings));
    }

    #[test]
    fn test_order_states_moves_every_target_last() {
        let mut target = ThresholdState::new(-5.0, 0);
        target.is_target = true;
        let states = vec![target, ThresholdState::new(3.0, 1), ThresholdState::new(1.0, 2)];

        let ordered = order_states(states, Comparison::Less);
        assert_eq!(values(&ordered), vec![1.0, 3.0, -5.0]);
    }
}
