use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use launch_dash::data::{Outcome, OutcomeSummary, PayloadScatter};

use crate::color::{outcome_color, ColorMap};
use crate::state::AppState;

/// Height reserved for the pie chart.
const PIE_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Central panel: pie on top, scatter below
// ---------------------------------------------------------------------------

/// Render both charts in the central panel.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let (Some(outcomes), Some(scatter)) = (&state.outcomes, &state.scatter) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch dataset to begin  (File → Open…)");
        });
        return;
    };

    ui.heading(outcomes.title.as_str());
    outcome_pie(ui, outcomes);
    ui.separator();

    ui.heading(scatter.title.as_str());
    payload_scatter_plot(ui, scatter, state.color_map.as_ref());
}

// ---------------------------------------------------------------------------
// Success pie
// ---------------------------------------------------------------------------

/// Draw the outcome counts as a pie with a small legend.
fn outcome_pie(ui: &mut Ui, outcomes: &OutcomeSummary) {
    let total = outcomes.total();
    if total == 0 {
        ui.label("No launches for this site.");
        return;
    }

    let size = egui::vec2(ui.available_width(), PIE_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let radius = (rect.height() * 0.45).min(rect.width() * 0.25);
    let center = Pos2::new(rect.left() + radius + 16.0, rect.center().y);

    let mut start = -TAU / 4.0;
    let mut legend_y = center.y - radius * 0.5;
    for (&outcome, &count) in outcomes.counts.iter().rev() {
        let sweep = TAU * count as f32 / total as f32;
        let color = outcome_color(outcome);
        paint_slice(&painter, center, radius, start, sweep, color);

        let legend_pos = Pos2::new(center.x + radius + 32.0, legend_y);
        painter.rect_filled(
            egui::Rect::from_center_size(legend_pos, egui::vec2(12.0, 12.0)),
            2.0,
            color,
        );
        painter.text(
            legend_pos + egui::vec2(14.0, 0.0),
            Align2::LEFT_CENTER,
            format!(
                "{outcome}: {count} ({:.1}%)",
                100.0 * count as f32 / total as f32
            ),
            FontId::proportional(14.0),
            ui.visuals().text_color(),
        );

        start += sweep;
        legend_y += 22.0;
    }
}

/// Fill a circular sector as a fan of thin triangles (each one convex).
fn paint_slice(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    let steps = ((sweep / TAU) * 128.0).ceil().max(1.0) as usize;
    let point = |angle: f32| center + radius * egui::vec2(angle.cos(), angle.sin());
    for i in 0..steps {
        let a0 = start + sweep * i as f32 / steps as f32;
        let a1 = start + sweep * (i + 1) as f32 / steps as f32;
        painter.add(Shape::convex_polygon(
            vec![center, point(a0), point(a1)],
            color,
            Stroke::NONE,
        ));
    }
}

// ---------------------------------------------------------------------------
// Payload vs outcome scatter
// ---------------------------------------------------------------------------

fn payload_scatter_plot(ui: &mut Ui, scatter: &PayloadScatter, color_map: Option<&ColorMap>) {
    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Outcome")
        .include_y(-0.25)
        .include_y(1.25)
        .y_axis_formatter(|mark, _range| match mark.value {
            v if v == 0.0 => Outcome::Failure.to_string(),
            v if v == 1.0 => Outcome::Success.to_string(),
            _ => String::new(),
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in scatter.by_category() {
                let color = color_map
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let series: PlotPoints = points
                    .iter()
                    .map(|p| [p.payload_mass_kg, f64::from(p.outcome.class())])
                    .collect();

                plot_ui.points(
                    Points::new(series)
                        .name(category)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}
