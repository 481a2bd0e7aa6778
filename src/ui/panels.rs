use eframe::egui::{self, Color32, RichText, Ui};

use launch_dash::data::SiteFilter;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site selector and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Launch site selector ----
    ui.strong("Launch site");
    let mut selected = state.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, SiteFilter::All, SiteFilter::All.label());
            for site in dataset.sites() {
                ui.selectable_value(&mut selected, SiteFilter::Site(site.clone()), site.as_str());
            }
        });
    state.set_site(selected);

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let Some((min, max)) = state.slider_bounds() else {
        return;
    };
    let bounds = dataset.payload_bounds();
    ui.label(format!(
        "Dataset spans {} – {} kg",
        bounds.slider_min(),
        bounds.slider_max()
    ));
    let step = state.payload_step;

    let mut low = state.payload_low();
    if ui
        .add(egui::Slider::new(&mut low, min..=max).step_by(step).text("from"))
        .changed()
    {
        state.set_payload_low(low);
    }

    let mut high = state.payload_high();
    if ui
        .add(egui::Slider::new(&mut high, min..=max).step_by(step).text("to"))
        .changed()
    {
        state.set_payload_high(high);
    }

    if ui.small_button("Reset range").clicked() {
        state.reset_range();
    }

    ui.add_space(8.0);
    ui.separator();

    if let Some(outcomes) = &state.outcomes {
        if let Some(ratio) = outcomes.success_ratio() {
            ui.label(format!(
                "{} launches, {:.1}% successful",
                outcomes.total(),
                ratio * 100.0
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.scatter.as_ref().map_or(0, |s| s.points.len());
            ui.label(format!("{} launches loaded, {} in range", ds.len(), visible));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
