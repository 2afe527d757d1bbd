//! Utility windows laid over the map widget.

use egui::{Align2, ComboBox, RichText, Sense, Ui, Window, vec2};
use walkers::MapMemory;
use walkers::sources::Attribution;

use crate::QuakeMapApp;
use crate::data::Earthquake;
use crate::style;

pub fn acknowledge(ui: &Ui, attribution: Attribution) {
    Window::new("Acknowledge")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::LEFT_TOP, [10., 10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                ui.label("map tiles by");
                ui.hyperlink_to(attribution.text, attribution.url);
            });
        });
}

/// Basemap picker, overlay toggles and feed status.
pub fn controls(app: &mut QuakeMapApp, ui: &Ui) {
    Window::new("Controls")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_TOP, [-10., 10.])
        .fixed_size([160., 150.])
        .show(ui.ctx(), |ui| {
            let basemaps: Vec<_> = app.providers.keys().copied().collect();

            ComboBox::from_label("Basemap")
                .selected_text(app.selected_basemap.label())
                .show_ui(ui, |ui| {
                    for basemap in basemaps {
                        ui.selectable_value(&mut app.selected_basemap, basemap, basemap.label());
                    }
                });

            ui.separator();

            ui.checkbox(&mut app.show_earthquakes, "Earthquakes");
            ui.checkbox(&mut app.show_plate_boundaries, "Tectonic plates");

            ui.collapsing("Feeds", |ui| {
                ui.label(match app.earthquakes.ready() {
                    Some(quakes) => format!("{} earthquakes this week", quakes.len()),
                    None => "earthquakes not loaded".to_owned(),
                });
                ui.label(match app.plate_boundaries.ready() {
                    Some(lines) => format!("{} boundary lines", lines.len()),
                    None => "plate boundaries not loaded".to_owned(),
                });
            });
        });
}

/// Color key for the earthquake depth buckets.
pub fn legend(ui: &Ui) {
    Window::new("Legend")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_BOTTOM, [-10., -10.])
        .show(ui.ctx(), |ui| {
            ui.label(RichText::new("Depth (km)").strong());
            for (label, color) in style::legend_rows() {
                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(vec2(14., 14.), Sense::hover());
                    ui.painter().rect_filled(swatch, 2., color);
                    ui.label(label);
                });
            }
        });
}

/// Popup with the details of the clicked earthquake marker.
pub fn quake_popup(ui: &Ui, quake: &Earthquake) {
    Window::new("Earthquake")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::CENTER_BOTTOM, [0., -10.])
        .show(ui.ctx(), |ui| {
            ui.label(RichText::new(format!("Magnitude {:.1}", quake.magnitude)).strong());
            ui.label(format!("Depth: {} km", quake.depth_km));
            if let Some(place) = &quake.place {
                ui.label(place);
            }
        });
}

/// Simple GUI to zoom in and out.
pub fn zoom(ui: &Ui, map_memory: &mut MapMemory) {
    Window::new("Map")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::LEFT_BOTTOM, [10., -10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("➕").heading()).clicked() {
                    let _ = map_memory.zoom_in();
                }

                if ui.button(RichText::new("➖").heading()).clicked() {
                    let _ = map_memory.zoom_out();
                }
            });
        });
}

/// When the map got dragged away, show a window with an option to go back to
/// the starting view.
pub fn go_to_starting_point(ui: &Ui, map_memory: &mut MapMemory) {
    if let Some(position) = map_memory.detached() {
        Window::new("Center")
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(Align2::LEFT_BOTTOM, [10., -60.])
            .show(ui.ctx(), |ui| {
                ui.label(format!(
                    "center at {:.04} {:.04}",
                    position.x(),
                    position.y()
                ));
                if ui
                    .button(RichText::new("back to California").heading())
                    .clicked()
                {
                    map_memory.follow_my_position();
                }
            });
    }
}
