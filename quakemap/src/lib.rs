//! Recent earthquakes and tectonic plate boundaries on a slippy map.
//!
//! Basemap tiles, projection and input handling come from `walkers`; this
//! crate supplies the data feeds, the per-feature styling and the
//! surrounding UI.

mod basemaps;
mod data;
mod feeds;
mod plugins;
mod style;
mod windows;

use std::collections::BTreeMap;

use egui::Context;
use walkers::{HttpTiles, Map, MapMemory, Position, Tiles as _, lon_lat};

use basemaps::Basemap;
use data::{Earthquake, PlateLine};
use feeds::Feed;

const EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

const PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

const INITIAL_ZOOM: f64 = 5.0;

/// Initial view, centered on California like the dashboards this one grew
/// out of.
fn central_california() -> Position {
    lon_lat(-119.4179, 36.7783)
}

pub struct QuakeMapApp {
    pub(crate) providers: BTreeMap<Basemap, HttpTiles>,
    pub(crate) selected_basemap: Basemap,
    map_memory: MapMemory,

    pub(crate) earthquakes: Feed<Vec<Earthquake>>,
    pub(crate) plate_boundaries: Feed<Vec<PlateLine>>,
    pub(crate) show_earthquakes: bool,
    pub(crate) show_plate_boundaries: bool,
    selected_quake: Option<usize>,
}

impl QuakeMapApp {
    pub fn new(egui_ctx: Context) -> Self {
        let mut map_memory = MapMemory::default();
        let _ = map_memory.set_zoom(INITIAL_ZOOM);

        Self {
            providers: basemaps::providers(egui_ctx.to_owned()),
            selected_basemap: Basemap::OpenStreetMap,
            map_memory,
            earthquakes: Feed::new(
                "earthquake",
                EARTHQUAKES_URL,
                data::parse_earthquakes,
                egui_ctx.to_owned(),
            ),
            plate_boundaries: Feed::new(
                "plate boundary",
                PLATE_BOUNDARIES_URL,
                data::parse_plate_lines,
                egui_ctx,
            ),
            show_earthquakes: true,
            show_plate_boundaries: true,
            selected_quake: None,
        }
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.earthquakes.poll();
        self.plate_boundaries.poll();

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default().frame(rimless).show(ctx, |ui| {
            let tiles = self
                .providers
                .get_mut(&self.selected_basemap)
                .expect("every basemap is registered at startup");

            let attribution = tiles.attribution();

            // In egui, widgets are constructed and consumed in each frame;
            // all surviving state sits in `MapMemory` and the feeds.
            let mut map = Map::new(Some(tiles), &mut self.map_memory, central_california());

            if self.show_plate_boundaries {
                if let Some(lines) = self.plate_boundaries.ready() {
                    map = map.with_plugin(plugins::PlateLines::new(lines));
                }
            }

            if self.show_earthquakes {
                if let Some(quakes) = self.earthquakes.ready() {
                    map = map
                        .with_plugin(plugins::Earthquakes::new(quakes, &mut self.selected_quake));
                }
            }

            ui.add(map);

            windows::zoom(ui, &mut self.map_memory);
            windows::go_to_starting_point(ui, &mut self.map_memory);
            windows::legend(ui);
            windows::acknowledge(ui, attribution);

            if self.show_earthquakes {
                if let Some(quake) = self
                    .selected_quake
                    .and_then(|index| self.earthquakes.ready()?.get(index))
                {
                    windows::quake_popup(ui, quake);
                }
            }

            windows::controls(self, ui);
        });
    }
}
