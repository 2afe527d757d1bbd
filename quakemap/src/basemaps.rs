//! Registry of the basemap tile sources the map can draw its background
//! from. Make sure you follow terms of usage of the particular source.

use std::collections::BTreeMap;

use egui::Context;
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId};

/// Selectable basemap styles, in the order they show up in the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Basemap {
    OpenStreetMap,
    StamenToner,
    StamenWatercolor,
}

impl Basemap {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "Default",
            Self::StamenToner => "Greyscale",
            Self::StamenWatercolor => "Watercolor",
        }
    }
}

/// Stamen styles hosted by Stadia Maps.
/// <https://docs.stadiamaps.com/map-styles/>
#[derive(Clone, Copy)]
pub enum StamenStyle {
    Toner,
    Watercolor,
}

impl StamenStyle {
    fn api_slug(&self) -> &'static str {
        match self {
            Self::Toner => "stamen_toner",
            Self::Watercolor => "stamen_watercolor",
        }
    }

    /// The watercolor tiles are only served as JPEG.
    fn extension(&self) -> &'static str {
        match self {
            Self::Toner => "png",
            Self::Watercolor => "jpg",
        }
    }

    fn max_zoom(&self) -> u8 {
        match self {
            Self::Toner => 20,
            Self::Watercolor => 16,
        }
    }
}

/// Stadia Maps tile source.
pub struct StadiaMaps {
    pub style: StamenStyle,
}

impl TileSource for StadiaMaps {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tiles.stadiamaps.com/tiles/{}/{}/{}/{}.{}",
            self.style.api_slug(),
            tile_id.zoom,
            tile_id.x,
            tile_id.y,
            self.style.extension()
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© Stadia Maps © Stamen Design © OpenMapTiles © OpenStreetMap contributors",
            url: "https://www.stadiamaps.com/",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        self.style.max_zoom()
    }
}

fn http_options() -> HttpOptions {
    HttpOptions {
        cache: if std::env::var("NO_HTTP_CACHE").is_ok() {
            None
        } else {
            Some(".cache".into())
        },
        ..Default::default()
    }
}

/// All selectable basemaps, ready to be drawn.
pub fn providers(egui_ctx: Context) -> BTreeMap<Basemap, HttpTiles> {
    let mut providers = BTreeMap::default();

    providers.insert(
        Basemap::OpenStreetMap,
        HttpTiles::with_options(
            walkers::sources::OpenStreetMap,
            http_options(),
            egui_ctx.to_owned(),
        ),
    );

    providers.insert(
        Basemap::StamenToner,
        HttpTiles::with_options(
            StadiaMaps {
                style: StamenStyle::Toner,
            },
            http_options(),
            egui_ctx.to_owned(),
        ),
    );

    providers.insert(
        Basemap::StamenWatercolor,
        HttpTiles::with_options(
            StadiaMaps {
                style: StamenStyle::Watercolor,
            },
            http_options(),
            egui_ctx.to_owned(),
        ),
    );

    providers
}
