//! Map plugins drawing the two overlays.

use egui::{Color32, Response, Shape, Stroke, Ui};
use walkers::{MapMemory, Plugin, Projector};

use crate::data::{Earthquake, PlateLine};
use crate::style;

const BOUNDARY_STROKE: Stroke = Stroke {
    width: 1.0,
    color: Color32::YELLOW,
};

/// Draws tectonic plate boundaries as polylines.
pub struct PlateLines<'a> {
    lines: &'a [PlateLine],
}

impl<'a> PlateLines<'a> {
    pub fn new(lines: &'a [PlateLine]) -> Self {
        Self { lines }
    }
}

impl Plugin for PlateLines<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        _response: &Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        for line in self.lines {
            let points = line
                .points
                .iter()
                .map(|position| projector.project(*position).to_pos2())
                .collect();
            ui.painter().add(Shape::line(points, BOUNDARY_STROKE));
        }
    }
}

/// Draws one circle marker per earthquake and lets the user select one by
/// clicking it. The selection survives the frame in the app state.
pub struct Earthquakes<'a> {
    quakes: &'a [Earthquake],
    selected: &'a mut Option<usize>,
}

impl<'a> Earthquakes<'a> {
    pub fn new(quakes: &'a [Earthquake], selected: &'a mut Option<usize>) -> Self {
        Self { quakes, selected }
    }
}

impl Plugin for Earthquakes<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let clicked_at = if !response.changed() && response.clicked_by(egui::PointerButton::Primary)
        {
            response.interact_pointer_pos()
        } else {
            None
        };

        if clicked_at.is_some() {
            // A click landing on no marker clears the selection.
            *self.selected = None;
        }

        for (index, quake) in self.quakes.iter().enumerate() {
            let center = projector.project(quake.position).to_pos2();
            let style = style::marker_style(quake.magnitude, quake.depth_km);

            if let Some(click) = clicked_at {
                if click.distance(center) < style.radius {
                    *self.selected = Some(index);
                }
            }

            ui.painter()
                .circle(center, style.radius, style.fill, style.stroke);
        }
    }
}
