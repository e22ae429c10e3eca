mod places;
mod windows;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use egui::{Align2, Color32, Stroke};
use waymark::{
    Camera, Label, LabelLayer, Map, Marker, MarkerIcon, MarkerLayer, Patch, PatchLayer,
    PointerEvent, Polyline, PolylineLayer,
};

/// How many relayed events to keep in the side window.
const EVENT_LOG_LIMIT: usize = 8;

type EventLog = Rc<RefCell<VecDeque<String>>>;

fn log_event(events: &EventLog, what: &str, event: &PointerEvent, count: usize) {
    let mut events = events.borrow_mut();
    events.push_front(format!(
        "{what}: {count} shape(s) at {:.5}, {:.5}",
        event.position.y(),
        event.position.x(),
    ));
    events.truncate(EVENT_LOG_LIMIT);
}

fn markers(events: &EventLog) -> MarkerLayer {
    let clicked = events.clone();
    let entered = events.clone();
    let left = events.clone();

    MarkerLayer::from_shapes(vec![
        Marker::new(places::wroclaw_glowny(), MarkerIcon::Symbol('🚆')),
        Marker::new(places::dworcowa_bus_stop(), MarkerIcon::Symbol('🚌')),
        Marker::new(places::capitol(), MarkerIcon::Symbol('🎶')),
    ])
    .on_click(move |event, matched| log_event(&clicked, "click", event, matched.len()))
    .on_enter(move |event, matched| log_event(&entered, "enter", event, matched.len()))
    .on_leave(move |event, matched| log_event(&left, "leave", event, matched.len()))
}

fn routes(events: &EventLog) -> PolylineLayer {
    let clicked = events.clone();

    PolylineLayer::from_shapes(vec![Polyline::new([
        places::wroclaw_glowny(),
        places::dworcowa_bus_stop(),
        places::capitol(),
    ])
    .with_stroke(Stroke::new(4., Color32::from_rgb(0x20, 0x70, 0xd0)))])
    .with_hit_tolerance(6.)
    .on_click(move |event, matched| log_event(&clicked, "route click", event, matched.len()))
}

fn zones() -> PatchLayer {
    PatchLayer::from_shapes(vec![Patch::new(
        waymark::lon_lat(17.03300, 51.09800),
        waymark::lon_lat(17.03700, 51.09500),
    )
    .with_fill(Color32::from_rgb(0xd0, 0x50, 0x30).gamma_multiply(0.3))])
    .with_opacity(0.9)
}

fn labels() -> LabelLayer {
    LabelLayer::from_shapes(vec![
        Label::new(places::wroclavia(), "Wroclavia").with_anchor(Align2::CENTER_TOP),
        Label::new(places::capitol(), "Capitol").with_anchor(Align2::LEFT_CENTER),
    ])
    // Labels are too small to read when zoomed far out.
    .with_visible_zoom(11. ..=19.)
}

pub struct MyApp {
    camera: Camera,
    markers: MarkerLayer,
    routes: PolylineLayer,
    zones: PatchLayer,
    labels: LabelLayer,
    events: EventLog,
}

impl Default for MyApp {
    fn default() -> Self {
        let events = EventLog::default();

        Self {
            camera: Camera::new(places::wroclaw_glowny(), 15.)
                .unwrap_or_default(),
            markers: markers(&events),
            routes: routes(&events),
            zones: zones(),
            labels: labels(),
            events,
        }
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                // In egui, widgets are constructed and consumed in each frame; the camera and
                // the layers persist in the application state.
                ui.add(
                    Map::new(&mut self.camera)
                        .with_layer(&mut self.zones)
                        .with_layer(&mut self.routes)
                        .with_layer(&mut self.markers)
                        .with_layer(&mut self.labels),
                );

                windows::zoom(ui, &mut self.camera);
                windows::events(ui, &self.events);
            });
    }
}
