use egui::{Color32, Response, Sense, Ui, Widget};
use log::trace;

use crate::{Camera, Projector};

/// An overlay attached to the [`Map`]. Layers are stateful and owned by the application;
/// the map widget only borrows them for the duration of a frame. [`crate::ShapeLayer`] is
/// the built-in implementation; implement this trait to draw arbitrary custom overlays.
pub trait Layer {
    /// Called once per frame, after the map handled its gestures. `response` is the map
    /// widget's response and `projector` reflects the camera state of this frame.
    fn run(&mut self, ui: &mut Ui, response: &Response, projector: &Projector);
}

/// The map widget: a plain-background viewport handling pan and zoom gestures against a
/// [`Camera`], running its layers in order. Instances are to be created on each frame, as all
/// necessary state is stored in the [`Camera`] and the layers.
///
/// # Examples
///
/// ```
/// # use waymark::{Camera, Map, MarkerLayer};
///
/// fn update(ui: &mut egui::Ui, camera: &mut Camera, markers: &mut MarkerLayer) {
///     ui.add(Map::new(camera).with_layer(markers));
/// }
/// ```
pub struct Map<'a, 'l> {
    camera: &'a mut Camera,
    layers: Vec<&'l mut dyn Layer>,
    background: Color32,
    zoom_gesture_enabled: bool,
    drag_gesture_enabled: bool,
    zoom_speed: f64,
}

impl<'a, 'l> Map<'a, 'l> {
    pub fn new(camera: &'a mut Camera) -> Self {
        Self {
            camera,
            layers: Vec::default(),
            background: Color32::from_gray(20),
            zoom_gesture_enabled: true,
            drag_gesture_enabled: true,
            zoom_speed: 2.0,
        }
    }

    /// Attach a layer to the drawing pipeline. Layers run in the order they were attached,
    /// so later ones draw on top.
    pub fn with_layer(mut self, layer: &'l mut dyn Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Color filling the viewport below all layers.
    pub fn with_background(mut self, background: Color32) -> Self {
        self.background = background;
        self
    }

    /// Set whether map should perform zoom gesture.
    ///
    /// Zoom is typically triggered by the mouse wheel while holding <kbd>ctrl</kbd> key on
    /// native and web, and by pinch gesture on Android.
    pub fn zoom_gesture(mut self, enabled: bool) -> Self {
        self.zoom_gesture_enabled = enabled;
        self
    }

    /// Set whether map should perform drag gesture.
    pub fn drag_gesture(mut self, enabled: bool) -> Self {
        self.drag_gesture_enabled = enabled;
        self
    }

    /// Change how far to zoom in/out. Default value is 2.0.
    pub fn zoom_speed(mut self, speed: f64) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Handle zoom and drag inputs, and recalculate everything accordingly.
    fn handle_gestures(&mut self, ui: &Ui, response: &Response) {
        let zoom_delta = ui.input(|input| input.zoom_delta()) as f64;

        // Zooming and dragging need to be exclusive, otherwise the map will get dragged when
        // pinch gesture is used.
        if self.zoom_gesture_enabled
            && !(0.99..=1.01).contains(&zoom_delta)
            && ui.ui_contains_pointer()
        {
            // Displacement of mouse pointer relative to widget center.
            let offset = response.hover_pos().map(|p| p - response.rect.center());

            // While zooming, we want to keep the location under the mouse pointer fixed on
            // the screen. To achieve this, we first move the location to the widget's center,
            // then adjust zoom level, finally move the location back to the original screen
            // position.
            if let Some(offset) = offset {
                self.camera.pan_pixels(-offset);
            }

            // Shift by 1 because of the values given by zoom_delta(). Multiple by 2, because
            // then it felt right with both mouse wheel, and an Android phone.
            self.camera.zoom_by((zoom_delta - 1.) * self.zoom_speed);

            if let Some(offset) = offset {
                self.camera.pan_pixels(offset);
            }
        } else if self.drag_gesture_enabled && response.dragged() {
            trace!("dragging by {:?}", response.drag_delta());
            self.camera.pan_pixels(response.drag_delta());
        }
    }
}

impl Widget for Map<'_, '_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        self.handle_gestures(ui, &response);

        let projector = Projector::new(rect, self.camera);

        ui.painter()
            .with_clip_rect(rect)
            .rect_filled(rect, 0., self.background);

        for layer in self.layers {
            layer.run(ui, &response, &projector);
        }

        response
    }
}
