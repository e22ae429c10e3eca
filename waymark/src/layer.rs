use std::ops::RangeInclusive;

use egui::{Context, CursorIcon, Pos2, Response, Ui, Vec2};
use log::{debug, trace};

use crate::{
    hover::{classify, HoverChange},
    map::Layer,
    scene::{Scene, Stamp},
    shapes::{Label, Marker, Patch, Polyline, Shape},
    Position, Projector,
};

/// A pointer event relayed to a shape handler.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in viewport pixels.
    pub screen: Pos2,

    /// The same position unprojected into geographical coordinates.
    pub position: Position,
}

/// Handler invoked with the event and the shapes under the pointer, topmost first.
pub type Handler<T> = Box<dyn FnMut(&PointerEvent, &[&T])>;

/// Full configuration of a [`ShapeLayer`]. Passing it to [`ShapeLayer::reconfigure`] replaces
/// the whole configuration, so fields omitted via `..Default::default()` reset to their
/// defaults rather than keeping their previous values.
pub struct LayerOptions<T> {
    /// Shapes to draw, in paint order: later shapes draw on top and are matched first by
    /// pointer lookups.
    pub shapes: Vec<T>,

    /// Opacity multiplied into every color of the layer. Defaults to fully opaque.
    pub opacity: f32,

    /// Zoom levels at which the layer is drawn and relays pointer events. Defaults to all.
    pub visible_zoom: RangeInclusive<f64>,

    /// How many pixels away from a shape's footprint a pointer still hits it.
    pub hit_tolerance: f32,

    pub on_click: Option<Handler<T>>,
    pub on_double_click: Option<Handler<T>>,
    pub on_enter: Option<Handler<T>>,
    pub on_leave: Option<Handler<T>>,
}

impl<T> Default for LayerOptions<T> {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            opacity: 1.,
            visible_zoom: 0. ..=19.,
            hit_tolerance: 4.,
            on_click: None,
            on_double_click: None,
            on_enter: None,
            on_leave: None,
        }
    }
}

/// Counters exposing the layer's caching behavior, mostly for diagnostics and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayerStats {
    /// How many times the scene was rebuilt from the dataset.
    pub scene_builds: usize,

    /// Frames drawn by translating an existing scene during a drag, without rebuilding.
    pub translated_frames: usize,

    /// Pointer lookups performed against the spatial index.
    pub hit_lookups: usize,
}

/// An overlay drawing a dataset of shapes on the map and hit-testing them against pointer
/// events. One instance per overlay kind; keep it in your application state and attach it to
/// the [`crate::Map`] on every frame with [`crate::Map::with_layer`].
pub struct ShapeLayer<T> {
    options: LayerOptions<T>,
    revision: u64,
    scene: Option<Scene>,
    hovered: Vec<usize>,
    cursor_hot: bool,
    stats: LayerStats,
}

/// Layer of [`Marker`]s.
pub type MarkerLayer = ShapeLayer<Marker>;
/// Layer of [`Polyline`]s.
pub type PolylineLayer = ShapeLayer<Polyline>;
/// Layer of [`Patch`]es.
pub type PatchLayer = ShapeLayer<Patch>;
/// Layer of [`Label`]s.
pub type LabelLayer = ShapeLayer<Label>;

impl<T> ShapeLayer<T>
where
    T: Shape,
{
    pub fn new(options: LayerOptions<T>) -> Self {
        Self {
            options,
            revision: 0,
            scene: None,
            hovered: Vec::new(),
            cursor_hot: false,
            stats: LayerStats::default(),
        }
    }

    pub fn from_shapes(shapes: Vec<T>) -> Self {
        Self::new(LayerOptions {
            shapes,
            ..Default::default()
        })
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.options.opacity = opacity;
        self
    }

    pub fn with_visible_zoom(mut self, visible_zoom: RangeInclusive<f64>) -> Self {
        self.options.visible_zoom = visible_zoom;
        self
    }

    pub fn with_hit_tolerance(mut self, hit_tolerance: f32) -> Self {
        self.options.hit_tolerance = hit_tolerance;
        self
    }

    pub fn on_click(mut self, handler: impl FnMut(&PointerEvent, &[&T]) + 'static) -> Self {
        self.options.on_click = Some(Box::new(handler));
        self
    }

    pub fn on_double_click(mut self, handler: impl FnMut(&PointerEvent, &[&T]) + 'static) -> Self {
        self.options.on_double_click = Some(Box::new(handler));
        self
    }

    pub fn on_enter(mut self, handler: impl FnMut(&PointerEvent, &[&T]) + 'static) -> Self {
        self.options.on_enter = Some(Box::new(handler));
        self
    }

    pub fn on_leave(mut self, handler: impl FnMut(&PointerEvent, &[&T]) + 'static) -> Self {
        self.options.on_leave = Some(Box::new(handler));
        self
    }

    pub fn shapes(&self) -> &[T] {
        &self.options.shapes
    }

    pub fn stats(&self) -> LayerStats {
        self.stats
    }

    /// Replace the entire configuration. This is a full replace, never a merge: anything the
    /// new options leave at its default is reset, including handlers. The cached scene is
    /// invalidated and the hover state cleared without firing any handler, since the old
    /// indices describe shapes that no longer exist.
    pub fn reconfigure(&mut self, options: LayerOptions<T>) {
        debug!("reconfiguring layer with {} shapes", options.shapes.len());
        self.options = options;
        self.revision = self.revision.wrapping_add(1);
        // The cached scene indexes the old dataset; pointer events arriving before the next
        // prepare must not resolve against it.
        self.scene = None;
        self.hovered.clear();
        self.cursor_hot = false;
    }

    /// Make sure the cached scene matches the given projector, rebuilding it if the dataset,
    /// zoom or viewport changed. While `dragging`, a scene differing only by the camera
    /// center is kept and later drawn translated, so large datasets are not reprojected on
    /// every frame of a pan gesture.
    ///
    /// [`Layer::run`] calls this; it is public so tests and custom hosts can drive a layer
    /// with a hand-built [`Projector`].
    pub fn prepare(&mut self, ctx: &Context, projector: &Projector, dragging: bool) {
        let stamp = Stamp::new(self.revision, projector);

        let reusable = match &self.scene {
            Some(scene) => {
                *scene.stamp() == stamp || (dragging && scene.stamp().translatable_to(&stamp))
            }
            None => false,
        };

        if !reusable {
            trace!("building scene for {} shapes", self.options.shapes.len());
            let placements = self
                .options
                .shapes
                .iter()
                .map(|shape| shape.place(ctx, projector))
                .collect();
            self.scene = Some(Scene::build(placements, stamp));
            self.stats.scene_builds += 1;
        }
    }

    /// Relay a pointer move. Looks up the shapes under the pointer, compares them with the
    /// previous hover set, and fires `on_enter`/`on_leave` accordingly; both always receive
    /// the new set. The lookup is skipped entirely when no handler is registered.
    pub fn pointer_moved(&mut self, screen: Pos2, projector: &Projector) {
        if !self.any_handler() {
            return;
        }

        let Some(next) = self.lookup(screen, projector) else {
            return;
        };
        self.cursor_hot = !next.is_empty();

        let LayerOptions {
            shapes,
            on_enter,
            on_leave,
            ..
        } = &mut self.options;

        if on_enter.is_some() || on_leave.is_some() {
            let event = PointerEvent {
                screen,
                position: projector.unproject(screen),
            };

            match classify(&self.hovered, &next) {
                HoverChange::Unchanged => {}
                HoverChange::Enter => fire(on_enter, shapes, &event, &next),
                HoverChange::Leave => fire(on_leave, shapes, &event, &next),
                HoverChange::LeaveThenEnter => {
                    fire(on_leave, shapes, &event, &next);
                    fire(on_enter, shapes, &event, &next);
                }
            }
        }

        self.hovered = next;
    }

    /// Relay a click. Invokes `on_click` with the shapes under the pointer, topmost first,
    /// or not at all when nothing was hit.
    pub fn click(&mut self, screen: Pos2, projector: &Projector) {
        self.press(screen, projector, false);
    }

    /// Relay a double-click, like [`ShapeLayer::click`] but for `on_double_click`.
    pub fn double_click(&mut self, screen: Pos2, projector: &Projector) {
        self.press(screen, projector, true);
    }

    fn press(&mut self, screen: Pos2, projector: &Projector, double: bool) {
        let wanted = if double {
            self.options.on_double_click.is_some()
        } else {
            self.options.on_click.is_some()
        };
        if !wanted {
            return;
        }

        let Some(hits) = self.lookup(screen, projector) else {
            return;
        };
        if hits.is_empty() {
            return;
        }

        let event = PointerEvent {
            screen,
            position: projector.unproject(screen),
        };

        let LayerOptions {
            shapes,
            on_click,
            on_double_click,
            ..
        } = &mut self.options;

        let handler = if double { on_double_click } else { on_click };
        fire(handler, shapes, &event, &hits);
    }

    /// Query the scene under the pointer, shifting the query into the scene's own coordinates
    /// when it is currently drawn translated. `None` before the first [`ShapeLayer::prepare`].
    fn lookup(&mut self, screen: Pos2, projector: &Projector) -> Option<Vec<usize>> {
        let scene = self.scene.as_ref()?;
        let offset = scene.offset(projector);
        let hits = scene.query(screen - offset, self.options.hit_tolerance);
        self.stats.hit_lookups += 1;
        Some(hits)
    }

    fn any_handler(&self) -> bool {
        self.options.on_click.is_some()
            || self.options.on_double_click.is_some()
            || self.options.on_enter.is_some()
            || self.options.on_leave.is_some()
    }
}

fn fire<T>(handler: &mut Option<Handler<T>>, shapes: &[T], event: &PointerEvent, hits: &[usize]) {
    if let Some(handler) = handler {
        let matched: Vec<&T> = hits.iter().map(|index| &shapes[*index]).collect();
        handler(event, &matched);
    }
}

impl<T> Layer for ShapeLayer<T>
where
    T: Shape,
{
    fn run(&mut self, ui: &mut Ui, response: &Response, projector: &Projector) {
        if !self.options.visible_zoom.contains(&projector.zoom()) {
            // Gated out; forget the hover state silently.
            self.hovered.clear();
            self.cursor_hot = false;
            return;
        }

        let dragging = response.dragged();
        self.prepare(ui.ctx(), projector, dragging);

        let offset = self
            .scene
            .as_ref()
            .map(|scene| scene.offset(projector))
            .unwrap_or(Vec2::ZERO);
        if offset != Vec2::ZERO {
            self.stats.translated_frames += 1;
        }

        let painter = ui.painter().with_clip_rect(projector.clip_rect());
        if let Some(scene) = &self.scene {
            for (shape, placement) in self.options.shapes.iter().zip(scene.placements()) {
                if offset == Vec2::ZERO {
                    shape.draw(&painter, placement, self.options.opacity);
                } else {
                    shape.draw(&painter, &placement.translated(offset), self.options.opacity);
                }
            }
        }

        // While the map is being dragged, the pointer is busy with the gesture.
        if dragging {
            return;
        }

        if let Some(pos) = response.hover_pos() {
            self.pointer_moved(pos, projector);
        } else {
            // Pointer left the map, stop requesting the pointing hand.
            self.cursor_hot = false;
        }

        if self.cursor_hot && self.any_handler() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.double_click(pos, projector);
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.click(pos, projector);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lon_lat, Camera, Footprint, Location};
    use egui::{pos2, Rect};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Dummy {
        location: Location,
        radius: f32,
        placed: Rc<Cell<usize>>,
    }

    impl Dummy {
        fn at(location: impl Into<Location>) -> Self {
            Self {
                location: location.into(),
                radius: 5.,
                placed: Rc::default(),
            }
        }
    }

    impl Shape for Dummy {
        fn place(&self, _ctx: &Context, projector: &Projector) -> crate::shapes::Placement {
            self.placed.set(self.placed.get() + 1);
            crate::shapes::Placement {
                anchor: self.location.resolve(projector),
                footprint: Footprint::Disc {
                    center: self.location.resolve(projector),
                    radius: self.radius,
                },
            }
        }

        fn draw(&self, _painter: &egui::Painter, _placement: &crate::shapes::Placement, _opacity: f32) {}
    }

    fn projector_at(center: Position) -> Projector {
        Projector::new(
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.)),
            &Camera::new(center, 10.).unwrap(),
        )
    }

    fn projector() -> Projector {
        projector_at(lon_lat(17., 51.))
    }

    /// Records every handler invocation as the list of anchors of the matched shapes.
    type Log = Rc<std::cell::RefCell<Vec<Vec<Pos2>>>>;

    fn recording(log: &Log) -> impl FnMut(&PointerEvent, &[&Dummy]) + 'static {
        let log = log.clone();
        move |_event, matched| {
            log.borrow_mut().push(
                matched
                    .iter()
                    .map(|dummy| match dummy.location {
                        Location::Screen(pos) => pos,
                        Location::Geo(_) => Pos2::ZERO,
                    })
                    .collect(),
            );
        }
    }

    #[test]
    fn hovering_a_marker_and_leaving_it() {
        let enters: Log = Rc::default();
        let leaves: Log = Rc::default();

        let mut layer =
            ShapeLayer::from_shapes(vec![Dummy::at(pos2(20., 20.)), Dummy::at(pos2(70., 70.))])
                .with_hit_tolerance(0.)
                .on_enter(recording(&enters))
                .on_leave(recording(&leaves));

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);

        // Over the first shape only.
        layer.pointer_moved(pos2(21., 20.), &projector);
        assert_eq!(vec![vec![pos2(20., 20.)]], *enters.borrow());
        assert!(leaves.borrow().is_empty());

        // Still over it; nothing new fires.
        layer.pointer_moved(pos2(20., 21.), &projector);
        assert_eq!(1, enters.borrow().len());
        assert!(leaves.borrow().is_empty());

        // Off all shapes; one leave with the empty set.
        layer.pointer_moved(pos2(50., 20.), &projector);
        assert_eq!(1, enters.borrow().len());
        assert_eq!(vec![Vec::<Pos2>::new()], *leaves.borrow());
    }

    #[test]
    fn moving_between_shapes_fires_leave_then_enter() {
        let enters: Log = Rc::default();
        let leaves: Log = Rc::default();

        // Two discs close enough that the pointer can jump from one to the other.
        let mut layer =
            ShapeLayer::from_shapes(vec![Dummy::at(pos2(20., 20.)), Dummy::at(pos2(40., 20.))])
                .with_hit_tolerance(0.)
                .on_enter(recording(&enters))
                .on_leave(recording(&leaves));

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);

        layer.pointer_moved(pos2(20., 20.), &projector);
        layer.pointer_moved(pos2(40., 20.), &projector);

        // Both fired with the new set.
        assert_eq!(
            vec![vec![pos2(20., 20.)], vec![pos2(40., 20.)]],
            *enters.borrow()
        );
        assert_eq!(vec![vec![pos2(40., 20.)]], *leaves.borrow());
    }

    #[test]
    fn click_on_nothing_does_not_invoke_the_handler() {
        let clicks: Log = Rc::default();

        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(pos2(20., 20.))])
            .with_hit_tolerance(0.)
            .on_click(recording(&clicks));

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);

        layer.click(pos2(80., 80.), &projector);
        assert!(clicks.borrow().is_empty());

        layer.click(pos2(20., 20.), &projector);
        assert_eq!(1, clicks.borrow().len());
    }

    #[test]
    fn overlapping_shapes_reported_topmost_first() {
        let clicks: Log = Rc::default();

        let mut layer =
            ShapeLayer::from_shapes(vec![Dummy::at(pos2(20., 20.)), Dummy::at(pos2(22., 20.))])
                .on_click(recording(&clicks));

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);

        layer.click(pos2(21., 20.), &projector);

        // The later shape draws on top, so it is matched first.
        assert_eq!(
            vec![vec![pos2(22., 20.), pos2(20., 20.)]],
            *clicks.borrow()
        );
    }

    #[test]
    fn reconfigure_resets_omitted_fields_to_defaults() {
        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(pos2(1., 1.))])
            .with_opacity(0.5)
            .with_visible_zoom(5. ..=10.)
            .with_hit_tolerance(8.)
            .on_click(|_, _| {});

        layer.reconfigure(LayerOptions {
            shapes: vec![Dummy::at(pos2(2., 2.)), Dummy::at(pos2(3., 3.))],
            ..Default::default()
        });

        assert_eq!(2, layer.shapes().len());
        assert_eq!(1., layer.options.opacity);
        assert_eq!(0. ..=19., layer.options.visible_zoom);
        assert_eq!(4., layer.options.hit_tolerance);
        assert!(!layer.any_handler());
    }

    #[test]
    fn reconfigure_clears_hover_without_firing() {
        let leaves: Log = Rc::default();

        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(pos2(20., 20.))])
            .on_leave(recording(&leaves));

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);
        layer.pointer_moved(pos2(20., 20.), &projector);
        assert_eq!(vec![0], layer.hovered);

        layer.reconfigure(LayerOptions::default());

        assert!(layer.hovered.is_empty());
        assert!(leaves.borrow().is_empty());
    }

    #[test]
    fn click_between_reconfigure_and_prepare_is_a_miss() {
        let clicks: Log = Rc::default();

        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(pos2(20., 20.))])
            .on_click(recording(&clicks));

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);

        // The dataset shrank, but no frame ran yet; the old scene must not be consulted.
        layer.reconfigure(LayerOptions {
            on_click: Some(Box::new(recording(&clicks))),
            ..Default::default()
        });
        layer.click(pos2(20., 20.), &projector);
        assert!(clicks.borrow().is_empty());

        layer.prepare(&ctx, &projector, false);
        layer.click(pos2(20., 20.), &projector);
        assert!(clicks.borrow().is_empty());
    }

    #[test]
    fn scene_is_built_once_for_unchanged_state() {
        let shape = Dummy::at(lon_lat(17., 51.));
        let placed = shape.placed.clone();
        let mut layer = ShapeLayer::from_shapes(vec![shape]);

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);
        layer.prepare(&ctx, &projector, false);
        layer.prepare(&ctx, &projector, false);

        assert_eq!(1, layer.stats().scene_builds);
        assert_eq!(1, placed.get());

        // A camera move without a drag is a real change.
        layer.prepare(&ctx, &projector_at(lon_lat(17.1, 51.)), false);
        assert_eq!(2, layer.stats().scene_builds);
        assert_eq!(2, placed.get());

        // So is a reconfiguration, even against the same projector.
        layer.reconfigure(LayerOptions::default());
        layer.prepare(&ctx, &projector, false);
        assert_eq!(3, layer.stats().scene_builds);
    }

    #[test]
    fn dragging_translates_instead_of_rebuilding() {
        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(lon_lat(17., 51.))]);

        let ctx = Context::default();
        let built_at = projector();
        layer.prepare(&ctx, &built_at, false);
        assert_eq!(1, layer.stats().scene_builds);

        let panned = projector_at(lon_lat(17.05, 51.));
        layer.prepare(&ctx, &panned, true);
        assert_eq!(1, layer.stats().scene_builds, "drag must not rebuild");

        // Translating the stale scene gives the same result as a fresh build.
        let scene = layer.scene.as_ref().unwrap();
        let offset = scene.offset(&panned);
        let translated = scene.placements()[0].translated(offset);

        let mut fresh = ShapeLayer::from_shapes(vec![Dummy::at(lon_lat(17., 51.))]);
        fresh.prepare(&ctx, &panned, false);
        let rebuilt = &fresh.scene.as_ref().unwrap().placements()[0];

        approx::assert_relative_eq!(translated.anchor.x, rebuilt.anchor.x, epsilon = 0.01);
        approx::assert_relative_eq!(translated.anchor.y, rebuilt.anchor.y, epsilon = 0.01);

        // Once the drag ends, the next prepare rebuilds.
        layer.prepare(&ctx, &panned, false);
        assert_eq!(2, layer.stats().scene_builds);
    }

    #[test]
    fn hits_follow_the_scene_while_dragging() {
        let hits: Log = Rc::default();

        let position = lon_lat(17., 51.);
        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(position)])
            .on_click(recording(&hits));

        let ctx = Context::default();
        let built_at = projector();
        layer.prepare(&ctx, &built_at, false);

        let panned = projector_at(lon_lat(17.05, 51.));
        layer.prepare(&ctx, &panned, true);

        // The shape has visually moved with the pan; clicking its new position hits it.
        layer.click(panned.project(position), &panned);
        assert_eq!(1, hits.borrow().len());

        // Its old position no longer does.
        layer.click(built_at.project(position), &panned);
        assert_eq!(1, hits.borrow().len());
    }

    #[test]
    fn lookup_skipped_without_handlers() {
        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(pos2(20., 20.))]);

        let ctx = Context::default();
        let projector = projector();
        layer.prepare(&ctx, &projector, false);
        layer.pointer_moved(pos2(20., 20.), &projector);
        layer.click(pos2(20., 20.), &projector);

        assert_eq!(0, layer.stats().hit_lookups);
    }

    #[test]
    fn screen_anchored_shape_is_unaffected_by_the_camera() {
        let mut layer = ShapeLayer::from_shapes(vec![Dummy::at(pos2(33., 44.))]);

        let ctx = Context::default();
        layer.prepare(&ctx, &projector_at(lon_lat(17., 51.)), false);
        let first = layer.scene.as_ref().unwrap().placements()[0].clone();

        layer.prepare(&ctx, &projector_at(lon_lat(-120., -33.)), false);
        let second = layer.scene.as_ref().unwrap().placements()[0].clone();

        assert_eq!(first, second);
        assert_eq!(pos2(33., 44.), first.anchor);
    }
}
