use egui::{emath::Rot2, Align2, Color32, Context, FontId, Painter, Rect, Stroke, Vec2};

use super::{Placement, Shape};
use crate::{Footprint, Location, Projector};

/// What is drawn at the marker's position.
#[derive(Debug, Clone)]
pub enum MarkerIcon {
    /// A circle with a glyph inside, in the style of classic map pins. You can check
    /// [egui's font book](https://www.egui.rs/) to pick a desired character.
    Symbol(char),

    /// A texture uploaded to egui, e.g. via [`egui::Context::load_texture`]. `uv` selects
    /// the part of the texture to use; [`Rect::from_min_max`]`(Pos2::ZERO, pos2(1., 1.))`
    /// means all of it.
    Texture { id: egui::TextureId, uv: Rect },
}

/// Visual style of a [`Marker`].
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub background: Color32,
    pub stroke: Stroke,
    pub glyph_font: FontId,
    pub glyph_color: Color32,

    /// Tint of textured icons; [`Color32::WHITE`] leaves the texture as is.
    pub tint: Color32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            background: Color32::WHITE.gamma_multiply(0.8),
            stroke: Stroke::new(2., Color32::BLACK.gamma_multiply(0.8)),
            glyph_font: FontId::proportional(14.),
            glyph_color: Color32::BLACK.gamma_multiply(0.8),
            tint: Color32::WHITE,
        }
    }
}

/// A sized, rotatable icon anchored at a location.
#[derive(Debug, Clone)]
pub struct Marker {
    pub location: Location,
    pub icon: MarkerIcon,

    /// Icon size in points.
    pub size: Vec2,

    /// How the icon hangs off the location, e.g. [`Align2::CENTER_CENTER`] centers it and
    /// [`Align2::CENTER_BOTTOM`] makes the location the icon's bottom edge midpoint.
    pub anchor: Align2,

    /// Rotation in radians. Applied to textured icons only; glyphs stay upright.
    pub rotation: f32,

    pub style: MarkerStyle,
}

impl Marker {
    pub fn new(location: impl Into<Location>, icon: MarkerIcon) -> Self {
        Self {
            location: location.into(),
            icon,
            size: Vec2::splat(20.),
            anchor: Align2::CENTER_CENTER,
            rotation: 0.,
            style: MarkerStyle::default(),
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_anchor(mut self, anchor: Align2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the icon's rotation in radians.
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    fn rect(&self, anchor: egui::Pos2) -> Rect {
        self.anchor.anchor_size(anchor, self.size)
    }
}

impl Shape for Marker {
    fn place(&self, _ctx: &Context, projector: &Projector) -> Placement {
        let anchor = self.location.resolve(projector);
        let rect = self.rect(anchor);

        // A disc covers the icon whatever its rotation.
        Placement {
            anchor,
            footprint: Footprint::Disc {
                center: rect.center(),
                radius: self.size.max_elem() / 2.,
            },
        }
    }

    fn draw(&self, painter: &Painter, placement: &Placement, opacity: f32) {
        let rect = self.rect(placement.anchor);
        if !painter.clip_rect().intersects(rect) {
            return;
        }

        match &self.icon {
            MarkerIcon::Symbol(glyph) => {
                painter.circle(
                    rect.center(),
                    self.size.max_elem() / 2.,
                    self.style.background.gamma_multiply(opacity),
                    Stroke::new(
                        self.style.stroke.width,
                        self.style.stroke.color.gamma_multiply(opacity),
                    ),
                );
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    glyph.to_string(),
                    self.style.glyph_font.clone(),
                    self.style.glyph_color.gamma_multiply(opacity),
                );
            }
            MarkerIcon::Texture { id, uv } => {
                let mut mesh = egui::Mesh::with_texture(*id);
                mesh.add_rect_with_uv(rect, *uv, self.style.tint.gamma_multiply(opacity));
                mesh.rotate(Rot2::from_angle(self.rotation), rect.center());
                painter.add(mesh);
            }
        }
    }
}
