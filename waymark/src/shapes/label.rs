use egui::{Align2, Color32, Context, FontId, Painter, Rect, Vec2};

use super::{Placement, Shape};
use crate::{Footprint, Location, Projector};

/// Visual style of a [`Label`].
#[derive(Debug, Clone)]
pub struct LabelStyle {
    pub font: FontId,
    pub color: Color32,

    /// Color of the plate drawn behind the text.
    pub background: Color32,
    pub corner_radius: f32,

    /// Padding between the text and the edge of the plate.
    pub padding: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: FontId::proportional(12.),
            color: Color32::from_gray(200),
            background: Color32::BLACK.gamma_multiply(0.8),
            corner_radius: 10.,
            padding: 5.,
        }
    }
}

/// Text anchored at a location, drawn over a background plate.
#[derive(Debug, Clone)]
pub struct Label {
    pub location: Location,
    pub text: String,

    /// How the plate hangs off the location, e.g. [`Align2::LEFT_TOP`] puts the location at
    /// the plate's top-left corner.
    pub anchor: Align2,

    pub style: LabelStyle,
}

impl Label {
    pub fn new(location: impl Into<Location>, text: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            text: text.into(),
            anchor: Align2::LEFT_TOP,
            style: LabelStyle::default(),
        }
    }

    pub fn with_anchor(mut self, anchor: Align2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    fn plate(&self, ctx: &Context, anchor: egui::Pos2) -> Rect {
        let galley = ctx.fonts_mut(|fonts| {
            fonts.layout_no_wrap(self.text.clone(), self.style.font.clone(), self.style.color)
        });
        self.anchor
            .anchor_size(anchor, galley.size() + Vec2::splat(self.style.padding * 2.))
    }
}

impl Shape for Label {
    fn place(&self, ctx: &Context, projector: &Projector) -> Placement {
        let anchor = self.location.resolve(projector);
        Placement {
            anchor,
            footprint: Footprint::Rect(self.plate(ctx, anchor)),
        }
    }

    fn draw(&self, painter: &Painter, placement: &Placement, opacity: f32) {
        let Footprint::Rect(plate) = placement.footprint else {
            return;
        };

        if !painter.clip_rect().intersects(plate) {
            return;
        }

        painter.rect_filled(
            plate,
            self.style.corner_radius,
            self.style.background.gamma_multiply(opacity),
        );

        let galley = painter.layout_no_wrap(
            self.text.clone(),
            self.style.font.clone(),
            self.style.color.gamma_multiply(opacity),
        );
        painter.galley(
            plate.min + Vec2::splat(self.style.padding),
            galley,
            Color32::BLACK,
        );
    }
}
