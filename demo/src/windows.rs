use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use egui::{Align2, RichText, Ui, Window};
use waymark::Camera;

/// Simple GUI to zoom in and out.
pub fn zoom(ui: &Ui, camera: &mut Camera) {
    Window::new("Map")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::LEFT_BOTTOM, [10., -10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("➕").heading()).clicked() {
                    let _ = camera.zoom_in();
                }

                if ui.button(RichText::new("➖").heading()).clicked() {
                    let _ = camera.zoom_out();
                }

                ui.label(format!("zoom: {:.1}", camera.zoom()));
            });
        });
}

/// Shows the most recent events relayed by the layers.
pub fn events(ui: &Ui, events: &Rc<RefCell<VecDeque<String>>>) {
    Window::new("Events")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_TOP, [-10., 10.])
        .fixed_size([260., 150.])
        .show(ui.ctx(), |ui| {
            ui.label("Click or hover the shapes on the map.");
            ui.separator();
            for event in events.borrow().iter() {
                ui.label(event);
            }
        });
}
