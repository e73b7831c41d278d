use eframe::egui::{TextEdit, Ui};
use crate::app::parse_input::*;
use crate::constants::*;
use crate::types::Color;

pub struct ColorInputData {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub rs: String,
    pub gs: String,
    pub bs: String,
}

impl Default for ColorInputData {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl ColorInputData {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            rs: format!("R: {}", r),
            gs: format!("G: {}", g),
            bs: format!("B: {}", b),
        }
    }

    /// Parses all three fields. Every field is parsed so each bad one gets
    /// flagged, and a color comes back only if all of them are valid.
    pub fn apply(&mut self) -> Option<Color> {
        let r_ok = parse_input("R:", &mut self.r, &mut self.rs);
        let g_ok = parse_input("G:", &mut self.g, &mut self.gs);
        let b_ok = parse_input("B:", &mut self.b, &mut self.bs);
        (r_ok && g_ok && b_ok).then(|| Color::from_rgb8([self.r, self.g, self.b]))
    }

    /// Mirrors a color picked elsewhere into the fields.
    pub fn sync(&mut self, color: Color) {
        let [r, g, b] = color.to_rgb8();
        *self = Self::new(r, g, b);
    }
}

pub fn color_input(ui: &mut Ui, label: &str, data: &mut ColorInputData) -> Option<Color> {
    ui.collapsing(label, |ui| {
        ui.add(TextEdit::singleline(&mut data.rs)
            .desired_width(GUI_RGB_INPUT_WIDTH));
        ui.add(TextEdit::singleline(&mut data.gs)
            .desired_width(GUI_RGB_INPUT_WIDTH));
        ui.add(TextEdit::singleline(&mut data.bs)
            .desired_width(GUI_RGB_INPUT_WIDTH));

        if ui.button("Apply").clicked() {
            data.apply()
        } else {
            None
        }
    })
    .body_returned
    .flatten()
}
