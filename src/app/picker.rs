use eframe::egui::{vec2, Color32, Mesh, Pos2, Sense, Shape, Slider, Stroke, Ui, Vec2};
use crate::config::{parse_hex_color, PickerConfig};
use crate::constants::*;
use crate::error::Result;
use crate::types::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub width: f32,
    pub height: f32,
    pub border_width: f32,
    pub border_color: [u8; 3],
    pub anticlockwise: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            width: GUI_PICKER_WIDTH,
            height: GUI_PICKER_HEIGHT,
            border_width: GUI_PICKER_BORDER_WIDTH,
            border_color: [255, 255, 255],
            anticlockwise: true,
        }
    }
}

impl PickerOptions {
    pub fn from_config(config: &PickerConfig) -> Result<Self> {
        Ok(Self {
            width: config.width,
            height: config.height,
            border_width: config.border_width,
            border_color: parse_hex_color(&config.border_color)?,
            anticlockwise: config.anticlockwise,
        })
    }

    pub fn radius(&self) -> f32 {
        (self.width.min(self.height) / 2.0 - self.border_width).max(0.0)
    }
}

type Listener = Box<dyn FnMut(Color)>;

/// Hue/saturation wheel with a value slider and a swatch.
///
/// Listeners registered through [`ColorPicker::on_change`] run synchronously
/// for every user-driven change, drag steps included.
pub struct ColorPicker {
    color: Color,
    hsv: (f32, f32, f32),
    options: PickerOptions,
    listeners: Vec<Listener>,
}

impl ColorPicker {
    pub fn new(initial: Color, options: PickerOptions) -> Self {
        Self {
            color: initial,
            hsv: initial.to_hsv(),
            options,
            listeners: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn on_change(&mut self, listener: impl FnMut(Color) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.hsv = color.to_hsv();
    }

    /// A user picked `color` outside the wheel (buttons, typed values).
    pub fn select(&mut self, color: Color) {
        self.set_color(color);
        self.emit();
    }

    /// A user moved the wheel or slider. Only emits if the RGB value changed.
    pub fn select_hsv(&mut self, h: f32, s: f32, v: f32) {
        self.hsv = (h, s, v);
        let color = Color::from_hsv(h, s, v);
        if color != self.color {
            self.color = color;
            self.emit();
        }
    }

    fn emit(&mut self) {
        let color = self.color;
        for listener in &mut self.listeners {
            listener(color);
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let size = vec2(self.options.width, self.options.height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let center = rect.center();
        let radius = self.options.radius();

        if let Some(pointer) = response.interact_pointer_pos() {
            let (h, s) = hue_sat_at(pointer - center, radius, self.options.anticlockwise);
            self.select_hsv(h, s, self.hsv.2);
        }

        let (h, s, v) = self.hsv;
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.add(Shape::mesh(wheel_mesh(center, radius, v, self.options.anticlockwise)));

            let [br, bg, bb] = self.options.border_color;
            let border = Stroke::new(self.options.border_width, Color32::from_rgb(br, bg, bb));
            painter.circle_stroke(center, radius, border);

            let handle = center + wheel_offset(h, s, radius, self.options.anticlockwise);
            painter.circle_stroke(handle, GUI_PICKER_HANDLE_RADIUS, Stroke::new(2.0, Color32::WHITE));
            painter.circle_stroke(handle, GUI_PICKER_HANDLE_RADIUS + 1.5, Stroke::new(1.0, Color32::BLACK));
        }

        let mut value = v;
        ui.spacing_mut().slider_width = self.options.width;
        if ui.add(Slider::new(&mut value, 0.0..=1.0).show_value(false)).changed() {
            self.select_hsv(h, s, value);
        }

        let (swatch, _) = ui.allocate_exact_size(vec2(self.options.width, GUI_SWATCH_HEIGHT), Sense::hover());
        let [r, g, b] = self.color.to_rgb8();
        ui.painter().rect_filled(swatch, 4.0, Color32::from_rgb(r, g, b));
    }
}

pub fn wheel_offset(hue: f32, sat: f32, radius: f32, anticlockwise: bool) -> Vec2 {
    let angle = hue.to_radians();
    let dir = if anticlockwise {
        vec2(angle.cos(), -angle.sin())
    } else {
        vec2(angle.cos(), angle.sin())
    };
    dir * sat.clamp(0.0, 1.0) * radius
}

/// Inverse of [`wheel_offset`]; points outside the wheel clamp to full saturation.
pub fn hue_sat_at(offset: Vec2, radius: f32, anticlockwise: bool) -> (f32, f32) {
    let y = if anticlockwise { -offset.y } else { offset.y };
    let hue = y.atan2(offset.x).to_degrees().rem_euclid(360.0);
    let sat = if radius > 0.0 {
        (offset.length() / radius).min(1.0)
    } else {
        0.0
    };
    (hue, sat)
}

fn wheel_mesh(center: Pos2, radius: f32, value: f32, anticlockwise: bool) -> Mesh {
    let mut mesh = Mesh::default();
    let segments = GUI_WHEEL_SEGMENTS;

    for ring in 0..=GUI_WHEEL_RINGS {
        let sat = ring as f32 / GUI_WHEEL_RINGS as f32;
        for segment in 0..segments {
            let hue = segment as f32 / segments as f32 * 360.0;
            let [r, g, b] = Color::from_hsv(hue, sat, value).to_rgb8();
            mesh.colored_vertex(
                center + wheel_offset(hue, sat, radius, anticlockwise),
                Color32::from_rgb(r, g, b),
            );
        }
    }

    for ring in 0..GUI_WHEEL_RINGS {
        for segment in 0..segments {
            let next = (segment + 1) % segments;
            let a = (ring * segments + segment) as u32;
            let b = (ring * segments + next) as u32;
            let c = ((ring + 1) * segments + segment) as u32;
            let d = ((ring + 1) * segments + next) as u32;
            mesh.add_triangle(a, c, b);
            mesh.add_triangle(b, c, d);
        }
    }

    mesh
}
