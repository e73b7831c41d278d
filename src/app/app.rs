use eframe::{App as EguiApp, Frame};
use eframe::egui::{CentralPanel, Context, ScrollArea, SidePanel, Ui, Visuals};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use crate::app::color_input::*;
use crate::app::handler::*;
use crate::app::picker::*;
use crate::client::{ColorEndpoint, Mode};
use crate::constants::*;
use crate::error::Result;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Light => Visuals::light(),
            Theme::Dark => Visuals::dark(),
        }
    }
}

pub enum LoadState {
    Loading(Receiver<Result<Color>>),
    Ready(ColorPicker),
    Failed(String),
}

/// Runs `GET /color` on the rayon pool; the result arrives on the returned channel.
pub fn spawn_load(endpoint: Arc<dyn ColorEndpoint>) -> Receiver<Result<Color>> {
    let (tx, rx) = bounded(1);
    rayon::spawn(move || {
        // The window may already be gone.
        let _ = tx.send(endpoint.fetch());
    });
    rx
}

pub struct App {
    state: LoadState,
    options: PickerOptions,
    server: String,

    display: Rc<RefCell<String>>,
    dispatcher: Rc<dyn Dispatch>,

    manual: ColorInputData,
    theme: Theme,
}

impl App {
    pub fn new(
        options: PickerOptions,
        server: String,
        loader: Receiver<Result<Color>>,
        dispatcher: Rc<dyn Dispatch>,
    ) -> Self {
        Self {
            state: LoadState::Loading(loader),
            options,
            server,
            display: Rc::new(RefCell::new(String::new())),
            dispatcher,
            manual: ColorInputData::default(),
            theme: Theme::Dark,
        }
    }

    pub fn picker(&self) -> Option<&ColorPicker> {
        match &self.state {
            LoadState::Ready(picker) => Some(picker),
            _ => None,
        }
    }

    pub fn picker_mut(&mut self) -> Option<&mut ColorPicker> {
        match &mut self.state {
            LoadState::Ready(picker) => Some(picker),
            _ => None,
        }
    }

    pub fn display_text(&self) -> String {
        self.display.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }

    /// Checks for the initial color without blocking the frame.
    pub fn poll_load(&mut self) {
        let LoadState::Loading(rx) = &self.state else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => self.finish_load(result),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::warn!("initial color loader exited without a result");
                self.state = LoadState::Failed("loader exited".to_string());
            }
        }
    }

    fn finish_load(&mut self, result: Result<Color>) {
        match result {
            Ok(color) => {
                log::info!("initial color from {}: {}", self.server, color);
                let mut picker = ColorPicker::new(color, self.options.clone());
                let handler = ChangeHandler::new(self.display.clone(), self.dispatcher.clone());
                picker.on_change(move |color| handler.handle(color));
                self.manual.sync(color);
                self.state = LoadState::Ready(picker);
            }
            Err(e) => {
                log::warn!("could not load initial color from {}: {}", self.server, e);
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Asks the server to stop any sync and blank the strip, and shows black here.
    pub fn turn_off(&mut self) {
        self.dispatcher.command(Command::Off);
        if let Some(picker) = self.picker_mut() {
            picker.set_color(Color::BLACK);
        }
        *self.display.borrow_mut() = Color::BLACK.rgb_string();
        self.manual.sync(Color::BLACK);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        log::info!("switching server to {:?} mode", mode);
        self.dispatcher.command(Command::Mode(mode));
    }

    pub fn side_panel_content(&mut self, ui: &mut Ui) {
        ui.heading("Server");
        ui.label(&self.server);
        match &self.state {
            LoadState::Loading(_) => ui.label("Loading…"),
            LoadState::Ready(_) => ui.label("Connected"),
            LoadState::Failed(reason) => ui.label(format!("Load failed: {}", reason)),
        };

        ui.separator();

        ui.heading("Theme");
        ui.radio_value(&mut self.theme, Theme::Light, "Light");
        ui.radio_value(&mut self.theme, Theme::Dark, "Dark");

        ui.separator();

        ui.heading("Strip");
        ui.horizontal(|ui| {
            if ui.button("Spotify").clicked() {
                self.switch_mode(Mode::Spotify);
            }
            if ui.button("Manual").clicked() {
                self.switch_mode(Mode::Manual);
            }
            if ui.button("Off").clicked() {
                self.turn_off();
            }
        });

        if self.picker().is_none() {
            return;
        }

        if let Some(color) = color_input(ui, "RGB", &mut self.manual) {
            if let Some(picker) = self.picker_mut() {
                picker.select(color);
            }
        }
    }

    pub fn central_panel_content(&mut self, ui: &mut Ui) {
        let LoadState::Ready(picker) = &mut self.state else {
            return;
        };

        let before = picker.color();
        picker.show(ui);
        let after = picker.color();

        ui.label(self.display_text());
        if after != before {
            self.manual.sync(after);
        }
    }
}

impl EguiApp for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_load();
        if self.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(GUI_LOADING_REPAINT_MS));
        }

        SidePanel::right("side_panel")
            .exact_width(GUI_SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    self.side_panel_content(ui);
                });
            });

        CentralPanel::default()
            .show(ctx, |ui| {
                self.central_panel_content(ui);
            });

        ctx.set_visuals(self.theme.visuals());
    }
}
