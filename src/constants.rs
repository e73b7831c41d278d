pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const COLOR_PATH: &str = "/color";
pub const OFF_PATH: &str = "/off";
pub const SPOTIFY_PATH: &str = "/spotify";
pub const MANUAL_PATH: &str = "/manual";
pub const POST_WORKERS: usize = 16;
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub const GUI_PICKER_WIDTH: f32 = 400.0;
pub const GUI_PICKER_HEIGHT: f32 = 400.0;
pub const GUI_PICKER_BORDER_WIDTH: f32 = 1.0;
pub const GUI_PICKER_BORDER_COLOR: &str = "#fff";
pub const GUI_PICKER_HANDLE_RADIUS: f32 = 8.0;
pub const GUI_WHEEL_SEGMENTS: usize = 120;
pub const GUI_WHEEL_RINGS: usize = 16;
pub const GUI_SWATCH_HEIGHT: f32 = 48.0;
pub const GUI_SIDEBAR_WIDTH: f32 = 220.0;
pub const GUI_PANEL_PADDING: f32 = 16.0;
pub const GUI_RGB_INPUT_WIDTH: f32 = 80.0;
pub const GUI_LOADING_REPAINT_MS: u64 = 100;
