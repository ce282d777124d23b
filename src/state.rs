//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::catalog::{Catalog, CityOption, WeatherType};
use crate::scene::{Scene, DEFAULT_SEED};
use crate::transition::Transition;

/// Status strip severity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Strip background as RGB
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Severity::Info => (255, 255, 255),
            Severity::Success => (46, 204, 113),
            Severity::Error => (231, 76, 60),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Number of status messages kept for inspection
pub const STATUS_HISTORY_LIMIT: usize = 32;

/// Which control receives Enter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    CitySelect,
    FetchButton,
    CloseButton,
}

/// Text shown on the weather card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CardContent {
    pub city_name: String,
    pub temperature: String,
    pub condition: String,
    pub advice: String,
}

/// Icon-font stylesheet, fetched once for snow glyphs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IconFontSheet {
    pub href: String,
    pub bytes: usize,
}

pub const ICON_FONT_HREF: &str =
    "https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined";

/// Delays for the simulated fetch and the fade transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Timings {
    pub fetch_latency_ms: u64,
    pub card_show_delay_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            fetch_latency_ms: 1800,
            card_show_delay_ms: 50,
            fade_out_ms: 600,
        }
    }
}

/// Frame interval for scene and spinner animation
pub const ANIM_TICK_MS: u64 = 50;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Selection ---
    /// Picker index; 0 is the "Select a city" placeholder
    #[debug(section = "Selection", label = "Index")]
    pub selected: usize,

    #[debug(section = "Selection", label = "Focus", debug_fmt)]
    pub focus: Focus,

    // --- Status ---
    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub status: StatusMessage,

    #[debug(skip)]
    pub status_log: Vec<StatusMessage>,

    // --- Fetch cycle ---
    #[debug(section = "Fetch", label = "Enabled")]
    pub fetch_enabled: bool,

    /// Token of the in-flight request and the city it was issued for
    #[debug(section = "Fetch", label = "Pending", debug_fmt)]
    pub pending_request: Option<(u64, String)>,

    /// Last issued request token
    #[debug(skip)]
    pub request_seq: u64,

    #[debug(section = "Fetch", label = "Loading", debug_fmt)]
    pub loading: Transition,

    // --- Card ---
    #[debug(section = "Card", label = "Visibility", debug_fmt)]
    pub card: Transition,

    #[debug(section = "Card", label = "Content", debug_fmt)]
    pub card_content: Option<CardContent>,

    // --- Scene ---
    #[debug(section = "Scene", label = "Weather", debug_fmt)]
    pub current_type: Option<WeatherType>,

    #[debug(section = "Scene", label = "Icon font", debug_fmt)]
    pub icon_font: DataResource<IconFontSheet>,

    #[debug(skip)]
    pub scene: Scene,

    // --- Static config (skipped) ---
    #[debug(skip)]
    pub catalog: Catalog,

    #[debug(skip)]
    pub timings: Timings,

    /// Animation frame counter (spinner)
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(catalog: Catalog, timings: Timings, seed: u64) -> Self {
        Self {
            selected: 0,
            focus: Focus::default(),
            status: StatusMessage::default(),
            status_log: Vec::new(),
            fetch_enabled: true,
            pending_request: None,
            request_seq: 0,
            loading: Transition::default(),
            card: Transition::default(),
            card_content: None,
            current_type: None,
            icon_font: DataResource::Empty,
            scene: Scene::new(seed),
            catalog,
            timings,
            tick_count: 0,
        }
    }

    /// Currently selected city, `None` on the placeholder
    pub fn selected_city(&self) -> Option<&CityOption> {
        self.selected
            .checked_sub(1)
            .and_then(|index| self.catalog.option(index))
    }

    /// Number of picker entries including the placeholder
    pub fn option_count(&self) -> usize {
        self.catalog.len() + 1
    }

    /// Picker index for a city id
    pub fn select_by_id(&mut self, id: &str) -> bool {
        match self.catalog.position(id) {
            Some(index) => {
                self.selected = index + 1;
                true
            }
            None => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Whether a frame tick has anything to move
    pub fn is_animating(&self) -> bool {
        !self.scene.elements.is_empty() || !self.loading.is_hidden()
    }

    /// Snow glyphs fall back to ASCII until the icon font is in
    pub fn icon_glyphs_ready(&self) -> bool {
        self.icon_font.is_loaded()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::builtin(), Timings::default(), DEFAULT_SEED)
    }
}
