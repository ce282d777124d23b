//! Actions: user intents, timer follow-ups and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::IconFontSheet;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== City category =====
    /// Picker moved to the given index (0 = no city)
    CitySelect(usize),

    // ===== Focus category =====
    FocusNext,
    FocusPrev,

    // ===== Fetch category =====
    /// Intent: fetch weather for the selected city
    FetchRequest,

    /// Result: simulated latency elapsed for the request token
    FetchDidComplete(u64),

    // ===== Card category =====
    /// Intent: close the weather card
    CardClose,

    /// Follow-up: fade-in may start (transition epoch)
    CardDidShow(u64),

    /// Follow-up: fade-out finished (transition epoch)
    CardDidHide(u64),

    // ===== Loading category =====
    /// Follow-up: spinner fade-out finished (transition epoch)
    LoadingDidHide(u64),

    // ===== Icon font category =====
    IconFontDidLoad(IconFontSheet),
    IconFontDidError(String),

    // ===== Uncategorized (global) =====
    /// Startup
    Init,

    /// Animation frame
    Tick,

    /// Force a re-render
    Render,

    /// Exit the application
    Quit,
}
