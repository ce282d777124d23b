//! Animation scene: decorative elements mounted per weather type.
//!
//! Elements only describe where and when they animate. `SceneView` samples
//! them against the scene clock on every frame.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::WeatherType;

// ---------------------------------------------------------------------------
// Seeded PRNG
// ---------------------------------------------------------------------------

/// SplitMix64 stream; kept in state so replays mount identical scenes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { state: mix64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = mix64(self.state.wrapping_add(0x9e37_79b9_7f4a_7c15));
        self.state
    }

    /// Uniform in [0, 1)
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ElementKind {
    SunRays,
    Raindrop,
    Snowflake,
    Cloud,
    WindLine,
}

impl ElementKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            ElementKind::SunRays => "sun-rays",
            ElementKind::Raindrop => "raindrop",
            ElementKind::Snowflake => "snowflake",
            ElementKind::Cloud => "cloud",
            ElementKind::WindLine => "wind-line",
        }
    }

    /// Length of one animation loop when no fixed duration is given
    pub fn default_duration_secs(&self) -> f32 {
        match self {
            ElementKind::SunRays => 10.0,
            ElementKind::Raindrop => 1.0,
            ElementKind::Snowflake => 6.0,
            ElementKind::Cloud => 20.0,
            ElementKind::WindLine => 3.0,
        }
    }
}

/// Extra style applied on top of the element kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum StyleClass {
    /// Render with the icon-font glyph
    IconGlyph,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneElement {
    pub kind: ElementKind,
    /// Horizontal position as a percentage of the scene width, in [0, 100)
    pub left_pct: Option<f32>,
    pub delay_secs: Option<f32>,
    pub duration_secs: Option<f32>,
    pub extra_class: Option<StyleClass>,
}

impl SceneElement {
    pub fn anchored(kind: ElementKind) -> Self {
        Self {
            kind,
            left_pct: None,
            delay_secs: None,
            duration_secs: None,
            extra_class: None,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
            .unwrap_or_else(|| self.kind.default_duration_secs())
    }

    /// Position within the current loop in [0, 1), or `None` while the
    /// start delay has not elapsed.
    pub fn progress(&self, elapsed_ms: u64) -> Option<f32> {
        let elapsed = elapsed_ms as f32 / 1000.0 - self.delay_secs.unwrap_or(0.0);
        if elapsed < 0.0 {
            return None;
        }
        let duration = self.duration_secs().max(f32::EPSILON);
        Some((elapsed % duration) / duration)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MountOptions {
    /// Each element starts after a random delay in [0, spread)
    pub spread_delay_secs: Option<f32>,
    pub fixed_duration_secs: Option<f32>,
    pub extra_class: Option<StyleClass>,
}

impl MountOptions {
    pub fn spread(secs: f32) -> Self {
        Self {
            spread_delay_secs: Some(secs),
            ..Default::default()
        }
    }

    pub fn fixed_duration(secs: f32) -> Self {
        Self {
            fixed_duration_secs: Some(secs),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: StyleClass) -> Self {
        self.extra_class = Some(class);
        self
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    pub marker: Option<WeatherType>,
    pub elements: Vec<SceneElement>,
    /// Milliseconds since the current elements were mounted
    pub elapsed_ms: u64,
    pub rng: SeededRng,
}

impl Scene {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_none() && self.elements.is_empty()
    }

    /// Drop the marker and every element. The RNG stream carries on.
    pub fn reset(&mut self) {
        self.marker = None;
        self.elements.clear();
        self.elapsed_ms = 0;
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|el| el.kind == kind).count()
    }

    /// Append `count` randomly placed elements of one kind
    pub fn mount(&mut self, kind: ElementKind, count: usize, options: MountOptions) {
        self.elements.reserve(count);
        for _ in 0..count {
            let left_pct = self.rng.next_unit() * 100.0;
            let delay_secs = options
                .spread_delay_secs
                .map(|spread| self.rng.next_unit() * spread);
            self.elements.push(SceneElement {
                kind,
                left_pct: Some(left_pct),
                delay_secs,
                duration_secs: options.fixed_duration_secs,
                extra_class: options.extra_class,
            });
        }
    }

    pub fn mount_anchored(&mut self, kind: ElementKind) {
        self.elements.push(SceneElement::anchored(kind));
    }

    pub fn advance(&mut self, ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_raindrops_within_ranges() {
        let mut scene = Scene::new(7);
        scene.mount(ElementKind::Raindrop, 40, MountOptions::spread(2.0));

        assert_eq!(scene.count(ElementKind::Raindrop), 40);
        for el in &scene.elements {
            let left = el.left_pct.unwrap();
            let delay = el.delay_secs.unwrap();
            assert!((0.0..100.0).contains(&left), "left out of range: {left}");
            assert!((0.0..2.0).contains(&delay), "delay out of range: {delay}");
            assert_eq!(el.duration_secs, None);
        }
    }

    #[test]
    fn test_mount_without_spread_has_no_delay() {
        let mut scene = Scene::new(1);
        scene.mount(ElementKind::WindLine, 3, MountOptions::fixed_duration(2.5));
        assert!(scene.elements.iter().all(|el| el.delay_secs.is_none()));
        assert!(scene.elements.iter().all(|el| el.duration_secs() == 2.5));
    }

    #[test]
    fn test_mount_is_additive() {
        let mut scene = Scene::new(1);
        scene.mount(ElementKind::Snowflake, 2, MountOptions::default());
        scene.mount(ElementKind::Snowflake, 3, MountOptions::default());
        assert_eq!(scene.elements.len(), 5);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut scene = Scene::new(3);
        scene.marker = Some(WeatherType::Rainy);
        scene.mount(ElementKind::Raindrop, 10, MountOptions::spread(2.0));
        scene.advance(500);

        scene.reset();
        let once = scene.clone();
        scene.reset();

        assert_eq!(scene, once);
        assert!(scene.is_empty());
        assert_eq!(scene.elapsed_ms, 0);
    }

    #[test]
    fn test_same_seed_mounts_same_scene() {
        let mut a = Scene::new(42);
        let mut b = Scene::new(42);
        a.mount(ElementKind::Raindrop, 5, MountOptions::spread(2.0));
        b.mount(ElementKind::Raindrop, 5, MountOptions::spread(2.0));
        assert_eq!(a.elements, b.elements);
    }

    #[test]
    fn test_progress_waits_for_delay_then_loops() {
        let el = SceneElement {
            delay_secs: Some(1.0),
            duration_secs: Some(2.0),
            ..SceneElement::anchored(ElementKind::Raindrop)
        };
        assert_eq!(el.progress(500), None);
        assert_eq!(el.progress(2000), Some(0.5));
        assert_eq!(el.progress(3000), Some(0.0));
    }

    #[test]
    fn test_next_unit_stays_below_one() {
        let mut rng = SeededRng::new(0);
        for _ in 0..10_000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
