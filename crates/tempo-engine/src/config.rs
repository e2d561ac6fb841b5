use serde::{Deserialize, Serialize};
use crate::core::viewport::Viewport;
use crate::error::{ensure_open_range, ensure_positive, ConfigError, ShowcaseError};
use crate::extensions::easing::EasingConfig;

/// Closed numeric range `[min, max]` for randomized parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map `u` in [0, 1] onto the range.
    #[inline]
    pub fn at(&self, u: f32) -> f32 {
        self.min + (self.max - self.min) * u
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Which end of the initial pile leaves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchOrder {
    /// Last object given (drawn on top of the pile) launches first.
    #[default]
    TopFirst,
    /// Objects launch in the order given.
    BottomFirst,
}

/// Sequential launcher tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub duration_ms: f32,
    pub launch_interval_ms: f32,
    /// Vertical spacing between consecutive landed objects, in local units.
    pub landed_stack_offset_y: f32,
    /// Container scale before the responsive factor.
    pub scale: f32,
    /// Viewport size at and above which the container keeps `scale`.
    pub breakpoint: Viewport,
    pub start_x_ratio: f32,
    pub end_x_ratio: f32,
    pub center_y_ratio: f32,
    /// Peak upward lift of the flight arc, in local units.
    pub arc_lift_y: f32,
    pub easing: EasingConfig,
    pub launch_order: LaunchOrder,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            launch_interval_ms: 1000.0,
            landed_stack_offset_y: -1.5,
            scale: 0.35,
            breakpoint: Viewport::new(1200.0, 720.0),
            start_x_ratio: 0.7,
            end_x_ratio: 0.3,
            center_y_ratio: 0.5,
            arc_lift_y: 250.0,
            easing: EasingConfig::default(),
            launch_order: LaunchOrder::TopFirst,
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("launcher.duration_ms", self.duration_ms)?;
        ensure_positive("launcher.launch_interval_ms", self.launch_interval_ms)?;
        ensure_positive("launcher.scale", self.scale)?;
        ensure_positive("launcher.breakpoint.width", self.breakpoint.width)?;
        ensure_positive("launcher.breakpoint.height", self.breakpoint.height)?;
        self.easing.validate()
    }
}

/// Card dealer scene ("ace-of-shadows").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDealerConfig {
    pub design: Viewport,
    pub total_cards: usize,
    /// Vertical spacing of the initial pile, in local units.
    pub pile_offset_y: f32,
    pub launcher: LauncherConfig,
}

impl Default for CardDealerConfig {
    fn default() -> Self {
        Self {
            design: Viewport::new(600.0, 100.0),
            total_cards: 144,
            pile_offset_y: -1.5,
            launcher: LauncherConfig::default(),
        }
    }
}

impl CardDealerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("card_dealer.design.width", self.design.width)?;
        ensure_positive("card_dealer.design.height", self.design.height)?;
        self.launcher.validate()
    }
}

/// Where particles are born.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub x_ratio: f32,
    pub y_ratio: f32,
    /// Cap on the height-proportional downward shift of the centre.
    pub y_offset_max: f32,
    pub y_offset_height_ratio: f32,
    pub spawn_jitter_x: Range,
    pub spawn_jitter_y: Range,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            x_ratio: 0.5,
            y_ratio: 0.5,
            y_offset_max: 80.0,
            y_offset_height_ratio: 0.1,
            spawn_jitter_x: Range::new(-18.0, 18.0),
            spawn_jitter_y: Range::new(4.0, 8.0),
        }
    }
}

/// Per-particle lifetime and motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Fraction of `max_life_ms` at which a particle is recycled.
    pub reset_early_ratio: f32,
    pub life_ms: Range,
    /// Initial spawn staggers life over `[0, max_life * portion]`.
    pub initial_life_portion: f32,
    /// Pixels per millisecond.
    pub velocity_x: Range,
    /// Pixels per millisecond. Negative drifts upward.
    pub velocity_y: Range,
    pub start_scale: Range,
    pub end_scale: Range,
    pub initial_alpha: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            reset_early_ratio: 0.85,
            life_ms: Range::new(400.0, 800.0),
            initial_life_portion: 0.1,
            velocity_x: Range::new(-0.1, 0.1),
            velocity_y: Range::new(-0.6, -0.4),
            start_scale: Range::new(0.85, 0.95),
            end_scale: Range::new(0.05, 0.2),
            initial_alpha: 0.1,
        }
    }
}

/// Alpha over a particle's life: linear rise to `peak_alpha`, then linear fall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    pub peak_alpha: f32,
    pub start_alpha: f32,
    pub peak_until_ratio: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            peak_alpha: 0.9,
            start_alpha: 0.1,
            peak_until_ratio: 0.25,
        }
    }
}

/// Flame scene ("phoenix-flame").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlameConfig {
    pub design: Viewport,
    pub max_particles: usize,
    /// Fixed pixel shift added to the emitter centre and the torch.
    pub placement_y_offset: f32,
    /// Torch centre sits at `height / torch_y_ratio`.
    pub torch_y_ratio: f32,
    /// Torch scale is its contain scale divided by this.
    pub torch_scale_divisor: f32,
    /// Side length assumed for textures the manifest gives no size for.
    pub texture_size_fallback: f32,
    /// Pinned RNG seed; the same seed replays the same flame.
    /// Unset, every opened flame draws a fresh seed from the stage.
    pub seed: Option<u64>,
    pub emitter: EmitterConfig,
    pub particle: ParticleConfig,
    pub fade: FadeConfig,
}

impl Default for FlameConfig {
    fn default() -> Self {
        Self {
            design: Viewport::new(1280.0, 720.0),
            max_particles: 10,
            placement_y_offset: 0.0,
            torch_y_ratio: 1.5,
            torch_scale_divisor: 2.0,
            texture_size_fallback: 512.0,
            seed: None,
            emitter: EmitterConfig::default(),
            particle: ParticleConfig::default(),
            fade: FadeConfig::default(),
        }
    }
}

impl FlameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.particle;
        // (0, 1]: a ratio of exactly 1 recycles at expiry
        if !(p.reset_early_ratio > 0.0 && p.reset_early_ratio <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "flame.particle.reset_early_ratio",
                value: p.reset_early_ratio,
                min: 0.0,
                max: 1.0,
            });
        }
        p.life_ms.validate("flame.particle.life_ms")?;
        ensure_positive("flame.particle.life_ms.min", p.life_ms.min)?;
        p.velocity_x.validate("flame.particle.velocity_x")?;
        p.velocity_y.validate("flame.particle.velocity_y")?;
        p.start_scale.validate("flame.particle.start_scale")?;
        p.end_scale.validate("flame.particle.end_scale")?;
        self.emitter.spawn_jitter_x.validate("flame.emitter.spawn_jitter_x")?;
        self.emitter.spawn_jitter_y.validate("flame.emitter.spawn_jitter_y")?;
        ensure_positive("flame.torch_y_ratio", self.torch_y_ratio)?;
        ensure_positive("flame.torch_scale_divisor", self.torch_scale_divisor)?;
        ensure_positive("flame.texture_size_fallback", self.texture_size_fallback)?;
        ensure_open_range("flame.fade.peak_until_ratio", self.fade.peak_until_ratio, 0.0, 1.0)
    }
}

/// Which side of its avatar a speaker's bubble opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Avatar position as fractions of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRatio {
    pub x_ratio: f32,
    pub y_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSlotConfig {
    pub name: String,
    pub side: Side,
    pub landscape: SlotRatio,
    pub portrait: SlotRatio,
}

impl SpeakerSlotConfig {
    fn new(name: &str, side: Side, landscape: (f32, f32), portrait: (f32, f32)) -> Self {
        Self {
            name: name.to_string(),
            side,
            landscape: SlotRatio { x_ratio: landscape.0, y_ratio: landscape.1 },
            portrait: SlotRatio { x_ratio: portrait.0, y_ratio: portrait.1 },
        }
    }
}

/// Dialogue scene ("magic-words").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    pub design: Viewport,
    pub autoplay_interval_ms: f32,
    /// Autoplay wait when the host plays line audio but never reports the end.
    pub audio_safety_timeout_ms: f32,
    pub focus_scale: f32,
    pub focus_duration_ms: f32,
    pub bubble_pop_from: f32,
    pub bubble_pop_ms: f32,
    /// Bubble offset from its avatar for a left-side speaker; mirrored on the right.
    pub bubble_offset: (f32, f32),
    pub avatar_min_size: f32,
    pub avatar_size_ratio: f32,
    pub fallback_speaker: String,
    pub fallback_emoji: String,
    pub slots: Vec<SpeakerSlotConfig>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            design: Viewport::new(1280.0, 720.0),
            autoplay_interval_ms: 3000.0,
            audio_safety_timeout_ms: 15000.0,
            focus_scale: 1.1,
            focus_duration_ms: 400.0,
            bubble_pop_from: 0.15,
            bubble_pop_ms: 200.0,
            bubble_offset: (75.0, -60.0),
            avatar_min_size: 64.0,
            avatar_size_ratio: 0.2,
            fallback_speaker: "Leonard".to_string(),
            fallback_emoji: "satisfied".to_string(),
            slots: vec![
                SpeakerSlotConfig::new("Sheldon", Side::Left, (0.15, 0.5), (0.2, 0.5)),
                SpeakerSlotConfig::new("Penny", Side::Right, (0.6, 0.5), (0.6, 0.5)),
                SpeakerSlotConfig::new("Leonard", Side::Right, (0.8, 0.5), (0.8, 0.5)),
            ],
        }
    }
}

impl DialogueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("dialogue.autoplay_interval_ms", self.autoplay_interval_ms)?;
        ensure_positive("dialogue.avatar_min_size", self.avatar_min_size)?;
        if self.slots.is_empty() {
            return Err(ConfigError::Empty { field: "dialogue.slots" });
        }
        if !self.slots.iter().any(|s| s.name == self.fallback_speaker) {
            log::warn!(
                "fallback speaker {:?} has no slot; unknown speakers will use {:?}",
                self.fallback_speaker,
                self.slots[0].name
            );
        }
        Ok(())
    }
}

/// All scene tunables, as shipped to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub card_dealer: CardDealerConfig,
    pub flame: FlameConfig,
    pub dialogue: DialogueConfig,
}

impl ShowcaseConfig {
    /// Parse and validate. Missing sections and fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ShowcaseError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.card_dealer.validate()?;
        self.flame.validate()?;
        self.dialogue.validate()
    }
}
