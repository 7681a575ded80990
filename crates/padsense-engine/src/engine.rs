//! Interaction engine and renderer integration.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Renderer / Input (browser, native, tests)              │
//! │   pointer move    pointer down    overlay button    frame clock         │
//! └────────┬───────────────┬───────────────┬────────────────┬───────────────┘
//!          ▼               ▼               ▼                ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         InteractionEngine                               │
//! │  ┌──────────┐  ┌───────────┐  ┌──────────────┐  ┌──────────┐            │
//! │  │ pick     │─▶│ correct   │─▶│ DecalBuilder │  │ feedback │            │
//! │  └──────────┘  └───────────┘  └──────────────┘  └──────────┘            │
//! │        commit ─▶ match_zone ─▶ snap ─▶ ResolveTimer ─▶ outcome           │
//! └────────────────────────────────┬────────────────────────────────────────┘
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                SceneAdapter (implement this)                            │
//! │   cast_ray · build_decal · attach · detach · redraw · glow              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use padsense_core::PointerSample;
//! use padsense_engine::{EngineConfig, InteractionEngine, InteractionState, MeshScene};
//!
//! let mut engine = InteractionEngine::new(MeshScene::training(), EngineConfig::standard())?;
//! engine.dismiss_overlay();
//! engine.on_pointer_move(PointerSample::new(-0.35, 0.22));
//!
//! let now = Instant::now();
//! engine.on_pointer_down(now);
//! engine.tick(now + Duration::from_secs(2));
//!
//! assert_eq!(engine.current_state(), InteractionState::Resolved);
//! assert_eq!(engine.outcome(), Some(true));
//! # Ok::<(), padsense_core::ConfigError>(())
//! ```

use std::time::Instant;

use tracing::{debug, info};

use padsense_core::{ConfigError, PointerSample, Vec3};
use padsense_mesh::DecalFootprint;

use crate::config::EngineConfig;
use crate::corrector::{correct, CorrectedFootprint};
use crate::decal::{DecalBuilder, DecalMaterial};
use crate::feedback::GlowLevel;
use crate::matcher::{match_zone, ZoneMatch};
use crate::picking::{pick, ContactPoint};
use crate::state::{InteractionState, Overlay, ResolveTimer};

// ============================================================================
// Scene Adapter Trait
// ============================================================================

/// Trait for renderer integration.
///
/// Implement this to connect a renderer to the engine. Every call is made
/// from the engine's own callbacks, on one thread.
pub trait SceneAdapter {
    /// Renderer-side decal object.
    type Decal;

    /// World point of the nearest body hit under the pointer.
    fn cast_ray(&self, sample: PointerSample) -> Option<Vec3>;

    /// Clip the body mesh to a footprint and pair it with a material.
    fn build_decal(&mut self, footprint: &DecalFootprint, material: DecalMaterial) -> Self::Decal;

    /// Add a decal to the display.
    fn attach(&mut self, decal: &Self::Decal);

    /// Remove a decal from the display.
    fn detach(&mut self, decal: &Self::Decal);

    /// Ask for a new frame.
    fn request_redraw(&mut self) {}

    /// Update the glow indicator; `None` hides it.
    fn show_feedback(&mut self, _level: Option<GlowLevel>) {}
}

// ============================================================================
// Interaction Engine
// ============================================================================

/// One training session against one scene.
pub struct InteractionEngine<S: SceneAdapter> {
    scene: S,
    config: EngineConfig,
    state: InteractionState,
    overlay: Option<Overlay>,
    decal: DecalBuilder<S::Decal>,
    timer: ResolveTimer,
    feedback: Option<GlowLevel>,
    /// Raw hit and its corrected footprint from the last move.
    tracked: Option<(ContactPoint, CorrectedFootprint)>,
    last_match: Option<ZoneMatch>,
    outcome: Option<bool>,
}

impl<S: SceneAdapter> InteractionEngine<S> {
    /// Validate the configuration and start in `Idle` with the intro overlay.
    pub fn new(scene: S, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "Engine ready: {} regions, {} zones, {:?}",
            config.regions.len(),
            config.zones.len(),
            config.match_policy
        );
        Ok(Self {
            scene,
            config,
            state: InteractionState::Idle,
            overlay: Some(Overlay::Intro),
            decal: DecalBuilder::new(),
            timer: ResolveTimer::new(),
            feedback: None,
            tracked: None,
            last_match: None,
            outcome: None,
        })
    }

    /// Pointer moved. Only acts while tracking.
    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        if self.state != InteractionState::Tracking {
            return;
        }

        let Some(contact) = pick(&self.scene, sample) else {
            debug!("Pointer ({:.3}, {:.3}) off the body", sample.x, sample.y);
            self.decal.retire(&mut self.scene);
            self.tracked = None;
            self.set_feedback(None);
            self.scene.request_redraw();
            return;
        };

        let corrected = correct(&contact, self.config.nominal_size, &self.config.regions);
        self.decal
            .place(&mut self.scene, corrected.footprint(), DecalMaterial::Outline);
        self.tracked = Some((contact, corrected));

        let level = self.config.feedback.compute(sample);
        self.set_feedback(Some(level));
        self.scene.request_redraw();
    }

    /// Pointer pressed. Commits the live decal, otherwise does nothing.
    pub fn on_pointer_down(&mut self, now: Instant) {
        if self.state != InteractionState::Tracking || !self.decal.is_live() {
            debug!("Pointer down ignored in {}", self.state.as_str());
            return;
        }
        let Some((hit, tracked)) = self.tracked else {
            return;
        };

        // Judged on the raw hit; realignment only moves the drawn pad
        let result = match_zone(
            &hit.point,
            &self.config.zones,
            self.config.match_policy,
        );
        let footprint = match result.snap_point() {
            Some(snap) => tracked.footprint().recentered(snap),
            None => tracked.footprint(),
        };
        self.decal
            .place(&mut self.scene, footprint, DecalMaterial::Filled);

        self.timer.schedule(now, self.config.resolve_delay);
        self.last_match = Some(result);
        self.transition(InteractionState::Committed);
        self.scene.request_redraw();
    }

    /// Advance time. Resolves a commit once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.state != InteractionState::Committed || !self.timer.poll(now) {
            return;
        }
        let success = self
            .last_match
            .as_ref()
            .is_some_and(ZoneMatch::is_matched);
        self.outcome = Some(success);
        self.overlay = Some(Overlay::Outcome { success });
        self.transition(InteractionState::Resolved);
        info!("Placement {}", if success { "correct" } else { "wrong" });
        self.scene.request_redraw();
    }

    /// Overlay button pressed.
    pub fn dismiss_overlay(&mut self) {
        match self.state {
            InteractionState::Idle => {
                self.overlay = None;
                self.transition(InteractionState::Tracking);
            }
            InteractionState::Resolved => self.enter_idle(),
            InteractionState::Tracking | InteractionState::Committed => {
                debug!("No overlay to dismiss in {}", self.state.as_str());
            }
        }
    }

    /// Abandon the session and show the intro again.
    pub fn reset(&mut self) {
        self.enter_idle();
    }

    fn enter_idle(&mut self) {
        self.decal.retire(&mut self.scene);
        self.timer.cancel();
        self.tracked = None;
        self.last_match = None;
        self.outcome = None;
        self.set_feedback(None);
        self.overlay = Some(Overlay::Intro);
        self.transition(InteractionState::Idle);
        self.scene.request_redraw();
    }

    fn transition(&mut self, next: InteractionState) {
        if self.state != next {
            debug!("State {} -> {}", self.state.as_str(), next.as_str());
        }
        self.state = next;
    }

    fn set_feedback(&mut self, level: Option<GlowLevel>) {
        self.feedback = level;
        self.scene.show_feedback(level);
    }

    /// Current state.
    #[must_use]
    pub fn current_state(&self) -> InteractionState {
        self.state
    }

    /// Placement result, once resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    /// Current glow level; the policy's no-glow level while hidden.
    #[must_use]
    pub fn feedback_intensity(&self) -> f32 {
        self.feedback
            .unwrap_or_else(|| self.config.feedback.idle_level())
            .value()
    }

    /// True while the glow indicator is shown.
    #[must_use]
    pub fn feedback_visible(&self) -> bool {
        self.feedback.is_some()
    }

    /// Visible overlay.
    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Zone match of the last commit.
    #[must_use]
    pub fn last_match(&self) -> Option<&ZoneMatch> {
        self.last_match.as_ref()
    }

    /// Footprint of the attached decal.
    #[must_use]
    pub fn live_footprint(&self) -> Option<&DecalFootprint> {
        self.decal.footprint()
    }

    /// Material of the attached decal.
    #[must_use]
    pub fn live_material(&self) -> Option<DecalMaterial> {
        self.decal.material()
    }

    /// Pending resolve deadline.
    #[must_use]
    pub fn resolve_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::feedback::FeedbackPolicy;
    use crate::picking::Camera;

    /// Flat body panel at z = 1 covering x in [-60, 60], y in [-40, 40].
    #[derive(Default)]
    struct PanelScene {
        next: u32,
        attached: Vec<(u32, DecalFootprint, DecalMaterial)>,
        redraws: u32,
        glow: Option<GlowLevel>,
    }

    impl SceneAdapter for PanelScene {
        type Decal = (u32, DecalFootprint, DecalMaterial);

        fn cast_ray(&self, sample: PointerSample) -> Option<Vec3> {
            let camera = Camera::standard();
            let ray = camera.ray_from_sample(sample);
            let t = (camera.position.z - 1.0) / -ray.direction.z;
            let point = ray.point_at(t);
            (point.x.abs() <= 60.0 && point.y.abs() <= 40.0).then_some(point)
        }

        fn build_decal(&mut self, footprint: &DecalFootprint, material: DecalMaterial) -> Self::Decal {
            self.next += 1;
            (self.next, *footprint, material)
        }

        fn attach(&mut self, decal: &Self::Decal) {
            self.attached.push(*decal);
        }

        fn detach(&mut self, decal: &Self::Decal) {
            self.attached.retain(|d| d.0 != decal.0);
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }

        fn show_feedback(&mut self, level: Option<GlowLevel>) {
            self.glow = level;
        }
    }

    fn engine() -> InteractionEngine<PanelScene> {
        InteractionEngine::new(PanelScene::default(), EngineConfig::standard()).unwrap()
    }

    fn tracking() -> InteractionEngine<PanelScene> {
        let mut engine = engine();
        engine.dismiss_overlay();
        engine
    }

    #[test]
    fn test_starts_idle_with_intro() {
        let engine = engine();
        assert_eq!(engine.current_state(), InteractionState::Idle);
        assert_eq!(engine.overlay(), Some(Overlay::Intro));
        assert_eq!(engine.outcome(), None);
    }

    #[test]
    fn test_pointer_ignored_while_idle() {
        let mut engine = engine();
        engine.on_pointer_move(PointerSample::new(0.0, 0.0));
        assert!(engine.live_footprint().is_none());
        assert!(engine.scene().attached.is_empty());
    }

    #[test]
    fn test_miss_produces_no_decal_and_no_transition() {
        let mut engine = tracking();
        engine.on_pointer_move(PointerSample::new(0.0, 0.0));
        assert!(engine.live_footprint().is_some());

        // Far corner is outside the panel silhouette
        engine.on_pointer_move(PointerSample::new(0.99, 0.99));
        assert!(engine.live_footprint().is_none());
        assert!(engine.scene().attached.is_empty());
        assert!(!engine.feedback_visible());
        assert!(engine.scene().glow.is_none());
        assert_eq!(engine.current_state(), InteractionState::Tracking);

        let (_, hi) = engine.config().feedback.bounds();
        assert!((engine.feedback_intensity() - hi).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_down_without_decal_is_noop() {
        let mut engine = tracking();
        engine.on_pointer_down(Instant::now());
        assert_eq!(engine.current_state(), InteractionState::Tracking);
        assert!(engine.last_match().is_none());
        assert!(engine.resolve_deadline().is_none());
    }

    #[test]
    fn test_pointer_down_while_idle_is_noop() {
        let mut engine = engine();
        engine.on_pointer_down(Instant::now());
        assert_eq!(engine.current_state(), InteractionState::Idle);
    }

    #[test]
    fn test_single_live_decal_while_tracking() {
        let mut engine = tracking();
        for i in 0..10 {
            engine.on_pointer_move(PointerSample::new(-0.2 + i as f32 * 0.02, 0.1));
            assert_eq!(engine.scene().attached.len(), 1);
        }
        assert_eq!(engine.live_material(), Some(DecalMaterial::Outline));
    }

    #[test]
    fn test_full_walk_top_biceps() {
        let mut engine = tracking();
        engine.on_pointer_move(PointerSample::new(-0.35, 0.22));

        let tracked = *engine.live_footprint().unwrap();
        // Realigned onto the upper arm centerline
        assert!((tracked.center.y - 9.678).abs() < 0.02);
        assert!(engine.feedback_visible());

        let now = Instant::now();
        engine.on_pointer_down(now);
        assert_eq!(engine.current_state(), InteractionState::Committed);
        assert_eq!(engine.live_material(), Some(DecalMaterial::Filled));
        assert_eq!(
            engine.last_match(),
            Some(&ZoneMatch::Matched {
                zone: 0,
                name: "top_biceps".into(),
                snap: Vec3::new(-24.0, 10.0, 1.0),
            })
        );
        assert_eq!(engine.live_footprint().unwrap().center, Vec3::new(-24.0, 10.0, 1.0));
        assert_eq!(engine.scene().attached.len(), 1);

        // Pointer is no longer tracked
        engine.on_pointer_move(PointerSample::new(0.5, 0.0));
        assert_eq!(engine.live_footprint().unwrap().center, Vec3::new(-24.0, 10.0, 1.0));

        engine.tick(now + Duration::from_millis(1999));
        assert_eq!(engine.current_state(), InteractionState::Committed);
        assert_eq!(engine.outcome(), None);

        engine.tick(now + Duration::from_secs(2));
        assert_eq!(engine.current_state(), InteractionState::Resolved);
        assert_eq!(engine.outcome(), Some(true));
        assert_eq!(engine.overlay(), Some(Overlay::Outcome { success: true }));

        engine.dismiss_overlay();
        assert_eq!(engine.current_state(), InteractionState::Idle);
        assert_eq!(engine.overlay(), Some(Overlay::Intro));
        assert!(engine.live_footprint().is_none());
        assert!(engine.scene().attached.is_empty());
        assert!(!engine.feedback_visible());
    }

    #[test]
    fn test_commit_matches_raw_hit_not_realigned_point() {
        let mut engine = tracking();
        // Raw hit (-28.5, 10.0) is 4.5 from top_biceps, the realigned (-28.5, 7.65) is 5.07
        engine.on_pointer_move(PointerSample::new(-0.4187, 0.2775));
        let drawn = *engine.live_footprint().unwrap();
        assert!((drawn.center.y - 7.65).abs() < 0.02);

        let now = Instant::now();
        engine.on_pointer_down(now);
        assert!(matches!(
            engine.last_match(),
            Some(ZoneMatch::Matched { zone: 0, .. })
        ));
        assert_eq!(engine.live_footprint().unwrap().center, Vec3::new(-24.0, 10.0, 1.0));

        engine.tick(now + Duration::from_secs(2));
        assert_eq!(engine.outcome(), Some(true));
    }

    #[test]
    fn test_wrong_placement() {
        let mut engine = tracking();
        engine.on_pointer_move(PointerSample::new(0.5, 0.5));
        let frozen = *engine.live_footprint().unwrap();

        let now = Instant::now();
        engine.on_pointer_down(now);
        assert_eq!(engine.last_match(), Some(&ZoneMatch::Unmatched));
        // Decal stays where it was committed
        assert_eq!(engine.live_footprint().unwrap().center, frozen.center);

        engine.tick(now + Duration::from_secs(5));
        assert_eq!(engine.outcome(), Some(false));
        assert_eq!(engine.overlay(), Some(Overlay::Outcome { success: false }));
    }

    #[test]
    fn test_reset_cancels_pending_timer() {
        let mut engine = tracking();
        engine.on_pointer_move(PointerSample::new(-0.35, 0.22));
        let now = Instant::now();
        engine.on_pointer_down(now);
        assert!(engine.resolve_deadline().is_some());

        engine.reset();
        assert_eq!(engine.current_state(), InteractionState::Idle);
        assert!(engine.resolve_deadline().is_none());

        // A stale deadline must not resolve the new session
        engine.dismiss_overlay();
        engine.tick(now + Duration::from_secs(3));
        assert_eq!(engine.current_state(), InteractionState::Tracking);
        assert_eq!(engine.outcome(), None);
    }

    #[test]
    fn test_dismiss_ignored_while_committed() {
        let mut engine = tracking();
        engine.on_pointer_move(PointerSample::new(-0.35, 0.22));
        engine.on_pointer_down(Instant::now());
        engine.dismiss_overlay();
        assert_eq!(engine.current_state(), InteractionState::Committed);
    }

    #[test]
    fn test_feedback_reaches_scene() {
        let mut engine = tracking();
        engine.on_pointer_move(PointerSample::new(-0.6, -0.1));
        let level = engine.scene().glow.unwrap();
        assert!((level.value() - engine.feedback_intensity()).abs() < 1e-6);
        // 0.05 from the chin anchor
        assert!((level.value() - (0.05 * 0.2 - 0.1)).abs() < 1e-5);
        assert!(engine.scene().redraws > 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::standard().with_feedback(FeedbackPolicy::MultiAnchor {
            anchors: vec![],
            cap: 0.3,
            offset: 0.15,
        });
        assert!(matches!(
            InteractionEngine::new(PanelScene::default(), config),
            Err(ConfigError::EmptyAnchorSet)
        ));
    }
}
