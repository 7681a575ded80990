//! PadSense Engine - Pointer-driven pad placement
//!
//! Drives one training session: the pad follows the pointer across the body,
//! shrinks and turns near seams between body parts, glows brighter as it
//! nears a correct spot, and is judged against the target zones on commit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Placement Pipeline                              │
//! │                                                                         │
//! │  ┌──────────────┐    ┌───────────────────┐    ┌────────────────────┐    │
//! │  │ Picking      │    │ Footprint         │    │ Decal Builder      │    │
//! │  │              │───▶│ Corrector         │───▶│                    │    │
//! │  │ sample → hit │    │ taper/lock/realign│    │ one live decal     │    │
//! │  └──────────────┘    └───────────────────┘    └────────────────────┘    │
//! │         │                                               │               │
//! │         ▼                                               ▼               │
//! │  ┌──────────────┐                              ┌────────────────────┐   │
//! │  │ Feedback     │                              │ Zone Matcher       │   │
//! │  │ glow level   │                              │ commit → outcome   │   │
//! │  └──────────────┘                              └────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use padsense_core::PointerSample;
//! use padsense_engine::{EngineConfig, InteractionEngine, MeshScene};
//!
//! let mut engine = InteractionEngine::new(MeshScene::training(), EngineConfig::standard())?;
//! engine.dismiss_overlay();
//! engine.on_pointer_move(PointerSample::new(0.1, -0.05));
//!
//! // Tapered near the seam between the legs
//! let size = engine.live_footprint().map(|f| f.size.y);
//! assert!(size.is_some_and(|y| y < 7.0));
//! # Ok::<(), padsense_core::ConfigError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod corrector;
pub mod decal;
pub mod engine;
pub mod feedback;
pub mod matcher;
pub mod picking;
pub mod scene;
pub mod state;

pub use config::{ConfigPreset, EngineConfig};
pub use corrector::{correct, CorrectedFootprint};
pub use decal::{DecalBuilder, DecalMaterial};
pub use engine::{InteractionEngine, SceneAdapter};
pub use feedback::{FeedbackPolicy, GlowLevel};
pub use matcher::{match_zone, MatchPolicy, ZoneMatch};
pub use picking::{pick, Camera, ContactPoint};
pub use scene::{MeshDecal, MeshScene};
pub use state::{InteractionState, Overlay, ResolveTimer};
