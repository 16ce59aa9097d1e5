pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{SessionConfig, FieldConfig, TypewriterConfig, SectionConfig};
pub use api::error::SessionError;
pub use api::types::{Viewport, SessionEvent, EventRecord};
pub use crate::core::context::SessionContext;
pub use crate::core::schedule::{Scheduler, TimerId};
pub use crate::core::session::Session;
pub use crate::core::time::FixedTimestep;
pub use crate::core::watch::Watch;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::traits::Surface;
pub use bridge::protocol::ProtocolLayout;
pub use systems::decor::Decor;
pub use systems::particles::{Particle, ParticleField, Rng};
pub use systems::sections::SectionTracker;
pub use systems::typewriter::{Typewriter, Direction, Tick};
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
