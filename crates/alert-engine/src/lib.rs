pub mod cardiac;
pub mod classify;
pub mod correlate;
pub mod decorate;
pub mod evaluator;
pub mod factory;
pub mod heart_rate;
pub mod pressure;
pub mod saturation;
pub mod strategy;

pub use cardiac::CardiacRhythmStrategy;
pub use classify::classify;
pub use correlate::check_hypotensive_hypoxemia;
pub use decorate::{annotate_repeat, bump_priority};
pub use evaluator::{default_registry, AlertEvaluator, WINDOW_MS};
pub use factory::create_alert;
pub use heart_rate::HeartRateStrategy;
pub use pressure::PressureStrategy;
pub use saturation::SaturationStrategy;
pub use strategy::DetectionStrategy;
