//! # roi_engine
//!
//! Cost comparison engine behind the ROI calculator.
//!
//! For a monthly support volume the engine works out, per plan, the human
//! agent cost of the interactions automation does not resolve and the
//! software cost of the cheapest tier that covers the volume. Competitors are
//! then measured against the evaluated product: savings, ROI percent and
//! agent hours saved.
//!
//! The engine is a pure function of its inputs. Input sanitization happens
//! once at the boundary ([`CalculationInput::resolve`]); after that nothing
//! can fail.
//!
//! ## Example
//!
//! ```rust
//! use roi_engine::{CalculationInput, CostEngine};
//! use roi_pricing::ConfigLoader;
//!
//! let engine = CostEngine::new(ConfigLoader::embedded().unwrap());
//! let result = engine.calculate(&CalculationInput::new(750).annual());
//!
//! if let Some(headline) = result.headline() {
//!     println!("Save {:.2} per year against {}", headline.savings, headline.name);
//! }
//! ```

pub mod curve;
pub mod engine;
pub mod input;
pub mod result;
pub mod tier;

pub use curve::{volume_steps, CurvePoint, CurveValue};
pub use engine::{compute_costs, highest_competitor, upsell_revenue, CostEngine};
pub use input::{AssumptionOverrides, CalculationInput, Period, ResolvedInput};
pub use result::{CalculationResult, Comparison, PlanCost};
pub use tier::{select_tier, TierSelection};
