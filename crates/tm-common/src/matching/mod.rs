pub mod affinity;
pub mod filter;
pub mod geo;
pub mod pipeline;
pub mod scoring;
pub mod similarity;
pub mod vectorizer;
pub mod weights;

pub use affinity::{build_affinity_map, AffinityConfig, PairInteraction};
pub use filter::{check_partner_constraints, ConstraintDecision, FilterResult};
pub use geo::haversine_km;
pub use pipeline::{MatchingConfig, MatchingEngine, RankedPartner};
pub use scoring::ScoreBreakdown;
pub use vectorizer::{vectorize, ProfileIntegrityError};
pub use weights::{ScoreWeights, DEFAULT_WEIGHTS};
