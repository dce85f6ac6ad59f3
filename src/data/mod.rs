//! Input tables consumed by the analysis core
//!
//! DE results, the interaction database, pathway membership and enrichment results are all
//! produced elsewhere; these types hold them read-only.

pub mod enrichment;
pub mod expression;
pub mod interaction;
pub mod pathway;
pub mod tsv;

pub use enrichment::{EnrichmentResult, EnrichmentRow, PathwayHit};
pub use expression::{DiffExpCollection, DiffExpTable, Direction, Gene};
pub use interaction::{InteractionDatabase, InteractionEdge};
pub use pathway::{MembershipRow, Pathway, PathwayCollection};
