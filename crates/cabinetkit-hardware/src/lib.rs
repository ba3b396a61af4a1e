pub mod catalogue;
pub mod error;
pub mod model;
pub mod ranking;

pub use catalogue::HardwareCatalogue;
pub use error::{HardwareError, HardwareResult};
pub use model::{BrandTier, Fitting, FittingCategory, FittingSpec};
pub use ranking::{
    evaluate, rank, Evaluation, FittingContext, RankTier, RankedFitting, Ranking, Rejection,
    RejectionReason,
};
