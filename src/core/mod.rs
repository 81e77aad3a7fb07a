mod engine;
mod reserve;
mod types;

pub use engine::{effective_monthly_rate, project_accumulation, total_months};
pub use reserve::size_reserve;
pub use types::{
    EmploymentType, EngineError, HorizonBasis, ProjectionInput, ProjectionPoint, ProjectionResult,
    RateBasis, ReserveInput, ReserveResult, major_units,
};
