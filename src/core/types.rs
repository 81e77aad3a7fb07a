use serde::Serialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RateBasis {
    Annual,
    Monthly,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HorizonBasis {
    Years,
    Months,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EmploymentType {
    CivilServant,
    Salaried,
    SelfEmployed,
}

impl EmploymentType {
    /// Default reserve size in months of fixed costs, applied only when the
    /// caller does not choose one. Never feeds into the arithmetic itself.
    pub fn suggested_safety_months(self) -> u32 {
        match self {
            EmploymentType::CivilServant => 3,
            EmploymentType::Salaried => 6,
            EmploymentType::SelfEmployed => 12,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectionInput {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub nominal_rate: f64,
    pub rate_basis: RateBasis,
    pub horizon: u32,
    pub horizon_basis: HorizonBasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub month_index: u32,
    pub accumulated_value: f64,
    pub total_contributed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub final_value: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub series: Vec<ProjectionPoint>,
}

#[derive(Debug, Clone)]
pub struct ReserveInput {
    pub fixed_monthly_cost: f64,
    pub monthly_income: f64,
    pub savings_percent: f64,
    pub safety_months: u32,
    pub employment_type: EmploymentType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveResult {
    pub target_reserve: f64,
    pub monthly_savings: f64,
    pub months_to_reach: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("monthly savings rate is not positive; the reserve target can never be reached")]
    DegenerateGoal,
}

/// Converts an amount in integer minor units (cents) to major currency units.
/// Raw currency widgets deliver cents; everything past this function computes
/// in f64 major units.
pub fn major_units(minor: i64) -> f64 {
    minor as f64 / 100.0
}
