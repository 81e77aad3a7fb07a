use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    EmploymentType, EngineError, HorizonBasis, ProjectionInput, ProjectionPoint, RateBasis,
    ReserveInput, effective_monthly_rate, major_units, project_accumulation, size_reserve,
    total_months,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRateBasis {
    #[serde(alias = "yearly", alias = "perYear", alias = "per_year")]
    Annual,
    #[serde(alias = "perMonth", alias = "per_month")]
    Monthly,
}

impl From<ApiRateBasis> for RateBasis {
    fn from(value: ApiRateBasis) -> Self {
        match value {
            ApiRateBasis::Annual => RateBasis::Annual,
            ApiRateBasis::Monthly => RateBasis::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiHorizonBasis {
    Years,
    Months,
}

impl From<ApiHorizonBasis> for HorizonBasis {
    fn from(value: ApiHorizonBasis) -> Self {
        match value {
            ApiHorizonBasis::Years => HorizonBasis::Years,
            ApiHorizonBasis::Months => HorizonBasis::Months,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiEmploymentType {
    #[serde(alias = "civilServant", alias = "civil_servant")]
    CivilServant,
    Salaried,
    #[serde(alias = "selfEmployed", alias = "self_employed")]
    SelfEmployed,
}

impl From<ApiEmploymentType> for EmploymentType {
    fn from(value: ApiEmploymentType) -> Self {
        match value {
            ApiEmploymentType::CivilServant => EmploymentType::CivilServant,
            ApiEmploymentType::Salaried => EmploymentType::Salaried,
            ApiEmploymentType::SelfEmployed => EmploymentType::SelfEmployed,
        }
    }
}

impl From<EmploymentType> for ApiEmploymentType {
    fn from(value: EmploymentType) -> Self {
        match value {
            EmploymentType::CivilServant => ApiEmploymentType::CivilServant,
            EmploymentType::Salaried => ApiEmploymentType::Salaried,
            EmploymentType::SelfEmployed => ApiEmploymentType::SelfEmployed,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    initial_amount_cents: Option<i64>,
    monthly_contribution_cents: Option<i64>,
    rate: Option<f64>,
    rate_basis: Option<ApiRateBasis>,
    horizon: Option<f64>,
    horizon_basis: Option<ApiHorizonBasis>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReservePayload {
    fixed_monthly_cost_cents: Option<i64>,
    monthly_income_cents: Option<i64>,
    savings_percent: Option<f64>,
    safety_months: Option<u32>,
    employment_type: Option<ApiEmploymentType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    final_value: f64,
    total_contributed: f64,
    total_interest: f64,
    total_months: u32,
    effective_monthly_rate: f64,
    series: Vec<ProjectionPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReserveResponse {
    employment_type: ApiEmploymentType,
    safety_months: u32,
    target_reserve: f64,
    monthly_savings: f64,
    months_to_reach: u32,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router();

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("projection API listening on http://{addr}");

    axum::serve(listener, app).await
}

fn router() -> Router {
    Router::new()
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route(
            "/api/reserve",
            get(reserve_get_handler).post(reserve_post_handler),
        )
        .fallback(not_found_handler)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn projection_get_handler(Query(payload): Query<ProjectionPayload>) -> Response {
    projection_handler_impl(payload).await
}

async fn projection_post_handler(Json(payload): Json<ProjectionPayload>) -> Response {
    projection_handler_impl(payload).await
}

async fn projection_handler_impl(payload: ProjectionPayload) -> Response {
    let input = match projection_input_from_payload(payload) {
        Ok(input) => input,
        Err(msg) => {
            tracing::warn!("rejected projection request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match project_accumulation(&input) {
        Ok(result) => {
            let response = ProjectionResponse {
                final_value: result.final_value,
                total_contributed: result.total_contributed,
                total_interest: result.total_interest,
                total_months: total_months(input.horizon, input.horizon_basis),
                effective_monthly_rate: effective_monthly_rate(
                    input.nominal_rate,
                    input.rate_basis,
                ),
                series: result.series,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => engine_error_response(err),
    }
}

async fn reserve_get_handler(Query(payload): Query<ReservePayload>) -> Response {
    reserve_handler_impl(payload).await
}

async fn reserve_post_handler(Json(payload): Json<ReservePayload>) -> Response {
    reserve_handler_impl(payload).await
}

async fn reserve_handler_impl(payload: ReservePayload) -> Response {
    let input = match reserve_input_from_payload(payload) {
        Ok(input) => input,
        Err(msg) => {
            tracing::warn!("rejected reserve request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match size_reserve(&input) {
        Ok(result) => {
            let response = ReserveResponse {
                employment_type: input.employment_type.into(),
                safety_months: input.safety_months,
                target_reserve: result.target_reserve,
                monthly_savings: result.monthly_savings,
                months_to_reach: result.months_to_reach,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => engine_error_response(err),
    }
}

fn projection_input_from_payload(payload: ProjectionPayload) -> Result<ProjectionInput, String> {
    let initial_cents = payload
        .initial_amount_cents
        .ok_or_else(|| "initialAmountCents is required".to_string())?;
    if initial_cents <= 0 {
        return Err("initialAmountCents must be positive".to_string());
    }

    let contribution_cents = payload.monthly_contribution_cents.unwrap_or(0);
    if contribution_cents < 0 {
        return Err("monthlyContributionCents must not be negative".to_string());
    }

    let rate = payload.rate.ok_or_else(|| "rate is required".to_string())?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err("rate must be a positive percentage".to_string());
    }

    let horizon_raw = payload
        .horizon
        .ok_or_else(|| "horizon is required".to_string())?;
    if !horizon_raw.is_finite() || horizon_raw < 1.0 {
        return Err("horizon must be at least one period".to_string());
    }

    Ok(ProjectionInput {
        initial_amount: major_units(initial_cents),
        monthly_contribution: major_units(contribution_cents),
        nominal_rate: rate,
        rate_basis: payload.rate_basis.unwrap_or(ApiRateBasis::Annual).into(),
        horizon: horizon_raw.trunc() as u32,
        horizon_basis: payload
            .horizon_basis
            .unwrap_or(ApiHorizonBasis::Years)
            .into(),
    })
}

fn reserve_input_from_payload(payload: ReservePayload) -> Result<ReserveInput, String> {
    let cost_cents = payload
        .fixed_monthly_cost_cents
        .ok_or_else(|| "fixedMonthlyCostCents is required".to_string())?;
    if cost_cents <= 0 {
        return Err("fixedMonthlyCostCents must be positive".to_string());
    }

    let income_cents = payload
        .monthly_income_cents
        .ok_or_else(|| "monthlyIncomeCents is required".to_string())?;
    if income_cents <= 0 {
        return Err("monthlyIncomeCents must be positive".to_string());
    }

    let savings_percent = payload
        .savings_percent
        .ok_or_else(|| "savingsPercent is required".to_string())?;
    if !savings_percent.is_finite() || savings_percent <= 0.0 {
        return Err("savingsPercent must be positive".to_string());
    }

    let employment_type: EmploymentType = payload
        .employment_type
        .unwrap_or(ApiEmploymentType::Salaried)
        .into();
    let safety_months = payload
        .safety_months
        .unwrap_or_else(|| employment_type.suggested_safety_months());
    if safety_months == 0 {
        return Err("safetyMonths must be at least one".to_string());
    }

    Ok(ReserveInput {
        fixed_monthly_cost: major_units(cost_cents),
        monthly_income: major_units(income_cents),
        savings_percent,
        safety_months,
        employment_type,
    })
}

fn engine_error_response(err: EngineError) -> Response {
    let status = match err {
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::DegenerateGoal => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn projection_input_from_json(json: &str) -> Result<ProjectionInput, String> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    projection_input_from_payload(payload)
}

#[cfg(test)]
fn reserve_input_from_json(json: &str) -> Result<ReserveInput, String> {
    let payload = serde_json::from_str::<ReservePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    reserve_input_from_payload(payload)
}
