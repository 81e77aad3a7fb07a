use super::types::{
    EngineError, HorizonBasis, ProjectionInput, ProjectionPoint, ProjectionResult, RateBasis,
};

/// Effective monthly growth rate for a nominal percentage rate.
///
/// An annual rate is converted geometrically: the monthly rate that, compounded
/// twelve times, reproduces the nominal annual rate. Not a division by 12.
pub fn effective_monthly_rate(nominal_rate: f64, basis: RateBasis) -> f64 {
    match basis {
        RateBasis::Monthly => nominal_rate / 100.0,
        RateBasis::Annual => (1.0 + nominal_rate / 100.0).powf(1.0 / 12.0) - 1.0,
    }
}

pub fn total_months(horizon: u32, basis: HorizonBasis) -> u32 {
    match basis {
        HorizonBasis::Years => horizon * 12,
        HorizonBasis::Months => horizon,
    }
}

pub fn project_accumulation(input: &ProjectionInput) -> Result<ProjectionResult, EngineError> {
    validate(input)?;

    let rate = effective_monthly_rate(input.nominal_rate, input.rate_basis);
    let months = total_months(input.horizon, input.horizon_basis);

    let mut balance = input.initial_amount;
    let mut contributed = input.initial_amount;

    let mut series = Vec::with_capacity(months as usize / 12 + 2);
    series.push(ProjectionPoint {
        month_index: 0,
        accumulated_value: balance,
        total_contributed: contributed,
    });

    for month in 1..=months {
        // Growth before deposit: a contribution made in month `month` earns no
        // interest during that month.
        balance *= 1.0 + rate;
        balance += input.monthly_contribution;
        contributed += input.monthly_contribution;

        // Yearly samples plus the final month. Samples are rounded to cents;
        // the running balance keeps full precision.
        if month % 12 == 0 || month == months {
            series.push(ProjectionPoint {
                month_index: month,
                accumulated_value: round_to_cents(balance),
                total_contributed: round_to_cents(contributed),
            });
        }
    }

    Ok(ProjectionResult {
        final_value: balance,
        total_contributed: contributed,
        total_interest: balance - contributed,
        series,
    })
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn validate(input: &ProjectionInput) -> Result<(), EngineError> {
    if !input.initial_amount.is_finite() || input.initial_amount <= 0.0 {
        return Err(EngineError::InvalidInput("initial amount must be positive"));
    }
    if !input.monthly_contribution.is_finite() || input.monthly_contribution < 0.0 {
        return Err(EngineError::InvalidInput(
            "monthly contribution must not be negative",
        ));
    }
    if !input.nominal_rate.is_finite() || input.nominal_rate <= 0.0 {
        return Err(EngineError::InvalidInput("rate must be positive"));
    }
    if input.horizon == 0 {
        return Err(EngineError::InvalidInput(
            "horizon must be at least one period",
        ));
    }
    Ok(())
}
