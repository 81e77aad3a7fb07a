use super::types::{EngineError, ReserveInput, ReserveResult};

/// Sizes an emergency reserve: the target amount covering `safety_months` of
/// fixed costs, and how many months of saving it takes to get there.
pub fn size_reserve(input: &ReserveInput) -> Result<ReserveResult, EngineError> {
    validate(input)?;

    let target_reserve = input.fixed_monthly_cost * input.safety_months as f64;
    let monthly_savings = input.monthly_income * input.savings_percent / 100.0;

    // A non-positive savings rate can never reach the target. Validation rules
    // out every raw path here, so this is an invariant check, reported apart
    // from plain invalid input.
    if monthly_savings <= 0.0 {
        return Err(EngineError::DegenerateGoal);
    }

    // Partial months count as a full month of additional saving.
    let months_to_reach = (target_reserve / monthly_savings).ceil() as u32;

    Ok(ReserveResult {
        target_reserve,
        monthly_savings,
        months_to_reach,
    })
}

fn validate(input: &ReserveInput) -> Result<(), EngineError> {
    if !input.fixed_monthly_cost.is_finite() || input.fixed_monthly_cost <= 0.0 {
        return Err(EngineError::InvalidInput(
            "fixed monthly cost must be positive",
        ));
    }
    if !input.monthly_income.is_finite() || input.monthly_income <= 0.0 {
        return Err(EngineError::InvalidInput("monthly income must be positive"));
    }
    if !input.savings_percent.is_finite() || input.savings_percent <= 0.0 {
        return Err(EngineError::InvalidInput("savings percent must be positive"));
    }
    if input.safety_months == 0 {
        return Err(EngineError::InvalidInput(
            "safety months must be at least one",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EmploymentType;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_input() -> ReserveInput {
        ReserveInput {
            fixed_monthly_cost: 3_000.0,
            monthly_income: 5_000.0,
            savings_percent: 10.0,
            safety_months: 6,
            employment_type: EmploymentType::Salaried,
        }
    }

    #[test]
    fn target_scales_fixed_cost_by_safety_months() {
        let result = size_reserve(&sample_input()).expect("valid input");
        assert_approx(result.target_reserve, 18_000.0);
    }

    #[test]
    fn months_to_reach_divides_target_by_monthly_savings() {
        let result = size_reserve(&sample_input()).expect("valid input");
        assert_approx(result.monthly_savings, 500.0);
        assert_eq!(result.months_to_reach, 36);
    }

    #[test]
    fn partial_months_round_up() {
        let input = ReserveInput {
            fixed_monthly_cost: 1_000.0,
            monthly_income: 2_000.0,
            savings_percent: 45.0,
            safety_months: 3,
            employment_type: EmploymentType::Salaried,
        };

        // 3000 / 900 = 3.33… months of saving; the last partial month counts.
        let result = size_reserve(&input).expect("valid input");
        assert_eq!(result.months_to_reach, 4);
    }

    #[test]
    fn employment_type_never_affects_arithmetic() {
        let salaried = size_reserve(&sample_input()).expect("valid input");

        for employment_type in [EmploymentType::CivilServant, EmploymentType::SelfEmployed] {
            let input = ReserveInput {
                employment_type,
                ..sample_input()
            };
            let result = size_reserve(&input).expect("valid input");
            assert_eq!(result, salaried);
        }
    }

    #[test]
    fn non_positive_fields_are_rejected() {
        let input = ReserveInput {
            fixed_monthly_cost: 0.0,
            ..sample_input()
        };
        let err = size_reserve(&input).expect_err("must reject zero cost");
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("cost")));

        let input = ReserveInput {
            monthly_income: -1.0,
            ..sample_input()
        };
        let err = size_reserve(&input).expect_err("must reject negative income");
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("income")));

        let input = ReserveInput {
            savings_percent: 0.0,
            ..sample_input()
        };
        let err = size_reserve(&input).expect_err("must reject zero savings percent");
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("percent")));

        let input = ReserveInput {
            safety_months: 0,
            ..sample_input()
        };
        let err = size_reserve(&input).expect_err("must reject zero safety months");
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("safety")));
    }

    #[test]
    fn underflowed_savings_rate_is_reported_as_degenerate_goal() {
        // Each field passes validation on its own, but the product underflows
        // to a zero savings rate.
        let input = ReserveInput {
            fixed_monthly_cost: 3_000.0,
            monthly_income: 0.01,
            savings_percent: 1e-320,
            safety_months: 6,
            employment_type: EmploymentType::SelfEmployed,
        };

        let err = size_reserve(&input).expect_err("must reject unreachable goal");
        assert_eq!(err, EngineError::DegenerateGoal);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_goal_inversion_covers_the_target(
            cost_cents in 1u32..5_000_000,
            income_cents in 1u32..5_000_000,
            savings_pct_tenths in 1u32..1_000,
            safety_months in 1u32..25
        ) {
            let input = ReserveInput {
                fixed_monthly_cost: cost_cents as f64 / 100.0,
                monthly_income: income_cents as f64 / 100.0,
                savings_percent: savings_pct_tenths as f64 / 10.0,
                safety_months,
                employment_type: EmploymentType::Salaried,
            };

            let result = size_reserve(&input).expect("valid input");

            // Saving for months_to_reach months covers the target; one month
            // fewer does not (unless the division was exact to float noise).
            let saved = result.months_to_reach as f64 * result.monthly_savings;
            prop_assert!(saved >= result.target_reserve * (1.0 - 1e-12));

            let one_short = (result.months_to_reach as f64 - 1.0) * result.monthly_savings;
            prop_assert!(one_short < result.target_reserve + 1e-6);
        }

        #[test]
        fn prop_results_are_deterministic(
            cost_cents in 1u32..5_000_000,
            income_cents in 1u32..5_000_000,
            savings_pct_tenths in 1u32..1_000,
            safety_months in 1u32..25
        ) {
            let input = ReserveInput {
                fixed_monthly_cost: cost_cents as f64 / 100.0,
                monthly_income: income_cents as f64 / 100.0,
                savings_percent: savings_pct_tenths as f64 / 10.0,
                safety_months,
                employment_type: EmploymentType::CivilServant,
            };

            let first = size_reserve(&input).expect("valid input");
            let second = size_reserve(&input).expect("valid input");
            prop_assert!(first == second);
        }
    }
}
