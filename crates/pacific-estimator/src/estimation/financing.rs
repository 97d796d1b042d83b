use serde::{Deserialize, Serialize};

pub const DEFAULT_INTEREST_RATE: f64 = 6.5;
pub const DEFAULT_LOAN_TERM_YEARS: u32 = 25;

/// Annual interest rate in percent and term in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    pub interest_rate: f64,
    pub term_years: u32,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            interest_rate: DEFAULT_INTEREST_RATE,
            term_years: DEFAULT_LOAN_TERM_YEARS,
        }
    }
}

impl LoanTerms {
    pub fn validate(&self) -> Result<(), FinancingError> {
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(FinancingError::InvalidInterestRate(self.interest_rate));
        }
        if self.term_years == 0 {
            return Err(FinancingError::ZeroTerm);
        }
        Ok(())
    }

    pub fn payment_count(&self) -> u32 {
        self.term_years * 12
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FinancingError {
    #[error("interest rate must be a finite, non-negative percentage (found {0})")]
    InvalidInterestRate(f64),
    #[error("loan term must be at least one year")]
    ZeroTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepaymentSchedule {
    pub terms: LoanTerms,
    pub principal: f64,
    pub payments: u32,
    pub monthly_repayment: f64,
    pub total_repaid: f64,
    pub total_interest: f64,
}

/// Level monthly repayment that amortises `principal` over the loan term.
pub fn monthly_repayment(principal: f64, terms: &LoanTerms) -> Result<f64, FinancingError> {
    terms.validate()?;

    let payments = f64::from(terms.payment_count());
    let monthly_rate = terms.interest_rate / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return Ok(principal / payments);
    }

    let growth = (1.0 + monthly_rate).powf(payments);
    Ok(principal * monthly_rate * growth / (growth - 1.0))
}

pub fn repayment_schedule(
    principal: f64,
    terms: &LoanTerms,
) -> Result<RepaymentSchedule, FinancingError> {
    let monthly = monthly_repayment(principal, terms)?;
    let payments = terms.payment_count();
    let total_repaid = monthly * f64::from(payments);

    Ok(RepaymentSchedule {
        terms: *terms,
        principal,
        payments,
        monthly_repayment: monthly,
        total_repaid,
        total_interest: total_repaid - principal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terms_on_baseline_house() {
        let monthly = monthly_repayment(480_965.0, &LoanTerms::default()).expect("valid terms");
        assert!((monthly - 3247.51).abs() < 0.01, "got {monthly}");
    }

    #[test]
    fn schedule_totals_follow_monthly_figure() {
        let schedule =
            repayment_schedule(480_965.0, &LoanTerms::default()).expect("valid terms");

        assert_eq!(schedule.payments, 300);
        assert!((schedule.total_repaid - schedule.monthly_repayment * 300.0).abs() < 1e-6);
        assert!((schedule.total_interest - (schedule.total_repaid - 480_965.0)).abs() < 1e-6);
        assert!(schedule.total_interest > 0.0);
    }

    #[test]
    fn zero_rate_spreads_principal_evenly() {
        let terms = LoanTerms {
            interest_rate: 0.0,
            term_years: 20,
        };

        let monthly = monthly_repayment(480_000.0, &terms).expect("valid terms");

        assert_eq!(monthly, 2000.0);
        let schedule = repayment_schedule(480_000.0, &terms).expect("valid terms");
        assert_eq!(schedule.total_interest, 0.0);
    }

    #[test]
    fn rejects_negative_and_non_finite_rates() {
        for interest_rate in [-0.5, f64::NAN, f64::INFINITY] {
            let terms = LoanTerms {
                interest_rate,
                term_years: 25,
            };
            assert!(matches!(
                monthly_repayment(100_000.0, &terms),
                Err(FinancingError::InvalidInterestRate(_))
            ));
        }
    }

    #[test]
    fn rejects_zero_term() {
        let terms = LoanTerms {
            interest_rate: 6.5,
            term_years: 0,
        };
        assert_eq!(
            monthly_repayment(100_000.0, &terms),
            Err(FinancingError::ZeroTerm)
        );
    }

    #[test]
    fn partial_terms_deserialize_with_defaults() {
        let terms: LoanTerms =
            serde_json::from_str(r#"{ "interest_rate": 8.0 }"#).expect("parses");
        assert_eq!(terms.term_years, DEFAULT_LOAN_TERM_YEARS);
        assert_eq!(terms.interest_rate, 8.0);
    }
}
