//! Mortgage payment and borrowing capacity calculators.
//!
//! Both use the standard annuity formulas with a fixed rate compounded once
//! per payment period.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Share of gross monthly income that may go to debt payments
pub const DEFAULT_DEBT_RATIO: f64 = 0.40;

/// Longest amortization period accepted, in years
pub const MAX_AMORTIZATION_YEARS: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("down payment {down_payment} exceeds price {price}")]
    DownPaymentTooLarge { down_payment: f64, price: f64 },

    #[error("amortization period must be at least one year")]
    ZeroAmortization,

    #[error("amortization period of {years} years exceeds the maximum of {max}")]
    AmortizationTooLong { years: u32, max: u32 },

    #[error("annual rate must be within [0, 100), got {0}")]
    RateOutOfRange(f64),

    #[error("debt ratio must be within (0, 1], got {0}")]
    DebtRatioOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    BiWeekly,
    Weekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub price: f64,
    pub down_payment: f64,
    pub annual_rate_percent: f64,
    pub amortization_years: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageQuote {
    pub principal: f64,
    pub payment: f64,
    pub periods: u32,
    pub total_paid: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingInput {
    pub annual_income: f64,
    #[serde(default)]
    pub monthly_debts: f64,
    pub annual_rate_percent: f64,
    pub amortization_years: u32,
    #[serde(default)]
    pub down_payment: f64,
    #[serde(default = "default_debt_ratio")]
    pub debt_ratio: f64,
}

fn default_debt_ratio() -> f64 {
    DEFAULT_DEBT_RATIO
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowingQuote {
    pub max_monthly_payment: f64,
    pub max_loan: f64,
    pub max_purchase_price: f64,
}

/// Periodic payment for a loan of `principal` over `periods` payments
pub fn annuity_payment(principal: f64, periodic_rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return principal;
    }
    let n = f64::from(periods);
    if periodic_rate == 0.0 {
        return principal / n;
    }
    principal * periodic_rate / (1.0 - (1.0 + periodic_rate).powf(-n))
}

/// Loan amount that `payment` per period repays over `periods` payments
pub fn present_value(payment: f64, periodic_rate: f64, periods: u32) -> f64 {
    let n = f64::from(periods);
    if periodic_rate == 0.0 {
        return payment * n;
    }
    payment * (1.0 - (1.0 + periodic_rate).powf(-n)) / periodic_rate
}

pub fn mortgage(input: &MortgageInput) -> Result<MortgageQuote> {
    non_negative("price", input.price)?;
    non_negative("down payment", input.down_payment)?;
    check_rate(input.annual_rate_percent)?;
    check_amortization(input.amortization_years)?;
    if input.down_payment > input.price {
        return Err(CalculatorError::DownPaymentTooLarge {
            down_payment: input.down_payment,
            price: input.price,
        });
    }

    let per_year = input.frequency.periods_per_year();
    let periods = input.amortization_years * per_year;
    let rate = input.annual_rate_percent / 100.0 / f64::from(per_year);
    let principal = input.price - input.down_payment;
    let payment = annuity_payment(principal, rate, periods);
    let total_paid = payment * f64::from(periods);

    Ok(MortgageQuote {
        principal,
        payment,
        periods,
        total_paid,
        total_interest: total_paid - principal,
    })
}

pub fn borrowing_capacity(input: &BorrowingInput) -> Result<BorrowingQuote> {
    non_negative("annual income", input.annual_income)?;
    non_negative("monthly debts", input.monthly_debts)?;
    non_negative("down payment", input.down_payment)?;
    check_rate(input.annual_rate_percent)?;
    check_amortization(input.amortization_years)?;
    if !(input.debt_ratio > 0.0 && input.debt_ratio <= 1.0) {
        return Err(CalculatorError::DebtRatioOutOfRange(input.debt_ratio));
    }

    let max_monthly_payment =
        (input.annual_income / 12.0 * input.debt_ratio - input.monthly_debts).max(0.0);
    let rate = input.annual_rate_percent / 100.0 / 12.0;
    let max_loan = present_value(max_monthly_payment, rate, input.amortization_years * 12);

    Ok(BorrowingQuote {
        max_monthly_payment,
        max_loan,
        max_purchase_price: max_loan + input.down_payment,
    })
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalculatorError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(CalculatorError::Negative { field, value });
    }
    Ok(())
}

fn check_amortization(years: u32) -> Result<()> {
    if years == 0 {
        return Err(CalculatorError::ZeroAmortization);
    }
    // Keeps years * periods_per_year well inside u32
    if years > MAX_AMORTIZATION_YEARS {
        return Err(CalculatorError::AmortizationTooLong {
            years,
            max: MAX_AMORTIZATION_YEARS,
        });
    }
    Ok(())
}

fn check_rate(rate: f64) -> Result<()> {
    if !(rate.is_finite() && (0.0..100.0).contains(&rate)) {
        return Err(CalculatorError::RateOutOfRange(rate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn monthly_mortgage_payment() {
        let quote = mortgage(&MortgageInput {
            price: 500_000.0,
            down_payment: 100_000.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            frequency: PaymentFrequency::Monthly,
        })
        .unwrap();

        assert_eq!(quote.principal, 400_000.0);
        assert_eq!(quote.periods, 300);
        assert!(close(quote.payment, 2338.36), "payment was {}", quote.payment);
        assert!(close(quote.total_interest, quote.payment * 300.0 - 400_000.0));
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        let quote = mortgage(&MortgageInput {
            price: 120_000.0,
            down_payment: 0.0,
            annual_rate_percent: 0.0,
            amortization_years: 10,
            frequency: PaymentFrequency::Monthly,
        })
        .unwrap();
        assert!(close(quote.payment, 1000.0));
        assert!(close(quote.total_interest, 0.0));
    }

    #[test]
    fn weekly_frequency_uses_52_periods() {
        let quote = mortgage(&MortgageInput {
            price: 52_000.0,
            down_payment: 0.0,
            annual_rate_percent: 0.0,
            amortization_years: 1,
            frequency: PaymentFrequency::Weekly,
        })
        .unwrap();
        assert_eq!(quote.periods, 52);
        assert!(close(quote.payment, 1000.0));
    }

    #[test]
    fn mortgage_rejects_bad_input() {
        let base = MortgageInput {
            price: 300_000.0,
            down_payment: 400_000.0,
            annual_rate_percent: 4.0,
            amortization_years: 25,
            frequency: PaymentFrequency::Monthly,
        };
        assert!(matches!(
            mortgage(&base),
            Err(CalculatorError::DownPaymentTooLarge { .. })
        ));

        let zero_years = MortgageInput {
            down_payment: 0.0,
            amortization_years: 0,
            ..base.clone()
        };
        assert_eq!(mortgage(&zero_years), Err(CalculatorError::ZeroAmortization));

        let bad_rate = MortgageInput {
            down_payment: 0.0,
            annual_rate_percent: 120.0,
            ..base
        };
        assert_eq!(mortgage(&bad_rate), Err(CalculatorError::RateOutOfRange(120.0)));
    }

    #[test]
    fn borrowing_capacity_inverts_payment() {
        let quote = borrowing_capacity(&BorrowingInput {
            annual_income: 120_000.0,
            monthly_debts: 500.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            down_payment: 50_000.0,
            debt_ratio: DEFAULT_DEBT_RATIO,
        })
        .unwrap();

        assert!(close(quote.max_monthly_payment, 3500.0));
        let repaid = annuity_payment(quote.max_loan, 0.05 / 12.0, 300);
        assert!(close(repaid, 3500.0));
        assert!(close(quote.max_purchase_price, quote.max_loan + 50_000.0));
    }

    #[test]
    fn debts_above_allowance_give_zero_capacity() {
        let quote = borrowing_capacity(&BorrowingInput {
            annual_income: 30_000.0,
            monthly_debts: 2_000.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            down_payment: 10_000.0,
            debt_ratio: DEFAULT_DEBT_RATIO,
        })
        .unwrap();
        assert_eq!(quote.max_monthly_payment, 0.0);
        assert_eq!(quote.max_loan, 0.0);
        assert_eq!(quote.max_purchase_price, 10_000.0);
    }

    #[test]
    fn borrowing_rejects_bad_ratio() {
        let input = BorrowingInput {
            annual_income: 80_000.0,
            monthly_debts: 0.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            down_payment: 0.0,
            debt_ratio: 1.5,
        };
        assert_eq!(
            borrowing_capacity(&input),
            Err(CalculatorError::DebtRatioOutOfRange(1.5))
        );
    }

    #[test]
    fn huge_amortization_is_rejected_not_overflowed() {
        let mortgage_input = MortgageInput {
            price: 300_000.0,
            down_payment: 0.0,
            annual_rate_percent: 4.0,
            amortization_years: 100_000_000,
            frequency: PaymentFrequency::Weekly,
        };
        assert_eq!(
            mortgage(&mortgage_input),
            Err(CalculatorError::AmortizationTooLong {
                years: 100_000_000,
                max: MAX_AMORTIZATION_YEARS,
            })
        );

        let borrowing_input = BorrowingInput {
            annual_income: 80_000.0,
            monthly_debts: 0.0,
            annual_rate_percent: 5.0,
            amortization_years: 400_000_000,
            down_payment: 0.0,
            debt_ratio: DEFAULT_DEBT_RATIO,
        };
        assert_eq!(
            borrowing_capacity(&borrowing_input),
            Err(CalculatorError::AmortizationTooLong {
                years: 400_000_000,
                max: MAX_AMORTIZATION_YEARS,
            })
        );
    }

    #[test]
    fn longest_amortization_is_accepted() {
        let quote = mortgage(&MortgageInput {
            price: 300_000.0,
            down_payment: 0.0,
            annual_rate_percent: 4.0,
            amortization_years: MAX_AMORTIZATION_YEARS,
            frequency: PaymentFrequency::Weekly,
        })
        .unwrap();
        assert_eq!(quote.periods, MAX_AMORTIZATION_YEARS * 52);
    }
}
