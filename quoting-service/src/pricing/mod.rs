//! Quote totals calculator.
//!
//! Fixed five-stage derivation: net total, global discount amount, net after
//! discount, VAT amount, gross total. Each stage is a pure function of the
//! previous one and no rounding happens mid-calculation; amounts are rounded
//! only when formatted for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// VAT rates the service accepts. Anything outside this menu is rejected at
/// the DTO boundary before it reaches the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatRate {
    Zero,
    Reduced,
    Intermediate,
    Standard,
}

impl VatRate {
    /// Percentage value of the rate.
    pub fn percent(&self) -> Decimal {
        match self {
            VatRate::Zero => Decimal::ZERO,
            VatRate::Reduced => Decimal::new(55, 1),
            VatRate::Intermediate => Decimal::from(10),
            VatRate::Standard => Decimal::from(20),
        }
    }
}

impl TryFrom<Decimal> for VatRate {
    type Error = InvalidVatRate;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        for rate in [
            VatRate::Zero,
            VatRate::Reduced,
            VatRate::Intermediate,
            VatRate::Standard,
        ] {
            if rate.percent() == value.normalize() {
                return Ok(rate);
            }
        }
        Err(InvalidVatRate(value))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("VAT rate {0}% is not one of the accepted rates (0, 5.5, 10, 20)")]
pub struct InvalidVatRate(pub Decimal);

/// Total of a single line: `quantity × unit_price × (1 − discount/100)`.
pub fn line_total(quantity: Decimal, unit_price: Decimal, discount_percent: Decimal) -> Decimal {
    quantity * unit_price * (Decimal::ONE - discount_percent / Decimal::from(100))
}

/// The five stored totals of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub net_total: Decimal,
    pub discount_amount: Decimal,
    pub net_after_discount: Decimal,
    pub vat_amount: Decimal,
    pub gross_total: Decimal,
}

/// Derive the full tax breakdown from a net total. The evaluation order is
/// load-bearing: global discount applies to the net total, VAT applies to the
/// discounted net.
pub fn compute_quote_totals(
    net_total: Decimal,
    global_discount_percent: Decimal,
    vat_rate: VatRate,
) -> QuoteTotals {
    let discount_amount = net_total * global_discount_percent / Decimal::from(100);
    let net_after_discount = net_total - discount_amount;
    let vat_amount = net_after_discount * vat_rate.percent() / Decimal::from(100);
    let gross_total = net_after_discount + vat_amount;

    QuoteTotals {
        net_total,
        discount_amount,
        net_after_discount,
        vat_amount,
        gross_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_line_total_applies_discount() {
        assert_eq!(line_total(dec("2"), dec("100"), dec("10")), dec("180"));
        assert_eq!(line_total(dec("1"), dec("1200"), dec("0")), dec("1200"));
        assert_eq!(line_total(dec("3"), dec("50"), dec("100")), dec("0"));
    }

    #[test]
    fn test_line_total_fractional_quantity() {
        // 2.5 days at 400 with 20% off
        assert_eq!(line_total(dec("2.5"), dec("400"), dec("20")), dec("800.0"));
    }

    #[test]
    fn test_totals_five_stage_order() {
        let totals = compute_quote_totals(dec("180"), dec("5"), VatRate::Standard);
        assert_eq!(totals.net_total, dec("180"));
        assert_eq!(totals.discount_amount, dec("9.0"));
        assert_eq!(totals.net_after_discount, dec("171.0"));
        assert_eq!(totals.vat_amount, dec("34.20"));
        assert_eq!(totals.gross_total, dec("205.20"));
    }

    #[test]
    fn test_totals_gross_matches_closed_form() {
        let net = dec("1234.56");
        let totals = compute_quote_totals(net, dec("12"), VatRate::Intermediate);
        let expected = (net - net * dec("12") / dec("100"))
            * (Decimal::ONE + dec("10") / dec("100"));
        assert_eq!(totals.gross_total, expected);
    }

    #[test]
    fn test_totals_zero_discount_zero_vat() {
        let totals = compute_quote_totals(dec("500"), Decimal::ZERO, VatRate::Zero);
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.net_after_discount, dec("500"));
        assert_eq!(totals.vat_amount, Decimal::ZERO);
        assert_eq!(totals.gross_total, dec("500"));
    }

    #[test]
    fn test_vat_rate_menu() {
        assert_eq!(VatRate::try_from(dec("20")).unwrap(), VatRate::Standard);
        assert_eq!(VatRate::try_from(dec("5.5")).unwrap(), VatRate::Reduced);
        assert_eq!(VatRate::try_from(dec("10")).unwrap(), VatRate::Intermediate);
        assert_eq!(VatRate::try_from(dec("0")).unwrap(), VatRate::Zero);
        assert!(VatRate::try_from(dec("19.6")).is_err());
        assert!(VatRate::try_from(dec("21")).is_err());
    }

    #[test]
    fn test_vat_rate_accepts_trailing_zeros() {
        assert_eq!(VatRate::try_from(dec("20.00")).unwrap(), VatRate::Standard);
        assert_eq!(VatRate::try_from(dec("5.50")).unwrap(), VatRate::Reduced);
    }
}
