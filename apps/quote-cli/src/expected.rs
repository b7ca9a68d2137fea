//! Hand-verified expected totals and the diff against a computed quote.
//!
//! ```json
//! {
//!   "totalHT": 5045, "tva": 1009, "totalTTC": 6054,
//!   "acompte": 3027, "solde": 3027,
//!   "sections": { "1. Réservation d'espace": 5045 }
//! }
//! ```
//!
//! Every key is optional; only the amounts given are compared.

use std::collections::BTreeMap;
use std::fmt;

use mih_core::{Money, Quote};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectedTotals {
    #[serde(rename = "totalHT")]
    pub total_ht: Option<Money>,
    pub tva: Option<Money>,
    #[serde(rename = "totalTTC")]
    pub total_ttc: Option<Money>,
    pub acompte: Option<Money>,
    pub solde: Option<Money>,
    /// Section title → expected subtotal. A section absent from the quote
    /// counts as zero.
    #[serde(default)]
    pub sections: BTreeMap<String, Money>,
}

/// One amount that differs from what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: String,
    pub expected: Money,
    pub actual: Money,
}

impl Mismatch {
    /// `actual - expected`, `None` when the gap does not fit in cents.
    pub fn difference(&self) -> Option<Money> {
        self.actual.checked_sub(self.expected)
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, got {}", self.field, self.expected, self.actual)?;
        match self.difference() {
            Some(difference) => write!(f, " (difference {difference})"),
            None => f.write_str(" (difference out of range)"),
        }
    }
}

impl ExpectedTotals {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Number of amounts this file pins down.
    pub fn checked_count(&self) -> usize {
        [self.total_ht, self.tva, self.total_ttc, self.acompte, self.solde]
            .iter()
            .flatten()
            .count()
            + self.sections.len()
    }

    /// Every mismatch between these expectations and `quote`, sections first.
    pub fn compare(&self, quote: &Quote) -> Vec<Mismatch> {
        let sections = self.sections.iter().map(|(title, expected)| {
            let actual = quote.section(title).map(|s| s.total).unwrap_or_default();
            (title.clone(), Some(*expected), actual)
        });

        let financial = &quote.financial;
        let totals = [
            ("totalHT", self.total_ht, financial.total_ht),
            ("tva", self.tva, financial.tva),
            ("totalTTC", self.total_ttc, financial.total_ttc),
            ("acompte", self.acompte, financial.acompte),
            ("solde", self.solde, financial.solde),
        ]
        .into_iter()
        .map(|(field, expected, actual)| (field.to_string(), expected, actual));

        sections
            .chain(totals)
            .filter_map(|(field, expected, actual)| {
                let expected = expected?;
                (expected != actual).then_some(Mismatch {
                    field,
                    expected,
                    actual,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mih_core::{compute_quote, FormData, PriceTable, StandType};

    fn quote() -> Quote {
        let mut form = FormData::default();
        form.space_reservation.selected_stand_type = Some(StandType::StandEquipe);
        form.space_reservation.stand_equipe_surface = 18;
        form.space_reservation.stand_equipe_angle = 1;
        form.space_reservation.puissance = "0".to_string();
        compute_quote(&form, &PriceTable::mih_2026()).unwrap()
    }

    #[test]
    fn test_matching_expectations() {
        let expected = ExpectedTotals::from_json(
            r#"{
                "totalHT": 5045, "tva": 1009, "totalTTC": 6054,
                "acompte": 3027, "solde": 3027.00,
                "sections": { "1. Réservation d'espace": 5045 }
            }"#,
        )
        .unwrap();

        assert_eq!(expected.checked_count(), 6);
        assert!(expected.compare(&quote()).is_empty());
    }

    #[test]
    fn test_reports_every_mismatch() {
        let expected = ExpectedTotals::from_json(
            r#"{
                "totalHT": 5000, "tva": 1009,
                "acompte": 3027.5,
                "sections": { "2. Aménagements optionnels": 120 }
            }"#,
        )
        .unwrap();

        let mismatches = expected.compare(&quote());
        let fields: Vec<&str> = mismatches.iter().map(|m| m.field.as_str()).collect();
        assert_eq!(fields, vec!["2. Aménagements optionnels", "totalHT", "acompte"]);

        assert_eq!(mismatches[0].actual, Money::zero());
        assert_eq!(mismatches[1].difference(), Some(Money::from_euros(45)));
        assert_eq!(mismatches[2].difference(), Some(Money::from_cents(-50)));
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = Mismatch {
            field: "totalHT".to_string(),
            expected: Money::from_euros(5_000),
            actual: Money::from_euros(5_045),
        };
        assert_eq!(
            mismatch.to_string(),
            "totalHT: expected 5\u{202f}000,00 €, got 5\u{202f}045,00 € (difference 45,00 €)"
        );
    }

    #[test]
    fn test_huge_expected_amount_does_not_overflow() {
        let expected = ExpectedTotals::from_json(r#"{ "totalHT": -92233720368547758 }"#).unwrap();
        let mismatches = expected.compare(&quote());
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].difference(), None);

        let mismatch = Mismatch {
            field: "totalHT".to_string(),
            expected: Money::from_cents(i64::MIN),
            actual: Money::from_euros(5_045),
        };
        assert!(mismatch.to_string().ends_with("(difference out of range)"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ExpectedTotals::from_json(r#"{ "totalHt": 10 }"#).is_err());
    }
}
