//! # Validation Module
//!
//! Submission rules checked before a contract is accepted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end form                                               │
//! │  └── Immediate feedback per step                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  └── Shape, negative quantities, unknown stand type                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── Required identity and signature fields                            │
//! │  ├── Contact formats (phone length, e-mail, signature date)            │
//! │  ├── Reservation limits (angles, exterior surface, co-exposants)       │
//! │  └── Amount ceiling on computed totals                                 │
//! │                                                                         │
//! │  Every failing field is reported, not only the first one.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mih_core::types::FormData;
//! use mih_core::validation::validate_submission;
//!
//! let errors = validate_submission(&FormData::default()).unwrap_err();
//! assert!(errors.iter().any(|e| e.field() == "raisonSociale"));
//! ```

use chrono::{DateTime, NaiveDate};

use crate::error::{ValidationError, ValidationErrors};
use crate::money::Money;
use crate::quote::Quote;
use crate::types::{FormData, SpaceReservation};
use crate::{
    MAX_CO_EXPOSANTS, MAX_EXTERIOR_SURFACE, MAX_PACK_ANGLES, MAX_STAND_ANGLES, MAX_TOTAL_VALUE,
    MIN_PHONE_LENGTH,
};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Fails with `Required` when the trimmed value is empty.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a phone number: optional, but at least eight characters when given.
///
/// ## Example
/// ```rust
/// use mih_core::validation::validate_phone;
///
/// assert!(validate_phone("telephone", "").is_ok());
/// assert!(validate_phone("telephone", "03 89 46 80 00").is_ok());
/// assert!(validate_phone("telephone", "0389").is_err());
/// ```
pub fn validate_phone(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();
    if !value.is_empty() && value.chars().count() < MIN_PHONE_LENGTH {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: MIN_PHONE_LENGTH,
        });
    }
    Ok(())
}

/// Validates an optional e-mail address of the form `local@domain.tld`.
///
/// ## Example
/// ```rust
/// use mih_core::validation::validate_email;
///
/// assert!(validate_email("contactMail", "").is_ok());
/// assert!(validate_email("contactMail", "salon@mih.fr").is_ok());
/// assert!(validate_email("contactMail", "salon@mih").is_err());
/// assert!(validate_email("contactMail", "salon mih@mih.fr").is_err());
/// ```
pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();
    if value.is_empty() || looks_like_email(value) {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected an address like name@domain.tld".to_string(),
    })
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty() && !name.starts_with('.'),
        None => false,
    }
}

/// Validates the signature date: required, `YYYY-MM-DD` or RFC 3339.
///
/// ## Example
/// ```rust
/// use mih_core::validation::validate_signature_date;
///
/// assert!(validate_signature_date("2026-03-02").is_ok());
/// assert!(validate_signature_date("2026-03-02T10:30:00+01:00").is_ok());
/// assert!(validate_signature_date("02/03/2026").is_err());
/// ```
pub fn validate_signature_date(value: &str) -> ValidationResult<()> {
    const FIELD: &str = "dateSignature";

    let value = value.trim();
    validate_required(FIELD, value)?;

    let parses = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok();
    if !parses {
        return Err(ValidationError::InvalidFormat {
            field: FIELD.to_string(),
            reason: "expected YYYY-MM-DD or an RFC 3339 timestamp".to_string(),
        });
    }
    Ok(())
}

/// Fails with `OutOfRange` when `value` exceeds `max`.
pub fn validate_at_most(field: &str, value: u32, max: u32) -> ValidationResult<()> {
    if value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(max),
        });
    }
    Ok(())
}

/// Validates one computed amount against the accepted ceiling.
///
/// ## Example
/// ```rust
/// use mih_core::money::Money;
/// use mih_core::validation::validate_total;
///
/// assert!(validate_total("totalTTC", Money::from_euros(6_054)).is_ok());
/// assert!(validate_total("totalTTC", Money::from_cents(-1)).is_err());
/// assert!(validate_total("totalTTC", Money::from_euros(10_000_000_000)).is_err());
/// ```
pub fn validate_total(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount > MAX_TOTAL_VALUE {
        return Err(ValidationError::AmountOutOfRange {
            field: field.to_string(),
            max: MAX_TOTAL_VALUE,
        });
    }
    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Checks a whole submission and reports every failing field.
pub fn validate_submission(form: &FormData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut check = |result: ValidationResult<()>| {
        if let Err(error) = result {
            errors.push(error);
        }
    };

    let company = &form.company;
    check(validate_required("raisonSociale", &company.raison_sociale));
    check(validate_required("adresse", &company.adresse));
    check(validate_required("codePostal", &company.code_postal));
    check(validate_required("ville", &company.ville));
    check(validate_required("pays", &company.pays));
    check(validate_phone("telephone", &company.telephone));

    let contact = &form.contact;
    check(validate_required("contactNom", &contact.contact_nom));
    check(validate_required("contactTel", &contact.contact_tel).and_then(|_| validate_phone("contactTel", &contact.contact_tel)));
    check(validate_required("contactMail", &contact.contact_mail).and_then(|_| validate_email("contactMail", &contact.contact_mail)));
    check(validate_phone("respTel", &contact.resp_tel));
    check(validate_email("respMail", &contact.resp_mail));
    check(validate_phone("opTel", &contact.op_tel));
    check(validate_email("opMail", &contact.op_mail));

    for error in reservation_errors(&form.space_reservation) {
        check(Err(error));
    }

    let signature = &form.signature;
    check(validate_required("nomSignataire", &signature.nom_signataire));
    check(validate_signature_date(&signature.date_signature));
    if !signature.accept_reglement {
        check(Err(ValidationError::MustBeAccepted {
            field: "acceptReglement".to_string(),
        }));
    }

    errors.into_result()
}

fn reservation_errors(space: &SpaceReservation) -> Vec<ValidationError> {
    let limits = [
        ("standEquipeAngle", space.stand_equipe_angle, MAX_STAND_ANGLES),
        ("standNuAngle", space.stand_nu_angle, MAX_STAND_ANGLES),
        ("packAngles", space.pack_angles, MAX_PACK_ANGLES),
        ("surfaceExterieur", space.surface_exterieur, MAX_EXTERIOR_SURFACE),
    ];

    let mut errors: Vec<ValidationError> = limits
        .into_iter()
        .filter_map(|(field, value, max)| validate_at_most(field, value, max).err())
        .collect();

    if space.co_exposants.len() > MAX_CO_EXPOSANTS {
        errors.push(ValidationError::OutOfRange {
            field: "coExposants".to_string(),
            min: 0,
            max: MAX_CO_EXPOSANTS as i64,
        });
    }

    for (i, co) in space.co_exposants.iter().enumerate() {
        if let Err(error) = validate_required(&format!("coExposants[{i}].nomEntreprise"), &co.nom_entreprise) {
            errors.push(error);
        }
        if let Err(error) = validate_email(&format!("coExposants[{i}].mailResponsable"), &co.mail_responsable) {
            errors.push(error);
        }
    }

    errors
}

/// Checks every section subtotal and the HT, TVA and TTC totals of a quote.
pub fn validate_quote_totals(quote: &Quote) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let sections = quote.sections.iter().map(|s| (s.title.as_str(), s.total));
    let financial = [
        ("totalHT", quote.financial.total_ht),
        ("tva", quote.financial.tva),
        ("totalTTC", quote.financial.total_ttc),
    ];

    for (field, amount) in sections.chain(financial) {
        if let Err(error) = validate_total(field, amount) {
            errors.push(error);
        }
    }

    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{PdfFinancialData, PdfSection};
    use crate::types::CoExposant;

    fn valid_form() -> FormData {
        let mut form = FormData::default();
        form.company.raison_sociale = "Ateliers Dupont".to_string();
        form.company.adresse = "12 rue des Forges".to_string();
        form.company.code_postal = "68100".to_string();
        form.company.ville = "Mulhouse".to_string();
        form.company.pays = "France".to_string();
        form.company.telephone = "0389000000".to_string();
        form.contact.contact_nom = "Camille Martin".to_string();
        form.contact.contact_tel = "06 12 34 56 78".to_string();
        form.contact.contact_mail = "camille@dupont.fr".to_string();
        form.signature.nom_signataire = "Camille Martin".to_string();
        form.signature.date_signature = "2026-03-02".to_string();
        form.signature.accept_reglement = true;
        form
    }

    fn fields(errors: &ValidationErrors) -> Vec<&str> {
        errors.iter().map(|e| e.field()).collect()
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(validate_submission(&valid_form()).is_ok());
    }

    #[test]
    fn test_empty_submission_reports_every_required_field() {
        let errors = validate_submission(&FormData::default()).unwrap_err();

        assert_eq!(
            fields(&errors),
            vec![
                "raisonSociale",
                "adresse",
                "codePostal",
                "ville",
                "pays",
                "contactNom",
                "contactTel",
                "contactMail",
                "nomSignataire",
                "dateSignature",
                "acceptReglement",
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut form = valid_form();
        form.company.ville = "   ".to_string();

        let errors = validate_submission(&form).unwrap_err();
        assert_eq!(
            errors.0,
            vec![ValidationError::Required {
                field: "ville".to_string()
            }]
        );
    }

    #[test]
    fn test_contact_formats() {
        let mut form = valid_form();
        form.company.telephone = "0389".to_string();
        form.contact.contact_mail = "camille.dupont.fr".to_string();
        form.contact.resp_mail = "resp@dupont".to_string();
        form.contact.op_mail = String::new();

        let errors = validate_submission(&form).unwrap_err();
        assert_eq!(fields(&errors), vec!["telephone", "contactMail", "respMail"]);
        assert!(matches!(errors.0[0], ValidationError::TooShort { min: 8, .. }));
    }

    #[test]
    fn test_phone_length_boundary() {
        let shortest = "0".repeat(MIN_PHONE_LENGTH);
        assert!(validate_phone("telephone", &shortest).is_ok());
        assert!(validate_phone("telephone", &format!("  {shortest}  ")).is_ok());

        let err = validate_phone("telephone", &shortest[1..]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooShort {
                field: "telephone".to_string(),
                min: MIN_PHONE_LENGTH,
            }
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("prenom.nom+salon@sous.domaine.fr"));
        assert!(!looks_like_email("@mih.fr"));
        assert!(!looks_like_email("a@@mih.fr"));
        assert!(!looks_like_email("a@mih."));
        assert!(!looks_like_email("a@.fr"));
    }

    #[test]
    fn test_signature_date_formats() {
        assert!(validate_signature_date("2026-02-28").is_ok());
        assert!(validate_signature_date(" 2026-02-28 ").is_ok());
        assert!(validate_signature_date("2026-02-28T09:00:00Z").is_ok());
        assert!(validate_signature_date("2026-02-30").is_err());
        assert!(matches!(
            validate_signature_date(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_regulation_must_be_accepted() {
        let mut form = valid_form();
        form.signature.accept_reglement = false;

        let errors = validate_submission(&form).unwrap_err();
        assert_eq!(
            errors.0,
            vec![ValidationError::MustBeAccepted {
                field: "acceptReglement".to_string()
            }]
        );
    }

    #[test]
    fn test_reservation_limits() {
        let mut form = valid_form();
        form.space_reservation.stand_equipe_angle = 2;
        form.space_reservation.pack_angles = 5;
        form.space_reservation.surface_exterieur = 81;

        let errors = validate_submission(&form).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["standEquipeAngle", "packAngles", "surfaceExterieur"]
        );

        form.space_reservation.stand_equipe_angle = 1;
        form.space_reservation.pack_angles = 4;
        form.space_reservation.surface_exterieur = 80;
        assert!(validate_submission(&form).is_ok());
    }

    #[test]
    fn test_co_exposants_rules() {
        let mut form = valid_form();
        let named = CoExposant {
            nom_entreprise: "Partenaire SA".to_string(),
            ..Default::default()
        };
        form.space_reservation.co_exposants = vec![named.clone(), CoExposant::default()];

        let errors = validate_submission(&form).unwrap_err();
        assert_eq!(fields(&errors), vec!["coExposants[1].nomEntreprise"]);

        form.space_reservation.co_exposants = vec![named; MAX_CO_EXPOSANTS + 1];
        let errors = validate_submission(&form).unwrap_err();
        assert_eq!(fields(&errors), vec!["coExposants"]);
    }

    #[test]
    fn test_total_ceiling() {
        assert!(validate_total("totalHT", Money::zero()).is_ok());
        assert!(validate_total("totalHT", MAX_TOTAL_VALUE).is_ok());

        let above = MAX_TOTAL_VALUE + Money::from_cents(1);
        let err = validate_total("totalHT", above).unwrap_err();
        assert_eq!(
            err.to_string(),
            "totalHT must be between 0 and 9\u{202f}999\u{202f}999\u{202f}999,99 €"
        );
    }

    #[test]
    fn test_quote_totals_checked_per_section() {
        let huge = Money::from_euros(20_000_000_000);
        let quote = Quote {
            sections: vec![PdfSection {
                title: "1. Réservation d'espace".to_string(),
                prestations: Vec::new(),
                total: huge,
            }],
            financial: PdfFinancialData::from_total_ht(huge).unwrap(),
        };

        let errors = validate_quote_totals(&quote).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["1. Réservation d'espace", "totalHT", "totalTTC"]
        );
    }
}
