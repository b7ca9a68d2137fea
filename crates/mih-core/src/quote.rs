//! # Quote Calculator
//!
//! Turns a [`FormData`] snapshot and a [`PriceTable`] into the priced quote
//! that the PDF assembler prints and the validation tooling diffs.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FormData ──┐                                                           │
//! │             ├──► compute_quote() ← THIS MODULE                          │
//! │  PriceTable ┘        │                                                  │
//! │                      ├── 1. Réservation d'espace      PdfSection        │
//! │                      ├── 2. Aménagements optionnels   PdfSection        │
//! │                      ├── 3. Produits complémentaires  PdfSection        │
//! │                      ├── 4. Visibilité & communication PdfSection       │
//! │                      │        (empty sections are left out)             │
//! │                      ▼                                                  │
//! │               PdfFinancialData                                          │
//! │   totalHT = Σ sections                                                  │
//! │   tva     = round(totalHT × 20 %)                                       │
//! │   totalTTC = totalHT + tva                                              │
//! │   acompte = round(totalTTC × 50 %)                                      │
//! │   solde   = totalTTC − acompte                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Pure: no I/O, no shared state, identical output for identical input
//! - Every line total is exactly `quantity × prixUnitaire`; flat items carry
//!   quantity 1
//! - Nothing with a zero quantity or zero total is emitted
//! - Only the selected stand type's fields are priced

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::PriceTable;
use crate::types::{
    AdditionalProducts, Communication, FormData, OptionalEquipment, SpaceReservation, StandType,
};
use crate::{DEPOSIT_RATE, TVA_RATE};

// =============================================================================
// Output Types
// =============================================================================

/// One priced line of the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PdfPrestation {
    #[serde(rename = "libelle")]
    pub label: String,
    pub quantity: u32,
    #[serde(rename = "unite")]
    pub unit: String,
    #[serde(rename = "prixUnitaire")]
    #[ts(type = "number")]
    pub unit_price: Money,
    #[ts(type = "number")]
    pub total: Money,
}

impl PdfPrestation {
    /// A line billed `quantity × unit_price`.
    pub fn per_unit(
        label: impl Into<String>,
        quantity: u32,
        unit: impl Into<String>,
        unit_price: Money,
    ) -> CoreResult<Self> {
        let label = label.into();
        let total = unit_price
            .checked_mul_quantity(quantity)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: format!("line '{label}'"),
            })?;

        Ok(PdfPrestation {
            label,
            quantity,
            unit: unit.into(),
            unit_price,
            total,
        })
    }

    /// A line billed once at `price`, whatever quantity field triggered it.
    pub fn flat(label: impl Into<String>, unit: impl Into<String>, price: Money) -> Self {
        PdfPrestation {
            label: label.into(),
            quantity: 1,
            unit: unit.into(),
            unit_price: price,
            total: price,
        }
    }
}

/// A titled group of lines with its subtotal (HT).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PdfSection {
    pub title: String,
    pub prestations: Vec<PdfPrestation>,
    #[ts(type = "number")]
    pub total: Money,
}

/// The summary block at the bottom of the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PdfFinancialData {
    #[serde(rename = "totalHT")]
    #[ts(type = "number")]
    pub total_ht: Money,
    #[ts(type = "number")]
    pub tva: Money,
    #[serde(rename = "totalTTC")]
    #[ts(type = "number")]
    pub total_ttc: Money,
    /// Deposit due at signature.
    #[ts(type = "number")]
    pub acompte: Money,
    /// Balance due later.
    #[ts(type = "number")]
    pub solde: Money,
}

impl PdfFinancialData {
    /// Derives VAT, gross total, deposit and balance from the net total.
    ///
    /// ## Example
    /// ```rust
    /// use mih_core::money::Money;
    /// use mih_core::quote::PdfFinancialData;
    ///
    /// let financial = PdfFinancialData::from_total_ht(Money::from_euros(5_045)).unwrap();
    /// assert_eq!(financial.tva, Money::from_euros(1_009));
    /// assert_eq!(financial.total_ttc, Money::from_euros(6_054));
    /// assert_eq!(financial.acompte + financial.solde, financial.total_ttc);
    /// ```
    pub fn from_total_ht(total_ht: Money) -> CoreResult<Self> {
        let tva = total_ht
            .checked_apply_rate(TVA_RATE)
            .ok_or_else(|| overflow("tva"))?;
        let total_ttc = total_ht
            .checked_add(tva)
            .ok_or_else(|| overflow("totalTTC"))?;
        let acompte = total_ttc
            .checked_apply_rate(DEPOSIT_RATE)
            .ok_or_else(|| overflow("acompte"))?;
        // Derived by subtraction so acompte + solde == totalTTC exactly.
        let solde = total_ttc - acompte;

        Ok(PdfFinancialData {
            total_ht,
            tva,
            total_ttc,
            acompte,
            solde,
        })
    }
}

/// The calculator's result: non-empty sections in display order, plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    pub sections: Vec<PdfSection>,
    pub financial: PdfFinancialData,
}

impl Quote {
    /// Total number of lines across sections.
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|s| s.prestations.len()).sum()
    }

    /// True when nothing was purchased.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Finds a section by its printed title.
    pub fn section(&self, title: &str) -> Option<&PdfSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

// =============================================================================
// Sections
// =============================================================================

/// The four quote sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    SpaceReservation,
    OptionalEquipment,
    AdditionalProducts,
    Communication,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::SpaceReservation,
        SectionKind::OptionalEquipment,
        SectionKind::AdditionalProducts,
        SectionKind::Communication,
    ];

    /// Title printed above the section's table.
    pub const fn title(&self) -> &'static str {
        match self {
            SectionKind::SpaceReservation => "1. Réservation d'espace",
            SectionKind::OptionalEquipment => "2. Aménagements optionnels",
            SectionKind::AdditionalProducts => "3. Produits complémentaires",
            SectionKind::Communication => "4. Visibilité & communication",
        }
    }
}

/// Collects a section's lines, dropping anything that would print as zero.
#[derive(Debug, Default)]
struct Lines(Vec<PdfPrestation>);

impl Lines {
    /// Adds a `quantity × price` line. The price is only resolved when the
    /// quantity is non-zero, so an unused tier never triggers a lookup.
    fn per_unit<F>(&mut self, label: impl Into<String>, quantity: u32, unit: &str, price: F) -> CoreResult<()>
    where
        F: FnOnce() -> CoreResult<Money>,
    {
        if quantity == 0 {
            return Ok(());
        }
        let line = PdfPrestation::per_unit(label, quantity, unit, price()?)?;
        self.push(line);
        Ok(())
    }

    fn flat(&mut self, label: impl Into<String>, unit: &str, price: Money) {
        self.push(PdfPrestation::flat(label, unit, price));
    }

    fn push(&mut self, line: PdfPrestation) {
        if !line.total.is_zero() {
            self.0.push(line);
        }
    }

    fn into_section(self, kind: SectionKind) -> CoreResult<Option<PdfSection>> {
        if self.0.is_empty() {
            return Ok(None);
        }

        let total = checked_sum(self.0.iter().map(|line| line.total), kind.title())?;
        Ok(Some(PdfSection {
            title: kind.title().to_string(),
            prestations: self.0,
            total,
        }))
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the quote for one form snapshot.
///
/// ## Errors
/// - [`CoreError::MissingPrice`] when a selected surface, pack size,
///   electricity tier or catalogue key has no entry in `prices`
/// - [`CoreError::AmountOverflow`] when an amount leaves the i64 cent range
///
/// ## Example
/// ```rust
/// use mih_core::money::Money;
/// use mih_core::pricing::PriceTable;
/// use mih_core::quote::compute_quote;
/// use mih_core::types::{FormData, StandType};
///
/// let mut form = FormData::default();
/// form.space_reservation.selected_stand_type = Some(StandType::StandEquipe);
/// form.space_reservation.stand_equipe_surface = 18;
/// form.space_reservation.stand_equipe_angle = 1;
/// form.space_reservation.puissance = "0".to_string();
///
/// let quote = compute_quote(&form, &PriceTable::mih_2026()).unwrap();
/// assert_eq!(quote.sections[0].prestations.len(), 2);
/// assert_eq!(quote.financial.total_ht, Money::from_euros(18 * 270 + 185));
/// ```
pub fn compute_quote(form: &FormData, prices: &PriceTable) -> CoreResult<Quote> {
    let built = [
        space_reservation_lines(&form.space_reservation, prices)?
            .into_section(SectionKind::SpaceReservation)?,
        optional_equipment_lines(&form.optional_equipment, prices)?
            .into_section(SectionKind::OptionalEquipment)?,
        additional_products_lines(&form.additional_products, prices)?
            .into_section(SectionKind::AdditionalProducts)?,
        communication_lines(&form.communication, prices)?
            .into_section(SectionKind::Communication)?,
    ];
    let sections: Vec<PdfSection> = built.into_iter().flatten().collect();

    let total_ht = checked_sum(sections.iter().map(|s| s.total), "totalHT")?;
    let financial = PdfFinancialData::from_total_ht(total_ht)?;

    debug!(
        sections = sections.len(),
        total_ht = %financial.total_ht,
        total_ttc = %financial.total_ttc,
        "Quote computed"
    );

    Ok(Quote {
        sections,
        financial,
    })
}

fn space_reservation_lines(space: &SpaceReservation, prices: &PriceTable) -> CoreResult<Lines> {
    let mut lines = Lines::default();

    match space.selected_stand_type {
        Some(StandType::StandEquipe) => {
            let surface = space.stand_equipe_surface;
            lines.per_unit("Stand équipé", surface, "m²", || prices.stand_equipe_rate(surface))?;
            if space.stand_equipe_angle > 0 {
                lines.flat("Angle stand équipé", "angle", prices.angle_price);
            }
        }
        Some(StandType::StandPretAExposer) => {
            for (size, count) in [(12, space.pack12), (15, space.pack15), (18, space.pack18)] {
                lines.per_unit(
                    format!("Pack « Prêt à exposer » {size} m²"),
                    count,
                    "pack",
                    || prices.pack_price(size),
                )?;
            }
            lines.per_unit("Angles pack", space.pack_angles, "angle", || Ok(prices.angle_price))?;
        }
        Some(StandType::StandNu) => {
            let surface = space.stand_nu_surface;
            lines.per_unit("Stand nu", surface, "m²", || prices.stand_nu_rate(surface))?;
            if space.stand_nu_angle > 0 {
                lines.flat("Angle stand nu", "angle", prices.angle_price);
            }
        }
        None => {}
    }

    let puissance = space.puissance.trim();
    if !puissance.is_empty() {
        let tier = prices.electricity_tier(puissance)?;
        lines.flat(tier.label.as_str(), "coffret", tier.price);
    }

    lines.per_unit(
        "Espace d'exposition extérieur",
        space.surface_exterieur,
        "m²",
        || Ok(prices.exterior_space_price),
    )?;
    lines.per_unit(
        "Garden cottage (3 m × 3 m)",
        space.cottage,
        "cottage",
        || Ok(prices.garden_cottage_price),
    )?;

    let co_exposants = u32::try_from(space.co_exposants.len()).map_err(|_| CoreError::AmountOverflow {
        context: "co-exposant count".to_string(),
    })?;
    lines.per_unit("Co-exposant", co_exposants, "co-exposant", || Ok(prices.co_exposant_price))?;

    Ok(lines)
}

fn optional_equipment_lines(equipment: &OptionalEquipment, prices: &PriceTable) -> CoreResult<Lines> {
    let mut lines = Lines::default();
    for (key, quantity) in equipment.quantities() {
        if quantity == 0 {
            continue;
        }
        let item = prices.equipment(key)?;
        lines.push(PdfPrestation::per_unit(item.label.as_str(), quantity, item.unit.as_str(), item.price)?);
    }
    Ok(lines)
}

fn additional_products_lines(products: &AdditionalProducts, prices: &PriceTable) -> CoreResult<Lines> {
    let mut lines = Lines::default();
    if products.scan_badges {
        lines.flat("Scan badges visiteurs", "service", prices.scan_badges_price);
    }
    lines.per_unit("Pass soirée", products.pass_soiree, "pass", || Ok(prices.pass_soiree_price))?;
    Ok(lines)
}

fn communication_lines(communication: &Communication, prices: &PriceTable) -> CoreResult<Lines> {
    let mut lines = Lines::default();
    for (key, quantity) in communication.quantities() {
        if quantity == 0 {
            continue;
        }
        let item = prices.communication(key)?;
        lines.push(PdfPrestation::per_unit(item.label.as_str(), quantity, item.unit.as_str(), item.price)?);
    }
    Ok(lines)
}

fn checked_sum(mut amounts: impl Iterator<Item = Money>, context: &str) -> CoreResult<Money> {
    amounts.try_fold(Money::zero(), |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| overflow(context))
    })
}

fn overflow(context: &str) -> CoreError {
    CoreError::AmountOverflow {
        context: context.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoExposant, CommunicationKey, EquipmentKey};

    fn prices() -> PriceTable {
        PriceTable::mih_2026()
    }

    fn equipe_form(surface: u32, angle: u32) -> FormData {
        let mut form = FormData::default();
        form.space_reservation.selected_stand_type = Some(StandType::StandEquipe);
        form.space_reservation.stand_equipe_surface = surface;
        form.space_reservation.stand_equipe_angle = angle;
        form.space_reservation.puissance = "0".to_string();
        form
    }

    #[test]
    fn test_equipped_stand_with_angle() {
        let prices = prices();
        let quote = compute_quote(&equipe_form(18, 1), &prices).unwrap();

        assert_eq!(quote.sections.len(), 1);
        let section = &quote.sections[0];
        assert_eq!(section.title, "1. Réservation d'espace");
        assert_eq!(section.prestations.len(), 2);

        let stand = &section.prestations[0];
        assert_eq!(stand.label, "Stand équipé");
        assert_eq!(stand.quantity, 18);
        assert_eq!(stand.unit_price, Money::from_euros(270));
        assert_eq!(stand.total, Money::from_euros(4_860));

        let angle = &section.prestations[1];
        assert_eq!(angle.quantity, 1);
        assert_eq!(angle.total, prices.angle_price);

        let expected_ht = prices.stand_equipe_rate(18).unwrap().checked_mul_quantity(18).unwrap()
            + prices.angle_price;
        assert_eq!(section.total, expected_ht);
        assert_eq!(quote.financial.total_ht, expected_ht);
        assert_eq!(quote.financial.tva, Money::from_euros(1_009));
        assert_eq!(quote.financial.total_ttc, Money::from_euros(6_054));
        assert_eq!(quote.financial.acompte, Money::from_euros(3_027));
        assert_eq!(quote.financial.solde, Money::from_euros(3_027));
    }

    #[test]
    fn test_angle_is_flat_whatever_the_field_value() {
        let quote = compute_quote(&equipe_form(12, 3), &prices()).unwrap();
        let angle = &quote.sections[0].prestations[1];
        assert_eq!(angle.quantity, 1);
        assert_eq!(angle.total, Money::from_euros(185));
    }

    #[test]
    fn test_all_zero_form_is_empty_quote() {
        let quote = compute_quote(&FormData::default(), &prices()).unwrap();

        assert!(quote.is_empty());
        assert_eq!(quote.line_count(), 0);
        assert_eq!(quote.financial.total_ht, Money::zero());
        assert_eq!(quote.financial.tva, Money::zero());
        assert_eq!(quote.financial.total_ttc, Money::zero());
        assert_eq!(quote.financial.acompte, Money::zero());
        assert_eq!(quote.financial.solde, Money::zero());
    }

    #[test]
    fn test_non_selected_branches_are_ignored() {
        let mut form = equipe_form(18, 0);
        form.space_reservation.pack12 = 2;
        form.space_reservation.pack_angles = 3;
        form.space_reservation.stand_nu_surface = 24;
        form.space_reservation.stand_nu_angle = 1;

        let quote = compute_quote(&form, &prices()).unwrap();
        let labels: Vec<&str> = quote.sections[0]
            .prestations
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Stand équipé"]);
    }

    #[test]
    fn test_unselected_stand_type_prices_nothing_for_stands() {
        let mut form = equipe_form(18, 1);
        form.space_reservation.selected_stand_type = None;
        form.space_reservation.cottage = 1;

        let quote = compute_quote(&form, &prices()).unwrap();
        assert_eq!(quote.line_count(), 1);
        assert_eq!(quote.sections[0].prestations[0].label, "Garden cottage (3 m × 3 m)");
        assert_eq!(quote.financial.total_ht, Money::from_euros(800));
    }

    #[test]
    fn test_ready_to_expose_packs() {
        let mut form = FormData::default();
        form.space_reservation.selected_stand_type = Some(StandType::StandPretAExposer);
        form.space_reservation.pack12 = 1;
        form.space_reservation.pack18 = 2;
        form.space_reservation.pack_angles = 2;
        form.space_reservation.stand_equipe_surface = 30;

        let quote = compute_quote(&form, &prices()).unwrap();
        let lines = &quote.sections[0].prestations;

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].label, "Pack « Prêt à exposer » 12 m²");
        assert_eq!(lines[0].total, Money::from_euros(3_552));
        assert_eq!(lines[1].label, "Pack « Prêt à exposer » 18 m²");
        assert_eq!(lines[1].quantity, 2);
        assert_eq!(lines[1].total, Money::from_euros(10_656));
        assert_eq!(lines[2].label, "Angles pack");
        assert_eq!(lines[2].total, Money::from_euros(370));
        assert_eq!(quote.financial.total_ht, Money::from_euros(3_552 + 10_656 + 370));
    }

    #[test]
    fn test_bare_stand_and_common_add_ons() {
        let mut form = FormData::default();
        let space = &mut form.space_reservation;
        space.selected_stand_type = Some(StandType::StandNu);
        space.stand_nu_surface = 24;
        space.stand_nu_angle = 1;
        space.puissance = "260".to_string();
        space.surface_exterieur = 60;
        space.cottage = 1;
        space.co_exposants = vec![CoExposant::default(), CoExposant::default()];

        let quote = compute_quote(&form, &prices()).unwrap();
        let totals: Vec<(&str, i64)> = quote.sections[0]
            .prestations
            .iter()
            .map(|p| (p.label.as_str(), p.total.euros()))
            .collect();

        assert_eq!(
            totals,
            vec![
                ("Stand nu", 24 * 225),
                ("Angle stand nu", 185),
                ("Coffret électrique 4 kW", 260),
                ("Espace d'exposition extérieur", 60 * 50),
                ("Garden cottage (3 m × 3 m)", 800),
                ("Co-exposant", 800),
            ]
        );
    }

    #[test]
    fn test_included_electricity_tier_emits_no_line() {
        let mut form = FormData::default();
        form.space_reservation.puissance = "0".to_string();
        assert!(compute_quote(&form, &prices()).unwrap().is_empty());

        form.space_reservation.puissance = "350".to_string();
        let quote = compute_quote(&form, &prices()).unwrap();
        assert_eq!(quote.sections[0].prestations[0].label, "Coffret électrique 6 kW");
        assert_eq!(quote.sections[0].prestations[0].unit, "coffret");
        assert_eq!(quote.financial.total_ht, Money::from_euros(350));
    }

    #[test]
    fn test_unknown_surface_fails_fast() {
        let err = compute_quote(&equipe_form(31, 0), &prices()).unwrap_err();
        assert!(matches!(err, CoreError::MissingPrice { table: "stand_equipe_rates", .. }));
    }

    #[test]
    fn test_unknown_electricity_tier_fails_fast() {
        let mut form = FormData::default();
        form.space_reservation.puissance = "9000".to_string();
        let err = compute_quote(&form, &prices()).unwrap_err();
        assert!(matches!(err, CoreError::MissingPrice { table: "electricity", .. }));
    }

    #[test]
    fn test_missing_catalogue_entry_fails_only_when_ordered() {
        let mut prices = prices();
        prices.amenagement.remove(&EquipmentKey::Ecran52);

        let mut form = FormData::default();
        form.optional_equipment.mobilier_chaise = 2;
        assert!(compute_quote(&form, &prices).is_ok());

        form.optional_equipment.mobilier_ecran52 = 1;
        let err = compute_quote(&form, &prices).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingPrice { table: "amenagement", ref key } if key == "mobilier_ecran52"
        ));
    }

    #[test]
    fn test_equipment_and_products_sections() {
        let mut form = FormData::default();
        form.optional_equipment.moquette_diff = 18;
        form.optional_equipment.mobilier_tabouret = 3;
        form.additional_products.scan_badges = true;
        form.additional_products.pass_soiree = 4;

        let quote = compute_quote(&form, &prices()).unwrap();
        assert_eq!(quote.sections.len(), 2);

        let equipment = quote.section("2. Aménagements optionnels").unwrap();
        assert_eq!(equipment.prestations[0].label, "Moquette coloris différent");
        assert_eq!(equipment.prestations[0].total, Money::from_euros(117));
        assert_eq!(equipment.prestations[1].total, Money::from_euros(120));
        assert_eq!(equipment.total, Money::from_euros(237));

        let products = quote.section("3. Produits complémentaires").unwrap();
        assert_eq!(products.prestations[0].label, "Scan badges visiteurs");
        assert_eq!(products.prestations[0].total, Money::from_euros(150));
        assert_eq!(products.prestations[1].total, Money::from_euros(200));
        assert_eq!(products.total, Money::from_euros(350));
    }

    #[test]
    fn test_communication_ignores_description() {
        let mut form = FormData::default();
        form.communication.ameli_goodies_description = "Stylos et carnets".to_string();
        assert!(compute_quote(&form, &prices()).unwrap().is_empty());

        form.communication.ameli_goodies = 1;
        form.communication.visu_pack_complet = 1;
        let quote = compute_quote(&form, &prices()).unwrap();
        let section = quote.section("4. Visibilité & communication").unwrap();
        assert_eq!(section.prestations.len(), 2);
        assert_eq!(section.prestations[0].label, "Pack signalétique complet");
        assert_eq!(section.total, Money::from_euros(1_020 + 900));
    }

    #[test]
    fn test_zero_priced_catalogue_item_emits_no_line() {
        let mut prices = prices();
        if let Some(item) = prices.visibilite.get_mut(&CommunicationKey::LogoPlan) {
            item.price = Money::zero();
        }

        let mut form = FormData::default();
        form.communication.ameli_logo_plan = 1;
        assert!(compute_quote(&form, &prices).unwrap().is_empty());
    }

    #[test]
    fn test_deposit_rounding_keeps_totals_exact() {
        let mut prices = prices();
        if let Some(item) = prices.amenagement.get_mut(&EquipmentKey::Chaise) {
            item.price = Money::from_cents(4);
        }

        let mut form = FormData::default();
        form.optional_equipment.mobilier_chaise = 1;

        let financial = compute_quote(&form, &prices).unwrap().financial;
        // 0,04 € HT → TVA 0,008 € → 0,01 €; TTC 0,05 €; acompte 0,025 € → 0,03 €
        assert_eq!(financial.tva, Money::from_cents(1));
        assert_eq!(financial.total_ttc, Money::from_cents(5));
        assert_eq!(financial.acompte, Money::from_cents(3));
        assert_eq!(financial.solde, Money::from_cents(2));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut prices = prices();
        prices.pass_soiree_price = Money::from_cents(i64::MAX / 2);

        let mut form = FormData::default();
        form.additional_products.pass_soiree = 3;
        let err = compute_quote(&form, &prices).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }

    #[test]
    fn test_wire_shape() {
        let quote = compute_quote(&equipe_form(18, 1), &prices()).unwrap();
        let value = serde_json::to_value(&quote).unwrap();

        let line = &value["sections"][0]["prestations"][0];
        assert_eq!(line["libelle"], "Stand équipé");
        assert_eq!(line["unite"], "m²");
        assert_eq!(line["prixUnitaire"], 270.0);
        assert_eq!(line["total"], 4860.0);

        let financial = &value["financial"];
        assert_eq!(financial["totalHT"], 5045.0);
        assert_eq!(financial["tva"], 1009.0);
        assert_eq!(financial["totalTTC"], 6054.0);
        assert_eq!(financial["acompte"], 3027.0);
        assert_eq!(financial["solde"], 3027.0);

        let back: Quote = serde_json::from_value(value).unwrap();
        assert_eq!(back, quote);
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let prices = prices();
        let mut form = equipe_form(24, 1);
        form.optional_equipment.mobilier_comptoir = 2;
        let expected = compute_quote(&form, &prices).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| compute_quote(&form, &prices).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
