//! # Contract Form Fields
//!
//! Maps a form snapshot and its quote onto the named fields of the signed
//! contract PDF (AcroForm). Text fields carry strings, checkboxes carry
//! booleans.
//!
//! ## Conventions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  *_qte        quantity as digits, "" when nothing was ordered          │
//! │  *_prix(_ht)  LINE total (quantity × unit price), never the unit price │
//! │  amounts      "1234,56": decimal comma, no thousands grouping          │
//! │  total_ht_N   subtotal of quote section N, "0,00" when it is absent    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Section and grand totals come from the [`Quote`], so the contract and the
//! quote can never disagree on them. Line amounts are recomputed from the
//! [`PriceTable`] with the same checked arithmetic the quote uses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::PriceTable;
use crate::quote::{Quote, SectionKind};
use crate::types::{CommunicationKey, EquipmentKey, FormData, SpaceReservation, StandType};

/// Value of one contract field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum ContractField {
    Text(String),
    Checkbox(bool),
}

impl ContractField {
    pub fn text(value: impl Into<String>) -> Self {
        ContractField::Text(value.into())
    }

    /// Text content, `None` for a checkbox.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContractField::Text(text) => Some(text),
            ContractField::Checkbox(_) => None,
        }
    }

    /// Checkbox state, `None` for a text field.
    pub fn as_checked(&self) -> Option<bool> {
        match self {
            ContractField::Checkbox(checked) => Some(*checked),
            ContractField::Text(_) => None,
        }
    }
}

/// Field name → value, sorted by name.
pub type ContractFields = BTreeMap<&'static str, ContractField>;

// =============================================================================
// Field Tables
// =============================================================================

/// Activity checkbox → label stored in `CompanyInfo::activites`.
const ACTIVITY_FIELDS: [(&str, &str); 8] = [
    ("act_indus", "Industrie"),
    ("act_logistique", "Transport et logistique"),
    ("act_btp", "BTP, construction et logement"),
    ("act_dev_durable", "Environnement, énergie et développement durable"),
    ("act_service", "Services aux entreprises"),
    ("act_new_tech", "Image et nouvelles technologies"),
    ("act_tourisme", "Tourisme et bien-être"),
    ("act_autre", "Autre"),
];

/// Electricity quantity / amount fields → `puissance` tier key.
const ELECTRICITY_FIELDS: [(&str, &str, &str); 3] = [
    ("elec_1_qte", "elec_1_prix_ht", "220"),
    ("elec_2_qte", "elec_2_prix_ht", "260"),
    ("elec_3_qte", "elec_3_prix_ht", "350"),
];

const EQUIPMENT_FIELDS: [(EquipmentKey, &str, &str); 27] = {
    use EquipmentKey as E;
    [
        (E::ReserveMelamine, "reserve_melamine_qte", "reserve_melamine_prix"),
        (E::MoquetteDiff, "moquette_qte", "moquette_prix"),
        (E::Velum, "velum_qte", "velum_prix"),
        (E::CloisonBoisTissu, "cloison_bois_qte", "cloison_bois_prix"),
        (E::ReserveBois, "reserve_bois_qte", "reserve_bois_prix"),
        (E::RailSpots, "rail_qte", "rail_prix"),
        (E::Comptoir, "comptoir_qte", "comptoir_prix_ht"),
        (E::Tabouret, "tabouret_qte", "tabouret_prix_ht"),
        (E::MangeDebout, "mange_debout_qte", "mange_debout_prix_ht"),
        (E::Chaise, "chaise_qte", "chaise_prix_ht"),
        (E::Table120, "table_qte", "table_prix_ht"),
        (E::PackMangeDebout, "pck_mange_tabouret_qte", "pck_mange_tabouret_prix_ht"),
        (E::Ecran52, "ecran_qte", "ecran_prix_ht"),
        (E::Frigo140, "frigo_140_qte", "frigo_140_prix_ht"),
        (E::Frigo260, "frigo_260_qte", "frigo_260_prix_ht"),
        (E::Presentoir, "presentoir_qte", "presentoir_prix_ht"),
        (E::Bandeau, "bandeau_qte", "bandeau_prix_ht"),
        (E::BlocPrises, "bloc_prise_qte", "bloc_prix_ht"),
        (E::Fauteuil, "fauteuil_qte", "fauteuil_prix_ht"),
        (E::TableBasse, "table_basse_qte", "table_basse_prix_ht"),
        (E::GueridonHaut, "gueridon_qte", "gueridon_prix_ht"),
        (E::PoufCube, "pouf_qte", "pouf_prix_ht"),
        (E::ColonneVitrine, "colonne_vitrine_qte", "colonne_vitrine_prix_ht"),
        (E::ComptoirVitrine, "comptoir_vitrine_qte", "comptoir_vitrine_prix_ht"),
        (E::PorteManteaux, "porte_menteaux_qte", "porte_menteaux_prix_ht"),
        (E::PlanteBambou, "plante_bambou_qte", "plante_bambou_prix_ht"),
        (E::PlanteKentia, "plante_kentia_qte", "plante_kentia_prix_ht"),
    ]
};

/// Signage items print a quantity and an amount.
const SIGNAGE_FIELDS: [(CommunicationKey, &str, &str); 5] = {
    use CommunicationKey as C;
    [
        (C::PackComplet, "signa_pck_qte", "signa_pck_prix_ht"),
        (C::VisuComptoir, "signa_comptoir_qte", "signa_comptoir_prix_ht"),
        (C::HautCloisons, "signa_haut_qte", "signa_haut_prix_ht"),
        (C::CloisonComplete, "signa_complete_qte", "signa_complete_prix_ht"),
        (C::EnseigneHaute, "signa_enseigne_haute_qte", "signa_enseigne_haute_prix_ht"),
    ]
};

/// Catalogue and promotion items only print an amount.
const PROMOTION_FIELDS: [(CommunicationKey, &str); 8] = {
    use CommunicationKey as C;
    [
        (C::UnePage, "comm_catalogue"),
        (C::DemiPage, "comm_demi_catalogue"),
        (C::DeuxiemeCouverture, "comm_catalogue_deuxieme"),
        (C::QuatriemeCouverture, "comm_catalogue_quatrieme"),
        (C::LogoPlan, "comm_logo_plan"),
        (C::Goodies, "comm_sac"),
        (C::Hotesse, "comm_hotesse"),
        (C::Invitations, "comm_papier"),
    ]
};

const SECTION_TOTAL_FIELDS: [(SectionKind, &str); 4] = [
    (SectionKind::SpaceReservation, "total_ht_1"),
    (SectionKind::OptionalEquipment, "total_ht_2"),
    (SectionKind::AdditionalProducts, "total_ht_3"),
    (SectionKind::Communication, "total_ht_4"),
];

// =============================================================================
// Mapping
// =============================================================================

/// Fills every contract field from a form, its computed quote and the price
/// table the quote was computed with.
///
/// ## Errors
/// - [`CoreError::MissingPrice`] when an ordered item has no price
/// - [`CoreError::AmountOverflow`] when a line amount leaves the cent range
///
/// ## Example
/// ```rust
/// use mih_core::contract::contract_fields;
/// use mih_core::{compute_quote, FormData, PriceTable, StandType};
///
/// let prices = PriceTable::mih_2026();
/// let mut form = FormData::default();
/// form.space_reservation.selected_stand_type = Some(StandType::StandNu);
/// form.space_reservation.stand_nu_surface = 12;
/// let quote = compute_quote(&form, &prices).unwrap();
///
/// let fields = contract_fields(&form, &quote, &prices).unwrap();
/// assert_eq!(fields["std_nu_prix_ht"].as_text(), Some("2700,00"));
/// assert_eq!(fields["total_ttc"].as_text(), Some("3240,00"));
/// ```
pub fn contract_fields(form: &FormData, quote: &Quote, prices: &PriceTable) -> CoreResult<ContractFields> {
    let mut fields = Fields::default();

    identity_fields(&mut fields, form);
    stand_fields(&mut fields, &form.space_reservation, prices)?;

    for (key, quantity) in form.optional_equipment.quantities() {
        if let Some(&(_, qte, prix)) = EQUIPMENT_FIELDS.iter().find(|(k, _, _)| *k == key) {
            let price = if quantity > 0 { prices.equipment(key)?.price } else { Money::zero() };
            fields.line(qte, prix, quantity, price)?;
        }
    }

    let products = &form.additional_products;
    fields.checkbox("scan_badge", products.scan_badges);
    let scan = if products.scan_badges { prices.scan_badges_price } else { Money::zero() };
    fields.amount_or_blank("scan_badge_prix_ht", scan);
    fields.line("pass_soiree_qte", "pass_soiree_prix_ht", products.pass_soiree, prices.pass_soiree_price)?;

    for (key, quantity) in form.communication.quantities() {
        let price = || -> CoreResult<Money> {
            if quantity > 0 {
                Ok(prices.communication(key)?.price)
            } else {
                Ok(Money::zero())
            }
        };
        if let Some(&(_, qte, prix)) = SIGNAGE_FIELDS.iter().find(|(k, _, _)| *k == key) {
            fields.line(qte, prix, quantity, price()?)?;
        } else if let Some(&(_, field)) = PROMOTION_FIELDS.iter().find(|(k, _)| *k == key) {
            let total = line_total(field, quantity, price()?)?;
            fields.amount_or_blank(field, total);
        }
    }

    for (kind, field) in SECTION_TOTAL_FIELDS {
        let total = quote.section(kind.title()).map(|s| s.total).unwrap_or_default();
        fields.amount(field, total);
    }
    fields.amount("total_ht", quote.financial.total_ht);
    fields.amount("total_tva", quote.financial.tva);
    fields.amount("total_ttc", quote.financial.total_ttc);

    fields.text("date", form.signature.date_signature.trim());

    Ok(fields.0)
}

fn identity_fields(fields: &mut Fields, form: &FormData) {
    let company = &form.company;
    let raison_sociale = if company.raison_sociale.trim().is_empty() {
        &company.enseigne
    } else {
        &company.raison_sociale
    };
    fields.text("raison_social", raison_sociale);
    fields.text("adresse", &company.adresse);
    fields.text("code_postal", &company.code_postal);
    fields.text("ville", &company.ville);
    fields.text("pays", &company.pays);
    fields.text("tel", &company.telephone);
    fields.text("fax", &company.fax);
    fields.text("site_internet", &company.site_internet);
    fields.text("siret", &company.siret);
    fields.text("tva", &company.tva);
    fields.checkbox("membre", company.membre_porte);
    fields.checkbox("expo_2024", company.exposant2024);

    for (field, label) in ACTIVITY_FIELDS {
        let ticked = company
            .activites
            .iter()
            .any(|activity| same_activity(activity, label));
        fields.checkbox(field, ticked);
    }
    fields.text("act_autre_text", &company.autre_activite);

    let contact = &form.contact;
    fields.text("fac_code_postal", &contact.fact_code_postal);
    fields.text("fac_ville", &contact.fact_ville);
    fields.text("fac_pays", &contact.fact_pays);
    fields.text("compta_contact", &contact.contact_nom);
    fields.text("compta_tel", &contact.contact_tel);
    fields.text("compta_mail", &contact.contact_mail);
    fields.text("resp_nom", &contact.resp_nom);
    fields.text("resp_prenom", &contact.resp_prenom);
    fields.text("resp_tel", &contact.resp_tel);
    fields.text("resp_mail", &contact.resp_mail);
    fields.text("resp_ope_nom", &contact.op_nom);
    fields.text("resp_ope_prenom", &contact.op_prenom);
    fields.text("resp_ope_tel", &contact.op_tel);
    fields.text("resp_ope_mail", &contact.op_mail);
}

fn stand_fields(fields: &mut Fields, space: &SpaceReservation, prices: &PriceTable) -> CoreResult<()> {
    let stand = space.selected_stand_type;

    let equipe = if stand == Some(StandType::StandEquipe) { space.stand_equipe_surface } else { 0 };
    let rate = if equipe > 0 { prices.stand_equipe_rate(equipe)? } else { Money::zero() };
    fields.line("std_equipe_surface", "std_equipe_prix_ht", equipe, rate)?;

    let nu = if stand == Some(StandType::StandNu) { space.stand_nu_surface } else { 0 };
    let rate = if nu > 0 { prices.stand_nu_rate(nu)? } else { Money::zero() };
    fields.line("std_nu_surface_qte", "std_nu_prix_ht", nu, rate)?;

    let ready = stand == Some(StandType::StandPretAExposer);
    let mut packs_total = Money::zero();
    for (size, count, field) in [
        (12, space.pack12, "std_expo_surface_12"),
        (15, space.pack15, "std_expo_surface_15"),
        (18, space.pack18, "std_expo_surface_18"),
    ] {
        let count = if ready { count } else { 0 };
        fields.checkbox(field, count > 0);
        if count > 0 {
            let total = line_total(field, count, prices.pack_price(size)?)?;
            packs_total = packs_total
                .checked_add(total)
                .ok_or_else(|| overflow("std_expo_prix_ht"))?;
        }
    }
    fields.amount_or_blank("std_expo_prix_ht", packs_total);

    // Equipped and bare angles are on/off flags billed once.
    let angles = [
        (StandType::StandEquipe, space.stand_equipe_angle.min(1), "std_equipe_angle_qte", "std_equipe_angle_prix_ht"),
        (StandType::StandPretAExposer, space.pack_angles, "std_expo_angle_qte", "std_expo_angle_prix_ht"),
        (StandType::StandNu, space.stand_nu_angle.min(1), "std_nu_angle_qte", "std_nu_angle_prix_ht"),
    ];
    for (kind, quantity, qte, prix) in angles {
        let quantity = if stand == Some(kind) { quantity } else { 0 };
        fields.line(qte, prix, quantity, prices.angle_price)?;
    }

    let puissance = space.puissance.trim();
    for (qte, prix, key) in ELECTRICITY_FIELDS {
        let price = if puissance == key { prices.electricity_tier(key)?.price } else { Money::zero() };
        fields.line(qte, prix, u32::from(puissance == key), price)?;
    }

    fields.line(
        "std_ext_surface_qte",
        "std_ext_prix_ht",
        space.surface_exterieur,
        prices.exterior_space_price,
    )?;
    Ok(())
}

/// Activity labels compare on the text, whatever hyphen the front end used.
fn same_activity(stored: &str, label: &str) -> bool {
    let normalize = |s: &str| -> String {
        s.trim()
            .chars()
            .map(|c| if matches!(c, '\u{2010}' | '\u{2011}') { '-' } else { c })
            .collect::<String>()
            .to_lowercase()
    };
    normalize(stored) == normalize(label)
}

fn line_total(field: &str, quantity: u32, price: Money) -> CoreResult<Money> {
    price
        .checked_mul_quantity(quantity)
        .ok_or_else(|| overflow(field))
}

fn overflow(field: &str) -> CoreError {
    CoreError::AmountOverflow {
        context: format!("contract field '{field}'"),
    }
}

#[derive(Debug, Default)]
struct Fields(ContractFields);

impl Fields {
    fn text(&mut self, name: &'static str, value: &str) {
        self.0.insert(name, ContractField::text(value));
    }

    fn checkbox(&mut self, name: &'static str, checked: bool) {
        self.0.insert(name, ContractField::Checkbox(checked));
    }

    fn amount(&mut self, name: &'static str, amount: Money) {
        self.0.insert(name, ContractField::Text(amount.format_plain_fr()));
    }

    /// Blank instead of "0,00" for items nobody ordered.
    fn amount_or_blank(&mut self, name: &'static str, amount: Money) {
        if amount.is_zero() {
            self.text(name, "");
        } else {
            self.amount(name, amount);
        }
    }

    /// A quantity field and its line amount, both blank when `quantity` is 0.
    fn line(&mut self, qte: &'static str, prix: &'static str, quantity: u32, price: Money) -> CoreResult<()> {
        if quantity == 0 {
            self.text(qte, "");
            self.text(prix, "");
            return Ok(());
        }
        self.0.insert(qte, ContractField::Text(quantity.to_string()));
        let total = line_total(prix, quantity, price)?;
        self.amount(prix, total);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
