//! # Form Types
//!
//! The exhibitor form snapshot, exactly as the multi-step front end sends it.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            FormData                                     │
//! │                                                                         │
//! │  step 1  company            CompanyInfo         (identity, not priced)  │
//! │  step 2  contact            ContactInfo         (people, not priced)    │
//! │  step 3  spaceReservation   SpaceReservation    → section 1             │
//! │  step 4  optionalEquipment  OptionalEquipment   → section 2             │
//! │  step 5  additionalProducts AdditionalProducts  → section 3             │
//! │  step 6  communication      Communication       → section 4             │
//! │  step 7  signature          ContractSignature   (not priced)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Rules
//! - Field names are the contract: camelCase, except the catalogue keys
//!   (`mobilier_*`, `visu_*`, `ameli_*`) which are kept verbatim
//! - Missing fields default to zero / empty / false
//! - Unknown fields are ignored
//! - Quantities are `u32`: a negative or fractional count fails to decode

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;

// =============================================================================
// Form Data
// =============================================================================

/// One immutable snapshot of the whole exhibitor form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct FormData {
    pub company: CompanyInfo,
    pub contact: ContactInfo,
    pub space_reservation: SpaceReservation,
    pub optional_equipment: OptionalEquipment,
    pub additional_products: AdditionalProducts,
    pub communication: Communication,
    pub signature: ContractSignature,
}

impl FormData {
    /// Decodes a snapshot from the front end's JSON.
    ///
    /// ## Example
    /// ```rust
    /// use mih_core::types::{FormData, StandType};
    ///
    /// let form = FormData::from_json(r#"{
    ///     "spaceReservation": { "selectedStandType": "standEquipe", "standEquipeSurface": 18 },
    ///     "somethingElse": true
    /// }"#).unwrap();
    ///
    /// assert_eq!(form.space_reservation.selected_stand_type, Some(StandType::StandEquipe));
    /// assert_eq!(form.optional_equipment.velum, 0);
    ///
    /// assert!(FormData::from_json(r#"{ "additionalProducts": { "passSoiree": -1 } }"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when at least one priced item is selected in steps 3 to 6.
    pub fn has_selected_services(&self) -> bool {
        let space = &self.space_reservation;
        let has_space = space.current_stand_size() > 0
            || space.surface_exterieur > 0
            || space.cottage > 0
            || !space.co_exposants.is_empty();

        has_space
            || self.optional_equipment.quantities().iter().any(|(_, qty)| *qty > 0)
            || self.additional_products.scan_badges
            || self.additional_products.pass_soiree > 0
            || self.communication.quantities().iter().any(|(_, qty)| *qty > 0)
    }
}

// =============================================================================
// Step 1: Company
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyInfo {
    pub raison_sociale: String,
    pub adresse: String,
    pub code_postal: String,
    pub ville: String,
    pub pays: String,
    pub telephone: String,
    pub fax: String,
    pub site_internet: String,
    pub siret: String,
    /// Intra-community VAT number.
    pub tva: String,
    /// Member of the Porte du Hainaut association.
    pub membre_porte: bool,
    /// Exhibited at the previous edition.
    pub exposant2024: bool,
    pub activites: Vec<String>,
    pub autre_activite: String,
    /// Trade name shown on the stand sign.
    pub enseigne: String,
}

// =============================================================================
// Step 2: Contacts
// =============================================================================

/// Billing, accounting, manager and on-site contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub fact_code_postal: String,
    pub fact_ville: String,
    pub fact_pays: String,
    pub contact_nom: String,
    pub contact_tel: String,
    pub contact_mail: String,
    pub resp_nom: String,
    pub resp_prenom: String,
    pub resp_tel: String,
    pub resp_mail: String,
    pub op_nom: String,
    pub op_prenom: String,
    pub op_tel: String,
    pub op_mail: String,
}

// =============================================================================
// Step 3: Space Reservation
// =============================================================================

/// The three mutually exclusive ways to provision a stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum StandType {
    /// Equipped stand, priced per m².
    StandEquipe,
    /// "Prêt à exposer" turnkey packs of 12, 15 or 18 m².
    StandPretAExposer,
    /// Bare floor space, priced per m².
    StandNu,
}

/// Stand, electricity and outdoor choices.
///
/// Only the branch named by `selected_stand_type` is priced. The front end
/// clears the other branches when the type changes, but a stale value in
/// a non-selected branch is ignored rather than billed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct SpaceReservation {
    pub selected_stand_type: Option<StandType>,
    /// Equipped stand surface in m².
    pub stand_equipe_surface: u32,
    /// Non-zero when the equipped stand is on a corner.
    pub stand_equipe_angle: u32,
    pub pack12: u32,
    pub pack15: u32,
    pub pack18: u32,
    /// Number of open corners across the packs.
    pub pack_angles: u32,
    /// Bare stand surface in m².
    pub stand_nu_surface: u32,
    /// Non-zero when the bare stand is on a corner.
    pub stand_nu_angle: u32,
    /// Electricity tier key: "0" (1 kW included), "220", "260" or "350".
    pub puissance: String,
    /// Outdoor exhibition surface in m².
    pub surface_exterieur: u32,
    /// Number of garden cottages.
    pub cottage: u32,
    pub moquette_couleur: String,
    pub co_exposants: Vec<CoExposant>,
}

impl SpaceReservation {
    /// Surface of the selected stand in m², 0 when none is selected.
    ///
    /// For packs, the first non-empty pack size wins.
    pub fn current_stand_size(&self) -> u32 {
        match self.selected_stand_type {
            Some(StandType::StandEquipe) => self.stand_equipe_surface,
            Some(StandType::StandNu) => self.stand_nu_surface,
            Some(StandType::StandPretAExposer) => {
                if self.pack12 > 0 {
                    12
                } else if self.pack15 > 0 {
                    15
                } else if self.pack18 > 0 {
                    18
                } else {
                    0
                }
            }
            None => 0,
        }
    }
}

/// A co-exhibitor sharing the stand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct CoExposant {
    pub id: Option<String>,
    pub nom_entreprise: String,
    pub nom_responsable: String,
    pub prenom_responsable: String,
    pub tel_responsable: String,
    pub mail_responsable: String,
}

// =============================================================================
// Step 4: Optional Equipment
// =============================================================================

/// Catalogue key of a stand fitting or furniture item.
///
/// Declaration order is the order lines appear on the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EquipmentKey {
    #[serde(rename = "reserveMelamine")]
    ReserveMelamine,
    #[serde(rename = "moquetteDiff")]
    MoquetteDiff,
    #[serde(rename = "velum")]
    Velum,
    #[serde(rename = "cloisonBoisTissu")]
    CloisonBoisTissu,
    #[serde(rename = "reserveBois")]
    ReserveBois,
    #[serde(rename = "railSpots")]
    RailSpots,
    #[serde(rename = "mobilier_comptoir")]
    Comptoir,
    #[serde(rename = "mobilier_tabouret")]
    Tabouret,
    #[serde(rename = "mobilier_mangeDebout")]
    MangeDebout,
    #[serde(rename = "mobilier_chaise")]
    Chaise,
    #[serde(rename = "mobilier_table120")]
    Table120,
    #[serde(rename = "mobilier_packMangeDebout")]
    PackMangeDebout,
    #[serde(rename = "mobilier_ecran52")]
    Ecran52,
    #[serde(rename = "mobilier_frigo140")]
    Frigo140,
    #[serde(rename = "mobilier_frigo260")]
    Frigo260,
    #[serde(rename = "mobilier_presentoir")]
    Presentoir,
    #[serde(rename = "mobilier_bandeau")]
    Bandeau,
    #[serde(rename = "mobilier_blocPrises")]
    BlocPrises,
    #[serde(rename = "mobilier_fauteuil")]
    Fauteuil,
    #[serde(rename = "mobilier_tableBasse")]
    TableBasse,
    #[serde(rename = "mobilier_gueridonHaut")]
    GueridonHaut,
    #[serde(rename = "mobilier_poufCube")]
    PoufCube,
    #[serde(rename = "mobilier_colonneVitrine")]
    ColonneVitrine,
    #[serde(rename = "mobilier_comptoirVitrine")]
    ComptoirVitrine,
    #[serde(rename = "mobilier_porteManteaux")]
    PorteManteaux,
    #[serde(rename = "mobilier_planteBambou")]
    PlanteBambou,
    #[serde(rename = "mobilier_planteKentia")]
    PlanteKentia,
}

impl EquipmentKey {
    /// Every key, in quote order.
    pub const ALL: [EquipmentKey; 27] = [
        EquipmentKey::ReserveMelamine,
        EquipmentKey::MoquetteDiff,
        EquipmentKey::Velum,
        EquipmentKey::CloisonBoisTissu,
        EquipmentKey::ReserveBois,
        EquipmentKey::RailSpots,
        EquipmentKey::Comptoir,
        EquipmentKey::Tabouret,
        EquipmentKey::MangeDebout,
        EquipmentKey::Chaise,
        EquipmentKey::Table120,
        EquipmentKey::PackMangeDebout,
        EquipmentKey::Ecran52,
        EquipmentKey::Frigo140,
        EquipmentKey::Frigo260,
        EquipmentKey::Presentoir,
        EquipmentKey::Bandeau,
        EquipmentKey::BlocPrises,
        EquipmentKey::Fauteuil,
        EquipmentKey::TableBasse,
        EquipmentKey::GueridonHaut,
        EquipmentKey::PoufCube,
        EquipmentKey::ColonneVitrine,
        EquipmentKey::ComptoirVitrine,
        EquipmentKey::PorteManteaux,
        EquipmentKey::PlanteBambou,
        EquipmentKey::PlanteKentia,
    ];

    /// The wire field name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EquipmentKey::ReserveMelamine => "reserveMelamine",
            EquipmentKey::MoquetteDiff => "moquetteDiff",
            EquipmentKey::Velum => "velum",
            EquipmentKey::CloisonBoisTissu => "cloisonBoisTissu",
            EquipmentKey::ReserveBois => "reserveBois",
            EquipmentKey::RailSpots => "railSpots",
            EquipmentKey::Comptoir => "mobilier_comptoir",
            EquipmentKey::Tabouret => "mobilier_tabouret",
            EquipmentKey::MangeDebout => "mobilier_mangeDebout",
            EquipmentKey::Chaise => "mobilier_chaise",
            EquipmentKey::Table120 => "mobilier_table120",
            EquipmentKey::PackMangeDebout => "mobilier_packMangeDebout",
            EquipmentKey::Ecran52 => "mobilier_ecran52",
            EquipmentKey::Frigo140 => "mobilier_frigo140",
            EquipmentKey::Frigo260 => "mobilier_frigo260",
            EquipmentKey::Presentoir => "mobilier_presentoir",
            EquipmentKey::Bandeau => "mobilier_bandeau",
            EquipmentKey::BlocPrises => "mobilier_blocPrises",
            EquipmentKey::Fauteuil => "mobilier_fauteuil",
            EquipmentKey::TableBasse => "mobilier_tableBasse",
            EquipmentKey::GueridonHaut => "mobilier_gueridonHaut",
            EquipmentKey::PoufCube => "mobilier_poufCube",
            EquipmentKey::ColonneVitrine => "mobilier_colonneVitrine",
            EquipmentKey::ComptoirVitrine => "mobilier_comptoirVitrine",
            EquipmentKey::PorteManteaux => "mobilier_porteManteaux",
            EquipmentKey::PlanteBambou => "mobilier_planteBambou",
            EquipmentKey::PlanteKentia => "mobilier_planteKentia",
        }
    }
}

/// Quantities of stand fittings and furniture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionalEquipment {
    pub reserve_melamine: u32,
    /// Different carpet colour, in m².
    pub moquette_diff: u32,
    /// Stretched fabric ceiling, in m².
    pub velum: u32,
    /// Fabric-covered wooden partition, in linear metres.
    pub cloison_bois_tissu: u32,
    pub reserve_bois: u32,
    pub rail_spots: u32,
    #[serde(rename = "mobilier_comptoir")]
    pub mobilier_comptoir: u32,
    #[serde(rename = "mobilier_tabouret")]
    pub mobilier_tabouret: u32,
    #[serde(rename = "mobilier_mangeDebout")]
    pub mobilier_mange_debout: u32,
    #[serde(rename = "mobilier_chaise")]
    pub mobilier_chaise: u32,
    #[serde(rename = "mobilier_table120")]
    pub mobilier_table120: u32,
    #[serde(rename = "mobilier_packMangeDebout")]
    pub mobilier_pack_mange_debout: u32,
    #[serde(rename = "mobilier_ecran52")]
    pub mobilier_ecran52: u32,
    #[serde(rename = "mobilier_frigo140")]
    pub mobilier_frigo140: u32,
    #[serde(rename = "mobilier_frigo260")]
    pub mobilier_frigo260: u32,
    #[serde(rename = "mobilier_presentoir")]
    pub mobilier_presentoir: u32,
    #[serde(rename = "mobilier_bandeau")]
    pub mobilier_bandeau: u32,
    #[serde(rename = "mobilier_blocPrises")]
    pub mobilier_bloc_prises: u32,
    #[serde(rename = "mobilier_fauteuil")]
    pub mobilier_fauteuil: u32,
    #[serde(rename = "mobilier_tableBasse")]
    pub mobilier_table_basse: u32,
    #[serde(rename = "mobilier_gueridonHaut")]
    pub mobilier_gueridon_haut: u32,
    #[serde(rename = "mobilier_poufCube")]
    pub mobilier_pouf_cube: u32,
    #[serde(rename = "mobilier_colonneVitrine")]
    pub mobilier_colonne_vitrine: u32,
    #[serde(rename = "mobilier_comptoirVitrine")]
    pub mobilier_comptoir_vitrine: u32,
    #[serde(rename = "mobilier_porteManteaux")]
    pub mobilier_porte_manteaux: u32,
    #[serde(rename = "mobilier_planteBambou")]
    pub mobilier_plante_bambou: u32,
    #[serde(rename = "mobilier_planteKentia")]
    pub mobilier_plante_kentia: u32,
}

impl OptionalEquipment {
    /// Every quantity paired with its catalogue key, in quote order.
    pub fn quantities(&self) -> [(EquipmentKey, u32); 27] {
        [
            (EquipmentKey::ReserveMelamine, self.reserve_melamine),
            (EquipmentKey::MoquetteDiff, self.moquette_diff),
            (EquipmentKey::Velum, self.velum),
            (EquipmentKey::CloisonBoisTissu, self.cloison_bois_tissu),
            (EquipmentKey::ReserveBois, self.reserve_bois),
            (EquipmentKey::RailSpots, self.rail_spots),
            (EquipmentKey::Comptoir, self.mobilier_comptoir),
            (EquipmentKey::Tabouret, self.mobilier_tabouret),
            (EquipmentKey::MangeDebout, self.mobilier_mange_debout),
            (EquipmentKey::Chaise, self.mobilier_chaise),
            (EquipmentKey::Table120, self.mobilier_table120),
            (EquipmentKey::PackMangeDebout, self.mobilier_pack_mange_debout),
            (EquipmentKey::Ecran52, self.mobilier_ecran52),
            (EquipmentKey::Frigo140, self.mobilier_frigo140),
            (EquipmentKey::Frigo260, self.mobilier_frigo260),
            (EquipmentKey::Presentoir, self.mobilier_presentoir),
            (EquipmentKey::Bandeau, self.mobilier_bandeau),
            (EquipmentKey::BlocPrises, self.mobilier_bloc_prises),
            (EquipmentKey::Fauteuil, self.mobilier_fauteuil),
            (EquipmentKey::TableBasse, self.mobilier_table_basse),
            (EquipmentKey::GueridonHaut, self.mobilier_gueridon_haut),
            (EquipmentKey::PoufCube, self.mobilier_pouf_cube),
            (EquipmentKey::ColonneVitrine, self.mobilier_colonne_vitrine),
            (EquipmentKey::ComptoirVitrine, self.mobilier_comptoir_vitrine),
            (EquipmentKey::PorteManteaux, self.mobilier_porte_manteaux),
            (EquipmentKey::PlanteBambou, self.mobilier_plante_bambou),
            (EquipmentKey::PlanteKentia, self.mobilier_plante_kentia),
        ]
    }
}

// =============================================================================
// Step 5: Additional Products
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct AdditionalProducts {
    /// Visitor badge scanning service (flat price).
    pub scan_badges: bool,
    /// Extra evening event passes.
    pub pass_soiree: u32,
}

// =============================================================================
// Step 6: Communication
// =============================================================================

/// Catalogue key of a visibility or communication item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CommunicationKey {
    #[serde(rename = "visu_packComplet")]
    PackComplet,
    #[serde(rename = "visu_comptoir")]
    VisuComptoir,
    #[serde(rename = "visu_hautCloisons")]
    HautCloisons,
    #[serde(rename = "visu_cloisonComplete")]
    CloisonComplete,
    #[serde(rename = "visu_enseigneHaute")]
    EnseigneHaute,
    #[serde(rename = "ameli_invitations")]
    Invitations,
    #[serde(rename = "ameli_demiPage")]
    DemiPage,
    #[serde(rename = "ameli_unePage")]
    UnePage,
    #[serde(rename = "ameli_deuxiemeCouverture")]
    DeuxiemeCouverture,
    #[serde(rename = "ameli_quatriemeCouverture")]
    QuatriemeCouverture,
    #[serde(rename = "ameli_logoPlan")]
    LogoPlan,
    #[serde(rename = "ameli_goodies")]
    Goodies,
    #[serde(rename = "ameli_hotesse")]
    Hotesse,
}

impl CommunicationKey {
    /// Every key, in quote order.
    pub const ALL: [CommunicationKey; 13] = [
        CommunicationKey::PackComplet,
        CommunicationKey::VisuComptoir,
        CommunicationKey::HautCloisons,
        CommunicationKey::CloisonComplete,
        CommunicationKey::EnseigneHaute,
        CommunicationKey::Invitations,
        CommunicationKey::DemiPage,
        CommunicationKey::UnePage,
        CommunicationKey::DeuxiemeCouverture,
        CommunicationKey::QuatriemeCouverture,
        CommunicationKey::LogoPlan,
        CommunicationKey::Goodies,
        CommunicationKey::Hotesse,
    ];

    /// The wire field name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CommunicationKey::PackComplet => "visu_packComplet",
            CommunicationKey::VisuComptoir => "visu_comptoir",
            CommunicationKey::HautCloisons => "visu_hautCloisons",
            CommunicationKey::CloisonComplete => "visu_cloisonComplete",
            CommunicationKey::EnseigneHaute => "visu_enseigneHaute",
            CommunicationKey::Invitations => "ameli_invitations",
            CommunicationKey::DemiPage => "ameli_demiPage",
            CommunicationKey::UnePage => "ameli_unePage",
            CommunicationKey::DeuxiemeCouverture => "ameli_deuxiemeCouverture",
            CommunicationKey::QuatriemeCouverture => "ameli_quatriemeCouverture",
            CommunicationKey::LogoPlan => "ameli_logoPlan",
            CommunicationKey::Goodies => "ameli_goodies",
            CommunicationKey::Hotesse => "ameli_hotesse",
        }
    }
}

/// Signage on the stand and visibility in the show's media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Communication {
    #[serde(rename = "visu_packComplet")]
    pub visu_pack_complet: u32,
    #[serde(rename = "visu_comptoir")]
    pub visu_comptoir: u32,
    #[serde(rename = "visu_hautCloisons")]
    pub visu_haut_cloisons: u32,
    #[serde(rename = "visu_cloisonComplete")]
    pub visu_cloison_complete: u32,
    #[serde(rename = "visu_enseigneHaute")]
    pub visu_enseigne_haute: u32,
    #[serde(rename = "ameli_invitations")]
    pub ameli_invitations: u32,
    #[serde(rename = "ameli_demiPage")]
    pub ameli_demi_page: u32,
    #[serde(rename = "ameli_unePage")]
    pub ameli_une_page: u32,
    #[serde(rename = "ameli_deuxiemeCouverture")]
    pub ameli_deuxieme_couverture: u32,
    #[serde(rename = "ameli_quatriemeCouverture")]
    pub ameli_quatrieme_couverture: u32,
    #[serde(rename = "ameli_logoPlan")]
    pub ameli_logo_plan: u32,
    #[serde(rename = "ameli_goodies")]
    pub ameli_goodies: u32,
    /// What goes into the visitor bag. Descriptive only, never priced.
    #[serde(rename = "ameli_goodiesDescription")]
    pub ameli_goodies_description: String,
    #[serde(rename = "ameli_hotesse")]
    pub ameli_hotesse: u32,
}

impl Communication {
    /// Every priced quantity paired with its catalogue key, in quote order.
    pub fn quantities(&self) -> [(CommunicationKey, u32); 13] {
        [
            (CommunicationKey::PackComplet, self.visu_pack_complet),
            (CommunicationKey::VisuComptoir, self.visu_comptoir),
            (CommunicationKey::HautCloisons, self.visu_haut_cloisons),
            (CommunicationKey::CloisonComplete, self.visu_cloison_complete),
            (CommunicationKey::EnseigneHaute, self.visu_enseigne_haute),
            (CommunicationKey::Invitations, self.ameli_invitations),
            (CommunicationKey::DemiPage, self.ameli_demi_page),
            (CommunicationKey::UnePage, self.ameli_une_page),
            (CommunicationKey::DeuxiemeCouverture, self.ameli_deuxieme_couverture),
            (CommunicationKey::QuatriemeCouverture, self.ameli_quatrieme_couverture),
            (CommunicationKey::LogoPlan, self.ameli_logo_plan),
            (CommunicationKey::Goodies, self.ameli_goodies),
            (CommunicationKey::Hotesse, self.ameli_hotesse),
        ]
    }
}

// =============================================================================
// Step 7: Signature
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractSignature {
    pub nom_signataire: String,
    /// ISO date (`2026-03-14`) or RFC 3339 timestamp.
    pub date_signature: String,
    pub accept_reglement: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
