//! # Price Table
//!
//! Every unit price the quote can use, as plain data.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           PriceTable                                    │
//! │                                                                         │
//! │  Tiered                         Flat / per unit                         │
//! │  ─────────────────────────      ─────────────────────────────           │
//! │  stand_equipe_rates  m² → €/m²  angle_price            €               │
//! │  stand_nu_rates      m² → €/m²  exterior_space_price   €/m²            │
//! │  ready_to_expose   size → €     garden_cottage_price   €/cottage       │
//! │  electricity        key → €     co_exposant_price      €/co-exhibitor  │
//! │                                 scan_badges_price      € (flat)        │
//! │  Catalogues                     pass_soiree_price      €/pass          │
//! │  ─────────────────────────                                              │
//! │  amenagement   EquipmentKey     → label, unit, €                       │
//! │  visibilite    CommunicationKey → label, unit, €                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is passed into [`crate::quote::compute_quote`] rather than read
//! from a global, so tests and the CLI can substitute their own fixture.
//! A lookup that misses is an error, never a silent zero.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CommunicationKey, EquipmentKey};

/// Smallest surface sold for equipped and bare stands, in m².
pub const MIN_STAND_SURFACE: u32 = 6;

/// Largest surface sold for equipped and bare stands, in m².
pub const MAX_STAND_SURFACE: u32 = 30;

// =============================================================================
// Entries
// =============================================================================

/// A catalogue entry: what the quote prints and what it costs per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub label: String,
    pub unit: String,
    pub price: Money,
}

impl CatalogItem {
    fn new(label: &str, unit: &str, price: Money) -> Self {
        CatalogItem {
            label: label.to_string(),
            unit: unit.to_string(),
            price,
        }
    }
}

/// An electrical box upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectricityTier {
    pub label: String,
    pub price: Money,
}

// =============================================================================
// Price Table
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Equipped stand: surface (m²) → price per m².
    pub stand_equipe_rates: BTreeMap<u32, Money>,
    /// Bare stand: surface (m²) → price per m².
    pub stand_nu_rates: BTreeMap<u32, Money>,
    /// Open corner surcharge.
    pub angle_price: Money,
    /// "Prêt à exposer": pack size (m²) → pack price.
    pub ready_to_expose: BTreeMap<u32, Money>,
    /// `puissance` key → electrical box.
    pub electricity: BTreeMap<String, ElectricityTier>,
    pub exterior_space_price: Money,
    pub garden_cottage_price: Money,
    pub co_exposant_price: Money,
    pub amenagement: BTreeMap<EquipmentKey, CatalogItem>,
    pub visibilite: BTreeMap<CommunicationKey, CatalogItem>,
    pub scan_badges_price: Money,
    pub pass_soiree_price: Money,
    /// Stand size (m²) → evening passes included with the stand.
    #[serde(default)]
    pub evening_pass_inclusions: BTreeMap<u32, u32>,
}

impl PriceTable {
    /// The published MIH 2026 tariffs (prices excluding VAT).
    pub fn mih_2026() -> Self {
        let surfaces = MIN_STAND_SURFACE..=MAX_STAND_SURFACE;
        let stand_equipe_rates = surfaces
            .clone()
            .map(|m2| (m2, Money::from_euros(270)))
            .collect();
        let stand_nu_rates = surfaces.map(|m2| (m2, Money::from_euros(225))).collect();

        let ready_to_expose = BTreeMap::from([
            (12, Money::from_euros(3_552)),
            (15, Money::from_euros(4_440)),
            (18, Money::from_euros(5_328)),
        ]);

        let electricity = [
            ("0", "1 kW de base (inclus)", 0),
            ("220", "Coffret électrique 2 kW", 220),
            ("260", "Coffret électrique 4 kW", 260),
            ("350", "Coffret électrique 6 kW", 350),
        ]
        .into_iter()
        .map(|(key, label, euros)| {
            (
                key.to_string(),
                ElectricityTier {
                    label: label.to_string(),
                    price: Money::from_euros(euros),
                },
            )
        })
        .collect();

        use EquipmentKey as E;
        let amenagement = BTreeMap::from([
            (E::ReserveMelamine, CatalogItem::new("Réserve 1 m² avec porte (cloisons mélaminées)", "réserve", Money::from_euros(200))),
            (E::MoquetteDiff, CatalogItem::new("Moquette coloris différent", "m²", Money::from_cents(650))),
            (E::Velum, CatalogItem::new("Velum (tissu tendu)", "m²", Money::from_euros(15))),
            (E::CloisonBoisTissu, CatalogItem::new("Cloison bois gainée tissu", "ml", Money::from_euros(50))),
            (E::ReserveBois, CatalogItem::new("Réserve 1 m² avec porte (cloisons bois)", "réserve", Money::from_euros(260))),
            (E::RailSpots, CatalogItem::new("Rail de 3 spots supplémentaires", "rail", Money::from_euros(45))),
            (E::Comptoir, CatalogItem::new("1 comptoir", "pièce", Money::from_euros(165))),
            (E::Tabouret, CatalogItem::new("1 tabouret", "pièce", Money::from_euros(40))),
            (E::MangeDebout, CatalogItem::new("1 mange-debout", "pièce", Money::from_euros(90))),
            (E::Chaise, CatalogItem::new("1 chaise", "pièce", Money::from_euros(40))),
            (E::Table120, CatalogItem::new("1 table 120 × 60 cm", "pièce", Money::from_euros(80))),
            (E::PackMangeDebout, CatalogItem::new("1 mange-debout + 3 tabourets", "pack", Money::from_euros(195))),
            (E::Ecran52, CatalogItem::new("1 écran 52″ sur pied (HDMI/VGA)", "pièce", Money::from_euros(395))),
            (E::Frigo140, CatalogItem::new("1 réfrigérateur 140 L (85×60×60)", "pièce", Money::from_euros(125))),
            (E::Frigo260, CatalogItem::new("1 réfrigérateur 260 L (140×60×60)", "pièce", Money::from_euros(210))),
            (E::Presentoir, CatalogItem::new("1 présentoir pour documents A4", "pièce", Money::from_euros(115))),
            (E::Bandeau, CatalogItem::new("Bandeau signalétique pourtour stand", "ml", Money::from_euros(35))),
            (E::BlocPrises, CatalogItem::new("Bloc de 3 prises", "bloc", Money::from_euros(18))),
            (E::Fauteuil, CatalogItem::new("1 fauteuil", "pièce", Money::from_euros(59))),
            (E::TableBasse, CatalogItem::new("1 table basse ronde (ø 60 cm)", "pièce", Money::from_euros(55))),
            (E::GueridonHaut, CatalogItem::new("1 guéridon haut 120 cm", "pièce", Money::from_euros(55))),
            (E::PoufCube, CatalogItem::new("1 pouf cube 40×40×40 cm", "pièce", Money::from_euros(33))),
            (E::ColonneVitrine, CatalogItem::new("1 colonne vitrine", "pièce", Money::from_euros(252))),
            (E::ComptoirVitrine, CatalogItem::new("1 comptoir vitrine", "pièce", Money::from_euros(271))),
            (E::PorteManteaux, CatalogItem::new("1 porte-manteaux sur pied", "pièce", Money::from_euros(51))),
            (E::PlanteBambou, CatalogItem::new("1 plante bambou avec pot blanc", "pièce", Money::from_euros(50))),
            (E::PlanteKentia, CatalogItem::new("1 plante kentia avec pot blanc", "pièce", Money::from_euros(50))),
        ]);

        use CommunicationKey as C;
        let visibilite = BTreeMap::from([
            (C::PackComplet, CatalogItem::new("Pack signalétique complet", "pack", Money::from_euros(1_020))),
            (C::VisuComptoir, CatalogItem::new("Signalétique comptoir", "pièce", Money::from_euros(180))),
            (C::HautCloisons, CatalogItem::new("Signalétique haut de cloisons", "pièce", Money::from_euros(435))),
            (C::CloisonComplete, CatalogItem::new("Signalétique cloison complète", "pièce", Money::from_euros(185))),
            (C::EnseigneHaute, CatalogItem::new("Signalétique enseigne haute", "pièce", Money::from_euros(180))),
            (C::Invitations, CatalogItem::new("500 invitations papier à personnaliser", "lot", Money::from_euros(100))),
            (C::DemiPage, CatalogItem::new("1/2 page quadri dans le catalogue des exposants", "page", Money::from_euros(700))),
            (C::UnePage, CatalogItem::new("1 page quadri dans le catalogue des exposants", "page", Money::from_euros(1_200))),
            (C::DeuxiemeCouverture, CatalogItem::new("Deuxième de couverture dans le catalogue", "page", Money::from_euros(1_800))),
            (C::QuatriemeCouverture, CatalogItem::new("Quatrième de couverture dans le catalogue", "page", Money::from_euros(2_300))),
            (C::LogoPlan, CatalogItem::new("Logo sur le plan du salon", "logo", Money::from_euros(550))),
            (C::Goodies, CatalogItem::new("Documentation/Goodies dans sac visiteur", "prestation", Money::from_euros(900))),
            (C::Hotesse, CatalogItem::new("Distribution communication par 1 hôtesse (2 jours)", "prestation", Money::from_euros(1_500))),
        ]);

        PriceTable {
            stand_equipe_rates,
            stand_nu_rates,
            angle_price: Money::from_euros(185),
            ready_to_expose,
            electricity,
            exterior_space_price: Money::from_euros(50),
            garden_cottage_price: Money::from_euros(800),
            co_exposant_price: Money::from_euros(400),
            amenagement,
            visibilite,
            scan_badges_price: Money::from_euros(150),
            pass_soiree_price: Money::from_euros(50),
            evening_pass_inclusions: BTreeMap::from([(6, 2), (9, 3), (12, 4), (15, 5), (18, 6)]),
        }
    }

    /// Parses a price table from JSON (amounts as euro numbers) and checks it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let table: PriceTable = serde_json::from_str(json)?;
        table.check()?;
        Ok(table)
    }

    /// Verifies that every catalogue key has a price and that no amount in
    /// the table is negative.
    ///
    /// Tiered entries (surfaces, packs, electricity) are only checked for
    /// presence when a form asks for them, since their domain is open-ended.
    pub fn check(&self) -> CoreResult<()> {
        for key in EquipmentKey::ALL {
            self.equipment(key)?;
        }
        for key in CommunicationKey::ALL {
            self.communication(key)?;
        }

        let flat = [
            ("angle_price", self.angle_price),
            ("exterior_space_price", self.exterior_space_price),
            ("garden_cottage_price", self.garden_cottage_price),
            ("co_exposant_price", self.co_exposant_price),
            ("scan_badges_price", self.scan_badges_price),
            ("pass_soiree_price", self.pass_soiree_price),
        ];
        for (table, price) in flat {
            non_negative(table, "", price)?;
        }

        for (surface, rate) in &self.stand_equipe_rates {
            non_negative("stand_equipe_rates", surface, *rate)?;
        }
        for (surface, rate) in &self.stand_nu_rates {
            non_negative("stand_nu_rates", surface, *rate)?;
        }
        for (size, price) in &self.ready_to_expose {
            non_negative("ready_to_expose", size, *price)?;
        }
        for (key, tier) in &self.electricity {
            non_negative("electricity", key, tier.price)?;
        }
        for (key, item) in &self.amenagement {
            non_negative("amenagement", key.as_str(), item.price)?;
        }
        for (key, item) in &self.visibilite {
            non_negative("visibilite", key.as_str(), item.price)?;
        }
        Ok(())
    }

    /// Per-m² rate of an equipped stand of `surface` m².
    pub fn stand_equipe_rate(&self, surface: u32) -> CoreResult<Money> {
        lookup(&self.stand_equipe_rates, &surface, "stand_equipe_rates").copied()
    }

    /// Per-m² rate of a bare stand of `surface` m².
    pub fn stand_nu_rate(&self, surface: u32) -> CoreResult<Money> {
        lookup(&self.stand_nu_rates, &surface, "stand_nu_rates").copied()
    }

    /// Price of one "prêt à exposer" pack of `size` m².
    pub fn pack_price(&self, size: u32) -> CoreResult<Money> {
        lookup(&self.ready_to_expose, &size, "ready_to_expose").copied()
    }

    /// Electrical box for a `puissance` key.
    pub fn electricity_tier(&self, key: &str) -> CoreResult<&ElectricityTier> {
        self.electricity.get(key).ok_or_else(|| missing("electricity", key))
    }

    pub fn equipment(&self, key: EquipmentKey) -> CoreResult<&CatalogItem> {
        self.amenagement
            .get(&key)
            .ok_or_else(|| missing("amenagement", key.as_str()))
    }

    pub fn communication(&self, key: CommunicationKey) -> CoreResult<&CatalogItem> {
        self.visibilite
            .get(&key)
            .ok_or_else(|| missing("visibilite", key.as_str()))
    }

    /// Evening passes included with a stand of `stand_size` m².
    ///
    /// Sizes listed in the table match exactly. The largest tier is open
    /// ended, so anything at or above it gets its passes. Every other size
    /// (between tiers, below them, or no stand at all) includes none.
    ///
    /// ## Example
    /// ```rust
    /// use mih_core::pricing::PriceTable;
    ///
    /// let prices = PriceTable::mih_2026();
    /// assert_eq!(prices.included_evening_passes(0), 0);
    /// assert_eq!(prices.included_evening_passes(12), 4);
    /// assert_eq!(prices.included_evening_passes(13), 0);
    /// assert_eq!(prices.included_evening_passes(24), 6);
    /// ```
    pub fn included_evening_passes(&self, stand_size: u32) -> u32 {
        if let Some(passes) = self.evening_pass_inclusions.get(&stand_size) {
            return *passes;
        }
        match self.evening_pass_inclusions.last_key_value() {
            Some((top, passes)) if stand_size >= *top => *passes,
            _ => 0,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable::mih_2026()
    }
}

fn lookup<'a, K: Ord + Display, V>(
    map: &'a BTreeMap<K, V>,
    key: &K,
    table: &'static str,
) -> CoreResult<&'a V> {
    map.get(key).ok_or_else(|| missing(table, key))
}

fn non_negative(table: &'static str, key: impl Display, price: Money) -> CoreResult<()> {
    if !price.is_negative() {
        return Ok(());
    }
    tracing::warn!(table, key = %key, %price, "Price table holds a negative amount");
    Err(CoreError::NegativePrice {
        table,
        key: key.to_string(),
        price,
    })
}

fn missing(table: &'static str, key: impl Display) -> CoreError {
    tracing::warn!(table, key = %key, "Price table lookup missed");
    CoreError::MissingPrice {
        table,
        key: key.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
