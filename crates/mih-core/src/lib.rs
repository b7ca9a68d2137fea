//! # mih-core: Pure Business Logic for the MIH Exhibitor Contract
//!
//! This crate prices an exhibitor's contract for the MIH 2026 trade show.
//! A [`FormData`] snapshot and a [`PriceTable`] go in; priced sections and
//! the HT / TVA / TTC / acompte / solde totals come out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MIH Contract Flow                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (form wizard)                      │   │
//! │  │   Company ──► Contact ──► Stand ──► Options ──► Signature       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FormData (JSON)                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mih-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   quote   │  │ validation│  │   │
//! │  │   │ FormData  │  │PriceTable │  │ compute_  │  │  submit   │  │   │
//! │  │   │ StandType │  │ catalogue │  │  quote()  │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                       ▼                         │   │
//! │  │                     document: PdfGenerationData                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO ENV • NO CLOCK • PURE FUNCTIONS                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │       mih-quote CLI  /  external PDF assembler                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Form snapshot (FormData and its sub-records)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Price table and the MIH 2026 tariffs
//! - [`quote`] - The totals calculator and its output types
//! - [`document`] - Payload handed to the PDF assembler
//! - [`contract`] - Named fields of the signed contract form
//! - [`validation`] - Submission rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mih_core::{compute_quote, FormData, Money, PriceTable, StandType};
//!
//! let mut form = FormData::default();
//! form.space_reservation.selected_stand_type = Some(StandType::StandNu);
//! form.space_reservation.stand_nu_surface = 12;
//!
//! let quote = compute_quote(&form, &PriceTable::mih_2026()).unwrap();
//!
//! // 12 m² × 225 € = 2 700 € HT, 20 % TVA, 50 % deposit
//! assert_eq!(quote.financial.total_ht, Money::from_euros(2_700));
//! assert_eq!(quote.financial.total_ttc, Money::from_euros(3_240));
//! assert_eq!(quote.financial.acompte, Money::from_euros(1_620));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod contract;
pub mod document;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use contract::{contract_fields, ContractField, ContractFields};
pub use document::PdfGenerationData;
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::{Money, Rate};
pub use pricing::PriceTable;
pub use quote::{compute_quote, PdfFinancialData, PdfPrestation, PdfSection, Quote};
pub use types::*;
pub use validation::{validate_submission, validate_total};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// French standard VAT rate (20 %).
pub const TVA_RATE: Rate = Rate::from_bps(2000);

/// Share of the TTC total due as a deposit at signature (50 %).
pub const DEPOSIT_RATE: Rate = Rate::from_bps(5000);

/// Highest amount a submitted total may carry: 9 999 999 999,99 €.
pub const MAX_TOTAL_VALUE: Money = Money::from_cents(999_999_999_999);

/// Corner angles bookable with "prêt à exposer" packs.
pub const MAX_PACK_ANGLES: u32 = 4;

/// The equipped and bare stand angle fields are on/off flags.
pub const MAX_STAND_ANGLES: u32 = 1;

/// Largest exterior exhibition space, in m².
pub const MAX_EXTERIOR_SURFACE: u32 = 80;

/// Co-exhibitors sharing one stand.
pub const MAX_CO_EXPOSANTS: usize = 10;

/// Shortest accepted telephone number, counted in characters after trimming.
pub const MIN_PHONE_LENGTH: usize = 8;
