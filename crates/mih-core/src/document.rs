//! # Document Payload
//!
//! Builds the [`PdfGenerationData`] handed to the external PDF assembler.
//! Nothing is rendered here: the payload is the quote plus the identity
//! and signature blocks printed around it.
//!
//! ```text
//! FormData.company ─┐
//! FormData.contact ─┴──► PdfContactData ─┐
//! compute_quote() ──► sections, financial ├──► PdfGenerationData
//! FormData.signature ──► PdfSignatureData ┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::pricing::PriceTable;
use crate::quote::{compute_quote, PdfFinancialData, PdfSection, Quote};
use crate::types::FormData;

/// Identity block at the top of the quote.
///
/// The five address fields are always printed; the rest only when filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PdfContactData {
    pub raison_sociale: String,
    pub adresse: String,
    pub code_postal: String,
    pub ville: String,
    pub pays: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub site_internet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub siret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tva: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub enseigne: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub contact_nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub contact_tel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub contact_mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub resp_nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub resp_prenom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub resp_tel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub resp_mail: Option<String>,
}

impl PdfContactData {
    pub fn from_form(form: &FormData) -> Self {
        let company = &form.company;
        let contact = &form.contact;

        PdfContactData {
            raison_sociale: company.raison_sociale.trim().to_string(),
            adresse: company.adresse.trim().to_string(),
            code_postal: company.code_postal.trim().to_string(),
            ville: company.ville.trim().to_string(),
            pays: company.pays.trim().to_string(),
            telephone: non_empty(&company.telephone),
            site_internet: non_empty(&company.site_internet),
            siret: non_empty(&company.siret),
            tva: non_empty(&company.tva),
            enseigne: non_empty(&company.enseigne),
            contact_nom: non_empty(&contact.contact_nom),
            contact_tel: non_empty(&contact.contact_tel),
            contact_mail: non_empty(&contact.contact_mail),
            resp_nom: non_empty(&contact.resp_nom),
            resp_prenom: non_empty(&contact.resp_prenom),
            resp_tel: non_empty(&contact.resp_tel),
            resp_mail: non_empty(&contact.resp_mail),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PdfSignatureData {
    pub nom_signataire: String,
    pub date_signature: String,
}

/// Everything the PDF assembler needs for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PdfGenerationData {
    pub contact: PdfContactData,
    pub sections: Vec<PdfSection>,
    pub financial: PdfFinancialData,
    pub signature: PdfSignatureData,
}

impl PdfGenerationData {
    /// Wraps an already computed quote with the form's identity blocks.
    pub fn assemble(form: &FormData, quote: Quote) -> Self {
        PdfGenerationData {
            contact: PdfContactData::from_form(form),
            sections: quote.sections,
            financial: quote.financial,
            signature: PdfSignatureData {
                nom_signataire: form.signature.nom_signataire.trim().to_string(),
                date_signature: form.signature.date_signature.trim().to_string(),
            },
        }
    }

    /// Computes the quote and assembles the payload in one step.
    pub fn build(form: &FormData, prices: &PriceTable) -> CoreResult<Self> {
        let quote = compute_quote(form, prices)?;
        Ok(Self::assemble(form, quote))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
