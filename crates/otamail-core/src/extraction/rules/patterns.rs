//! Patterns shared by several platform parsers.

use lazy_static::lazy_static;
use regex::Regex;

use super::FieldRules;

lazy_static! {
    // Recap line starting with a dd/mm/yyyy date
    pub static ref RECAP_DATE_HEADER: Regex = Regex::new(
        r"^\d{1,2}/\d{1,2}/\d{4}"
    ).unwrap();

    pub static ref RECAP_BULLET: Regex = Regex::new(
        r"^[•\-*·]"
    ).unwrap();

    // Price or total line inside a recap: keyword first, or amount + currency last
    pub static ref RECAP_PRICE_LINE: Regex = Regex::new(
        r"(?i)^(?:sous-total|total|prix|montant)\b|\d\s*(?:€|EUR)$"
    ).unwrap();

    // Block between the two recap anchors
    pub static ref RECAP_BLOCK: FieldRules = FieldRules::new(&[
        r"R[eé]capitulatif\s+(?:du\s+s[eé]jour|des\s+prestations)\s*:?(.+?)(?:Prix\s+[eé]tablissement\s+pay[eé]|Conditions\s+d['’]annulation)",
    ]);

    pub static ref VIRTUAL_CARD_HINT: Regex = Regex::new(
        r"(?i)carte\s+(?:bancaire\s+|de\s+cr[eé]dit\s+)?virtuelle|virtual\s*(?:credit\s*)?card|\bVCC\b"
    ).unwrap();

    pub static ref CARDHOLDER: FieldRules = FieldRules::new(&[
        r"Nom\s+du\s+(?:d[eé]tenteur|titulaire)\s*[:\-]?\s*([^\n]+)",
        r"Titulaire(?:\s+de\s+la\s+carte)?\s*[:\-]?\s*([^\n]+)",
        r"Card\s*holder(?:\s+name)?\s*[:\-]?\s*([^\n]+)",
    ]);

    pub static ref NIGHTS: FieldRules = FieldRules::new(&[
        r"(\d+)\s*(?:nuit|night)s?",
    ]);
}

/// Number of nights in free text such as "2 nuits en chambre double".
pub fn nights_in(text: &str) -> Option<u32> {
    NIGHTS.first_match(text, |raw| raw.parse().ok()).map(|m| m.value)
}
