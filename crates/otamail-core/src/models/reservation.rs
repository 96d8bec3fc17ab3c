//! Reservation record extracted from one booking e-mail.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Structured data extracted from a single confirmation e-mail.
///
/// Every field is optional: a missing field is an expected outcome and the
/// renderers print a placeholder for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Platform whose parser produced this record.
    pub platform: Platform,

    /// Amount charged to the guest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarif: Option<Decimal>,

    /// Amount remitted to the property (VAD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vad: Option<Decimal>,

    /// Platform's cut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<Decimal>,

    /// Accommodation or room type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,

    /// Free-form stay description (nights, room, rate).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stay_details: Option<String>,

    /// Number of nights when stated or computable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,

    /// Arrival date as written in the e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,

    /// Departure date as written in the e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,

    /// Reservation reference at the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,

    /// Payment card details as found in the e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,

    /// The stay is settled with a single-use card issued by the platform.
    #[serde(default)]
    pub is_virtual_card: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder: Option<String>,

    /// Date-grouped bullet list of the package content, reproduced verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_recap: Option<String>,

    /// Tariff line exactly as it appears in the e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_tarif_line: Option<String>,

    /// VAD line exactly as it appears in the e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_vad_line: Option<String>,
}

impl Reservation {
    /// Empty record for a platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            tarif: None,
            vad: None,
            commission: None,
            room_type: None,
            stay_details: None,
            nights: None,
            arrival: None,
            departure: None,
            guest_name: None,
            reservation_id: None,
            card: None,
            is_virtual_card: false,
            cardholder: None,
            activity_recap: None,
            raw_tarif_line: None,
            raw_vad_line: None,
        }
    }

    /// Display name of the platform.
    pub fn platform_name(&self) -> &'static str {
        self.platform.name()
    }

    /// Names of the core fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tarif.is_none() {
            missing.push("tarif");
        }
        if self.vad.is_none() {
            missing.push("vad");
        }
        if self.commission.is_none() {
            missing.push("commission");
        }
        if self.arrival.is_none() {
            missing.push("arrival");
        }
        if self.departure.is_none() {
            missing.push("departure");
        }
        if self.guest_name.is_none() {
            missing.push("guest_name");
        }
        if self.reservation_id.is_none() {
            missing.push("reservation_id");
        }
        missing
    }
}

/// `tarif - vad` rounded to cents, when both are known.
pub fn commission_from(tarif: Option<Decimal>, vad: Option<Decimal>) -> Option<Decimal> {
    match (tarif, vad) {
        (Some(tarif), Some(vad)) => Some((tarif - vad).round_dp(2)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_new_record_is_empty() {
        let record = Reservation::new(Platform::Airbnb);
        assert_eq!(record.platform_name(), "Airbnb");
        assert!(!record.is_virtual_card);
        assert_eq!(record.missing_fields().len(), 7);
    }

    #[test]
    fn test_commission_from() {
        let tarif = Decimal::from_str("150.00").ok();
        let vad = Decimal::from_str("120.455").ok();
        assert_eq!(commission_from(tarif, vad), Decimal::from_str("29.54").ok());
        assert_eq!(commission_from(tarif, None), None);
    }

    #[test]
    fn test_json_skips_absent_fields() {
        let mut record = Reservation::new(Platform::Weekendesk);
        record.tarif = Some(Decimal::new(15000, 2));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["platform"], "weekendesk");
        assert!(json.get("vad").is_none());
        assert_eq!(json["is_virtual_card"], false);
    }
}
