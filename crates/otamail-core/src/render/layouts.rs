//! Generic layouts, independent of the platform workflow.

use rust_decimal::Decimal;

use crate::extraction::rules::{format_eur, format_eur_fr};
use crate::models::reservation::Reservation;

use super::scripts::{NOT_COMPUTABLE, NOT_FOUND};
use super::RenderContext;

const RULE_WIDTH: usize = 40;
const SECTION_WIDTH: usize = 20;

fn price_fr(value: Option<Decimal>) -> String {
    value.map(format_eur_fr).unwrap_or_else(|| NOT_FOUND.to_string())
}

fn commission_fr(value: Option<Decimal>) -> String {
    value
        .map(format_eur_fr)
        .unwrap_or_else(|| NOT_COMPUTABLE.to_string())
}

fn plain(value: Option<Decimal>) -> String {
    format!("{:.2}", value.unwrap_or(Decimal::ZERO).round_dp(2))
}

/// Classic PMS layout.
pub(crate) fn standard(record: &Reservation, ctx: &RenderContext) -> String {
    let mut lines = vec![
        record.platform_name().to_string(),
        format!("Tarif : {}", price_fr(record.tarif)),
        format!("VAD : {}", price_fr(record.vad)),
        format!("Commission : {}", commission_fr(record.commission)),
        format!("{} + {}", ctx.operator, ctx.stamp()),
        "--".to_string(),
    ];

    if let Some(guest) = &record.guest_name {
        lines.push(format!("Client : {}", guest));
    }
    if let Some(reference) = &record.reservation_id {
        lines.push(format!("Réf : {}", reference));
    }
    match (&record.arrival, &record.departure) {
        (Some(arrival), Some(departure)) => lines.push(format!("Du {} au {}", arrival, departure)),
        (Some(arrival), None) => lines.push(format!("Arrivée : {}", arrival)),
        (None, Some(departure)) => lines.push(format!("Départ : {}", departure)),
        (None, None) => {}
    }
    if let Some(stay) = &record.stay_details {
        lines.push(stay.clone());
    }
    lines.push("--".to_string());

    if let Some(line) = &record.raw_tarif_line {
        lines.push(line.clone());
    } else if let Some(tarif) = record.tarif {
        lines.push(format!("Prix client : {}", format_eur(tarif)));
    }
    if let Some(line) = &record.raw_vad_line {
        lines.push(line.clone());
    } else if let Some(vad) = record.vad {
        lines.push(format!("Versement établissement : {}", format_eur(vad)));
    }

    if let Some(card) = &record.card {
        lines.push(String::new());
        lines.push("Carte Bancaire Virtuelle :".to_string());
        lines.push(card.clone());
    }

    lines.join("\n")
}

/// Condensed layout on three or four lines.
pub(crate) fn compact(record: &Reservation, ctx: &RenderContext) -> String {
    let short = |value: Option<Decimal>| value.map(format_eur_fr).unwrap_or_else(|| "?".to_string());

    let mut lines = vec![format!(
        "{} | {} | VAD: {} | Com: {}",
        record.platform_name(),
        short(record.tarif),
        short(record.vad),
        short(record.commission)
    )];

    match (&record.guest_name, &record.reservation_id) {
        (Some(guest), Some(reference)) => lines.push(format!("{} - Réf: {}", guest, reference)),
        (Some(guest), None) => lines.push(guest.clone()),
        (None, Some(reference)) => lines.push(format!("Réf: {}", reference)),
        (None, None) => {}
    }

    let dates = match (&record.arrival, &record.departure) {
        (Some(arrival), Some(departure)) => Some(format!("{} → {}", arrival, departure)),
        (Some(arrival), None) => Some(format!("Arr: {}", arrival)),
        _ => None,
    };
    match (dates, &record.stay_details) {
        (Some(dates), Some(stay)) => lines.push(format!("{} | {}", dates, stay)),
        (Some(dates), None) => lines.push(dates),
        (None, Some(stay)) => lines.push(stay.clone()),
        (None, None) => {}
    }

    lines.push(format!("[{} - {}]", ctx.operator, ctx.stamp()));
    lines.join("\n")
}

/// Full layout with one section per topic.
pub(crate) fn detailed(record: &Reservation, ctx: &RenderContext) -> String {
    let rule = "═".repeat(RULE_WIDTH);
    let section = "-".repeat(SECTION_WIDTH);
    let or = |value: &Option<String>, placeholder: &str| {
        value.clone().unwrap_or_else(|| placeholder.to_string())
    };

    let mut lines = vec![
        rule.clone(),
        format!("RÉSERVATION {}", record.platform_name().to_uppercase()),
        rule.clone(),
        String::new(),
        "📊 TARIFICATION".to_string(),
        section.clone(),
        format!("  Tarif client    : {}", price_fr(record.tarif)),
        format!("  VAD             : {}", price_fr(record.vad)),
        format!("  Commission      : {}", commission_fr(record.commission)),
        String::new(),
        "👤 CLIENT".to_string(),
        section.clone(),
        format!("  Nom             : {}", or(&record.guest_name, "Non renseigné")),
        format!("  Réf. réservation: {}", or(&record.reservation_id, "Non renseignée")),
        String::new(),
        "📅 SÉJOUR".to_string(),
        section.clone(),
        format!("  Arrivée         : {}", or(&record.arrival, "Non renseignée")),
        format!("  Départ          : {}", or(&record.departure, "Non renseignée")),
        format!("  Détails         : {}", or(&record.stay_details, "Non renseignés")),
        String::new(),
    ];

    if let Some(card) = &record.card {
        lines.push("💳 CARTE BANCAIRE".to_string());
        lines.push(section.clone());
        lines.push(format!("  {}", card));
        if let Some(holder) = &record.cardholder {
            lines.push(format!("  Titulaire : {}", holder));
        }
        lines.push(String::new());
    }

    if let Some(recap) = &record.activity_recap {
        lines.push("🗓 PRESTATIONS".to_string());
        lines.push(section.clone());
        lines.extend(recap.lines().map(|line| format!("  {}", line)));
        lines.push(String::new());
    }

    if record.raw_tarif_line.is_some() || record.raw_vad_line.is_some() {
        lines.push("📝 LIGNES ORIGINALES".to_string());
        lines.push(section);
        for line in [&record.raw_tarif_line, &record.raw_vad_line].into_iter().flatten() {
            lines.push(format!("  {}", line));
        }
        lines.push(String::new());
    }

    lines.push(rule.clone());
    lines.push(format!("Traité par: {}", ctx.operator));
    lines.push(format!("Date: {}", ctx.stamp()));
    lines.push(rule);

    lines.join("\n")
}

/// Minimal layout for quick PMS entry.
pub(crate) fn pms_simple(record: &Reservation, ctx: &RenderContext) -> String {
    let mut lines = vec![
        format!("[{}]", record.platform_name()),
        format!(
            "T:{} V:{} C:{}",
            plain(record.tarif),
            plain(record.vad),
            plain(record.commission)
        ),
    ];

    if let Some(guest) = &record.guest_name {
        lines.push(guest.clone());
    }
    if let Some(reference) = &record.reservation_id {
        lines.push(format!("#{}", reference));
    }
    if let (Some(arrival), Some(departure)) = (&record.arrival, &record.departure) {
        lines.push(format!("{}-{}", arrival, departure));
    }

    lines.push(format!("{}/{}", ctx.operator, ctx.stamp()));
    lines.join("\n")
}
