//! Platform scripts: the block pasted into the PMS for each workflow.
//!
//! Every script has the same header (platform, amounts, operator stamp) and
//! ends with the collection instruction of the platform. Missing values are
//! printed as placeholders so that no line ever disappears.

use rust_decimal::Decimal;

use crate::extraction::rules::format_eur;
use crate::models::reservation::Reservation;
use crate::platform::Platform;

use super::RenderContext;

pub(crate) const NOT_FOUND: &str = "Non trouvé";
pub(crate) const NOT_FOUND_F: &str = "Non trouvée";
pub(crate) const NOT_COMPUTABLE: &str = "Non calculable";

const SEPARATOR: &str = "--";

const COLLECT_ALL: &str = "Encaisser la totalité du séjour + TDS + extras";
const COLLECT_EXTRAS_ONLY: &str = "Séjour réglé par Airbnb : encaisser uniquement TDS + extras";

/// Render the script matching the record's platform.
pub(crate) fn render_script(record: &Reservation, ctx: &RenderContext) -> String {
    let lines = match record.platform {
        Platform::Weekendesk => weekendesk(record, ctx),
        Platform::Expedia | Platform::Booking => virtual_card_aware(record, ctx),
        Platform::Hrs => hrs(record, ctx),
        Platform::Originals => originals(record, ctx),
        Platform::Airbnb => airbnb(record, ctx),
        Platform::Direct => direct(record, ctx),
    };
    lines.join("\n")
}

fn price(value: Option<Decimal>) -> String {
    value.map(format_eur).unwrap_or_else(|| NOT_FOUND.to_string())
}

fn text<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().unwrap_or(placeholder)
}

fn header(
    record: &Reservation,
    ctx: &RenderContext,
    vad_label: &str,
    commission: Option<Decimal>,
) -> Vec<String> {
    vec![
        record.platform_name().to_string(),
        format!("Total : {}", price(record.tarif)),
        format!("{} : {}", vad_label, price(record.vad)),
        format!(
            "Commission : {}",
            commission
                .map(format_eur)
                .unwrap_or_else(|| NOT_COMPUTABLE.to_string())
        ),
        format!("{} + {}", ctx.operator, ctx.stamp()),
        SEPARATOR.to_string(),
    ]
}

fn guest_lines(record: &Reservation) -> [String; 2] {
    [
        format!("Client : {}", text(&record.guest_name, NOT_FOUND)),
        format!("Réf : {}", text(&record.reservation_id, NOT_FOUND_F)),
    ]
}

fn stay_line(record: &Reservation) -> String {
    let mut line = format!(
        "Du {} au {}",
        text(&record.arrival, NOT_FOUND_F),
        text(&record.departure, NOT_FOUND_F)
    );
    if let Some(stay) = &record.stay_details {
        line.push_str(" - ");
        line.push_str(stay);
    }
    line
}

fn card_line(record: &Reservation) -> String {
    format!("Carte : {}", text(&record.card, NOT_FOUND_F))
}

fn card_instruction(record: &Reservation) -> String {
    let amount = match record.vad {
        Some(vad) => format!("de {}", format_eur(vad)),
        None => "du montant VAD".to_string(),
    };
    format!(
        "Faire Payline {} sur la carte virtuelle {} puis encaisser TDS + extras au départ",
        amount,
        record.platform_name()
    )
}

fn weekendesk(record: &Reservation, ctx: &RenderContext) -> Vec<String> {
    let mut lines = header(record, ctx, "Payline", record.commission);
    lines.extend(guest_lines(record));
    match &record.activity_recap {
        Some(recap) => lines.push(recap.clone()),
        None => lines.push(stay_line(record)),
    }
    lines.push(SEPARATOR.to_string());

    lines.push(match &record.raw_tarif_line {
        Some(line) => line.clone(),
        None => format!("Prix client : {}", price(record.tarif)),
    });
    lines.push(match &record.raw_vad_line {
        Some(line) => line.clone(),
        None => format!("Versement établissement : {}", price(record.vad)),
    });
    lines.push(SEPARATOR.to_string());

    lines.push(match record.vad {
        Some(vad) => format!("Faire Payline de {} puis encaisser TDS + extras", format_eur(vad)),
        None => "Faire Payline du montant Weekendesk puis encaisser TDS + extras".to_string(),
    });
    lines
}

/// Expedia and Booking.com: the instruction depends on who pays.
fn virtual_card_aware(record: &Reservation, ctx: &RenderContext) -> Vec<String> {
    let mut lines = header(record, ctx, "VAD", record.commission);
    lines.extend(guest_lines(record));
    lines.push(stay_line(record));
    lines.push(card_line(record));
    lines.push(SEPARATOR.to_string());
    lines.push(if record.is_virtual_card {
        card_instruction(record)
    } else {
        COLLECT_ALL.to_string()
    });
    lines
}

fn hrs(record: &Reservation, ctx: &RenderContext) -> Vec<String> {
    let mut lines = header(record, ctx, "Montant carte", record.commission);
    lines.extend(guest_lines(record));
    lines.push(stay_line(record));
    lines.push(card_line(record));
    lines.push(format!("Titulaire : {}", text(&record.cardholder, NOT_FOUND)));
    lines.push(SEPARATOR.to_string());
    lines.push(card_instruction(record));
    lines
}

fn originals(record: &Reservation, ctx: &RenderContext) -> Vec<String> {
    let mut lines = header(record, ctx, "VAD", Some(Decimal::ZERO));
    lines.extend(guest_lines(record));
    lines.push(stay_line(record));
    lines.push(SEPARATOR.to_string());
    lines.push(COLLECT_ALL.to_string());
    lines
}

fn airbnb(record: &Reservation, ctx: &RenderContext) -> Vec<String> {
    let mut lines = header(record, ctx, "Versement", record.commission);
    lines.extend(guest_lines(record));
    lines.push(stay_line(record));
    lines.push(SEPARATOR.to_string());
    lines.push(COLLECT_EXTRAS_ONLY.to_string());
    lines
}

fn direct(record: &Reservation, ctx: &RenderContext) -> Vec<String> {
    let mut lines = header(record, ctx, "VAD", record.commission);
    lines.extend(guest_lines(record));
    lines.push(stay_line(record));
    lines.push(SEPARATOR.to_string());
    lines.push(COLLECT_ALL.to_string());
    lines
}
