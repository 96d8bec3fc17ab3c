//! Activity recap block of package e-mails.
//!
//! The re-lined block is copied verbatim into rendered summaries, so its line
//! structure is part of the output format.

use super::patterns::{RECAP_BLOCK, RECAP_BULLET, RECAP_DATE_HEADER, RECAP_PRICE_LINE};

/// Bullet prefixed to plain recap lines.
pub const BULLET: &str = "• ";

/// Find the recap block between its anchors and re-line it.
pub fn extract_recap(text: &str) -> Option<String> {
    RECAP_BLOCK
        .first_text(text)
        .and_then(|block| reline_recap(&block))
}

/// Re-line a raw recap block.
///
/// Blank lines are dropped. Date headers, already bulleted lines and price or
/// total lines are kept as they are; every other line gets a bullet.
pub fn reline_recap(block: &str) -> Option<String> {
    let lines: Vec<String> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if RECAP_DATE_HEADER.is_match(line)
                || RECAP_BULLET.is_match(line)
                || RECAP_PRICE_LINE.is_match(line)
            {
                line.to_string()
            } else {
                format!("{}{}", BULLET, line)
            }
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reline_recap() {
        let block = "
            15/03/2025
            Nuit en chambre double
            Petit-déjeuner

            16/03/2025
            - Accès spa
            Dîner 3 plats 45,00 EUR
            Total prestations : 90,00 €
        ";

        let expected = "15/03/2025\n\
                        • Nuit en chambre double\n\
                        • Petit-déjeuner\n\
                        16/03/2025\n\
                        - Accès spa\n\
                        Dîner 3 plats 45,00 EUR\n\
                        Total prestations : 90,00 €";

        assert_eq!(reline_recap(block).as_deref(), Some(expected));
    }

    #[test]
    fn test_blank_block_is_none() {
        assert_eq!(reline_recap("\n   \n"), None);
    }

    #[test]
    fn test_extract_between_anchors() {
        let text = "Bonjour\n\
                    Récapitulatif du séjour :\n\
                    15/03/2025\n\
                    Massage duo\n\
                    Prix établissement payé par le client : 150,00 EUR";

        assert_eq!(
            extract_recap(text).as_deref(),
            Some("15/03/2025\n• Massage duo")
        );
    }

    #[test]
    fn test_missing_end_anchor() {
        let text = "Récapitulatif du séjour :\n15/03/2025\nMassage duo";
        assert_eq!(extract_recap(text), None);
    }
}
