//! Reservation field extraction from booking e-mails.

mod extractor;
pub mod parsers;
pub mod rules;

pub use extractor::{ExtractionResult, ReservationExtractor};
pub use parsers::{parser_for, EmailParser};
