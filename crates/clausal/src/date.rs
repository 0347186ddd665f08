//! Module: date
//! Responsibility: date-to-canonical-string conversion boundary.
//! Does not own: date arithmetic, parsing, or time-zone policy.
//! Boundary: the only place the `time` crate surfaces in the public API.

use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

///
/// DateSupport
///
/// Opaque collaborator that converts a date to its canonical string form.
/// The builder never compares native date values inside a clause tree; it
/// embeds only the canonical text this boundary produces.
///

pub trait DateSupport {
    fn date_to_canonical_string(&self, date: OffsetDateTime) -> String;
}

///
/// CanonicalDateSupport
///
/// Default collaborator rendering minute-precision canonical form,
/// e.g. `2026-08-27 14:05`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalDateSupport;

const CANONICAL_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

impl DateSupport for CanonicalDateSupport {
    fn date_to_canonical_string(&self, date: OffsetDateTime) -> String {
        // The canonical format contains no fallible components.
        date.format(CANONICAL_FORMAT)
            .unwrap_or_else(|_| date.to_string())
    }
}
