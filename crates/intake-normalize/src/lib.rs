//! Value normalization for the permit intake pipeline.
//!
//! Converts free-form user input into canonical per-type strings (ISO
//! dates, integer strings, `"true"`/`"false"`, trimmed text) and back into
//! spreadsheet-ready values at write time. The format classifier lives here
//! and is shared with the mapping engine's auto-pass type inference.

mod classify;
mod normalize;
mod numeric;
mod wareki;

pub use classify::classify_format;
pub use normalize::{
    CHECK_GLYPH, denormalize_value, normalize_answers, normalize_value, scalar_to_string,
};
pub use numeric::{canonical_integer, is_integer_literal, to_int_like};
pub use wareki::{
    ISO_DATE_RE, REIWA_OFFSET, canonicalize_iso, is_date_like, iso_to_wareki, wareki_to_iso,
};
