//! Embedded vocabulary tables.
//!
//! Every table ships inside the binary via `include_str!()`, so validation
//! works offline and without path resolution. A directory named by
//! [`crate::VOCAB_ENV_VAR`] can replace individual tables.

/// ISO 3166 territory codes with a federal marker.
pub const TERRITORIES: &str = include_str!("../data/territories.csv");

/// Recognized governing-agency identifier triples per territory.
pub const GOVERNING_AGENCIES: &str = include_str!("../data/governing_agencies.csv");

/// UCUM unit strings accepted in quantity fields.
pub const UCUM_UNITS: &str = include_str!("../data/ucum_units.csv");

/// Disciplinary action codes with the license statuses they may target.
pub const DISCIPLINARY_ACTIONS: &str = include_str!("../data/disciplinary_actions.csv");

/// Media types accepted for observation media and attachments.
pub const MEDIA_TYPES: &str = include_str!("../data/media_types.csv");

/// File name and content of every table, in load order.
pub fn tables() -> [(&'static str, &'static str); 5] {
    [
        ("territories.csv", TERRITORIES),
        ("governing_agencies.csv", GOVERNING_AGENCIES),
        ("ucum_units.csv", UCUM_UNITS),
        ("disciplinary_actions.csv", DISCIPLINARY_ACTIONS),
        ("media_types.csv", MEDIA_TYPES),
    ]
}
