//! Code-system OIDs referenced by validation rules.

/// LOINC, used for document and section codes.
pub const LOINC: &str = "2.16.840.1.113883.6.1";

/// NCI Thesaurus, used for forms, routes, units of presentation and characteristics.
pub const NCI_THESAURUS: &str = "2.16.840.1.113883.3.26.1.1";

/// FDA Unique Ingredient Identifier.
pub const UNII: &str = "2.16.840.1.113883.4.9";

/// National Drug Code.
pub const NDC: &str = "2.16.840.1.113883.6.69";

/// ISO 3166-1 alpha-3 country codes.
pub const ISO_3166_1: &str = "1.0.3166.1.2.3";

/// ISO 3166-2 subdivision codes.
pub const ISO_3166_2: &str = "1.0.3166.2";

/// Dun & Bradstreet DUNS numbers.
pub const DUNS: &str = "1.3.6.1.4.1.519.1";

/// MED-RT / established pharmacologic class.
pub const MED_RT: &str = "2.16.840.1.113883.6.345";

/// HL7 null flavors accepted in place of a route code.
pub const ROUTE_NULL_FLAVORS: &[&str] = &["NI", "NA", "UNK", "NASK", "ASKU", "OTH"];
