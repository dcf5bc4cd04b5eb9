//! Territorial authorities, licenses and disciplinary actions.
//!
//! Federal territories (`USA`) must name a recognized governing agency by its
//! full identifier triple. Every other territory must leave those fields
//! empty. Disciplinary actions are checked against the status their license
//! held when the action was taken.

use spl_model::{
    ContractError, DisciplinaryAction, License, LicenseStatus, TerritorialAuthority, time,
};
use spl_vocab::code_systems;

use super::{date_if_present, date_required};
use crate::issue::Severity;
use crate::rules::{Category, Outcome, Rule, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    authority_rules(registry)?;
    license_rules(registry)?;
    disciplinary_action_rules(registry)
}

fn authority_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<TerritorialAuthority>;

    registry.register(R {
        name: "TerritoryCodeRecognized",
        category: Category::Terminology,
        severity: Severity::Error,
        description: "Territory codes are ISO 3166 country or subdivision codes",
        message: "territorial authority has no territory code",
        check: |authority, ctx| match authority.territory_code.as_deref() {
            None => Outcome::Fail,
            Some(code) => Outcome::fail_if(ctx.vocab.territory(code).is_none(), || {
                format!("unrecognized territory code {code:?}")
            }),
        },
    })?;

    registry.register(R {
        name: "TerritoryCodeSystem",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Country codes use ISO 3166-1 and subdivision codes ISO 3166-2",
        message: "territory code system does not match the territory code",
        check: |authority, _| {
            let (Some(code), Some(system)) = (
                authority.territory_code.as_deref(),
                authority.territory_code_system.as_deref(),
            ) else {
                return Outcome::Pass;
            };
            let expected = if code.contains('-') {
                code_systems::ISO_3166_2
            } else {
                code_systems::ISO_3166_1
            };
            Outcome::fail_if(system != expected, || {
                format!("territory code {code} uses code system {system}, expected {expected}")
            })
        },
    })?;

    registry.register(R {
        name: "FederalAgencyIdentifierRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Error,
        description: "A federal territory names its governing agency by extension, root and name",
        message: "federal territory is missing governing agency fields",
        check: |authority, ctx| {
            let federal = authority
                .territory_code
                .as_deref()
                .is_some_and(|code| ctx.vocab.is_federal(code));
            let missing = authority.missing_agency_fields();
            Outcome::fail_if(federal && !missing.is_empty(), || {
                format!("federal territory is missing {}", missing.join(", "))
            })
        },
    })?;

    registry.register(R {
        name: "FederalAgencyVocabulary",
        category: Category::ConditionalPresence,
        severity: Severity::Error,
        description: "A federal governing agency matches a recognized identifier triple",
        message: "governing agency is not recognized",
        check: |authority, ctx| {
            let (Some(code), Some(extension), Some(root), Some(name)) = (
                authority.territory_code.as_deref(),
                authority.agency_id_extension.as_deref(),
                authority.agency_id_root.as_deref(),
                authority.agency_name.as_deref(),
            ) else {
                return Outcome::Pass;
            };
            if !ctx.vocab.is_federal(code) {
                return Outcome::Pass;
            }
            Outcome::fail_if(!ctx.vocab.recognizes_agency(code, extension, root, name), || {
                match ctx.vocab.agency_named(code, name) {
                    Some(agency) => format!(
                        "agency {name} must be identified as {} / {}",
                        agency.id_extension, agency.id_root
                    ),
                    None => format!("agency {name:?} is not a recognized {code} agency"),
                }
            })
        },
    })?;

    registry.register(R {
        name: "StateAgencyIdentifierForbidden",
        category: Category::ConditionalPresence,
        severity: Severity::Error,
        description: "Non-federal territories leave the governing agency fields empty",
        message: "non-federal territory carries governing agency fields",
        check: |authority, ctx| {
            let Some(code) = authority.territory_code.as_deref() else {
                return Outcome::Pass;
            };
            let present = authority.present_agency_fields();
            Outcome::fail_if(!ctx.vocab.is_federal(code) && !present.is_empty(), || {
                format!("territory {code} must not carry {}", present.join(", "))
            })
        },
    })
}

fn license_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<License>;

    registry.register(R {
        name: "LicenseNumberRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Licenses carry a license number",
        message: "license has no license number",
        check: |license, _| Outcome::check(license.license_number.is_some()),
    })?;

    registry.register(R {
        name: "LicenseStatusRecognized",
        category: Category::Terminology,
        severity: Severity::Error,
        description: "License status is active, suspended, aborted or completed",
        message: "license has no status",
        check: |license, _| match &license.status {
            None => Outcome::Fail,
            Some(LicenseStatus::Unrecognized(raw)) => {
                Outcome::FailWith(format!("unrecognized license status {raw:?}"))
            }
            Some(_) => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "LicenseAuthorityRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Error,
        description: "A license names the territorial authority that issued it",
        message: "license has no issuing authority",
        check: |license, _| Outcome::check(license.territorial_authority_id.is_some()),
    })?;

    registry.register(R {
        name: "LicenseExpirationDateFormat",
        category: Category::Shape,
        severity: Severity::Warning,
        description: "A license expiration date, when given, is a valid HL7 timestamp",
        message: "license expiration date is invalid",
        check: |license, _| {
            date_if_present(license.expiration_date.as_deref(), "license expiration date")
        },
    })?;

    registry.register(R {
        name: "LicenseExpiredStatus",
        category: Category::Status,
        severity: Severity::Warning,
        description: "A license that expired before the document date is not active",
        message: "expired license is still active",
        check: |license, ctx| {
            if license.status != Some(LicenseStatus::Active) {
                return Outcome::Pass;
            }
            let expires = license
                .expiration_date
                .as_deref()
                .and_then(time::parse_hl7_date);
            let document_date = ctx
                .set
                .document()
                .ok()
                .and_then(|document| document.effective_time.as_deref())
                .and_then(time::parse_hl7_date);
            match (expires, document_date) {
                (Some(expires), Some(document_date)) if expires < document_date => {
                    Outcome::FailWith(format!(
                        "license expired on {expires} but is still active at {document_date}"
                    ))
                }
                _ => Outcome::Pass,
            }
        },
    })
}

fn disciplinary_action_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<DisciplinaryAction>;

    registry.register(R {
        name: "DisciplinaryActionCodeRecognized",
        category: Category::Terminology,
        severity: Severity::Error,
        description: "Disciplinary action codes come from the recognized action table",
        message: "disciplinary action has no action code",
        check: |action, ctx| match action.action.code.as_deref() {
            None => Outcome::Fail,
            Some(code) => Outcome::fail_if(ctx.vocab.disciplinary_action(code).is_none(), || {
                format!("unrecognized disciplinary action code {code:?}")
            }),
        },
    })?;

    registry.register(R {
        name: "DisciplinaryActionStatusCompatible",
        category: Category::Status,
        severity: Severity::Error,
        description: "An action is only applied to a license in a status that permits it",
        message: "disciplinary action is not permitted for the license status",
        check: |action, ctx| {
            let term = action
                .action
                .code
                .as_deref()
                .and_then(|code| ctx.vocab.disciplinary_action(code));
            let status = ctx
                .set
                .licenses()
                .get(action.license_id)
                .and_then(|license| license.status.as_ref())
                .filter(|status| !matches!(status, LicenseStatus::Unrecognized(_)));
            match (term, status) {
                (Some(term), Some(status)) if !term.permits(status.as_str()) => {
                    Outcome::FailWith(format!(
                        "{} cannot be applied to a {} license",
                        term.display_name,
                        status.as_str()
                    ))
                }
                _ => Outcome::Pass,
            }
        },
    })?;

    registry.register(R {
        name: "DisciplinaryActionTextRequired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "Actions that need an explanation carry text",
        message: "disciplinary action requires explanatory text",
        check: |action, ctx| {
            let requires_text = action
                .action
                .code
                .as_deref()
                .and_then(|code| ctx.vocab.disciplinary_action(code))
                .is_some_and(|term| term.requires_text);
            Outcome::check(!requires_text || action.text.is_some())
        },
    })?;

    registry.register(R {
        name: "DisciplinaryActionEffectiveTimeFormat",
        category: Category::Shape,
        severity: Severity::Warning,
        description: "A disciplinary action is dated with a valid HL7 timestamp",
        message: "disciplinary action date is invalid",
        check: |action, _| {
            date_required(action.effective_time.as_deref(), "disciplinary action date")
        },
    })
}
