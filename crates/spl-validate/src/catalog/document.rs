//! Document header, author organizations and structured bodies.

use spl_model::{ContractError, Document, Organization, StructuredBody};
use spl_vocab::code_systems;

use super::{coded_complete, date_required};
use crate::issue::Severity;
use crate::rules::{Category, Outcome, Rule, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    document_rules(registry)?;
    organization_rules(registry)?;
    structured_body_rules(registry)
}

fn document_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<Document>;

    registry.register(R {
        name: "DocumentSetIdRequired",
        category: Category::Shape,
        severity: Severity::Reject,
        description: "Every document version carries the set id shared by all its versions",
        message: "document has no set id",
        check: |document, _| Outcome::check(document.set_guid.is_some()),
    })?;

    registry.register(R {
        name: "DocumentGuidRequired",
        category: Category::Shape,
        severity: Severity::Reject,
        description: "Every document version carries its own globally unique id",
        message: "document has no document id",
        check: |document, _| Outcome::check(document.document_guid.is_some()),
    })?;

    registry.register(R {
        name: "DocumentVersionPositive",
        category: Category::Range,
        severity: Severity::Error,
        description: "Version numbers are present and start at 1",
        message: "document has no version number",
        check: |document, _| match document.version_number {
            None => Outcome::Fail,
            Some(version) => Outcome::fail_if(version < 1, || {
                format!("version number {version} is not positive")
            }),
        },
    })?;

    registry.register(R {
        name: "DocumentCodeComplete",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The document type code carries code, code system and display name",
        message: "document type code is incomplete",
        check: |document, _| coded_complete(&document.code, "document type code"),
    })?;

    registry.register(R {
        name: "DocumentCodeSystemLoinc",
        category: Category::Terminology,
        severity: Severity::Warning,
        description: "Document type codes are drawn from LOINC",
        message: "document type code is not a LOINC code",
        check: |document, _| match document.code.code_system.as_deref() {
            Some(system) if system != code_systems::LOINC => Outcome::FailWith(format!(
                "document type code system {system} is not LOINC"
            )),
            _ => Outcome::Pass,
        },
    })?;

    registry.register(R {
        name: "DocumentEffectiveTimeFormat",
        category: Category::Shape,
        severity: Severity::Error,
        description: "The document effective time is present and a valid HL7 timestamp",
        message: "document effective time is invalid",
        check: |document, _| {
            date_required(document.effective_time.as_deref(), "document effective time")
        },
    })?;

    registry.register(R {
        name: "DocumentTitleRequired",
        category: Category::Shape,
        severity: Severity::Warning,
        description: "Documents carry a title",
        message: "document has no title",
        check: |document, _| Outcome::check(document.title.is_some()),
    })
}

fn organization_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<Organization>;

    registry.register(R {
        name: "OrganizationNameRequired",
        category: Category::Shape,
        severity: Severity::Error,
        description: "Organizations carry a name",
        message: "organization has no name",
        check: |organization, _| Outcome::check(organization.name.is_some()),
    })?;

    registry.register(R {
        name: "OrganizationIdentifierPaired",
        category: Category::ConditionalPresence,
        severity: Severity::Warning,
        description: "An organization identifier value and its root are given together",
        message: "organization identifier value and root must be given together",
        check: |organization, _| {
            Outcome::check(
                organization.identifier_value.is_some() == organization.identifier_root.is_some(),
            )
        },
    })?;

    registry.register(R {
        name: "OrganizationDunsFormat",
        category: Category::Shape,
        severity: Severity::Warning,
        description: "DUNS identifiers are nine digits",
        message: "DUNS number is not nine digits",
        check: |organization, _| {
            let is_duns = organization.identifier_root.as_deref() == Some(code_systems::DUNS);
            match organization.identifier_value.as_deref() {
                Some(value) if is_duns => Outcome::fail_if(!is_duns_number(value), || {
                    format!("DUNS number {value:?} is not nine digits")
                }),
                _ => Outcome::Pass,
            }
        },
    })
}

fn structured_body_rules(registry: &mut RuleRegistry) -> Result<(), ContractError> {
    type R = Rule<StructuredBody>;

    registry.register(R {
        name: "StructuredBodyHasSections",
        category: Category::Hierarchy,
        severity: Severity::Warning,
        description: "A structured body owns at least one section",
        message: "structured body has no sections",
        check: |body, ctx| {
            Outcome::check(!ctx.set.relations().sections_of_body(body.id).is_empty())
        },
    })
}

fn is_duns_number(value: &str) -> bool {
    value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit())
}
