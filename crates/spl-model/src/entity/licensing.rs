use serde::Serialize;

use crate::coded::{CodedValue, non_blank};
use crate::ids::{DisciplinaryActionId, LicenseId, OrganizationId, TerritorialAuthorityId};
use crate::snapshot::{DisciplinaryActionRecord, LicenseRecord, TerritorialAuthorityRecord};

/// The jurisdiction issuing a license, optionally with its governing agency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritorialAuthority {
    pub id: TerritorialAuthorityId,
    /// ISO 3166 code, upper-cased (`USA`, `US-MD`, ...).
    pub territory_code: Option<String>,
    pub territory_code_system: Option<String>,
    pub agency_id_extension: Option<String>,
    pub agency_id_root: Option<String>,
    pub agency_name: Option<String>,
}

impl TerritorialAuthority {
    pub fn from_record(record: TerritorialAuthorityRecord) -> Self {
        Self {
            id: TerritorialAuthorityId(record.territorial_authority_id),
            territory_code: non_blank(record.territory_code).map(|c| c.to_ascii_uppercase()),
            territory_code_system: non_blank(record.territory_code_system),
            agency_id_extension: non_blank(record.governing_agency_id_extension),
            agency_id_root: non_blank(record.governing_agency_id_root),
            agency_name: non_blank(record.governing_agency_name),
        }
    }

    /// Governing-agency columns that carry a value, in column order.
    pub fn present_agency_fields(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.agency_id_extension.is_some() {
            present.push("GoverningAgencyIdExtension");
        }
        if self.agency_id_root.is_some() {
            present.push("GoverningAgencyIdRoot");
        }
        if self.agency_name.is_some() {
            present.push("GoverningAgencyName");
        }
        present
    }

    /// Governing-agency columns that are empty, in column order.
    pub fn missing_agency_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.agency_id_extension.is_none() {
            missing.push("GoverningAgencyIdExtension");
        }
        if self.agency_id_root.is_none() {
            missing.push("GoverningAgencyIdRoot");
        }
        if self.agency_name.is_none() {
            missing.push("GoverningAgencyName");
        }
        missing
    }
}

/// HL7 status of a license.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum LicenseStatus {
    Active,
    Suspended,
    /// Revoked or otherwise terminated.
    Aborted,
    /// Expired.
    Completed,
    Unrecognized(String),
}

impl LicenseStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "suspended" => Self::Suspended,
            "aborted" => Self::Aborted,
            "completed" => Self::Completed,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Aborted => "aborted",
            Self::Completed => "completed",
            Self::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct License {
    pub id: LicenseId,
    pub territorial_authority_id: Option<TerritorialAuthorityId>,
    pub organization_id: Option<OrganizationId>,
    pub license_number: Option<String>,
    pub license_root: Option<String>,
    pub status: Option<LicenseStatus>,
    pub expiration_date: Option<String>,
}

impl License {
    pub fn from_record(record: LicenseRecord) -> Self {
        Self {
            id: LicenseId(record.license_id),
            territorial_authority_id: record.territorial_authority_id.map(TerritorialAuthorityId),
            organization_id: record.organization_id.map(OrganizationId),
            license_number: non_blank(record.license_number),
            license_root: non_blank(record.license_root),
            status: non_blank(record.status_code).map(|raw| LicenseStatus::parse(&raw)),
            expiration_date: non_blank(record.expiration_date),
        }
    }
}

/// An action taken against a license (suspension, revocation, reinstatement).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplinaryAction {
    pub id: DisciplinaryActionId,
    pub license_id: LicenseId,
    pub action: CodedValue,
    pub effective_time: Option<String>,
    pub text: Option<String>,
}

impl DisciplinaryAction {
    pub fn from_record(record: DisciplinaryActionRecord) -> Self {
        Self {
            id: DisciplinaryActionId(record.disciplinary_action_id),
            license_id: LicenseId(record.license_id),
            action: CodedValue::new(
                record.action_code,
                record.action_code_system,
                record.action_display_name,
            ),
            effective_time: non_blank(record.effective_time),
            text: non_blank(record.action_text),
        }
    }
}
