//! Value shapes shared across record kinds.

use serde::{Deserialize, Serialize};

/// Collapse blank strings to `None`.
///
/// The relational source stores "no value" both as NULL and as empty text;
/// everything downstream only ever sees `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// A code / code-system / display-name triple.
///
/// Any subset may be populated; whether the combination is legal is decided by
/// the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodedValue {
    pub code: Option<String>,
    pub code_system: Option<String>,
    pub display_name: Option<String>,
}

impl CodedValue {
    pub fn new(
        code: Option<String>,
        code_system: Option<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            code: non_blank(code),
            code_system: non_blank(code_system),
            display_name: non_blank(display_name),
        }
    }

    /// All three parts are present.
    pub fn is_complete(&self) -> bool {
        self.code.is_some() && self.code_system.is_some() && self.display_name.is_some()
    }

    /// No part is present.
    pub fn is_absent(&self) -> bool {
        self.code.is_none() && self.code_system.is_none() && self.display_name.is_none()
    }

    /// Some but not all parts are present.
    pub fn is_partial(&self) -> bool {
        !self.is_complete() && !self.is_absent()
    }

    /// Names of the missing parts, in triple order.
    pub fn missing_parts(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.code.is_none() {
            missing.push("code");
        }
        if self.code_system.is_none() {
            missing.push("code system");
        }
        if self.display_name.is_none() {
            missing.push("display name");
        }
        missing
    }

    /// Display name when present, otherwise the bare code.
    pub fn label(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.code.as_deref())
    }

    pub fn has_system(&self, system: &str) -> bool {
        self.code_system.as_deref() == Some(system)
    }
}

/// A numeric value paired with a unit string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

impl Quantity {
    pub fn new(value: Option<f64>, unit: Option<String>) -> Self {
        Self {
            value,
            unit: non_blank(unit),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none() && self.unit.is_none()
    }

    /// Exactly one of value and unit is present.
    pub fn is_unpaired(&self) -> bool {
        self.value.is_some() != self.unit.is_some()
    }

    pub fn is_zero(&self) -> bool {
        self.value == Some(0.0)
    }

    /// `"<value> <unit>"`, dropping whichever half is missing.
    pub fn display(&self) -> Option<String> {
        match (self.value, self.unit.as_deref()) {
            (Some(value), Some(unit)) => Some(format!("{} {}", format_number(value), unit)),
            (Some(value), None) => Some(format_number(value)),
            (None, Some(unit)) => Some(unit.to_string()),
            (None, None) => None,
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coded_value_blank_parts_are_absent() {
        let coded = CodedValue::new(Some("  ".into()), None, Some("".into()));
        assert!(coded.is_absent());
        assert!(!coded.is_partial());
    }

    #[test]
    fn quantity_display_drops_trailing_zero_fraction() {
        let quantity = Quantity::new(Some(30.0), Some("1".into()));
        assert_eq!(quantity.display().as_deref(), Some("30 1"));
        let quantity = Quantity::new(Some(2.5), Some("mg".into()));
        assert_eq!(quantity.display().as_deref(), Some("2.5 mg"));
    }
}
