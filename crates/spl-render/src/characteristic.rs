//! Rendering decision for the characteristic value union.

use serde::Serialize;

use spl_model::{Characteristic, CharacteristicId, CharacteristicValue, ValueKind};

/// How one characteristic should be presented.
///
/// At most one `should_render_as_*` flag is set. None is set when the record
/// neither declares a known value type nor populates any value slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacteristicRenderContext {
    pub id: CharacteristicId,
    pub code: Option<String>,
    pub display_name: Option<String>,
    /// Upper-cased discriminator: the declared `ValueType` when present,
    /// otherwise the code of the inferred value kind.
    pub value_type: Option<String>,
    pub display_value: Option<String>,
    pub should_render_as_coded_element: bool,
    pub should_render_as_physical_quantity: bool,
    pub should_render_as_integer: bool,
    pub should_render_as_string: bool,
    pub should_render_as_boolean: bool,
    pub should_render_as_interval: bool,
    pub should_render_as_encoded_data: bool,
}

impl CharacteristicRenderContext {
    pub fn build(characteristic: &Characteristic) -> Self {
        let kind = render_kind(characteristic);
        let value_type = characteristic
            .declared
            .as_ref()
            .map(|tag| tag.as_str().to_string())
            .or_else(|| kind.map(|kind| kind.code().to_string()));
        let display_value = kind
            .and_then(|kind| characteristic.value_of(kind))
            .and_then(CharacteristicValue::display);
        let is = |candidate: ValueKind| kind == Some(candidate);

        Self {
            id: characteristic.id,
            code: characteristic.code.code.clone(),
            display_name: characteristic.code.display_name.clone(),
            value_type,
            display_value,
            should_render_as_coded_element: is(ValueKind::CodedElement),
            should_render_as_physical_quantity: is(ValueKind::PhysicalQuantity),
            should_render_as_integer: is(ValueKind::Integer),
            should_render_as_string: is(ValueKind::String),
            should_render_as_boolean: is(ValueKind::Boolean),
            should_render_as_interval: is(ValueKind::Interval),
            should_render_as_encoded_data: is(ValueKind::EncodedData),
        }
    }

    /// The kind selected for rendering, if any.
    pub fn render_kind(&self) -> Option<ValueKind> {
        [
            (self.should_render_as_coded_element, ValueKind::CodedElement),
            (self.should_render_as_physical_quantity, ValueKind::PhysicalQuantity),
            (self.should_render_as_integer, ValueKind::Integer),
            (self.should_render_as_string, ValueKind::String),
            (self.should_render_as_boolean, ValueKind::Boolean),
            (self.should_render_as_interval, ValueKind::Interval),
            (self.should_render_as_encoded_data, ValueKind::EncodedData),
        ]
        .into_iter()
        .find_map(|(set, kind)| set.then_some(kind))
    }
}

/// Resolve the value kind to render.
///
/// A recognised declared type wins. Without one, a single populated slot
/// decides; several populated slots fall back to the coded value, or to the
/// first slot in canonical order when no coded value is present.
pub fn render_kind(characteristic: &Characteristic) -> Option<ValueKind> {
    if let Some(kind) = characteristic.declared_kind() {
        return Some(kind);
    }
    let kinds = characteristic.populated_kinds();
    match kinds.as_slice() {
        [] => None,
        [only] => Some(*only),
        several if several.contains(&ValueKind::CodedElement) => Some(ValueKind::CodedElement),
        several => several.first().copied(),
    }
}
