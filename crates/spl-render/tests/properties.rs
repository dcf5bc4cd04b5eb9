//! Property tests for the characteristic rendering decision.

use proptest::prelude::*;

use spl_model::snapshot::CharacteristicRecord;
use spl_model::{Characteristic, ValueKind};
use spl_render::{CharacteristicRenderContext, render_kind};

/// A record with an arbitrary subset of value slots populated.
fn any_record() -> impl Strategy<Value = CharacteristicRecord> {
    (
        proptest::option::of(prop::sample::select(vec![
            "CV", "pq", "INT", "st", "BL", "IVL_PQ", "ED", "XYZ",
        ])),
        any::<[bool; 7]>(),
    )
        .prop_map(|(value_type, slots)| CharacteristicRecord {
            characteristic_id: 1,
            value_type: value_type.map(str::to_string),
            value_cv_code: slots[0].then(|| "C48323".to_string()),
            value_pq_value: slots[1].then_some(5.0),
            value_pq_unit: slots[1].then(|| "mg".to_string()),
            value_int: slots[2].then_some(3),
            value_st: slots[3].then(|| "text".to_string()),
            value_bl: slots[4].then_some(false),
            value_ivlpq_low_value: slots[5].then_some(1.0),
            value_ivlpq_low_unit: slots[5].then(|| "mm".to_string()),
            value_ed_file_name: slots[6].then(|| "image.jpg".to_string()),
            ..Default::default()
        })
}

fn set_flags(context: &CharacteristicRenderContext) -> usize {
    [
        context.should_render_as_coded_element,
        context.should_render_as_physical_quantity,
        context.should_render_as_integer,
        context.should_render_as_string,
        context.should_render_as_boolean,
        context.should_render_as_interval,
        context.should_render_as_encoded_data,
    ]
    .into_iter()
    .filter(|flag| *flag)
    .count()
}

proptest! {
    #[test]
    fn at_most_one_flag_is_set(record in any_record()) {
        let characteristic = Characteristic::from_record(record);
        let context = CharacteristicRenderContext::build(&characteristic);
        prop_assert!(set_flags(&context) <= 1);
        prop_assert_eq!(context.render_kind(), render_kind(&characteristic));
    }

    #[test]
    fn a_flag_is_set_whenever_a_kind_is_known(record in any_record()) {
        let characteristic = Characteristic::from_record(record);
        let context = CharacteristicRenderContext::build(&characteristic);
        let known = characteristic.declared_kind().is_some() || !characteristic.values.is_empty();
        prop_assert_eq!(set_flags(&context) == 1, known);
    }

    #[test]
    fn undeclared_coded_value_always_wins(record in any_record()) {
        let characteristic = Characteristic::from_record(CharacteristicRecord {
            value_type: None,
            value_cv_code: Some("C48323".to_string()),
            ..record
        });
        let context = CharacteristicRenderContext::build(&characteristic);
        prop_assert!(context.should_render_as_coded_element);
        prop_assert_eq!(context.value_type.as_deref(), Some(ValueKind::CodedElement.code()));
    }

    #[test]
    fn building_is_deterministic(record in any_record()) {
        let characteristic = Characteristic::from_record(record);
        prop_assert_eq!(
            CharacteristicRenderContext::build(&characteristic),
            CharacteristicRenderContext::build(&characteristic)
        );
    }
}
