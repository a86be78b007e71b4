//! Integration tests: properties.
use ficha_mechanics::{
    Modifier, ModifierKind, ProficiencyLevel, RollFormula, aggregate, format_roll,
    resolve_dice_pool, signature_bonus,
};
use proptest::prelude::*;

fn modifier_strategy() -> impl Strategy<Value = Modifier> {
    ("[a-z]{1,8}", -6_i32..=6, any::<bool>()).prop_map(|(name, value, affects_dice)| Modifier {
        name,
        value,
        affects_dice,
    })
}

#[test]
fn formatter_battery() {
    // (attribute, dice delta, numeric total, text)
    let cases = [
        (1, 0, 0, "1d20"),
        (1, 0, 4, "1d20+4"),
        (1, -1, 0, "1d20"),
        (0, 0, 0, "-2d20"),
        (0, 0, 3, "-2d20+3"),
        (0, 3, -1, "-2d20-1"),
        (2, 0, 0, "2d20 (maior)"),
        (3, 0, -2, "3d20 (maior)-2"),
        (3, 1, 2, "4d20 (maior)+2"),
        (5, 0, 12, "5d20 (maior)+12"),
        (2, -5, 0, "1d20"),
        (-2, 0, 0, "1d20"),
        (-1, 2, 4, "2d20 (maior)+4"),
    ];
    for (attribute, delta, numeric, expected) in cases {
        let formula = resolve_dice_pool(attribute, delta).with_numeric(numeric);
        let text = formula.to_string();
        assert_eq!(text, expected, "{attribute} {delta} {numeric}");
        let rendered = format_roll(formula.dice_count, formula.take_lowest, numeric);
        assert_eq!(rendered, text);
    }
}

#[test]
fn signature_examples() {
    assert_eq!(signature_bonus(9, false), 9);
    assert_eq!(signature_bonus(9, true), 3);
    assert_eq!(signature_bonus(1, true), 1);
}

proptest! {
    #[test]
    fn aggregate_ignores_order(mut modifiers in prop::collection::vec(modifier_strategy(), 0..12)) {
        let forward = aggregate(&modifiers);
        modifiers.reverse();
        prop_assert_eq!(aggregate(&modifiers), forward);
        let mid = modifiers.len() / 2;
        modifiers.rotate_left(mid);
        prop_assert_eq!(aggregate(&modifiers), forward);
    }

    #[test]
    fn aggregate_splits_by_target(modifiers in prop::collection::vec(modifier_strategy(), 0..12)) {
        let totals = aggregate(&modifiers);
        let all: i32 = modifiers.iter().map(|m| m.value).sum();
        prop_assert_eq!(totals.dice_delta + totals.numeric_delta, all);
    }

    #[test]
    fn zero_attribute_always_takes_lowest(delta in -10_i32..10) {
        let pool = resolve_dice_pool(0, delta);
        prop_assert!(pool.take_lowest);
        prop_assert_eq!(pool.dice_count, 2);
    }

    #[test]
    fn positive_attribute_keeps_highest(attribute in 1_i32..8, delta in -10_i32..10) {
        let pool = resolve_dice_pool(attribute, delta);
        prop_assert!(!pool.take_lowest);
        prop_assert!(pool.dice_count >= 1);
    }

    #[test]
    fn plain_attribute_text(attribute in 2_i32..10) {
        let text = resolve_dice_pool(attribute, 0).with_numeric(0).to_string();
        prop_assert_eq!(text, format!("{attribute}d20 (maior)"));
    }

    #[test]
    fn numeric_suffix_sign(numeric in -20_i32..20) {
        let formula = RollFormula {
            dice_count: 1,
            take_lowest: false,
            numeric_total: numeric,
        };
        let text = formula.to_string();
        match numeric {
            0 => prop_assert_eq!(text, "1d20"),
            n if n > 0 => prop_assert_eq!(text, format!("1d20+{n}")),
            n => prop_assert_eq!(text, format!("1d20{n}")),
        }
    }

    #[test]
    fn modifier_kind_follows_sign_after_load(
        value in -10_i32..10,
        stated in prop_oneof![Just("bonus"), Just("penalidade")],
    ) {
        let json = format!(r#"{{"name":"X","value":{value},"type":"{stated}"}}"#);
        let modifier: Modifier = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(modifier.kind(), ModifierKind::from_value(value));
    }

    #[test]
    fn proficiency_ordinals(ordinal in 0_u8..10) {
        let parsed = ProficiencyLevel::from_ordinal(ordinal);
        prop_assert_eq!(parsed.is_ok(), ordinal <= 3);
    }
}
