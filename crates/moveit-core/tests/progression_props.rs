//! Property tests for the XP economy.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use moveit_core::challenge::experience_to_next_level;
use moveit_core::{Catalog, Progression};

fn one_template_catalog(amount: u32) -> Catalog {
    Catalog::from_json(&format!(
        r#"[{{"type": "body", "description": "d", "amount": {amount}}}]"#
    ))
    .unwrap()
}

proptest! {
    #[test]
    fn threshold_formula_holds(level in 1u32..10_000) {
        let base = (level + 1) * 4;
        prop_assert_eq!(experience_to_next_level(level), base * base);
    }

    #[test]
    fn completion_keeps_experience_below_the_threshold(
        level in 1u32..500,
        xp_frac in 0.0f64..1.0,
        amount in 1u32..140,
    ) {
        let threshold = experience_to_next_level(level);
        let xp = ((threshold - 1) as f64 * xp_frac) as u32;
        let mut progression = Progression::new(level, xp, 0);
        let catalog = one_template_catalog(amount);
        let mut rng = Pcg64::seed_from_u64(0);

        progression.draw(&catalog, &mut rng);
        let outcome = progression.complete().unwrap();

        prop_assert!(progression.current_experience() < progression.experience_to_next_level());
        prop_assert_eq!(outcome.leveled_up, xp + amount >= threshold);
        prop_assert_eq!(progression.level(), if outcome.leveled_up { level + 1 } else { level });
        prop_assert_eq!(progression.challenges_completed(), 1);
        prop_assert!(progression.active_challenge().is_none());
    }

    #[test]
    fn draw_always_lands_inside_the_catalog(
        amounts in prop::collection::vec(1u32..200, 1..30),
        seed in any::<u64>(),
    ) {
        let entries: Vec<String> = amounts
            .iter()
            .map(|a| format!(r#"{{"type": "eye", "description": "d", "amount": {a}}}"#))
            .collect();
        let catalog = Catalog::from_json(&format!("[{}]", entries.join(","))).unwrap();
        let mut progression = Progression::default();
        let mut rng = Pcg64::seed_from_u64(seed);

        let drawn = progression.draw(&catalog, &mut rng).unwrap().clone();
        prop_assert!(catalog.iter().any(|t| *t == drawn));
    }

    #[test]
    fn abandon_never_touches_the_economy(
        level in 1u32..100,
        xp in 0u32..1_000,
        completed in 0u32..1_000,
    ) {
        let mut progression = Progression::new(level, xp, completed);
        let catalog = one_template_catalog(25);
        let mut rng = Pcg64::seed_from_u64(0);
        progression.draw(&catalog, &mut rng);

        progression.abandon();

        prop_assert_eq!(progression.level(), level);
        prop_assert_eq!(progression.current_experience(), xp);
        prop_assert_eq!(progression.challenges_completed(), completed);
        prop_assert!(progression.active_challenge().is_none());
    }
}
