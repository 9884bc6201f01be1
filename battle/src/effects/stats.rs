//! Stat stage and type effects

use stadium_protocol::{BattleEvent, Stat};
use tracing::debug;

use crate::calc;
use crate::engine::BattleContext;
use crate::error::BattleError;
use crate::types::MoveTarget;

pub(super) fn apply_stat_change(
    ctx: &mut BattleContext<'_>,
    target: MoveTarget,
    stat: Stat,
    stages: i8,
    chance: Option<u8>,
) -> Result<(), BattleError> {
    let on_enemy = match target {
        MoveTarget::Enemy => true,
        MoveTarget::User => false,
        MoveTarget::All => return Err(BattleError::UnsupportedTarget(target)),
    };
    // Nothing left to lower
    if on_enemy && ctx.defender.active().is_fainted() {
        return Ok(());
    }
    if !calc::secondary_effect_occurs(chance, ctx.rng) {
        debug!(stat = %stat.as_str(), "secondary stat change did not trigger");
        return Ok(());
    }

    let trainer = if on_enemy {
        &mut *ctx.defender
    } else {
        &mut *ctx.attacker
    };
    let delta = trainer.active_mut().stages.boost(stat, stages);
    let pokemon = trainer.ident();

    let amount = delta.unsigned_abs();
    let event = if stages > 0 {
        BattleEvent::Boost {
            pokemon,
            stat,
            amount,
        }
    } else {
        BattleEvent::Unboost {
            pokemon,
            stat,
            amount,
        }
    };
    ctx.emit(event);
    Ok(())
}

pub(super) fn apply_reset(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    ctx.attacker.active_mut().stages.clear();
    ctx.defender.active_mut().stages.clear();
    ctx.emit(BattleEvent::ClearAllBoost);
    Ok(())
}

pub(super) fn apply_type_change(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let pokemon = ctx.attacker_ident();
    let Some(&primary) = ctx.defender.active().types.first() else {
        ctx.emit(BattleEvent::Fail(pokemon));
        return Ok(());
    };

    ctx.attacker.active_mut().types = vec![primary];
    ctx.emit(BattleEvent::TypeChange {
        pokemon,
        type_name: primary.to_string(),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::effects::MoveEffect;
    use crate::error::BattleError;
    use crate::testing::{Arena, MoveBuilder};
    use crate::types::{MoveTarget, Type};
    use stadium_protocol::{BattleEvent, Stat};

    fn stat_change(target: MoveTarget, stat: Stat, stages: i8, chance: Option<u8>) -> MoveEffect {
        MoveEffect::StatChange {
            target,
            stat,
            stages,
            chance,
        }
    }

    #[test]
    fn test_raise_own_stat() {
        let mut arena = Arena::duel();
        let mut ctx = arena.ctx_with(MoveBuilder::new("Swords Dance").build());
        stat_change(MoveTarget::User, Stat::Atk, 2, None)
            .apply(&mut ctx)
            .unwrap();
        drop(ctx);

        assert_eq!(arena.attacker().stages.get(Stat::Atk), 2);
        assert_eq!(arena.events()[0].to_string(), "Bulbasaur's Attack rose sharply!");
        assert_eq!(arena.rng.draws(), 0);
    }

    #[test]
    fn test_capped_stage_reports_zero() {
        let mut arena = Arena::duel();
        arena.defender_mut().stages.set(Stat::Def, -6);

        let mut ctx = arena.ctx_with(MoveBuilder::new("Screech").build());
        stat_change(MoveTarget::Enemy, Stat::Def, -2, None)
            .apply(&mut ctx)
            .unwrap();
        drop(ctx);

        assert_eq!(arena.defender().stages.get(Stat::Def), -6);
        assert!(matches!(
            arena.events()[0],
            BattleEvent::Unboost { amount: 0, .. }
        ));
        assert!(arena.events()[0].to_string().ends_with("cannot go any lower!"));
    }

    #[test]
    fn test_partial_clamp_reports_actual_change() {
        let mut arena = Arena::duel();
        arena.attacker_mut().stages.set(Stat::Spe, 5);

        let mut ctx = arena.ctx_with(MoveBuilder::new("Agility").build());
        stat_change(MoveTarget::User, Stat::Spe, 2, None)
            .apply(&mut ctx)
            .unwrap();
        drop(ctx);

        assert!(matches!(arena.events()[0], BattleEvent::Boost { amount: 1, .. }));
    }

    #[test]
    fn test_fainted_enemy_is_skipped_without_draw() {
        let mut arena = Arena::duel();
        arena.defender_mut().faint();

        let mut ctx = arena.ctx_with(MoveBuilder::new("Psychic").build());
        stat_change(MoveTarget::Enemy, Stat::Spd, -1, Some(33))
            .apply(&mut ctx)
            .unwrap();
        drop(ctx);

        assert_eq!(arena.rng.draws(), 0);
        assert!(arena.events().is_empty());
    }

    #[test]
    fn test_chance_draws_once() {
        let mut arena = Arena::duel();
        let mut ctx = arena.ctx_with(MoveBuilder::new("Bubble").build());
        stat_change(MoveTarget::Enemy, Stat::Spe, -1, Some(33))
            .apply(&mut ctx)
            .unwrap();
        drop(ctx);

        assert_eq!(arena.rng.draws(), 1);
    }

    #[test]
    fn test_field_wide_target_is_rejected() {
        let mut arena = Arena::duel();
        let mut ctx = arena.ctx_with(MoveBuilder::new("Haze-ish").build());
        let err = stat_change(MoveTarget::All, Stat::Atk, 1, None)
            .apply(&mut ctx)
            .unwrap_err();
        assert_eq!(err, BattleError::UnsupportedTarget(MoveTarget::All));
    }

    #[test]
    fn test_reset_clears_both_sides() {
        let mut arena = Arena::duel();
        arena.attacker_mut().stages.set(Stat::Atk, 3);
        arena.defender_mut().stages.set(Stat::Evasion, -2);

        let mut ctx = arena.ctx_with(MoveBuilder::new("Haze").build());
        MoveEffect::StatChangeReset.apply(&mut ctx).unwrap();
        drop(ctx);

        assert!(arena.attacker().stages.is_clear());
        assert!(arena.defender().stages.is_clear());
    }

    #[test]
    fn test_type_change_copies_primary_type() {
        let mut arena = Arena::duel();
        arena.defender_mut().types = vec![Type::Water, Type::Ice];

        let mut ctx = arena.ctx_with(MoveBuilder::new("Conversion").build());
        MoveEffect::TypeChange.apply(&mut ctx).unwrap();
        drop(ctx);

        assert_eq!(arena.attacker().types, vec![Type::Water]);
        assert_eq!(
            arena.events()[0].to_string(),
            "Bulbasaur transformed into the Water type!"
        );
    }
}
