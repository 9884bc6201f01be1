//! Damage-dealing effects

use stadium_protocol::BattleEvent;

use super::{announce_effectiveness, effectiveness, hit_defender};
use crate::calc::{self, Strike};
use crate::engine::BattleContext;
use crate::error::BattleError;
use crate::rng::BattleRng;
use crate::types::{CritRatio, MoveCategory};

/// Number of hits for a multi-hit move
///
/// A fixed count when `min == max`; the classic 2-5 spread weighted
/// 96/96/32/32 out of 256; otherwise uniform over `[min, max]`.
pub fn roll_hits(min: u8, max: u8, rng: &mut BattleRng) -> u8 {
    if min >= max {
        return min;
    }
    if (min, max) == (2, 5) {
        return match rng.below(256) {
            0..96 => 2,
            96..192 => 3,
            192..224 => 4,
            _ => 5,
        };
    }
    rng.range(min as u32, max as u32 + 1) as u8
}

fn roll_strike(ctx: &mut BattleContext<'_>, crit_ratio: CritRatio, effectiveness: f32) -> Strike {
    let critical = calc::is_critical(ctx.attacker.active(), crit_ratio, ctx.rng);
    Strike::new(critical, effectiveness)
}

fn formula_damage(ctx: &mut BattleContext<'_>, strike: Strike) -> u16 {
    calc::calculate_damage(
        &ctx.current_move,
        ctx.attacker.active(),
        ctx.defender.active(),
        strike,
        ctx.rng,
        ctx.rules.damage_overflow,
    )
}

fn immune(ctx: &mut BattleContext<'_>) {
    announce_effectiveness(ctx, 0.0);
    ctx.last_damage = Some(0);
}

pub(super) fn apply_damage(ctx: &mut BattleContext<'_>, crit_ratio: CritRatio) -> Result<(), BattleError> {
    let effectiveness = effectiveness(ctx);
    if effectiveness == 0.0 {
        immune(ctx);
        return Ok(());
    }

    let strike = roll_strike(ctx, crit_ratio, effectiveness);
    let damage = formula_damage(ctx, strike);

    announce_effectiveness(ctx, effectiveness);
    if strike.critical {
        let target = ctx.defender_ident();
        ctx.emit(BattleEvent::Crit(target));
    }
    let taken = hit_defender(ctx, damage);
    ctx.last_damage = Some(taken as u32);
    Ok(())
}

pub(super) fn apply_multistrike(
    ctx: &mut BattleContext<'_>,
    crit_ratio: CritRatio,
    min_hits: u8,
    max_hits: u8,
) -> Result<(), BattleError> {
    let effectiveness = effectiveness(ctx);
    if effectiveness == 0.0 {
        immune(ctx);
        return Ok(());
    }

    let strike = roll_strike(ctx, crit_ratio, effectiveness);
    let hits = roll_hits(min_hits, max_hits, ctx.rng);

    let mut landed = 0;
    for _ in 0..hits {
        let damage = formula_damage(ctx, strike);
        let taken = hit_defender(ctx, damage);
        landed += 1;
        ctx.last_damage = Some(taken as u32);
        if ctx.defender.active().is_fainted() {
            break;
        }
    }

    announce_effectiveness(ctx, effectiveness);
    let target = ctx.defender_ident();
    if strike.critical {
        ctx.emit(BattleEvent::Crit(target.clone()));
    }
    ctx.emit(BattleEvent::HitCount {
        pokemon: target,
        hits: landed,
    });
    Ok(())
}

pub(super) fn apply_fixed(ctx: &mut BattleContext<'_>, amount: Option<u16>) -> Result<(), BattleError> {
    let amount = amount.unwrap_or(ctx.attacker.active().level() as u16);
    let damage = ctx.rules.damage_overflow.narrow(amount as u32);
    let taken = hit_defender(ctx, damage);
    ctx.last_damage = Some(taken as u32);
    Ok(())
}

pub(super) fn apply_one_hit_ko(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let effectiveness = effectiveness(ctx);
    announce_effectiveness(ctx, effectiveness);
    if effectiveness == 0.0 {
        return Ok(());
    }

    let target = ctx.defender_ident();
    ctx.emit(BattleEvent::Ohko(target));
    let remaining = ctx.defender.active().hp();
    let taken = hit_defender(ctx, remaining);
    ctx.last_damage = Some(taken as u32);
    Ok(())
}

pub(super) fn apply_cut_half(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let effectiveness = effectiveness(ctx);
    announce_effectiveness(ctx, effectiveness);
    if effectiveness == 0.0 {
        return Ok(());
    }

    let half = ctx.defender.active().hp() as u32 / 2;
    let damage = ctx.rules.damage_overflow.narrow(half);
    let taken = hit_defender(ctx, damage);
    ctx.last_damage = Some(taken as u32);
    Ok(())
}

pub(super) fn apply_counter(ctx: &mut BattleContext<'_>, category: MoveCategory) -> Result<(), BattleError> {
    let countered = match (ctx.last_damage, &ctx.last_move) {
        (Some(damage), Some(last)) if last.data.category == category => {
            Some((damage, last.data.name.clone()))
        }
        _ => None,
    };
    let Some((damage, move_name)) = countered else {
        let pokemon = ctx.attacker_ident();
        ctx.emit(BattleEvent::Fail(pokemon));
        return Ok(());
    };

    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::Counter { pokemon, move_name });
    let damage = ctx.rules.damage_overflow.narrow(damage.saturating_mul(2));
    let taken = hit_defender(ctx, damage);
    ctx.last_damage = Some(taken as u32);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::MoveEffect;
    use crate::engine::LastMove;
    use crate::rules::DamageOverflow;
    use crate::testing::{Arena, MoveBuilder};
    use crate::types::Type;
    use stadium_protocol::Player;

    fn events_named(arena: &Arena, kind: &str) -> usize {
        arena
            .events()
            .iter()
            .filter(|e| e.to_wire_format().starts_with(&format!("|{}|", kind)))
            .count()
    }

    #[test]
    fn test_two_to_five_distribution() {
        let mut counts = [0u32; 6];
        let mut rng = BattleRng::seeded(31);
        for _ in 0..25_600 {
            counts[roll_hits(2, 5, &mut rng) as usize] += 1;
        }
        // Expected 9600 / 9600 / 3200 / 3200
        assert!((9000..10200).contains(&counts[2]), "{:?}", counts);
        assert!((9000..10200).contains(&counts[3]), "{:?}", counts);
        assert!((2800..3600).contains(&counts[4]), "{:?}", counts);
        assert!((2800..3600).contains(&counts[5]), "{:?}", counts);
        assert_eq!(counts[0] + counts[1], 0);
    }

    #[test]
    fn test_fixed_and_uniform_hit_counts() {
        let mut rng = BattleRng::seeded(4);
        assert_eq!(roll_hits(2, 2, &mut rng), 2);
        assert_eq!(rng.draws(), 0);

        for _ in 0..200 {
            let hits = roll_hits(1, 3, &mut rng);
            assert!((1..=3).contains(&hits));
        }
    }

    #[test]
    fn test_damage_against_immune_target() {
        let mut arena = Arena::duel();
        arena.defender_mut().types = vec![Type::Ghost];
        arena.carry.last_damage = Some(40);

        let mut ctx = arena.ctx_with(MoveBuilder::new("Body Slam").power(85).build());
        MoveEffect::Damage {
            crit_ratio: CritRatio::Normal,
        }
        .apply(&mut ctx)
        .unwrap();
        let carry = ctx.finish();

        assert_eq!(carry.last_damage, Some(0));
        assert_eq!(arena.rng.draws(), 0);
        assert!(matches!(arena.events()[0], BattleEvent::Immune(_)));
        assert_eq!(arena.defender().hp(), arena.defender().max_hp());
    }

    #[test]
    fn test_damage_records_hp_lost() {
        let mut arena = Arena::duel();
        let mut ctx = arena.ctx_with(MoveBuilder::new("Tackle").build());
        MoveEffect::Damage {
            crit_ratio: CritRatio::Normal,
        }
        .apply(&mut ctx)
        .unwrap();
        let carry = ctx.finish();

        let lost = arena.defender().max_hp() - arena.defender().hp();
        assert!(lost > 0);
        assert_eq!(carry.last_damage, Some(lost as u32));
    }

    #[test]
    fn test_multistrike_stops_on_faint() {
        let mut arena = Arena::duel();
        let max_hp = arena.defender().max_hp();
        arena.defender_mut().take_damage(max_hp - 1);

        let mut ctx = arena.ctx_with(MoveBuilder::new("Double Slap").power(15).build());
        MoveEffect::Multistrike {
            crit_ratio: CritRatio::Normal,
            min_hits: 2,
            max_hits: 2,
        }
        .apply(&mut ctx)
        .unwrap();
        drop(ctx);

        assert!(arena.defender().is_fainted());
        assert_eq!(events_named(&arena, "-damage"), 1);
        assert!(arena.events().iter().any(|e| matches!(
            e,
            BattleEvent::HitCount { hits: 1, .. }
        )));
    }

    #[test]
    fn test_multistrike_immune_returns_early() {
        let mut arena = Arena::duel();
        arena.defender_mut().types = vec![Type::Ghost];

        let mut ctx = arena.ctx_with(MoveBuilder::new("Fury Attack").power(15).build());
        MoveEffect::Multistrike {
            crit_ratio: CritRatio::Normal,
            min_hits: 2,
            max_hits: 5,
        }
        .apply(&mut ctx)
        .unwrap();
        drop(ctx);

        assert_eq!(arena.rng.draws(), 0);
        assert_eq!(arena.events().len(), 1);
    }

    #[test]
    fn test_fixed_damage_defaults_to_level() {
        let mut arena = Arena::duel();
        arena.defender_mut().types = vec![Type::Ghost];

        let mut ctx = arena.ctx_with(MoveBuilder::new("Night Shade").build());
        MoveEffect::FixedDamage { amount: None }.apply(&mut ctx).unwrap();
        assert_eq!(ctx.finish().last_damage, Some(50));
        assert_eq!(arena.defender().max_hp() - arena.defender().hp(), 50);
    }

    #[test]
    fn test_fixed_damage_overflow_modes() {
        let mut arena = Arena::duel();
        arena.rules.damage_overflow = DamageOverflow::Wrapping;
        let mut ctx = arena.ctx_with(MoveBuilder::new("Big Fixed").build());
        MoveEffect::FixedDamage { amount: Some(300) }
            .apply(&mut ctx)
            .unwrap();
        assert_eq!(ctx.finish().last_damage, Some(44));

        let mut arena = Arena::duel();
        let max_hp = arena.defender().max_hp();
        let mut ctx = arena.ctx_with(MoveBuilder::new("Big Fixed").build());
        MoveEffect::FixedDamage { amount: Some(300) }
            .apply(&mut ctx)
            .unwrap();
        assert_eq!(ctx.finish().last_damage, Some(255.min(max_hp) as u32));
    }

    #[test]
    fn test_one_hit_ko() {
        let mut arena = Arena::duel();
        let mut ctx = arena.ctx_with(MoveBuilder::new("Horn Drill").build());
        MoveEffect::OneHitKo.apply(&mut ctx).unwrap();
        drop(ctx);

        assert!(arena.defender().is_fainted());
        assert!(arena.events().iter().any(|e| matches!(e, BattleEvent::Ohko(_))));
        assert_eq!(arena.rng.draws(), 0);
    }

    #[test]
    fn test_one_hit_ko_blocked_by_immunity() {
        let mut arena = Arena::duel();
        arena.defender_mut().types = vec![Type::Ghost];
        let mut ctx = arena.ctx_with(MoveBuilder::new("Guillotine").build());
        MoveEffect::OneHitKo.apply(&mut ctx).unwrap();
        drop(ctx);

        assert!(!arena.defender().is_fainted());
    }

    #[test]
    fn test_cut_half_hp() {
        let mut arena = Arena::duel();
        let before = arena.defender().hp();
        let mut ctx = arena.ctx_with(MoveBuilder::new("Super Fang").build());
        MoveEffect::CutHalfHp.apply(&mut ctx).unwrap();
        drop(ctx);

        assert_eq!(arena.defender().hp(), before - before / 2);
    }

    #[test]
    fn test_counter_needs_last_damage() {
        let mut arena = Arena::duel();
        arena.carry.last_move = Some(LastMove {
            side: Player::P2,
            slot: Some(0),
            data: MoveBuilder::new("Tackle").build(),
        });

        let mut ctx = arena.ctx_with(MoveBuilder::new("Counter").build());
        MoveEffect::CounterDamage {
            category: MoveCategory::Physical,
        }
        .apply(&mut ctx)
        .unwrap();
        drop(ctx);

        assert!(matches!(arena.events()[0], BattleEvent::Fail(_)));
        assert!(arena.defender().is_full_hp());
    }

    #[test]
    fn test_counter_doubles_matching_category() {
        let mut arena = Arena::duel();
        arena.carry.last_damage = Some(20);
        arena.carry.last_move = Some(LastMove {
            side: Player::P2,
            slot: Some(0),
            data: MoveBuilder::new("Tackle").build(),
        });

        let mut ctx = arena.ctx_with(MoveBuilder::new("Counter").build());
        MoveEffect::CounterDamage {
            category: MoveCategory::Physical,
        }
        .apply(&mut ctx)
        .unwrap();
        assert_eq!(ctx.finish().last_damage, Some(40));
        assert_eq!(arena.defender().max_hp() - arena.defender().hp(), 40);
    }

    #[test]
    fn test_counter_rejects_other_category() {
        let mut arena = Arena::duel();
        arena.carry.last_damage = Some(20);
        arena.carry.last_move = Some(LastMove {
            side: Player::P2,
            slot: Some(0),
            data: MoveBuilder::new("Water Gun").special().build(),
        });

        let mut ctx = arena.ctx_with(MoveBuilder::new("Counter").build());
        MoveEffect::CounterDamage {
            category: MoveCategory::Physical,
        }
        .apply(&mut ctx)
        .unwrap();
        drop(ctx);

        assert!(arena.defender().is_full_hp());
    }
}
