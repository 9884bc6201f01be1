//! Moves that use other moves

use std::sync::Arc;

use stadium_protocol::BattleEvent;

use super::{CopyMode, MoveEffect};
use crate::combatant::BattleMove;
use crate::engine::BattleContext;
use crate::error::BattleError;
use crate::types::MoveData;

fn fail(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::Fail(pokemon));
    Ok(())
}

fn is_repeat_move(data: &MoveData) -> bool {
    data.effects.iter().any(|e| {
        matches!(
            e,
            MoveEffect::CopyMove {
                mode: CopyMode::Repeat
            }
        )
    })
}

pub(super) fn apply_copy(ctx: &mut BattleContext<'_>, mode: CopyMode) -> Result<(), BattleError> {
    match mode {
        CopyMode::Learn => learn(ctx),
        CopyMode::Repeat => repeat(ctx),
    }
}

/// Swap the copying move's slot for a random move of the defender
fn learn(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let choices = ctx.defender.active().moves.len();
    if choices == 0 {
        return fail(ctx);
    }
    let pick = ctx.rng.index(choices);
    let learned = Arc::clone(ctx.defender.active().moves[pick].data());

    let moves = &ctx.attacker.active().moves;
    let current = &ctx.current_move;
    let slot = ctx
        .current_slot
        .filter(|&slot| moves.get(slot).is_some_and(|m| m.holds(current)))
        .or_else(|| moves.iter().position(|m| m.holds(current)));
    let Some(slot) = slot else {
        return fail(ctx);
    };

    let move_name = learned.name.clone();
    ctx.attacker.active_mut().moves[slot] = BattleMove::new(learned);
    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::Mimic { pokemon, move_name });
    Ok(())
}

/// Use the last move anyone used
fn repeat(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let Some(last) = ctx.last_move.as_ref().map(|last| Arc::clone(&last.data)) else {
        return fail(ctx);
    };

    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::MirrorMove {
        pokemon,
        move_name: last.name.clone(),
    });
    if is_repeat_move(&last) {
        return fail(ctx);
    }
    ctx.invoke(last)
}

/// Use a random catalog move other than the random-move moves themselves
pub(super) fn apply_random(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let candidates: Vec<&Arc<MoveData>> = ctx
        .catalog
        .iter()
        .filter(|data| !data.effects.contains(&MoveEffect::RandomMove))
        .collect();
    if candidates.is_empty() {
        return fail(ctx);
    }
    let pick = Arc::clone(candidates[ctx.rng.index(candidates.len())]);
    ctx.invoke(pick)
}

#[cfg(test)]
mod tests {
    use crate::effects::{CopyMode, MoveEffect};
    use crate::engine::LastMove;
    use crate::testing::{Arena, MoveBuilder};
    use crate::types::{MoveCatalog, MoveCategory};
    use stadium_protocol::{BattleEvent, Player};

    fn mirror_move() -> std::sync::Arc<crate::types::MoveData> {
        MoveBuilder::new("Mirror Move")
            .category(MoveCategory::Status)
            .accuracy(None)
            .effects(vec![MoveEffect::CopyMove {
                mode: CopyMode::Repeat,
            }])
            .build()
    }

    fn metronome() -> std::sync::Arc<crate::types::MoveData> {
        MoveBuilder::new("Metronome")
            .category(MoveCategory::Status)
            .accuracy(None)
            .effects(vec![MoveEffect::RandomMove])
            .build()
    }

    fn used(arena: &Arena) -> Vec<String> {
        arena
            .events()
            .iter()
            .filter_map(|e| match e {
                BattleEvent::Move { move_name, .. } => Some(move_name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_mimic_replaces_its_own_slot() {
        let mut arena = Arena::duel();
        let mimic = MoveBuilder::new("Mimic")
            .category(MoveCategory::Status)
            .effects(vec![MoveEffect::CopyMove {
                mode: CopyMode::Learn,
            }])
            .build();
        arena.attacker_mut().moves[1] = crate::combatant::BattleMove::new(mimic.clone());

        let mut ctx = arena.ctx_with(mimic);
        ctx.current_slot = Some(1);
        MoveEffect::CopyMove {
            mode: CopyMode::Learn,
        }
        .apply(&mut ctx)
        .unwrap();
        drop(ctx);

        let learned = arena.attacker().moves[1].name().to_string();
        assert!(arena.defender().moves.iter().any(|m| m.name() == learned));
        assert_eq!(arena.attacker().moves[1].pp(), arena.attacker().moves[1].max_pp());
        assert!(matches!(arena.events()[0], BattleEvent::Mimic { .. }));
    }

    #[test]
    fn test_mirror_move_without_history_fails() {
        let mut arena = Arena::duel();
        let mut ctx = arena.ctx_with(mirror_move());
        MoveEffect::CopyMove {
            mode: CopyMode::Repeat,
        }
        .apply(&mut ctx)
        .unwrap();
        drop(ctx);

        assert_eq!(arena.events().len(), 1);
        assert!(matches!(arena.events()[0], BattleEvent::Fail(_)));
    }

    #[test]
    fn test_mirror_move_repeats_last_move() {
        let mut arena = Arena::duel();
        arena.carry.last_move = Some(LastMove {
            side: Player::P2,
            slot: Some(0),
            data: MoveBuilder::new("Swift").accuracy(None).build(),
        });

        let mut ctx = arena.ctx_with(mirror_move());
        MoveEffect::CopyMove {
            mode: CopyMode::Repeat,
        }
        .apply(&mut ctx)
        .unwrap();
        let carry = ctx.finish();

        assert_eq!(arena.events()[0].to_string(), "Bulbasaur copied Swift!");
        assert_eq!(used(&arena), vec!["Swift".to_string()]);
        assert!(!arena.defender().is_full_hp());
        assert!(carry.last_damage.is_some());
    }

    #[test]
    fn test_mirror_move_cannot_copy_itself() {
        let mut arena = Arena::duel();
        arena.carry.last_move = Some(LastMove {
            side: Player::P2,
            slot: Some(0),
            data: mirror_move(),
        });

        let mut ctx = arena.ctx_with(mirror_move());
        MoveEffect::CopyMove {
            mode: CopyMode::Repeat,
        }
        .apply(&mut ctx)
        .unwrap();
        drop(ctx);

        assert!(matches!(arena.events()[0], BattleEvent::MirrorMove { .. }));
        assert!(matches!(arena.events()[1], BattleEvent::Fail(_)));
        assert!(used(&arena).is_empty());
    }

    #[test]
    fn test_metronome_never_picks_itself() {
        let mut arena = Arena::duel();
        arena.catalog = [
            metronome().as_ref().clone(),
            MoveBuilder::new("Pound").build().as_ref().clone(),
        ]
        .into_iter()
        .collect::<MoveCatalog>();

        for _ in 0..20 {
            let mut ctx = arena.ctx_with(metronome());
            MoveEffect::RandomMove.apply(&mut ctx).unwrap();
        }

        assert!(used(&arena).iter().all(|name| name == "Pound"));
        assert_eq!(used(&arena).len(), 20);
    }

    #[test]
    fn test_metronome_with_nothing_to_pick_fails() {
        let mut arena = Arena::duel();
        arena.catalog = std::iter::once(metronome().as_ref().clone()).collect();

        let mut ctx = arena.ctx_with(metronome());
        MoveEffect::RandomMove.apply(&mut ctx).unwrap();
        drop(ctx);

        assert!(matches!(arena.events()[0], BattleEvent::Fail(_)));
    }

    #[test]
    fn test_invocation_chain_is_bounded() {
        let mut arena = Arena::duel();
        arena.catalog = [metronome().as_ref().clone(), mirror_move().as_ref().clone()]
            .into_iter()
            .collect();
        arena.carry.last_move = Some(LastMove {
            side: Player::P2,
            slot: None,
            data: metronome(),
        });

        let mut ctx = arena.ctx_with(metronome());
        MoveEffect::RandomMove.apply(&mut ctx).unwrap();
        drop(ctx);

        assert!(arena.events().iter().any(|e| matches!(e, BattleEvent::Fail(_))));
        assert!(used(&arena).len() <= 8);
    }
}
