//! Disable and two-turn locks

use std::sync::Arc;

use stadium_protocol::BattleEvent;
use tracing::debug;

use crate::engine::BattleContext;
use crate::error::BattleError;

pub(super) fn apply_disable(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let defender_side = ctx.defender.side();
    // Only the defender's own last move, still sitting in its slot, can be disabled
    let slot = ctx
        .last_move
        .as_ref()
        .filter(|last| last.side == defender_side)
        .and_then(|last| {
            let slot = last.slot?;
            let held = ctx.defender.active().moves.get(slot)?;
            held.holds(&last.data).then_some(slot)
        });

    let Some(slot) = slot else {
        let pokemon = ctx.attacker_ident();
        ctx.emit(BattleEvent::Fail(pokemon));
        return Ok(());
    };

    let pokemon = ctx.defender_ident();
    let target = &ctx.defender.active().moves[slot];
    let move_name = target.name().to_string();
    if target.is_disabled() {
        ctx.emit(BattleEvent::AlreadyDisabled { pokemon, move_name });
        return Ok(());
    }

    let rounds = ctx.rng.below(7) as u8;
    debug!(move_name = %move_name, rounds, "disable roll");
    if rounds == 0 {
        // A zero-length disable never takes hold
        let pokemon = ctx.attacker_ident();
        ctx.emit(BattleEvent::Fail(pokemon));
        return Ok(());
    }
    ctx.defender.active_mut().moves[slot].disable(rounds);
    ctx.emit(BattleEvent::Disable { pokemon, move_name });
    Ok(())
}

pub(super) fn apply_charging_turn(
    ctx: &mut BattleContext<'_>,
    semi_invulnerable: bool,
    recharge: bool,
) -> Result<(), BattleError> {
    let pokemon = ctx.attacker_ident();
    let move_name = ctx.current_move.name.clone();
    let user = ctx.attacker.active_mut();
    if semi_invulnerable {
        user.invulnerable = !user.invulnerable;
    }

    if recharge {
        let was_recharging = user.recharging;
        user.recharging = !was_recharging;
        if was_recharging {
            ctx.attacker.unlock();
            ctx.emit(BattleEvent::MustRecharge(pokemon));
        } else {
            ctx.attacker
                .lock(ctx.current_slot, Arc::clone(&ctx.current_move));
        }
        return Ok(());
    }

    user.charging = !user.charging;
    if user.charging {
        ctx.attacker
            .lock(ctx.current_slot, Arc::clone(&ctx.current_move));
        ctx.emit(BattleEvent::Prepare { pokemon, move_name });
    } else {
        ctx.attacker.unlock();
    }
    Ok(())
}
