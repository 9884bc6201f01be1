//! Effects that move the user's own HP

use stadium_protocol::BattleEvent;

use crate::engine::BattleContext;
use crate::error::BattleError;

/// Percent of the last damage dealt, or `None` when nothing was dealt
fn share_of_last_damage(ctx: &BattleContext<'_>, percent: u8) -> Option<u32> {
    let dealt = ctx.last_damage.filter(|&d| d > 0)?;
    Some(dealt * percent as u32 / 100).filter(|&share| share > 0)
}

fn report_full_hp(ctx: &mut BattleContext<'_>) -> bool {
    if !ctx.attacker.active().is_full_hp() {
        return false;
    }
    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::HpFull(pokemon));
    true
}

pub(super) fn apply_recoil(ctx: &mut BattleContext<'_>, percent: u8) -> Result<(), BattleError> {
    let Some(recoil) = share_of_last_damage(ctx, percent) else {
        return Ok(());
    };

    let amount = ctx.rules.damage_overflow.narrow(recoil);
    let user = ctx.attacker.active_mut();
    let taken = user.take_damage(amount);
    let (hp, fainted) = (user.hp(), user.is_fainted());

    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::Recoil {
        pokemon: pokemon.clone(),
        amount: taken,
        hp,
    });
    if fainted {
        ctx.emit(BattleEvent::Faint(pokemon));
    }
    Ok(())
}

pub(super) fn apply_drain(ctx: &mut BattleContext<'_>, percent: u8) -> Result<(), BattleError> {
    if report_full_hp(ctx) {
        return Ok(());
    }
    let Some(heal) = share_of_last_damage(ctx, percent) else {
        return Ok(());
    };

    let user = ctx.attacker.active_mut();
    let restored = user.restore_hp(heal.min(u16::MAX as u32) as u16);
    let hp = user.hp();
    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::Drain {
        pokemon,
        amount: restored,
        hp,
    });
    Ok(())
}

pub(super) fn apply_recover(ctx: &mut BattleContext<'_>, percent: u8) -> Result<(), BattleError> {
    if report_full_hp(ctx) {
        return Ok(());
    }

    let user = ctx.attacker.active_mut();
    let heal = user.max_hp() as u32 * percent as u32 / 100;
    let restored = user.restore_hp(heal.min(u16::MAX as u32) as u16);
    let hp = user.hp();
    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::Heal {
        pokemon,
        amount: restored,
        hp,
    });
    Ok(())
}

pub(super) fn apply_selfdestruct(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    if ctx.attacker.active().is_fainted() {
        return Ok(());
    }
    ctx.attacker.active_mut().faint();
    let pokemon = ctx.attacker_ident();
    ctx.emit(BattleEvent::Faint(pokemon));
    Ok(())
}
