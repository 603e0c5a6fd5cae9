//! # Combat Resolution
//!
//! Melee resolution between the player and one enemy. This is the only code
//! that mutates health. Death is handled synchronously: a slain enemy leaves
//! the live set before the resolver returns, a slain player flips the session
//! to [`Phase::GameOver`].

use crate::game::{Entity, EntityId, FlashKind, HitEvent, MessageTone, Phase, Position, Session};
use crate::{config, DelveError, DelveResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One side of a combat exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combatant {
    Player,
    Enemy(EntityId),
}

/// What a resolved attack did, for callers and the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// Damage dealt (at least 1)
    pub damage: i32,
    /// Whether the defender died from this attack
    pub defender_died: bool,
    /// Who took the hit
    pub defender: Combatant,
    /// Cell the hit landed on
    pub position: Position,
}

/// Rolls attack damage: base power with a small random swing, floored at 1
/// so every landed attack deals something.
fn roll_damage(attack: i32, rng: &mut StdRng) -> i32 {
    let swing = rng.gen_range(0..=2);
    (attack + swing - 1).max(1)
}

/// Resolves one attack between the player and an enemy.
///
/// The only supported pairings are player-versus-enemy and
/// enemy-versus-player; enemies never fight each other.
pub fn resolve(
    session: &mut Session,
    attacker: Combatant,
    defender: Combatant,
) -> DelveResult<CombatOutcome> {
    match (attacker, defender) {
        (Combatant::Player, Combatant::Enemy(id)) => resolve_player_attack(session, id),
        (Combatant::Enemy(id), Combatant::Player) => resolve_enemy_attack(session, id),
        _ => Err(DelveError::InvalidAction(
            "combat requires the player on exactly one side".to_string(),
        )),
    }
}

fn resolve_player_attack(session: &mut Session, id: EntityId) -> DelveResult<CombatOutcome> {
    let idx = session
        .enemies
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| DelveError::InvalidState(format!("no live enemy with id {id}")))?;

    let damage = roll_damage(session.player.attack, &mut session.rng);
    let (position, name, died) = {
        let enemy = &mut session.enemies[idx];
        enemy.hp -= damage;
        (enemy.position(), enemy.kind.display_name(), !enemy.is_alive())
    };

    session.log.push(
        format!("You hit the {} for {damage} damage.", name.to_lowercase()),
        MessageTone::Good,
    );
    session.pending_hits.push(HitEvent {
        position,
        kind: FlashKind::Hit,
    });

    if died {
        let reward = session
            .rng
            .gen_range(config::GOLD_REWARD_MIN..=config::GOLD_REWARD_MAX);
        session.player.gold += reward;
        session.enemies.remove(idx);
        session.log.push(
            format!("The {} dies. You loot {reward} gold.", name.to_lowercase()),
            MessageTone::Notice,
        );
    }

    Ok(CombatOutcome {
        damage,
        defender_died: died,
        defender: Combatant::Enemy(id),
        position,
    })
}

fn resolve_enemy_attack(session: &mut Session, id: EntityId) -> DelveResult<CombatOutcome> {
    let enemy = session
        .enemies
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| DelveError::InvalidState(format!("no live enemy with id {id}")))?;
    let attack = enemy.attack;
    let name = enemy.kind.display_name().to_lowercase();

    let damage = roll_damage(attack, &mut session.rng);
    session.player.hp -= damage;
    let position = session.player.position();

    session.log.push(
        format!("The {name} hits you for {damage} damage."),
        MessageTone::Bad,
    );
    session.pending_hits.push(HitEvent {
        position,
        kind: FlashKind::Hit,
    });

    let died = !session.player.is_alive();
    if died {
        session.phase = Phase::GameOver;
        session
            .log
            .push("You died. Press R to restart.", MessageTone::Bad);
        log::info!("player died on level {}", session.level);
    }

    Ok(CombatOutcome {
        damage,
        defender_died: died,
        defender: Combatant::Player,
        position,
    })
}
