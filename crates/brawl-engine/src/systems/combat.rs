//! Gameplay hit resolution between the player and the level's enemies.
//!
//! This is separate from rigid-body contacts: bodies keep actors from
//! overlapping, while damage is decided here from display bounds and timers.

use crate::api::context::EngineContext;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::core::time::Countdown;
use crate::game::level::Level;
use crate::game::player::Player;

/// Deal `damage` from an enemy to the player, unless the player is still
/// reeling from the previous hit. A landed hit starts the input lockout.
/// Returns the health removed.
pub fn strike_player(
    player: &mut Player,
    damage: i32,
    lockout: &mut Countdown,
    lockout_duration: f32,
    ctx: &mut EngineContext,
) -> i32 {
    if damage <= 0 || player.is_hurt() || !player.is_alive() {
        return 0;
    }
    let dealt = player.take_damage(damage);
    if dealt > 0 {
        lockout.start(lockout_duration);
        ctx.emit_sound(SoundEvent::PLAYER_HURT);
        ctx.emit_event(GameEvent::new(
            GameEvent::PLAYER_HEALTH,
            player.actor.health() as f32,
            player.actor.max_health() as f32,
            0.0,
        ));
        log::debug!("player took {} damage, {} left", dealt, player.actor.health());
    }
    dealt
}

/// Contact damage: the closest enemy within `contact_radius` whose bounds
/// overlap the player's gets a swing, gated by its own cooldown and by the
/// input lockout. Returns the health removed.
pub fn resolve_contacts(
    player: &mut Player,
    level: &mut Level,
    contact_radius: f32,
    lockout: &mut Countdown,
    lockout_duration: f32,
    ctx: &mut EngineContext,
) -> i32 {
    if !player.is_alive() || player.is_hurt() || lockout.is_running() {
        return 0;
    }
    let player_bounds = player.actor.bounds();
    let Some(enemy) = level.closest_enemy_mut(player.actor.pos, contact_radius) else {
        return 0;
    };
    if !enemy.actor.bounds().intersects(&player_bounds) {
        return 0;
    }
    let damage = enemy.try_attack();
    strike_player(player, damage, lockout, lockout_duration, ctx)
}

/// Resolve a player swing against the closest living enemy in reach.
/// Returns the enemy hit and the damage dealt.
pub fn resolve_player_attack(
    player: &Player,
    level: &mut Level,
    ctx: &mut EngineContext,
) -> Option<(EntityId, i32)> {
    let tuning = player.tuning();
    let enemy = level.closest_enemy_mut(player.actor.pos, tuning.attack_range)?;
    let dealt = enemy.take_damage(tuning.attack_damage);
    if dealt == 0 {
        return None;
    }
    ctx.emit_sound(SoundEvent::HIT);
    Some((enemy.id(), dealt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::PlayerTuning;
    use crate::core::geometry::Rect;
    use crate::core::physics::PhysicsWorld;
    use crate::game::enemy::EnemyKind;
    use crate::game::layouts::{LevelLayout, SpawnSpec};
    use glam::Vec2;

    const CONTACT: f32 = 80.0;

    /// Body-less world with one grunt spawned at `enemy_x`.
    fn setup(enemy_x: f32) -> (EngineContext, Level, Player) {
        let mut ctx = EngineContext::with_physics(PhysicsWorld::unavailable());
        let layout = LevelLayout {
            name: "Arena".into(),
            bounds: Rect::new(0.0, 0.0, 1000.0, 600.0),
            player_spawn: Vec2::new(100.0, 500.0),
            spawns: vec![SpawnSpec {
                position: Vec2::new(enemy_x, 500.0),
                kind: EnemyKind::Grunt,
                time: 0.0,
            }],
            obstacles: Vec::new(),
        };
        let mut level = Level::new(1, layout);
        level.load_level(&mut ctx).unwrap();
        // Spawn without letting the AI see the player.
        level.update(&mut ctx, 0.0, Vec2::new(-10_000.0, 0.0));
        let id = ctx.next_id();
        let pos = Vec2::new(100.0, 500.0);
        let player = Player::spawn(id, pos, PlayerTuning::default(), &mut ctx.physics);
        (ctx, level, player)
    }

    fn contact(
        player: &mut Player,
        level: &mut Level,
        cooldown: &mut Countdown,
        ctx: &mut EngineContext,
    ) -> i32 {
        resolve_contacts(player, level, CONTACT, cooldown, 0.5, ctx)
    }

    #[test]
    fn overlapping_enemy_deals_contact_damage_once() {
        let (mut ctx, mut level, mut player) = setup(130.0);
        let mut cooldown = Countdown::idle();
        let dealt = contact(&mut player, &mut level, &mut cooldown, &mut ctx);
        assert_eq!(dealt, EnemyKind::Grunt.profile().damage);
        assert!(cooldown.is_running());
        assert!(player.is_hurt());
        assert!(ctx.sounds.contains(&SoundEvent::PLAYER_HURT));

        // Next frame: hurt window and cooldown both block.
        let again = contact(&mut player, &mut level, &mut cooldown, &mut ctx);
        assert_eq!(again, 0);
    }

    #[test]
    fn near_but_not_touching_is_harmless() {
        // Inside the contact radius, but the boxes are apart.
        let (mut ctx, mut level, mut player) = setup(175.0);
        let mut cooldown = Countdown::idle();
        let dealt = contact(&mut player, &mut level, &mut cooldown, &mut ctx);
        assert_eq!(dealt, 0);
        assert!(!cooldown.is_running());
    }

    #[test]
    fn running_input_cooldown_blocks_contact() {
        let (mut ctx, mut level, mut player) = setup(130.0);
        let mut cooldown = Countdown::idle();
        cooldown.start(0.2);
        assert_eq!(contact(&mut player, &mut level, &mut cooldown, &mut ctx), 0);
        assert_eq!(player.actor.health(), player.actor.max_health());
    }

    #[test]
    fn strike_respects_hurt_window() {
        let (mut ctx, _level, mut player) = setup(500.0);
        let mut lockout = Countdown::idle();
        assert_eq!(strike_player(&mut player, 10, &mut lockout, 0.5, &mut ctx), 10);
        assert_eq!(strike_player(&mut player, 10, &mut lockout, 0.5, &mut ctx), 0);
        assert_eq!(player.actor.health(), 90);
    }

    #[test]
    fn landed_strike_starts_lockout() {
        let (mut ctx, _level, mut player) = setup(500.0);
        let mut lockout = Countdown::idle();
        assert_eq!(strike_player(&mut player, 0, &mut lockout, 2.0, &mut ctx), 0);
        assert!(!lockout.is_running());
        strike_player(&mut player, 10, &mut lockout, 2.0, &mut ctx);
        assert!((lockout.remaining() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn swing_hits_closest_enemy_in_reach() {
        let (mut ctx, mut level, player) = setup(160.0);
        let hit = resolve_player_attack(&player, &mut level, &mut ctx);
        let damage = player.tuning().attack_damage;
        assert!(matches!(hit, Some((_, d)) if d == damage));
        let enemy = level.roster().iter().next().unwrap();
        assert_eq!(enemy.actor.health(), enemy.profile.health - damage);
    }

    #[test]
    fn swing_misses_out_of_reach() {
        let (mut ctx, mut level, player) = setup(400.0);
        assert!(resolve_player_attack(&player, &mut level, &mut ctx).is_none());
    }
}
