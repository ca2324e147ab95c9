use crate::assets::manifest::SpriteManifest;
use crate::components::actor::Facing;
use crate::game::layouts::ObstacleKind;
use crate::game::level::Level;
use crate::game::player::Player;
use crate::game::session::{GameSession, GameState};
use crate::renderer::camera::Camera2D;
use crate::renderer::traits::{DrawLayer, DrawSurface, HudSnapshot, Overlay, OverlayKind, Quad};

/// Everything a frame is drawn from, borrowed from the director.
pub struct FrameView<'a> {
    pub session: &'a GameSession,
    pub level: Option<&'a Level>,
    pub player: Option<&'a Player>,
    pub camera: &'a Camera2D,
}

/// Overlay shown for `state`, if any.
pub fn overlay_for(state: GameState) -> Option<Overlay> {
    let (kind, dim) = match state {
        GameState::Playing => return None,
        GameState::Menu => (OverlayKind::Title, 1.0),
        GameState::Paused => (OverlayKind::Paused, 0.5),
        GameState::LevelCompleted => (OverlayKind::LevelComplete, 0.4),
        GameState::GameOver => (OverlayKind::GameOver, 0.8),
        GameState::Victory => (OverlayKind::Victory, 0.8),
    };
    Some(Overlay { kind, dim })
}

pub fn hud_snapshot(view: &FrameView) -> HudSnapshot {
    let mut hud = HudSnapshot {
        score: view.session.score,
        level: view.session.ordinal(),
        play_time: view.session.play_time,
        ..HudSnapshot::default()
    };
    if let Some(player) = view.player {
        hud.health = player.actor.health();
        hud.max_health = player.actor.max_health();
    }
    if let Some(level) = view.level {
        hud.enemies_total = level.total_enemies();
        hud.enemies_left = level.total_enemies().saturating_sub(level.enemies_killed());
        hud.level_time = level.elapsed();
    }
    hud
}

/// Draw one frame. Menu draws only its overlay; the in-level states draw the
/// world and HUD, with Paused and LevelCompleted adding an overlay on top.
pub fn render_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    view: &FrameView,
    manifest: &mut SpriteManifest,
) {
    let state = view.session.state;
    if state.shows_world() {
        surface.begin(view.camera.origin());
        if let Some(level) = view.level {
            draw_level(surface, level, view.camera, manifest);
        }
        if let Some(player) = view.player {
            draw_player(surface, player, manifest);
        }
        surface.draw_hud(&hud_snapshot(view));
    } else {
        surface.begin(glam::Vec2::ZERO);
        if state != GameState::Menu {
            surface.draw_hud(&hud_snapshot(view));
        }
    }
    if let Some(overlay) = overlay_for(state) {
        surface.draw_overlay(overlay);
    }
}

fn draw_level<S: DrawSurface + ?Sized>(
    surface: &mut S,
    level: &Level,
    camera: &Camera2D,
    manifest: &mut SpriteManifest,
) {
    for obstacle in level.obstacles() {
        if !camera.is_rect_visible(&obstacle.rect) {
            continue;
        }
        let key = match obstacle.kind {
            ObstacleKind::Platform => "platform",
            ObstacleKind::Wall => "wall",
        };
        let fill = manifest.resolve(key, None);
        surface.draw_quad(Quad::new(obstacle.rect, fill, DrawLayer::Terrain));
    }

    for enemy in level.roster().iter() {
        let bounds = enemy.actor.bounds();
        if !camera.is_rect_visible(&bounds) {
            continue;
        }
        let fill = manifest.resolve(enemy.kind.visual_key(), enemy.frame());
        let alpha = if enemy.is_flashing() { 0.5 } else { 1.0 };
        surface.draw_quad(
            Quad::new(bounds, fill, DrawLayer::Actors)
                .flipped(enemy.actor.facing == Facing::Left)
                .with_alpha(alpha),
        );
    }
}

fn draw_player<S: DrawSurface + ?Sized>(
    surface: &mut S,
    player: &Player,
    manifest: &mut SpriteManifest,
) {
    let fill = manifest.resolve("player", player.frame());
    let alpha = if player.is_hurt() { 0.6 } else { 1.0 };
    surface.draw_quad(
        Quad::new(player.actor.bounds(), fill, DrawLayer::Player)
            .flipped(player.actor.facing == Facing::Left)
            .with_alpha(alpha),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::PlayerTuning;
    use crate::api::context::EngineContext;
    use crate::api::types::EntityId;
    use crate::core::physics::PhysicsWorld;
    use crate::game::layouts::LevelLayout;
    use glam::Vec2;

    /// Records draw calls instead of drawing.
    #[derive(Default)]
    struct Recorder {
        quads: Vec<Quad>,
        overlays: Vec<Overlay>,
        huds: Vec<HudSnapshot>,
    }

    impl DrawSurface for Recorder {
        fn begin(&mut self, _origin: Vec2) {}
        fn draw_quad(&mut self, quad: Quad) {
            self.quads.push(quad);
        }
        fn draw_overlay(&mut self, overlay: Overlay) {
            self.overlays.push(overlay);
        }
        fn draw_hud(&mut self, hud: &HudSnapshot) {
            self.huds.push(*hud);
        }
    }

    fn scene() -> (Level, Player, Camera2D) {
        let mut ctx = EngineContext::with_physics(PhysicsWorld::unavailable());
        let mut level = Level::new(1, LevelLayout::builtin(1));
        level.load_level(&mut ctx).unwrap();
        let player = Player::new(EntityId(999), level.player_spawn(), PlayerTuning::default());
        let mut camera = Camera2D::new(1280.0, 720.0);
        camera.set_bounds(level.bounds());
        camera.look_at(player.actor.pos);
        (level, player, camera)
    }

    fn render(state: GameState) -> Recorder {
        let (level, player, camera) = scene();
        let mut session = GameSession::new();
        session.state = state;
        let view = FrameView {
            session: &session,
            level: Some(&level),
            player: Some(&player),
            camera: &camera,
        };
        let mut rec = Recorder::default();
        render_frame(&mut rec, &view, &mut SpriteManifest::new());
        rec
    }

    #[test]
    fn playing_draws_world_and_hud_without_overlay() {
        let rec = render(GameState::Playing);
        assert!(rec.quads.iter().any(|q| q.layer == DrawLayer::Player));
        assert!(rec.quads.iter().any(|q| q.layer == DrawLayer::Terrain));
        assert_eq!(rec.huds.len(), 1);
        assert_eq!(rec.huds[0].health, 100);
        assert!(rec.overlays.is_empty());
    }

    #[test]
    fn paused_draws_world_under_overlay() {
        let rec = render(GameState::Paused);
        assert!(!rec.quads.is_empty());
        assert_eq!(rec.overlays.len(), 1);
        assert_eq!(rec.overlays[0].kind, OverlayKind::Paused);
    }

    #[test]
    fn menu_draws_only_the_title() {
        let rec = render(GameState::Menu);
        assert!(rec.quads.is_empty());
        assert!(rec.huds.is_empty());
        assert_eq!(rec.overlays[0].kind, OverlayKind::Title);
    }

    #[test]
    fn game_over_keeps_hud_for_final_score() {
        let rec = render(GameState::GameOver);
        assert!(rec.quads.is_empty());
        assert_eq!(rec.huds.len(), 1);
        assert_eq!(rec.overlays[0].kind, OverlayKind::GameOver);
    }

    #[test]
    fn offscreen_geometry_is_culled() {
        let (level, _, camera) = scene();
        let visible = level
            .obstacles()
            .iter()
            .filter(|o| camera.is_rect_visible(&o.rect))
            .count();
        let rec = render(GameState::Playing);
        let terrain = rec.quads.iter().filter(|q| q.layer == DrawLayer::Terrain).count();
        assert_eq!(terrain, visible);
        assert!(visible < level.obstacles().len());
    }
}
