use brawl_engine::{
    Action, FramePacket, GameConfig, GameDirector, GameError, InputEvent, InputQueue, InputState,
    LevelTable, MusicTrack, ProtocolLayout, RenderBuffer, SpriteManifest,
};

/// Wires the director to the browser loop.
///
/// The wasm exports keep one runner in a `thread_local!`, because
/// wasm-bindgen cannot export a struct that owns the whole engine.
/// Each tick packs a complete frame into `buffer`, which JS reads
/// through `buffer_ptr()`.
pub struct GameRunner {
    director: GameDirector,
    input: InputQueue,
    state: InputState,
    render: RenderBuffer,
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    frame_counter: u32,
}

impl GameRunner {
    pub fn new(config: GameConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let render = RenderBuffer::with_capacity(config.max_instances);
        let buffer = layout.alloc();
        Self {
            director: GameDirector::new(config),
            input: InputQueue::new(),
            state: InputState::new(),
            render,
            layout,
            buffer,
            frame_counter: 0,
        }
    }

    /// Build from a JSON config; an empty string means defaults.
    pub fn from_json(config_json: &str) -> Result<Self, GameError> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)?
        };
        Ok(Self::new(config))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fold input, advance the director, draw, pack.
    pub fn tick(&mut self, dt: f32) {
        self.input.flush(&mut self.state, &self.director.config().bindings);

        self.director.frame(dt, &self.state);

        self.director.render(&mut self.render);
        self.render.finish();

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.pack();
    }

    fn pack(&mut self) {
        let world_size = match self.director.level() {
            Some(level) => {
                let size = level.bounds().size;
                (size.x, size.y)
            }
            None => {
                let config = self.director.config();
                (config.world_width, config.world_height)
            }
        };
        let mixer = self.director.mixer();
        let ctx = self.director.context();
        let packet = FramePacket {
            frame_counter: self.frame_counter,
            state: self.director.state(),
            world_size,
            music: (mixer.volume(MusicTrack::Menu), mixer.volume(MusicTrack::Gameplay)),
            render: &self.render,
            sounds: &ctx.sounds,
            events: &ctx.events,
        };
        self.layout.write(&packet, &mut self.buffer);
    }

    pub fn load_manifest(&mut self, json: &str) -> Result<(), GameError> {
        let manifest = SpriteManifest::from_json(json)?;
        log::info!("sprite manifest loaded: {} sprites", manifest.sprites.len());
        self.director.set_manifest(manifest);
        Ok(())
    }

    pub fn load_levels(&mut self, json: &str) -> Result<(), GameError> {
        let table = LevelTable::from_json(json)?;
        self.director.set_layouts(table);
        log::info!("level layouts loaded");
        Ok(())
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.director.mixer_mut().set_master(volume);
    }

    /// Press and release `action` on the next tick, for touch buttons.
    pub fn tap(&mut self, action: Action) {
        self.input.push(InputEvent::Action { action, down: true });
        self.input.push(InputEvent::Action { action, down: false });
    }

    pub fn director(&self) -> &GameDirector {
        &self.director
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_engine::bridge::protocol::{
        HEADER_FRAME_COUNTER, HEADER_GAME_STATE, HEADER_INSTANCE_COUNT,
    };
    use brawl_engine::GameState;

    const ENTER: u32 = 13;

    #[test]
    fn first_tick_packs_the_menu() {
        let mut runner = GameRunner::new(GameConfig::default());
        runner.tick(1.0 / 60.0);
        let buf = runner.buffer();
        assert_eq!(buf[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(buf[HEADER_GAME_STATE], GameState::Menu.code() as f32);
        assert_eq!(buf[HEADER_INSTANCE_COUNT], 0.0);
    }

    #[test]
    fn enter_starts_the_first_level() {
        let mut runner = GameRunner::new(GameConfig::default());
        runner.push_input(InputEvent::KeyDown { key_code: ENTER });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.director().state(), GameState::Playing);

        runner.push_input(InputEvent::KeyUp { key_code: ENTER });
        runner.tick(1.0 / 60.0);
        let buf = runner.buffer();
        assert_eq!(buf[HEADER_GAME_STATE], GameState::Playing.code() as f32);
        assert!(buf[HEADER_INSTANCE_COUNT] > 0.0);
    }

    #[test]
    fn tapped_action_is_a_single_press() {
        let mut runner = GameRunner::new(GameConfig::default());
        runner.tap(Action::Confirm);
        runner.tick(1.0 / 60.0);
        runner.tap(Action::Pause);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.director().state(), GameState::Paused);
    }

    #[test]
    fn empty_config_json_uses_defaults() {
        let runner = GameRunner::from_json("").unwrap();
        assert_eq!(runner.director().config().max_instances, 512);
        assert!(GameRunner::from_json("{ not json").is_err());
    }

    #[test]
    fn bad_manifest_is_reported() {
        let mut runner = GameRunner::new(GameConfig::default());
        assert!(runner.load_manifest("[]").is_err());
        assert!(runner.load_levels("{}").is_err());
    }
}
