use marquee_engine::{
    AssetManifest, ControlMap, FixedTimestep, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer, RenderContext, StageConfig, StageContext, StageEvent, Theme,
};

/// Generic director that wires a theme into the frame loop.
///
/// Each concrete frontend (e.g., `shelf-demo`) creates a `thread_local!` Director
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct Director<T: Theme> {
    theme: T,
    ctx: StageContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: StageConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<f32>,
    texts_json: String,
}

impl<T: Theme> Director<T> {
    pub fn new(theme: T) -> Self {
        let config = theme.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            theme,
            ctx: StageContext::new(&config),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            initialized: false,
            sound_buffer,
            texts_json: String::from("[]"),
        }
    }

    /// Initialize the theme. Call once after construction.
    pub fn init(&mut self) {
        self.theme.init(&mut self.ctx);
        self.initialized = true;
        log::info!("director: scene holds {} entities", self.ctx.scene.len());
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: step the theme and scene, then rebuild the render buffer.
    pub fn tick(&mut self, frame_dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Pending input is seen by the first step only
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.theme.update(&mut self.ctx, &self.input);
            self.input.drain();
            self.ctx.scene.update(self.timestep.dt());
        }

        self.ctx.scene.draw(&mut self.render_buffer);

        // Allow theme to add custom render commands
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                scene: &self.ctx.scene,
            };
            self.theme.render(&mut render_ctx);
        }

        self.texts_json = match self.render_buffer.texts_json() {
            Ok(json) => json,
            Err(err) => {
                log::warn!("director: text table not serialized: {}", err);
                String::from("[]")
            }
        };

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as f32);
        }
    }

    /// Replace the loaded assets and rebuild the scene.
    pub fn load_manifest(&mut self, json: &str) {
        let loaded = AssetManifest::from_json(json).and_then(|m| self.ctx.load_manifest(&m));
        match loaded {
            Ok(()) => {
                self.ctx.scene.stop();
                self.theme.init(&mut self.ctx);
                self.initialized = true;
            }
            Err(err) => log::warn!("director: manifest rejected: {}", err),
        }
    }

    /// Replace the control map. Actions the JSON leaves out keep their defaults.
    pub fn load_controls(&mut self, json: &str) {
        match ControlMap::from_json(json) {
            Ok(controls) => self.ctx.controls = controls,
            Err(err) => log::warn!("director: control map rejected: {}", err),
        }
    }

    /// The host window changed size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.window_width = width;
        self.config.window_height = height;
        self.ctx.resize(self.config.window());
    }

    pub fn theme(&self) -> &T {
        &self.theme
    }

    pub fn context(&self) -> &StageContext {
        &self.ctx
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn dropped_instances(&self) -> u32 {
        self.render_buffer.dropped() as u32
    }

    pub fn texts_json(&self) -> String {
        self.texts_json.clone()
    }

    pub fn sound_events_ptr(&self) -> *const f32 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn stage_events(&self) -> &[StageEvent] {
        let len = self.ctx.events.len().min(self.layout.max_events);
        &self.ctx.events[..len]
    }

    pub fn stage_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn stage_events_len(&self) -> u32 {
        self.stage_events().len() as u32
    }

    pub fn window_width(&self) -> f32 {
        self.config.window_width
    }

    pub fn window_height(&self) -> f32 {
        self.config.window_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
