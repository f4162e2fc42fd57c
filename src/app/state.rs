use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use crossterm::event::Event;
use glam::Vec2;
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, FrameHandle, ResizeDebouncer, start_frame_task},
        settings::{RuntimeSettings, save_runtime_settings},
    },
    paint::raster::PixelCanvas,
    scene::{Engine, MotionSetting},
    ui::{color::ColorCapability, viewport_for},
};

mod input;

pub use input::Command;
pub(crate) use input::command_for;

const FPS_SMOOTHING: f32 = 0.1;

#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub settings: RuntimeSettings,
    pub color: ColorCapability,
    pub cells: (u16, u16),
    pub fps_estimate: f32,
    engine: Option<Engine<PixelCanvas>>,
    settings_path: Option<PathBuf>,
    seed: Option<u64>,
    frame: Option<FrameHandle>,
    frame_generation: u64,
    debouncer: ResizeDebouncer,
    last_frame_at: Option<Instant>,
}

impl AppState {
    pub fn new(
        settings: RuntimeSettings,
        settings_path: Option<PathBuf>,
        color: ColorCapability,
        seed: Option<u64>,
    ) -> Self {
        Self {
            running: true,
            settings,
            color,
            cells: (0, 0),
            fps_estimate: 0.0,
            engine: None,
            settings_path,
            seed,
            frame: None,
            frame_generation: 0,
            debouncer: ResizeDebouncer::default(),
            last_frame_at: None,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                let (width, height) =
                    crossterm::terminal::size().context("reading terminal size failed")?;
                self.apply_size(width, height, tx)?;
            }
            AppEvent::TickFrame(generation) => self.on_frame(generation)?,
            AppEvent::Input(Event::Resize(width, height)) => {
                self.debouncer.schedule(tx, width, height);
            }
            AppEvent::Input(Event::Key(key)) => {
                if let Some(command) = command_for(key) {
                    self.run_command(command, tx)?;
                }
            }
            AppEvent::Input(_) => {}
            AppEvent::ResizeSettled {
                generation,
                width,
                height,
            } => {
                if self.debouncer.settle(generation) {
                    info!("resize settled at {width}x{height} cells");
                    self.apply_size(width, height, tx)?;
                }
            }
            AppEvent::Quit => self.shutdown(),
        }
        Ok(())
    }

    pub fn run_command(&mut self, command: Command, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match command {
            Command::Quit => self.shutdown(),
            Command::TogglePause => {
                let Some(engine) = self.engine.as_mut() else {
                    return Ok(());
                };
                if engine.toggle_pause() {
                    self.stop_frames();
                } else {
                    self.start_frames(tx);
                }
            }
            Command::Regrow => {
                let (width, height) = self.cells;
                self.apply_size(width, height, tx)?;
            }
            Command::CycleMotion => {
                let motion = self.settings.motion.next();
                self.settings.motion = motion;
                self.persist_settings();
                if let Some(engine) = self.engine.as_mut() {
                    engine.set_motion(motion);
                    engine.render().context("rendering frame failed")?;
                    self.start_frames(tx);
                }
            }
            Command::ToggleHud => {
                self.settings.hud = !self.settings.hud;
                self.persist_settings();
            }
        }
        Ok(())
    }

    pub fn apply_size(&mut self, width: u16, height: u16, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        self.cells = (width, height);
        self.stop_frames();
        if width == 0 || height == 0 {
            debug!("terminal reports {width}x{height}, deferring layout");
            return Ok(());
        }

        let (viewport, device_scale) = viewport_for(width, height);
        match self.engine.as_mut() {
            Some(engine) => engine.rebuild(viewport, device_scale),
            None => self.engine = Some(self.start_engine(viewport, device_scale)?),
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.render().context("rendering frame failed")?;
        }
        self.start_frames(tx);
        Ok(())
    }

    fn start_engine(&self, viewport: Vec2, device_scale: f32) -> Result<Engine<PixelCanvas>> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Engine::start(
            PixelCanvas::new(viewport, device_scale),
            viewport,
            device_scale,
            self.settings.motion,
            rng,
        )
        .context("starting animation engine failed")
    }

    fn on_frame(&mut self, generation: u64) -> Result<()> {
        if generation != self.frame_generation || self.frame.is_none() {
            return Ok(());
        }
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };

        let now = Instant::now();
        let frame_time = 1.0 / f32::from(self.settings.fps.max(1));
        let dt = self
            .last_frame_at
            .map_or(frame_time, |last| now.duration_since(last).as_secs_f32());
        self.last_frame_at = Some(now);
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps_estimate = if self.fps_estimate <= 0.0 {
                instant
            } else {
                self.fps_estimate * (1.0 - FPS_SMOOTHING) + instant * FPS_SMOOTHING
            };
        }

        engine.advance(std::time::Duration::from_secs_f32(dt));
        engine.render().context("rendering frame failed")
    }

    fn start_frames(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.stop_frames();
        let still = self.settings.motion == MotionSetting::Off
            || self.engine.as_ref().is_none_or(Engine::is_paused);
        if still {
            return;
        }
        self.frame_generation = self.frame_generation.wrapping_add(1);
        self.frame = Some(start_frame_task(
            tx.clone(),
            self.settings.fps,
            self.frame_generation,
        ));
    }

    fn stop_frames(&mut self) {
        if let Some(mut frame) = self.frame.take() {
            frame.cancel();
        }
        self.last_frame_at = None;
    }

    pub fn shutdown(&mut self) {
        if self.running {
            info!("shutting down");
        }
        self.stop_frames();
        self.debouncer.cancel();
        self.running = false;
    }

    pub(crate) fn persist_settings(&self) {
        if let Some(path) = &self.settings_path
            && let Err(err) = save_runtime_settings(path, &self.settings)
        {
            warn!("failed to save settings: {err:#}");
        }
    }

    #[must_use]
    pub fn engine(&self) -> Option<&Engine<PixelCanvas>> {
        self.engine.as_ref()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.frame.as_ref().is_some_and(FrameHandle::is_running)
    }

    #[must_use]
    pub fn frame_generation(&self) -> u64 {
        self.frame_generation
    }

    #[must_use]
    pub fn resize_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
