use std::{
	sync::Arc,
	time::{Duration, Instant},
};

use glam::Vec2;
use winit::{
	application::ApplicationHandler,
	dpi::{LogicalSize, PhysicalPosition},
	event::{MouseButton, TouchPhase, WindowEvent},
	event_loop::ActiveEventLoop,
	keyboard::{KeyCode, PhysicalKey},
	window::{Window, WindowId},
};

use crate::{
	audio::{PopSound, Silent, Sound},
	config::Config,
	game::{Game, PressOutcome},
	shape::ShapeBatch,
	state::{RenderStatus, State},
};

pub struct App {
	config: Config,
	running: Option<Running>,
}

struct Running {
	state: State,
	game: Game,
	sound: Box<dyn Sound>,
	cursor: Vec2,
	batch: ShapeBatch,
	presses: PressFilter,
}

/// Some platforms follow a touch with a synthesized left click. A click this
/// soon after a touch start is treated as that echo and dropped.
const TOUCH_ECHO: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct PressFilter {
	last_touch: Option<Instant>,
}

impl PressFilter {
	fn touch(&mut self, now: Instant) -> bool {
		self.last_touch = Some(now);
		true
	}

	fn mouse(&mut self, now: Instant) -> bool {
		match self.last_touch {
			Some(touched) if now.saturating_duration_since(touched) < TOUCH_ECHO => {
				self.last_touch = None;
				false
			}
			_ => true,
		}
	}
}

impl App {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			running: None,
		}
	}

	fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, crate::error::Error> {
		let mut attributes = Window::default_attributes().with_title("Balloon Pop");
		if let Some((width, height)) = self.config.window_size() {
			attributes = attributes.with_inner_size(LogicalSize::new(width, height));
		}
		let window = Arc::new(event_loop.create_window(attributes)?);

		let state = pollster::block_on(State::new(window.clone()))?;
		let game = Game::new(self.config.game_settings(), state.logical_size());
		let sound: Box<dyn Sound> = if self.config.mute {
			Box::new(Silent)
		} else {
			Box::new(PopSound::load(&self.config.sound))
		};

		window.request_redraw();

		Ok(Running {
			state,
			game,
			sound,
			cursor: Vec2::ZERO,
			batch: ShapeBatch::default(),
			presses: PressFilter::default(),
		})
	}
}

impl Running {
	fn to_logical(&self, position: PhysicalPosition<f64>) -> Vec2 {
		let position = position.to_logical::<f32>(self.state.window().scale_factor());
		Vec2::new(position.x, position.y)
	}

	fn press(&mut self, at: Vec2) {
		match self.game.press(at, self.sound.as_mut()) {
			PressOutcome::Activated => {
				log::info!("running with {} balloons", self.game.balloons().len());
			}
			PressOutcome::Popped { color, delta } => {
				log::debug!("popped {color:?} ({delta:+}), score {}", self.game.score());
			}
			PressOutcome::Missed => {}
		}
	}
}

impl ApplicationHandler for App {
	fn resumed(&mut self, event_loop: &ActiveEventLoop) {
		if self.running.is_some() {
			return;
		}
		match self.start(event_loop) {
			Ok(running) => self.running = Some(running),
			Err(err) => {
				log::error!("{err}");
				event_loop.exit();
			}
		}
	}

	fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
		let Some(running) = self.running.as_mut() else {
			return;
		};
		match event {
			WindowEvent::CloseRequested => {
				event_loop.exit();
			}
			WindowEvent::RedrawRequested => {
				running.batch.clear();
				running.game.frame(&mut running.batch);
				match running.state.render(&running.batch) {
					RenderStatus::Fatal => event_loop.exit(),
					RenderStatus::Presented | RenderStatus::Skipped => {
						running.state.window().request_redraw();
					}
				}
			}
			WindowEvent::Resized(size) => {
				running.state.resize(size);
				let viewport = running.state.logical_size();
				running.game.resize(viewport);
			}
			WindowEvent::CursorMoved { position, .. } => {
				running.cursor = running.to_logical(position);
			}
			WindowEvent::MouseInput { state, button, .. } => {
				if state.is_pressed()
					&& button == MouseButton::Left
					&& running.presses.mouse(Instant::now())
				{
					let at = running.cursor;
					running.press(at);
				}
			}
			WindowEvent::Touch(touch) => {
				if touch.phase == TouchPhase::Started && running.presses.touch(Instant::now()) {
					let at = running.to_logical(touch.location);
					running.cursor = at;
					running.press(at);
				}
			}
			WindowEvent::KeyboardInput { event, .. } => {
				if let (PhysicalKey::Code(KeyCode::Escape), true) =
					(event.physical_key, event.state.is_pressed())
				{
					event_loop.exit();
				}
			}
			_ => (),
		}
	}
}
