use app::App;
use clap::Parser;
use config::Config;
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod audio;
mod balloon;
mod canvas;
mod config;
mod error;
mod game;
mod noise;
mod palette;
mod particle;
mod shape;
mod state;

fn main() -> Result<(), error::Error> {
	env_logger::init();

	let config = Config::parse();
	log::info!("{config:?}");

	let event_loop = EventLoop::new()?;
	event_loop.set_control_flow(ControlFlow::Poll);

	let mut app = App::new(config);
	event_loop.run_app(&mut app)?;
	Ok(())
}
