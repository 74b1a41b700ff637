use std::sync::Arc;

use glam::Vec2;
use winit::window::Window;

use crate::{
	canvas::Anchor,
	error::Error,
	palette::Rgb,
	shape::{ScreenUniform, ShapeBatch, ShapeBindingData, TextLine},
};

pub enum RenderStatus {
	Presented,
	Skipped,
	Fatal,
}

pub struct State {
	window: Arc<Window>,
	device: wgpu::Device,
	queue: wgpu::Queue,
	size: winit::dpi::PhysicalSize<u32>,
	surface: wgpu::Surface<'static>,
	surface_format: wgpu::TextureFormat,
	pipeline: wgpu::RenderPipeline,
	shapes: ShapeBindingData,
	title: String,
}

impl State {
	pub async fn new(window: Arc<Window>) -> Result<State, Error> {
		let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
		let surface = instance.create_surface(window.clone())?;
		let adapter = instance
			.request_adapter(&wgpu::RequestAdapterOptions {
				compatible_surface: Some(&surface),
				..Default::default()
			})
			.await?;
		log::info!("using adapter {}", adapter.get_info().name);
		let (device, queue) = adapter
			.request_device(&wgpu::DeviceDescriptor::default())
			.await?;

		let size = window.inner_size();
		let cap = surface.get_capabilities(&adapter);
		let surface_format = cap.formats[0];
		log::info!("surface format {surface_format:?}");

		let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
			label: Some("Shape Shader"),
			source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
		});

		let shapes = ShapeBindingData::new(&device);

		let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
			label: Some("Shape Pipeline Layout"),
			bind_group_layouts: &[&shapes.layout],
			push_constant_ranges: &[],
		});

		let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
			label: Some("Shape Pipeline"),
			layout: Some(&pipeline_layout),
			vertex: wgpu::VertexState {
				module: &shader,
				entry_point: Some("vs_main"),
				compilation_options: Default::default(),
				buffers: &[],
			},
			fragment: Some(wgpu::FragmentState {
				module: &shader,
				entry_point: Some("fs_main"),
				compilation_options: Default::default(),
				targets: &[Some(wgpu::ColorTargetState {
					format: surface_format.remove_srgb_suffix(),
					blend: Some(wgpu::BlendState::ALPHA_BLENDING),
					write_mask: wgpu::ColorWrites::ALL,
				})],
			}),
			primitive: Default::default(),
			multisample: Default::default(),
			depth_stencil: Default::default(),
			multiview: Default::default(),
			cache: Default::default(),
		});

		let state = State {
			window,
			device,
			queue,
			size,
			surface,
			surface_format,
			pipeline,
			shapes,
			title: String::new(),
		};

		state.configure_surface();

		Ok(state)
	}

	pub fn window(&self) -> &Window {
		&self.window
	}

	/// Window size in logical pixels, the unit the game works in.
	pub fn logical_size(&self) -> Vec2 {
		let size = self.size.to_logical::<f32>(self.window.scale_factor());
		Vec2::new(size.width, size.height)
	}

	fn configure_surface(&self) {
		if self.size.width == 0 || self.size.height == 0 {
			return;
		}
		let surface_config = wgpu::SurfaceConfiguration {
			usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
			format: self.surface_format,
			// Palette colors are sRGB bytes, so blend in sRGB space like a 2D canvas.
			view_formats: vec![self.surface_format.remove_srgb_suffix()],
			alpha_mode: wgpu::CompositeAlphaMode::Auto,
			width: self.size.width,
			height: self.size.height,
			desired_maximum_frame_latency: 3,
			present_mode: wgpu::PresentMode::Fifo,
		};
		self.surface.configure(&self.device, &surface_config);
	}

	pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
		self.size = new_size;
		self.configure_surface();
	}

	pub fn render(&mut self, batch: &ShapeBatch) -> RenderStatus {
		self.update_title(batch.lines());

		if self.size.width == 0 || self.size.height == 0 {
			return RenderStatus::Skipped;
		}

		let surface_texture = match self.surface.get_current_texture() {
			Ok(texture) => texture,
			Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
				log::warn!("surface lost, reconfiguring");
				self.configure_surface();
				return RenderStatus::Skipped;
			}
			Err(wgpu::SurfaceError::Timeout) => return RenderStatus::Skipped,
			Err(err) => {
				log::error!("cannot acquire frame: {err}");
				return RenderStatus::Fatal;
			}
		};

		let texture_view = surface_texture
			.texture
			.create_view(&wgpu::TextureViewDescriptor {
				format: Some(self.surface_format.remove_srgb_suffix()),
				..Default::default()
			});

		let shapes = batch.shapes();
		self.shapes.write(
			&self.device,
			&self.queue,
			ScreenUniform::new(self.logical_size()),
			shapes,
		);

		let mut encoder = self.device.create_command_encoder(&Default::default());

		{
			let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
				label: None,
				color_attachments: &[Some(wgpu::RenderPassColorAttachment {
					view: &texture_view,
					resolve_target: None,
					ops: wgpu::Operations {
						load: wgpu::LoadOp::Clear(Rgb::BACKGROUND.to_wgpu()),
						store: wgpu::StoreOp::Store,
					},
				})],
				depth_stencil_attachment: None,
				timestamp_writes: None,
				occlusion_query_set: None,
			});

			if !shapes.is_empty() {
				pass.set_bind_group(0, &self.shapes.bind_group, &[]);
				pass.set_pipeline(&self.pipeline);
				pass.draw(0..6, 0..shapes.len() as u32);
			}
		}

		self.queue.submit([encoder.finish()]);
		self.window.pre_present_notify();
		surface_texture.present();

		RenderStatus::Presented
	}

	fn update_title(&mut self, lines: &[TextLine]) {
		let title = title_from(lines);
		if title != self.title {
			self.window.set_title(&title);
			self.title = title;
		}
	}
}

/// No glyph rendering: the on-screen text goes to the window title,
/// left-anchored lines first.
fn title_from(lines: &[TextLine]) -> String {
	let rank = |anchor: Anchor| match anchor {
		Anchor::Center => 0,
		Anchor::TopLeft => 1,
		Anchor::TopRight => 2,
	};
	let mut sorted: Vec<_> = lines.iter().collect();
	sorted.sort_by_key(|line| rank(line.anchor));
	sorted
		.iter()
		.map(|line| line.text.as_str())
		.collect::<Vec<_>>()
		.join(" | ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::canvas::Canvas;

	#[test]
	fn title_orders_left_then_right() {
		let mut batch = ShapeBatch::default();
		batch.text("Score: -2", Anchor::TopRight);
		batch.text("Balloon Pop", Anchor::TopLeft);
		assert_eq!(title_from(batch.lines()), "Balloon Pop | Score: -2");
	}

	#[test]
	fn prompt_alone() {
		let mut batch = ShapeBatch::default();
		batch.text("Click anywhere to start", Anchor::Center);
		assert_eq!(title_from(batch.lines()), "Click anywhere to start");
		assert_eq!(title_from(&[]), "");
	}
}
