use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::canvas::{Anchor, Canvas};

const KIND_CIRCLE: u32 = 0;
const KIND_SQUARE: u32 = 1;
const MIN_CAPACITY: usize = 256;

/// One instanced quad. Layout matches `Shape` in `shader.wgsl`.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Shape {
	center: [f32; 2],
	half_size: f32,
	kind: u32,
	color: [f32; 4],
}

#[cfg(test)]
impl Shape {
	pub fn center(&self) -> Vec2 {
		Vec2::from_array(self.center)
	}
	pub fn half_size(&self) -> f32 {
		self.half_size
	}
	pub fn is_circle(&self) -> bool {
		self.kind == KIND_CIRCLE
	}
	pub fn color(&self) -> [f32; 4] {
		self.color
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
	pub text: String,
	pub anchor: Anchor,
}

/// A frame's worth of draw calls, in submission order.
#[derive(Debug, Default)]
pub struct ShapeBatch {
	shapes: Vec<Shape>,
	text: Vec<TextLine>,
}

impl ShapeBatch {
	pub fn shapes(&self) -> &[Shape] {
		&self.shapes
	}

	pub fn lines(&self) -> &[TextLine] {
		&self.text
	}

	pub fn clear(&mut self) {
		self.shapes.clear();
		self.text.clear();
	}
}

impl Canvas for ShapeBatch {
	fn fill_circle(&mut self, center: Vec2, diameter: f32, color: [f32; 4]) {
		self.shapes.push(Shape {
			center: center.to_array(),
			half_size: diameter / 2.0,
			kind: KIND_CIRCLE,
			color,
		});
	}

	fn fill_square(&mut self, center: Vec2, side: f32, color: [f32; 4]) {
		self.shapes.push(Shape {
			center: center.to_array(),
			half_size: side / 2.0,
			kind: KIND_SQUARE,
			color,
		});
	}

	fn text(&mut self, text: &str, anchor: Anchor) {
		self.text.push(TextLine {
			text: text.to_owned(),
			anchor,
		});
	}
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenUniform {
	size: [f32; 2],
}

impl ScreenUniform {
	pub fn new(logical_size: Vec2) -> Self {
		Self {
			size: logical_size.to_array(),
		}
	}
	pub fn bytes(&self) -> &[u8] {
		bytemuck::bytes_of(self)
	}
}

/// GPU side of the batch: screen uniform plus a growable instance buffer.
pub struct ShapeBindingData {
	pub layout: wgpu::BindGroupLayout,
	pub bind_group: wgpu::BindGroup,
	screen_buffer: wgpu::Buffer,
	shapes_buffer: wgpu::Buffer,
	capacity: usize,
}

impl ShapeBindingData {
	pub fn new(device: &wgpu::Device) -> Self {
		let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
			label: Some("Shapes Bind Group Layout"),
			entries: &[
				wgpu::BindGroupLayoutEntry {
					binding: 0,
					visibility: wgpu::ShaderStages::VERTEX,
					ty: wgpu::BindingType::Buffer {
						ty: wgpu::BufferBindingType::Uniform,
						has_dynamic_offset: false,
						min_binding_size: None,
					},
					count: None,
				},
				wgpu::BindGroupLayoutEntry {
					binding: 1,
					visibility: wgpu::ShaderStages::VERTEX,
					ty: wgpu::BindingType::Buffer {
						ty: wgpu::BufferBindingType::Storage { read_only: true },
						has_dynamic_offset: false,
						min_binding_size: None,
					},
					count: None,
				},
			],
		});

		let screen_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Screen Buffer"),
			contents: bytemuck::bytes_of(&ScreenUniform::default()),
			usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
		});

		let shapes_buffer = create_shapes_buffer(device, MIN_CAPACITY);
		let bind_group = create_bind_group(device, &layout, &screen_buffer, &shapes_buffer);

		Self {
			layout,
			bind_group,
			screen_buffer,
			shapes_buffer,
			capacity: MIN_CAPACITY,
		}
	}

	/// Uploads the frame, growing the instance buffer if it no longer fits.
	pub fn write(
		&mut self,
		device: &wgpu::Device,
		queue: &wgpu::Queue,
		screen: ScreenUniform,
		shapes: &[Shape],
	) {
		if shapes.len() > self.capacity {
			self.capacity = grown_capacity(self.capacity, shapes.len());
			log::debug!("growing shape buffer to {} instances", self.capacity);
			self.shapes_buffer = create_shapes_buffer(device, self.capacity);
			self.bind_group =
				create_bind_group(device, &self.layout, &self.screen_buffer, &self.shapes_buffer);
		}

		queue.write_buffer(&self.screen_buffer, 0, screen.bytes());
		if !shapes.is_empty() {
			queue.write_buffer(&self.shapes_buffer, 0, bytemuck::cast_slice(shapes));
		}
	}
}

fn grown_capacity(current: usize, needed: usize) -> usize {
	let mut capacity = current.max(MIN_CAPACITY);
	while capacity < needed {
		capacity *= 2;
	}
	capacity
}

fn create_shapes_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
	device.create_buffer(&wgpu::BufferDescriptor {
		label: Some("Shapes Buffer"),
		size: (capacity * std::mem::size_of::<Shape>()) as wgpu::BufferAddress,
		usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
		mapped_at_creation: false,
	})
}

fn create_bind_group(
	device: &wgpu::Device,
	layout: &wgpu::BindGroupLayout,
	screen_buffer: &wgpu::Buffer,
	shapes_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
	device.create_bind_group(&wgpu::BindGroupDescriptor {
		label: Some("Shapes Bind Group"),
		layout,
		entries: &[
			wgpu::BindGroupEntry {
				binding: 0,
				resource: screen_buffer.as_entire_binding(),
			},
			wgpu::BindGroupEntry {
				binding: 1,
				resource: shapes_buffer.as_entire_binding(),
			},
		],
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shape_matches_wgsl_layout() {
		assert_eq!(std::mem::size_of::<Shape>(), 32);
		assert_eq!(std::mem::size_of::<ScreenUniform>(), 8);
	}

	#[test]
	fn batch_keeps_submission_order_and_kinds() {
		let mut batch = ShapeBatch::default();
		batch.fill_circle(Vec2::new(1.0, 2.0), 10.0, [1.0, 0.0, 0.0, 1.0]);
		batch.fill_square(Vec2::new(3.0, 4.0), 6.0, [0.0, 1.0, 0.0, 0.5]);
		batch.text("Score: 0", Anchor::TopRight);

		let shapes = batch.shapes();
		assert_eq!(shapes.len(), 2);
		assert!(shapes[0].is_circle());
		assert_eq!(shapes[0].half_size(), 5.0);
		assert!(!shapes[1].is_circle());
		assert_eq!(shapes[1].center(), Vec2::new(3.0, 4.0));
		assert_eq!(shapes[1].half_size(), 3.0);
		assert_eq!(batch.lines()[0].anchor, Anchor::TopRight);

		batch.clear();
		assert!(batch.shapes().is_empty() && batch.lines().is_empty());
	}

	#[test]
	fn capacity_doubles_until_it_fits() {
		assert_eq!(grown_capacity(256, 257), 512);
		assert_eq!(grown_capacity(256, 1500), 2048);
		assert_eq!(grown_capacity(0, 10), MIN_CAPACITY);
	}
}
