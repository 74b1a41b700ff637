use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
	TopLeft,
	TopRight,
	Center,
}

/// Drawing surface the game renders into, in logical pixels.
/// Colors are normalized RGBA.
pub trait Canvas {
	fn fill_circle(&mut self, center: Vec2, diameter: f32, color: [f32; 4]);
	fn fill_square(&mut self, center: Vec2, side: f32, color: [f32; 4]);
	fn text(&mut self, text: &str, anchor: Anchor);
}
