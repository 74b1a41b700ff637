use thiserror::Error;

/// Fatal setup failures. Everything past startup degrades instead of erroring.
#[derive(Error, Debug)]
pub enum Error {
	#[error("event loop error: {0}")]
	EventLoop(#[from] winit::error::EventLoopError),

	#[error("window creation failed: {0}")]
	Window(#[from] winit::error::OsError),

	#[error("surface creation failed: {0}")]
	Surface(#[from] wgpu::CreateSurfaceError),

	#[error("no suitable GPU adapter: {0}")]
	Adapter(#[from] wgpu::RequestAdapterError),

	#[error("GPU device request failed: {0}")]
	Device(#[from] wgpu::RequestDeviceError),
}
