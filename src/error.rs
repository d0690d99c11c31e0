use thiserror::Error;

/// Failures detected by the dispatcher before or after running the kernel.
/// The kernel itself has no error paths.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("output buffer holds {len} words but the image needs {required}")]
    OutputTooSmall { len: usize, required: usize },

    #[error("sample count must be at least 1")]
    InvalidSampleCount,

    #[error("workgroup size must be at least 1")]
    InvalidWorkgroupSize,

    #[error("sphere {index} has non-positive radius {radius}")]
    DegenerateSphere { index: usize, radius: f32 },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("backend `{0}` is not compiled in")]
    BackendUnavailable(&'static str),

    #[cfg(feature = "gpu")]
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[cfg(feature = "gpu")]
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[cfg(feature = "gpu")]
    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[cfg(feature = "gpu")]
    #[error("dispatch needs {groups} workgroups but the device allows {limit}")]
    DispatchTooLarge { groups: u32, limit: u32 },

    #[cfg(feature = "gpu")]
    #[error("workgroup size {size} exceeds the device limit {limit}")]
    WorkgroupTooLarge { size: u32, limit: u32 },
}
