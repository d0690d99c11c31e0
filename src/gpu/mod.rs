//! wgpu compute backend. Runs the same kernel as [`crate::renderer::CpuRenderer`],
//! ported to WGSL, one invocation per pixel. Device `sin` precision differs
//! between drivers, so jittered pixels are not guaranteed bit-identical to
//! the CPU backend.

mod buffer;

use std::time::Instant;

use crate::buffers::{sphere_records, CameraRecord, KernelParams};
use crate::camera::CameraParams;
use crate::config::RenderSettings;
use crate::error::RenderError;
use crate::renderer::{validate, Backend};
use crate::scene::Scene;

use buffer::{ReadbackBuffer, StorageBuffer, UniformBuffer};

const SHADER_SOURCE: &str = include_str!("../asset/shader/trace.wgsl");

pub fn shader_source(workgroup_size: u32) -> String {
    SHADER_SOURCE.replace("{{workgroup_size}}", &workgroup_size.to_string())
}

pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: Option<(u32, wgpu::ComputePipeline)>,
}

impl GpuRenderer {
    pub fn new() -> Result<Self, RenderError> {
        pollster::block_on(Self::init())
    }

    async fn init() -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::downlevel_defaults(),
                    label: Some("Trace Device"),
                },
                None,
            )
            .await?;
        tracing::info!(adapter = %adapter.get_info().name, "gpu backend ready");

        Ok(Self {
            device,
            queue,
            pipeline: None,
        })
    }
}

fn build_pipeline(device: &wgpu::Device, workgroup_size: u32) -> wgpu::ComputePipeline {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Trace Shader"),
        source: wgpu::ShaderSource::Wgsl(shader_source(workgroup_size).into()),
    });
    device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("Trace Pipeline"),
        layout: None,
        module: &module,
        entry_point: "main",
    })
}

/// Reuses the cached pipeline while the workgroup size is unchanged.
fn cached_pipeline<'a>(
    device: &wgpu::Device,
    cache: &'a mut Option<(u32, wgpu::ComputePipeline)>,
    workgroup_size: u32,
) -> &'a wgpu::ComputePipeline {
    if !matches!(cache, Some((size, _)) if *size == workgroup_size) {
        tracing::debug!(workgroup_size, "compiling trace pipeline");
        *cache = Some((workgroup_size, build_pipeline(device, workgroup_size)));
    }
    let (_, pipeline) = cache.as_ref().expect("pipeline cache populated above");
    pipeline
}

impl Backend for GpuRenderer {
    fn name(&self) -> &'static str {
        "gpu"
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &CameraParams,
        settings: &RenderSettings,
        output: &mut [u32],
    ) -> Result<(), RenderError> {
        validate(scene, settings, output.len())?;

        let size_limit = self.device.limits().max_compute_workgroup_size_x;
        if settings.workgroup_size > size_limit {
            return Err(RenderError::WorkgroupTooLarge {
                size: settings.workgroup_size,
                limit: size_limit,
            });
        }

        let pixel_count = scene.pixel_count() as u32;
        let groups = pixel_count.div_ceil(settings.workgroup_size);
        let limit = self.device.limits().max_compute_workgroups_per_dimension;
        if groups > limit {
            return Err(RenderError::DispatchTooLarge { groups, limit });
        }

        tracing::info!(
            backend = self.name(),
            width = scene.width,
            height = scene.height,
            samples = settings.samples,
            spheres = scene.spheres.len(),
            groups,
            "rendering frame"
        );
        let start = Instant::now();

        let params = [KernelParams::new(scene, settings)];
        let camera = [CameraRecord::from(camera)];
        let spheres = sphere_records(scene);

        let size = pixel_count as u64 * std::mem::size_of::<u32>() as u64;
        let pixels = StorageBuffer::init_output(&self.device, size, Some("Pixel Buffer"));
        let sphere_buffer =
            StorageBuffer::init_immediate(&self.device, &spheres, Some("Sphere Buffer"));
        let params_buffer =
            UniformBuffer::init_immediate(&self.device, &params, Some("Params Buffer"));
        let camera_buffer =
            UniformBuffer::init_immediate(&self.device, &camera, Some("Camera Buffer"));
        let readback = ReadbackBuffer::init(&self.device, size, Some("Readback Buffer"));

        let pipeline = cached_pipeline(&self.device, &mut self.pipeline, settings.workgroup_size);

        let layout = pipeline.get_bind_group_layout(0);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trace_bind_group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: pixels.buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: sphere_buffer.buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buffer.buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: camera_buffer.buffer().as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Trace Encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Trace Pass"),
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(groups, 1, 1);
        }
        encoder.copy_buffer_to_buffer(pixels.buffer(), 0, readback.buffer(), 0, pixels.size());
        self.queue.submit(std::iter::once(encoder.finish()));

        readback.read_into(&self.device, &mut output[..pixel_count as usize])?;

        tracing::debug!(
            elapsed_ms = start.elapsed().as_secs_f32() * 1000.0,
            "frame rendered"
        );
        Ok(())
    }
}
