use wgpu::util::DeviceExt;

macro_rules! buffer_init_immediate {
    ($device:expr, $content:expr, $label:expr, $usage:expr) => {{
        let init_descriptor = wgpu::util::BufferInitDescriptor {
            label: $label,
            contents: bytemuck::cast_slice($content),
            usage: $usage,
        };
        $device.create_buffer_init(&init_descriptor)
    }};
}

/// Read-only input block bound as `var<uniform>`.
pub struct UniformBuffer(wgpu::Buffer);

impl UniformBuffer {
    pub fn init_immediate<'label, T: bytemuck::Pod>(
        device: &wgpu::Device,
        content: &[T],
        label: Option<&'label str>,
    ) -> Self {
        Self(buffer_init_immediate!(
            device,
            content,
            label,
            wgpu::BufferUsages::UNIFORM
        ))
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

/// Runtime-sized array bound as `var<storage>`.
pub struct StorageBuffer(wgpu::Buffer);

impl StorageBuffer {
    pub fn init_immediate<'label, T: bytemuck::Pod>(
        device: &wgpu::Device,
        content: &[T],
        label: Option<&'label str>,
    ) -> Self {
        Self(buffer_init_immediate!(
            device,
            content,
            label,
            wgpu::BufferUsages::STORAGE
        ))
    }

    /// Uninitialized storage the kernel writes and the host copies out of.
    pub fn init_output<'label>(
        device: &wgpu::Device,
        size: u64,
        label: Option<&'label str>,
    ) -> Self {
        let descriptor = wgpu::BufferDescriptor {
            label,
            size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        };
        Self(device.create_buffer(&descriptor))
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }

    pub fn size(&self) -> u64 {
        self.0.size()
    }
}

/// Host-mappable copy target for reading results back.
pub struct ReadbackBuffer(wgpu::Buffer);

impl ReadbackBuffer {
    pub fn init<'label>(device: &wgpu::Device, size: u64, label: Option<&'label str>) -> Self {
        let descriptor = wgpu::BufferDescriptor {
            label,
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        };
        Self(device.create_buffer(&descriptor))
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }

    /// Blocks until the buffer is mapped, then copies its words into `dst`.
    pub fn read_into(
        &self,
        device: &wgpu::Device,
        dst: &mut [u32],
    ) -> Result<(), wgpu::BufferAsyncError> {
        let slice = self.0.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device.poll(wgpu::Maintain::Wait);
        rx.recv().map_err(|_| wgpu::BufferAsyncError)??;

        {
            let data = slice.get_mapped_range();
            let words: &[u32] = bytemuck::cast_slice(&data[..]);
            let count = words.len().min(dst.len());
            dst[..count].copy_from_slice(&words[..count]);
        }
        self.0.unmap();
        Ok(())
    }
}
