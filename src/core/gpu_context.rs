use std::sync::Arc;

use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface};

use crate::error::EngineError;

/// Shared GPU device and queue, cheaply cloneable
#[derive(Clone)]
pub struct GpuContext {
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a GPU context compatible with the given window surface
    pub async fn new_with_surface(surface: &Surface<'_>) -> Result<Self, EngineError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = Self::request_adapter(&instance, surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    async fn request_adapter(
        instance: &Instance,
        surface: &Surface<'_>,
    ) -> Result<Adapter, EngineError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| EngineError::Gpu(format!("no suitable adapter: {e:?}")))
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue), EngineError> {
        adapter
            .request_device(&DeviceDescriptor {
                label: Some("Hero Grid Device"),
                required_features: Features::empty(),
                required_limits: Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| EngineError::Gpu(format!("device creation failed: {e:?}")))
    }
}
