//! Uniform constant buffers mirrored from CPU-side state
//!
//! A [`ConstantBuffer`] owns one uniform buffer plus the bind group that
//! exposes it to both render and compute pipelines. The CPU side builds a
//! `#[repr(C)]` Pod snapshot once per frame and uploads it with [`write`];
//! `queue.write_buffer` stages the bytes so in-flight frames keep reading
//! the data they were recorded against.
//!
//! [`write`]: ConstantBuffer::write

use bytemuck::{Pod, Zeroable};
use std::marker::PhantomData;

use crate::buffer::{create_uniform_buffer, update_uniform_buffer};

/// A bool widened to 4 bytes for uniform-buffer layout rules
///
/// Always holds exactly 0 or 1, so shader-side `bool` casts are well defined.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Bool32(u32);

impl Bool32 {
    pub const FALSE: Bool32 = Bool32(0);
    pub const TRUE: Bool32 = Bool32(1);

    pub fn get(self) -> bool {
        self.0 != 0
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<bool> for Bool32 {
    fn from(value: bool) -> Self {
        Bool32(value as u32)
    }
}

impl Default for Bool32 {
    fn default() -> Self {
        Bool32::FALSE
    }
}

/// A uniform buffer of `T` bound for vertex, fragment, and compute stages
pub struct ConstantBuffer<T: Pod + Zeroable> {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: Pod + Zeroable> ConstantBuffer<T> {
    /// Create the buffer, initialized to `T`'s zeroed bytes, along with its
    /// bind group layout and bind group.
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let initial = T::zeroed();
        let buffer = create_uniform_buffer(device, label, &initial);

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX
                    | wgpu::ShaderStages::FRAGMENT
                    | wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "constant buffer '{label}' created ({} bytes)",
            std::mem::size_of::<T>()
        );

        ConstantBuffer {
            buffer,
            layout,
            bind_group,
            _marker: PhantomData,
        }
    }

    /// Upload this frame's snapshot
    pub fn write(&self, queue: &wgpu::Queue, data: &T) {
        update_uniform_buffer(queue, &self.buffer, data);
    }

    /// Layout for pipeline creation
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Attach to a render pass at the given bind-group slot
    pub fn bind_gfx<'p>(&'p self, pass: &mut wgpu::RenderPass<'p>, index: u32) {
        pass.set_bind_group(index, &self.bind_group, &[]);
    }

    /// Attach to a compute pass at the given bind-group slot
    pub fn bind_compute<'p>(&'p self, pass: &mut wgpu::ComputePass<'p>, index: u32) {
        pass.set_bind_group(index, &self.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool32_is_exactly_zero_or_one() {
        assert_eq!(Bool32::from(false).raw(), 0);
        assert_eq!(Bool32::from(true).raw(), 1);
        assert!(!Bool32::default().get());
        assert!(Bool32::TRUE.get());
    }

    #[test]
    fn bool32_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Bool32>(), 4);
    }

    #[test]
    fn bool32_casts_to_plain_u32() {
        let flags = [Bool32::TRUE, Bool32::FALSE, Bool32::TRUE];
        let raw: &[u32] = bytemuck::cast_slice(&flags);
        assert_eq!(raw, &[1, 0, 1]);
    }
}
