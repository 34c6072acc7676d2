//! Zero-copy views into engine-owned linear memory
//!
//! The engine keeps positions and color indices in one contiguous buffer and
//! reports where each array starts (`ViewLayout`). `ViewAnchor` checks that
//! layout once against the buffer; after that every frame's `MemoryView` is a
//! pair of typed slice casts, no copy, no per-frame validation.
//!
//! A view borrows the engine, so it cannot outlive the next `step(&mut self)`.
//! The anchor also remembers the buffer's address and length: if the engine
//! ever grew or moved its memory, taking a view panics instead of reading a
//! stale region.

use std::mem::{align_of, size_of};

use crate::domain::vec2::Vec2;
use crate::error::{FlowerError, FlowerResult};

/// Byte offsets of the shared arrays inside linear memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLayout {
    pub positions_offset: usize,
    pub indices_offset: usize,
    /// Particle count N; both arrays hold exactly N elements.
    pub len: usize,
}

impl ViewLayout {
    /// Positions first, color indices right after them.
    pub const fn packed(len: usize) -> Self {
        Self {
            positions_offset: 0,
            indices_offset: len * size_of::<Vec2>(),
            len,
        }
    }

    pub const fn positions_bytes(&self) -> usize {
        self.len * size_of::<Vec2>()
    }

    pub const fn indices_bytes(&self) -> usize {
        self.len * size_of::<u32>()
    }

    /// Bytes of linear memory the layout needs.
    pub const fn total_bytes(&self) -> usize {
        let p = self.positions_offset + self.positions_bytes();
        let i = self.indices_offset + self.indices_bytes();
        if p > i { p } else { i }
    }
}

/// A layout validated against one specific linear memory buffer.
#[derive(Clone, Copy, Debug)]
pub struct ViewAnchor {
    layout: ViewLayout,
    base: usize,
    memory_len: usize,
}

impl ViewAnchor {
    pub fn anchor(memory: &[u8], layout: ViewLayout) -> FlowerResult<Self> {
        let base = memory.as_ptr() as usize;
        check_region::<Vec2>(memory, "positions", layout.positions_offset, layout.positions_bytes())?;
        check_region::<u32>(memory, "color_indices", layout.indices_offset, layout.indices_bytes())?;

        Ok(Self {
            layout,
            base,
            memory_len: memory.len(),
        })
    }

    pub fn layout(&self) -> ViewLayout {
        self.layout
    }

    /// Typed views over `memory`, which must be the buffer this anchor was made from.
    ///
    /// Panics if the buffer moved or changed size: views into it would be stale.
    pub fn view<'a>(&self, memory: &'a [u8]) -> MemoryView<'a> {
        assert!(
            memory.as_ptr() as usize == self.base && memory.len() == self.memory_len,
            "engine linear memory relocated ({:#x}, {} bytes -> {:#x}, {} bytes); shared views are invalid",
            self.base,
            self.memory_len,
            memory.as_ptr() as usize,
            memory.len(),
        );

        let l = self.layout;
        let pos_bytes = &memory[l.positions_offset..l.positions_offset + l.positions_bytes()];
        let idx_bytes = &memory[l.indices_offset..l.indices_offset + l.indices_bytes()];
        MemoryView {
            positions: bytemuck::cast_slice(pos_bytes),
            color_indices: bytemuck::cast_slice(idx_bytes),
        }
    }
}

fn check_region<T>(memory: &[u8], name: &'static str, offset: usize, bytes: usize) -> FlowerResult<()> {
    let end = offset.checked_add(bytes).unwrap_or(usize::MAX);
    if end > memory.len() {
        return Err(FlowerError::OutOfBounds {
            name,
            start: offset,
            end,
            memory_len: memory.len(),
        });
    }
    let align = align_of::<T>();
    if (memory.as_ptr() as usize + offset) % align != 0 {
        return Err(FlowerError::Misaligned { name, offset, align });
    }
    Ok(())
}

/// Read-only per-frame view: positions and color indices for particles `0..N`.
#[derive(Clone, Copy, Debug)]
pub struct MemoryView<'a> {
    positions: &'a [Vec2],
    color_indices: &'a [u32],
}

impl<'a> MemoryView<'a> {
    /// View over two separately owned arrays.
    pub fn new(positions: &'a [Vec2], color_indices: &'a [u32]) -> FlowerResult<Self> {
        if positions.len() != color_indices.len() {
            return Err(FlowerError::LengthMismatch {
                positions: positions.len(),
                indices: color_indices.len(),
            });
        }
        Ok(Self {
            positions,
            color_indices,
        })
    }

    /// Validate `layout` and view `memory` in one go.
    pub fn from_linear(memory: &'a [u8], layout: ViewLayout) -> FlowerResult<Self> {
        Ok(ViewAnchor::anchor(memory, layout)?.view(memory))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Unrounded position.
    #[inline]
    pub fn position(&self, i: usize) -> Vec2 {
        self.positions[i]
    }

    /// Floored x coordinate, in surface pixels.
    #[inline]
    pub fn x(&self, i: usize) -> f32 {
        self.positions[i].x.floor()
    }

    /// Floored y coordinate, in surface pixels.
    #[inline]
    pub fn y(&self, i: usize) -> f32 {
        self.positions[i].y.floor()
    }

    #[inline]
    pub fn color_index(&self, i: usize) -> u32 {
        self.color_indices[i]
    }

    pub fn positions(&self) -> &'a [Vec2] {
        self.positions
    }

    pub fn color_indices(&self) -> &'a [u32] {
        self.color_indices
    }

    /// First particle whose color index is `>= bucket_count`, if any.
    pub fn find_out_of_range(&self, bucket_count: usize) -> Option<usize> {
        self.color_indices
            .iter()
            .position(|&c| c as usize >= bucket_count)
    }
}
