//! Shared texture handles
//!
//! The resource layer owns textures; effects and the scheduler only hold
//! handles. A handle is reference counted, so a registered effect keeps its
//! pixels alive, and the owner can still `release` the storage early, after
//! which every lock attempt fails with [`TextureError::Released`].

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use super::PixelBuffer;
use crate::error::TextureError;

struct TextureSlot {
    width: u32,
    height: u32,
    buffer: RefCell<Option<PixelBuffer>>,
}

/// Cloneable, single-threaded handle to a lockable pixel buffer
#[derive(Clone)]
pub struct TextureHandle {
    slot: Rc<TextureSlot>,
}

/// Stable identity of a texture, shared by all clones of its handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(usize);

impl TextureHandle {
    /// Allocate a new tightly packed texture
    pub fn new(width: u32, height: u32) -> Result<Self, TextureError> {
        Ok(Self::from_buffer(PixelBuffer::new(width, height)?))
    }

    /// Allocate a texture with padded rows
    pub fn with_pitch(width: u32, height: u32, pitch: u32) -> Result<Self, TextureError> {
        Ok(Self::from_buffer(PixelBuffer::with_pitch(width, height, pitch)?))
    }

    /// Wrap an existing buffer
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            slot: Rc::new(TextureSlot {
                width: buffer.width(),
                height: buffer.height(),
                buffer: RefCell::new(Some(buffer)),
            }),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.slot.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.slot.height
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        TextureId(Rc::as_ptr(&self.slot) as usize)
    }

    /// True when both handles refer to the same texture
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }

    /// Acquire exclusive write access. The lock is released when the guard drops.
    pub fn try_lock(&self) -> Result<LockedPixels<'_>, TextureError> {
        let guard = self
            .slot
            .buffer
            .try_borrow_mut()
            .map_err(|_| TextureError::Locked)?;
        RefMut::filter_map(guard, Option::as_mut)
            .map(|pixels| LockedPixels { pixels })
            .map_err(|_| TextureError::Released)
    }

    pub fn is_locked(&self) -> bool {
        self.slot.buffer.try_borrow_mut().is_err()
    }

    pub fn is_released(&self) -> bool {
        matches!(self.slot.buffer.try_borrow(), Ok(buf) if buf.is_none())
    }

    /// Free the pixel storage. Fails while the texture is locked.
    pub fn release(&self) -> Result<(), TextureError> {
        let mut guard = self
            .slot
            .buffer
            .try_borrow_mut()
            .map_err(|_| TextureError::Locked)?;
        *guard = None;
        Ok(())
    }

    /// Read-only access for the rendering side (upload, inspection)
    pub fn read<R>(&self, f: impl FnOnce(&PixelBuffer) -> R) -> Result<R, TextureError> {
        let guard = self
            .slot
            .buffer
            .try_borrow()
            .map_err(|_| TextureError::Locked)?;
        Ref::filter_map(guard, Option::as_ref)
            .map(|buf| f(&buf))
            .map_err(|_| TextureError::Released)
    }

    /// Tightly packed copy of the visible pixels
    pub fn snapshot(&self) -> Result<Vec<u32>, TextureError> {
        self.read(PixelBuffer::snapshot)
    }
}

impl PartialEq for TextureHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TextureHandle {}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureHandle")
            .field("id", &self.id())
            .field("width", &self.width())
            .field("height", &self.height())
            .field("released", &self.is_released())
            .finish()
    }
}

// ============================================================================
// LockedPixels
// ============================================================================

/// Scoped write lock on a texture. Dereferences to the underlying
/// [`PixelBuffer`]; dropping it unlocks.
pub struct LockedPixels<'a> {
    pixels: RefMut<'a, PixelBuffer>,
}

impl LockedPixels<'_> {
    /// Explicit unlock, equivalent to dropping the guard
    pub fn unlock(self) {}
}

impl Deref for LockedPixels<'_> {
    type Target = PixelBuffer;

    fn deref(&self) -> &PixelBuffer {
        &self.pixels
    }
}

impl DerefMut for LockedPixels<'_> {
    fn deref_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lock_fails_until_first_is_dropped() {
        let tex = TextureHandle::new(4, 4).unwrap();
        let guard = tex.try_lock().unwrap();
        assert!(tex.is_locked());
        assert_eq!(tex.try_lock().err(), Some(TextureError::Locked));
        guard.unlock();
        assert!(!tex.is_locked());
        assert!(tex.try_lock().is_ok());
    }

    #[test]
    fn released_texture_refuses_locks() {
        let tex = TextureHandle::new(2, 2).unwrap();
        let other = tex.clone();
        tex.release().unwrap();
        assert!(other.is_released());
        assert_eq!(other.try_lock().err(), Some(TextureError::Released));
        assert_eq!(other.snapshot(), Err(TextureError::Released));
        // Dimensions survive release for diagnostics
        assert_eq!((other.width(), other.height()), (2, 2));
    }

    #[test]
    fn release_while_locked_is_refused() {
        let tex = TextureHandle::new(2, 2).unwrap();
        let _guard = tex.try_lock().unwrap();
        assert_eq!(tex.release(), Err(TextureError::Locked));
    }

    #[test]
    fn clones_share_identity() {
        let a = TextureHandle::new(1, 1).unwrap();
        let b = a.clone();
        let c = TextureHandle::new(1, 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
        assert_ne!(a, c);
    }

    #[test]
    fn writes_through_guard_are_visible() {
        let tex = TextureHandle::with_pitch(2, 2, 4).unwrap();
        {
            let mut px = tex.try_lock().unwrap();
            px.set(1, 1, 0xFFAB_CDEF);
        }
        assert_eq!(tex.snapshot().unwrap(), vec![0, 0, 0, 0xFFAB_CDEF]);
    }
}
