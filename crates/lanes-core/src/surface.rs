use crate::LanesResult;

/// Opaque token the rendering collaborator hands back for one live row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

/// Rendering collaborator for a single list.
///
/// The core only asks for handles to be created, moved, or dropped. How a
/// handle is drawn or animated is left entirely to the implementor, and no
/// visual object ever crosses back into the core.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait RenderSurface {
    /// Report the scrollable extent of the list along the scroll axis.
    fn set_extent(&mut self, extent: f64);

    /// Create a visual handle for `index`, placed at `top_offset`.
    fn acquire(&mut self, index: usize, top_offset: f64) -> LanesResult<HandleId>;

    /// Drop the handle previously acquired for `index`.
    fn release(&mut self, index: usize, handle: HandleId);

    /// Move an existing handle to a new `top_offset`.
    fn reposition(&mut self, index: usize, handle: HandleId, top_offset: f64);
}
