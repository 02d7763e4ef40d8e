pub mod board;
pub mod controller;
pub mod coordinator;
pub mod drag;
pub mod item;
pub mod layout;
pub mod list;
pub mod notify;
pub mod pointer;
pub mod view;

pub use board::{Board, BoardId};
pub use controller::{BoardController, BoardEvent};
pub use coordinator::{CommitOutcome, MoveCoordinator};
pub use drag::{
    insertion_index, AutoScrollRequest, CancelReason, DragEngine, DragPhase, DragSession,
    DragUpdate, DropRequest, Preview, ReleaseOutcome,
};
pub use item::{Item, ItemId};
pub use layout::{LayoutProvider, ListViewport, ScreenRect};
pub use list::{ListId, OrderedList};
pub use notify::{CommittedMove, MoveJournal, MoveObserver, MoveObservers, TracingObserver};
pub use pointer::{ButtonState, PointerSample, PointerTransition};
pub use view::{BoardView, ListWindow, SurfaceRegistry};
