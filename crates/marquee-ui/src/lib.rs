//! Views for marquee: labels, list rows, lists, applet frames and progress.
//!
//! Every view here owns its children and follows the layout/draw contract of
//! [`marquee_core::View`]. [`FrameDriver`] runs the per-frame loop over a root
//! view.

pub mod applet_frame;
pub mod apportion;
pub mod box_layout;
pub mod driver;
pub mod header;
pub mod hint;
pub mod image;
pub mod label;
pub mod list;
pub mod list_item;
pub mod progress;
pub mod rectangle;
pub mod table;

pub use applet_frame::{AppletFrame, FrameTransition, HeaderStyle};
pub use apportion::{RowInputs, RowSpace, apportion};
pub use box_layout::{BoxLayout, Margins, SpacingDecision};
pub use driver::{FrameDriver, FrameStats};
pub use header::Header;
pub use hint::{Hint, HintAction};
pub use image::{Image, ImageScale};
pub use label::{Label, LabelAnimation, LabelRendering, LabelStyle, TickerPhase};
pub use list::{List, ListContentView, list_spacing};
pub use list_item::{
    InputListItem, IntegerInputListItem, ListItem, ListItemGroupSpacing, SelectListItem,
    ToggleListItem,
};
pub use progress::{ProgressDisplay, ProgressDisplayFlags, ProgressSpinner};
pub use rectangle::Rectangle;
pub use table::{Table, TableRow, TableRowKind};
