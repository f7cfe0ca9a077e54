//! Mind-Map Tree
//!
//! Expansion flags, the pure row renderer and the controller that owns the
//! tree for one editor screen.

mod controller;
mod expansion;
mod render;


pub use controller::{EditorMode, NodeEditor, TreeController, TreeSnapshot};
pub use expansion::ExpansionState;
pub use render::{outline, render_rows, render_subtree, Toggle, TreeRow, INDENT_BASE, INDENT_STEP};
