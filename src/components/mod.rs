//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod map_editor;
mod map_list;
mod node_editor_modal;
mod toast_stack;
mod tree_node_row;

pub use delete_confirm_button::DeleteConfirmButton;
pub use map_editor::MapEditor;
pub use map_list::MapList;
pub use node_editor_modal::NodeEditorModal;
pub use toast_stack::ToastStack;
pub use tree_node_row::TreeNodeRow;
