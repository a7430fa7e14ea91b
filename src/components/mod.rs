//! UI Components
//!
//! Reusable Leptos components.

mod comment_threads;
mod message_box;
mod modal_layer;
mod move_item_modal;
mod new_item_form;
mod page_view;
mod settings_team_form;
mod sidebar_context_list;
mod sidebar_tree;
mod team_bar;
mod toast_list;

pub use comment_threads::CommentThreads;
pub use message_box::MessageBox;
pub use modal_layer::ModalLayer;
pub use move_item_modal::{MoveItemModal, WorkspaceExplorer};
pub use new_item_form::NewItemForm;
pub use page_view::PageView;
pub use settings_team_form::SettingsTeamForm;
pub use sidebar_context_list::SidebarContextList;
pub use sidebar_tree::SidebarTree;
pub use team_bar::TeamBar;
pub use toast_list::ToastList;
