//! Bot create/edit form (MVVM Standard)
//!
//! Structure:
//! - view_model.rs: BotFormVm with RwSignals
//! - view.rs: Modal component BotFormModal

mod view;
mod view_model;

pub use view::BotFormModal;
pub use view_model::BotFormVm;
