mod delete_dialog;
mod filter_panel;
mod player_card;
mod player_form;
mod toast;

pub use delete_dialog::DeleteDialog;
pub use filter_panel::FilterPanel;
pub use player_card::PlayerCardView;
pub use player_form::PlayerFormModal;
pub use toast::ToastView;
