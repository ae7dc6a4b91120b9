use dioxus::prelude::*;

use crate::services::Notification;

/// Transient message in the bottom-right corner. The owner decides when to
/// show and dismiss it; this just renders whatever is current.
#[component]
pub fn ToastView(notification: Notification) -> Element {
    let color = notification.kind.color();
    let icon = notification.kind.icon();

    rsx! {
        div {
            style: "position: fixed; bottom: 24px; right: 24px; z-index: 2000;
                   background: {color}; color: white; border-radius: 8px;
                   padding: 12px 18px; display: flex; align-items: center; gap: 10px;
                   box-shadow: 0 4px 16px rgba(0,0,0,0.25); font-size: 14px;",
            span { style: "font-weight: 700;", "{icon}" }
            span { "{notification.message}" }
        }
    }
}
