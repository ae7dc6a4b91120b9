use dioxus::prelude::*;

use crate::ui::cards::{PlayerCard, MAX_STARS};

#[component]
pub fn PlayerCardView(
    card: PlayerCard,
    list_view: bool,
    on_edit: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let preferred = card.preferred.join(", ");
    let unwanted = card.unwanted.join(", ");
    let width = if list_view { "100%" } else { "300px" };
    let edit_id = card.id.clone();
    let delete_id = card.id.clone();

    rsx! {
        div {
            style: "background: white; border-radius: 12px; padding: 16px; width: {width};
                   box-shadow: 0 2px 8px rgba(0,0,0,0.08); display: flex; flex-direction: column; gap: 10px;",

            // Header: name, phone, actions
            div {
                style: "display: flex; justify-content: space-between; align-items: flex-start;",
                div {
                    h3 {
                        style: "margin: 0 0 4px 0; font-size: 17px; font-weight: 600;",
                        "{card.full_name}"
                    }
                    div {
                        style: "font-size: 13px; color: #555;",
                        "📞 "
                        a {
                            href: "{card.tel_href}",
                            style: "color: #2563eb; text-decoration: none;",
                            "{card.phone}"
                        }
                    }
                }
                div {
                    style: "display: flex; gap: 4px;",
                    button {
                        style: "background: none; border: none; cursor: pointer; font-size: 15px;",
                        title: "Edit",
                        onclick: move |_| on_edit.call(edit_id.clone()),
                        "✏️"
                    }
                    button {
                        style: "background: none; border: none; cursor: pointer; font-size: 15px;",
                        title: "Delete",
                        onclick: move |_| on_delete.call(delete_id.clone()),
                        "🗑️"
                    }
                }
            }

            // Level badge and empathy stars
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                span {
                    style: "background: {card.level_color}; color: white; border-radius: 10px;
                           padding: 2px 10px; font-size: 12px; font-weight: 500;",
                    "{card.level_label}"
                }
                div {
                    for i in 1..=MAX_STARS {
                        span {
                            style: if i <= card.stars { "color: #f59e0b;" } else { "color: #d1d5db;" },
                            "★"
                        }
                    }
                }
            }

            // Availability chips
            if !card.chips.is_empty() {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 6px;",
                    for chip in card.chips.iter() {
                        span {
                            style: "background: #eef2ff; color: #3730a3; border-radius: 6px;
                                   padding: 2px 8px; font-size: 12px;",
                            span { style: "font-weight: 600;", "{chip.day} " }
                            "{chip.hours}"
                        }
                    }
                }
            }

            // Partner preferences
            if !preferred.is_empty() {
                div {
                    style: "font-size: 12px; color: #16a34a;",
                    "Prefers: {preferred}"
                }
            }
            if !unwanted.is_empty() {
                div {
                    style: "font-size: 12px; color: #dc2626;",
                    "Avoids: {unwanted}"
                }
            }
        }
    }
}
