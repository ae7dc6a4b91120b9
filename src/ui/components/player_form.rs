use dioxus::prelude::*;

use crate::domain::form::PlayerForm;
use crate::domain::player::{Player, SkillLevel, Weekday};

/// Create/edit modal. All scratch state lives in the `PlayerForm` signal;
/// this component only renders it and routes input back into it. Validation
/// and submission stay with the owner via `on_submit`.
#[component]
pub fn PlayerFormModal(
    form: Signal<PlayerForm>,
    roster: Vec<Player>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let f = form.read().clone();

    let title = if f.is_editing() { "Edit Player" } else { "New Player" };
    let save_label = if f.submitting { "Saving..." } else { "Save" };
    let submitting = f.submitting;

    let resolve = |id: &String| -> String {
        roster
            .iter()
            .find(|p| &p.id == id)
            .map(Player::full_name)
            .unwrap_or_else(|| id.clone())
    };
    // (key, display name, id moved into the remove handler)
    let preferred_chips: Vec<(String, String, String)> = f
        .preferred_ids
        .iter()
        .map(|id| (id.clone(), resolve(id), id.clone()))
        .collect();
    let unwanted_chips: Vec<(String, String, String)> = f
        .unwanted_ids
        .iter()
        .map(|id| (id.clone(), resolve(id), id.clone()))
        .collect();
    let candidates: Vec<(String, String)> = f
        .partner_candidates(&roster)
        .into_iter()
        .map(|p| (p.id.clone(), p.full_name()))
        .collect();
    let candidates_unwanted = candidates.clone();
    let slots = f.slots.clone();

    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                   background: rgba(0, 0, 0, 0.5); z-index: 999;
                   display: flex; align-items: center; justify-content: center;",
            tabindex: "0",
            onclick: move |_| on_cancel.call(()),
            onkeydown: move |e| {
                if e.key() == Key::Escape {
                    on_cancel.call(());
                }
            },

            div {
                style: "background: white; border-radius: 12px; padding: 24px;
                       width: 90%; max-width: 620px; max-height: 85vh; overflow-y: auto;
                       box-shadow: 0 10px 40px rgba(0, 0, 0, 0.2);",
                onclick: move |e| e.stop_propagation(),

                // Header
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px;",
                    h2 {
                        style: "margin: 0; font-size: 22px; font-weight: 600;",
                        "{title}"
                    }
                    button {
                        style: "background: none; border: none; font-size: 24px; cursor: pointer; padding: 0; width: 30px; height: 30px;",
                        onclick: move |_| on_cancel.call(()),
                        "×"
                    }
                }

                // Name and contact fields
                div {
                    style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 16px;",
                    div {
                        label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "Surname" }
                        input {
                            r#type: "text",
                            style: "width: 100%; padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px;",
                            value: "{f.surname}",
                            oninput: move |e| form.write().surname = e.value(),
                        }
                    }
                    div {
                        label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "First name" }
                        input {
                            r#type: "text",
                            style: "width: 100%; padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px;",
                            value: "{f.first_name}",
                            oninput: move |e| form.write().first_name = e.value(),
                        }
                    }
                }

                div {
                    style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 16px;",
                    div {
                        label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "Phone" }
                        input {
                            r#type: "tel",
                            style: "width: 100%; padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px;",
                            value: "{f.phone}",
                            oninput: move |e| form.write().phone = e.value(),
                        }
                    }
                    div {
                        label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "Level" }
                        select {
                            style: "width: 100%; padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px;",
                            onchange: move |e| form.write().level = SkillLevel::from_value(&e.value()),
                            option { value: "", selected: f.level.is_none(), "Choose..." }
                            for level in SkillLevel::ALL {
                                option {
                                    value: "{level.value()}",
                                    selected: f.level == Some(level),
                                    "{level.label()}"
                                }
                            }
                        }
                    }
                }

                // Empathy rating
                div {
                    style: "margin-bottom: 16px;",
                    label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "Empathy" }
                    div {
                        for value in 1..=5u8 {
                            button {
                                r#type: "button",
                                style: if value <= f.empathy {
                                    "background: none; border: none; cursor: pointer; font-size: 22px; color: #f59e0b;"
                                } else {
                                    "background: none; border: none; cursor: pointer; font-size: 22px; color: #d1d5db;"
                                },
                                onclick: move |_| form.write().empathy = value,
                                "★"
                            }
                        }
                    }
                }

                // Availability slots
                div {
                    style: "margin-bottom: 16px;",
                    label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "Availability" }
                    for (i, slot) in slots.into_iter().enumerate() {
                        div {
                            style: "display: flex; align-items: center; gap: 8px; margin-bottom: 6px;",
                            select {
                                style: "flex: 1; padding: 6px; border: 1px solid #ddd; border-radius: 4px; font-size: 13px;",
                                onchange: move |e| {
                                    if let Some(row) = form.write().slots.get_mut(i) {
                                        row.day = Weekday::from_value(&e.value());
                                    }
                                },
                                option { value: "", selected: slot.day.is_none(), "Day..." }
                                for day in Weekday::ALL {
                                    option {
                                        value: "{day.value()}",
                                        selected: slot.day == Some(day),
                                        "{day.label()}"
                                    }
                                }
                            }
                            input {
                                r#type: "time",
                                value: "{slot.start}",
                                onchange: move |e| {
                                    if let Some(row) = form.write().slots.get_mut(i) {
                                        row.start = e.value();
                                    }
                                },
                                style: "padding: 6px; border: 1px solid #ddd; border-radius: 4px; font-size: 13px;",
                            }
                            span { style: "color: #999;", "-" }
                            input {
                                r#type: "time",
                                value: "{slot.end}",
                                onchange: move |e| {
                                    if let Some(row) = form.write().slots.get_mut(i) {
                                        row.end = e.value();
                                    }
                                },
                                style: "padding: 6px; border: 1px solid #ddd; border-radius: 4px; font-size: 13px;",
                            }
                            button {
                                r#type: "button",
                                style: "background: none; border: none; cursor: pointer; color: #dc2626; font-size: 16px;",
                                title: "Remove",
                                onclick: move |_| form.write().remove_slot(i),
                                "×"
                            }
                        }
                    }
                    button {
                        r#type: "button",
                        style: "padding: 6px 12px; border: 1px dashed #bbb; background: none;
                               border-radius: 4px; cursor: pointer; font-size: 13px; color: #555;",
                        onclick: move |_| form.write().add_slot(),
                        "+ Add slot"
                    }
                }

                // Partner preferences
                div {
                    style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 16px;",
                    div {
                        label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "Preferred partners" }
                        div {
                            style: "display: flex; flex-wrap: wrap; gap: 4px; margin-bottom: 6px;",
                            for (id, name, remove_id) in preferred_chips {
                                span {
                                    key: "{id}",
                                    style: "background: #dcfce7; color: #166534; border-radius: 6px;
                                           padding: 2px 8px; font-size: 12px; display: inline-flex; align-items: center; gap: 4px;",
                                    "{name}"
                                    button {
                                        r#type: "button",
                                        style: "background: none; border: none; cursor: pointer; color: #166534;",
                                        onclick: move |_| form.write().remove_preferred(&remove_id),
                                        "×"
                                    }
                                }
                            }
                        }
                        select {
                            style: "width: 100%; padding: 6px; border: 1px solid #ddd; border-radius: 4px; font-size: 13px;",
                            onchange: move |e| form.write().add_preferred(e.value()),
                            option { value: "", selected: true, "Add..." }
                            for (id, name) in candidates {
                                option { value: "{id}", "{name}" }
                            }
                        }
                    }
                    div {
                        label { style: "display: block; margin-bottom: 5px; font-weight: 500; font-size: 13px;", "Unwanted partners" }
                        div {
                            style: "display: flex; flex-wrap: wrap; gap: 4px; margin-bottom: 6px;",
                            for (id, name, remove_id) in unwanted_chips {
                                span {
                                    key: "{id}",
                                    style: "background: #fee2e2; color: #991b1b; border-radius: 6px;
                                           padding: 2px 8px; font-size: 12px; display: inline-flex; align-items: center; gap: 4px;",
                                    "{name}"
                                    button {
                                        r#type: "button",
                                        style: "background: none; border: none; cursor: pointer; color: #991b1b;",
                                        onclick: move |_| form.write().remove_unwanted(&remove_id),
                                        "×"
                                    }
                                }
                            }
                        }
                        select {
                            style: "width: 100%; padding: 6px; border: 1px solid #ddd; border-radius: 4px; font-size: 13px;",
                            onchange: move |e| form.write().add_unwanted(e.value()),
                            option { value: "", selected: true, "Add..." }
                            for (id, name) in candidates_unwanted {
                                option { value: "{id}", "{name}" }
                            }
                        }
                    }
                }

                // Buttons
                div {
                    style: "display: flex; justify-content: flex-end; gap: 10px; margin-top: 24px;",
                    button {
                        r#type: "button",
                        style: "padding: 8px 20px; border: 1px solid #ddd;
                               background: white; color: #333; border-radius: 4px;
                               cursor: pointer; font-size: 14px;",
                        onclick: move |_| on_cancel.call(()),
                        disabled: submitting,
                        "Cancel"
                    }
                    button {
                        r#type: "button",
                        style: "padding: 8px 20px; border: none;
                               background: #2563eb; color: white; border-radius: 4px;
                               cursor: pointer; font-size: 14px;",
                        onclick: move |_| on_submit.call(()),
                        disabled: submitting,
                        "{save_label}"
                    }
                }
            }
        }
    }
}
