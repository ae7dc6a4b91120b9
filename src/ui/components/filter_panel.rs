use chrono::NaiveTime;
use dioxus::prelude::*;

use crate::domain::filter::FilterCriteria;
use crate::domain::player::{SkillLevel, Weekday};

/// Sidebar bound directly to the criteria signal. Every change triggers a
/// full re-filter upstream; there is nothing to submit.
#[component]
pub fn FilterPanel(criteria: Signal<FilterCriteria>) -> Element {
    let c = criteria.read().clone();

    let time_start = c
        .time_start
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default();
    let time_end = c
        .time_end
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default();
    let empathy_label = if c.min_empathy > 0 {
        format!("{}+ stars", c.min_empathy)
    } else {
        "All".to_string()
    };

    rsx! {
        aside {
            style: "width: 240px; flex-shrink: 0; background: white; border-radius: 12px;
                   padding: 16px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);
                   display: flex; flex-direction: column; gap: 16px; align-self: flex-start;",

            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                h2 { style: "margin: 0; font-size: 16px;", "Filters" }
                button {
                    style: "background: none; border: none; color: #2563eb; cursor: pointer; font-size: 13px;",
                    onclick: move |_| criteria.write().reset(),
                    "Reset"
                }
            }

            input {
                r#type: "text",
                placeholder: "Search by name...",
                value: "{c.search}",
                oninput: move |e| criteria.write().search = e.value(),
                style: "width: 100%; padding: 8px 10px; border: 1px solid #ddd; border-radius: 6px; font-size: 13px;",
            }

            div {
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 6px;", "Level" }
                for level in SkillLevel::ALL {
                    label {
                        style: "display: flex; align-items: center; gap: 6px; font-size: 13px; padding: 2px 0; cursor: pointer;",
                        input {
                            r#type: "checkbox",
                            checked: c.levels.contains(&level),
                            onchange: move |_| criteria.write().toggle_level(level),
                        }
                        "{level.label()}"
                    }
                }
            }

            div {
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 6px;", "Empathy" }
                div {
                    style: "display: flex; align-items: center; gap: 2px;",
                    for value in 1..=5u8 {
                        button {
                            style: if value <= c.min_empathy {
                                "background: none; border: none; cursor: pointer; font-size: 18px; color: #f59e0b;"
                            } else {
                                "background: none; border: none; cursor: pointer; font-size: 18px; color: #d1d5db;"
                            },
                            onclick: move |_| criteria.write().toggle_min_empathy(value),
                            "★"
                        }
                    }
                    span { style: "font-size: 12px; color: #666; margin-left: 6px;", "{empathy_label}" }
                }
            }

            div {
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 6px;", "Days" }
                for day in Weekday::ALL {
                    label {
                        style: "display: flex; align-items: center; gap: 6px; font-size: 13px; padding: 2px 0; cursor: pointer;",
                        input {
                            r#type: "checkbox",
                            checked: c.days.contains(&day),
                            onchange: move |_| criteria.write().toggle_day(day),
                        }
                        "{day.label()}"
                    }
                }
            }

            div {
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 6px;", "Time window" }
                div {
                    style: "display: flex; align-items: center; gap: 6px;",
                    input {
                        r#type: "time",
                        value: "{time_start}",
                        onchange: move |e| {
                            criteria.write().time_start =
                                NaiveTime::parse_from_str(&e.value(), "%H:%M").ok();
                        },
                        style: "flex: 1; padding: 4px; border: 1px solid #ddd; border-radius: 6px; font-size: 13px;",
                    }
                    span { style: "color: #999;", "-" }
                    input {
                        r#type: "time",
                        value: "{time_end}",
                        onchange: move |e| {
                            criteria.write().time_end =
                                NaiveTime::parse_from_str(&e.value(), "%H:%M").ok();
                        },
                        style: "flex: 1; padding: 4px; border: 1px solid #ddd; border-radius: 6px; font-size: 13px;",
                    }
                }
            }

            div {
                div { style: "font-size: 13px; font-weight: 600; margin-bottom: 6px;", "Partners" }
                input {
                    r#type: "text",
                    placeholder: "Search preferences...",
                    value: "{c.partner_search}",
                    oninput: move |e| criteria.write().partner_search = e.value(),
                    style: "width: 100%; padding: 8px 10px; border: 1px solid #ddd; border-radius: 6px; font-size: 13px;",
                }
            }
        }
    }
}
