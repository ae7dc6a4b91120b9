use dioxus::prelude::*;
use tracing::error;

use crate::domain::filter::{name_index, FilterCriteria};
use crate::domain::form::PlayerForm;
use crate::domain::player::Player;
use crate::services::{Notification, RosterService};
use crate::storage::BackendMode;
use crate::ui::cards::project;
use crate::ui::components::{DeleteDialog, FilterPanel, PlayerCardView, PlayerFormModal, ToastView};

/// Root of the roster UI. Owns the in-memory record store (the `players`
/// signal) and all transient UI state; every mutation flows through the
/// roster service and, in realtime mode, comes back via the snapshot
/// subscription that replaces the store wholesale.
#[component]
pub fn App() -> Element {
    let service = use_context::<RosterService>();

    let mut players = use_signal(Vec::<Player>::new);
    let criteria = use_signal(FilterCriteria::default);
    let mut form = use_signal(PlayerForm::default);
    let mut pending_delete = use_signal(|| None::<Player>);
    let mut list_view = use_signal(|| false);
    let mut filters_open = use_signal(|| true);
    let mut toast = use_signal(|| None::<Notification>);
    let mut toast_epoch = use_signal(|| 0u64);

    // Newest toast replaces the display and restarts the dismiss timer; the
    // epoch keeps a stale timer from clearing a newer message.
    let mut notify = move |notification: Notification| {
        let epoch = toast_epoch() + 1;
        toast_epoch.set(epoch);
        toast.set(Some(notification));
        spawn(async move {
            tokio::time::sleep(Notification::DISPLAY_DURATION).await;
            if toast_epoch() == epoch {
                toast.set(None);
            }
        });
    };

    // Initial load, then (realtime mode only) follow the snapshot stream.
    // Each snapshot replaces the whole store before filters re-run.
    use_future({
        let service = service.clone();
        move || {
            let service = service.clone();
            async move {
                match service.load_all().await {
                    Ok(list) => players.set(list),
                    Err(err) => {
                        error!(error = %err, "initial roster load failed");
                        notify(Notification::error("Could not load the roster"));
                    }
                }

                let Some(mut snapshots) = service.subscribe() else {
                    return;
                };
                loop {
                    match snapshots.recv().await {
                        Ok(snapshot) => players.set(snapshot),
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        }
    });

    let handle_submit = {
        let service = service.clone();
        move |_: ()| {
            let built = form.read().build_player();
            let player = match built {
                Ok(player) => player,
                Err(err) => {
                    // Validation failure: notify and leave the form as-is.
                    notify(Notification::error(err.to_string()));
                    return;
                }
            };
            if !form.write().begin_submit() {
                return;
            }

            let service = service.clone();
            spawn(async move {
                let creating = player.id.is_empty();
                match service.save(player).await {
                    Ok(_) => {
                        // Local mode has no snapshot stream; re-read the blob
                        // directly. Realtime mode round-trips through the
                        // subscription instead.
                        if service.mode() == BackendMode::Local {
                            if let Ok(list) = service.load_all().await {
                                players.set(list);
                            }
                        }
                        form.write().finish_submit(true);
                        notify(Notification::success(if creating {
                            "Player added"
                        } else {
                            "Player updated"
                        }));
                    }
                    Err(err) => {
                        error!(error = %err, "saving player failed");
                        form.write().finish_submit(false);
                        notify(Notification::error("Could not save the player"));
                    }
                }
            });
        }
    };

    let handle_delete = {
        let service = service.clone();
        move |id: String| {
            let service = service.clone();
            spawn(async move {
                match service.delete(&id).await {
                    Ok(()) => {
                        if service.mode() == BackendMode::Local {
                            if let Ok(list) = service.load_all().await {
                                players.set(list);
                            }
                        }
                        notify(Notification::success("Player removed"));
                    }
                    Err(err) => {
                        error!(error = %err, "deleting player failed");
                        notify(Notification::error("Could not delete the player"));
                    }
                }
                pending_delete.set(None);
            });
        }
    };

    let open_edit = move |id: String| {
        let selected = players.read().iter().find(|p| p.id == id).cloned();
        if let Some(player) = selected {
            form.write().open_edit(&player);
        }
    };

    let request_delete = move |id: String| {
        let selected = players.read().iter().find(|p| p.id == id).cloned();
        if let Some(player) = selected {
            pending_delete.set(Some(player));
        }
    };

    let roster = players.read().clone();
    let names = name_index(&roster);
    let current = criteria.read().clone();
    let effective = if current.is_active() {
        current.apply(&roster, &names)
    } else {
        roster.clone()
    };
    let cards = project(&effective, &names);
    let count = cards.len();
    let is_list = list_view();
    let show_filters = filters_open();
    let form_open = form.read().is_open();
    let pending = pending_delete.read().clone();
    let current_toast = toast.read().clone();

    rsx! {
        div {
            style: "min-height: 100vh; background: #f1f5f9; font-family: system-ui, sans-serif;
                   display: flex; flex-direction: column;",

            header {
                style: "background: white; padding: 14px 24px; display: flex; align-items: center;
                       gap: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.08);",
                h1 { style: "margin: 0; font-size: 20px;", "🎾 Tennis Roster" }
                span { style: "color: #666; font-size: 14px;", "({count})" }
                div { style: "flex: 1;" }
                button {
                    style: if show_filters {
                        "padding: 6px 12px; border: 1px solid #2563eb; background: #eff6ff; color: #2563eb; border-radius: 4px; cursor: pointer; margin-right: 8px;"
                    } else {
                        "padding: 6px 12px; border: 1px solid #ddd; background: white; color: #555; border-radius: 4px; cursor: pointer; margin-right: 8px;"
                    },
                    onclick: move |_| {
                        let open = filters_open();
                        filters_open.set(!open);
                    },
                    "Filters"
                }
                button {
                    style: if !is_list {
                        "padding: 6px 12px; border: 1px solid #2563eb; background: #eff6ff; color: #2563eb; border-radius: 4px 0 0 4px; cursor: pointer;"
                    } else {
                        "padding: 6px 12px; border: 1px solid #ddd; background: white; color: #555; border-radius: 4px 0 0 4px; cursor: pointer;"
                    },
                    onclick: move |_| list_view.set(false),
                    "Grid"
                }
                button {
                    style: if is_list {
                        "padding: 6px 12px; border: 1px solid #2563eb; background: #eff6ff; color: #2563eb; border-radius: 0 4px 4px 0; cursor: pointer;"
                    } else {
                        "padding: 6px 12px; border: 1px solid #ddd; background: white; color: #555; border-radius: 0 4px 4px 0; cursor: pointer;"
                    },
                    onclick: move |_| list_view.set(true),
                    "List"
                }
                button {
                    style: "padding: 8px 16px; border: none; background: #2563eb; color: white;
                           border-radius: 6px; cursor: pointer; font-size: 14px;",
                    onclick: move |_| form.write().open_new(),
                    "+ New Player"
                }
            }

            main {
                style: "display: flex; gap: 20px; padding: 20px 24px; align-items: flex-start; flex: 1;",

                // Collapsing the sidebar hides the controls but keeps the
                // criteria applied.
                if show_filters {
                    FilterPanel { criteria }
                }

                section {
                    style: "flex: 1;",
                    if cards.is_empty() {
                        div {
                            style: "background: white; border-radius: 12px; padding: 48px;
                                   text-align: center; color: #888;",
                            div { style: "font-size: 40px; margin-bottom: 8px;", "🎾" }
                            "No players to show. Add one or loosen the filters."
                        }
                    } else {
                        div {
                            style: if is_list {
                                "display: flex; flex-direction: column; gap: 12px;"
                            } else {
                                "display: flex; flex-wrap: wrap; gap: 12px;"
                            },
                            for card in cards {
                                PlayerCardView {
                                    key: "{card.id}",
                                    card: card.clone(),
                                    list_view: is_list,
                                    on_edit: open_edit,
                                    on_delete: request_delete,
                                }
                            }
                        }
                    }
                }
            }

            if form_open {
                PlayerFormModal {
                    form,
                    roster: roster.clone(),
                    on_submit: handle_submit,
                    on_cancel: move |_| form.write().close(),
                }
            }

            if let Some(player) = pending {
                DeleteDialog {
                    player_name: player.full_name(),
                    on_confirm: {
                        let handle_delete = handle_delete.clone();
                        let id = player.id.clone();
                        move |_| handle_delete(id.clone())
                    },
                    on_cancel: move |_| pending_delete.set(None),
                }
            }

            if let Some(notification) = current_toast {
                ToastView { notification }
            }
        }
    }
}
