//! Sensor cards and their five panels.

use energy_monitor_app::forms::SensorForm;
use energy_monitor_app::view::{
    EditFormView, LOGS_FAILED_MESSAGE, MetricTile, NO_READINGS_MESSAGE, NO_SENSORS_MESSAGE,
    SensorCardView, SensorLogView,
};
use energy_monitor_domain::panel::Panel;
use energy_monitor_domain::sensor::SensorType;
use leptos::prelude::*;

use crate::controller::use_controller;
use crate::presenter::use_signals;

/// The sensor container: one card per sensor, or the empty-state message.
#[component]
pub fn SensorGrid() -> impl IntoView {
    let signals = use_signals();
    view! {
        <Show
            when=move || !signals.empty.get()
            fallback=|| view! { <p class="no-sensors">{NO_SENSORS_MESSAGE}</p> }
        >
            <div class="sensor-container">
                <For
                    each=move || signals.cards.get()
                    key=|(name, _)| name.clone()
                    children=|(_, card)| view! { <SensorCard card/> }
                />
            </div>
        </Show>
    }
}

#[component]
fn SensorCard(card: RwSignal<SensorCardView>) -> impl IntoView {
    let ctl = use_controller();
    let name = move || card.with(|c| c.name.clone());

    let actions = move || {
        card.with(SensorCardView::shows_actions).then(|| {
            let name = name();
            let log_name = name.clone();
            view! {
                <span class="sensor-actions">
                    <i
                        class="fa-solid fa-list log-icon"
                        title="Readings log"
                        on:click=move |_| ctl.get().open_log(&log_name)
                    ></i>
                    <i
                        class="fa-solid fa-pen-to-square edit-icon"
                        title="Edit"
                        on:click=move |_| ctl.get().enter_edit(&name)
                    ></i>
                </span>
            }
        })
    };

    let body = move || {
        let current = card.get();
        let name = current.name.clone();
        match current.panel {
            Panel::View => view! { <LivePanel tiles=current.tiles/> }.into_any(),
            Panel::Edit => view! { <EditPanel name edit=current.edit/> }.into_any(),
            Panel::Log => view! { <LogPanel name log=current.log/> }.into_any(),
            Panel::DeleteConfirm => view! { <DeleteConfirmPanel name/> }.into_any(),
            Panel::UndoCountdown { remaining } => {
                view! { <CountdownPanel name remaining/> }.into_any()
            }
            Panel::Deleted => ().into_any(),
        }
    };

    view! {
        <div class="sensor-card" class:hidden=move || card.with(SensorCardView::is_hidden)>
            <div class="sensor-header">
                <i class=move || card.with(|c| format!("fa-solid {} sensor-icon", c.icon))></i>
                <span class=move || card.with(|c| format!("sensor-name {}", c.type_class))>
                    {name}
                </span>
                <span class="sensor-badge">{move || card.with(|c| c.badge.clone())}</span>
                {actions}
            </div>
            {body}
            <p class="time-stamp">
                {move || card.with(SensorCardView::timestamp_line)}
            </p>
        </div>
    }
}

#[component]
fn LivePanel(tiles: Vec<MetricTile>) -> impl IntoView {
    view! {
        <div class="sensor-data">
            {tiles
                .into_iter()
                .map(|tile| {
                    let icon_class = match tile.icon_class {
                        Some(extra) => format!("fa-solid {} {extra}", tile.icon),
                        None => format!("fa-solid {}", tile.icon),
                    };
                    view! {
                        <div class="sensor-metric">
                            <i class=icon_class></i>
                            <span class=tile.class>{tile.text}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn EditPanel(name: String, edit: EditFormView) -> impl IntoView {
    let ctl = use_controller();
    let signals = use_signals();
    let EditFormView { form, .. } = edit;
    // Follows settings saves made while the form stays open.
    let address_disabled = move || !signals.header.with(|h| h.remote_gpio);

    let new_name = RwSignal::new(form.name);
    let sensor_type = RwSignal::new(form.sensor_type);
    let max_power = RwSignal::new(form.max_power);
    let rating = RwSignal::new(form.rating);
    let address = RwSignal::new(form.address);

    let cancel_name = name.clone();
    let delete_name = name.clone();
    let save = move |_| {
        let form = SensorForm {
            name: new_name.get_untracked(),
            sensor_type: sensor_type.get_untracked(),
            max_power: max_power.get_untracked(),
            rating: rating.get_untracked(),
            address: address.get_untracked(),
        };
        let name = name.clone();
        ctl.spawn(move |c| async move { c.save_sensor(&name, form).await });
    };

    view! {
        <div class="edit-form">
            <div class="sensor-edit-header">
                <i
                    class="fa-solid fa-arrow-left"
                    title="Back"
                    on:click=move |_| ctl.get().cancel_edit(&cancel_name)
                ></i>
                <h4>"Edit Sensor"</h4>
                <i
                    class="fa-solid fa-trash delete-icon"
                    title="Delete"
                    on:click=move |_| ctl.get().show_delete_confirmation(&delete_name)
                ></i>
                <i class="fa-solid fa-floppy-disk save-icon" title="Save" on:click=save></i>
            </div>
            <div class="edit-data">
                <label class="edit-entry">
                    "Name:"
                    <input type="text" bind:value=new_name/>
                </label>
                <label class="edit-entry">
                    "Type:"
                    <TypeSelect selected=sensor_type/>
                </label>
                <label class="edit-entry">
                    "Max Power (W):"
                    <input type="number" bind:value=max_power/>
                </label>
                <label class="edit-entry">
                    "Rating (V):"
                    <input type="number" bind:value=rating/>
                </label>
                <label class="edit-entry">
                    "Address:"
                    <input type="text" bind:value=address disabled=address_disabled/>
                </label>
            </div>
        </div>
    }
}

/// Sensor type dropdown shared with the add-sensor form.
#[component]
pub(super) fn TypeSelect(selected: RwSignal<String>) -> impl IntoView {
    view! {
        <select
            prop:value=move || selected.get()
            on:change=move |ev| selected.set(event_target_value(&ev))
        >
            {SensorType::SELECTABLE
                .into_iter()
                .map(|kind| {
                    let value = kind.as_str();
                    view! {
                        <option value=value selected=move || selected.get() == value>
                            {value}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

#[component]
fn LogPanel(name: String, log: SensorLogView) -> impl IntoView {
    let ctl = use_controller();
    let close_name = name.clone();

    let entries = match log {
        SensorLogView::Empty => view! { <p>{NO_READINGS_MESSAGE}</p> }.into_any(),
        SensorLogView::Failed => view! { <p class="error">{LOGS_FAILED_MESSAGE}</p> }.into_any(),
        SensorLogView::Rows(rows) => rows
            .into_iter()
            .map(|row| {
                view! {
                    <div class="log-entry">
                        <p>
                            <strong>{row.time_stamp}</strong>
                        </p>
                        <p class="reading-details">
                            {format!(
                                "V: {} V | A: {} A | W: {} W | {}",
                                row.voltage,
                                row.current,
                                row.power,
                                row.fourth,
                            )}
                        </p>
                    </div>
                }
            })
            .collect_view()
            .into_any(),
    };

    view! {
        <div class="log-panel">
            <div class="sensor-edit-header">
                <i
                    class="fa-solid fa-arrow-left"
                    title="Back"
                    on:click=move |_| ctl.get().close_log(&close_name)
                ></i>
                <h4>"Readings"</h4>
                <i
                    class="fa-solid fa-rotate-right"
                    title="Refresh"
                    on:click=move |_| {
                        let name = name.clone();
                        ctl.spawn(move |c| async move { c.refresh_log(&name).await });
                    }
                ></i>
            </div>
            <div class="log-entries">{entries}</div>
        </div>
    }
}

#[component]
fn DeleteConfirmPanel(name: String) -> impl IntoView {
    let ctl = use_controller();
    let cancel_name = name.clone();
    view! {
        <div class="delete-confirmation">
            <p>"Confirm delete?"</p>
            <i
                class="fa-solid fa-check confirm-delete"
                title="Delete"
                on:click=move |_| {
                    let name = name.clone();
                    ctl.spawn(move |c| async move { c.start_countdown(&name).await });
                }
            ></i>
            <i
                class="fa-solid fa-xmark cancel-delete"
                title="Cancel"
                on:click=move |_| ctl.get().cancel_delete(&cancel_name)
            ></i>
        </div>
    }
}

#[component]
fn CountdownPanel(name: String, remaining: u8) -> impl IntoView {
    let ctl = use_controller();
    view! {
        <div class="undo-countdown">
            <p>{format!("Deleting in {remaining} seconds...")}</p>
            <i
                class="fa-solid fa-rotate-left undo-delete"
                title="Undo"
                on:click=move |_| ctl.get().undo(&name)
            ></i>
        </div>
    }
}
