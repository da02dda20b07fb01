//! Add-sensor overlay, offered in remote-GPIO mode only.

use energy_monitor_app::forms::SensorForm;
use energy_monitor_app::view::Overlay;
use leptos::prelude::*;

use super::OverlayFrame;
use super::sensor_card::TypeSelect;
use crate::controller::use_controller;

#[component]
pub fn AddSensorPanel() -> impl IntoView {
    view! {
        <OverlayFrame kind=Overlay::AddSensor title="Add Sensor">
            <AddSensorFields/>
        </OverlayFrame>
    }
}

/// Rebuilt, blank, every time the overlay opens.
#[component]
fn AddSensorFields() -> impl IntoView {
    let ctl = use_controller();
    let blank = SensorForm::default();

    let name = RwSignal::new(blank.name);
    let sensor_type = RwSignal::new(blank.sensor_type);
    let max_power = RwSignal::new(blank.max_power);
    let rating = RwSignal::new(blank.rating);
    let address = RwSignal::new(blank.address);

    let save = move |_| {
        let form = SensorForm {
            name: name.get_untracked(),
            sensor_type: sensor_type.get_untracked(),
            max_power: max_power.get_untracked(),
            rating: rating.get_untracked(),
            address: address.get_untracked(),
        };
        ctl.spawn(move |c| async move { c.save_new_sensor(form).await });
    };

    view! {
        <div class="edit-data">
            <label class="edit-entry">
                "Name:"
                <input type="text" bind:value=name/>
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
                <input type="text" placeholder="0x40" bind:value=address/>
            </label>
        </div>
        <div class="overlay-buttons">
            <button on:click=move |_| ctl.get().close_overlay()>"Cancel"</button>
            <button class="save-button" on:click=save>"Add"</button>
        </div>
    }
}
