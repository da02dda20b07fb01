//! Pure rendering of snapshots and session state into view models.
//!
//! Nothing here touches the page, so rendering the same input twice yields
//! equal views.

use energy_monitor_domain::log_line::LogLine;
use energy_monitor_domain::scalar::display_or;
use energy_monitor_domain::sensor::{Reading, Sensor, SensorSnapshot, Totals};

use crate::forms::SensorForm;
use crate::ports::TimerHandle;
use crate::ui_state::{FetchedLog, UiState};
use crate::view::{
    DashboardView, EditFormView, FlowBadge, HeaderView, LogFileView, MetricTile, ReadingRow,
    SensorCardView, SensorLogView, SensorsBody, TotalsView,
};

/// Render the whole sensor container for `snapshot`.
#[must_use]
pub fn render<H: TimerHandle>(snapshot: &SensorSnapshot, state: &UiState<H>) -> DashboardView {
    let totals = snapshot.totals.as_ref().map(render_totals);
    let body = if snapshot.is_empty() {
        SensorsBody::Empty
    } else {
        SensorsBody::Cards(
            snapshot
                .sensors
                .iter()
                .map(|(name, sensor)| render_card(name, sensor, state))
                .collect(),
        )
    };
    DashboardView { totals, body }
}

#[must_use]
pub fn render_header<H: TimerHandle>(state: &UiState<H>) -> HeaderView {
    HeaderView {
        remote_gpio: state.is_remote_gpio(),
        add_sensor_visible: state.is_remote_gpio(),
    }
}

/// Render one card with the panel the session state has for it.
#[must_use]
pub fn render_card<H: TimerHandle>(name: &str, sensor: &Sensor, state: &UiState<H>) -> SensorCardView {
    let latest = &sensor.data.latest;
    let sensor_type = sensor.sensor_type;

    let mut tiles = vec![
        tile("fa-wave-square", "voltage", format!("{} V", display_or(latest.voltage.as_ref(), "N/A"))),
        tile("fa-industry", "current", format!("{} A", display_or(latest.current.as_ref(), "N/A"))),
        tile("fa-bolt", "power", format!("{} W", display_or(latest.power.as_ref(), "N/A"))),
    ];
    if sensor_type.is_battery() {
        tiles.push(MetricTile {
            icon: "fa-battery",
            icon_class: Some(sensor.battery_status().css_class()),
            class: "soc",
            text: format!("{}%", display_or(latest.state_of_charge.as_ref(), "0")),
        });
    } else {
        tiles.push(tile(
            "fa-plug",
            "output",
            format!("{} W", display_or(sensor.max_power.as_ref(), "0")),
        ));
    }

    let log = match state.fetched_log(name) {
        Some(FetchedLog::Readings(readings)) => render_readings(readings),
        Some(FetchedLog::Failed) => SensorLogView::Failed,
        None => render_readings(&sensor.data.readings),
    };

    SensorCardView {
        name: name.to_string(),
        sensor_type,
        type_class: sensor_type.css_class(),
        icon: sensor_type.icon(),
        badge: match &sensor.rating {
            Some(rating) => format!("{sensor_type} · {rating}V"),
            None => sensor_type.to_string(),
        },
        panel: state.panel(name),
        tiles,
        time_stamp: latest.time_stamp.clone().unwrap_or_default(),
        edit: EditFormView {
            form: SensorForm::for_sensor(name, sensor),
            address_enabled: state.is_remote_gpio(),
        },
        log,
    }
}

fn tile(icon: &'static str, class: &'static str, text: String) -> MetricTile {
    MetricTile {
        icon,
        icon_class: None,
        class,
        text,
    }
}

/// Readings history, newest first.
#[must_use]
pub fn render_readings(readings: &[Reading]) -> SensorLogView {
    if readings.is_empty() {
        return SensorLogView::Empty;
    }
    let rows = readings
        .iter()
        .rev()
        .map(|reading| ReadingRow {
            time_stamp: reading.time_stamp.clone().unwrap_or_default(),
            voltage: display_or(reading.voltage.as_ref(), "N/A"),
            current: display_or(reading.current.as_ref(), "N/A"),
            power: display_or(reading.power.as_ref(), "N/A"),
            fourth: display_or(
                reading.output.as_ref().or(reading.state_of_charge.as_ref()),
                "",
            ),
        })
        .collect();
    SensorLogView::Rows(rows)
}

/// Header totals: watts with one decimal, SoC level class and net battery flow.
#[must_use]
pub fn render_totals(totals: &Totals) -> TotalsView {
    let soc = totals.battery_soc_total;
    let soc_class = if soc < 5.0 {
        "battery-empty"
    } else if soc < 25.0 {
        "battery-low"
    } else if soc < 50.0 {
        "battery-medium"
    } else if soc < 75.0 {
        "battery-high"
    } else {
        "battery-full"
    };

    let net = totals.battery_in_total - totals.battery_out_total;
    let flow = if net > 0.0 {
        FlowBadge::Charging {
            watts: format!("{:.1}W", totals.battery_in_total),
        }
    } else if net < 0.0 {
        FlowBadge::Discharging {
            watts: format!("{:.1}W", totals.battery_out_total),
        }
    } else {
        FlowBadge::Idle
    };

    TotalsView {
        solar: format!("{:.1}W", totals.solar_total),
        wind: format!("{:.1}W", totals.wind_total),
        soc: format!("{soc:.0}%"),
        soc_class,
        flow,
    }
}

/// Backend log file lines as escaped HTML fragments.
#[must_use]
pub fn render_log_file(lines: &[String]) -> LogFileView {
    if lines.is_empty() {
        return LogFileView::Empty;
    }
    LogFileView::Lines(lines.iter().map(|line| LogLine::parse(line).to_html()).collect())
}
