//! End-to-end flows through the view controller.
//!
//! Every port is backed by an in-memory fake: the backend keeps settings and
//! records requests, the channel counts re-requests, the scheduler hands out
//! handles whose cancellation is observable, and the presenter records what
//! the page would show.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use energy_monitor_app::config::CountdownConfig;
use energy_monitor_app::controller::ViewController;
use energy_monitor_app::error::ApiError;
use energy_monitor_app::forms::{SensorForm, SettingsForm};
use energy_monitor_app::ports::backend::{NewSensor, SensorUpdate, SettingsUpdate};
use energy_monitor_app::ports::{CountdownScheduler, Presenter, SensorApi, TimerHandle, UpdateChannel};
use energy_monitor_app::view::{
    AboutView, DashboardView, HeaderView, LogFileView, NO_SENSORS_MESSAGE, Overlay, RestartView,
    SensorCardView, SensorsBody, SettingsView,
};
use energy_monitor_domain::log_line::LogLine;
use energy_monitor_domain::panel::Panel;
use energy_monitor_domain::scalar::Scalar;
use energy_monitor_domain::sensor::{Reading, SensorSnapshot};
use energy_monitor_domain::settings::{PollIntervals, Settings};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Request {
    UpdateSensor(SensorUpdate),
    AddSensor(NewSensor),
    DeleteSensor(String),
    UpdateSettings(SettingsUpdate),
    Restart,
}

#[derive(Default)]
struct Backend {
    settings: RefCell<Settings>,
    requests: RefCell<Vec<Request>>,
    log_lines: RefCell<Option<Vec<String>>>,
    readme: RefCell<Option<String>>,
}

impl Backend {
    fn deletes(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Request::DeleteSensor(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

fn text(value: &str) -> Option<Scalar> {
    Some(Scalar::from(value))
}

impl SensorApi for &Backend {
    async fn get_settings(&self) -> Result<Settings, ApiError> {
        Ok(self.settings.borrow().clone())
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<(), ApiError> {
        *self.settings.borrow_mut() = Settings {
            poll_intervals: PollIntervals {
                solar: text(&update.solar_interval),
                wind: text(&update.wind_interval),
                battery: text(&update.battery_interval),
            },
            max_log: text(&update.max_log),
            max_readings: text(&update.max_readings),
            mqtt_broker: text(&update.mqtt_broker),
            mqtt_port: text(&update.mqtt_port),
            webserver_host: text(&update.webserver_host),
            webserver_port: text(&update.webserver_port),
            remote_gpio: Some(update.remote_gpio),
            gpio_address: text(&update.gpio_address),
        };
        self.requests.borrow_mut().push(Request::UpdateSettings(update));
        Ok(())
    }

    async fn update_sensor(&self, update: SensorUpdate) -> Result<(), ApiError> {
        self.requests.borrow_mut().push(Request::UpdateSensor(update));
        Ok(())
    }

    async fn add_sensor(&self, sensor: NewSensor) -> Result<(), ApiError> {
        self.requests.borrow_mut().push(Request::AddSensor(sensor));
        Ok(())
    }

    async fn delete_sensor(&self, name: &str) -> Result<(), ApiError> {
        self.requests
            .borrow_mut()
            .push(Request::DeleteSensor(name.to_string()));
        Ok(())
    }

    async fn get_sensor_log(&self, _name: &str) -> Result<Vec<Reading>, ApiError> {
        Ok(Vec::new())
    }

    async fn get_log_file(&self) -> Result<Vec<String>, ApiError> {
        self.log_lines
            .borrow()
            .clone()
            .ok_or_else(|| ApiError::Network("connection refused".to_string()))
    }

    async fn readme(&self) -> Result<String, ApiError> {
        self.readme
            .borrow()
            .clone()
            .ok_or(ApiError::Status { status: 404 })
    }

    async fn restart(&self) -> Result<u16, ApiError> {
        self.requests.borrow_mut().push(Request::Restart);
        Ok(200)
    }
}

#[derive(Default)]
struct Channel {
    requests: Cell<usize>,
}

impl UpdateChannel for &Channel {
    fn request_update(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

struct Timer {
    name: String,
    cancelled: Rc<RefCell<Vec<String>>>,
}

impl TimerHandle for Timer {
    fn cancel(self) {
        self.cancelled.borrow_mut().push(self.name);
    }
}

#[derive(Default)]
struct Scheduler {
    started: RefCell<Vec<(String, Duration)>>,
    cancelled: Rc<RefCell<Vec<String>>>,
}

impl CountdownScheduler for &Scheduler {
    type Handle = Timer;

    fn start(&self, name: &str, period: Duration) -> Timer {
        self.started.borrow_mut().push((name.to_string(), period));
        Timer {
            name: name.to_string(),
            cancelled: Rc::clone(&self.cancelled),
        }
    }
}

#[derive(Default)]
struct Page {
    header: Cell<HeaderView>,
    renders: RefCell<Vec<DashboardView>>,
    cards: RefCell<Vec<SensorCardView>>,
    overlay: Cell<Option<Overlay>>,
    settings: RefCell<Option<SettingsView>>,
    log_file: RefCell<Option<LogFileView>>,
    about: RefCell<Option<AboutView>>,
    restart: RefCell<Vec<RestartView>>,
    alerts: RefCell<Vec<String>>,
    reloads: Cell<usize>,
}

impl Page {
    fn last_card(&self, name: &str) -> Option<SensorCardView> {
        self.cards
            .borrow()
            .iter()
            .rev()
            .find(|card| card.name == name)
            .cloned()
    }
}

impl Presenter for &Page {
    fn show_header(&self, header: HeaderView) {
        self.header.set(header);
    }

    fn show_sensors(&self, view: DashboardView) {
        self.renders.borrow_mut().push(view);
    }

    fn show_card(&self, card: SensorCardView) {
        self.cards.borrow_mut().push(card);
    }

    fn show_overlay(&self, overlay: Option<Overlay>) {
        self.overlay.set(overlay);
    }

    fn show_settings(&self, view: SettingsView) {
        *self.settings.borrow_mut() = Some(view);
    }

    fn show_log_file(&self, view: LogFileView) {
        *self.log_file.borrow_mut() = Some(view);
    }

    fn show_about(&self, view: AboutView) {
        *self.about.borrow_mut() = Some(view);
    }

    fn show_restart(&self, view: RestartView) {
        self.restart.borrow_mut().push(view);
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

#[derive(Default)]
struct Harness {
    backend: Backend,
    channel: Channel,
    scheduler: Scheduler,
    page: Page,
}

type Controller<'a> = ViewController<&'a Backend, &'a Channel, &'a Scheduler, &'a Page>;

impl Harness {
    fn controller(&self) -> Controller<'_> {
        ViewController::new(
            &self.backend,
            &self.channel,
            &self.scheduler,
            &self.page,
            CountdownConfig::default(),
        )
    }
}

const UPDATE: &str = r#"{
    "Roof": {"address": 64, "type": "Solar", "max_power": 100, "rating": 12,
             "data": {"voltage": 12.6, "current": 3.0, "power": 37.8, "output": 105.0,
                      "time_stamp": "10:00:00AM on January 01, 2024",
                      "readings": [{"voltage": 12.5, "current": 2.9, "power": 36.2,
                                    "output": 104.2, "time_stamp": "09:59:55AM"}]}},
    "Bank": {"address": 65, "type": "Battery", "max_power": 200, "rating": 12,
             "data": {"voltage": 12.2, "current": 1.0, "power": 12.2, "state_of_charge": 48,
                      "status": "charging", "time_stamp": "10:00:01AM on January 01, 2024",
                      "readings": []}},
    "totals": {"solar_total": 37.8, "wind_total": 0.0, "battery_soc_total": 48.0,
               "battery_in_total": 12.2, "battery_out_total": 0.0}
}"#;

fn update() -> SensorSnapshot {
    serde_json::from_str(UPDATE).unwrap()
}

async fn delete_until_countdown(controller: &Controller<'_>, name: &str) {
    controller.enter_edit(name);
    controller.show_delete_confirmation(name);
    controller.start_countdown(name).await;
}

// ---------------------------------------------------------------------------
// Live rendering
// ---------------------------------------------------------------------------

#[test]
fn should_render_identical_views_for_identical_updates() {
    let harness = Harness::default();
    let controller = harness.controller();

    controller.handle_sensor_update(update());
    controller.handle_sensor_update(update());

    let renders = harness.page.renders.borrow();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[0], renders[1]);
}

#[test]
fn should_show_empty_state_when_update_has_no_sensors() {
    let harness = Harness::default();
    let controller = harness.controller();

    controller.handle_sensor_update(serde_json::from_str("{}").unwrap());

    assert_eq!(harness.page.renders.borrow()[0].body, SensorsBody::Empty);
    assert_eq!(NO_SENSORS_MESSAGE, "No sensors found.");
}

#[test]
fn should_render_totals_alongside_cards() {
    let harness = Harness::default();
    let controller = harness.controller();

    controller.handle_sensor_update(update());

    let renders = harness.page.renders.borrow();
    let totals = renders[0].totals.as_ref().unwrap();
    assert_eq!(totals.solar, "37.8W");
    assert_eq!(totals.soc_class, "battery-medium");
    let SensorsBody::Cards(cards) = &renders[0].body else {
        panic!("expected cards");
    };
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].tiles[3].icon_class, Some("battery-charging"));
}

#[test]
fn should_not_rerender_while_paused_but_rerequest_each_update() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    controller.enter_edit("Roof");

    for _ in 0..5 {
        controller.handle_sensor_update(update());
    }

    assert!(controller.is_paused());
    assert_eq!(harness.page.renders.borrow().len(), 1);
    assert_eq!(harness.channel.requests.get(), 6);
}

#[test]
fn should_resume_rendering_when_edit_cancelled() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    controller.enter_edit("Roof");
    controller.handle_sensor_update(update());
    controller.cancel_edit("Roof");
    controller.handle_sensor_update(update());

    assert!(!controller.is_paused());
    assert_eq!(harness.page.renders.borrow().len(), 2);
}

#[test]
fn should_stay_paused_while_one_card_edits_and_another_closes_its_log() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    controller.enter_edit("Roof");
    controller.open_log("Bank");
    controller.close_log("Bank");

    controller.handle_sensor_update(update());

    assert_eq!(controller.panel("Roof"), Panel::Edit);
    assert!(controller.is_paused());
    assert_eq!(harness.page.renders.borrow().len(), 1);
}

// ---------------------------------------------------------------------------
// Edit flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_send_edited_fields_and_refresh_on_save() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    controller.enter_edit("Roof");

    let mut form = harness.page.last_card("Roof").unwrap().edit.form;
    form.name = "Roof East".to_string();
    form.address = "0x41".to_string();
    controller.save_sensor("Roof", form).await;

    assert_eq!(controller.panel("Roof"), Panel::View);
    assert!(!controller.is_paused());
    let requests = harness.backend.requests.borrow();
    let Request::UpdateSensor(sent) = &requests[0] else {
        panic!("expected an update_sensor request");
    };
    assert_eq!(sent.original_name, "Roof");
    assert_eq!(sent.name, "Roof East");
    assert_eq!(sent.sensor_type, "Solar");
    assert_eq!(sent.max_power, "100");
    assert_eq!(sent.address, Some(0x41));
    assert_eq!(harness.channel.requests.get(), 2);
}

#[tokio::test]
async fn should_send_null_address_when_text_is_not_hex() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    controller.enter_edit("Roof");

    let mut form = harness.page.last_card("Roof").unwrap().edit.form;
    form.address = "garbage".to_string();
    controller.save_sensor("Roof", form).await;

    let requests = harness.backend.requests.borrow();
    assert!(matches!(&requests[0], Request::UpdateSensor(sent) if sent.address.is_none()));
}

// ---------------------------------------------------------------------------
// Delete flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_send_no_delete_when_undone_before_expiry() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    delete_until_countdown(&controller, "Roof").await;

    controller.tick("Roof").await;
    controller.tick("Roof").await;
    controller.undo("Roof");

    assert!(harness.backend.deletes().is_empty());
    assert_eq!(controller.panel("Roof"), Panel::Edit);
    assert_eq!(controller.active_timers(), 0);
    assert_eq!(*harness.scheduler.cancelled.borrow(), vec!["Roof".to_string()]);
}

#[tokio::test]
async fn should_send_exactly_one_delete_and_reload_when_countdown_expires() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    delete_until_countdown(&controller, "Roof").await;

    let countdown = harness.page.last_card("Roof").unwrap().countdown();
    assert_eq!(countdown, Some(5));
    assert_eq!(
        *harness.scheduler.started.borrow(),
        vec![("Roof".to_string(), Duration::from_secs(1))]
    );

    for _ in 0..8 {
        controller.tick("Roof").await;
    }

    assert_eq!(harness.backend.deletes(), vec!["Roof".to_string()]);
    assert!(harness.page.last_card("Roof").unwrap().is_hidden());
    assert_eq!(harness.page.reloads.get(), 1);
    assert_eq!(controller.active_timers(), 0);
}

#[tokio::test]
async fn should_not_leak_timers_across_repeated_delete_and_undo() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    controller.enter_edit("Roof");

    for _ in 0..3 {
        controller.show_delete_confirmation("Roof");
        controller.start_countdown("Roof").await;
        controller.tick("Roof").await;
        controller.undo("Roof");
    }

    assert_eq!(controller.active_timers(), 0);
    assert_eq!(harness.scheduler.cancelled.borrow().len(), 3);
    assert!(harness.backend.deletes().is_empty());
}

#[tokio::test]
async fn should_run_independent_countdowns_per_sensor() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    delete_until_countdown(&controller, "Roof").await;
    delete_until_countdown(&controller, "Bank").await;

    controller.undo("Roof");
    for _ in 0..5 {
        controller.tick("Roof").await;
        controller.tick("Bank").await;
    }

    assert_eq!(harness.backend.deletes(), vec!["Bank".to_string()]);
    assert_eq!(controller.panel("Roof"), Panel::Edit);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_round_trip_saved_settings() {
    let harness = Harness::default();
    let controller = harness.controller();

    let form = SettingsForm {
        solar_interval: "5".to_string(),
        wind_interval: "7".to_string(),
        battery_interval: "10".to_string(),
        max_log: "100".to_string(),
        max_readings: "20".to_string(),
        mqtt_broker: "localhost".to_string(),
        mqtt_port: "1883".to_string(),
        webserver_host: "0.0.0.0".to_string(),
        webserver_port: "5000".to_string(),
        remote_gpio: true,
        gpio_address: "0x20".to_string(),
    };
    controller.save_settings(form.clone()).await;

    let read_back = controller.settings().await.unwrap();
    assert_eq!(read_back, form);
    assert_eq!(read_back.max_log, "100");
    assert_eq!(read_back.solar_interval, "5");
    assert!(read_back.remote_gpio);
    assert_eq!(read_back.gpio_address, "0x20");
}

#[tokio::test]
async fn should_fill_settings_panel_on_open() {
    let harness = Harness::default();
    harness.backend.settings.borrow_mut().max_log = Some(Scalar::Number(50.0));
    let controller = harness.controller();

    controller.open_settings().await;

    assert_eq!(harness.page.overlay.get(), Some(Overlay::Settings));
    let settings = harness.page.settings.borrow();
    let Some(SettingsView::Form(form)) = settings.as_ref() else {
        panic!("expected a settings form");
    };
    assert_eq!(form.max_log, "50");
    assert_eq!(form.mqtt_broker, "");
    assert!(!form.gpio_address_enabled());
}

#[tokio::test]
async fn should_enable_card_addresses_after_switching_to_remote_gpio() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.start().await;
    controller.handle_sensor_update(update());
    assert!(!harness.page.header.get().add_sensor_visible);

    controller
        .save_settings(SettingsForm {
            remote_gpio: true,
            ..SettingsForm::default()
        })
        .await;

    assert!(harness.page.header.get().add_sensor_visible);
    assert!(harness.page.last_card("Roof").unwrap().edit.address_enabled);
    assert!(harness.page.last_card("Bank").unwrap().edit.address_enabled);
    assert_eq!(harness.page.overlay.get(), None);
}

// ---------------------------------------------------------------------------
// Add sensor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_add_sensor_in_remote_gpio_mode() {
    let harness = Harness::default();
    harness.backend.settings.borrow_mut().remote_gpio = Some(true);
    let controller = harness.controller();
    controller.start().await;

    controller.open_add_sensor();
    assert_eq!(harness.page.overlay.get(), Some(Overlay::AddSensor));

    controller
        .save_new_sensor(SensorForm {
            name: "Mast".to_string(),
            sensor_type: "Wind".to_string(),
            max_power: "400".to_string(),
            rating: "24".to_string(),
            address: "0x44".to_string(),
        })
        .await;

    assert_eq!(harness.page.overlay.get(), None);
    let requests = harness.backend.requests.borrow();
    assert!(matches!(&requests[0], Request::AddSensor(sent) if sent.name == "Mast"));
    assert_eq!(harness.channel.requests.get(), 2);
}

// ---------------------------------------------------------------------------
// Log panels
// ---------------------------------------------------------------------------

#[test]
fn should_parse_error_log_line() {
    let line = LogLine::parse("2024-01-01 10:00:00,000 ERROR disk full");
    assert_eq!(line.level.as_deref(), Some("ERROR"));
    assert_eq!(line.message, "disk full");
}

#[tokio::test]
async fn should_show_escaped_log_file_lines() {
    let harness = Harness::default();
    *harness.backend.log_lines.borrow_mut() = Some(vec![
        "2024-01-01 10:00:00,000 ERROR disk full".to_string(),
        "no level <here>".to_string(),
    ]);
    let controller = harness.controller();

    controller.open_log_file().await;

    assert_eq!(harness.page.overlay.get(), Some(Overlay::LogFile));
    let log_file = harness.page.log_file.borrow();
    let Some(LogFileView::Lines(lines)) = log_file.as_ref() else {
        panic!("expected log lines");
    };
    assert!(lines[0].contains("ERROR</strong> disk full"));
    assert!(lines[0].contains(r#"<p class="log-timestamp">10:00:00 - 2024-01-01</p>"#));
    assert_eq!(lines[1], "no level &lt;here&gt;");
}

#[tokio::test]
async fn should_show_failure_when_log_file_unavailable() {
    let harness = Harness::default();
    let controller = harness.controller();

    controller.refresh_log_file().await;

    assert_eq!(*harness.page.log_file.borrow(), Some(LogFileView::Failed));
}

#[tokio::test]
async fn should_show_empty_log_file() {
    let harness = Harness::default();
    *harness.backend.log_lines.borrow_mut() = Some(Vec::new());
    let controller = harness.controller();

    controller.refresh_log_file().await;

    assert_eq!(*harness.page.log_file.borrow(), Some(LogFileView::Empty));
}

#[tokio::test]
async fn should_replace_card_log_with_refreshed_readings() {
    let harness = Harness::default();
    let controller = harness.controller();
    controller.handle_sensor_update(update());
    controller.open_log("Roof");
    assert!(controller.is_paused());

    controller.refresh_log("Roof").await;
    controller.close_log("Roof");

    assert!(!controller.is_paused());
    assert_eq!(controller.panel("Roof"), Panel::View);
}

// ---------------------------------------------------------------------------
// About and restart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_readme_as_html() {
    let harness = Harness::default();
    *harness.backend.readme.borrow_mut() = Some("# Energy Monitor".to_string());
    let controller = harness.controller();

    controller.open_about().await;

    let about = harness.page.about.borrow();
    let Some(AboutView::Document { html }) = about.as_ref() else {
        panic!("expected a document");
    };
    assert!(html.contains("<h1>Energy Monitor</h1>"));
}

#[tokio::test]
async fn should_walk_restart_through_confirm_progress_and_done() {
    let harness = Harness::default();
    let controller = harness.controller();

    controller.open_restart();
    controller.confirm_restart().await;

    assert_eq!(
        *harness.page.restart.borrow(),
        vec![RestartView::Confirm, RestartView::InProgress, RestartView::Done]
    );
    assert_eq!(*harness.backend.requests.borrow(), vec![Request::Restart]);

    controller.close_overlay();
    assert_eq!(harness.page.overlay.get(), None);
}
