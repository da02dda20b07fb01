//! The page's single view controller, shared with components through context.

use std::future::Future;
use std::rc::Rc;

use energy_monitor_app::controller::ViewController;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpSensorApi;
use crate::presenter::SignalPresenter;
use crate::scheduler::IntervalScheduler;
use crate::socket::SocketChannel;

pub type Controller =
    ViewController<HttpSensorApi, SocketChannel, IntervalScheduler, SignalPresenter>;

/// `Copy` handle on the controller, usable from any event handler.
#[derive(Clone, Copy)]
pub struct ControllerHandle(StoredValue<Rc<Controller>, LocalStorage>);

impl ControllerHandle {
    #[must_use]
    pub fn new(controller: Rc<Controller>) -> Self {
        Self(StoredValue::new_local(controller))
    }

    #[must_use]
    pub fn get(&self) -> Rc<Controller> {
        self.0.get_value()
    }

    /// Run one async controller operation on the browser's event loop.
    pub fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Rc<Controller>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(task(self.get()));
    }
}

/// Access the controller from Leptos context.
///
/// Must be called below [`crate::App`].
#[must_use]
pub fn use_controller() -> ControllerHandle {
    expect_context::<ControllerHandle>()
}
