//! HTTP client for the backend REST endpoints, wrapping `gloo-net`.

use energy_monitor_app::config::ApiConfig;
use energy_monitor_app::error::ApiError;
use energy_monitor_app::ports::SensorApi;
use energy_monitor_app::ports::backend::{
    DeleteSensor, LogFileReply, NewSensor, SensorLogReply, SensorUpdate, SettingsUpdate,
    StatusReply,
};
use energy_monitor_domain::sensor::Reading;
use energy_monitor_domain::settings::Settings;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// [`SensorApi`] over `fetch`.
#[derive(Debug, Clone)]
pub struct HttpSensorApi {
    config: ApiConfig,
}

impl HttpSensorApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let resp = Request::get(&self.config.url(path))
            .send()
            .await
            .map_err(network)?;
        check_response(resp)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let resp = Request::post(&self.config.url(path))
            .json(body)
            .map_err(|err| ApiError::Decode(err.to_string()))?
            .send()
            .await
            .map_err(network)?;
        check_response(resp)
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Turn a non-2xx response into [`ApiError::Status`].
fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(ApiError::Status {
            status: resp.status(),
        })
    }
}

async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Percent-encode a query parameter value (handles `+`, `&`, `=`, `#`, spaces, etc.).
fn encode_query_value(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace(' ', "%20")
}

impl SensorApi for HttpSensorApi {
    async fn get_settings(&self) -> Result<Settings, ApiError> {
        json(self.get("/get_settings").await?).await
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<(), ApiError> {
        self.post_json("/update_settings", &update).await?;
        Ok(())
    }

    async fn update_sensor(&self, update: SensorUpdate) -> Result<(), ApiError> {
        self.post_json("/update_sensor", &update).await?;
        Ok(())
    }

    async fn add_sensor(&self, sensor: NewSensor) -> Result<(), ApiError> {
        let reply: StatusReply = json(self.post_json("/add_sensor", &sensor).await?).await?;
        reply.into_result()
    }

    async fn delete_sensor(&self, name: &str) -> Result<(), ApiError> {
        let body = DeleteSensor {
            name: name.to_string(),
        };
        let reply: StatusReply = json(self.post_json("/delete_sensor", &body).await?).await?;
        reply.into_result()
    }

    async fn get_sensor_log(&self, name: &str) -> Result<Vec<Reading>, ApiError> {
        let path = format!("/get_sensor_log?name={}", encode_query_value(name));
        let reply: SensorLogReply = json(self.get(&path).await?).await?;
        Ok(reply.readings)
    }

    async fn get_log_file(&self) -> Result<Vec<String>, ApiError> {
        let reply: LogFileReply = json(self.get("/get_log_file").await?).await?;
        Ok(reply.into_lines())
    }

    async fn readme(&self) -> Result<String, ApiError> {
        self.get("/readme")
            .await?
            .text()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn restart(&self) -> Result<u16, ApiError> {
        let resp = Request::post(&self.config.url("/restart"))
            .send()
            .await
            .map_err(network)?;
        Ok(resp.status())
    }
}
