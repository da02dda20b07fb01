//! Realtime channel port: outbound half of the `sensor_update` feed.

/// Asks the server for a fresh `sensor_update`.
///
/// The same request serves as the periodic refresh (it is re-emitted for
/// every update received) and as the forced refresh after a mutation.
pub trait UpdateChannel {
    /// Emit one `sensor_update_request` event with no payload.
    fn request_update(&self);
}

