//! Callback-based API for event-driven front ends
//!
//! The rendering layer registers snapshot callbacks and the haptic layer
//! registers haptic callbacks. Each processed sensor update is one
//! recompute-then-notify step: the tracker recomputes, snapshot callbacks
//! see the new state, and haptic callbacks fire on the alignment edge.

use crate::algorithms::{AlignmentNotifier, BearingEngine, HapticState, TiltMapper};
use crate::api::types::{AlignmentEvent, ApiError, ApiResult, NavigationSnapshot};
use crate::hardware::{
    AuthorizationStatus, LocationProvider, MotionProvider, SensorError, SensorResult, SensorUpdate,
};
use crate::processing::NavigationTracker;
use crate::utils::config::AppConfig;
use std::collections::HashMap;

/// Callback function type for snapshot updates
pub type SnapshotCallback = Box<dyn Fn(&NavigationSnapshot) + Send>;

/// Callback function type for haptic notifications
pub type HapticCallback = Box<dyn Fn(&AlignmentEvent) + Send>;

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Callback-based navigation API
pub struct CallbackNavigationApi {
    tracker: NavigationTracker,
    notifier: AlignmentNotifier,
    callback_counter: u32,
    snapshot_callbacks: HashMap<CallbackHandle, SnapshotCallback>,
    haptic_callbacks: HashMap<CallbackHandle, HapticCallback>,
}

impl CallbackNavigationApi {
    pub fn new(tracker: NavigationTracker) -> Self {
        Self {
            tracker,
            notifier: AlignmentNotifier::new(),
            callback_counter: 0,
            snapshot_callbacks: HashMap::new(),
            haptic_callbacks: HashMap::new(),
        }
    }

    /// Build the engine and tilt mapping from a validated configuration
    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        config.validate()?;
        let engine = BearingEngine::default().with_tolerance(config.alignment_tolerance_deg);
        let tilt = TiltMapper::new(config.tilt_gain).with_surface(config.surface_width, config.surface_height);
        Ok(Self::new(NavigationTracker::new(engine, tilt)))
    }

    pub fn register_snapshot_callback(&mut self, callback: SnapshotCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.snapshot_callbacks.insert(handle, callback);
        handle
    }

    pub fn register_haptic_callback(&mut self, callback: HapticCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.haptic_callbacks.insert(handle, callback);
        handle
    }

    pub fn unregister_callback(&mut self, handle: CallbackHandle) -> ApiResult<()> {
        let removed = self.snapshot_callbacks.remove(&handle).is_some()
            || self.haptic_callbacks.remove(&handle).is_some();

        if removed {
            Ok(())
        } else {
            Err(ApiError::InvalidHandle { handle: handle.id() })
        }
    }

    /// Apply one update, recompute, then notify
    pub fn process_update(&mut self, update: SensorUpdate) -> NavigationSnapshot {
        let snapshot = self.tracker.apply(update);

        for callback in self.snapshot_callbacks.values() {
            callback(&snapshot);
        }

        // Readings before the first fix carry no alignment information
        if let Some(derived) = snapshot.derived {
            if self.notifier.update(derived.is_aligned) {
                let event = AlignmentEvent {
                    sequence_number: snapshot.sequence_number,
                    bearing_to_target: derived.bearing_to_target,
                    distance_meters: derived.distance_meters,
                    fire_count: self.notifier.fire_count(),
                };
                log::info!(
                    "Aligned with target at {:.1} m (haptic #{})",
                    event.distance_meters,
                    event.fire_count
                );
                for callback in self.haptic_callbacks.values() {
                    callback(&event);
                }
            }
        }

        snapshot
    }

    /// Feed a provider poll result; errors and empty polls leave state unchanged
    pub fn process_poll(&mut self, result: SensorResult<Option<SensorUpdate>>) -> Option<NavigationSnapshot> {
        match result {
            Ok(Some(update)) => Some(self.process_update(update)),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Sensor poll failed: {}", e);
                None
            }
        }
    }

    /// Drain everything the location provider currently has
    pub fn drain_location<P: LocationProvider + ?Sized>(&mut self, provider: &mut P) -> usize {
        let mut processed = 0;
        while self.process_poll(provider.poll()).is_some() {
            processed += 1;
        }
        processed
    }

    /// Take at most one sample from the motion provider
    pub fn sample_motion<P: MotionProvider + ?Sized>(&mut self, provider: &mut P) -> bool {
        self.process_poll(provider.poll()).is_some()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        self.tracker.snapshot()
    }

    pub fn haptic_state(&self) -> HapticState {
        self.notifier.state()
    }

    pub fn tracker(&self) -> &NavigationTracker {
        &self.tracker
    }

    /// Get number of registered callbacks (snapshot, haptic)
    pub fn callback_count(&self) -> (usize, usize) {
        (self.snapshot_callbacks.len(), self.haptic_callbacks.len())
    }

    /// Drop all callbacks and forget all readings
    pub fn shutdown(&mut self) {
        self.snapshot_callbacks.clear();
        self.haptic_callbacks.clear();
        self.tracker.reset();
        self.notifier.reset();
        self.callback_counter = 0;
    }
}

/// Ask for location access before the first poll; anything short of a
/// grant is an error
pub fn ensure_location_access<P: LocationProvider + ?Sized>(provider: &mut P) -> ApiResult<AuthorizationStatus> {
    let status = provider.request_authorization()?;
    if !status.is_authorized() {
        log::warn!("Location access {:?}", status);
        return Err(SensorError::NotAuthorized { status }.into());
    }
    Ok(status)
}

impl Default for CallbackNavigationApi {
    fn default() -> Self {
        Self::new(NavigationTracker::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeoPoint, HeadingReading};
    use crate::hardware::{MockLocationProvider, MockMotionProvider};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const LONDON_REFERENCE: GeoPoint = GeoPoint::new(51.5007, -0.1246);

    fn heading(deg: f64) -> SensorUpdate {
        SensorUpdate::Heading(HeadingReading::magnetic(deg))
    }

    #[test]
    fn test_callback_registration() {
        let mut api = CallbackNavigationApi::default();

        let snap_handle = api.register_snapshot_callback(Box::new(|_| {}));
        let haptic_handle = api.register_haptic_callback(Box::new(|_| {}));
        assert_eq!(api.callback_count(), (1, 1));
        assert_ne!(snap_handle, haptic_handle);

        api.unregister_callback(snap_handle).unwrap();
        assert_eq!(api.callback_count(), (0, 1));
        assert!(matches!(
            api.unregister_callback(snap_handle),
            Err(ApiError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn test_snapshot_callbacks_see_every_recompute() {
        let mut api = CallbackNavigationApi::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        api.register_snapshot_callback(Box::new(move |snap| {
            sink.lock().unwrap().push(snap.sequence_number);
        }));

        api.process_update(heading(10.0));
        api.process_update(SensorUpdate::Location(LONDON_REFERENCE));
        api.process_update(SensorUpdate::attitude_degrees(1.0, 2.0));

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_haptic_fires_once_per_approach() {
        let mut api = CallbackNavigationApi::default();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        api.register_haptic_callback(Box::new(move |event| {
            sink.lock().unwrap().push(*event);
        }));

        // Aligned heading before any fix: nothing to compare against yet
        api.process_update(heading(19.0));
        assert!(events.lock().unwrap().is_empty());

        api.process_update(SensorUpdate::Location(LONDON_REFERENCE));
        assert_eq!(events.lock().unwrap().len(), 1);
        assert_eq!(api.haptic_state(), HapticState::Fired);

        // Still aligned: no refire
        api.process_update(heading(21.0));
        api.process_update(SensorUpdate::attitude_degrees(5.0, 5.0));
        assert_eq!(events.lock().unwrap().len(), 1);

        // Turn away and back: re-armed, fires again
        api.process_update(heading(90.0));
        assert_eq!(api.haptic_state(), HapticState::Armed);
        api.process_update(heading(17.0));

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].fire_count, 2);
        assert!((events[1].bearing_to_target - 19.232).abs() < 0.01);
    }

    #[test]
    fn test_from_config_tolerance() {
        let config = AppConfig {
            alignment_tolerance_deg: 1.0,
            ..Default::default()
        };
        let mut api = CallbackNavigationApi::from_config(&config).unwrap();
        api.process_update(SensorUpdate::Location(LONDON_REFERENCE));
        api.process_update(heading(17.0));
        assert!(!api.snapshot().is_aligned());
        api.process_update(heading(19.0));
        assert!(api.snapshot().is_aligned());
    }

    #[test]
    fn test_from_config_surface_and_validation() {
        let config = AppConfig {
            surface_width: 400.0,
            surface_height: 200.0,
            ..Default::default()
        };
        let mut api = CallbackNavigationApi::from_config(&config).unwrap();
        let snap = api.process_update(SensorUpdate::attitude_degrees(0.0, 0.0));
        assert_eq!(snap.highlight_px, (200.0, 100.0));

        let bad = AppConfig {
            surface_width: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            CallbackNavigationApi::from_config(&bad),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_location_access() {
        let mut granted = MockLocationProvider::new();
        assert_eq!(
            ensure_location_access(&mut granted).unwrap(),
            AuthorizationStatus::Authorized
        );

        let mut denied = MockLocationProvider::denying();
        assert!(matches!(
            ensure_location_access(&mut denied),
            Err(ApiError::Sensor(SensorError::NotAuthorized {
                status: AuthorizationStatus::Denied
            }))
        ));
    }

    #[test]
    fn test_provider_draining() {
        let mut api = CallbackNavigationApi::default();
        let mut location = MockLocationProvider::walk(LONDON_REFERENCE, LONDON_REFERENCE, 2, 45.0);

        // Unauthorized provider: error is swallowed, state unchanged
        assert_eq!(api.drain_location(&mut location), 0);
        assert!(api.snapshot().derived.is_none());

        location.request_authorization().unwrap();
        assert_eq!(api.drain_location(&mut location), 6);
        assert_eq!(api.snapshot().heading, 45.0);

        let mut motion = MockMotionProvider::new(Duration::from_millis(100));
        motion.push_degrees(3.0, 4.0);
        assert!(api.sample_motion(&mut motion));
        assert!(!api.sample_motion(&mut motion));
    }

    #[test]
    fn test_process_poll_error_keeps_state() {
        let mut api = CallbackNavigationApi::default();
        api.process_update(SensorUpdate::Location(LONDON_REFERENCE));
        let before = api.snapshot();

        let result = api.process_poll(Err(SensorError::Platform { code: 1, description: "x".into() }));
        assert!(result.is_none());
        assert_eq!(api.snapshot(), before);
    }

    #[test]
    fn test_shutdown_clears_everything() {
        let mut api = CallbackNavigationApi::default();
        api.register_snapshot_callback(Box::new(|_| {}));
        api.process_update(SensorUpdate::Location(LONDON_REFERENCE));
        api.shutdown();

        assert_eq!(api.callback_count(), (0, 0));
        assert!(api.snapshot().derived.is_none());
        assert_eq!(api.haptic_state(), HapticState::Armed);
    }
}
