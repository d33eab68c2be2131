//! Tracking session
//!
//! Owns the state the projection and integration functions leave to their
//! caller: the previously projected point, the running totals and the
//! enabled flag. Fixes must arrive in chronological order; one update is
//! applied at a time through `&mut self`.

use crate::algorithms::{accumulate, delta, project};
use crate::api::types::TrackUpdate;
use crate::core::{Displacement, LocationFix, PlanarCoordinates, TrackTotals};
use log::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct TrackingSession {
    enabled: bool,
    previous: Option<PlanarCoordinates>,
    totals: TrackTotals,
    last_fix: Option<LocationFix>,
    sequence: u32,
}

impl TrackingSession {
    /// Create a disabled, empty session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enable tracking and begin a fresh session
    pub fn start(&mut self) {
        self.reset();
        self.enabled = true;
        info!("Tracking session started");
    }

    /// Disable tracking; the current totals are discarded
    pub fn stop(&mut self) {
        if self.enabled {
            info!(
                "Tracking session stopped after {} fixes: {:.1} m, +{:.1} m, -{:.1} m",
                self.sequence, self.totals.distance_m, self.totals.ascent_m, self.totals.descent_m
            );
        }
        self.enabled = false;
        self.reset();
    }

    /// Forget the previous point and zero the totals
    pub fn reset(&mut self) {
        self.previous = None;
        self.totals = TrackTotals::default();
        self.last_fix = None;
        self.sequence = 0;
        debug!("Tracking session reset");
    }

    /// Feed the next fix.
    ///
    /// Returns `None` when tracking is disabled or the fix is older than the
    /// last accepted one. The first fix of a session only establishes the
    /// starting point.
    pub fn update(&mut self, fix: LocationFix) -> Option<TrackUpdate> {
        if !self.enabled {
            debug!("Ignoring fix at {} ms, tracking disabled", fix.timestamp_ms);
            return None;
        }

        if let Some(last) = &self.last_fix {
            if fix.timestamp_ms < last.timestamp_ms {
                warn!(
                    "Rejecting out-of-order fix at {} ms (last accepted {} ms)",
                    fix.timestamp_ms, last.timestamp_ms
                );
                return None;
            }
        }

        let point = project(fix.position);
        let (step, totals) = match self.previous {
            Some(previous) => (delta(previous, point), accumulate(self.totals, previous, point)),
            None => (Displacement::default(), self.totals),
        };

        self.previous = Some(point);
        self.totals = totals;
        self.last_fix = Some(fix.clone());
        self.sequence = self.sequence.saturating_add(1);

        debug!(
            "Fix #{}: x={:.2} y={:.2} z={:.2}, step {:.2} m (+{:.2}/-{:.2})",
            self.sequence, point.x, point.y, point.z, step.distance_m, step.meters_up, step.meters_down
        );

        Some(TrackUpdate {
            fix,
            point,
            step,
            totals,
            sequence_number: self.sequence,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn totals(&self) -> TrackTotals {
        self.totals
    }

    pub fn previous_point(&self) -> Option<PlanarCoordinates> {
        self.previous
    }

    pub fn last_fix(&self) -> Option<&LocationFix> {
        self.last_fix.as_ref()
    }

    /// Number of fixes accepted since the session began
    pub fn fix_count(&self) -> u32 {
        self.sequence
    }
}
