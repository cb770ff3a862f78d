//! Scroll-triggered visibility flag for reveal animations.
//!
//! The observer is an event-fed state machine: the host environment
//! forwards intersection entries and reads the boolean flag back. With
//! `once` (the default) the flag latches on the first positive
//! transition and the observation detaches itself; with `once = false`
//! the flag tracks entry and exit for the lifetime of the binding.
//!
//! Hosts must call [`VisibilityObserver::detach`] on every unmount
//! path, success or error; entries recorded after detachment are
//! discarded rather than written into torn-down state.

/// Configuration for a visibility observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible to count as an
    /// entry.
    pub threshold: f32,
    /// Viewport inset applied before the threshold test, in the
    /// host's margin syntax.
    pub root_margin: String,
    /// Detach after the first positive transition.
    pub once: bool,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            root_margin: "-10% 0px -25% 0px".to_string(),
            once: true,
        }
    }
}

impl ObserverOptions {
    /// Options with a custom threshold, other fields default.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Keep tracking entry and exit instead of latching.
    pub fn tracking(mut self) -> Self {
        self.once = false;
        self
    }
}

/// One intersection report from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Whether the element currently intersects the (inset) viewport.
    pub is_intersecting: bool,
    /// Visible fraction of the element, 0.0..=1.0.
    pub ratio: f32,
}

impl IntersectionEntry {
    /// An entry for an element visible at the given fraction.
    pub fn visible(ratio: f32) -> Self {
        Self {
            is_intersecting: true,
            ratio,
        }
    }

    /// An entry for an element fully outside the viewport.
    pub fn hidden() -> Self {
        Self {
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Boolean "is the bound element visible" signal.
#[derive(Debug)]
pub struct VisibilityObserver {
    options: ObserverOptions,
    visible: bool,
    attached: bool,
}

impl VisibilityObserver {
    /// Create an attached observer.
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            visible: false,
            attached: true,
        }
    }

    /// The configured options.
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Current visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the observation is still live.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Feed one intersection entry from the host.
    ///
    /// Entries arriving after detachment are discarded.
    pub fn record(&mut self, entry: IntersectionEntry) {
        if !self.attached {
            return;
        }

        if entry.is_intersecting && entry.ratio >= self.options.threshold {
            self.visible = true;
            if self.options.once {
                self.detach();
            }
        } else if !self.options.once {
            self.visible = false;
        }
    }

    /// End the observation. Safe to call repeatedly; the flag keeps
    /// its last value.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(ObserverOptions::default())
    }
}
