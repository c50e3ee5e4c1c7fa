//! Event dispatch and the watchface context.
//!
//! The host (device firmware or simulator) turns its callbacks into
//! [`Event`]s: clock ticks, focus changes, animation frames, configuration
//! updates and unload. [`Watchface`] owns every piece of mutable state and is
//! the only writer of it, one event at a time:
//!
//! | Event                  | State written        | Marks dirty      |
//! |------------------------|----------------------|------------------|
//! | `Tick`                 | time                 | `HANDS \| EYES`  |
//! | `FocusChanged(true)`   | intro (first only)   | -                |
//! | `AnimationFrame`       | intro progress       | `ROOT`           |
//! | `ConfigurationChanged` | configuration        | `ROOT`           |
//! | `Unload`               | intro detached       | -                |
//!
//! Rendering is pull-based: the host calls [`Watchface::render`] and a frame
//! is drawn only if something was marked dirty since the last one.

use embedded_graphics::primitives::Rectangle;
use heapless::Deque;

use crate::animations::IntroAnimation;
use crate::config::EVENT_QUEUE_CAPACITY;
use crate::log_buffer::LogBuffer;
use crate::render::{DirtyLayers, FrameGeometry, FrameInputs, FrameRenderer, RenderStyle};
use crate::settings::Configuration;
use crate::surface::{Bitmap, Surface};
use crate::time::{TimeReading, TimeUnits};

// =============================================================================
// Events
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Clock tick with the new reading.
    Tick(TimeReading),
    FocusChanged(bool),
    /// The host's animation timer fired.
    AnimationFrame,
    ConfigurationChanged(Configuration),
    /// The window is going away.
    Unload,
}

/// An event stamped with the host's monotonic clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub at_ms: u64,
    pub kind: EventKind,
}

impl Event {
    pub const fn new(
        at_ms: u64,
        kind: EventKind,
    ) -> Self {
        Self { at_ms, kind }
    }
}

/// Fixed-capacity FIFO between host callbacks and the watchface.
pub struct EventQueue {
    events: Deque<Event, EVENT_QUEUE_CAPACITY>,
    dropped: u32,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Enqueue an event. A full queue rejects it and hands it back.
    pub fn push(
        &mut self,
        event: Event,
    ) -> Result<(), Event> {
        self.events.push_back(event).inspect_err(|_| self.dropped = self.dropped.saturating_add(1))
    }

    pub fn pop(&mut self) -> Option<Event> { self.events.pop_front() }

    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }

    /// Events rejected because the queue was full.
    #[inline]
    pub const fn dropped(&self) -> u32 { self.dropped }
}

impl Default for EventQueue {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Watchface Context
// =============================================================================

/// All mutable watchface state plus the renderer that reads it.
pub struct Watchface<'a> {
    renderer: FrameRenderer<'a>,
    time: TimeReading,
    settings: Configuration,
    intro: IntroAnimation,
    dirty: DirtyLayers,
    log: LogBuffer,
    unloaded: bool,
}

impl<'a> Watchface<'a> {
    /// Build the face with the reading taken at load time.
    ///
    /// The first frame is dirty so the host draws once before any tick.
    pub fn new(
        style: RenderStyle,
        sprite: Bitmap<'a>,
        settings: Configuration,
        time: TimeReading,
        at_ms: u64,
    ) -> Self {
        let mut face = Self {
            renderer: FrameRenderer::new(style, sprite),
            time,
            settings,
            intro: style.intro(),
            dirty: DirtyLayers::ROOT,
            log: LogBuffer::new(),
            unloaded: false,
        };
        log_info!(face.log, at_ms, "loaded at {:02}:{:02}:{:02}", time.hours, time.minutes, time.seconds);
        face
    }

    /// Apply one event.
    pub fn handle(
        &mut self,
        event: &Event,
    ) {
        let at_ms = event.at_ms;
        if self.unloaded {
            log_warn!(self.log, at_ms, "event after unload ignored");
            return;
        }

        match event.kind {
            EventKind::Tick(time) => {
                let units = time.units_changed(self.time);
                self.time = time;
                self.dirty.insert(DirtyLayers::HANDS | DirtyLayers::EYES);
                if units.contains(TimeUnits::HOUR) {
                    log_debug!(self.log, at_ms, "hour {:02}", time.hours);
                }
            }
            EventKind::FocusChanged(did_focus) => {
                if self.intro.on_focus(did_focus, at_ms) {
                    log_info!(self.log, at_ms, "intro started ({} ms)", self.intro.duration_ms());
                }
            }
            EventKind::AnimationFrame => {
                if let Some(progress) = self.intro.update(at_ms) {
                    self.dirty.insert(DirtyLayers::ROOT);
                    if progress.is_complete() {
                        log_info!(self.log, at_ms, "intro finished");
                    }
                }
            }
            EventKind::ConfigurationChanged(settings) => {
                self.settings = settings;
                self.dirty.insert(DirtyLayers::ROOT);
                log_info!(
                    self.log,
                    at_ms,
                    "configuration updated (seconds {})",
                    if settings.seconds_hand_enabled { "on" } else { "off" }
                );
            }
            EventKind::Unload => {
                self.intro.detach();
                self.unloaded = true;
                log_info!(self.log, at_ms, "unloaded");
            }
        }
    }

    /// Handle every queued event in arrival order. Returns how many ran.
    pub fn drain_queue(
        &mut self,
        queue: &mut EventQueue,
    ) -> usize {
        let mut handled = 0;
        while let Some(event) = queue.pop() {
            self.handle(&event);
            handled += 1;
        }
        handled
    }

    /// Inputs for the next frame.
    pub fn inputs(&self) -> FrameInputs {
        FrameInputs {
            time: self.time,
            settings: self.settings,
            progress: self.intro.progress(),
        }
    }

    /// Redraw if anything is dirty.
    pub fn render<S: Surface>(
        &mut self,
        surface: &mut S,
        frame: &Rectangle,
    ) -> Option<FrameGeometry> {
        self.render_with(surface, frame, |_, _| {})
    }

    /// Redraw if anything is dirty, calling `underlay` between the background
    /// fill and the face so the host can paint its own decorations.
    ///
    /// Returns the geometry of the drawn frame, `None` if nothing was drawn.
    pub fn render_with<S, F>(
        &mut self,
        surface: &mut S,
        frame: &Rectangle,
        underlay: F,
    ) -> Option<FrameGeometry>
    where
        S: Surface,
        F: FnOnce(&mut S, &Configuration),
    {
        if self.dirty.is_empty() || self.unloaded {
            return None;
        }
        surface.fill_rect(*frame, self.settings.background_color);
        underlay(surface, &self.settings);
        let geometry = self.renderer.draw(surface, frame, &self.inputs());
        self.dirty.clear();
        Some(geometry)
    }

    /// Whether the host should keep sending `AnimationFrame` events.
    #[inline]
    pub const fn wants_animation_frames(&self) -> bool { self.intro.is_running() }

    #[inline]
    pub const fn dirty(&self) -> DirtyLayers { self.dirty }

    #[inline]
    pub const fn time(&self) -> TimeReading { self.time }

    #[inline]
    pub const fn settings(&self) -> &Configuration { &self.settings }

    #[inline]
    pub const fn intro(&self) -> &IntroAnimation { &self.intro }

    #[inline]
    pub const fn renderer(&self) -> &FrameRenderer<'a> { &self.renderer }

    #[inline]
    pub const fn is_unloaded(&self) -> bool { self.unloaded }

    /// Log buffer, for the host to drain.
    pub fn log_mut(&mut self) -> &mut LogBuffer { &mut self.log }
}

// =============================================================================
// Unit Tests
// =============================================================================
