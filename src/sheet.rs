//! Drag-driven "now playing" sheet.
//!
//! The controller stores only two scalars that matter for layout, the
//! expansion fraction and the drag offset. Everything drawn is derived from
//! them through [`SheetGeometry::compute`] on every frame.

use std::time::{Duration, Instant};

/// Logical height of a full-screen sheet. Geometry is expressed in these units
/// and scaled to terminal cells by the renderer.
pub const FULL_HEIGHT: f32 = 844.;
pub const MINI_HEIGHT: f32 = 70.;
pub const MINI_ARTWORK: f32 = 50.;
pub const FULL_ARTWORK: f32 = 250.;

// Drag distance over which the text labels fade out.
const LABEL_FADE_DISTANCE: f32 = 100.;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetConfig {
    /// Drag distance that commits a state change on release.
    pub threshold: f32,
    pub settle: Duration,
    pub opacity_restore_delay: Duration,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            threshold: 50.,
            settle: Duration::from_millis(200),
            opacity_restore_delay: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Tween {
    fn new(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    // ease-out cubic
    fn value_at(&self, now: Instant) -> f32 {
        if self.is_done(now) {
            return self.to;
        }
        let t = now.saturating_duration_since(self.start).as_secs_f32() / self.duration.as_secs_f32();
        let eased = 1. - (1. - t).powi(3);
        self.from + (self.to - self.from) * eased
    }
}

#[derive(Debug)]
pub struct SheetController {
    config: SheetConfig,
    expanded: bool,
    expansion_fraction: f32,
    drag_offset: f32,
    dragging: bool,
    label_opacity: f32,
    fraction_tween: Option<Tween>,
    offset_tween: Option<Tween>,
    opacity_restore_at: Option<Instant>,
}

impl SheetController {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            expanded: false,
            expansion_fraction: 0.,
            drag_offset: 0.,
            dragging: false,
            label_opacity: 1.,
            fraction_tween: None,
            offset_tween: None,
            opacity_restore_at: None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn expansion_fraction(&self) -> f32 {
        self.expansion_fraction
    }

    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    /// Opacity of the title and artist labels.
    pub fn label_opacity(&self) -> f32 {
        self.label_opacity
    }

    /// Opacity of the full-player controls, crossfading against the mini
    /// controls while the sheet is dragged.
    pub fn controls_opacity(&self) -> f32 {
        if self.expanded {
            (1. - self.drag_offset / LABEL_FADE_DISTANCE).max(0.)
        } else {
            (self.drag_offset / self.config.threshold).min(1.)
        }
    }

    /// True while either settle animation runs.
    pub fn is_transitioning_layout(&self) -> bool {
        self.fraction_tween.is_some() || self.offset_tween.is_some()
    }

    /// True while anything time-based is pending and the view must keep redrawing.
    pub fn is_animating(&self) -> bool {
        self.is_transitioning_layout() || self.opacity_restore_at.is_some()
    }

    pub fn geometry(&self) -> SheetGeometry {
        SheetGeometry::compute(self.expansion_fraction, self.drag_offset)
    }

    pub fn begin_drag(&mut self, now: Instant) {
        if let Some(tween) = self.offset_tween.take() {
            self.drag_offset = tween.value_at(now);
        }
        self.opacity_restore_at = None;
        self.dragging = true;
    }

    /// Applies a vertical pointer movement; positive `delta_y` points down.
    pub fn drag_by(&mut self, delta_y: f32) {
        if !self.dragging {
            self.dragging = true;
            self.offset_tween = None;
        }
        self.drag_offset = if self.expanded {
            (self.drag_offset + delta_y).max(0.)
        } else {
            (self.drag_offset - delta_y).max(0.)
        };
        self.label_opacity = (1. - self.drag_offset / LABEL_FADE_DISTANCE).max(0.);
    }

    pub fn release(&mut self, now: Instant) {
        self.dragging = false;
        if self.drag_offset > self.config.threshold {
            self.set_expanded(!self.expanded, now);
        }
        if self.drag_offset != 0. {
            self.offset_tween = Some(Tween::new(self.drag_offset, 0., now, self.config.settle));
        }
        self.opacity_restore_at = Some(now + self.config.opacity_restore_delay);
    }

    pub fn expand(&mut self, now: Instant) {
        if !self.expanded && !self.dragging {
            self.set_expanded(true, now);
        }
    }

    pub fn collapse(&mut self, now: Instant) {
        if self.expanded && !self.dragging {
            self.set_expanded(false, now);
        }
    }

    /// Steps the settle animations to `now`.
    pub fn advance(&mut self, now: Instant) {
        if let Some(tween) = self.fraction_tween {
            self.expansion_fraction = tween.value_at(now);
            if tween.is_done(now) {
                self.fraction_tween = None;
            }
        }
        if let Some(tween) = self.offset_tween {
            self.drag_offset = tween.value_at(now);
            if tween.is_done(now) {
                self.offset_tween = None;
            }
        }
        if self.opacity_restore_at.is_some_and(|at| now >= at) {
            self.opacity_restore_at = None;
            self.label_opacity = 1.;
        }
    }

    fn set_expanded(&mut self, expanded: bool, now: Instant) {
        self.expanded = expanded;
        let target = if expanded { 1. } else { 0. };
        self.fraction_tween = Some(Tween::new(
            self.expansion_fraction,
            target,
            now,
            self.config.settle,
        ));
        log::debug!("sheet {}", if expanded { "expanded" } else { "collapsed" });
    }
}

/// Layout of the sheet in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub height: f32,
    /// Downward shift of the whole sheet while an expanded sheet is pulled down.
    pub vertical_offset: f32,
    pub artwork_size: f32,
    pub corner_radius: f32,
    pub top_padding: f32,
    pub edge_padding: f32,
    pub title_scale: f32,
}

impl SheetGeometry {
    pub fn compute(expansion_fraction: f32, drag_offset: f32) -> Self {
        let f = expansion_fraction.clamp(0., 1.);
        let d = drag_offset.max(0.);
        let lerp = |collapsed: f32, expanded: f32| collapsed + (expanded - collapsed) * f;

        Self {
            height: lerp((MINI_HEIGHT + d).min(FULL_HEIGHT), FULL_HEIGHT),
            vertical_offset: lerp(0., d),
            artwork_size: lerp(
                (MINI_ARTWORK + d / 4.).min(FULL_ARTWORK),
                (FULL_ARTWORK - d / 4.).max(MINI_ARTWORK),
            ),
            corner_radius: lerp((24. + d / 10.).min(40.), (40. - d / 10.).max(24.)),
            top_padding: lerp(10. + d / 10., (FULL_HEIGHT / 2. - 300. - d / 8.).max(0.)),
            edge_padding: lerp(30. - (d / 20.).min(30.), (d / 20.).min(30.)),
            title_scale: lerp(1., 2.),
        }
    }

    /// Height actually visible on screen.
    pub fn visible_height(&self) -> f32 {
        (self.height - self.vertical_offset).max(MINI_HEIGHT)
    }
}
