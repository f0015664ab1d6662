use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, WheelEvent, Window};

use crate::anchor::{IN_PAGE_ANCHOR_SELECTOR, fragment_selector, scroll_target};
use crate::config::ScrollConfig;
use crate::consts::{PROGRAMMATIC_SCROLL_TOLERANCE_PX, SCROLL_SETTLE_MS, SWEEP_INTERVAL_MS, TOUCH_RESTART_MS, WHEEL_DELTA_SCALE};
use crate::dom;
use crate::easing::Easing;
use crate::error::ScrollError;
use crate::frame::{FrameSlot, FrameToken, Lane};
use crate::momentum::MomentumState;
use crate::sweep::{SweepMode, sweep};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Scroll geometry read from the page at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// Largest reachable scroll offset.
    pub max_scroll_top: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(scroll_top: f64, max_scroll_top: f64) -> Self {
        Self { scroll_top, max_scroll_top }
    }
}

/// Delayed callbacks the core asks the host to arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Fires once scroll events have been quiet long enough.
    ScrollSettle,
    /// Fires shortly after a touch ends.
    TouchRestart,
}

impl Timer {
    #[must_use]
    pub fn delay_ms(self) -> u32 {
        match self {
            Self::ScrollSettle => SCROLL_SETTLE_MS,
            Self::TouchRestart => TOUCH_RESTART_MS,
        }
    }
}

/// Payload of the custom scroll event published to other scripts.
///
/// `velocity` keeps the freshly sampled value on a user scroll while no coast
/// is running; it reads 0 only right after a running coast is interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollNotification {
    pub scroll_top: f64,
    pub velocity: f64,
    pub momentum_active: bool,
}

/// Actions returned from handlers for the host to carry out, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set the vertical scroll offset.
    ScrollTo(f64),
    /// Run the frame's lane on the next animation frame.
    RequestFrame(FrameToken),
    /// Cancel a previously requested frame.
    CancelFrame(FrameToken),
    /// Arm a timer, replacing any pending timer of the same kind.
    ArmTimer(Timer),
    /// Publish the scroll notification event.
    Notify(ScrollNotification),
    /// Show a fragment in the address bar without navigating.
    PushFragment(String),
}

/// An in-flight eased `scroll_to`.
#[derive(Debug, Clone, Copy)]
struct Tween {
    start_top: f64,
    distance: f64,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl Tween {
    fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms > 0.0 {
            let elapsed = (now_ms - self.start_ms).max(0.0);
            (elapsed / self.duration_ms).min(1.0)
        } else {
            1.0
        }
    }

    fn position(&self, progress: f64) -> f64 {
        self.start_top + self.distance * self.easing.apply(progress)
    }
}

/// Core engine state: all scrolling logic, with no browser dependencies.
///
/// Every handler takes the current time and page geometry as arguments and
/// returns the [`Action`]s the host must perform. Separated from
/// [`ScrollEngine`] so it can be tested natively.
#[derive(Debug, Clone)]
pub struct ScrollCore {
    pub config: ScrollConfig,
    pub state: MomentumState,
    reduced_motion: bool,
    momentum_frame: FrameSlot,
    tween_frame: FrameSlot,
    tween: Option<Tween>,
    last_write: Option<f64>,
}

impl ScrollCore {
    #[must_use]
    pub fn new(config: ScrollConfig, reduced_motion: bool) -> Self {
        Self {
            config,
            state: MomentumState::default(),
            reduced_motion,
            momentum_frame: FrameSlot::new(Lane::Momentum),
            tween_frame: FrameSlot::new(Lane::Tween),
            tween: None,
            last_write: None,
        }
    }

    /// Seed velocity tracking from the page's current position.
    pub fn seed(&mut self, now_ms: f64, view: Viewport) {
        self.state = MomentumState::seeded(now_ms, view.scroll_top);
    }

    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Whether an eased `scroll_to` is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Merge a partial config and re-clamp the current velocity to it.
    ///
    /// # Errors
    ///
    /// Rejects patches that do not deserialize or validate; the config is
    /// left unchanged.
    pub fn set_config(&mut self, patch: &serde_json::Value) -> Result<(), ScrollError> {
        self.config = self.config.merged(patch)?;
        self.state.velocity = self.config.clamp_velocity(self.state.velocity);
        Ok(())
    }

    #[must_use]
    pub fn notification(&self, view: Viewport) -> ScrollNotification {
        ScrollNotification {
            scroll_top: view.scroll_top,
            velocity: self.state.velocity,
            momentum_active: self.state.active,
        }
    }

    // --- Input events ---

    /// A scroll event. A user scroll interrupts running momentum or animation
    /// and restarts the settle timer, keeping its sampled velocity for the
    /// coast that follows. The engine's own writes only refresh the sample.
    pub fn on_scroll(&mut self, now_ms: f64, view: Viewport) -> Vec<Action> {
        if self.is_own_write(view) {
            self.state.record(now_ms, view.scroll_top);
            return vec![Action::Notify(self.notification(view))];
        }
        if self.reduced_motion {
            return vec![Action::Notify(self.notification(view))];
        }

        self.state.sample(&self.config, now_ms, view.scroll_top);
        self.state.user_scrolling = true;
        let mut actions = self.interrupt();
        actions.push(Action::ArmTimer(Timer::ScrollSettle));
        actions.push(Action::Notify(self.notification(view)));
        actions
    }

    /// A wheel event. Adds the scaled wheel delta on top of the sampled velocity.
    pub fn on_wheel(&mut self, now_ms: f64, view: Viewport, delta_y: f64) -> Vec<Action> {
        if self.reduced_motion {
            return Vec::new();
        }
        self.state.sample(&self.config, now_ms, view.scroll_top);
        let boost = delta_y * WHEEL_DELTA_SCALE * self.config.momentum.wheel_multiplier;
        self.state.boost(&self.config, boost);
        Vec::new()
    }

    pub fn on_touch_start(&mut self) -> Vec<Action> {
        if self.reduced_motion {
            return Vec::new();
        }
        let actions = self.stop();
        self.state.user_scrolling = true;
        actions
    }

    /// A touch ended: amplify velocity and schedule the restart check.
    pub fn on_touch_end(&mut self) -> Vec<Action> {
        if self.reduced_motion {
            return Vec::new();
        }
        self.state.scale(&self.config, self.config.momentum.touch_multiplier);
        vec![Action::ArmTimer(Timer::TouchRestart)]
    }

    pub fn on_timer(&mut self, timer: Timer) -> Vec<Action> {
        match timer {
            Timer::ScrollSettle => {
                self.state.user_scrolling = false;
                self.start_momentum()
            }
            Timer::TouchRestart if !self.state.user_scrolling => self.start_momentum(),
            Timer::TouchRestart => Vec::new(),
        }
    }

    /// An animation frame for `token`'s lane. Stale tokens do nothing.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64, view: Viewport) -> Vec<Action> {
        match token.lane {
            Lane::Momentum if self.momentum_frame.fire(token) => self.momentum_step(view),
            Lane::Tween if self.tween_frame.fire(token) => self.tween_step(now_ms),
            _ => Vec::new(),
        }
    }

    // --- Momentum ---

    /// Begin coasting if there is enough velocity and motion is allowed.
    pub fn start_momentum(&mut self) -> Vec<Action> {
        if self.reduced_motion || !self.state.has_momentum(&self.config) {
            return Vec::new();
        }
        self.state.active = true;
        let mut actions = Vec::new();
        if let Some(stale) = self.momentum_frame.invalidate() {
            actions.push(Action::CancelFrame(stale));
        }
        actions.push(Action::RequestFrame(self.momentum_frame.schedule()));
        log::debug!("momentum start: velocity={:.3}", self.state.velocity);
        actions
    }

    /// Halt momentum immediately and zero the velocity.
    pub fn stop_momentum(&mut self) -> Vec<Action> {
        self.state.active = false;
        self.state.velocity = 0.0;
        self.momentum_frame.invalidate().map(Action::CancelFrame).into_iter().collect()
    }

    /// Halt momentum and any eased animation.
    pub fn stop(&mut self) -> Vec<Action> {
        let mut actions = self.stop_momentum();
        actions.extend(self.cancel_tween());
        actions
    }

    /// Stop whatever the engine is animating on behalf of the user.
    ///
    /// Velocity is zeroed only when momentum was actually running.
    fn interrupt(&mut self) -> Vec<Action> {
        let mut actions = if self.state.active { self.stop_momentum() } else { Vec::new() };
        actions.extend(self.cancel_tween());
        actions
    }

    fn momentum_step(&mut self, view: Viewport) -> Vec<Action> {
        if !self.state.active {
            return Vec::new();
        }
        if self.reduced_motion || !self.state.has_momentum(&self.config) {
            self.state.active = false;
            return Vec::new();
        }

        let target = view.scroll_top + self.state.velocity;
        if target <= 0.0 || target >= view.max_scroll_top {
            self.state.velocity = 0.0;
            self.state.active = false;
            log::debug!("momentum hit boundary at {target:.1}");
            return Vec::new();
        }

        self.state.velocity *= self.config.momentum.friction;
        vec![self.write(target), Action::RequestFrame(self.momentum_frame.schedule())]
    }

    // --- Eased scroll-to ---

    /// Animate to `target` with the given (or configured) duration and easing.
    ///
    /// Under reduced motion this jumps straight to `target`.
    pub fn scroll_to(
        &mut self,
        now_ms: f64,
        view: Viewport,
        target: f64,
        duration_ms: Option<f64>,
        easing: Option<&str>,
    ) -> Vec<Action> {
        if self.reduced_motion {
            return vec![self.write(target)];
        }

        let easing = easing.map_or_else(|| self.config.easing.easing(), Easing::from_name);
        let duration_ms = duration_ms.unwrap_or(self.config.easing.duration);
        let mut actions = self.cancel_tween();
        self.tween = Some(Tween {
            start_top: view.scroll_top,
            distance: target - view.scroll_top,
            start_ms: now_ms,
            duration_ms,
            easing,
        });
        actions.push(Action::RequestFrame(self.tween_frame.schedule()));
        actions
    }

    fn tween_step(&mut self, now_ms: f64) -> Vec<Action> {
        let Some(tween) = self.tween else {
            return Vec::new();
        };
        let progress = tween.progress(now_ms);
        let mut actions = vec![self.write(tween.position(progress))];
        if progress < 1.0 {
            actions.push(Action::RequestFrame(self.tween_frame.schedule()));
        } else {
            self.tween = None;
        }
        actions
    }

    fn cancel_tween(&mut self) -> Vec<Action> {
        self.tween = None;
        self.tween_frame.invalidate().map(Action::CancelFrame).into_iter().collect()
    }

    // --- Anchors ---

    /// Animate to an in-page anchor whose element sits at `element_top`.
    pub fn navigate_to_anchor(&mut self, now_ms: f64, view: Viewport, href: &str, element_top: f64) -> Vec<Action> {
        let mut actions = self.stop_momentum();
        actions.extend(self.scroll_to(now_ms, view, scroll_target(element_top), None, None));
        actions.push(Action::PushFragment(href.to_owned()));
        actions
    }

    // --- Own-write tracking ---

    fn write(&mut self, top: f64) -> Action {
        self.last_write = Some(top);
        Action::ScrollTo(top)
    }

    /// The browser clamps writes to the scrollable range, so an eased target
    /// above the top edge (an anchor near the top) lands at 0 and is compared
    /// as such.
    fn is_own_write(&mut self, view: Viewport) -> bool {
        self.last_write.take().is_some_and(|written| {
            let landed = written.min(view.max_scroll_top).max(0.0);
            (landed - view.scroll_top).abs() <= PROGRAMMATIC_SCROLL_TOLERANCE_PX
        })
    }
}

/// The browser-side engine. Wraps [`ScrollCore`], wires DOM events into it,
/// and carries out the actions it returns.
#[derive(Clone)]
pub struct ScrollEngine {
    inner: Rc<Inner>,
}

struct Inner {
    window: Window,
    core: RefCell<ScrollCore>,
    frame_callbacks: HashMap<Lane, Closure<dyn FnMut(f64)>>,
    pending_frames: RefCell<HashMap<Lane, (i32, FrameToken)>>,
    timers: RefCell<HashMap<Timer, Timeout>>,
    sweeper: RefCell<Option<Interval>>,
}

impl ScrollEngine {
    /// Build the engine for `window` and start listening once the DOM is ready.
    ///
    /// # Errors
    ///
    /// Fails when the page has no document or listeners cannot be attached.
    pub fn install(window: Window, config: ScrollConfig) -> Result<Self, ScrollError> {
        let document = window.document().ok_or_else(|| ScrollError::Js("window has no document".into()))?;
        let reduced_motion = dom::prefers_reduced_motion(&window);
        let engine = Self::new(window, ScrollCore::new(config, reduced_motion));

        if document.ready_state() == "loading" {
            let deferred = engine.clone();
            engine.listen(&document, "DOMContentLoaded", false, move |_, _| {
                if let Err(err) = deferred.attach() {
                    log::warn!("smooth scroll: {err}");
                }
            })?;
        } else {
            engine.attach()?;
        }
        Ok(engine)
    }

    fn new(window: Window, core: ScrollCore) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let frame_callbacks = [Lane::Momentum, Lane::Tween]
                .into_iter()
                .map(|lane| {
                    let weak = weak.clone();
                    let cb = Closure::wrap(Box::new(move |_ts: f64| {
                        if let Some(inner) = weak.upgrade() {
                            ScrollEngine { inner }.run_frame(lane);
                        }
                    }) as Box<dyn FnMut(f64)>);
                    (lane, cb)
                })
                .collect();
            Inner {
                window,
                core: RefCell::new(core),
                frame_callbacks,
                pending_frames: RefCell::new(HashMap::new()),
                timers: RefCell::new(HashMap::new()),
                sweeper: RefCell::new(None),
            }
        });
        Self { inner }
    }

    fn attach(&self) -> Result<(), ScrollError> {
        let window = &self.inner.window;
        let now = dom::now_ms();
        let view = dom::viewport(window);
        self.inner.core.borrow_mut().seed(now, view);

        self.listen(window, "scroll", true, |engine, _| engine.handle_scroll())?;
        if self.reduced_motion() {
            log::info!("smooth scroll: reduced motion requested, using browser default scrolling");
            return Ok(());
        }

        self.listen(window, "wheel", true, |engine, ev| {
            let delta_y = ev.dyn_ref::<WheelEvent>().map_or(0.0, WheelEvent::delta_y);
            engine.handle_wheel(delta_y);
        })?;
        self.listen(window, "touchstart", true, |engine, _| engine.handle_touch_start())?;
        self.listen(window, "touchend", true, |engine, _| engine.handle_touch_end())?;
        if let Some(document) = window.document() {
            self.listen(&document, "click", false, |engine, ev| engine.handle_click(ev))?;
        }

        self.sweep(SweepMode::All);
        let weak = Rc::downgrade(&self.inner);
        let interval = Interval::new(SWEEP_INTERVAL_MS, move || {
            if let Some(inner) = weak.upgrade() {
                ScrollEngine { inner }.sweep(SweepMode::FixedOnly);
            }
        });
        *self.inner.sweeper.borrow_mut() = Some(interval);

        log::info!("smooth scroll: momentum scrolling initialized");
        Ok(())
    }

    fn listen(
        &self,
        target: &EventTarget,
        kind: &str,
        passive: bool,
        handler: impl Fn(&ScrollEngine, &Event) + 'static,
    ) -> Result<(), ScrollError> {
        let engine = self.clone();
        let cb = Closure::wrap(Box::new(move |ev: Event| handler(&engine, &ev)) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(kind, cb.as_ref().unchecked_ref(), &options)
            .map_err(|e| ScrollError::js(kind, &e))?;
        // Listeners live as long as the page.
        cb.forget();
        Ok(())
    }

    // --- Public surface ---

    /// Animate to `target`, or jump there under reduced motion.
    pub fn scroll_to(&self, target: f64, duration_ms: Option<f64>, easing: Option<&str>) {
        let view = dom::viewport(&self.inner.window);
        let actions = self.inner.core.borrow_mut().scroll_to(dom::now_ms(), view, target, duration_ms, easing);
        self.dispatch(actions);
    }

    /// Stop momentum and any eased animation immediately.
    pub fn stop(&self) {
        let actions = self.inner.core.borrow_mut().stop();
        self.dispatch(actions);
    }

    #[must_use]
    pub fn config(&self) -> ScrollConfig {
        self.inner.core.borrow().config.clone()
    }

    /// Merge a partial config.
    ///
    /// # Errors
    ///
    /// Propagates validation failures; the config is unchanged on error.
    pub fn set_config(&self, patch: &serde_json::Value) -> Result<(), ScrollError> {
        self.inner.core.borrow_mut().set_config(patch)
    }

    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.inner.core.borrow().reduced_motion()
    }

    // --- DOM event handlers ---

    fn handle_scroll(&self) {
        let view = dom::viewport(&self.inner.window);
        let actions = self.inner.core.borrow_mut().on_scroll(dom::now_ms(), view);
        self.dispatch(actions);
    }

    fn handle_wheel(&self, delta_y: f64) {
        let view = dom::viewport(&self.inner.window);
        let actions = self.inner.core.borrow_mut().on_wheel(dom::now_ms(), view, delta_y);
        self.dispatch(actions);
    }

    fn handle_touch_start(&self) {
        let actions = self.inner.core.borrow_mut().on_touch_start();
        self.dispatch(actions);
    }

    fn handle_touch_end(&self) {
        let actions = self.inner.core.borrow_mut().on_touch_end();
        self.dispatch(actions);
    }

    fn handle_click(&self, event: &Event) {
        let Some(target) = event.target() else {
            return;
        };
        let Some(el) = target.dyn_ref::<Element>() else {
            return;
        };
        let anchor = match el.closest(IN_PAGE_ANCHOR_SELECTOR) {
            Ok(Some(anchor)) => anchor,
            Ok(None) => return,
            Err(e) => {
                log::warn!("smooth scroll: {}", ScrollError::js("closest", &e));
                return;
            }
        };
        let Some(href) = anchor.get_attribute("href") else {
            return;
        };
        let Some(selector) = fragment_selector(&href) else {
            return;
        };
        let Some(document) = self.inner.window.document() else {
            return;
        };
        let destination = match document.query_selector(selector) {
            Ok(Some(destination)) => destination,
            Ok(None) => return,
            Err(_) => {
                log::debug!("smooth scroll: ignoring anchor {selector:?}, not a valid selector");
                return;
            }
        };

        event.prevent_default();
        let top = dom::element_top(&self.inner.window, &destination);
        let view = dom::viewport(&self.inner.window);
        let actions = self.inner.core.borrow_mut().navigate_to_anchor(dom::now_ms(), view, selector, top);
        self.dispatch(actions);
    }

    fn run_frame(&self, lane: Lane) {
        let Some((_, token)) = self.inner.pending_frames.borrow_mut().remove(&lane) else {
            return;
        };
        let view = dom::viewport(&self.inner.window);
        let actions = self.inner.core.borrow_mut().on_frame(token, dom::now_ms(), view);
        self.dispatch(actions);
    }

    fn fire_timer(&self, timer: Timer) {
        let actions = self.inner.core.borrow_mut().on_timer(timer);
        self.dispatch(actions);
    }

    fn sweep(&self, mode: SweepMode) {
        let window = &self.inner.window;
        let Some(document) = window.document() else {
            return;
        };
        if let Err(err) = sweep(window, &document, mode) {
            log::warn!("smooth scroll: {err}");
        }
    }

    // --- Action execution ---

    /// Carry out core actions. Must be called with no core borrow held.
    fn dispatch(&self, actions: Vec<Action>) {
        for action in actions {
            let result = match action {
                Action::ScrollTo(top) => {
                    self.inner.window.scroll_to_with_x_and_y(0.0, top);
                    Ok(())
                }
                Action::RequestFrame(token) => self.request_frame(token),
                Action::CancelFrame(token) => self.cancel_frame(token),
                Action::ArmTimer(timer) => {
                    self.arm_timer(timer);
                    Ok(())
                }
                Action::Notify(notification) => dom::dispatch_scroll_event(&self.inner.window, &notification),
                Action::PushFragment(href) => dom::push_fragment(&self.inner.window, &href),
            };
            if let Err(err) = result {
                log::warn!("smooth scroll: {err}");
            }
        }
    }

    fn request_frame(&self, token: FrameToken) -> Result<(), ScrollError> {
        let Some(cb) = self.inner.frame_callbacks.get(&token.lane) else {
            return Ok(());
        };
        let id = self
            .inner
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| ScrollError::js("requestAnimationFrame", &e))?;
        self.inner.pending_frames.borrow_mut().insert(token.lane, (id, token));
        Ok(())
    }

    fn cancel_frame(&self, token: FrameToken) -> Result<(), ScrollError> {
        let mut pending = self.inner.pending_frames.borrow_mut();
        if !pending.get(&token.lane).is_some_and(|(_, queued)| *queued == token) {
            return Ok(());
        }
        let Some((id, _)) = pending.remove(&token.lane) else {
            return Ok(());
        };
        self.inner
            .window
            .cancel_animation_frame(id)
            .map_err(|e| ScrollError::js("cancelAnimationFrame", &e))
    }

    fn arm_timer(&self, timer: Timer) {
        let weak = Rc::downgrade(&self.inner);
        let timeout = Timeout::new(timer.delay_ms(), move || {
            if let Some(inner) = weak.upgrade() {
                ScrollEngine { inner }.fire_timer(timer);
            }
        });
        // Replacing the previous timeout drops it, which cancels it.
        self.inner.timers.borrow_mut().insert(timer, timeout);
    }
}
