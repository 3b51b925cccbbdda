//! The runtime driver: main loop, input reader thread, render gate,
//! focus and hover tracking, and shutdown.
//!
//! Only the renderer thread (the one inside [`Runtime::run`]) mutates
//! the element tree. The reader thread blocks on the backend's input
//! source and forwards events over a bounded channel; a shared atomic
//! terminates both.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::element::{Element, Stain};
use crate::error::Result;
use crate::event::{Input, criteria};
use crate::frame::FrameComposer;
use crate::geometry::Point;
use crate::scheduler::{Job, Scheduler};
use crate::style::chain::StyleChain;
use crate::terminal::{AnsiBackend, Frame, TerminalBackend};

/// Target pacing when idle.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Reader thread poll interval (also its EOF idle pace).
const INPUT_POLL: Duration = Duration::from_millis(50);

/// The render gate: while held paused, frames are composed but never
/// emitted, so a batch of mutations reaches the screen as one frame.
/// Cloneable; handlers typically capture one.
#[derive(Clone, Default)]
pub struct RenderGate {
    depth: Arc<AtomicU32>,
}

impl RenderGate {
    /// Pause emission. Calls nest.
    pub fn pause(&self) {
        self.depth.fetch_add(1, Ordering::SeqCst);
    }

    /// Release one pause level.
    pub fn resume(&self) {
        let _ = self
            .depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |d| d.checked_sub(1));
    }

    /// Whether emission is currently suppressed.
    pub fn is_paused(&self) -> bool {
        self.depth.load(Ordering::SeqCst) > 0
    }

    /// Run `job` with the gate held.
    pub fn scoped<R>(&self, job: impl FnOnce() -> R) -> R {
        self.pause();
        let result = job();
        self.resume();
        result
    }
}

/// Cloneable termination signal.
#[derive(Clone, Default)]
pub struct ExitHandle {
    flag: Arc<AtomicBool>,
}

impl ExitHandle {
    /// Request shutdown; the runtime observes it on its next iteration,
    /// the reader thread on its next wakeup.
    pub fn exit(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown was requested.
    pub fn is_terminated(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// The GGUI runtime: owns the root element, the backend and everything
/// that used to be process-global.
pub struct Runtime {
    root: Element,
    backend: Box<dyn TerminalBackend>,
    composer: FrameComposer,
    scheduler: Scheduler,
    gate: RenderGate,
    exit: ExitHandle,
    features: u8,
    focused: Option<u64>,
    hovered: Option<u64>,
    mouse: (u16, u16),
    emitted_once: bool,
}

impl Runtime {
    /// Build a runtime: initialize the backend, size the root element to
    /// the terminal and settle the style chain.
    pub fn new(chain: StyleChain, mut backend: Box<dyn TerminalBackend>) -> Result<Self> {
        let features = backend.init()?;
        let (w, h) = backend.dimensions()?;

        let mut root = Element::new(chain);
        root.finalize(None)?;
        root.set_size(w.max(1), h.max(1));

        Ok(Self {
            root,
            backend,
            composer: FrameComposer::new(w.max(1), h.max(1)),
            scheduler: Scheduler::new(),
            gate: RenderGate::default(),
            exit: ExitHandle::default(),
            features,
            focused: None,
            hovered: None,
            mouse: (0, 0),
            emitted_once: false,
        })
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The root element, mutably. Mutations surface on the next frame.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Features probed at backend init.
    pub const fn features(&self) -> u8 {
        self.features
    }

    /// A handle to the render gate.
    pub fn gate(&self) -> RenderGate {
        self.gate.clone()
    }

    /// A handle that terminates the main loop.
    pub fn exit_handle(&self) -> ExitHandle {
        self.exit.clone()
    }

    /// The currently focused element id.
    pub const fn focused(&self) -> Option<u64> {
        self.focused
    }

    /// The currently hovered element id.
    pub const fn hovered(&self) -> Option<u64> {
        self.hovered
    }

    /// Pause emission, run the batch, resume. The batched mutations
    /// reach the terminal as at most one frame.
    pub fn pause(&mut self, job: impl FnOnce(&mut Self)) {
        self.gate.pause();
        job(self);
        self.gate.resume();
    }

    /// Queue a memory job (see [`crate::scheduler`]).
    pub fn remember(&mut self, delay: Duration, flags: u8, id: impl Into<String>, job: Job) {
        self.scheduler.remember(Instant::now(), delay, flags, id, job);
    }

    /// Run the main loop until [`ExitHandle::exit`] is called. Restores
    /// the terminal on the way out, including after I/O errors.
    pub fn run(&mut self) -> Result<()> {
        let (tx, rx) = mpsc::sync_channel::<Input>(256);
        let mut source = self.backend.take_input()?;
        let exit = self.exit.clone();
        let reader = std::thread::spawn(move || {
            while !exit.is_terminated() {
                match source.wait_for_input(INPUT_POLL) {
                    Ok(Some(events)) => {
                        for e in events {
                            if tx.send(e).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(None) => {}
                    Err(_) => {
                        // Source is gone (redirected stdin); idle at the
                        // poll interval instead of spinning.
                        std::thread::sleep(INPUT_POLL);
                    }
                }
            }
        });

        let result = self.main_loop(&rx);

        self.exit.exit();
        drop(rx);
        let _ = reader.join();
        let deinit = self.backend.deinit();
        result.and(deinit)
    }

    fn main_loop(&mut self, rx: &mpsc::Receiver<Input>) -> Result<()> {
        loop {
            if self.exit.is_terminated() {
                return Ok(());
            }

            let now = Instant::now();
            let timeout = self
                .scheduler
                .next_deadline(now)
                .map_or(FRAME_INTERVAL, |d| d.min(FRAME_INTERVAL));

            match rx.recv_timeout(timeout) {
                Ok(input) => {
                    self.process_input(input);
                    while let Ok(more) = rx.try_recv() {
                        self.process_input(more);
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
            }

            self.scheduler.tick(Instant::now(), &mut self.root);

            if self.exit.is_terminated() {
                return Ok(());
            }

            self.render_once()?;
        }
    }

    /// Dispatch one input event: update mouse/hover/focus bookkeeping,
    /// route scrolling, then walk the handler subscriptions.
    pub fn process_input(&mut self, input: Input) {
        if input.criteria == criteria::RESIZE {
            self.resize(input.x, input.y);
            return;
        }

        if input.is_mouse() {
            self.mouse = (input.x, input.y);
        }
        if input.criteria == criteria::MOUSE_MOVE {
            self.update_hover();
        }
        if input.criteria == criteria::TAB {
            self.cycle_focus();
        }
        if input.criteria == criteria::MOUSE_LEFT_CLICKED {
            self.focus_at(input.x, input.y);
        }

        if input.criteria & (criteria::MOUSE_MIDDLE_SCROLL_UP | criteria::MOUSE_MIDDLE_SCROLL_DOWN)
            != 0
        {
            let delta = if input.criteria == criteria::MOUSE_MIDDLE_SCROLL_UP {
                1
            } else {
                -1
            };
            let target = deepest_match(&self.root, self.mouse.0, self.mouse.1, &|el| {
                el.style().allow_scrolling.value()
            });
            if let Some(id) = target
                && let Some(el) = self.root.find_mut(id)
            {
                el.scroll_by(0, delta);
            }
        }

        let mouse = self.mouse;
        dispatch_handlers(&mut self.root, &input, mouse);
    }

    /// Compose and emit one frame if anything is dirty and the gate is
    /// open. An I/O failure is returned for the caller to shut down on.
    pub fn render_once(&mut self) -> Result<()> {
        if self.gate.is_paused() {
            return Ok(());
        }
        if self.emitted_once && !self.root.subtree_dirty() {
            return Ok(());
        }

        self.root.render();
        // The root has no parent to consume its display-toggle signal.
        self.root.stain.clean(Stain::STATE);
        self.root.update_absolute(Point::new(0, 0));

        let frame = self.root.buffer_snapshot();
        let (w, h) = self.composer.size();
        let cell_frame = Frame {
            width: w,
            height: h,
            cells: &frame,
        };
        if !self.backend.write_frame(&cell_frame)? {
            let bytes = self.composer.compose(&frame);
            if !bytes.is_empty() {
                self.backend.write(bytes.as_bytes())?;
                self.backend.flush()?;
            }
        }
        self.emitted_once = true;
        Ok(())
    }

    /// Resize the root, invalidating the previous frame entirely.
    pub fn resize(&mut self, width: u16, height: u16) {
        let width = width.max(1);
        let height = height.max(1);
        self.root.set_size(width, height);
        self.composer.resize(width, height);
    }

    /// Alias for [`Runtime::run`]: block until exit is requested.
    pub fn wait_for_termination(&mut self) -> Result<()> {
        self.run()
    }

    fn update_hover(&mut self) {
        let (mx, my) = self.mouse;
        let new = deepest_match(&self.root, mx, my, &|el| el.is_displayed());
        if new == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.take()
            && let Some(el) = self.root.find_mut(old)
        {
            el.hovered = false;
            el.stain.dirty(Stain::COLOR | Stain::EDGE);
        }
        if let Some(id) = new
            && let Some(el) = self.root.find_mut(id)
        {
            el.hovered = true;
            el.stain.dirty(Stain::COLOR | Stain::EDGE);
        }
        self.hovered = new;
    }

    fn cycle_focus(&mut self) {
        let mut order = Vec::new();
        collect_focusable(&self.root, &mut order);
        if order.is_empty() {
            return;
        }
        let next = match self.focused {
            Some(cur) => {
                let idx = order.iter().position(|&id| id == cur);
                let next_idx = idx.map_or(0, |i| (i + 1) % order.len());
                order[next_idx]
            }
            None => order[0],
        };
        self.set_focus(Some(next));
    }

    fn focus_at(&mut self, x: u16, y: u16) {
        let target = deepest_match(&self.root, x, y, &|el| !el.subscriptions.is_empty());
        if target.is_some() {
            self.set_focus(target);
        }
    }

    fn set_focus(&mut self, id: Option<u64>) {
        if id == self.focused {
            return;
        }
        if let Some(old) = self.focused.take()
            && let Some(el) = self.root.find_mut(old)
        {
            el.focused = false;
            el.stain.dirty(Stain::COLOR | Stain::EDGE);
        }
        if let Some(new) = id
            && let Some(el) = self.root.find_mut(new)
        {
            el.focused = true;
            el.stain.dirty(Stain::COLOR | Stain::EDGE);
        }
        self.focused = id;
    }
}

/// The deepest shown element at (x, y) satisfying the predicate,
/// front-most (highest z) child first.
fn deepest_match(
    el: &Element,
    x: u16,
    y: u16,
    pred: &dyn Fn(&Element) -> bool,
) -> Option<u64> {
    if !el.is_displayed() || !el.collides(x, y) {
        return None;
    }
    for child in el.childs().iter().rev() {
        if let Some(id) = deepest_match(child, x, y, pred) {
            return Some(id);
        }
    }
    if pred(el) { Some(el.id()) } else { None }
}

fn collect_focusable(el: &Element, out: &mut Vec<u64>) {
    if !el.subscriptions.is_empty() {
        out.push(el.id());
    }
    for child in el.childs() {
        collect_focusable(child, out);
    }
}

/// Walk the tree deepest-first (topmost z first) and run matching
/// handlers. A handler returning true consumes the event; panics are
/// caught, logged and never escape the dispatcher.
fn dispatch_handlers(el: &mut Element, input: &Input, mouse: (u16, u16)) -> bool {
    for i in (0..el.childs.len()).rev() {
        if el.childs[i].shown && dispatch_handlers(&mut el.childs[i], input, mouse) {
            return true;
        }
    }
    if el.subscriptions.is_empty() {
        return false;
    }

    let mut subs = std::mem::take(&mut el.subscriptions);
    let mut consumed = false;
    for sub in &mut subs {
        if sub.criteria & input.criteria == 0 {
            continue;
        }
        if !sub.global && !el.collides(mouse.0, mouse.1) {
            continue;
        }
        match catch_unwind(AssertUnwindSafe(|| (sub.handler)(el, input))) {
            Ok(true) => {
                consumed = true;
                break;
            }
            Ok(false) => {}
            Err(_) => {
                tracing::error!("handler panicked on element {}; event dropped", el.id());
            }
        }
    }
    // Handlers may have registered new subscriptions while theirs were
    // detached; keep both sets.
    let added = std::mem::replace(&mut el.subscriptions, subs);
    el.subscriptions.extend(added);
    consumed
}

impl Element {
    /// A copy of the current render buffer (the abstract frame when
    /// called on the root).
    pub(crate) fn buffer_snapshot(&self) -> Vec<crate::cell::Cell> {
        self.buffer.clone()
    }
}

/// Construct the runtime on the production terminal backend and run it
/// until exit.
pub fn ggui(chain: StyleChain) -> Result<()> {
    let mut rt = Runtime::new(chain, Box::new(AnsiBackend::new()))?;
    rt.run()
}
