//! The requestAnimationFrame-backed game loop.
//!
//! One callback request per iteration, re-requested at the end of each
//! invocation, not a fixed-interval timer. `stop` cancels the pending
//! callback so no further ticks execute against a torn-down world. Panics
//! raised by the tick closure propagate through the callback and halt the
//! loop; nothing here catches them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};

struct RafInner {
    /// Pending callback id, None while stopped.
    handle: Cell<Option<i32>>,
    /// Keeps the JS-side callback alive across invocations.
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    /// Previous callback's DOMHighResTimeStamp, for frame deltas.
    last_timestamp: Cell<Option<f64>>,
}

pub struct RafLoop {
    inner: Rc<RafInner>,
}

impl RafLoop {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RafInner {
                handle: Cell::new(None),
                closure: RefCell::new(None),
                last_timestamp: Cell::new(None),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.handle.get().is_some()
    }

    /// Begin requesting frames. `tick` receives the seconds elapsed since
    /// the previous invocation (0 on the first). Calling start on a running
    /// loop is a no-op.
    pub fn start(&self, mut tick: impl FnMut(f32) + 'static) {
        if self.is_running() {
            return;
        }

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            let dt = match inner.last_timestamp.replace(Some(timestamp)) {
                Some(prev) => ((timestamp - prev) / 1000.0) as f32,
                None => 0.0,
            };
            tick(dt);

            // Re-request at the end of the invocation, unless stop() ran
            // during the tick.
            if inner.handle.get().is_some() {
                let borrowed = inner.closure.borrow();
                let closure = borrowed.as_ref().unwrap_throw();
                inner.handle.set(Some(request_frame(closure)));
            }
        }) as Box<dyn FnMut(f64)>);

        *self.inner.closure.borrow_mut() = Some(closure);
        let borrowed = self.inner.closure.borrow();
        let closure = borrowed.as_ref().unwrap_throw();
        self.inner.handle.set(Some(request_frame(closure)));
    }

    /// Deregister the pending callback. Idempotent.
    pub fn stop(&self) {
        if let Some(id) = self.inner.handle.take() {
            window().cancel_animation_frame(id).unwrap_throw();
        }
        self.inner.last_timestamp.set(None);
    }
}

impl Default for RafLoop {
    fn default() -> Self {
        Self::new()
    }
}

fn window() -> web_sys::Window {
    web_sys::window().expect_throw("no window in this context")
}

fn request_frame(closure: &Closure<dyn FnMut(f64)>) -> i32 {
    window()
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .expect_throw("requestAnimationFrame failed")
}
