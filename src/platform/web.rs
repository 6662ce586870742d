//! Browser scheduling and DOM helpers

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{LoopHandle, RenderLoop};

struct FrameState {
    render_loop: RenderLoop,
    frame: Box<dyn FnMut(u64)>,
    /// A `requestAnimationFrame` callback is pending
    scheduled: bool,
}

/// A running `requestAnimationFrame` loop that can be stopped and resumed
#[derive(Clone)]
pub struct AnimationFrames {
    state: Rc<RefCell<FrameState>>,
    handle: LoopHandle,
}

impl AnimationFrames {
    /// Start ticking `frame` once per animation frame
    pub fn start<F>(frame: F) -> Self
    where
        F: FnMut(u64) + 'static,
    {
        let render_loop = RenderLoop::new();
        let handle = render_loop.handle();
        let state = Rc::new(RefCell::new(FrameState {
            render_loop,
            frame: Box::new(frame),
            scheduled: false,
        }));
        request_animation_frame(state.clone());
        Self { state, handle }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Stop rescheduling after the current frame
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Restart a stopped loop. A callback still pending from before the stop
    /// picks the loop back up, so only schedule when none is.
    pub fn resume(&self) {
        if !self.handle.resume() {
            return;
        }
        let pending = self.state.borrow().scheduled;
        if !pending {
            log::info!("Render loop resumed");
            request_animation_frame(self.state.clone());
        }
    }
}

fn request_animation_frame(state: Rc<RefCell<FrameState>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let pending = state.clone();
    let closure = Closure::once(move |_time: f64| {
        let again = {
            let mut guard = state.borrow_mut();
            guard.scheduled = false;
            let FrameState {
                render_loop, frame, ..
            } = &mut *guard;
            render_loop.tick(frame)
        };
        if again {
            request_animation_frame(state);
        } else {
            log::info!("Render loop stopped");
        }
    });
    if window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .is_ok()
    {
        pending.borrow_mut().scheduled = true;
    }
    closure.forget();
}

/// Attach a listener for `event` on `target`, leaking the closure for the page lifetime
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Set an inline style property, ignoring failures
pub fn set_style(element: &web_sys::Element, property: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<web_sys::HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}
