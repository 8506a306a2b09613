use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// `window.setInterval` handle; the interval is cleared when dropped.
pub struct Interval {
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, f: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let tick = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            period_ms,
        ) {
            Ok(id) => Some(Self { id, _tick: tick }),
            Err(err) => {
                tracing::warn!(error = ?err, period_ms, "setInterval failed");
                None
            }
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
