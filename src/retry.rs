//! Sequential retry with linear backoff.

use std::future::Future;
use std::time::Duration;

/// Asynchronous delay used between retry attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Sleeps on the tokio timer.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

#[cfg(not(target_arch = "wasm32"))]
impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

/// Sleeps by awaiting a promise resolved from the global `setTimeout`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerSleeper;

#[cfg(target_arch = "wasm32")]
impl Sleeper for TimerSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        use wasm_bindgen::{JsCast, JsValue};

        let millis = duration.as_millis() as f64;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let global = js_sys::global();
            if let Ok(set_timeout) =
                js_sys::Reflect::get(&global, &JsValue::from_str("setTimeout"))
            {
                let set_timeout: js_sys::Function = set_timeout.unchecked_into();
                // Without a timer the promise never settles; resolve immediately instead.
                if set_timeout
                    .call2(&global, &resolve, &JsValue::from_f64(millis))
                    .is_err()
                {
                    let _ = resolve.call0(&JsValue::UNDEFINED);
                }
            } else {
                let _ = resolve.call0(&JsValue::UNDEFINED);
            }
        });
        async move {
            let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub type DefaultSleeper = TokioSleeper;
#[cfg(target_arch = "wasm32")]
pub type DefaultSleeper = TimerSleeper;

/// Delay inserted after the failure of `attempt` (1-based): `base * attempt`.
pub fn backoff_delay(base: Duration, attempt: usize) -> Duration {
    base.saturating_mul(u32::try_from(attempt).unwrap_or(u32::MAX))
}

/// Runs `op` up to `budget` times, stopping at the first success.
///
/// `op` receives the 1-based attempt number. After a failed attempt `n` with
/// attempts remaining, `on_retry(n, &err)` runs and then the loop waits
/// [`backoff_delay`]`(base_delay, n)`. The failure of the last attempt is
/// returned unchanged. A budget of zero runs one attempt.
pub async fn retry_with_backoff<T, E, S, H, F, Fut>(
    budget: usize,
    base_delay: Duration,
    sleeper: &S,
    mut on_retry: H,
    mut op: F,
) -> Result<T, E>
where
    S: Sleeper,
    H: FnMut(usize, &E),
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let budget = budget.max(1);
    let mut attempt = 1usize;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= budget => return Err(err),
            Err(err) => {
                on_retry(attempt, &err);
                sleeper.sleep(backoff_delay(base_delay, attempt)).await;
                attempt += 1;
            }
        }
    }
}
