#![no_main]

use bepatient::models::WaitConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(wait) = serde_json::from_slice::<WaitConfig>(data) {
        let _ = wait.request.prepare();
    }
});
