#![no_main]

use bepatient::services::{checker::Extraction, comparator::Comparator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut parts = input.splitn(3, '\n');
    let path = parts.next().unwrap_or_default();
    let key = parts.next().unwrap_or_default();
    let Ok(payload) = serde_json::from_str::<serde_json::Value>(parts.next().unwrap_or_default())
    else {
        return;
    };

    let extracted = Extraction::new()
        .path(path)
        .search_query(key)
        .extract(&payload);
    for name in Comparator::NAMES {
        if let Ok(comparator) = name.parse::<Comparator>() {
            let _ = comparator.compare(&extracted, &payload);
        }
    }
});
