#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let once = folio::utils::normalize(data);
    assert_eq!(folio::utils::normalize(&once), once);
    assert!(!once.chars().any(folio::utils::normalize::is_stripped));
});
