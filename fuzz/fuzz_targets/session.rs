#![no_main]
use libfuzzer_sys::fuzz_target;

use stackcalc::Session;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut session = Session::<f64>::new();
        for line in s.lines() {
            let _ = session.exec_line(line);
        }
    }
});
