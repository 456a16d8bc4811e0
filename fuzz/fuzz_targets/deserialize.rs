#![no_main]

use kokascan_syntax::{Scanner, SourceCursor, ValidSymbols};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary checkpoint bytes must either be rejected or yield a scanner that can keep going.
    let mut scanner = Scanner::new();
    if scanner.deserialize(data).is_ok() {
        let mut cursor = SourceCursor::new("\n  x\n}\n");
        cursor.begin();
        let _ = scanner.scan(&mut cursor, &ValidSymbols::emittable());
        let mut buf = [0u8; 1024];
        let _ = scanner.serialize(&mut buf);
    }
});
