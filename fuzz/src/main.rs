#![allow(unused_imports)]

use emit_pdata::encoding;

fn main() {
    #[cfg(feature = "afl")]
    afl::fuzz!(|data: &[u8]| {
        // Just ensure we don't panic
        let _ = encoding::decode(data);
    });
}
