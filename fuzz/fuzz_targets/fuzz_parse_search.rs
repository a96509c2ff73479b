#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parse arbitrary bytes and run searches over whatever parses.
    // Corrupt interiors must surface as CorruptIndex errors, never as
    // out-of-bounds reads or panics.
    let Ok(index) = dxi::SearchIndex::from_bytes(data.to_vec()) else {
        return;
    };
    let Ok(mut session) = index.session() else {
        return;
    };
    for query in ["", "a", "ab", "vec", "z"] {
        let _ = session.search(query, 100);
    }
});
