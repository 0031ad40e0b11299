#![no_main]

use exhibiter::index::ExhibitIndex;
use exhibiter::naming::{display_name, is_exhibit_name, parse_exhibit_name, parse_single_file_exhibit};
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };
    let path = Path::new(name);

    let _ = display_name(name, true);
    let _ = display_name(name, false);

    // Anything the parser accepts must pass the grammar check
    let parsed = parse_exhibit_name(name, path);
    if parsed.is_ok() {
        assert!(is_exhibit_name(name));
    }

    if let Ok(exhibit) = parsed {
        let reparsed: ExhibitIndex = exhibit.index.to_string().parse().unwrap();
        assert_eq!(reparsed, exhibit.index);
        let _ = exhibit.index.successor();
    }

    if let Ok((_, title)) = parse_single_file_exhibit(name, path) {
        assert!(!title.trim().is_empty());
    }
});
