// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use graphyard::document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(graph) = document::from_json_str(text) {
        let json = document::to_json_string(&graph).unwrap();
        let back = document::from_json_str(&json).unwrap();
        assert_eq!(back.edges(), graph.edges());
    }
});
