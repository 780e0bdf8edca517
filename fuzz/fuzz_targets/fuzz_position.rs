// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use graphyard::types::Position;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Ok(pos) = text.parse::<Position>() {
        let again: Position = pos.to_string().parse().unwrap();
        assert_eq!(again.to_string(), pos.to_string());
    }
});
