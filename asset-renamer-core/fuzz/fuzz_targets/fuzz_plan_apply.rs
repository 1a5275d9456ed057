#![no_main]

use asset_renamer_core::{
    apply_plan, build_plan, validate_plan, ApplyOptions, MemoryFs, MidiNameRule, WeaponFrameRule,
};
use libfuzzer_sys::fuzz_target;
use std::path::Path;

// Whatever names end up in a directory, a plan that passes validation must
// apply without losing or merging any file.
fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let names: Vec<String> = input
        .lines()
        .take(20)
        .map(|s| s.chars().filter(|c| *c != '/').take(40).collect::<String>())
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .collect();

    let fs = MemoryFs::new();
    fs.add_dir("d");
    let mut ids = Vec::new();
    for name in &names {
        if fs.file_id(format!("d/{name}")).is_none() {
            ids.push(fs.add_file(format!("d/{name}")));
        }
    }

    let dir = Path::new("d");
    let plans = [
        build_plan(&fs, dir, &MidiNameRule).unwrap(),
        build_plan(&fs, dir, &WeaponFrameRule).unwrap(),
    ];

    for plan in plans {
        if validate_plan(&fs, &plan).is_ok() {
            apply_plan(&fs, &plan, &ApplyOptions::default(), &mut std::io::sink()).unwrap();
        }
        let mut remaining: Vec<u64> = fs
            .names_in(dir)
            .iter()
            .filter_map(|n| fs.file_id(dir.join(n)))
            .collect();
        remaining.sort_unstable();
        let mut expected = ids.clone();
        expected.sort_unstable();
        assert_eq!(remaining, expected);
    }
});
